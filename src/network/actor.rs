//! Network actor - runs the retrieval sequence and wallet calls in Tokio

use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, fetch_token_cards};
use crate::network::wallet::request_accounts;
use crate::storage::Config;

/// Network actor that processes fetch and wallet commands
pub struct NetworkActor {
    client: reqwest::Client,
    config: Config,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_fetches: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(config: Config, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client: create_client(),
            config,
            response_tx,
            active_fetches: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchOwnedTokens { id, address }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let config = self.config.clone();

                            self.active_fetches.spawn(async move {
                                tracing::info!(id, owner = %address, "starting retrieval sequence");
                                let start = Instant::now();
                                let result = fetch_token_cards(&client, &config, &address).await;
                                let time_ms = start.elapsed().as_millis() as u64;

                                let response = match result {
                                    Ok(cards) => {
                                        tracing::info!(id, cards = cards.len(), time_ms, "retrieval sequence complete");
                                        NetworkResponse::TokensLoaded { id, cards, time_ms }
                                    }
                                    Err(err) => {
                                        tracing::error!(id, error = %err, time_ms, "retrieval sequence failed");
                                        NetworkResponse::FetchFailed {
                                            id,
                                            message: format!("{:#}", err),
                                            time_ms,
                                        }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::ConnectWallet { id }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let rpc_url = self.config.wallet_rpc_url.clone();

                            self.active_fetches.spawn(async move {
                                tracing::info!(id, url = %rpc_url, "requesting wallet accounts");
                                let response = match request_accounts(&client, &rpc_url).await {
                                    Ok(address) => NetworkResponse::WalletConnected { id, address },
                                    Err(err) => {
                                        tracing::error!(id, error = %err, "wallet connection failed");
                                        NetworkResponse::WalletFailed {
                                            id,
                                            message: format!("{:#}", err),
                                        }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_fetches.join_next() => {}
            }
        }
    }
}
