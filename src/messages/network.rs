//! Network messages - communication between App and Network layers

use crate::models::TokenCard;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run the full retrieval sequence for an address: list owned tokens,
    /// then resolve every token's metadata
    FetchOwnedTokens { id: u64, address: String },
    /// Ask the wallet node for its accounts; the first one is adopted
    ConnectWallet { id: u64 },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Retrieval sequence finished with every metadata request resolved
    TokensLoaded {
        id: u64,
        cards: Vec<TokenCard>,
        time_ms: u64,
    },
    /// Retrieval sequence failed after exhausting its retry budget
    FetchFailed {
        id: u64,
        message: String,
        time_ms: u64,
    },
    /// Wallet node returned at least one account
    WalletConnected { id: u64, address: String },
    /// Wallet node rejected the request or returned no accounts
    WalletFailed { id: u64, message: String },
}

impl NetworkResponse {
    /// Get the request ID the response belongs to
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::TokensLoaded { id, .. } => *id,
            NetworkResponse::FetchFailed { id, .. } => *id,
            NetworkResponse::WalletConnected { id, .. } => *id,
            NetworkResponse::WalletFailed { id, .. } => *id,
        }
    }
}
