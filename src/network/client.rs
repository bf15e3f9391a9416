//! Alchemy NFT API client - owned-token listing and metadata resolution

use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::future::try_join_all;

use crate::models::{OwnedToken, OwnedTokensPage, TokenCard, TokenMetadata};
use crate::network::retry::fetch_with_retries;
use crate::storage::Config;

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

fn api_base(config: &Config) -> String {
    format!(
        "https://{}.g.alchemy.com/nft/v2/{}",
        config.network, config.api_key
    )
}

/// List the tokens owned by `address`
async fn fetch_owned_tokens(
    client: &reqwest::Client,
    config: &Config,
    address: &str,
) -> Result<OwnedTokensPage> {
    let url = format!("{}/getNFTs", api_base(config));
    let response = client
        .get(&url)
        .query(&[("owner", address)])
        .send()
        .await
        .context("owned-tokens request failed")?
        .error_for_status()
        .context("owned-tokens request rejected")?;

    response
        .json()
        .await
        .context("decoding owned-tokens response")
}

/// Resolve the metadata record for one token
async fn fetch_token_metadata(
    client: &reqwest::Client,
    config: &Config,
    token: &OwnedToken,
) -> Result<TokenMetadata> {
    let url = format!("{}/getNFTMetadata", api_base(config));
    let response = client
        .get(&url)
        .query(&[
            ("contractAddress", token.contract.address.as_str()),
            ("tokenId", token.id.token_id.as_str()),
        ])
        .send()
        .await
        .with_context(|| format!("metadata request failed for {}", token.key()))?
        .error_for_status()
        .with_context(|| format!("metadata request rejected for {}", token.key()))?;

    response
        .json()
        .await
        .with_context(|| format!("decoding metadata for {}", token.key()))
}

/// Full retrieval sequence: list the owned tokens, then resolve every
/// token's metadata concurrently. Each API call carries its own retry
/// budget; the metadata join is all-or-nothing, so a single token failing
/// all its attempts fails the whole batch.
///
/// Cards pair each token with the metadata fetched for that token, so the
/// result cannot misalign regardless of completion order.
pub async fn fetch_token_cards(
    client: &reqwest::Client,
    config: &Config,
    address: &str,
) -> Result<Vec<TokenCard>> {
    let attempts = config.retry_attempts;
    let base_delay = Duration::from_millis(config.retry_base_delay_ms);

    let page = fetch_with_retries(
        || fetch_owned_tokens(client, config, address),
        attempts,
        base_delay,
    )
    .await?;

    tracing::info!(
        owner = %address,
        listed = page.owned_nfts.len(),
        total = page.total_count,
        "owned tokens listed"
    );

    let cards = try_join_all(page.owned_nfts.into_iter().map(|token| async move {
        let metadata = fetch_with_retries(
            || fetch_token_metadata(client, config, &token),
            attempts,
            base_delay,
        )
        .await?;
        Ok::<_, anyhow::Error>(TokenCard { token, metadata })
    }))
    .await?;

    Ok(cards)
}
