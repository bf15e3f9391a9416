//! Wallet account adoption over JSON-RPC
//!
//! Instead of typing an address, the user can adopt one from a wallet node
//! (a local dev node or any endpoint speaking `eth_requestAccounts`). The
//! first account the node returns becomes the queried address.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Vec<String>>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

fn first_account(response: RpcResponse) -> Result<String> {
    if let Some(err) = response.error {
        return Err(anyhow!("wallet error {}: {}", err.code, err.message));
    }
    response
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("wallet returned no accounts"))
}

/// Ask the wallet node for its accounts and adopt the first one
pub async fn request_accounts(client: &reqwest::Client, rpc_url: &str) -> Result<String> {
    let body = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "eth_requestAccounts",
        "params": [],
    });

    let response: RpcResponse = client
        .post(rpc_url)
        .json(&body)
        .send()
        .await
        .context("wallet node unreachable")?
        .error_for_status()
        .context("wallet node rejected the request")?
        .json()
        .await
        .context("decoding wallet response")?;

    first_account(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adopts_the_first_account() {
        let response: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"result":["0xabc","0xdef"]}"#,
        )
        .unwrap();
        assert_eq!(first_account(response).unwrap(), "0xabc");
    }

    #[test]
    fn user_denial_surfaces_as_error() {
        let response: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":4001,"message":"User rejected the request."}}"#,
        )
        .unwrap();
        let err = first_account(response).unwrap_err();
        assert!(err.to_string().contains("4001"));
    }

    #[test]
    fn empty_account_list_is_an_error() {
        let response: RpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":[]}"#).unwrap();
        assert!(first_account(response).is_err());
    }
}
