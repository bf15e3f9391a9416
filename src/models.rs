use serde::{Deserialize, Serialize};

/// Reference to the contract that minted a token
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractRef {
    pub address: String,
}

/// Token identifier within its contract, as the indexer returns it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenRef {
    #[serde(rename = "tokenId")]
    pub token_id: String,
}

/// One entry returned by the owned-tokens indexing call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OwnedToken {
    pub contract: ContractRef,
    pub id: TokenRef,
}

impl OwnedToken {
    pub fn new(contract: impl Into<String>, token_id: impl Into<String>) -> Self {
        OwnedToken {
            contract: ContractRef {
                address: contract.into(),
            },
            id: TokenRef {
                token_id: token_id.into(),
            },
        }
    }

    /// Stable identity joining a token with its metadata.
    /// Contract addresses are case-insensitive hex, token ids are not.
    pub fn key(&self) -> String {
        format!("{}:{}", self.contract.address.to_lowercase(), self.id.token_id)
    }
}

/// Response envelope of the owned-tokens call
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OwnedTokensPage {
    #[serde(rename = "ownedNfts", default)]
    pub owned_nfts: Vec<OwnedToken>,
    #[serde(rename = "totalCount", default)]
    pub total_count: u64,
}

/// The token's own metadata document, as resolved by the indexer
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Per-token descriptive record from the metadata call
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "metadata", default)]
    pub raw: RawMetadata,
}

impl TokenMetadata {
    /// Display title; the indexer leaves `title` empty for unnamed tokens
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "No Name"
        } else {
            &self.title
        }
    }
}

/// A token joined with its metadata, paired by token identity rather than
/// by position in two separate result lists
#[derive(Clone, Debug, PartialEq)]
pub struct TokenCard {
    pub token: OwnedToken,
    pub metadata: TokenMetadata,
}

impl TokenCard {
    /// Gateway-normalized image URL, placeholder when metadata has none
    pub fn image_url(&self) -> String {
        match &self.metadata.raw.image {
            Some(image) => crate::ipfs::sanitize_ipfs_url(image),
            None => crate::constants::PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }
}

/// One completed fetch, persisted for the recent-address list
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecentFetch {
    pub address: String,
    pub token_count: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
