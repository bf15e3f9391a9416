//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Prefix of raw `ipfs://` URLs found in token metadata
pub const IPFS_SCHEME_PREFIX: &str = "ipfs://";

/// Prefix of ipfs.io gateway URLs, rewritten to the pinned gateway
pub const IPFS_IO_GATEWAY_PREFIX: &str = "https://ipfs.io/ipfs/";

/// HTTPS gateway every IPFS URL is normalized to
pub const PINATA_GATEWAY_PREFIX: &str = "https://gateway.pinata.cloud/ipfs/";

/// Shown in place of an image when token metadata carries none
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/200";

/// Default Alchemy network slug
pub const DEFAULT_NETWORK: &str = "eth-mainnet";

/// Default wallet node for account adoption
pub const DEFAULT_WALLET_RPC_URL: &str = "http://127.0.0.1:8545";

/// Default retry budget for each API call
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default base delay between retries, multiplied by the attempt number
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;

/// Application name
#[allow(dead_code)]
pub const APP_NAME: &str = "NFT Indexer TUI";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
