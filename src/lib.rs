//! # NFT Indexer TUI
//!
//! A terminal-based ERC-721 portfolio viewer: type an Ethereum address (or
//! adopt one from a wallet node) and browse every NFT it owns.
//!
//! ## Features
//! - Owned-token listing and per-token metadata via the Alchemy NFT API
//! - Bounded retries with linear backoff around every API call
//! - IPFS gateway normalization for image URLs
//! - Wallet account adoption over JSON-RPC (`eth_requestAccounts`)
//! - Recent-address recall
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod constants;
pub mod ipfs;
pub mod messages;
pub mod models;
pub mod network;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use ipfs::sanitize_ipfs_url;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{OwnedToken, TokenCard, TokenMetadata};
pub use network::{fetch_with_retries, NetworkActor};
pub use storage::{Config, Storage};
