//! Network layer - NFT API retrieval and wallet account adoption
//!
//! The Network actor receives fetch/wallet commands and sends back responses.

pub mod actor;
pub mod client;
pub mod retry;
pub mod wallet;

pub use actor::NetworkActor;
pub use retry::fetch_with_retries;
