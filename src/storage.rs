use crate::constants::{
    DEFAULT_NETWORK, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BASE_DELAY_MS, DEFAULT_WALLET_RPC_URL,
};
use crate::models::RecentFetch;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

const MAX_RECENT: usize = 50;
const CONFIG_FILE: &str = "config.yaml";
const RECENT_FILE: &str = "recent.yaml";

/// Runtime configuration, read from `config.yaml` with env overrides
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Alchemy API key, also settable via ALCHEMY_API_KEY
    pub api_key: String,
    /// Alchemy network slug, e.g. "eth-mainnet"
    pub network: String,
    /// Wallet node for account adoption, also settable via WALLET_RPC_URL
    pub wallet_rpc_url: String,
    pub retry_attempts: u32,
    pub retry_base_delay_ms: u64,
    /// Local IPFS gateway for development; image URLs are rewritten to it
    pub local_ipfs_gateway: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: String::new(),
            network: String::from(DEFAULT_NETWORK),
            wallet_rpc_url: String::from(DEFAULT_WALLET_RPC_URL),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            local_ipfs_gateway: None,
        }
    }
}

/// Manages configuration and the recent-fetch history files
pub struct Storage {
    pub config: Config,
    pub recent: VecDeque<RecentFetch>,
    config_dir: PathBuf,
}

impl Storage {
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".nft-indexer");

        let mut storage = Self::with_dir(config_dir);
        storage.apply_env_overrides();
        storage
    }

    /// Build storage rooted at an explicit directory, loading whatever is
    /// there. Env overrides are not applied here.
    pub fn with_dir(config_dir: PathBuf) -> Self {
        let mut storage = Storage {
            config: Config::default(),
            recent: VecDeque::with_capacity(MAX_RECENT),
            config_dir,
        };

        // Missing or malformed files fall back to defaults
        let _ = storage.load_all();
        storage
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("ALCHEMY_API_KEY") {
            if !key.is_empty() {
                self.config.api_key = key;
            }
        }
        if let Ok(url) = std::env::var("WALLET_RPC_URL") {
            if !url.is_empty() {
                self.config.wallet_rpc_url = url;
            }
        }
    }

    /// Ensure config directory exists
    fn ensure_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Load config and recent fetches from disk
    pub fn load_all(&mut self) -> Result<()> {
        let config_path = self.config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            if let Ok(config) = serde_yaml::from_str::<Config>(&content) {
                self.config = config;
            }
        }

        let recent_path = self.config_dir.join(RECENT_FILE);
        if recent_path.exists() {
            let content = fs::read_to_string(&recent_path)?;
            if let Ok(entries) = serde_yaml::from_str::<Vec<RecentFetch>>(&content) {
                self.recent = entries.into_iter().take(MAX_RECENT).collect();
            }
        }

        Ok(())
    }

    /// Record a completed fetch, newest first. One entry per address.
    pub fn add_recent(&mut self, entry: RecentFetch) {
        self.recent.retain(|e| e.address != entry.address);
        if self.recent.len() >= MAX_RECENT {
            self.recent.pop_back();
        }
        self.recent.push_front(entry);
    }

    /// Save the recent-fetch list to file
    pub fn save_recent(&self) -> Result<()> {
        self.ensure_dir()?;
        let entries: Vec<&RecentFetch> = self.recent.iter().collect();
        let content = serde_yaml::to_string(&entries)?;
        fs::write(self.config_dir.join(RECENT_FILE), content)?;
        Ok(())
    }

    /// Get recent entry by index (0 = most recent)
    pub fn get_recent(&self, index: usize) -> Option<&RecentFetch> {
        self.recent.get(index)
    }

    pub fn recent_len(&self) -> usize {
        self.recent.len()
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(address: &str, token_count: usize) -> RecentFetch {
        RecentFetch {
            address: address.to_string(),
            token_count,
            timestamp: chrono::Utc::now(),
        }
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::with_dir(dir.path().to_path_buf());
        assert_eq!(storage.config, Config::default());
        assert_eq!(storage.recent_len(), 0);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "api_key: demo\nretry_attempts: 5\n",
        )
        .unwrap();

        let storage = Storage::with_dir(dir.path().to_path_buf());
        assert_eq!(storage.config.api_key, "demo");
        assert_eq!(storage.config.retry_attempts, 5);
        // Unset fields keep their defaults
        assert_eq!(storage.config.network, "eth-mainnet");
    }

    #[test]
    fn recent_fetches_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::with_dir(dir.path().to_path_buf());
        storage.add_recent(entry("0xaaa", 2));
        storage.add_recent(entry("0xbbb", 0));
        storage.save_recent().unwrap();

        let reloaded = Storage::with_dir(dir.path().to_path_buf());
        assert_eq!(reloaded.recent_len(), 2);
        assert_eq!(reloaded.get_recent(0).unwrap().address, "0xbbb");
    }

    #[test]
    fn refetching_an_address_moves_it_to_the_front() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::with_dir(dir.path().to_path_buf());
        storage.add_recent(entry("0xaaa", 1));
        storage.add_recent(entry("0xbbb", 1));
        storage.add_recent(entry("0xaaa", 3));

        assert_eq!(storage.recent_len(), 2);
        assert_eq!(storage.get_recent(0).unwrap().address, "0xaaa");
        assert_eq!(storage.get_recent(0).unwrap().token_count, 3);
    }
}
