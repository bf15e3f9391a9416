//! App state - pure data structure with no I/O logic

use crate::messages::ui_events::{InputMode, Phase};
use crate::messages::RenderState;
use crate::models::TokenCard;
use crate::storage::Storage;

/// Main application state - pure data, no I/O.
///
/// All mutation goes through the command methods in `commands.rs`, so every
/// state transition is explicit and happens on the app actor's task.
pub struct AppState {
    pub phase: Phase,
    pub input_mode: InputMode,

    // Address form
    pub address: String,
    pub cursor_position: usize,

    // Wallet
    pub wallet_connected: bool,

    // Fetched results
    pub cards: Vec<TokenCard>,
    pub grid_scroll: u16,

    // Request tracking: a response whose id does not match the pending one
    // is stale (its fetch was superseded or reset) and is dropped
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    // Recent-address cycling
    pub recent_index: Option<usize>,

    // Storage (persisted data)
    pub storage: Storage,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Storage::new())
    }
}

impl AppState {
    pub fn new(storage: Storage) -> Self {
        AppState {
            phase: Phase::Idle,
            input_mode: InputMode::Normal,
            address: String::new(),
            cursor_position: 0,
            wallet_connected: false,
            cards: Vec::new(),
            grid_scroll: 0,
            next_request_id: 1,
            pending_request_id: None,
            recent_index: None,
            storage,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            phase: self.phase,
            address: self.address.clone(),
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            wallet_connected: self.wallet_connected,
            cards: self.cards.clone(),
            grid_scroll: self.grid_scroll,
            local_gateway: self.storage.config.local_ipfs_gateway.clone(),
            show_help: self.show_help,
        }
    }
}
