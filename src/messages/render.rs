//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{InputMode, Phase};
use crate::models::TokenCard;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub phase: Phase,

    // Address form
    pub address: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Wallet
    pub wallet_connected: bool,

    // Card grid
    pub cards: Vec<TokenCard>,
    pub grid_scroll: u16,

    // Optional local IPFS gateway applied to image URLs at display time
    pub local_gateway: Option<String>,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            phase: Phase::Idle,
            address: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            wallet_connected: false,
            cards: Vec::new(),
            grid_scroll: 0,
            local_gateway: None,
            show_help: false,
        }
    }
}
