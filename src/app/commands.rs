//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::messages::ui_events::{InputMode, Phase};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::RecentFetch;

impl AppState {
    // ========================
    // Address editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.phase == Phase::Idle {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.address.len();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_char(&mut self, c: char) {
        if self.cursor_position <= self.address.len() {
            self.address.insert(self.cursor_position, c);
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let prev_pos = self.address[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.address.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            let new_pos = self.address[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.address.len() {
            let new_pos = self.address[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(self.address.len());
            self.cursor_position = new_pos;
        }
    }

    // ========================
    // Recent addresses
    // ========================

    pub fn recent_prev(&mut self) {
        if self.storage.recent_len() == 0 {
            return;
        }

        let new_index = match self.recent_index {
            None => Some(0),
            Some(i) if i + 1 < self.storage.recent_len() => Some(i + 1),
            Some(i) => Some(i),
        };

        if let Some(idx) = new_index {
            if let Some(entry) = self.storage.get_recent(idx) {
                self.address = entry.address.clone();
                self.recent_index = Some(idx);
                self.cursor_position = self.address.len();
            }
        }
    }

    pub fn recent_next(&mut self) {
        if let Some(idx) = self.recent_index {
            if idx > 0 {
                if let Some(entry) = self.storage.get_recent(idx - 1) {
                    self.address = entry.address.clone();
                    self.recent_index = Some(idx - 1);
                    self.cursor_position = self.address.len();
                }
            } else {
                // Back to an empty input
                self.address.clear();
                self.recent_index = None;
                self.cursor_position = 0;
            }
        }
    }

    // ========================
    // Grid scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.grid_scroll = self.grid_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.grid_scroll = self.grid_scroll.saturating_add(1);
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Fetch lifecycle
    // ========================

    /// Start the retrieval sequence for the typed address
    pub fn fetch(&mut self) -> Option<NetworkCommand> {
        if self.phase == Phase::Loading {
            return None;
        }
        let address = self.address.trim().to_string();
        if address.is_empty() {
            return None;
        }

        self.input_mode = InputMode::Normal;
        self.phase = Phase::Loading;
        self.cards.clear();
        self.grid_scroll = 0;

        let id = self.next_id();
        self.pending_request_id = Some(id);

        Some(NetworkCommand::FetchOwnedTokens { id, address })
    }

    /// Ask the wallet node for an account to adopt
    pub fn connect_wallet(&mut self) -> Option<NetworkCommand> {
        if self.phase == Phase::Loading || self.wallet_connected {
            return None;
        }

        self.phase = Phase::Loading;
        let id = self.next_id();
        self.pending_request_id = Some(id);

        Some(NetworkCommand::ConnectWallet { id })
    }

    pub fn disconnect(&mut self) {
        self.reset();
    }

    pub fn new_fetch(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.input_mode = InputMode::Normal;
        self.wallet_connected = false;
        self.address.clear();
        self.cursor_position = 0;
        self.cards.clear();
        self.grid_scroll = 0;
        // An in-flight completion for the old address no longer matches
        // and is dropped when it arrives
        self.pending_request_id = None;
        self.recent_index = None;
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a network response. May return a follow-up command (adopting a
    /// wallet account immediately starts the retrieval sequence).
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        if self.pending_request_id != Some(response.id()) {
            tracing::debug!(id = response.id(), "dropping stale network response");
            return None;
        }

        match response {
            NetworkResponse::TokensLoaded { cards, time_ms, .. } => {
                self.pending_request_id = None;
                self.cards = cards;
                self.phase = Phase::Loaded;
                self.grid_scroll = 0;
                self.record_fetch();
                tracing::info!(cards = self.cards.len(), time_ms, "view loaded");
                None
            }
            NetworkResponse::FetchFailed {
                message, time_ms, ..
            } => {
                // No error banner: the view lands on an empty non-loading
                // grid and the failure goes to the log
                self.pending_request_id = None;
                self.cards.clear();
                self.phase = Phase::Loaded;
                tracing::error!(error = %message, time_ms, "failed to fetch NFT data");
                None
            }
            NetworkResponse::WalletConnected { address, .. } => {
                self.wallet_connected = true;
                self.address = address;
                self.cursor_position = self.address.len();
                self.phase = Phase::Loading;

                let id = self.next_id();
                self.pending_request_id = Some(id);
                Some(NetworkCommand::FetchOwnedTokens {
                    id,
                    address: self.address.clone(),
                })
            }
            NetworkResponse::WalletFailed { message, .. } => {
                self.pending_request_id = None;
                self.phase = Phase::Idle;
                tracing::error!(error = %message, "wallet connection rejected");
                None
            }
        }
    }

    /// Remember a completed fetch for the recent-address list
    fn record_fetch(&mut self) {
        let entry = RecentFetch {
            address: self.address.trim().to_string(),
            token_count: self.cards.len(),
            timestamp: chrono::Utc::now(),
        };
        self.storage.add_recent(entry);
        if let Err(err) = self.storage.save_recent() {
            tracing::warn!(error = %err, "could not persist recent fetches");
        }
        self.recent_index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OwnedToken, TokenCard, TokenMetadata};
    use crate::storage::Storage;

    fn test_state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(Storage::with_dir(dir.path().to_path_buf()));
        (state, dir)
    }

    fn card(contract: &str, token_id: &str, title: &str) -> TokenCard {
        TokenCard {
            token: OwnedToken::new(contract, token_id),
            metadata: TokenMetadata {
                title: title.into(),
                ..Default::default()
            },
        }
    }

    fn type_address(state: &mut AppState, address: &str) {
        state.start_editing();
        for c in address.chars() {
            state.enter_char(c);
        }
        state.stop_editing();
    }

    fn fetch_id(cmd: NetworkCommand) -> u64 {
        match cmd {
            NetworkCommand::FetchOwnedTokens { id, .. } => id,
            other => panic!("expected fetch command, got {:?}", other),
        }
    }

    #[test]
    fn fetch_walks_idle_loading_loaded_with_two_cards() {
        let (mut state, _dir) = test_state();
        assert_eq!(state.phase, Phase::Idle);

        type_address(&mut state, "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        let id = fetch_id(state.fetch().expect("fetch starts"));
        assert_eq!(state.phase, Phase::Loading);

        let followup = state.handle_response(NetworkResponse::TokensLoaded {
            id,
            cards: vec![card("0xabc", "0x1", "Moonbird #1"), card("0xabc", "0x2", "")],
            time_ms: 12,
        });

        assert!(followup.is_none());
        assert_eq!(state.phase, Phase::Loaded);
        assert_eq!(state.cards.len(), 2);
        assert_eq!(state.cards[0].metadata.display_title(), "Moonbird #1");
        assert_eq!(state.cards[1].metadata.display_title(), "No Name");
    }

    #[test]
    fn fetch_requires_an_address() {
        let (mut state, _dir) = test_state();
        type_address(&mut state, "   ");
        assert!(state.fetch().is_none());
        assert_eq!(state.phase, Phase::Idle);
    }

    #[test]
    fn a_second_fetch_while_loading_is_ignored() {
        let (mut state, _dir) = test_state();
        type_address(&mut state, "0xabc");
        assert!(state.fetch().is_some());
        assert!(state.fetch().is_none());
    }

    #[test]
    fn failed_fetch_lands_on_an_empty_non_loading_view() {
        let (mut state, _dir) = test_state();
        type_address(&mut state, "0xabc");
        let id = fetch_id(state.fetch().expect("fetch starts"));

        state.handle_response(NetworkResponse::FetchFailed {
            id,
            message: "owned-tokens request failed".into(),
            time_ms: 3000,
        });

        assert_eq!(state.phase, Phase::Loaded);
        assert!(state.cards.is_empty());
        assert_eq!(state.pending_request_id, None);
    }

    #[test]
    fn completion_after_disconnect_is_dropped() {
        let (mut state, _dir) = test_state();
        type_address(&mut state, "0xabc");
        let id = fetch_id(state.fetch().expect("fetch starts"));

        state.disconnect();
        assert_eq!(state.phase, Phase::Idle);

        let followup = state.handle_response(NetworkResponse::TokensLoaded {
            id,
            cards: vec![card("0xabc", "0x1", "Stale")],
            time_ms: 99,
        });

        assert!(followup.is_none());
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.cards.is_empty());
    }

    #[test]
    fn wallet_adoption_triggers_a_fetch_for_the_first_account() {
        let (mut state, _dir) = test_state();
        let id = match state.connect_wallet().expect("connect starts") {
            NetworkCommand::ConnectWallet { id } => id,
            other => panic!("expected connect command, got {:?}", other),
        };
        assert_eq!(state.phase, Phase::Loading);

        let followup = state.handle_response(NetworkResponse::WalletConnected {
            id,
            address: "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".into(),
        });

        assert!(state.wallet_connected);
        assert_eq!(state.phase, Phase::Loading);
        match followup {
            Some(NetworkCommand::FetchOwnedTokens { address, .. }) => {
                assert_eq!(address, "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
            }
            other => panic!("expected follow-up fetch, got {:?}", other),
        }
    }

    #[test]
    fn wallet_rejection_returns_to_idle_disconnected() {
        let (mut state, _dir) = test_state();
        let id = match state.connect_wallet().expect("connect starts") {
            NetworkCommand::ConnectWallet { id } => id,
            other => panic!("expected connect command, got {:?}", other),
        };

        state.handle_response(NetworkResponse::WalletFailed {
            id,
            message: "wallet error 4001: User rejected the request.".into(),
        });

        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.wallet_connected);
    }

    #[test]
    fn successful_fetch_is_recorded_for_recall() {
        let (mut state, _dir) = test_state();
        type_address(&mut state, "0xabc");
        let id = fetch_id(state.fetch().expect("fetch starts"));
        state.handle_response(NetworkResponse::TokensLoaded {
            id,
            cards: vec![card("0xabc", "0x1", "One")],
            time_ms: 5,
        });

        assert_eq!(state.storage.get_recent(0).unwrap().address, "0xabc");
        assert_eq!(state.storage.get_recent(0).unwrap().token_count, 1);

        state.new_fetch();
        assert!(state.address.is_empty());
        state.recent_prev();
        assert_eq!(state.address, "0xabc");
    }
}
