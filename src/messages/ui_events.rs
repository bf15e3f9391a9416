//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// View phase - which of the three screens the app is showing
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Phase {
    /// Address form with Fetch / Connect Wallet actions
    #[default]
    Idle,
    /// Retrieval sequence in flight
    Loading,
    /// Card grid (possibly empty after a failed fetch)
    Loaded,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Address editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Fetch lifecycle
    Fetch,
    ConnectWallet,
    Disconnect,
    NewFetch,

    // Recent addresses
    RecentPrev,
    RecentNext,

    // Card grid
    ScrollUp,
    ScrollDown,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    phase: Phase,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if input_mode == InputMode::Editing {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Enter => Some(UiEvent::Fetch),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        };
    }

    match phase {
        Phase::Idle => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
            KeyCode::Char('f') => Some(UiEvent::Fetch),
            KeyCode::Char('c') => Some(UiEvent::ConnectWallet),
            KeyCode::Up => Some(UiEvent::RecentPrev),
            KeyCode::Down => Some(UiEvent::RecentNext),
            _ => None,
        },
        // No cancellation: an in-flight fetch runs to completion
        Phase::Loading => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            _ => None,
        },
        Phase::Loaded => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('d') => Some(UiEvent::Disconnect),
            KeyCode::Char('n') => Some(UiEvent::NewFetch),
            KeyCode::Up => Some(UiEvent::ScrollUp),
            KeyCode::Down => Some(UiEvent::ScrollDown),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_fetches_while_editing() {
        let event = key_to_ui_event(
            press(KeyCode::Enter),
            Phase::Idle,
            InputMode::Editing,
            false,
        );
        assert!(matches!(event, Some(UiEvent::Fetch)));
    }

    #[test]
    fn chars_feed_the_address_input_while_editing() {
        let event = key_to_ui_event(
            press(KeyCode::Char('f')),
            Phase::Idle,
            InputMode::Editing,
            false,
        );
        assert!(matches!(event, Some(UiEvent::CharInput('f'))));
    }

    #[test]
    fn loading_ignores_fetch_keys() {
        let event = key_to_ui_event(
            press(KeyCode::Char('f')),
            Phase::Loading,
            InputMode::Normal,
            false,
        );
        assert!(event.is_none());
    }

    #[test]
    fn help_popup_swallows_any_key() {
        let event = key_to_ui_event(press(KeyCode::Char('q')), Phase::Idle, InputMode::Normal, true);
        assert!(matches!(event, Some(UiEvent::CloseHelp)));
    }
}
