//! Key bindings: arrows plus the classic Q/W rotation keys, and vim-style.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCcw,
    RotateCw,
    Pause,
    Quit,
    None,
}

/// Map key event to game action.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers == KeyModifiers::CONTROL {
        return match code {
            KeyCode::Char('c') => Action::Quit,
            _ => Action::None,
        };
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('p') | KeyCode::Char('P') => Action::Pause,
        KeyCode::Left | KeyCode::Char('h') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::MoveRight,
        KeyCode::Down | KeyCode::Char('j') => Action::SoftDrop,
        KeyCode::Char('q') | KeyCode::Char('Q') => Action::RotateCcw,
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Action::RotateCw
        }
        _ => Action::None,
    }
}
