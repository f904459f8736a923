//! Key mapping from terminal events to engine commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a single key press asks of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKey {
    Command(Command),
    Restart,
    Quit,
}

impl DriverKey {
    /// Classify a key event. Releases and unmapped keys yield `None`.
    pub fn from_event(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if should_quit(key) {
            return Some(DriverKey::Quit);
        }
        if is_restart(key) {
            return Some(DriverKey::Restart);
        }
        handle_key_event(key).map(DriverKey::Command)
    }
}

/// Map keyboard input to engine commands.
///
/// Arrow keys and space follow the classic layout (up rotates, space hard
/// drops); `h`/`j`/`k`/`l` and `a`/`s`/`w`/`d` are aliases.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Command::SoftDrop),
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Command::Rotate),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Command::HardDrop),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key asks for a new game.
pub fn is_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}
