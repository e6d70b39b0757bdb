//! Key mapping from terminal events to session commands.

use crate::types::Input;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which screen the keys are meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Idle, intro, game over and scoreboard screens
    Menu,
    Playing,
    NameEntry,
}

/// What a key press asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Game(Input),
    /// Enter bonus mode immediately
    ForceBonus,
    Start,
    NameChar(char),
    NameBackspace,
    NameConfirm,
}

/// Map a key press to a command for the given screen.
///
/// Key releases are ignored.
pub fn handle_key_event(key: KeyEvent, context: KeyContext) -> Option<Command> {
    if key.kind == KeyEventKind::Release || should_quit(key) {
        return None;
    }
    match context {
        KeyContext::Menu => menu_key(key),
        KeyContext::Playing => game_key(key),
        KeyContext::NameEntry => name_key(key),
    }
}

fn menu_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Enter | KeyCode::Char(_) => Some(Command::Start),
        _ => None,
    }
}

fn game_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::Game(Input::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Game(Input::Right))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::Game(Input::Down))
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char(' ')
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Command::Game(Input::Rotate)),

        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::ForceBonus),

        _ => None,
    }
}

fn name_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Enter => Some(Command::NameConfirm),
        KeyCode::Backspace => Some(Command::NameBackspace),
        KeyCode::Char(c) if c.is_ascii_alphanumeric() => Some(Command::NameChar(c)),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
