//! Key bindings from terminal key codes to game commands.
//!
//! Every command has exactly one key and no key drives two commands.
//! Character keys are matched case-insensitively.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::Command;

const COMMAND_COUNT: usize = Command::ALL.len();

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("cannot bind {key:?} to {requested}: already used by {existing}")]
    DuplicateKey {
        key: KeyCode,
        existing: Command,
        requested: Command,
    },

    #[error("no key bound to {0}")]
    Unbound(Command),

    #[error("unrecognized key name {0:?}")]
    UnknownKey(String),

    #[error("{0:?} is reserved for quitting")]
    ReservedKey(KeyCode),
}

/// Plain key that ends the session; see [`should_quit`]
pub const QUIT_KEY: KeyCode = KeyCode::Char('q');

fn normalize(key: KeyCode) -> KeyCode {
    match key {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Collects bindings and checks them for conflicts
#[derive(Debug, Clone, Default)]
pub struct KeyMapBuilder {
    bindings: ArrayVec<(KeyCode, Command), COMMAND_COUNT>,
}

impl KeyMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `command`.
    ///
    /// Fails if the key already drives another command, the command
    /// already has a key, or the key quits the game.
    pub fn assign(mut self, command: Command, key: KeyCode) -> Result<Self, InputError> {
        let key = normalize(key);
        if key == QUIT_KEY {
            return Err(InputError::ReservedKey(key));
        }
        if let Some(&(_, existing)) = self.bindings.iter().find(|(bound, _)| *bound == key) {
            return Err(InputError::DuplicateKey {
                key,
                existing,
                requested: command,
            });
        }
        if let Some(&(bound, existing)) = self.bindings.iter().find(|(_, c)| *c == command) {
            return Err(InputError::DuplicateKey {
                key: bound,
                existing,
                requested: command,
            });
        }
        // Both checks above bound the length by the number of commands.
        self.bindings.push((key, command));
        Ok(self)
    }

    /// Finish the map; every command must have a key
    pub fn build(self) -> Result<KeyMap, InputError> {
        for command in Command::ALL {
            if !self.bindings.iter().any(|(_, c)| *c == command) {
                return Err(InputError::Unbound(command));
            }
        }
        Ok(KeyMap {
            bindings: self.bindings,
        })
    }
}

/// Complete one-to-one key map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: ArrayVec<(KeyCode, Command), COMMAND_COUNT>,
}

impl KeyMap {
    pub fn builder() -> KeyMapBuilder {
        KeyMapBuilder::new()
    }

    pub fn command_for(&self, key: KeyCode) -> Option<Command> {
        let key = normalize(key);
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, command)| *command)
    }

    /// Map a terminal key event; key releases are ignored
    pub fn command_for_event(&self, event: KeyEvent) -> Option<Command> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        self.command_for(event.code)
    }

    pub fn key_for(&self, command: Command) -> Option<KeyCode> {
        self.bindings
            .iter()
            .find(|(_, c)| *c == command)
            .map(|(key, _)| *key)
    }

    pub fn is_assigned(&self, key: KeyCode) -> bool {
        self.command_for(key).is_some()
    }

    pub fn bindings(&self) -> impl Iterator<Item = (KeyCode, Command)> + '_ {
        self.bindings.iter().copied()
    }
}

impl Default for KeyMap {
    /// Arrows to move, rotate and drop; space pauses, enter resumes
    fn default() -> Self {
        let bindings = [
            (KeyCode::Left, Command::Left),
            (KeyCode::Right, Command::Right),
            (KeyCode::Up, Command::Rotate),
            (KeyCode::Down, Command::SoftDrop),
            (KeyCode::Char(' '), Command::Pause),
            (KeyCode::Enter, Command::Resume),
        ];
        Self {
            bindings: ArrayVec::from(bindings),
        }
    }
}

/// Parse a key name as used in configuration files
pub fn parse_key(name: &str) -> Result<KeyCode, InputError> {
    let lower = name.trim().to_ascii_lowercase();
    let key = match lower.as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(InputError::UnknownKey(name.to_string())),
            }
        }
    };
    Ok(key)
}

/// Display name of a key, the inverse of [`parse_key`]
pub fn key_name(key: KeyCode) -> String {
    match key {
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Char(c) => c.to_string(),
        other => format!("{other:?}"),
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    normalize(key.code) == QUIT_KEY
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
