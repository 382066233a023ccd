//! Keyboard state as forwarded by the environment
//!
//! Identifiers are stored verbatim (browser-style `KeyboardEvent.key`
//! strings). The simulation only ever reads this map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Fire,
    Restart,
}

impl Key {
    /// Identifier the environment reports for this key
    pub fn identifier(&self) -> &'static str {
        match self {
            Key::Left => "ArrowLeft",
            Key::Right => "ArrowRight",
            Key::Fire => " ",
            Key::Restart => "r",
        }
    }

    /// Match an environment identifier. Restart is case-insensitive.
    pub fn from_identifier(id: &str) -> Option<Self> {
        match id {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            " " => Some(Key::Fire),
            _ if id.eq_ignore_ascii_case("r") => Some(Key::Restart),
            _ => None,
        }
    }
}

/// Pressed state per key identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    keys: HashMap<String, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, id: &str) {
        self.keys.insert(id.to_string(), true);
    }

    pub fn key_up(&mut self, id: &str) {
        self.keys.insert(id.to_string(), false);
    }

    /// Raw lookup by identifier; unknown keys read as released
    pub fn is_pressed(&self, id: &str) -> bool {
        self.keys.get(id).copied().unwrap_or(false)
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.is_pressed(key.identifier())
    }

    /// Release everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
