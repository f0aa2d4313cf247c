//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key codes to [`crate::types::Command`]s through a
//! configurable one-to-one [`KeyMap`], and recognizes the quit keys.

pub mod map;

pub use blockfall_types as types;

pub use map::{
    key_name, parse_key, should_quit, InputError, KeyMap, KeyMapBuilder, QUIT_KEY,
};
