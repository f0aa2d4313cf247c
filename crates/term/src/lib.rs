//! Terminal rendering module.
//!
//! [`GameView`] turns the engine's query surface into a [`Frame`] of glyphs
//! without any I/O; [`TerminalRenderer`] flushes frames to the terminal.
//!
//! Glyphs: walls and floor `#`, settled blocks `x`, the falling piece `@`.

pub mod frame;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use frame::{Frame, Glyph};
pub use game_view::{tint_color, GameView};
pub use renderer::{changed_rows, encode_rows_into, TerminalRenderer};
