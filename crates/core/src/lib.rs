//! Core game logic - pure, deterministic, and testable
//!
//! Everything here is free of terminal and clock I/O apart from the
//! [`PollingTimer`]. The engine talks to its collaborators through three
//! traits so the frontend can choose them:
//!
//! - [`Timer`]: started and stopped by the engine; ticks are delivered back as
//!   [`Event::Tick`]
//! - [`Scoring`]: notified about spawns, cleared lines, perfect clears and soft
//!   drops; decides level and gravity
//! - [`PieceSource`]: produces the pieces, wrapped in a fixed-depth
//!   [`PieceSupply`] for previews
//!
//! # Module Structure
//!
//! - [`piece`]: the seven piece shapes, rotation and movement
//! - [`collision`]: overlap test between position sets
//! - [`supply`]: seeded generator, replay source and the lookahead queue
//! - [`scoring`]: classic and modern scoring rules
//! - [`timer`]: the timer protocol
//! - [`game`]: the engine itself
//!
//! # Example
//!
//! ```
//! use blockfall_core::types::{Action, Command};
//! use blockfall_core::{BoardConfig, ClassicScoring, Event, Game, PieceGenerator, PollingTimer};
//!
//! let mut game = Game::new(
//!     BoardConfig::default(),
//!     PollingTimer::new(),
//!     ClassicScoring::new(),
//!     PieceGenerator::new(12345),
//! )?;
//!
//! game.handle(Event::Command(Command::Resume))?;
//! game.handle(Event::Tick)?;
//! assert_eq!(game.last_action(), Action::Down);
//! # Ok::<(), blockfall_core::Error>(())
//! ```

pub mod collision;
pub mod error;
pub mod game;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod supply;
pub mod testing;
pub mod timer;

pub use blockfall_types as types;

pub use error::{Error, Result};
pub use game::{Block, BoardConfig, Event, Game};
pub use piece::{Piece, PieceShape};
pub use rng::SimpleRng;
pub use scoring::{ClassicScoring, ModernScoring, Scoring, ScoringRule};
pub use supply::{PieceGenerator, PieceSource, PieceSupply, ReplaySource};
pub use timer::{PollingTimer, Timer};
