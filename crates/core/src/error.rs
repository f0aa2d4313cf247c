//! Error type shared by the core modules.

use crate::types::Position;

/// Configuration errors and invariant violations.
///
/// Rejected moves are not errors; they are recorded in the action history.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unrecognized piece kind {0:?}")]
    UnknownPieceKind(String),

    #[error("preview offset {offset} is out of range (depth {depth})")]
    PreviewOutOfRange { offset: usize, depth: usize },

    #[error("board {width}x{height} is outside the playable range")]
    InvalidBoard { width: i32, height: i32 },

    #[error("preview depth must be at least 1")]
    InvalidPreviewDepth,

    #[error("piece source is exhausted")]
    SourceExhausted,

    #[error("landed block {0} lies outside the playfield")]
    OffGridBlock(Position),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
