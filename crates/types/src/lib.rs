//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, configuration).
//!
//! # Board Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 25 rows (indexed 0-24, y grows downward)
//! - **Start position**: (width / 2, 0)
//!
//! The walls sit just outside the playfield at `x = -1` and `x = width`, the
//! floor at `y = height`.
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LINE_SCORES` | 0/40/100/300/1200 | Classic points for 0-4 lines |
//! | `LINES_PER_LEVEL` | 10 | Completed lines per level |
//! | `MAX_LEVEL` | 19 | Gravity curve is clamped here |
//! | `FRAME_RATE_HZ` | 60 | Frames per second of the gravity curve |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, Command, PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.color(), Color::Purple);
//!
//! assert_eq!(Command::from_str("softDrop"), Some(Command::SoftDrop));
//!
//! let p = Position::new(1, 2) + Position::new(3, 4);
//! assert_eq!(p, Position::new(4, 6));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 25);
//! ```

use std::fmt;
use std::ops::Add;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: i32 = 10;

/// Board height in cells (25 rows)
pub const BOARD_HEIGHT: i32 = 25;

/// Number of upcoming pieces exposed as a preview by default
pub const DEFAULT_PREVIEW_DEPTH: usize = 1;

/// Narrowest playable board: the I bar spawns at `width / 2` and reaches three cells right
pub const MIN_BOARD_WIDTH: i32 = 7;

/// Shortest playable board
pub const MIN_BOARD_HEIGHT: i32 = 4;

/// Upper limit for either board side
pub const MAX_BOARD_SIDE: i32 = 100;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines, multiplied by the current level:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Completed lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Highest level of the gravity curve; higher levels reuse its speed
pub const MAX_LEVEL: u32 = 19;

/// Frame rate the gravity curve is expressed in
pub const FRAME_RATE_HZ: f64 = 60.0;

/// Gravity in cells per frame, indexed by level (index 0 is unused, levels start at 1)
pub const GRAVITY_CELLS_PER_FRAME: [f64; MAX_LEVEL as usize + 1] = [
    0.0, 0.01667, 0.021017, 0.026977, 0.035256, 0.04693, 0.06361, 0.0879, 0.1236, 0.1775,
    0.2598, 0.388, 0.59, 0.92, 1.46, 2.36, 3.91, 6.61, 11.43, 20.0,
];

/// Combo scoring base value (50 points per combo step)
pub const COMBO_BASE: u32 = 50;

/// Back-to-back bonus numerator (3/2 = 1.5x multiplier)
pub const B2B_NUMERATOR: u32 = 3;

/// Back-to-back bonus denominator
pub const B2B_DENOMINATOR: u32 = 2;

/// Perfect clear bonus by size of the clear that emptied the board (times level)
pub const PERFECT_CLEAR_SCORES: [u32; 5] = [0, 800, 1200, 1800, 2000];

/// Modern drop intervals by level (milliseconds per row)
///
/// Index 0 = Level 1, Index 8 = Level 9
pub const DROP_INTERVALS_MS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Modern drop interval beyond the table (120ms)
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// A cell coordinate. `x` grows rightward, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({};{})", self.x, self.y)
    }
}

/// The seven piece kinds
///
/// Each kind has a fixed color hint:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Purple
/// - **L**: Orange
/// - **J**: Blue
/// - **Z**: Red
/// - **S**: Green
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    Z,
    S,
}

impl PieceKind {
    /// Every kind, in declaration order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("S"), Some(PieceKind::S));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            _ => None,
        }
    }

    /// Uppercase single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::Z => "Z",
            PieceKind::S => "S",
        }
    }

    /// Color hint, strictly determined by the kind
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Purple,
            PieceKind::L => Color::Orange,
            PieceKind::J => Color::Blue,
            PieceKind::Z => Color::Red,
            PieceKind::S => Color::Green,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color hint carried by pieces and settled blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Orange,
    Blue,
    Red,
    Green,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::Cyan,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
        Color::Blue,
        Color::Red,
        Color::Green,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Cyan => "Cyan",
            Color::Yellow => "Yellow",
            Color::Purple => "Purple",
            Color::Orange => "Orange",
            Color::Blue => "Blue",
            Color::Red => "Red",
            Color::Green => "Green",
        }
    }
}

// One color per piece kind.
const _: () = assert!(PieceKind::ALL.len() == Color::ALL.len());

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player commands delivered to the engine
///
/// Commands carry no payload. Raw key bindings map onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    Left,
    /// Move piece one cell right
    Right,
    /// Rotate piece 90°
    Rotate,
    /// Drop piece one cell down (notifies scoring)
    SoftDrop,
    /// Stop the timer
    Pause,
    /// Start the timer at the current level's interval
    Resume,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::Left,
        Command::Right,
        Command::Rotate,
        Command::SoftDrop,
        Command::Pause,
        Command::Resume,
    ];

    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("left"), Some(Command::Left));
    /// assert_eq!(Command::from_str("SoftDrop"), Some(Command::SoftDrop));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Command::Left),
            "right" => Some(Command::Right),
            "rotate" => Some(Command::Rotate),
            "softdrop" => Some(Command::SoftDrop),
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Left => "left",
            Command::Right => "right",
            Command::Rotate => "rotate",
            Command::SoftDrop => "softDrop",
            Command::Pause => "pause",
            Command::Resume => "resume",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entries of the engine's action history
///
/// Attempt markers (`Try*`, `SoftDrop`) are followed by their resolution.
/// Timer-driven steps record only the resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Reported by an empty history
    NoAction,
    TryLeft,
    TryRight,
    TryRotate,
    SoftDrop,

    Left,
    Right,
    Rotate,
    Down,

    CollisionWall,
    CollisionStack,
    CollisionFloor,

    Land,
    GameOver,
}

impl Action {
    /// True for the moves that were rejected by a collision
    pub fn is_collision(&self) -> bool {
        matches!(
            self,
            Action::CollisionWall | Action::CollisionStack | Action::CollisionFloor
        )
    }
}
