//! Pieces module - piece shapes, rotation and movement
//!
//! A piece is an anchor position plus four block offsets relative to the
//! piece's own origin. Rotation turns the offsets 90° in place; there are no
//! wall kicks, so callers check the rotated piece for collisions themselves.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::types::{Color, PieceKind, Position};

/// Block offsets of a piece, relative to its anchor
pub type PieceShape = [Position; 4];

const fn shape(cells: [(i32, i32); 4]) -> PieceShape {
    [
        Position::new(cells[0].0, cells[0].1),
        Position::new(cells[1].0, cells[1].1),
        Position::new(cells[2].0, cells[2].1),
        Position::new(cells[3].0, cells[3].1),
    ]
}

/// Initial offsets for a piece kind
pub fn initial_shape(kind: PieceKind) -> PieceShape {
    match kind {
        // horizontal bar extending right of the anchor
        PieceKind::I => shape([(0, 0), (1, 0), (2, 0), (3, 0)]),
        PieceKind::O => shape([(0, 0), (1, 0), (0, 1), (1, 1)]),
        // nub points up
        PieceKind::T => shape([(-1, 0), (0, 0), (1, 0), (0, -1)]),
        PieceKind::L => shape([(0, 0), (0, 1), (0, 2), (1, 2)]),
        PieceKind::J => shape([(0, 0), (0, 1), (0, 2), (-1, 2)]),
        PieceKind::Z => shape([(-1, 0), (0, 0), (0, 1), (1, 1)]),
        PieceKind::S => shape([(-1, 1), (0, 1), (0, 0), (1, 0)]),
    }
}

/// A falling piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    position: Position,
    blocks: PieceShape,
}

impl Piece {
    /// Create a piece of the given kind anchored at (0, 0)
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            position: Position::default(),
            blocks: initial_shape(kind),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Anchor position
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Block offsets relative to the anchor
    pub fn blocks(&self) -> &PieceShape {
        &self.blocks
    }

    /// Block positions on the board (anchor + each offset)
    pub fn absolute_blocks(&self) -> PieceShape {
        self.blocks.map(|offset| self.position + offset)
    }

    /// Rotate the offsets 90° in place: (x, y) -> (-y, x)
    pub fn rotate(&mut self) {
        for block in &mut self.blocks {
            *block = Position::new(-block.y, block.x);
        }
    }

    pub fn move_left(&mut self) {
        self.position.x -= 1;
    }

    pub fn move_right(&mut self) {
        self.position.x += 1;
    }

    pub fn move_down(&mut self) {
        self.position.y += 1;
    }
}

impl From<PieceKind> for Piece {
    fn from(kind: PieceKind) -> Self {
        Piece::new(kind)
    }
}

impl FromStr for Piece {
    type Err = Error;

    /// Parse a single-letter kind name ("I", "O", "T", "L", "J", "Z", "S")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceKind::from_str(s)
            .map(Piece::new)
            .ok_or_else(|| Error::UnknownPieceKind(s.to_string()))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} [", self.kind, self.position)?;
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{block}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_piece_anchored_at_origin() {
        let piece = Piece::new(PieceKind::T);
        assert_eq!(piece.position(), Position::new(0, 0));
        assert_eq!(piece.blocks().len(), 4);
    }

    #[test]
    fn test_parse_piece_from_name() {
        let piece: Piece = "L".parse().unwrap();
        assert_eq!(piece.kind(), PieceKind::L);

        let err = "X".parse::<Piece>().unwrap_err();
        assert_eq!(err, Error::UnknownPieceKind("X".to_string()));
    }

    #[test]
    fn test_i_rotation_sequence() {
        let mut piece = Piece::new(PieceKind::I);

        piece.rotate();
        assert_eq!(
            piece.blocks(),
            &[
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(0, 3)
            ]
        );

        piece.rotate();
        assert_eq!(piece.blocks()[1], Position::new(-1, 0));

        piece.rotate();
        assert_eq!(piece.blocks()[1], Position::new(0, -1));

        piece.rotate();
        assert_eq!(piece.blocks()[1], Position::new(1, 0));
    }

    #[test]
    fn test_four_rotations_restore_every_shape() {
        for kind in PieceKind::ALL {
            let mut piece = Piece::new(kind);
            for _ in 0..4 {
                piece.rotate();
            }
            assert_eq!(piece.blocks(), &initial_shape(kind), "{kind}");
        }
    }

    #[test]
    fn test_moves_translate_anchor_only() {
        let mut piece = Piece::new(PieceKind::I);
        let start = piece.position();
        let offsets = *piece.blocks();

        piece.move_down();
        assert_eq!(piece.position(), Position::new(start.x, start.y + 1));

        piece.move_left();
        assert_eq!(piece.position(), Position::new(start.x - 1, start.y + 1));

        piece.move_right();
        assert_eq!(piece.position(), Position::new(start.x, start.y + 1));
        assert_eq!(piece.blocks(), &offsets);
    }

    #[test]
    fn test_absolute_blocks_add_anchor() {
        let mut piece = Piece::new(PieceKind::O);
        piece.set_position(Position::new(5, 3));
        assert_eq!(
            piece.absolute_blocks(),
            [
                Position::new(5, 3),
                Position::new(6, 3),
                Position::new(5, 4),
                Position::new(6, 4)
            ]
        );
    }

    #[test]
    fn test_display() {
        let piece = Piece::new(PieceKind::O);
        assert_eq!(piece.to_string(), "O@(0;0) [(0;0) (1;0) (0;1) (1;1)]");
    }
}
