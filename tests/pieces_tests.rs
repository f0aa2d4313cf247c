//! Piece geometry tests through the facade crate

use blockfall::core::piece::initial_shape;
use blockfall::core::{collision::collides, Error, Piece};
use blockfall::types::{Color, PieceKind, Position};

fn offsets(piece: &Piece) -> Vec<(i32, i32)> {
    piece.blocks().iter().map(|p| (p.x, p.y)).collect()
}

#[test]
fn test_initial_offsets() {
    let expected = [
        (PieceKind::I, [(0, 0), (1, 0), (2, 0), (3, 0)]),
        (PieceKind::O, [(0, 0), (1, 0), (0, 1), (1, 1)]),
        (PieceKind::T, [(-1, 0), (0, 0), (1, 0), (0, -1)]),
        (PieceKind::L, [(0, 0), (0, 1), (0, 2), (1, 2)]),
        (PieceKind::J, [(0, 0), (0, 1), (0, 2), (-1, 2)]),
        (PieceKind::Z, [(-1, 0), (0, 0), (0, 1), (1, 1)]),
        (PieceKind::S, [(-1, 1), (0, 1), (0, 0), (1, 0)]),
    ];
    for (kind, cells) in expected {
        assert_eq!(offsets(&Piece::new(kind)), cells.to_vec(), "{kind}");
    }
}

#[test]
fn test_colors_follow_kinds() {
    let colors: Vec<Color> = PieceKind::ALL.iter().map(|k| Piece::new(*k).color()).collect();
    assert_eq!(colors, Color::ALL.to_vec());
}

#[test]
fn test_t_rotation_cycle() {
    let mut piece = Piece::new(PieceKind::T);

    piece.rotate();
    assert_eq!(offsets(&piece), vec![(0, -1), (0, 0), (0, 1), (1, 0)]);

    piece.rotate();
    assert_eq!(offsets(&piece), vec![(1, 0), (0, 0), (-1, 0), (0, 1)]);

    piece.rotate();
    piece.rotate();
    assert_eq!(piece.blocks(), &initial_shape(PieceKind::T));
}

#[test]
fn test_o_rotation_turns_around_anchor() {
    // no special case for O: it pivots on its anchor cell
    let mut piece = Piece::new(PieceKind::O);
    piece.rotate();
    assert_eq!(offsets(&piece), vec![(0, 0), (0, 1), (-1, 0), (-1, 1)]);
}

#[test]
fn test_rotation_keeps_anchor() {
    let mut piece = Piece::new(PieceKind::L);
    piece.set_position(Position::new(4, 7));
    piece.rotate();
    assert_eq!(piece.position(), Position::new(4, 7));
    assert!(piece.absolute_blocks().contains(&Position::new(4, 7)));
}

#[test]
fn test_parse_names() {
    for kind in PieceKind::ALL {
        let parsed: Piece = kind.as_str().parse().unwrap();
        assert_eq!(parsed.kind(), kind);
        let lower: Piece = kind.as_str().to_lowercase().parse().unwrap();
        assert_eq!(lower.kind(), kind);
    }
    assert_eq!(
        "Q".parse::<Piece>().unwrap_err(),
        Error::UnknownPieceKind("Q".to_string())
    );
}

#[test]
fn test_pieces_collide_when_sharing_a_cell() {
    let mut a = Piece::new(PieceKind::I);
    a.set_position(Position::new(0, 5));
    let mut b = Piece::new(PieceKind::L);
    b.set_position(Position::new(3, 3));

    // L covers (3,3) (3,4) (3,5) (4,5); I covers (0..=3, 5)
    assert!(collides(&a.absolute_blocks(), &b.absolute_blocks()));

    b.move_right();
    assert!(!collides(&a.absolute_blocks(), &b.absolute_blocks()));
    assert!(!collides(&a.absolute_blocks(), &[]));
}
