//! Collision detection between position sets.
//!
//! Board-scale inputs are small (a 4-cell piece against walls, floor or
//! settled blocks), so the quadratic scan is fine.

use crate::types::Position;

/// True iff any position appears in both collections.
pub fn collides(a: &[Position], b: &[Position]) -> bool {
    a.iter().any(|pos| b.contains(pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_disjoint_sets_do_not_collide() {
        let a = [p(0, 0), p(1, 0), p(2, 0)];
        let not_a = [p(1, 1), p(0, 1), p(0, 2)];

        assert!(!collides(&a, &not_a));
        assert!(!collides(&not_a, &a));
    }

    #[test]
    fn test_single_shared_position_collides() {
        let a = [p(0, 0), p(1, 0), p(2, 0)];
        let intersect_a = [p(-1, 0), p(1, 0), p(-2, 0)];

        assert!(collides(&intersect_a, &a));
        assert!(collides(&a, &intersect_a));
    }

    #[test]
    fn test_empty_side_never_collides() {
        assert!(!collides(&[], &[p(0, 0)]));
        assert!(!collides(&[p(0, 0)], &[]));
    }
}
