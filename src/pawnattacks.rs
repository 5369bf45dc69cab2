//! Pawn geometry.
//!
//! White pawns advance toward row 0 and start on row 6; black pawns advance
//! toward row 7 and start on row 1. These helpers only answer where a pawn
//! could go on an empty board; occupancy rules are applied by the generator.

use crate::position::Color;
use crate::utils::Square;

/// Row delta of one pawn step for `color`
pub fn forward_direction(color: Color) -> i32 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// The row every pawn of `color` starts on
pub fn home_row(color: Color) -> usize {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// The square directly in front of the pawn, if any.
pub fn single_push(from: Square, color: Color) -> Option<Square> {
    from.offset(forward_direction(color), 0)
}

/// The square two steps ahead, only for a pawn still on its home row.
pub fn double_push(from: Square, color: Color) -> Option<Square> {
    if from.row() != home_row(color) {
        return None;
    }
    from.offset(2 * forward_direction(color), 0)
}

/// The (at most two) forward diagonal squares a pawn captures on.
///
/// # Arguments
///
/// * `from` - The pawn's square
/// * `color` - The pawn's color
///
/// # Returns
///
/// * Left diagonal first, then right, skipping squares off the board
pub fn diagonal_targets(from: Square, color: Color) -> impl Iterator<Item = Square> {
    let d_row = forward_direction(color);
    [-1, 1].into_iter().filter_map(move |d_col| from.offset(d_row, d_col))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_home_row_white_pawn() {
        let e2 = sq(6, 4);
        assert_eq!(single_push(e2, Color::White), Some(sq(5, 4)));
        assert_eq!(double_push(e2, Color::White), Some(sq(4, 4)));
    }

    #[test]
    fn test_home_row_black_pawn() {
        let e7 = sq(1, 4);
        assert_eq!(single_push(e7, Color::Black), Some(sq(2, 4)));
        assert_eq!(double_push(e7, Color::Black), Some(sq(3, 4)));
    }

    #[test]
    fn test_no_double_push_off_home_row() {
        assert_eq!(double_push(sq(5, 4), Color::White), None);
        assert_eq!(double_push(sq(2, 4), Color::Black), None);
        // A white pawn on black's home row is not on its own home row
        assert_eq!(double_push(sq(1, 4), Color::White), None);
    }

    #[test]
    fn test_last_row_has_no_push() {
        assert_eq!(single_push(sq(0, 3), Color::White), None);
        assert_eq!(single_push(sq(7, 3), Color::Black), None);
    }

    #[test]
    fn test_diagonals() {
        let white: Vec<Square> = diagonal_targets(sq(6, 4), Color::White).collect();
        assert_eq!(white, vec![sq(5, 3), sq(5, 5)]);

        let black: Vec<Square> = diagonal_targets(sq(1, 4), Color::Black).collect();
        assert_eq!(black, vec![sq(2, 3), sq(2, 5)]);
    }

    #[test]
    fn test_diagonal_edges() {
        let a_file: Vec<Square> = diagonal_targets(sq(6, 0), Color::White).collect();
        assert_eq!(a_file, vec![sq(5, 1)]);

        let h_file: Vec<Square> = diagonal_targets(sq(1, 7), Color::Black).collect();
        assert_eq!(h_file, vec![sq(2, 6)]);
    }
}
