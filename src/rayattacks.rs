//! Sliding-piece movement.
//!
//! A ray walks from a square one step at a time in a fixed direction until
//! it leaves the board. Rooks, bishops and queens walk their rays and stop
//! at the first occupied square.

use crate::chess_move::Move;
use crate::position::{Board, Color};
use crate::utils::Square;

/// Iterator over the squares in one direction from (but not including) a start square.
#[derive(Debug, Clone)]
pub struct Ray {
    current: Square,
    step: (i32, i32),
}

impl Ray {
    pub fn new(from: Square, step: (i32, i32)) -> Self {
        Ray { current: from, step }
    }
}

impl Iterator for Ray {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let next = self.current.offset(self.step.0, self.step.1)?;
        self.current = next;
        Some(next)
    }
}

/// Appends the sliding moves of a `color` piece on `from` along each direction.
///
/// Each direction yields a quiet move per empty square, then stops at the
/// first occupied square: one capturing move if it holds an enemy piece,
/// nothing if it holds a friendly one.
///
/// # Arguments
///
/// * `board` - The board to walk
/// * `from` - The sliding piece's square
/// * `color` - The sliding piece's color
/// * `directions` - (row, column) steps to follow
/// * `moves` - Output list
pub fn slide(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i32, i32)],
    moves: &mut Vec<Move>,
) {
    for &step in directions {
        for to in Ray::new(from, step) {
            match board.get(to) {
                None => moves.push(Move::new(from, to, board)),
                Some(piece) => {
                    if piece.color != color {
                        moves.push(Move::new(from, to, board));
                    }
                    break;
                }
            }
        }
    }
}
