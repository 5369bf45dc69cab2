//! A single piece relocation and its coordinate notation.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::ChessError;
use crate::position::{Board, Piece, PieceType};
use crate::utils::Square;

/// Describes one move: where a piece came from, where it went, what moved
/// and what (if anything) stood on the destination.
///
/// Two moves compare equal when their origin and destination match; the
/// recorded pieces are not part of the identity. Legal-move membership
/// checks rely on this, since a shell builds its candidate from two clicked
/// squares and compares it against the generated set.
#[derive(Debug, Copy, Clone)]
pub struct Move {
    from: Square,
    to: Square,
    piece_moved: Option<Piece>,
    piece_captured: Option<Piece>,
}

impl Move {
    /// Creates a move by reading the board at both squares.
    ///
    /// No legality or occupancy check is made: a move from an empty square
    /// is a valid descriptor whose `piece_moved` is `None`.
    ///
    /// # Arguments
    ///
    /// * `from` - Origin square
    /// * `to` - Destination square
    /// * `board` - Board the move is described against; it is not modified
    pub fn new(from: Square, to: Square, board: &Board) -> Move {
        Move {
            from,
            to,
            piece_moved: board.get(from),
            piece_captured: board.get(to),
        }
    }

    /// Creates a move from raw row/column pairs, rejecting coordinates off the board.
    pub fn from_coords(
        from_row: i32,
        from_col: i32,
        to_row: i32,
        to_col: i32,
        board: &Board,
    ) -> Result<Move, ChessError> {
        let from = Square::new(from_row, from_col)?;
        let to = Square::new(to_row, to_col)?;
        Ok(Move::new(from, to, board))
    }

    /// Parses coordinate text such as "e2e4" against `board`.
    pub fn from_notation(text: &str, board: &Board) -> Result<Move, ChessError> {
        let text = text.trim();
        if text.len() != 4 || !text.is_ascii() {
            return Err(ChessError::InvalidNotation(text.to_string()));
        }
        let from = Square::from_notation(&text[..2])?;
        let to = Square::from_notation(&text[2..])?;
        Ok(Move::new(from, to, board))
    }

    pub fn from(&self) -> Square {
        self.from
    }

    pub fn to(&self) -> Square {
        self.to
    }

    pub fn piece_moved(&self) -> Option<Piece> {
        self.piece_moved
    }

    pub fn piece_captured(&self) -> Option<Piece> {
        self.piece_captured
    }

    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    pub fn is_king_move(&self) -> bool {
        matches!(self.piece_moved, Some(Piece { piece_type: PieceType::King, .. }))
    }

    /// Four-character coordinate notation, origin then destination ("e2e4").
    pub fn notation(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}
