//! Error type shared by the board, move and setup layers.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// A coordinate outside the 8x8 board.
    #[error("invalid square: row {row}, col {col}")]
    InvalidSquare { row: i32, col: i32 },

    #[error("invalid notation: '{0}'")]
    InvalidNotation(String),

    /// The requested move is not in the current legal set.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("invalid FEN string: {0}")]
    InvalidFen(String),
}
