//! Board coordinates and rank/file conversions.
//!
//! Rows run from the far rank (row 0, black's back rank in the initial
//! layout) down to the near rank (row 7). Columns run from the a-file
//! (column 0) to the h-file (column 7).

use std::fmt;

use crate::error::ChessError;

/// Number of rows and columns on the board
pub const BOARD_SIZE: usize = 8;

static COL_MAP: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// A single square on the board, always inside the 8x8 grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: usize,
    col: usize,
}

impl Square {
    /// Creates a square from a row and column.
    ///
    /// # Arguments
    ///
    /// * `row` - The row (0-7), 0 being rank 8
    /// * `col` - The column (0-7), 0 being file a
    ///
    /// # Returns
    ///
    /// * The square, or `ChessError::InvalidSquare` when either coordinate is off the board
    pub fn new(row: i32, col: i32) -> Result<Square, ChessError> {
        if in_bounds(row, col) {
            Ok(Square { row: row as usize, col: col as usize })
        } else {
            Err(ChessError::InvalidSquare { row, col })
        }
    }

    /// Square from coordinates known to be on the board.
    pub(crate) const fn at(row: usize, col: usize) -> Square {
        assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Square { row, col }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Row-major index (0-63), a8 = 0, h1 = 63
    pub fn index(&self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Returns the square `d_row` rows and `d_col` columns away, if it is still on the board.
    pub fn offset(&self, d_row: i32, d_col: i32) -> Option<Square> {
        Square::new(self.row as i32 + d_row, self.col as i32 + d_col).ok()
    }

    /// Parses a two-character square such as "e2".
    ///
    /// # Arguments
    ///
    /// * `text` - File letter followed by rank digit
    ///
    /// # Returns
    ///
    /// * The square, or `ChessError::InvalidNotation` if the text does not name one
    pub fn from_notation(text: &str) -> Result<Square, ChessError> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidNotation(text.to_string()));
        }

        let col = match COL_MAP.iter().position(|&c| c as u8 == bytes[0]) {
            Some(col) => col,
            None => return Err(ChessError::InvalidNotation(text.to_string())),
        };

        let rank = match (bytes[1] as char).to_digit(10) {
            Some(rank) if (1..=8).contains(&rank) => rank as usize,
            _ => return Err(ChessError::InvalidNotation(text.to_string())),
        };

        Ok(Square { row: rank_to_row(rank), col })
    }

    /// Every square in row-major order (row 0 first, column 0 first within a row).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }

    /// The file letter of this square ('a'..='h')
    pub fn file_char(&self) -> char {
        COL_MAP[self.col]
    }

    /// The rank digit of this square ('1'..='8')
    pub fn rank_char(&self) -> char {
        (b'0' + row_to_rank(self.row) as u8) as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// Checks whether a signed row/column pair lies on the board.
pub fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

/// Row 0 is rank 8, row 7 is rank 1.
pub fn row_to_rank(row: usize) -> usize {
    BOARD_SIZE - row
}

pub fn rank_to_row(rank: usize) -> usize {
    BOARD_SIZE - rank
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_new_rejects_out_of_range() {
        assert_eq!(Square::new(8, 0), Err(ChessError::InvalidSquare { row: 8, col: 0 }));
        assert_eq!(Square::new(0, -1), Err(ChessError::InvalidSquare { row: 0, col: -1 }));
        assert!(Square::new(7, 7).is_ok());
        assert!(Square::new(0, 0).is_ok());
    }

    #[test]
    fn test_square_notation() {
        let e2 = Square::new(6, 4).unwrap();
        assert_eq!(e2.to_string(), "e2");
        assert_eq!(Square::new(0, 0).unwrap().to_string(), "a8");
        assert_eq!(Square::new(7, 7).unwrap().to_string(), "h1");
    }

    #[test]
    fn test_square_from_notation() {
        assert_eq!(Square::from_notation("e2").unwrap(), Square::new(6, 4).unwrap());
        assert_eq!(Square::from_notation("a8").unwrap(), Square::new(0, 0).unwrap());
        assert_eq!(Square::from_notation("h1").unwrap(), Square::new(7, 7).unwrap());
        assert!(Square::from_notation("e9").is_err());
        assert!(Square::from_notation("i1").is_err());
        assert!(Square::from_notation("e").is_err());
        assert!(Square::from_notation("e10").is_err());
    }

    #[test]
    fn test_square_offset_stops_at_edges() {
        let a8 = Square::new(0, 0).unwrap();
        assert_eq!(a8.offset(-1, 0), None);
        assert_eq!(a8.offset(0, -1), None);
        assert_eq!(a8.offset(1, 1), Some(Square::new(1, 1).unwrap()));
    }

    #[test]
    fn test_all_squares_row_major() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::new(0, 0).unwrap());
        assert_eq!(squares[1], Square::new(0, 1).unwrap());
        assert_eq!(squares[8], Square::new(1, 0).unwrap());
        assert_eq!(squares[63], Square::new(7, 7).unwrap());
    }
}
