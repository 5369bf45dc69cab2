use bitflags::bitflags;
use std::fmt;
use tracing::{debug, trace};

use crate::chess_move::Move;
use crate::error::ChessError;
use crate::movegeneration::generate_pseudo_legal_moves;
use crate::utils::{Square, BOARD_SIZE};

/// Standard initial layout in FEN form
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, PartialEq, Copy, Clone, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// A piece stamp. Two pieces with the same color and type are interchangeable.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Piece {
    pub color: Color,
    pub piece_type: PieceType,
}

impl Piece {
    pub fn new(color: Color, piece_type: PieceType) -> Self {
        Piece { color, piece_type }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub fn to_char(&self) -> char {
        let ch = match self.piece_type {
            PieceType::Pawn => 'p',
            PieceType::Rook => 'r',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };

        match self.color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    pub fn from_char(ch: char) -> Option<Piece> {
        let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
        let piece_type = match ch.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'r' => PieceType::Rook,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        Some(Piece { color, piece_type })
    }
}

/// The 8x8 grid. `None` marks an empty square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Board { squares: [[None; BOARD_SIZE]; BOARD_SIZE] }
    }

    /// Standard initial layout: black on rows 0-1, white on rows 6-7.
    pub fn initial() -> Self {
        use PieceType::*;
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Board::empty();
        for (col, &piece_type) in back_rank.iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(Color::Black, piece_type));
            board.squares[1][col] = Some(Piece::new(Color::Black, Pawn));
            board.squares[6][col] = Some(Piece::new(Color::White, Pawn));
            board.squares[7][col] = Some(Piece::new(Color::White, piece_type));
        }
        board
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.row()][square.col()]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row()][square.col()] = piece;
    }

    /// Row-major view of the grid, row 0 first.
    pub fn rows(&self) -> &[[Option<Piece>; BOARD_SIZE]; BOARD_SIZE] {
        &self.squares
    }
}

bitflags! {
    /// Terminal-state bits written by `Position::legal_moves`.
    pub struct GameStatus: u8 {
        const CHECK = 1 << 0;
        const CHECKMATE = 1 << 1;
        const STALEMATE = 1 << 2;
    }
}

/// A board position plus everything needed to step forward and back through a game.
///
/// The position is mutated in place: `apply` pushes a move onto the history
/// and `revert` pops it, restoring the exact prior state. Terminal flags are
/// only meaningful right after `legal_moves` has run; `apply` and `revert`
/// clear them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Piece placement
    board: Board,
    /// The color to move next
    side_to_move: Color,
    /// Where the white king stands
    white_king: Square,
    /// Where the black king stands
    black_king: Square,
    /// Applied moves, oldest first
    history: Vec<Move>,
    /// Check / checkmate / stalemate bits from the last legal-move pass
    status: GameStatus,
}

impl Position {
    /// The standard initial position with white to move.
    pub fn new() -> Position {
        let board = Board::initial();
        Position {
            white_king: Square::at(7, 4),
            black_king: Square::at(0, 4),
            board,
            side_to_move: Color::White,
            history: Vec::new(),
            status: GameStatus::empty(),
        }
    }

    /// Reads a position from FEN text.
    ///
    /// Only the placement and side-to-move fields are used; castling, en
    /// passant and clock fields are accepted and ignored.
    ///
    /// # Arguments
    ///
    /// * `fen` - FEN text with at least the placement and side fields
    ///
    /// # Returns
    ///
    /// * The position with empty history, or `ChessError::InvalidFen`
    pub fn from_fen(fen: &str) -> Result<Position, ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(ChessError::InvalidFen(format!(
                "expected at least 2 fields, got {}",
                parts.len()
            )));
        }

        let rows: Vec<&str> = parts[0].split('/').collect();
        if rows.len() != BOARD_SIZE {
            return Err(ChessError::InvalidFen(format!("expected 8 ranks, got {}", rows.len())));
        }

        let mut board = Board::empty();
        for (row, text) in rows.iter().enumerate() {
            parse_row(text, row, &mut board)?;
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(ChessError::InvalidFen(format!("invalid active color '{}'", other)));
            }
        };

        let white_king = single_king(&board, Color::White)?;
        let black_king = single_king(&board, Color::Black)?;

        Ok(Position {
            board,
            side_to_move,
            white_king,
            black_king,
            history: Vec::new(),
            status: GameStatus::empty(),
        })
    }

    /// Writes the placement and side fields, followed by "- - 0 1".
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for (row, squares) in self.board.rows().iter().enumerate() {
            let mut empty = 0;
            for square in squares.iter() {
                match square {
                    None => empty += 1,
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_char());
                    }
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row + 1 < BOARD_SIZE {
                fen.push('/');
            }
        }

        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        format!("{} {} - - 0 1", fen, side)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }

    pub fn king_square(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_checkmate(&self) -> bool {
        self.status.contains(GameStatus::CHECKMATE)
    }

    pub fn is_stalemate(&self) -> bool {
        self.status.contains(GameStatus::STALEMATE)
    }

    /// Moves that follow piece geometry and occupancy for the side to move,
    /// ignoring king safety. Row-major by origin square.
    pub fn pseudo_legal_moves(&self) -> Vec<Move> {
        generate_pseudo_legal_moves(&self.board, self.side_to_move)
    }

    /// Whether any pseudo-legal move of `by_color` lands on `square`.
    ///
    /// Pawn pushes only ever land on empty squares, so for an occupied
    /// square (a king) this is exactly "attacked by `by_color`".
    pub fn is_square_attacked(&self, square: Square, by_color: Color) -> bool {
        generate_pseudo_legal_moves(&self.board, by_color)
            .iter()
            .any(|mv| mv.to() == square)
    }

    /// Whether `color`'s king stands on a square its opponent attacks.
    pub fn in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opposite())
    }

    /// Computes the legal moves for the side to move and refreshes the terminal flags.
    ///
    /// Every pseudo-legal candidate is applied, the mover's king is tested
    /// for check, and the move is reverted. Candidates that leave the king
    /// in check are dropped; the survivors keep generation order.
    ///
    /// # Returns
    ///
    /// * The legal moves; empty on checkmate or stalemate
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let mover = self.side_to_move;
        let mut moves = self.pseudo_legal_moves();

        for i in (0..moves.len()).rev() {
            self.apply(moves[i]);
            if self.in_check(mover) {
                moves.remove(i);
            }
            self.revert();
        }

        let in_check = self.in_check(mover);
        self.status = GameStatus::empty();
        if in_check {
            self.status |= GameStatus::CHECK;
        }
        if moves.is_empty() {
            if in_check {
                self.status |= GameStatus::CHECKMATE;
                debug!("{} is checkmated", mover);
            } else {
                self.status |= GameStatus::STALEMATE;
                debug!("{} is stalemated", mover);
            }
        }

        moves
    }

    /// Plays `mv` without checking legality and passes the turn.
    ///
    /// The destination receives the moving piece recorded in `mv`; the
    /// origin is emptied.
    pub fn apply(&mut self, mv: Move) {
        trace!("apply {}", mv);
        self.board.set(mv.from(), None);
        self.board.set(mv.to(), mv.piece_moved());

        if mv.is_king_move() {
            self.move_king(mv, mv.to());
        }

        self.history.push(mv);
        self.side_to_move = self.side_to_move.opposite();
        self.status = GameStatus::empty();
    }

    /// Plays `mv` only if it is in a freshly computed legal set.
    ///
    /// The stored move is the generated one, so the recorded pieces always
    /// match the board even when `mv` was built elsewhere.
    pub fn apply_checked(&mut self, mv: Move) -> Result<Move, ChessError> {
        let legal = self.legal_moves();
        match legal.into_iter().find(|candidate| *candidate == mv) {
            Some(found) => {
                self.apply(found);
                Ok(found)
            }
            None => {
                debug!("rejected {} for {}", mv, self.side_to_move);
                Err(ChessError::IllegalMove(mv.notation()))
            }
        }
    }

    /// Takes back the most recent move. Does nothing when the history is empty.
    ///
    /// # Returns
    ///
    /// * The move that was undone, if any
    pub fn revert(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        trace!("revert {}", mv);

        self.board.set(mv.from(), mv.piece_moved());
        self.board.set(mv.to(), mv.piece_captured());

        if mv.is_king_move() {
            self.move_king(mv, mv.from());
        }

        self.side_to_move = self.side_to_move.opposite();
        self.status = GameStatus::empty();
        Some(mv)
    }

    fn move_king(&mut self, mv: Move, square: Square) {
        match mv.piece_moved().map(|piece| piece.color) {
            Some(Color::White) => self.white_king = square,
            Some(Color::Black) => self.black_king = square,
            None => {}
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for squares in self.board.rows().iter() {
            let line: Vec<String> = squares
                .iter()
                .map(|square| match square {
                    Some(piece) => piece.to_char().to_string(),
                    None => ".".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Fills one board row from a FEN rank.
fn parse_row(text: &str, row: usize, board: &mut Board) -> Result<(), ChessError> {
    let mut col = 0usize;

    for ch in text.chars() {
        if let Some(skip) = ch.to_digit(10) {
            if skip == 0 || skip as usize > BOARD_SIZE {
                return Err(ChessError::InvalidFen(format!(
                    "invalid empty count '{}' in rank '{}'",
                    ch, text
                )));
            }
            col += skip as usize;
        } else {
            let piece = Piece::from_char(ch).ok_or_else(|| {
                ChessError::InvalidFen(format!("invalid piece '{}' in rank '{}'", ch, text))
            })?;
            if col >= BOARD_SIZE {
                return Err(ChessError::InvalidFen(format!("rank '{}' is too long", text)));
            }
            let square = Square::new(row as i32, col as i32)?;
            board.set(square, Some(piece));
            col += 1;
        }

        if col > BOARD_SIZE {
            return Err(ChessError::InvalidFen(format!("rank '{}' is too long", text)));
        }
    }

    if col != BOARD_SIZE {
        return Err(ChessError::InvalidFen(format!("rank '{}' has {} squares", text, col)));
    }
    Ok(())
}

/// The square of `color`'s only king, or an error if there is not exactly one.
fn single_king(board: &Board, color: Color) -> Result<Square, ChessError> {
    let king = Piece::new(color, PieceType::King);
    let mut found = Square::all().filter(|&square| board.get(square) == Some(king));

    match (found.next(), found.next()) {
        (Some(square), None) => Ok(square),
        (None, _) => Err(ChessError::InvalidFen(format!("no {} king", color))),
        (Some(_), Some(_)) => Err(ChessError::InvalidFen(format!("more than one {} king", color))),
    }
}
