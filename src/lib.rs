//! Chess position tracker and legal-move generator.
//!
//! This crate keeps a single chess position, enumerates the moves that are
//! legal for the side to move (a move is legal only if it does not leave the
//! mover's king in check), applies moves and takes them back. Castling, en
//! passant and promotion are not part of the rules implemented here.
//!
//! The presentation shells (`ui`, `gui`) talk to the engine only through
//! [`Game`].

pub mod chess_move;
pub mod error;
pub mod gui;
pub mod movegen_tables;
pub mod movegeneration;
pub mod pawnattacks;
pub mod perft;
pub mod position;
pub mod rayattacks;
pub mod ui;
pub mod utils;

pub use chess_move::Move;
pub use error::ChessError;
pub use position::{Board, Color, GameStatus, Piece, PieceType, Position};
pub use utils::Square;

use tracing::{debug, info};

/// The game as seen by a presentation shell.
///
/// Holds the current position and the legal moves for the side to move.
/// The move list is recomputed once after every state change, so shells can
/// query it as often as they like.
#[derive(Debug, Clone)]
pub struct Game {
    /// The current position of the game
    position: Position,
    /// Legal moves for the side to move in `position`
    legal_moves: Vec<Move>,
}

impl Game {
    /// Creates a new game in the standard starting position.
    pub fn new() -> Game {
        info!("starting new game");
        Game::from_position(Position::new())
    }

    /// Creates a new game from a FEN string.
    ///
    /// # Arguments
    ///
    /// * `fen` - Board placement and side to move, see `Position::from_fen`
    ///
    /// # Returns
    ///
    /// * A new `Game`, or the FEN error
    pub fn from_fen(fen: &str) -> Result<Game, ChessError> {
        let position = Position::from_fen(fen)?;
        info!("starting game from '{}'", fen);
        Ok(Game::from_position(position))
    }

    fn from_position(position: Position) -> Game {
        let mut game = Game { position, legal_moves: Vec::new() };
        game.refresh();
        game
    }

    fn refresh(&mut self) {
        self.legal_moves = self.position.legal_moves();
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Read-only board for rendering.
    pub fn board(&self) -> &Board {
        self.position.board()
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    pub fn history(&self) -> &[Move] {
        self.position.history()
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.position.in_check(color)
    }

    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    /// True once the side to move has no legal moves.
    pub fn is_over(&self) -> bool {
        self.legal_moves.is_empty()
    }

    /// Destinations of the legal moves starting on `from`.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        self.legal_moves
            .iter()
            .filter(|mv| mv.from() == from)
            .map(|mv| mv.to())
            .collect()
    }

    /// Plays the move between two squares if it is legal.
    ///
    /// # Arguments
    ///
    /// * `from` - Origin square
    /// * `to` - Destination square
    ///
    /// # Returns
    ///
    /// * The move played, or `ChessError::IllegalMove` with the game unchanged
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<Move, ChessError> {
        let requested = Move::new(from, to, self.position.board());

        let found = match self.legal_moves.iter().find(|mv| **mv == requested) {
            Some(mv) => *mv,
            None => {
                debug!("rejected {} for {}", requested, self.side_to_move());
                return Err(ChessError::IllegalMove(requested.notation()));
            }
        };

        self.position.apply(found);
        info!("{} played", found);
        self.refresh();
        Ok(found)
    }

    /// Plays a move given as coordinate text, e.g. "e2e4".
    pub fn try_move_notation(&mut self, text: &str) -> Result<Move, ChessError> {
        let requested = Move::from_notation(text, self.position.board())?;
        self.try_move(requested.from(), requested.to())
    }

    /// Takes back the last move. Returns `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Move> {
        let undone = self.position.revert()?;
        info!("{} taken back", undone);
        self.refresh();
        Some(undone)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        Square::from_notation(text).unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.legal_moves().len(), 20);
        assert_eq!(game.side_to_move(), Color::White);
        assert!(!game.is_over());
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_try_move_and_undo() {
        let mut game = Game::new();
        let played = game.try_move(sq("e2"), sq("e4")).unwrap();
        assert_eq!(played.notation(), "e2e4");
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.legal_moves().len(), 20);
        assert_eq!(game.board().get(sq("e4")), Some(Piece::new(Color::White, PieceType::Pawn)));

        assert_eq!(game.undo(), Some(played));
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.board(), &Board::initial());
        assert_eq!(game.undo(), None);
        assert_eq!(game.legal_moves().len(), 20);
    }

    #[test]
    fn test_illegal_move_leaves_game_unchanged() {
        let mut game = Game::new();
        assert_eq!(
            game.try_move(sq("e2"), sq("e5")),
            Err(ChessError::IllegalMove("e2e5".to_string()))
        );
        // Black cannot move out of turn
        assert!(game.try_move(sq("e7"), sq("e5")).is_err());
        // Empty origin
        assert!(game.try_move(sq("e4"), sq("e5")).is_err());
        assert_eq!(game.board(), &Board::initial());
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn test_try_move_notation() {
        let mut game = Game::new();
        assert!(game.try_move_notation("g1f3").is_ok());
        assert_eq!(
            game.try_move_notation("e7"),
            Err(ChessError::InvalidNotation("e7".to_string()))
        );
        assert!(matches!(game.try_move_notation("e7e9"), Err(ChessError::InvalidNotation(_))));
        assert!(game.try_move_notation("e7e5").is_ok());
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_legal_destinations() {
        let game = Game::new();
        let mut knight = game.legal_destinations(sq("b1"));
        knight.sort();
        assert_eq!(knight, vec![sq("a3"), sq("c3")]);
        assert!(game.legal_destinations(sq("e4")).is_empty());
    }

    #[test]
    fn test_game_ends_in_checkmate() {
        let mut game = Game::new();
        for text in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"] {
            game.try_move_notation(text).unwrap();
        }
        assert!(game.is_over());
        assert!(game.is_checkmate());
        assert!(game.in_check(Color::Black));
        assert!(!game.is_stalemate());

        game.undo();
        assert!(!game.is_over());
        assert!(!game.is_checkmate());
    }

    #[test]
    fn test_from_fen_stalemate() {
        let game = Game::from_fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(game.is_over());
        assert!(game.is_stalemate());
        assert!(Game::from_fen("not a fen").is_err());
    }
}
