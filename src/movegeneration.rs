//! Pseudo-legal move generation.
//!
//! Moves here respect piece geometry and square occupancy but not king
//! safety; `Position::legal_moves` filters them. No castling, en passant or
//! promotion is generated.

use crate::chess_move::Move;
use crate::movegen_tables::{tables, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use crate::pawnattacks::{diagonal_targets, double_push, single_push};
use crate::position::{Board, Color, PieceType};
use crate::rayattacks::slide;
use crate::utils::Square;

/// Generates every pseudo-legal move for `color`.
///
/// Squares are visited row-major (row 0 to 7, column 0 to 7), so the moves
/// of a piece nearer the top-left of the board always come first.
///
/// # Arguments
///
/// * `board` - The board to generate on
/// * `color` - The side whose pieces move
///
/// # Returns
///
/// * All pseudo-legal moves, grouped by origin square
pub fn generate_pseudo_legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();

    for square in Square::all() {
        let piece = match board.get(square) {
            Some(piece) if piece.color == color => piece,
            _ => continue,
        };

        match piece.piece_type {
            PieceType::Pawn => generate_pawn_moves(board, square, color, &mut moves),
            PieceType::Knight => generate_knight_moves(board, square, color, &mut moves),
            PieceType::Bishop => generate_bishop_moves(board, square, color, &mut moves),
            PieceType::Rook => generate_rook_moves(board, square, color, &mut moves),
            PieceType::Queen => generate_queen_moves(board, square, color, &mut moves),
            PieceType::King => generate_king_moves(board, square, color, &mut moves),
        }
    }

    moves
}

/// Pawn pushes onto empty squares and diagonal captures onto enemy pieces.
///
/// The double step needs the pawn on its home row and both squares ahead empty.
fn generate_pawn_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Move>) {
    if let Some(one_step) = single_push(from, color) {
        if board.get(one_step).is_none() {
            moves.push(Move::new(from, one_step, board));

            if let Some(two_step) = double_push(from, color) {
                if board.get(two_step).is_none() {
                    moves.push(Move::new(from, two_step, board));
                }
            }
        }
    }

    for target in diagonal_targets(from, color) {
        if matches!(board.get(target), Some(piece) if piece.color != color) {
            moves.push(Move::new(from, target, board));
        }
    }
}

fn generate_knight_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Move>) {
    let targets = &tables().knight_targets[from.index()];
    add_leaper_moves(board, from, color, targets, moves);
}

fn generate_bishop_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Move>) {
    slide(board, from, color, &BISHOP_DIRECTIONS, moves);
}

fn generate_rook_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Move>) {
    slide(board, from, color, &ROOK_DIRECTIONS, moves);
}

/// A queen moves like a rook and a bishop combined, rook lines first.
fn generate_queen_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Move>) {
    generate_rook_moves(board, from, color, moves);
    generate_bishop_moves(board, from, color, moves);
}

fn generate_king_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Move>) {
    let targets = &tables().king_targets[from.index()];
    add_leaper_moves(board, from, color, targets, moves);
}

/// Adds a move to each target that is empty or holds an enemy piece.
fn add_leaper_moves(
    board: &Board,
    from: Square,
    color: Color,
    targets: &[Square],
    moves: &mut Vec<Move>,
) {
    for &target in targets {
        match board.get(target) {
            Some(piece) if piece.color == color => {}
            _ => moves.push(Move::new(from, target, board)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{Piece, Position};

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    fn board_with(pieces: &[(i32, i32, Color, PieceType)]) -> Board {
        let mut board = Board::empty();
        for &(row, col, color, piece_type) in pieces {
            board.set(sq(row, col), Some(Piece::new(color, piece_type)));
        }
        board
    }

    fn targets_from(moves: &[Move], from: Square) -> Vec<Square> {
        moves.iter().filter(|m| m.from() == from).map(|m| m.to()).collect()
    }

    #[test]
    fn test_initial_position_pseudo_legal_counts() {
        let board = Board::initial();
        assert_eq!(generate_pseudo_legal_moves(&board, Color::White).len(), 20);
        assert_eq!(generate_pseudo_legal_moves(&board, Color::Black).len(), 20);
    }

    #[test]
    fn test_only_side_to_move_generates() {
        let board = Board::initial();
        let white = generate_pseudo_legal_moves(&board, Color::White);
        assert!(white
            .iter()
            .all(|m| m.piece_moved().map(|p| p.color) == Some(Color::White)));
    }

    #[test]
    fn test_pawn_captures_only_enemies() {
        let board = board_with(&[
            (6, 4, Color::White, PieceType::Pawn),
            (5, 3, Color::Black, PieceType::Knight),
            (5, 5, Color::White, PieceType::Knight),
        ]);
        let moves = generate_pseudo_legal_moves(&board, Color::White);
        let pawn = targets_from(&moves, sq(6, 4));
        assert_eq!(pawn, vec![sq(5, 4), sq(4, 4), sq(5, 3)]);
    }

    #[test]
    fn test_black_pawn_moves_down() {
        let board = board_with(&[
            (1, 2, Color::Black, PieceType::Pawn),
            (2, 1, Color::White, PieceType::Pawn),
        ]);
        let moves = generate_pseudo_legal_moves(&board, Color::Black);
        assert_eq!(targets_from(&moves, sq(1, 2)), vec![sq(2, 2), sq(3, 2), sq(2, 1)]);
    }

    #[test]
    fn test_pawn_double_step_blocked_on_second_square() {
        let board = board_with(&[
            (6, 4, Color::White, PieceType::Pawn),
            (4, 4, Color::Black, PieceType::Pawn),
        ]);
        let moves = generate_pseudo_legal_moves(&board, Color::White);
        assert_eq!(targets_from(&moves, sq(6, 4)), vec![sq(5, 4)]);
    }

    #[test]
    fn test_pawn_on_last_row_has_no_moves() {
        let board = board_with(&[(0, 4, Color::White, PieceType::Pawn)]);
        assert!(generate_pseudo_legal_moves(&board, Color::White).is_empty());
    }

    #[test]
    fn test_knight_moves_skip_friendly() {
        let board = board_with(&[
            (7, 1, Color::White, PieceType::Knight),
            (5, 2, Color::White, PieceType::Pawn),
            (5, 0, Color::Black, PieceType::Pawn),
        ]);
        let moves = generate_pseudo_legal_moves(&board, Color::White);
        let mut knight = targets_from(&moves, sq(7, 1));
        knight.sort();
        assert_eq!(knight, vec![sq(5, 0), sq(6, 3)]);
    }

    #[test]
    fn test_king_moves_skip_friendly() {
        let board = board_with(&[
            (7, 4, Color::White, PieceType::King),
            (6, 4, Color::White, PieceType::Pawn),
            (6, 3, Color::Black, PieceType::Pawn),
        ]);
        let moves = generate_pseudo_legal_moves(&board, Color::White);
        let mut king = targets_from(&moves, sq(7, 4));
        king.sort();
        assert_eq!(king, vec![sq(6, 3), sq(6, 5), sq(7, 3), sq(7, 5)]);
    }

    #[test]
    fn test_queen_is_rook_plus_bishop() {
        let targets_of = |piece_type: PieceType| {
            let board = board_with(&[
                (4, 3, Color::White, piece_type),
                (2, 3, Color::Black, PieceType::Pawn),
            ]);
            targets_from(&generate_pseudo_legal_moves(&board, Color::White), sq(4, 3))
        };

        let mut expected = targets_of(PieceType::Rook);
        expected.extend(targets_of(PieceType::Bishop));

        let actual = targets_of(PieceType::Queen);
        assert_eq!(actual, expected);
        assert_eq!(actual.len(), 12 + 13);
    }

    #[test]
    fn test_bishop_stops_at_first_piece() {
        let board = board_with(&[
            (7, 2, Color::White, PieceType::Bishop),
            (5, 4, Color::Black, PieceType::Rook),
            (6, 1, Color::White, PieceType::Pawn),
        ]);
        let moves = generate_pseudo_legal_moves(&board, Color::White);
        let bishop = targets_from(&moves, sq(7, 2));
        assert_eq!(bishop, vec![sq(6, 3), sq(5, 4)]);
    }

    #[test]
    fn test_generation_matches_position() {
        let position =
            Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w - - 0 1")
                .unwrap();
        let moves = generate_pseudo_legal_moves(position.board(), Color::White);
        assert_eq!(moves, position.pseudo_legal_moves());
        // Without castling the kiwipete position has 46 white moves
        assert_eq!(moves.len(), 46);
    }
}
