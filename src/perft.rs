//! Move-path enumeration for validating the move generator.
//!
//! Walks every legal line to a fixed depth with `apply`/`revert` and counts
//! what happens on the last ply. Known counts from the initial position pin
//! down piece geometry, capture rules and check detection together.

use crate::chess_move::Move;
use crate::position::Position;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Perft {
    /// Leaf positions reached
    pub nodes: u64,
    /// Last-ply moves that captured a piece
    pub captures: u64,
    /// Last-ply moves that gave check
    pub checks: u64,
    /// Leaf positions where the side to move is checkmated
    pub checkmates: u64,
    /// Leaf positions where the side to move is stalemated
    pub stalemates: u64,
}

impl Perft {
    pub fn new() -> Self {
        Perft::default()
    }

    /// Counts leaves and last-ply events `depth` plies below `position`.
    ///
    /// The position is restored exactly before returning.
    ///
    /// # Arguments
    ///
    /// * `position` - Root position
    /// * `depth` - Plies to walk; 0 counts the root itself as one node
    ///
    /// # Returns
    ///
    /// * The number of leaf nodes
    pub fn run(&mut self, position: &mut Position, depth: u32) -> u64 {
        *self = Perft::new();
        self.walk(position, depth);
        self.nodes
    }

    fn walk(&mut self, position: &mut Position, depth: u32) {
        if depth == 0 {
            self.nodes += 1;
            return;
        }

        for mv in position.legal_moves() {
            position.apply(mv);
            if depth == 1 {
                self.count_leaf(position, mv);
            } else {
                self.walk(position, depth - 1);
            }
            position.revert();
        }
    }

    fn count_leaf(&mut self, position: &mut Position, mv: Move) {
        self.nodes += 1;
        if mv.is_capture() {
            self.captures += 1;
        }
        if position.in_check(position.side_to_move()) {
            self.checks += 1;
        }
        // Terminal flags come from the reply set
        position.legal_moves();
        if position.is_checkmate() {
            self.checkmates += 1;
        } else if position.is_stalemate() {
            self.stalemates += 1;
        }
    }
}

/// Counts leaf nodes only, using the legal-move count at the last ply.
pub fn perft_count(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        position.apply(mv);
        nodes += perft_count(position, depth - 1);
        position.revert();
    }
    nodes
}

/// Leaf counts below each root move, in generation order.
pub fn divide(position: &mut Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut results = Vec::new();
    for mv in position.legal_moves() {
        position.apply(mv);
        results.push((mv, perft_count(position, depth - 1)));
        position.revert();
    }
    results
}
