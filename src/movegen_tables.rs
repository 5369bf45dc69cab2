//! Fixed movement patterns for every piece type.
//!
//! Leaper targets (knight, king) do not depend on occupancy, so they are
//! computed once per square and shared. Sliding directions are consumed by
//! `rayattacks`.

use std::sync::OnceLock;

use crate::utils::Square;

/// Knight jumps as (row, column) offsets
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

/// The eight squares around a king
pub const KING_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Orthogonal slides: up, left, down, right
pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Diagonal slides
pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Pre-computed on-board targets for the leaping pieces.
///
/// Indexed by `Square::index()`. Targets keep the order of the offset
/// tables so generated move lists are deterministic.
#[derive(Debug, Clone)]
pub struct MoveGenTables {
    /// Knight targets per square
    pub knight_targets: Vec<Vec<Square>>,
    /// King targets per square
    pub king_targets: Vec<Vec<Square>>,
}

impl MoveGenTables {
    /// Builds the knight and king target lists for all 64 squares.
    pub fn new() -> Self {
        let mut tables = Self {
            knight_targets: Vec::with_capacity(64),
            king_targets: Vec::with_capacity(64),
        };

        for square in Square::all() {
            tables.knight_targets.push(leaper_targets(square, &KNIGHT_OFFSETS));
            tables.king_targets.push(leaper_targets(square, &KING_OFFSETS));
        }

        tables
    }
}

impl Default for MoveGenTables {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared tables, built on first use.
pub fn tables() -> &'static MoveGenTables {
    static TABLES: OnceLock<MoveGenTables> = OnceLock::new();
    TABLES.get_or_init(MoveGenTables::new)
}

/// Applies each offset to `square` and keeps the ones that stay on the board.
///
/// # Arguments
///
/// * `square` - The starting square
/// * `offsets` - (row, column) deltas to try
///
/// # Returns
///
/// * The on-board targets, in offset order
fn leaper_targets(square: Square, offsets: &[(i32, i32)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(d_row, d_col)| square.offset(d_row, d_col))
        .collect()
}
