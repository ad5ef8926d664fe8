//! Unique-targets invariant: every cell is owned by exactly one piece.

use super::super::board::PuzzleBoard;
use super::Invariant;
use std::collections::HashSet;
use tracing::{instrument, warn};

/// Invariant: the pieces' target cells are exactly the grid's cells, once each.
pub struct UniqueTargetsInvariant;

impl Invariant<PuzzleBoard> for UniqueTargetsInvariant {
    #[instrument(skip(board))]
    fn holds(board: &PuzzleBoard) -> bool {
        let grid = board.grid();
        let targets = board
            .pieces()
            .iter()
            .map(|piece| piece.target_cell())
            .collect::<HashSet<_>>();
        let in_grid = targets.iter().all(|cell| grid.id_of(*cell).is_some());
        let valid = in_grid
            && targets.len() == board.len()
            && board.len() == grid.piece_count();
        if !valid {
            warn!(
                distinct = targets.len(),
                pieces = board.len(),
                cells = grid.piece_count(),
                "Target cells are not a one-to-one cover of the grid"
            );
        }
        valid
    }

    fn description() -> &'static str {
        "Each grid cell is the target of exactly one piece"
    }
}
