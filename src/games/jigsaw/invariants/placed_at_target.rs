//! Placed-at-target invariant: a placed piece sits exactly on its cell.

use super::super::board::PuzzleBoard;
use super::Invariant;
use tracing::{instrument, warn};

/// Invariant: `is_placed` implies the position equals the target pixel
/// with zero tolerance.
pub struct PlacedAtTargetInvariant;

impl Invariant<PuzzleBoard> for PlacedAtTargetInvariant {
    #[instrument(skip(board))]
    fn holds(board: &PuzzleBoard) -> bool {
        board.pieces().iter().filter(|piece| piece.is_placed()).all(|piece| {
            let target = board.layout().cell_to_pixel(piece.target_cell());
            let valid = piece.position() == target;
            if !valid {
                warn!(piece = %piece.id(), position = %piece.position(), %target, "Placed piece off target");
            }
            valid
        })
    }

    fn description() -> &'static str {
        "Placed pieces sit exactly on their target cell"
    }
}
