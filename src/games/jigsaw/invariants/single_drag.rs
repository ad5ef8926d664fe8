//! Single-drag invariant: one pointer, at most one piece in hand.

use super::super::board::PuzzleBoard;
use super::Invariant;
use tracing::{instrument, warn};

/// Invariant: at most one piece is dragging, and it is not placed.
pub struct SingleDragInvariant;

impl Invariant<PuzzleBoard> for SingleDragInvariant {
    #[instrument(skip(board))]
    fn holds(board: &PuzzleBoard) -> bool {
        let dragging = board
            .pieces()
            .iter()
            .filter(|piece| piece.is_dragging())
            .collect::<Vec<_>>();
        let placed_in_hand = dragging
            .iter()
            .filter(|piece| piece.is_placed())
            .map(|piece| piece.id())
            .collect::<Vec<_>>();

        if dragging.len() > 1 {
            warn!(dragging = dragging.len(), "More than one piece in hand");
        }
        if !placed_in_hand.is_empty() {
            warn!(pieces = ?placed_in_hand, "Placed piece is being dragged");
        }
        dragging.len() <= 1 && placed_in_hand.is_empty()
    }

    fn description() -> &'static str {
        "At most one unplaced piece is being dragged"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::jigsaw::PieceId;
    use crate::games::jigsaw::test_support::board_3x3;

    #[test]
    fn test_holds_with_nothing_in_hand() {
        assert!(SingleDragInvariant::holds(&board_3x3(40.0)));
    }

    #[test]
    fn test_two_pieces_in_hand_fail() {
        let mut board = board_3x3(40.0);
        for id in [PieceId(0), PieceId(1)] {
            if let Some(piece) = board.piece_mut(id) {
                piece.is_dragging = true;
            }
        }
        assert!(!SingleDragInvariant::holds(&board));
    }

    #[test]
    fn test_placed_piece_in_hand_fails() {
        let mut board = board_3x3(40.0);
        let target = board.target_pixel(PieceId(3)).unwrap();
        board.mark_placed(PieceId(3), target);
        if let Some(piece) = board.piece_mut(PieceId(3)) {
            piece.is_dragging = true;
        }
        assert!(!SingleDragInvariant::holds(&board));
    }
}
