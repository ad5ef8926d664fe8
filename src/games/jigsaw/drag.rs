//! Pointer-driven drag state machine.
//!
//! ```text
//! Idle --Down on unplaced piece--> Dragging(p)
//! Dragging(p) --Move--> Dragging(p)
//! Dragging(p) --Up--> Idle      (snap or rest, one move)
//! Dragging(p) --Cancel--> Idle  (revert, no move)
//! ```

use super::action::{DragOutcome, DropOutcome, PointerEvent};
use super::board::PuzzleBoard;
use super::contracts::{Contract, DropContract};
use super::types::{PieceId, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

/// Where the controller is in a drag.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DragState {
    /// No piece in hand.
    #[default]
    Idle,
    /// A piece follows the pointer.
    Dragging {
        /// Piece in hand.
        piece: PieceId,
        /// Pointer position relative to the piece's top-left at pickup.
        offset: Point,
        /// Piece position at pickup, restored on cancel.
        origin: Point,
    },
}

/// Applies pointer events to a board.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Returns true while a piece is in hand.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Returns the piece in hand, if any.
    pub fn dragged_piece(&self) -> Option<PieceId> {
        match self.state {
            DragState::Dragging { piece, .. } => Some(piece),
            DragState::Idle => None,
        }
    }

    /// Dispatches one event. Events that do not apply in the current
    /// state are [`DragOutcome::Ignored`].
    pub fn handle(&mut self, board: &mut PuzzleBoard, event: PointerEvent) -> DragOutcome {
        match event {
            PointerEvent::Down(point) => self.pointer_down(board, point),
            PointerEvent::Move(point) => self.pointer_move(board, point),
            PointerEvent::Up => self.pointer_up(board),
            PointerEvent::Cancel => self.cancel(board),
        }
    }

    /// Picks up the topmost piece under `point` and raises it above all others.
    #[instrument(skip(self, board))]
    pub fn pointer_down(&mut self, board: &mut PuzzleBoard, point: Point) -> DragOutcome {
        if self.is_dragging() {
            debug!("Pointer down while already dragging");
            return DragOutcome::Ignored;
        }
        let Some(id) = board.piece_at_point(point) else {
            return DragOutcome::Ignored;
        };
        let top = board.max_z_order() + 1;
        let Some(piece) = board.piece_mut(id) else {
            return DragOutcome::Ignored;
        };
        if piece.is_placed {
            debug!(piece = %id, "Placed piece ignores pointer down");
            return DragOutcome::Ignored;
        }

        let origin = piece.position;
        piece.z_order = top;
        piece.is_dragging = true;
        self.state = DragState::Dragging {
            piece: id,
            offset: point - origin,
            origin,
        };
        debug!(piece = %id, z_order = top, "Piece picked up");
        DragOutcome::Picked(id)
    }

    /// Moves the piece in hand so the grab point stays under the pointer.
    #[instrument(level = "trace", skip(self, board))]
    pub fn pointer_move(&mut self, board: &mut PuzzleBoard, point: Point) -> DragOutcome {
        let DragState::Dragging { piece: id, offset, .. } = self.state else {
            return DragOutcome::Ignored;
        };
        let Some(piece) = board.piece_mut(id) else {
            return DragOutcome::Ignored;
        };
        piece.position = point - offset;
        trace!(piece = %id, position = %piece.position, "Piece moved");
        DragOutcome::Moved(id)
    }

    /// Drops the piece in hand, snapping it when close enough to its target.
    #[instrument(skip(self, board))]
    pub fn pointer_up(&mut self, board: &mut PuzzleBoard) -> DragOutcome {
        let DragState::Dragging { piece: id, .. } = self.state else {
            return DragOutcome::Ignored;
        };
        debug_assert!(DropContract::pre(board, &id).is_ok());

        let (Some(piece), Some(target)) = (board.piece(id), board.target_pixel(id)) else {
            self.state = DragState::Idle;
            return DragOutcome::Ignored;
        };
        let dropped_at = piece.position();
        let distance = dropped_at.distance(target);
        let snapped = board.mark_placed(id, dropped_at);
        if let Some(piece) = board.piece_mut(id) {
            piece.is_dragging = false;
        }
        self.state = DragState::Idle;

        debug_assert!(DropContract::post(board, &id).is_ok());
        let position = board.piece(id).map_or(dropped_at, |piece| piece.position());
        info!(piece = %id, snapped, distance, "Piece dropped");
        DragOutcome::Dropped(DropOutcome {
            piece: id,
            position,
            distance,
            snapped,
        })
    }

    /// Aborts the drag and puts the piece back where it was picked up.
    #[instrument(skip(self, board))]
    pub fn cancel(&mut self, board: &mut PuzzleBoard) -> DragOutcome {
        let DragState::Dragging { piece: id, origin, .. } = self.state else {
            return DragOutcome::Ignored;
        };
        if let Some(piece) = board.piece_mut(id) {
            piece.position = origin;
            piece.is_dragging = false;
        }
        self.state = DragState::Idle;
        debug!(piece = %id, "Drag cancelled");
        DragOutcome::Cancelled(id)
    }
}
