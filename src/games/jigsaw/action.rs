//! First-class input and result types for the drag state machine.
//!
//! Pointer events are domain events, not callbacks. The host translates
//! whatever its windowing library delivers into [`PointerEvent`]s and feeds
//! them to the session in arrival order.

use super::types::{PieceId, Point};
use serde::{Deserialize, Serialize};

/// A discrete pointer or keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Button pressed at a point.
    Down(Point),
    /// Pointer moved to a point.
    Move(Point),
    /// Button released.
    Up,
    /// Drag aborted (for example with Escape).
    Cancel,
}

impl std::fmt::Display for PointerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerEvent::Down(point) => write!(f, "down at {}", point),
            PointerEvent::Move(point) => write!(f, "move to {}", point),
            PointerEvent::Up => write!(f, "up"),
            PointerEvent::Cancel => write!(f, "cancel"),
        }
    }
}

/// Resolution of a drop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropOutcome {
    /// The dropped piece.
    pub piece: PieceId,
    /// Final position after snapping (or the drop position if it missed).
    pub position: Point,
    /// Distance from the drop position to the target pixel.
    pub distance: f32,
    /// Whether the piece snapped into its target cell.
    pub snapped: bool,
}

/// What a single pointer event did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragOutcome {
    /// The event did not apply in the current state.
    Ignored,
    /// A piece was picked up.
    Picked(PieceId),
    /// The dragged piece followed the pointer.
    Moved(PieceId),
    /// The dragged piece was dropped; this counts as one move.
    Dropped(DropOutcome),
    /// The drag was aborted and the piece returned to where it started.
    Cancelled(PieceId),
}

impl DragOutcome {
    /// Returns the drop result if this outcome counts as a move.
    pub fn as_drop(&self) -> Option<&DropOutcome> {
        match self {
            DragOutcome::Dropped(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Returns true if the event was ignored.
    pub fn is_ignored(&self) -> bool {
        matches!(self, DragOutcome::Ignored)
    }
}
