//! Jigsaw puzzle core: slicing, layout, drag-and-snap and mode rules.
//!
//! # Architecture
//!
//! - **Slicer**: scales, center-crops and cuts a source image into pieces
//! - **Layout**: pure pixel/cell geometry for the play area and pool
//! - **Board**: owns the pieces, shuffles them, decides snaps
//! - **Drag**: the pointer state machine
//! - **Session**: mode budgets, counters and the terminal status
//!
//! The core is synchronous. A host feeds [`PointerEvent`]s and frame ticks
//! into a [`PuzzleSession`] and draws its [`PuzzleSession::render_list`].

mod action;
mod board;
pub mod contracts;
mod drag;
mod error;
pub mod invariants;
mod layout;
mod mode;
mod phases;
mod piece;
mod session;
mod slicer;
mod types;

pub use action::{DragOutcome, DropOutcome, PointerEvent};
pub use board::{DEFAULT_SNAP_THRESHOLD, PuzzleBoard};
pub use contracts::{Contract, ContractViolation, DropContract};
pub use drag::{DragController, DragState};
pub use error::{ImageLoadError, ImageLoadErrorKind, SetupError};
pub use invariants::{BoardInvariants, Invariant, InvariantSet, InvariantViolation, check_board};
pub use layout::{
    GridLayout, PLAY_AREA_WIDTH_RATIO, POOL_HEIGHT_RATIO, POOL_WIDTH_RATIO, SCREEN_MARGIN,
    ScreenLayout,
};
pub use mode::{Budget, GameMode, ModeState, format_clock};
pub use phases::{FailureReason, Outcome, SessionStatus};
pub use piece::Piece;
pub use session::{FrameSnapshot, PieceSnapshot, PuzzleSession, RenderItem};
pub use slicer::{CropRect, ImageSlicer, SUPPORTED_EXTENSIONS, SliceResult, SlicedPiece};
pub use types::{Cell, GridSize, MAX_GRID_DIMENSION, MIN_GRID_DIMENSION, PieceId, Point, Rect};
