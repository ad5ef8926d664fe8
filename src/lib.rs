//! Strictly Jigsaw library - a host-agnostic jigsaw puzzle core
//!
//! The library turns an image into a shuffled set of rectangular pieces and
//! runs the drag-and-snap game over them. It never touches a window, a
//! clock or a file on its own: hosts feed pointer events and frame ticks.
//!
//! # Architecture
//!
//! - **Slicer**: cover-scale, center-crop and cut a source image
//! - **Layout**: play area, pool and pixel/cell mapping
//! - **Board**: pieces, shuffle, snapping and completion
//! - **Drag**: the pointer state machine with contract checks
//! - **Session**: modes (free, time attack, challenge) and terminal status
//! - **Autoplay**: a seeded scripted player for headless runs
//!
//! # Example
//!
//! ```no_run
//! use strictly_jigsaw::{GameMode, GridSize, ImageSlicer, PuzzleConfig, PuzzleSession};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = PuzzleConfig::default();
//! let image = ImageSlicer::open("photo.png")?;
//! let grid: GridSize = "3x4".parse()?;
//! let mut session = PuzzleSession::start(&image, grid, GameMode::TimeAttack, &config)?;
//! session.tick(std::time::Duration::from_millis(16));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod autoplay;
mod config;
mod games;

// Crate-level exports - Configuration
pub use config::{ConfigError, PuzzleConfig};

// Crate-level exports - Scripted player
pub use autoplay::{AutoplayConfig, AutoplaySummary, Autoplayer};

// Crate-level exports - Contracts and invariants
pub use games::jigsaw::{contracts, invariants};

// Crate-level exports - Game types (jigsaw)
pub use games::jigsaw::{
    Budget, Cell, Contract, ContractViolation, CropRect, DEFAULT_SNAP_THRESHOLD, DragController,
    DragOutcome, DragState, DropContract, DropOutcome, FailureReason, FrameSnapshot, GameMode,
    GridLayout, GridSize, ImageLoadError, ImageLoadErrorKind, ImageSlicer, MAX_GRID_DIMENSION,
    MIN_GRID_DIMENSION, ModeState, Outcome, PLAY_AREA_WIDTH_RATIO, POOL_HEIGHT_RATIO,
    POOL_WIDTH_RATIO, Piece, PieceId, PieceSnapshot, Point, PointerEvent, PuzzleBoard,
    PuzzleSession, Rect, RenderItem,
    SCREEN_MARGIN, SUPPORTED_EXTENSIONS, ScreenLayout, SessionStatus, SetupError, SliceResult,
    SlicedPiece, check_board, format_clock,
};
