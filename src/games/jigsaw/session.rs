//! A single play-through: board, drag controller, mode rules and counters.

use super::action::{DragOutcome, PointerEvent};
use super::board::PuzzleBoard;
use super::drag::{DragController, DragState};
use super::error::SetupError;
use super::layout::{GridLayout, ScreenLayout};
use super::mode::{Budget, GameMode, ModeState, format_clock};
use super::phases::{Outcome, SessionStatus};
use super::slicer::ImageSlicer;
use super::types::{Cell, GridSize, PieceId, Point};
use crate::config::PuzzleConfig;
use image::{DynamicImage, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// One entry of the per-frame draw list.
#[derive(Debug, Clone, Copy)]
pub struct RenderItem<'a> {
    /// Piece identity.
    pub id: PieceId,
    /// Piece pixels.
    pub image: &'a RgbaImage,
    /// Top-left position on the play surface.
    pub position: Point,
    /// Draw order.
    pub z_order: u32,
    /// True while following the pointer.
    pub is_dragging: bool,
    /// True once snapped.
    pub is_placed: bool,
}

/// Pixel-free view of one piece for logs and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieceSnapshot {
    /// Piece identity.
    pub id: PieceId,
    /// Cell the piece belongs in.
    pub target: Cell,
    /// Top-left position on the play surface.
    pub position: Point,
    /// Draw order.
    pub z_order: u32,
    /// True while following the pointer.
    pub is_dragging: bool,
    /// True once snapped.
    pub is_placed: bool,
}

/// Everything a host needs to draw a frame, minus pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Pieces in draw order.
    pub pieces: Vec<PieceSnapshot>,
    /// Fraction placed, in `[0, 1]`.
    pub completion_ratio: f32,
    /// Percentage placed, in `[0, 100]`.
    pub completion_percentage: f32,
    /// Seconds since start.
    pub elapsed_secs: f64,
    /// Elapsed time as `mm:ss`.
    pub elapsed_label: String,
    /// Drops so far.
    pub move_count: u32,
    /// Active rule set.
    pub mode: GameMode,
    /// Remaining allowance, if the mode has one.
    pub remaining_budget: Option<Budget>,
    /// Lifecycle state.
    pub status: SessionStatus,
    /// True once every piece is placed.
    pub is_solved: bool,
    /// True once a budget ran out.
    pub is_failed: bool,
}

/// Owns all mutable state of one puzzle.
///
/// Every mutation goes through `&mut self`, so a host that shares a session
/// across threads must wrap it in its own lock.
#[derive(Debug)]
pub struct PuzzleSession {
    board: PuzzleBoard,
    drag: DragController,
    mode: ModeState,
    status: SessionStatus,
    elapsed: Duration,
    move_count: u32,
    canvas: RgbaImage,
    thumbnail: RgbaImage,
    rng: StdRng,
    seed: u64,
}

impl PuzzleSession {
    /// Starts a session on the screen described by `config`.
    ///
    /// # Errors
    ///
    /// Fails before any session exists if the grid is not offered, the
    /// image is too small, or the play area cannot hold the grid.
    #[instrument(skip(source, grid, mode, config), fields(grid = %grid, mode = %mode))]
    pub fn start(
        source: &DynamicImage,
        grid: GridSize,
        mode: GameMode,
        config: &PuzzleConfig,
    ) -> Result<Self, SetupError> {
        let screen = ScreenLayout::compute(*config.screen_width(), *config.screen_height());
        Self::start_with_screen(source, grid, mode, screen, config)
    }

    /// Starts a session on explicit screen regions.
    #[instrument(skip(source, grid, mode, config), fields(grid = %grid, mode = %mode))]
    pub fn start_with_screen(
        source: &DynamicImage,
        grid: GridSize,
        mode: GameMode,
        screen: ScreenLayout,
        config: &PuzzleConfig,
    ) -> Result<Self, SetupError> {
        if !grid.is_valid() || !config.allows_grid(grid) {
            return Err(SetupError::InvalidGridSize {
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }

        let layout = GridLayout::new(grid, screen, *config.pool_columns());
        let play_area = screen.play_area();
        let sliced = ImageSlicer::slice(
            source,
            grid,
            play_area.width.max(0.0) as u32,
            play_area.height.max(0.0) as u32,
        )?;
        let (pieces, canvas) = sliced.into_parts();
        let thumbnail =
            ImageSlicer::thumbnail(&canvas, *config.thumbnail_size(), *config.thumbnail_size());

        let seed = config.seed().unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = PuzzleBoard::new(pieces, layout, *config.snap_threshold())?;
        board.shuffle(&mut rng);

        let mode = ModeState::new(
            mode,
            board.len(),
            *config.seconds_per_piece(),
            *config.moves_per_piece(),
        );
        info!(pieces = board.len(), seed, budget = ?mode.remaining_budget(), "Session started");

        Ok(Self {
            board,
            drag: DragController::new(),
            mode,
            status: SessionStatus::InProgress,
            elapsed: Duration::ZERO,
            move_count: 0,
            canvas,
            thumbnail,
            rng,
            seed,
        })
    }

    /// Applies one pointer event. Input after the session ends is ignored.
    #[instrument(level = "trace", skip(self))]
    pub fn handle_event(&mut self, event: PointerEvent) -> DragOutcome {
        if self.status.is_terminal() {
            debug!(%event, "Session finished; input ignored");
            return DragOutcome::Ignored;
        }
        let outcome = self.drag.handle(&mut self.board, event);
        if outcome.as_drop().is_some() {
            self.move_count = self.move_count.saturating_add(1);
            self.mode.on_move_event();
            self.update_status();
        }
        outcome
    }

    /// Advances the clock by one frame.
    #[instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, dt: Duration) {
        if self.status.is_terminal() {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        self.mode.on_tick(dt);
        self.update_status();
    }

    /// Reshuffles the same pieces and resets every counter.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.board.shuffle(&mut self.rng);
        self.drag = DragController::new();
        self.mode.reset();
        self.elapsed = Duration::ZERO;
        self.move_count = 0;
        self.status = SessionStatus::InProgress;
        info!(pieces = self.board.len(), "Session restarted");
    }

    fn update_status(&mut self) {
        let outcome = if self.board.is_solved() {
            Outcome::Completed
        } else if let Some(reason) = self.mode.failure() {
            Outcome::Failed(reason)
        } else {
            return;
        };
        if self.drag.is_dragging() {
            self.drag.cancel(&mut self.board);
        }
        self.status = SessionStatus::Finished(outcome);
        info!(
            %outcome,
            moves = self.move_count,
            elapsed = %format_clock(self.elapsed),
            "Session finished"
        );
    }

    /// Returns the board.
    pub fn board(&self) -> &PuzzleBoard {
        &self.board
    }

    /// Returns the drag state.
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Returns the piece in hand, if any.
    pub fn dragged_piece(&self) -> Option<PieceId> {
        self.drag.dragged_piece()
    }

    /// Returns the active mode.
    pub fn mode(&self) -> GameMode {
        self.mode.mode()
    }

    /// Returns the lifecycle state.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// True once every piece is placed.
    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    /// True once a budget ran out before the puzzle was solved.
    pub fn is_failed(&self) -> bool {
        self.status.is_failed()
    }

    /// Fraction of pieces placed.
    pub fn completion_ratio(&self) -> f32 {
        self.board.completion_ratio()
    }

    /// Time accumulated through [`PuzzleSession::tick`].
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of drops, snapped or not.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// What is left of the mode budget.
    pub fn remaining_budget(&self) -> Option<Budget> {
        self.mode.remaining_budget()
    }

    /// The cropped image the pieces were cut from.
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Preview image for the side panel.
    pub fn thumbnail(&self) -> &RgbaImage {
        &self.thumbnail
    }

    /// Seed the shuffle RNG was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Pieces in draw order with their pixels.
    pub fn render_list(&self) -> Vec<RenderItem<'_>> {
        self.board
            .render_order()
            .into_iter()
            .filter_map(|id| self.board.piece(id))
            .map(|piece| RenderItem {
                id: piece.id(),
                image: piece.image(),
                position: piece.position(),
                z_order: piece.z_order(),
                is_dragging: piece.is_dragging(),
                is_placed: piece.is_placed(),
            })
            .collect()
    }

    /// Serializable summary of the current frame.
    pub fn frame(&self) -> FrameSnapshot {
        let pieces = self
            .render_list()
            .into_iter()
            .map(|item| PieceSnapshot {
                id: item.id,
                target: self.board.grid().cell_of(item.id),
                position: item.position,
                z_order: item.z_order,
                is_dragging: item.is_dragging,
                is_placed: item.is_placed,
            })
            .collect();
        FrameSnapshot {
            pieces,
            completion_ratio: self.board.completion_ratio(),
            completion_percentage: self.board.completion_percentage(),
            elapsed_secs: self.elapsed.as_secs_f64(),
            elapsed_label: format_clock(self.elapsed),
            move_count: self.move_count,
            mode: self.mode.mode(),
            remaining_budget: self.mode.remaining_budget(),
            status: self.status,
            is_solved: self.is_solved(),
            is_failed: self.is_failed(),
        }
    }
}
