//! Piece collection, shuffling and completion tracking.

use super::error::SetupError;
use super::layout::GridLayout;
use super::piece::Piece;
use super::slicer::SlicedPiece;
use super::types::{Cell, GridSize, PieceId, Point};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};

/// Default snap distance in pixels.
pub const DEFAULT_SNAP_THRESHOLD: f32 = 40.0;

/// Owns the pieces of one puzzle and answers "is it solved".
#[derive(Debug, Clone)]
pub struct PuzzleBoard {
    pieces: Vec<Piece>,
    layout: GridLayout,
    snap_threshold: f32,
}

impl PuzzleBoard {
    /// Builds a board from sliced pieces.
    ///
    /// Pieces are re-indexed by their target cell, so the id of the piece
    /// cut from `(row, col)` is `row * cols + col` regardless of input order.
    /// Every piece starts at its pool slot in row-major order; call
    /// [`PuzzleBoard::shuffle`] before play.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::IncompletePieceSet`] unless every cell of the
    /// grid has a piece. Pieces outside the grid and repeated cells are
    /// dropped before counting.
    #[instrument(skip(sliced, layout), fields(pieces = sliced.len()))]
    pub fn new(
        sliced: Vec<SlicedPiece>,
        layout: GridLayout,
        snap_threshold: f32,
    ) -> Result<Self, SetupError> {
        let grid = *layout.grid();
        let mut sliced = sliced
            .into_iter()
            .map(SlicedPiece::into_parts)
            .filter_map(|(cell, image)| grid.id_of(cell).map(|id| (id, cell, image)))
            .collect::<Vec<_>>();
        sliced.sort_by_key(|(id, _, _)| *id);
        sliced.dedup_by_key(|(id, _, _)| *id);

        if sliced.len() != grid.piece_count() {
            warn!(
                have = sliced.len(),
                want = grid.piece_count(),
                "Refusing to build a board from an incomplete piece set"
            );
            return Err(SetupError::IncompletePieceSet {
                have: sliced.len(),
                want: grid.piece_count(),
            });
        }

        let pieces = sliced
            .into_iter()
            .map(|(id, cell, image)| {
                let mut piece = Piece::new(id, cell, image);
                piece.position = layout.pool_slot_for_index(id.index());
                piece
            })
            .collect::<Vec<_>>();

        Ok(Self {
            pieces,
            layout,
            snap_threshold,
        })
    }

    /// Returns the layout.
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Returns the grid size.
    pub fn grid(&self) -> GridSize {
        *self.layout.grid()
    }

    /// Returns the snap distance in pixels.
    pub fn snap_threshold(&self) -> f32 {
        self.snap_threshold
    }

    /// Returns all pieces in id order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Returns a piece by id.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    pub(super) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id.index())
    }

    /// Total number of pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Returns true if the board has no pieces.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Target pixel of a piece.
    pub fn target_pixel(&self, id: PieceId) -> Option<Point> {
        self.piece(id)
            .map(|piece| self.layout.cell_to_pixel(piece.target_cell()))
    }

    /// Scatters every piece into the pool in random order.
    ///
    /// Piece ids are Fisher-Yates shuffled and then assigned pool slots in
    /// order. All placement, drag and z-order state is reset. No piece is
    /// left on its own target pixel.
    #[instrument(skip(self, rng), fields(pieces = self.pieces.len()))]
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order = (0..self.pieces.len()).collect::<Vec<_>>();
        order.shuffle(rng);

        for (slot, &index) in order.iter().enumerate() {
            let position = self.layout.pool_slot_for_index(slot);
            let piece = &mut self.pieces[index];
            piece.position = position;
            piece.is_placed = false;
            piece.is_dragging = false;
            piece.z_order = 0;
        }

        self.separate_from_targets();
        info!(pieces = self.pieces.len(), "Pieces shuffled into pool");
    }

    /// Swaps the position of any piece that sits on its own target with
    /// its neighbour's.
    fn separate_from_targets(&mut self) {
        let count = self.pieces.len();
        if count < 2 {
            return;
        }
        for index in 0..count {
            if !self.is_on_target(index) {
                continue;
            }
            let other = (index + 1) % count;
            let here = self.pieces[index].position;
            self.pieces[index].position = self.pieces[other].position;
            self.pieces[other].position = here;
            debug!(piece = index, swapped_with = other, "Moved piece off its target after shuffle");
        }
    }

    fn is_on_target(&self, index: usize) -> bool {
        let piece = &self.pieces[index];
        piece.position == self.layout.cell_to_pixel(piece.target_cell())
    }

    /// Resolves a drop of `id` at `position`.
    ///
    /// Within the snap threshold (inclusive) the piece moves exactly onto its
    /// target pixel and becomes placed. Otherwise it stays where it was
    /// dropped and is not placed. Returns whether the piece is now placed.
    #[instrument(skip(self))]
    pub fn mark_placed(&mut self, id: PieceId, position: Point) -> bool {
        let Some(target) = self.target_pixel(id) else {
            warn!("mark_placed on unknown piece");
            return false;
        };
        let snapped = position.distance(target) <= self.snap_threshold;
        if let Some(piece) = self.piece_mut(id) {
            piece.position = if snapped { target } else { position };
            piece.is_placed = snapped;
        }
        snapped
    }

    /// Fraction of pieces correctly placed, in `[0, 1]`.
    pub fn completion_ratio(&self) -> f32 {
        if self.pieces.is_empty() {
            return 0.0;
        }
        self.placed_count() as f32 / self.pieces.len() as f32
    }

    /// Completion as a percentage, in `[0, 100]`.
    pub fn completion_percentage(&self) -> f32 {
        self.completion_ratio() * 100.0
    }

    /// Number of placed pieces.
    pub fn placed_count(&self) -> usize {
        self.pieces.iter().filter(|piece| piece.is_placed()).count()
    }

    /// True when every piece is placed.
    pub fn is_solved(&self) -> bool {
        !self.pieces.is_empty() && self.pieces.iter().all(Piece::is_placed)
    }

    /// Highest z-order on the board.
    pub fn max_z_order(&self) -> u32 {
        self.pieces
            .iter()
            .map(Piece::z_order)
            .max()
            .unwrap_or(0)
    }

    /// Topmost piece whose rectangle contains `point`.
    ///
    /// Ties in z-order go to the piece drawn last (higher id).
    #[instrument(level = "trace", skip(self))]
    pub fn piece_at_point(&self, point: Point) -> Option<PieceId> {
        self.pieces
            .iter()
            .filter(|piece| self.layout.piece_rect(piece.position()).contains(point))
            .max_by_key(|piece| (piece.z_order(), piece.id()))
            .map(Piece::id)
    }

    /// The placed piece occupying `cell`, if any.
    pub fn piece_at_cell(&self, cell: Cell) -> Option<PieceId> {
        self.pieces
            .iter()
            .find(|piece| piece.target_cell() == cell && piece.is_placed())
            .map(Piece::id)
    }

    /// Piece ids in draw order: ascending z-order, then id.
    pub fn render_order(&self) -> Vec<PieceId> {
        let mut order = self
            .pieces
            .iter()
            .map(|piece| (piece.z_order(), piece.id()))
            .collect::<Vec<_>>();
        order.sort();
        order.into_iter().map(|(_, id)| id).collect()
    }
}
