//! A single puzzle piece.

use super::types::{Cell, PieceId, Point};
use image::RgbaImage;
use tracing::instrument;

/// One rectangular slice of the source image.
///
/// The pixel buffer and target cell never change after creation. Position,
/// z-order and the drag/placement flags are mutated by the board and the
/// drag controller.
#[derive(Debug, Clone)]
pub struct Piece {
    id: PieceId,
    target: Cell,
    image: RgbaImage,
    pub(super) position: Point,
    pub(super) z_order: u32,
    pub(super) is_dragging: bool,
    pub(super) is_placed: bool,
}

impl Piece {
    /// Creates an unplaced piece at the origin.
    #[instrument(skip(image), fields(width = image.width(), height = image.height()))]
    pub fn new(id: PieceId, target: Cell, image: RgbaImage) -> Self {
        Self {
            id,
            target,
            image,
            position: Point::default(),
            z_order: 0,
            is_dragging: false,
            is_placed: false,
        }
    }

    /// Returns the piece identity.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Returns the cell this piece belongs in.
    pub fn target_cell(&self) -> Cell {
        self.target
    }

    /// Returns the piece's pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Returns the current top-left position on the play surface.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the draw order; higher draws on top.
    pub fn z_order(&self) -> u32 {
        self.z_order
    }

    /// Returns true while the piece follows the pointer.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Returns true once the piece has snapped into its target cell.
    pub fn is_placed(&self) -> bool {
        self.is_placed
    }

    /// Distance from the current position to a target pixel.
    pub fn distance_to(&self, target: Point) -> f32 {
        self.position.distance(target)
    }
}
