//! Pixel/cell geometry for the play area and the piece pool.
//!
//! Everything here is pure: a [`GridLayout`] is computed once per game and
//! only answers questions.

use super::types::{Cell, GridSize, Point, Rect};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Gap between screen edges and regions, in pixels.
pub const SCREEN_MARGIN: f32 = 20.0;
/// Share of the screen width given to the play area (including its margins).
pub const PLAY_AREA_WIDTH_RATIO: f64 = 0.65;
/// Share of the screen width given to the right-hand column.
pub const POOL_WIDTH_RATIO: f64 = 0.30;
/// Share of the right-hand column's height given to the pool.
pub const POOL_HEIGHT_RATIO: f64 = 0.50;

/// The two screen regions the core cares about.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct ScreenLayout {
    /// Where pieces are assembled.
    play_area: Rect,
    /// Where unplaced pieces start.
    pool_area: Rect,
}

impl ScreenLayout {
    /// Splits a screen into a play area on the left and a pool on the right.
    ///
    /// The two regions never overlap.
    #[instrument]
    pub fn compute(screen_width: u32, screen_height: u32) -> Self {
        let margin = SCREEN_MARGIN as f64;
        let screen_width = screen_width as f64;
        let screen_height = screen_height as f64;

        let play_width = (screen_width * PLAY_AREA_WIDTH_RATIO).floor();
        let play_area = Rect::new(
            margin as f32,
            margin as f32,
            (play_width - margin * 2.0).max(0.0) as f32,
            (screen_height - margin * 2.0).max(0.0) as f32,
        );

        let right_x = play_width + margin;
        let right_width = ((screen_width * POOL_WIDTH_RATIO).floor() - margin).max(0.0);
        let available_height = (screen_height - margin * 2.0).max(0.0);
        let pool_area = Rect::new(
            right_x as f32,
            margin as f32,
            right_width as f32,
            (available_height * POOL_HEIGHT_RATIO).floor() as f32,
        );

        Self {
            play_area,
            pool_area,
        }
    }

    /// Builds a layout from explicit regions.
    pub fn from_areas(play_area: Rect, pool_area: Rect) -> Self {
        Self {
            play_area,
            pool_area,
        }
    }
}

/// Maps between pixels and grid cells for one game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct GridLayout {
    /// Puzzle grid.
    grid: GridSize,
    /// Region holding the target cells.
    play_area: Rect,
    /// Region holding unplaced pieces.
    pool_area: Rect,
    /// Cell width in whole pixels.
    cell_width: u32,
    /// Cell height in whole pixels.
    cell_height: u32,
    /// Columns of the pool's own slot grid.
    pool_columns: u32,
}

impl GridLayout {
    /// Creates a layout; cell sizes are the play area divided by the grid, rounded down.
    #[instrument]
    pub fn new(grid: GridSize, screen: ScreenLayout, pool_columns: u32) -> Self {
        let play_area = *screen.play_area();
        let cell_width = (play_area.width.max(0.0) as u32) / grid.cols();
        let cell_height = (play_area.height.max(0.0) as u32) / grid.rows();
        Self {
            grid,
            play_area,
            pool_area: *screen.pool_area(),
            cell_width,
            cell_height,
            pool_columns: pool_columns.max(1),
        }
    }

    /// Top-left pixel of a target cell within the play area.
    pub fn cell_to_pixel(&self, cell: Cell) -> Point {
        Point::new(
            self.play_area.x + (cell.col * self.cell_width) as f32,
            self.play_area.y + (cell.row * self.cell_height) as f32,
        )
    }

    /// Grid cell whose top-left is closest to `point`, clamped to the grid.
    #[instrument(level = "trace", skip(self))]
    pub fn pixel_to_nearest_cell(&self, point: Point) -> Cell {
        let col = nearest_index(point.x - self.play_area.x, self.cell_width, self.grid.cols());
        let row = nearest_index(point.y - self.play_area.y, self.cell_height, self.grid.rows());
        Cell::new(row, col)
    }

    /// Number of slots in the pool grid: enough rows for every piece.
    pub fn pool_rows(&self) -> u32 {
        let rows = self.grid.piece_count().div_ceil(self.pool_columns as usize);
        u32::try_from(rows).unwrap_or(u32::MAX).max(1)
    }

    /// Top-left of pool slot `index`.
    ///
    /// Slots fill the pool left to right, top to bottom, and a whole piece
    /// at any slot stays inside the pool when the pool is at least one
    /// cell wide and tall. Slots overlap when the pool is crowded. Indices
    /// past the last slot wrap around.
    pub fn pool_slot_for_index(&self, index: usize) -> Point {
        let columns = self.pool_columns as usize;
        let rows = self.pool_rows() as usize;
        let index = index % (columns * rows);
        let span_x = (self.pool_area.width - self.cell_width as f32).max(0.0);
        let span_y = (self.pool_area.height - self.cell_height as f32).max(0.0);
        let steps_x = columns.saturating_sub(1).max(1) as f32;
        let steps_y = rows.saturating_sub(1).max(1) as f32;
        Point::new(
            self.pool_area.x + (index % columns) as f32 * span_x / steps_x,
            self.pool_area.y + (index / columns) as f32 * span_y / steps_y,
        )
    }

    /// Hit rectangle of a piece whose top-left is at `position`.
    pub fn piece_rect(&self, position: Point) -> Rect {
        Rect::new(
            position.x,
            position.y,
            self.cell_width as f32,
            self.cell_height as f32,
        )
    }

    /// Size of the assembled canvas in pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.cell_width * self.grid.cols(),
            self.cell_height * self.grid.rows(),
        )
    }
}

fn nearest_index(offset: f32, pitch: u32, count: u32) -> u32 {
    if pitch == 0 || !offset.is_finite() {
        return if offset == f32::INFINITY { count - 1 } else { 0 };
    }
    let index = (offset / pitch as f32).round();
    index.clamp(0.0, (count - 1) as f32) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_3x3() -> GridLayout {
        let grid = GridSize::new(3, 3).unwrap();
        let screen = ScreenLayout::from_areas(
            Rect::new(20.0, 20.0, 300.0, 300.0),
            Rect::new(400.0, 20.0, 200.0, 200.0),
        );
        GridLayout::new(grid, screen, 3)
    }

    #[test]
    fn test_default_screen_regions_are_disjoint() {
        let screen = ScreenLayout::compute(1400, 900);
        assert_eq!(*screen.play_area(), Rect::new(20.0, 20.0, 870.0, 860.0));
        assert_eq!(*screen.pool_area(), Rect::new(930.0, 20.0, 400.0, 430.0));
        assert!(!screen.play_area().intersects(screen.pool_area()));
    }

    #[test]
    fn test_cell_to_pixel() {
        let layout = layout_3x3();
        assert_eq!(layout.cell_to_pixel(Cell::new(0, 0)), Point::new(20.0, 20.0));
        assert_eq!(layout.cell_to_pixel(Cell::new(2, 1)), Point::new(120.0, 220.0));
    }

    #[test]
    fn test_nearest_cell_clamps() {
        let layout = layout_3x3();
        assert_eq!(layout.pixel_to_nearest_cell(Point::new(-500.0, -500.0)), Cell::new(0, 0));
        assert_eq!(layout.pixel_to_nearest_cell(Point::new(5000.0, 5000.0)), Cell::new(2, 2));
        assert_eq!(layout.pixel_to_nearest_cell(Point::new(165.0, 60.0)), Cell::new(0, 1));
        assert_eq!(layout.pixel_to_nearest_cell(Point::new(f32::NAN, 130.0)), Cell::new(1, 0));
    }

    #[test]
    fn test_pool_slots_wrap() {
        let layout = layout_3x3();
        assert_eq!(layout.pool_rows(), 3);
        assert_eq!(layout.pool_slot_for_index(0), Point::new(400.0, 20.0));
        assert_eq!(layout.pool_slot_for_index(8), Point::new(500.0, 120.0));
        assert_eq!(layout.pool_slot_for_index(4), layout.pool_slot_for_index(13));
        for index in 0..9 {
            assert!(layout.pool_area().contains(layout.pool_slot_for_index(index)));
        }
    }

    #[test]
    fn test_pool_slots_keep_whole_pieces_in_pool() {
        let screen = ScreenLayout::compute(1400, 900);
        for grid in GridSize::standard_options() {
            let layout = GridLayout::new(grid, screen, 5);
            let pool = *layout.pool_area();
            for index in 0..grid.piece_count() {
                let rect = layout.piece_rect(layout.pool_slot_for_index(index));
                assert!(rect.x >= pool.x && rect.y >= pool.y, "{grid} slot {index}");
                assert!(rect.right() <= pool.right(), "{grid} slot {index}: {rect:?}");
                assert!(rect.bottom() <= pool.bottom(), "{grid} slot {index}: {rect:?}");
            }
        }
    }

    #[test]
    fn test_pool_smaller_than_a_piece_stacks_at_origin() {
        let grid = GridSize::new(2, 2).unwrap();
        let screen = ScreenLayout::from_areas(
            Rect::new(0.0, 0.0, 400.0, 400.0),
            Rect::new(500.0, 0.0, 100.0, 100.0),
        );
        let layout = GridLayout::new(grid, screen, 2);
        for index in 0..4 {
            assert_eq!(layout.pool_slot_for_index(index), Point::new(500.0, 0.0));
        }
    }
}
