//! Core geometric and identity types for the jigsaw puzzle.

use super::error::SetupError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Smallest row or column count a puzzle grid may have.
pub const MIN_GRID_DIMENSION: u32 = 2;

/// Largest row or column count a puzzle grid may have.
pub const MAX_GRID_DIMENSION: u32 = 100;

/// Identity of a piece: its row-major index in the grid (`row * cols + col`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("#{}", _0)]
pub struct PieceId(pub usize);

impl PieceId {
    /// Returns the underlying index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A cell of the puzzle grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("({}, {})", row, col)]
pub struct Cell {
    /// Zero-based row.
    pub row: u32,
    /// Zero-based column.
    pub col: u32,
}

impl Cell {
    /// Creates a new cell.
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// A continuous point on the play surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, derive_more::Display)]
#[display("({}, {})", x, y)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Component-wise difference `self - other`.
    pub fn offset_from(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        self.offset_from(rhs)
    }
}

/// Axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Half-open containment: left/top edges inclusive, right/bottom exclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns true if the two rectangles share any area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Puzzle grid dimensions.
///
/// Both dimensions lie in [`MIN_GRID_DIMENSION`]`..=`[`MAX_GRID_DIMENSION`],
/// so every grid has at least four pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}x{}", rows, cols)]
#[serde(try_from = "String", into = "String")]
pub struct GridSize {
    rows: u32,
    cols: u32,
}

impl GridSize {
    /// Creates a grid size, rejecting dimensions outside the supported range.
    #[instrument]
    pub fn new(rows: u32, cols: u32) -> Result<Self, SetupError> {
        let grid = Self { rows, cols };
        if !grid.is_valid() {
            return Err(SetupError::InvalidGridSize { rows, cols });
        }
        Ok(grid)
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of pieces (`rows * cols`).
    pub fn piece_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Returns true if both dimensions are within the supported range.
    pub fn is_valid(&self) -> bool {
        let range = MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION;
        range.contains(&self.rows) && range.contains(&self.cols)
    }

    /// Cell of a piece index in row-major order.
    ///
    /// Indices past the last piece map to rows below the grid.
    pub fn cell_of(&self, id: PieceId) -> Cell {
        let cols = self.cols as usize;
        let row = u32::try_from(id.index() / cols).unwrap_or(u32::MAX);
        Cell::new(row, (id.index() % cols) as u32)
    }

    /// Row-major piece index of a cell, if the cell lies inside the grid.
    pub fn id_of(&self, cell: Cell) -> Option<PieceId> {
        (cell.row < self.rows && cell.col < self.cols)
            .then(|| PieceId(cell.row as usize * self.cols as usize + cell.col as usize))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }

    /// The grid options offered to the player.
    pub fn standard_options() -> Vec<GridSize> {
        [(2, 3), (3, 3), (3, 4), (4, 4), (4, 5), (5, 5)]
            .into_iter()
            .map(|(rows, cols)| GridSize { rows, cols })
            .collect()
    }
}

impl FromStr for GridSize {
    type Err = SetupError;

    /// Parses `"RxC"` (for example `"3x4"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SetupError::GridParse(s.to_string());
        let (rows, cols) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let rows = rows.trim().parse::<u32>().map_err(|_| invalid())?;
        let cols = cols.trim().parse::<u32>().map_err(|_| invalid())?;
        GridSize::new(rows, cols)
    }
}

impl TryFrom<String> for GridSize {
    type Error = SetupError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GridSize> for String {
    fn from(grid: GridSize) -> Self {
        grid.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rejects_small_dimensions() {
        assert!(GridSize::new(1, 5).is_err());
        assert!(GridSize::new(5, 1).is_err());
        assert!(GridSize::new(2, 2).is_ok());
    }

    #[test]
    fn test_grid_rejects_oversized_dimensions() {
        assert!(GridSize::new(MAX_GRID_DIMENSION, MAX_GRID_DIMENSION).is_ok());
        assert_eq!(
            "70000x70000".parse::<GridSize>(),
            Err(SetupError::InvalidGridSize {
                rows: 70_000,
                cols: 70_000
            })
        );
        assert!(GridSize::new(2, MAX_GRID_DIMENSION + 1).is_err());
    }

    #[test]
    fn test_largest_grid_indexes_without_overflow() {
        let grid = GridSize::new(MAX_GRID_DIMENSION, MAX_GRID_DIMENSION).unwrap();
        assert_eq!(grid.piece_count(), 10_000);
        let last = Cell::new(MAX_GRID_DIMENSION - 1, MAX_GRID_DIMENSION - 1);
        assert_eq!(grid.id_of(last), Some(PieceId(9_999)));
        assert_eq!(grid.cell_of(PieceId(9_999)), last);
        assert_eq!(grid.cell_of(PieceId(usize::MAX)).col, (usize::MAX % 100) as u32);
    }

    #[test]
    fn test_cell_and_id_agree() {
        let grid = GridSize::new(3, 4).unwrap();
        for (index, cell) in grid.cells().enumerate() {
            assert_eq!(grid.cell_of(PieceId(index)), cell);
            assert_eq!(grid.id_of(cell), Some(PieceId(index)));
        }
        assert_eq!(grid.id_of(Cell::new(3, 0)), None);
    }

    #[test]
    fn test_parse_grid() {
        let grid: GridSize = "4x5".parse().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (4, 5));
        assert!("4by5".parse::<GridSize>().is_err());
        assert!("1x5".parse::<GridSize>().is_err());
    }

    #[test]
    fn test_grid_serializes_as_string() {
        let grid = GridSize::new(2, 3).unwrap();
        assert_eq!(serde_json::to_string(&grid).unwrap(), "\"2x3\"");
        assert!(serde_json::from_str::<GridSize>("\"1x1\"").is_err());
    }

    #[test]
    fn test_rect_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(!rect.contains(Point::new(15.0, 12.0)));
        assert!(!rect.contains(Point::new(12.0, 15.0)));
    }
}
