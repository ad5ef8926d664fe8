//! Property-based invariant tests for layout, shuffling and slicing.
//!
//! 1. Nearest-cell lookup always lands inside the grid.
//! 2. A cell's own pixel maps back to that cell.
//! 3. Computed screen regions never overlap.
//! 4. Shuffling never leaves a piece on its target and never completes.
//! 5. Slicing tiles a canvas of exactly cell size times grid.
//! 6. The snap boundary is inclusive.

use image::{DynamicImage, Rgba, RgbaImage};
use proptest::prelude::*;
use strictly_jigsaw::{
    Cell, GameMode, GridLayout, GridSize, ImageSlicer, PieceId, Point, PointerEvent,
    PuzzleConfig, PuzzleSession, Rect, ScreenLayout,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn grid_strategy() -> impl Strategy<Value = GridSize> {
    prop::sample::select(GridSize::standard_options())
}

fn layout(grid: GridSize) -> GridLayout {
    GridLayout::new(grid, ScreenLayout::compute(1400, 900), 5)
}

fn source(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8, 255])
    }))
}

fn small_screen() -> ScreenLayout {
    ScreenLayout::from_areas(
        Rect::new(20.0, 20.0, 300.0, 300.0),
        Rect::new(340.0, 20.0, 300.0, 300.0),
    )
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Geometry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn nearest_cell_is_clamped(grid in grid_strategy(), x in any::<f32>(), y in any::<f32>()) {
        let cell = layout(grid).pixel_to_nearest_cell(Point::new(x, y));
        prop_assert!(cell.row < grid.rows(), "row {} out of {}", cell.row, grid);
        prop_assert!(cell.col < grid.cols(), "col {} out of {}", cell.col, grid);
    }

    #[test]
    fn cell_pixel_round_trips(grid in grid_strategy(), index in 0usize..25) {
        let layout = layout(grid);
        let cell = grid.cell_of(PieceId(index % grid.piece_count()));
        prop_assert_eq!(layout.pixel_to_nearest_cell(layout.cell_to_pixel(cell)), cell);
    }

    #[test]
    fn screen_regions_are_disjoint(width in 200u32..4000, height in 100u32..3000) {
        let screen = ScreenLayout::compute(width, height);
        prop_assert!(!screen.play_area().intersects(screen.pool_area()));
        prop_assert!(screen.pool_area().right() <= width as f32);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Shuffle
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn shuffle_never_starts_on_target(grid in grid_strategy(), seed in any::<u64>()) {
        let config = PuzzleConfig::default().with_seed(seed);
        let session = PuzzleSession::start_with_screen(
            &source(300, 300),
            grid,
            GameMode::Free,
            small_screen(),
            &config,
        )
        .unwrap();
        let board = session.board();
        prop_assert_eq!(board.completion_ratio(), 0.0);
        for piece in board.pieces() {
            prop_assert_ne!(Some(piece.position()), board.target_pixel(piece.id()));
            prop_assert!(!piece.is_placed());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Slicing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn slices_tile_the_canvas(
        grid in grid_strategy(),
        src_w in 5u32..160,
        src_h in 5u32..160,
        target_w in 10u32..240,
        target_h in 10u32..240,
    ) {
        let result = ImageSlicer::slice(&source(src_w, src_h), grid, target_w, target_h).unwrap();
        let (cell_w, cell_h) = (*result.cell_width(), *result.cell_height());
        prop_assert_eq!(result.pieces().len(), grid.piece_count());
        prop_assert_eq!(result.canvas().dimensions(), (cell_w * grid.cols(), cell_h * grid.rows()));
        prop_assert_eq!(
            (result.crop().width, result.crop().height),
            result.canvas().dimensions()
        );
        let cells = result.pieces().iter().map(|piece| *piece.target()).collect::<Vec<Cell>>();
        prop_assert_eq!(cells, grid.cells().collect::<Vec<_>>());
        for piece in result.pieces() {
            prop_assert_eq!(piece.image().dimensions(), (cell_w, cell_h));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Snap boundary
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn snap_iff_within_threshold(dx in -80i32..80, dy in -80i32..80) {
        let config = PuzzleConfig::default().with_pool_columns(3).with_seed(3);
        let screen = ScreenLayout::from_areas(
            Rect::new(20.0, 20.0, 540.0, 540.0),
            Rect::new(600.0, 20.0, 600.0, 600.0),
        );
        let mut session = PuzzleSession::start_with_screen(
            &source(540, 540),
            GridSize::new(3, 3).unwrap(),
            GameMode::Free,
            screen,
            &config,
        )
        .unwrap();

        let id = PieceId(4);
        let start = session.board().piece(id).unwrap().position();
        let target = session.board().target_pixel(id).unwrap();
        session.handle_event(PointerEvent::Down(Point::new(start.x + 1.0, start.y + 1.0)));
        session.handle_event(PointerEvent::Move(Point::new(
            target.x + dx as f32 + 1.0,
            target.y + dy as f32 + 1.0,
        )));
        let outcome = session.handle_event(PointerEvent::Up);
        let drop = outcome.as_drop().unwrap();

        let within = ((dx * dx + dy * dy) as f32).sqrt() <= 40.0;
        prop_assert_eq!(drop.snapped, within);
        prop_assert_eq!(session.board().piece(id).unwrap().is_placed(), within);
        prop_assert_eq!(session.move_count(), 1);
    }
}
