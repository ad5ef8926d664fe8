//! Tests for image loading and slicing.

use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use strictly_jigsaw::{GridSize, ImageLoadErrorKind, ImageSlicer, SetupError};

fn checkerboard(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        let shade = if (x / 7 + y / 5) % 2 == 0 { 30 } else { 220 };
        Rgba([shade, (x % 256) as u8, (y % 256) as u8, 255])
    }))
}

#[test]
fn test_slice_counts_and_tiles() {
    let grid = GridSize::new(3, 4).unwrap();
    let result = ImageSlicer::slice(&checkerboard(1000, 500), grid, 600, 400).unwrap();

    assert_eq!(result.pieces().len(), 12);
    assert_eq!((*result.cell_width(), *result.cell_height()), (150, 133));
    assert_eq!(result.canvas().dimensions(), (600, 399));

    for (index, piece) in result.pieces().iter().enumerate() {
        let target = piece.target();
        assert_eq!(
            (target.row, target.col),
            (index as u32 / 4, index as u32 % 4)
        );
        assert_eq!(piece.image().dimensions(), (150, 133));
        for (x, y) in [(0, 0), (149, 0), (0, 132), (149, 132), (75, 66)] {
            assert_eq!(
                piece.image().get_pixel(x, y),
                result
                    .canvas()
                    .get_pixel(target.col * 150 + x, target.row * 133 + y),
            );
        }
    }
}

#[test]
fn test_slice_scales_uniformly_and_centers() {
    let grid = GridSize::new(3, 4).unwrap();
    let result = ImageSlicer::slice(&checkerboard(1000, 500), grid, 600, 400).unwrap();

    // Height-bound: 399 / 500.
    assert!((*result.scale() - 0.798).abs() < 1e-9);
    let crop = result.crop();
    assert_eq!((crop.width, crop.height), (600, 399));
    assert_eq!((crop.x, crop.y), (99, 0));
}

#[test]
fn test_slice_without_resize_is_a_plain_crop() {
    let source = checkerboard(540, 540);
    let grid = GridSize::new(3, 3).unwrap();
    let result = ImageSlicer::slice(&source, grid, 540, 540).unwrap();

    assert_eq!(*result.scale(), 1.0);
    let rgba = source.to_rgba8();
    assert_eq!(result.canvas(), &rgba);
    assert_eq!(
        result.pieces()[4].image().get_pixel(0, 0),
        rgba.get_pixel(180, 180)
    );
}

#[test]
fn test_slice_rejects_undersized_source() {
    let grid = GridSize::new(5, 5).unwrap();
    let err = ImageSlicer::slice(&checkerboard(4, 40), grid, 500, 500).unwrap_err();
    match err {
        SetupError::ImageLoad(err) => assert_eq!(
            err.kind(),
            &ImageLoadErrorKind::Undersized {
                width: 4,
                height: 40,
                min_width: 5,
                min_height: 5,
            }
        ),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_slice_rejects_tiny_canvas() {
    let grid = GridSize::new(3, 3).unwrap();
    let err = ImageSlicer::slice(&checkerboard(100, 100), grid, 2, 300).unwrap_err();
    assert!(matches!(err, SetupError::CanvasTooSmall { width: 2, .. }));
}

#[test]
fn test_decode_png_bytes() {
    let mut bytes = Cursor::new(Vec::new());
    checkerboard(30, 20)
        .write_to(&mut bytes, ImageFormat::Png)
        .unwrap();
    let image = ImageSlicer::decode(bytes.get_ref()).unwrap();
    assert_eq!(image.dimensions(), (30, 20));
}

#[test]
fn test_decode_rejects_unknown_bytes() {
    let err = ImageSlicer::decode(b"definitely not an image").unwrap_err();
    assert!(matches!(err.kind(), ImageLoadErrorKind::UnsupportedFormat(_)));
    assert!(err.to_string().contains("Image load error"));
}

#[test]
fn test_open_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.PNG");
    checkerboard(64, 48).to_rgba8().save_with_format(&path, ImageFormat::Png).unwrap();

    let image = ImageSlicer::open(&path).unwrap();
    assert_eq!(image.dimensions(), (64, 48));
}

#[test]
fn test_open_rejects_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("anim.gif");
    std::fs::write(&path, b"GIF89a").unwrap();

    let err = ImageSlicer::open(&path).unwrap_err();
    assert!(matches!(err.kind(), ImageLoadErrorKind::UnsupportedFormat(_)));
}

#[test]
fn test_open_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ImageSlicer::open(dir.path().join("missing.jpg")).unwrap_err();
    assert!(matches!(err.kind(), ImageLoadErrorKind::Io(_)));
}

#[test]
fn test_thumbnail_fits_box() {
    let canvas = checkerboard(540, 360).to_rgba8();
    let thumb = ImageSlicer::thumbnail(&canvas, 180, 180);
    assert_eq!(thumb.dimensions(), (180, 120));
}
