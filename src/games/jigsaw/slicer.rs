//! Image loading and slicing into puzzle pieces.
//!
//! The source is scaled to cover the canvas while preserving its aspect
//! ratio, center-cropped, and cut into equal cells in row-major order.

use super::error::{ImageLoadError, ImageLoadErrorKind, SetupError};
use super::types::{Cell, GridSize};
use derive_getters::Getters;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// File extensions accepted by [`ImageSlicer::open`].
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Region of the resized image that became the puzzle canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge in resized-image pixels.
    pub x: u32,
    /// Top edge in resized-image pixels.
    pub y: u32,
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
}

/// One cut cell: its pixels and the cell it came from.
#[derive(Debug, Clone, Getters)]
pub struct SlicedPiece {
    target: Cell,
    image: RgbaImage,
}

impl SlicedPiece {
    /// Splits into the target cell and the pixel buffer.
    pub fn into_parts(self) -> (Cell, RgbaImage) {
        (self.target, self.image)
    }
}

/// Output of [`ImageSlicer::slice`].
#[derive(Debug, Clone, Getters)]
pub struct SliceResult {
    /// Pieces in row-major order.
    pieces: Vec<SlicedPiece>,
    /// Crop applied after resizing.
    crop: CropRect,
    /// Uniform scale applied to the source.
    scale: f64,
    /// Cell width in pixels.
    cell_width: u32,
    /// Cell height in pixels.
    cell_height: u32,
    /// The cropped canvas the pieces were cut from.
    canvas: RgbaImage,
}

impl SliceResult {
    /// Takes ownership of the pieces and the canvas.
    pub fn into_parts(self) -> (Vec<SlicedPiece>, RgbaImage) {
        (self.pieces, self.canvas)
    }
}

/// Turns a source image into puzzle pieces.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageSlicer;

impl ImageSlicer {
    /// Opens an image file, accepting only PNG, JPEG and BMP.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<DynamicImage, ImageLoadError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ImageLoadError::new(ImageLoadErrorKind::UnsupportedFormat(
                format!("extension '{}'", extension),
            )));
        }

        let reader = image::ImageReader::open(path)?.with_guessed_format()?;
        check_format(reader.format())?;
        let image = reader.decode()?;
        info!(width = image.width(), height = image.height(), "Image opened");
        Ok(image)
    }

    /// Decodes an in-memory image, accepting only PNG, JPEG and BMP.
    #[instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ImageLoadError> {
        let format = image::guess_format(bytes)?;
        check_format(Some(format))?;
        let image = image::load_from_memory_with_format(bytes, format)?;
        debug!(width = image.width(), height = image.height(), ?format, "Image decoded");
        Ok(image)
    }

    /// Cuts `source` into `grid` pieces covering a `target_width` by
    /// `target_height` canvas.
    ///
    /// The canvas is rounded down to a whole number of cells, so the crop is
    /// exactly `cell_width * cols` by `cell_height * rows`.
    ///
    /// # Errors
    ///
    /// - [`SetupError::ImageLoad`] when the source is smaller than one pixel per cell.
    /// - [`SetupError::CanvasTooSmall`] when the target cannot hold one pixel per cell.
    #[instrument(skip(source, grid), fields(src_width = source.width(), src_height = source.height(), grid = %grid))]
    pub fn slice(
        source: &DynamicImage,
        grid: GridSize,
        target_width: u32,
        target_height: u32,
    ) -> Result<SliceResult, SetupError> {
        let (src_width, src_height) = source.dimensions();
        if src_width < grid.cols() || src_height < grid.rows() {
            return Err(ImageLoadError::new(ImageLoadErrorKind::Undersized {
                width: src_width,
                height: src_height,
                min_width: grid.cols(),
                min_height: grid.rows(),
            })
            .into());
        }

        let cell_width = target_width / grid.cols();
        let cell_height = target_height / grid.rows();
        if cell_width == 0 || cell_height == 0 {
            return Err(SetupError::CanvasTooSmall {
                width: target_width,
                height: target_height,
                grid,
            });
        }
        let canvas_width = cell_width * grid.cols();
        let canvas_height = cell_height * grid.rows();

        let scale = (canvas_width as f64 / src_width as f64)
            .max(canvas_height as f64 / src_height as f64);
        let resized_width = ((src_width as f64 * scale).round() as u32).max(canvas_width);
        let resized_height = ((src_height as f64 * scale).round() as u32).max(canvas_height);

        let rgba = source.to_rgba8();
        let resized = if (resized_width, resized_height) == (src_width, src_height) {
            rgba
        } else {
            imageops::resize(&rgba, resized_width, resized_height, FilterType::Lanczos3)
        };

        let crop = CropRect {
            x: (resized_width - canvas_width) / 2,
            y: (resized_height - canvas_height) / 2,
            width: canvas_width,
            height: canvas_height,
        };
        let canvas = imageops::crop_imm(&resized, crop.x, crop.y, crop.width, crop.height).to_image();

        let pieces = grid
            .cells()
            .map(|cell| SlicedPiece {
                target: cell,
                image: imageops::crop_imm(
                    &canvas,
                    cell.col * cell_width,
                    cell.row * cell_height,
                    cell_width,
                    cell_height,
                )
                .to_image(),
            })
            .collect::<Vec<_>>();

        info!(
            pieces = pieces.len(),
            cell_width,
            cell_height,
            scale,
            crop_x = crop.x,
            crop_y = crop.y,
            "Image sliced"
        );

        Ok(SliceResult {
            pieces,
            crop,
            scale,
            cell_width,
            cell_height,
            canvas,
        })
    }

    /// Builds an aspect-preserving preview no larger than `max_width` by `max_height`.
    #[instrument(skip(image))]
    pub fn thumbnail(image: &RgbaImage, max_width: u32, max_height: u32) -> RgbaImage {
        DynamicImage::ImageRgba8(image.clone())
            .thumbnail(max_width.max(1), max_height.max(1))
            .to_rgba8()
    }
}

#[track_caller]
fn check_format(format: Option<ImageFormat>) -> Result<(), ImageLoadError> {
    match format {
        Some(ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp) => Ok(()),
        Some(other) => Err(ImageLoadError::new(ImageLoadErrorKind::UnsupportedFormat(
            format!("{:?}", other),
        ))),
        None => Err(ImageLoadError::new(ImageLoadErrorKind::UnsupportedFormat(
            "unrecognized content".to_string(),
        ))),
    }
}
