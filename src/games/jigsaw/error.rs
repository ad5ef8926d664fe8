//! Error types for puzzle setup.
//!
//! Only session construction can fail. Once a session exists, every
//! pointer and tick operation is total.

use super::types::GridSize;
use derive_more::{Display, Error};
use tracing::instrument;

/// Why an image could not be turned into puzzle pieces.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ImageLoadErrorKind {
    /// The file could not be read.
    #[display("I/O failure: {}", _0)]
    Io(String),

    /// The content or extension is not PNG, JPEG or BMP.
    #[display("unsupported image format: {}", _0)]
    UnsupportedFormat(String),

    /// The decoder rejected the content.
    #[display("decode failure: {}", _0)]
    Decode(String),

    /// The image is too small to cut into the requested grid.
    #[display("image {}x{} is smaller than the {}x{} minimum", width, height, min_width, min_height)]
    Undersized {
        /// Source width in pixels.
        width: u32,
        /// Source height in pixels.
        height: u32,
        /// Minimum acceptable width.
        min_width: u32,
        /// Minimum acceptable height.
        min_height: u32,
    },
}

/// Image load error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Image load error: {} at {}:{}", kind, file, line)]
pub struct ImageLoadError {
    /// What went wrong.
    pub kind: ImageLoadErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ImageLoadError {
    /// Creates a new image load error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ImageLoadErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &ImageLoadErrorKind {
        &self.kind
    }
}

impl From<image::ImageError> for ImageLoadError {
    #[track_caller]
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(e) => {
                Self::new(ImageLoadErrorKind::UnsupportedFormat(e.to_string()))
            }
            image::ImageError::IoError(e) => Self::new(ImageLoadErrorKind::Io(e.to_string())),
            other => Self::new(ImageLoadErrorKind::Decode(other.to_string())),
        }
    }
}

impl From<std::io::Error> for ImageLoadError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(ImageLoadErrorKind::Io(err.to_string()))
    }
}

/// Error that prevents a puzzle session from being created.
#[derive(Debug, Clone, PartialEq, Eq, Display, derive_more::From)]
pub enum SetupError {
    /// The source image is unusable.
    #[display("{}", _0)]
    ImageLoad(ImageLoadError),

    /// Rows or columns are outside the supported bounds.
    #[from(ignore)]
    #[display("Invalid grid size {}x{}", rows, cols)]
    InvalidGridSize {
        /// Requested rows.
        rows: u32,
        /// Requested columns.
        cols: u32,
    },

    /// A grid string was not of the form `RxC`.
    #[from(ignore)]
    #[display("Cannot parse grid size '{}' (expected RxC)", _0)]
    GridParse(String),

    /// The pieces handed to a board do not cover every cell exactly once.
    #[from(ignore)]
    #[display("Board needs {} pieces, got {} distinct", want, have)]
    IncompletePieceSet {
        /// Distinct in-grid pieces supplied.
        have: usize,
        /// Cells in the grid.
        want: usize,
    },

    /// The play area is too small to give every cell at least one pixel.
    #[from(ignore)]
    #[display("Canvas {}x{} is too small for a {} grid", width, height, grid)]
    CanvasTooSmall {
        /// Canvas width in pixels.
        width: u32,
        /// Canvas height in pixels.
        height: u32,
        /// Requested grid.
        grid: GridSize,
    },
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::ImageLoad(e) => Some(e),
            _ => None,
        }
    }
}
