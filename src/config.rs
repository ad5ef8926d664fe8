//! Puzzle configuration loaded from TOML.

use crate::games::jigsaw::{DEFAULT_SNAP_THRESHOLD, GridSize};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Tunables passed into every session.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct PuzzleConfig {
    /// Snap distance in pixels (inclusive).
    #[serde(default = "default_snap_threshold")]
    snap_threshold: f32,

    /// Grids a session may be started with.
    #[serde(default = "default_grid_options")]
    grid_options: Vec<GridSize>,

    /// Time-attack allowance per piece.
    #[serde(default = "default_seconds_per_piece")]
    seconds_per_piece: u32,

    /// Challenge allowance per piece.
    #[serde(default = "default_moves_per_piece")]
    moves_per_piece: u32,

    /// Host window width in pixels.
    #[serde(default = "default_screen_width")]
    screen_width: u32,

    /// Host window height in pixels.
    #[serde(default = "default_screen_height")]
    screen_height: u32,

    /// Columns of the pool slot grid.
    #[serde(default = "default_pool_columns")]
    pool_columns: u32,

    /// Bounding box of the preview thumbnail.
    #[serde(default = "default_thumbnail_size")]
    thumbnail_size: u32,

    /// Frames per second the host ticks at.
    #[serde(default = "default_frame_rate")]
    frame_rate: u32,

    /// Shuffle seed; fresh entropy when absent.
    #[serde(default)]
    #[setters(strip_option)]
    seed: Option<u64>,
}

fn default_snap_threshold() -> f32 {
    DEFAULT_SNAP_THRESHOLD
}

fn default_grid_options() -> Vec<GridSize> {
    GridSize::standard_options()
}

fn default_seconds_per_piece() -> u32 {
    30
}

fn default_moves_per_piece() -> u32 {
    3
}

fn default_screen_width() -> u32 {
    1400
}

fn default_screen_height() -> u32 {
    900
}

fn default_pool_columns() -> u32 {
    5
}

fn default_thumbnail_size() -> u32 {
    180
}

fn default_frame_rate() -> u32 {
    60
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            snap_threshold: default_snap_threshold(),
            grid_options: default_grid_options(),
            seconds_per_piece: default_seconds_per_piece(),
            moves_per_piece: default_moves_per_piece(),
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            pool_columns: default_pool_columns(),
            thumbnail_size: default_thumbnail_size(),
            frame_rate: default_frame_rate(),
            seed: None,
        }
    }
}

impl PuzzleConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            snap_threshold = config.snap_threshold,
            grids = config.grid_options.len(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable by a session.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.snap_threshold.is_finite() || self.snap_threshold < 0.0 {
            return Err(ConfigError::new(format!(
                "snap_threshold must be a non-negative number, got {}",
                self.snap_threshold
            )));
        }
        if self.grid_options.is_empty() {
            return Err(ConfigError::new("grid_options must not be empty".to_string()));
        }
        if let Some(grid) = self.grid_options.iter().find(|grid| !grid.is_valid()) {
            return Err(ConfigError::new(format!("invalid grid option {}", grid)));
        }
        let zeros = [
            ("seconds_per_piece", self.seconds_per_piece),
            ("moves_per_piece", self.moves_per_piece),
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("pool_columns", self.pool_columns),
            ("frame_rate", self.frame_rate),
        ];
        if let Some((name, _)) = zeros.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::new(format!("{} must be greater than zero", name)));
        }
        Ok(())
    }

    /// Returns true if `grid` is one of the configured options.
    pub fn allows_grid(&self, grid: GridSize) -> bool {
        self.grid_options.contains(&grid)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
