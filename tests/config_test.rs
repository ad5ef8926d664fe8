//! Tests for loading and validating puzzle configuration.

use std::io::Write;
use strictly_jigsaw::{DEFAULT_SNAP_THRESHOLD, GridSize, PuzzleConfig};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = PuzzleConfig::default();
    assert_eq!(*config.snap_threshold(), DEFAULT_SNAP_THRESHOLD);
    assert_eq!(config.grid_options(), &GridSize::standard_options());
    assert_eq!(*config.seconds_per_piece(), 30);
    assert_eq!(*config.moves_per_piece(), 3);
    assert_eq!((*config.screen_width(), *config.screen_height()), (1400, 900));
    assert_eq!(*config.thumbnail_size(), 180);
    assert_eq!(*config.seed(), None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = write_config("");
    let config = PuzzleConfig::from_file(file.path()).unwrap();
    assert_eq!(config, PuzzleConfig::default());
}

#[test]
fn test_load_overrides() {
    let file = write_config(
        r#"
snap_threshold = 25.5
grid_options = ["2x2", "3x3", "6x8"]
moves_per_piece = 2
seed = 99
"#,
    );
    let config = PuzzleConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.snap_threshold(), 25.5);
    assert_eq!(config.grid_options().len(), 3);
    assert!(config.allows_grid(GridSize::new(6, 8).unwrap()));
    assert!(!config.allows_grid(GridSize::new(5, 5).unwrap()));
    assert_eq!(*config.moves_per_piece(), 2);
    assert_eq!(*config.seconds_per_piece(), 30);
    assert_eq!(*config.seed(), Some(99));
}

#[test]
fn test_invalid_grid_string_fails_to_parse() {
    let file = write_config(r#"grid_options = ["1x4"]"#);
    let err = PuzzleConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_validation_rejects_bad_values() {
    for content in [
        "snap_threshold = -1.0",
        "snap_threshold = nan",
        "grid_options = []",
        "seconds_per_piece = 0",
        "moves_per_piece = 0",
        "pool_columns = 0",
        "frame_rate = 0",
    ] {
        assert!(
            PuzzleConfig::from_toml(content).is_err(),
            "accepted invalid config: {}",
            content
        );
    }
}

#[test]
fn test_missing_file_reports_location() {
    let dir = tempfile::tempdir().unwrap();
    let err = PuzzleConfig::from_file(dir.path().join("nope.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
    assert!(err.file.ends_with("config.rs"));
    assert!(err.line > 0);
}

#[test]
fn test_setters_chain() {
    let config = PuzzleConfig::default()
        .with_snap_threshold(10.0)
        .with_pool_columns(3)
        .with_seed(7);
    assert_eq!(*config.snap_threshold(), 10.0);
    assert_eq!(*config.pool_columns(), 3);
    assert_eq!(*config.seed(), Some(7));
}
