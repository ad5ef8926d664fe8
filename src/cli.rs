//! Command-line interface for strictly_jigsaw.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_jigsaw::{GameMode, GridSize};

/// Strictly Jigsaw - headless jigsaw puzzle core
#[derive(Parser, Debug)]
#[command(name = "strictly_jigsaw")]
#[command(about = "Slice images into jigsaw pieces and play them headlessly", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML puzzle config (defaults are used when absent)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Cut an image into piece PNGs plus a preview thumbnail
    Slice {
        /// Source image (PNG, JPEG or BMP)
        #[arg(short, long)]
        image: PathBuf,

        /// Grid as RxC
        #[arg(short, long, default_value = "3x3")]
        grid: GridSize,

        /// Output directory (created if missing)
        #[arg(short, long, default_value = "pieces")]
        out: PathBuf,
    },

    /// Run a scripted player through a full session
    Play {
        /// Source image; a generated gradient when absent
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Grid as RxC
        #[arg(short, long, default_value = "3x3")]
        grid: GridSize,

        /// free, time_attack or challenge
        #[arg(short, long, default_value = "free")]
        mode: GameMode,

        /// Seed for both the shuffle and the player
        #[arg(long)]
        seed: Option<u64>,

        /// Largest per-axis miss of the player, in pixels
        #[arg(long, default_value_t = 30.0)]
        jitter: f32,

        /// Upper bound on drag attempts
        #[arg(long, default_value_t = 10_000)]
        max_steps: u32,

        /// Print the summary and final frame as JSON
        #[arg(long)]
        json: bool,
    },
}
