//! Strictly Jigsaw - headless CLI
//!
//! Slices images into pieces and runs scripted sessions against the core.

#![warn(missing_docs)]

mod cli;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use image::{DynamicImage, Rgba, RgbaImage};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use strictly_jigsaw::{
    AutoplayConfig, Autoplayer, GameMode, GridSize, ImageSlicer, PuzzleConfig, PuzzleSession,
    ScreenLayout,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Slice { image, grid, out } => run_slice(&config, &image, grid, &out),
        Command::Play {
            image,
            grid,
            mode,
            seed,
            jitter,
            max_steps,
            json,
        } => run_play(config, image, grid, mode, seed, jitter, max_steps, json),
    }
}

#[instrument]
fn load_config(path: Option<&Path>) -> Result<PuzzleConfig> {
    match path {
        Some(path) => Ok(PuzzleConfig::from_file(path)?),
        None => {
            info!("No config file given, using defaults");
            Ok(PuzzleConfig::default())
        }
    }
}

/// Write one PNG per piece plus a preview thumbnail
#[instrument(skip(config))]
fn run_slice(config: &PuzzleConfig, image: &Path, grid: GridSize, out: &Path) -> Result<()> {
    if !config.allows_grid(grid) {
        bail!("Grid {} is not one of the configured options", grid);
    }

    let source = ImageSlicer::open(image)?;
    let screen = ScreenLayout::compute(*config.screen_width(), *config.screen_height());
    let play_area = screen.play_area();
    let sliced = ImageSlicer::slice(
        &source,
        grid,
        play_area.width as u32,
        play_area.height as u32,
    )?;

    std::fs::create_dir_all(out)?;
    for piece in sliced.pieces() {
        let target = piece.target();
        let path = out.join(format!("piece_r{}_c{}.png", target.row, target.col));
        piece.image().save(&path)?;
    }

    let preview = ImageSlicer::thumbnail(
        sliced.canvas(),
        *config.thumbnail_size(),
        *config.thumbnail_size(),
    );
    preview.save(out.join("preview.png"))?;

    info!(
        pieces = sliced.pieces().len(),
        out = %out.display(),
        "Slices written"
    );
    println!(
        "Wrote {} pieces ({}x{} px each) and preview.png to {}",
        sliced.pieces().len(),
        sliced.cell_width(),
        sliced.cell_height(),
        out.display()
    );
    Ok(())
}

/// Run the scripted player through one session
#[allow(clippy::too_many_arguments)]
#[instrument(skip(config))]
fn run_play(
    config: PuzzleConfig,
    image: Option<PathBuf>,
    grid: GridSize,
    mode: GameMode,
    seed: Option<u64>,
    jitter: f32,
    max_steps: u32,
    json: bool,
) -> Result<()> {
    let config = match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    };
    let source = match image {
        Some(path) => ImageSlicer::open(path)?,
        None => gradient_image(800, 600),
    };

    let mut session = PuzzleSession::start(&source, grid, mode, &config)?;
    let frame = Duration::from_secs(1) / (*config.frame_rate()).max(1);
    let mut player = Autoplayer::new(AutoplayConfig::new(
        session.seed(),
        jitter,
        max_steps,
        4,
        frame,
    ));
    let summary = player.play(&mut session);

    if json {
        let report = json!({
            "summary": summary,
            "frame": session.frame(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Mode:      {}", mode);
        println!("Grid:      {}", grid);
        println!("Seed:      {}", session.seed());
        println!("Status:    {}", summary.status);
        println!("Placed:    {:.0}%", summary.completion_percentage);
        println!("Moves:     {} ({} snapped, {} missed)", summary.move_count, summary.snaps, summary.misses);
        println!("Elapsed:   {}", session.frame().elapsed_label);
        if let Some(budget) = session.remaining_budget() {
            println!("Remaining: {}", budget);
        }
    }
    Ok(())
}

fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x + y) % 256) as u8,
            255,
        ])
    }))
}
