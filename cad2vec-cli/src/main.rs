//! Command-line interface for the cad2vec raster-to-vector pipeline.

use anyhow::{Context, Result};
use cad2vec_core::config::PipelineOptions;
use cad2vec_core::emit::DocumentMetadata;
use cad2vec_core::{convert, RasterImage};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cad2vec")]
#[command(about = "Converts raster CAD line-art into a vector document")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a raster image into a vector document
    Convert {
        /// Input image file
        input: PathBuf,

        /// Output document file
        output: PathBuf,

        /// Configuration JSON file (optional; overrides defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Invert colors before processing
        #[arg(long)]
        invert: bool,

        /// Simplification tolerance in pixels
        #[arg(long)]
        tolerance: Option<f32>,

        /// Disable the accuracy-driven refinement loop
        #[arg(long)]
        no_refine: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            invert,
            tolerance,
            no_refine,
        } => convert_command(input, output, config, invert, tolerance, no_refine),
    }
}

fn load_options(config_path: Option<PathBuf>) -> Result<PipelineOptions> {
    match config_path {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config file: {}", path.display()))
        }
        None => Ok(PipelineOptions::default()),
    }
}

fn convert_command(
    input: PathBuf,
    output: PathBuf,
    config_path: Option<PathBuf>,
    invert: bool,
    tolerance: Option<f32>,
    no_refine: bool,
) -> Result<()> {
    log::info!("loading image: {}", input.display());
    let img = image::open(&input)
        .with_context(|| format!("failed to open image: {}", input.display()))?
        .to_rgba8();
    let (width, height) = (img.width(), img.height());
    let raster = RasterImage::new(width, height, img.into_raw()).context("failed to build raster image")?;

    let mut options = load_options(config_path)?;
    options.invert_colors = invert;
    if let Some(tolerance) = tolerance {
        options.contour_detection.tolerance = tolerance;
    }
    if no_refine {
        options.refinement.enabled = false;
    }

    let metadata = DocumentMetadata {
        source: Some(input.display().to_string()),
        ..Default::default()
    };

    log::info!("starting conversion with options: {:?}", serde_json::to_string(&options).ok());
    let start = Instant::now();
    let result = convert(&raster, &options, Some(&metadata)).context("conversion failed")?;
    let elapsed = start.elapsed();
    log::info!(
        "conversion completed in {:.2}s: {} paths across {} layers",
        elapsed.as_secs_f64(),
        result.metadata.path_count,
        result.metadata.layer_count
    );

    fs::write(&output, result.document)
        .with_context(|| format!("failed to write document to: {}", output.display()))?;
    log::info!("document saved to: {}", output.display());
    Ok(())
}
