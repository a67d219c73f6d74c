//! rota - arbitrary-angle image rotation CLI
//!
//! Pads an image so it can turn freely, rotates it with a selectable
//! resampling strategy, and compares the strategies against each other.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rota_core::Point;
use rota_ops::Strategy;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod prompt;
mod session;

use session::LoopMode;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "ROTA_LOG";

#[derive(Parser)]
#[command(name = "rota")]
#[command(author, version, about = "Arbitrary-angle image rotation")]
#[command(long_about = "
Rotates PNG and JPEG images about an arbitrary center without losing the
corners: the canvas is first padded to the circumscribing circle, then
resampled with bilinear interpolation.

Examples:
  rota info photo.png                     # Size, radius and padding
  rota pad photo.png -o padded.png        # Padding only
  rota rotate photo.png -o out.png -a 30  # One rotation (gather)
  rota rotate photo.png -o out.png -a 30 --strategy scatter
  rota spin photo.png --frames frames/    # Interactive session
  rota spin photo.png -a 5 --iterations 72 --no-wait --frames frames/
  rota compare photo.png -a 45 --output-dir cmp/
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image size and rotation padding
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Pad the canvas for rotation without rotating
    Pad(PadArgs),

    /// Rotate an image once (or a fixed number of times)
    #[command(visible_alias = "r")]
    Rotate(RotateArgs),

    /// Interactive session: prompt for angles and show every stage
    Spin(SpinArgs),

    /// Run every strategy on the same input and report differences
    #[command(visible_alias = "cmp")]
    Compare(CompareArgs),
}

/// Arguments for the `info` command.
#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

/// Arguments for the `pad` command.
#[derive(Args)]
struct PadArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value = "90")]
    quality: u8,
}

/// Arguments for the `rotate` command.
#[derive(Args)]
struct RotateArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Rotation angle in degrees (clockwise on screen)
    #[arg(short, long, allow_negative_numbers = true)]
    angle: f64,

    /// Resampling strategy: gather, scatter, reference
    #[arg(short, long, default_value = "gather")]
    strategy: Strategy,

    /// Rotation center as x,y in canvas pixels (default: canvas center)
    #[arg(short, long, allow_hyphen_values = true)]
    center: Option<Point>,

    /// Rotate the input as is, without padding first
    #[arg(long)]
    no_pad: bool,

    /// Apply the rotation this many times, each to the previous result
    #[arg(short = 'n', long, default_value = "1")]
    repeat: u32,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value = "90")]
    quality: u8,
}

/// Arguments for the `spin` command.
#[derive(Args)]
struct SpinArgs {
    /// Input image
    input: PathBuf,

    /// Angle in degrees; prompted for when omitted
    #[arg(short, long, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// After each rotation: repeat the same angle or prompt again
    #[arg(short, long = "loop", value_enum, default_value_t = LoopMode::Repeat)]
    loop_mode: LoopMode,

    /// Stop after this many rotations
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    iterations: Option<u32>,

    /// Directory receiving every presented frame as PNG
    #[arg(short, long)]
    frames: Option<PathBuf>,

    /// Do not wait for Enter between frames
    #[arg(long)]
    no_wait: bool,

    /// Resampling strategy: gather, scatter, reference
    #[arg(short, long, default_value = "gather")]
    strategy: Strategy,

    /// Rotation center as x,y in canvas pixels (default: canvas center)
    #[arg(short, long, allow_hyphen_values = true)]
    center: Option<Point>,

    /// Rotate the input as is, without padding first
    #[arg(long)]
    no_pad: bool,

    /// Save the final image here
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Arguments for the `compare` command.
#[derive(Args)]
struct CompareArgs {
    /// Input image
    input: PathBuf,

    /// Rotation angle in degrees
    #[arg(short, long, allow_negative_numbers = true)]
    angle: f64,

    /// Directory for gather.png, scatter.png and reference.png
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Must outlive every log call
    let _guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Pad(args) => commands::pad::run(args, cli.verbose),
        Commands::Rotate(args) => commands::rotate::run(args, cli.verbose),
        Commands::Spin(args) => commands::spin::run(args, cli.verbose),
        Commands::Compare(args) => commands::compare::run(args, cli.verbose),
    }
}

/// Installs the global subscriber.
///
/// `ROTA_LOG` overrides the level chosen by `--verbose`.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}
