//! Compare command - run every strategy on one input.
//!
//! Gather and scatter are measured against the reference warp; scatter also
//! reports how many destination pixels it missed or over-filled.

use crate::CompareArgs;
use anyhow::{Context, Result};
use rota_core::RgbImage;
use rota_ops::compare::diff;
use rota_ops::pad::pad_for_rotation;
use rota_ops::scatter::scatter;
use rota_ops::{Rotation, Strategy};
use std::time::Instant;
use tracing::debug;

pub fn run(args: CompareArgs, verbose: bool) -> Result<()> {
    let input = super::load_image(&args.input)?;
    let canvas = pad_for_rotation(&input)?;
    let rotation = Rotation::about_center(args.angle, &canvas);

    let gathered = timed(Strategy::Gather, &canvas, &rotation)?;
    let reference = timed(Strategy::Reference, &canvas, &rotation)?;
    let scattered = scatter(&canvas, &rotation)?;

    let gather_stats = diff(&gathered, &reference)?;
    let scatter_stats = diff(&scattered.image, &reference)?;

    println!(
        "{} on {}x{} canvas",
        rotation.angle(),
        canvas.width(),
        canvas.height()
    );
    println!("  gather  vs reference: {gather_stats}");
    println!("  scatter vs reference: {scatter_stats}");
    println!(
        "  scatter coverage:     {} holes, {} overlaps",
        scattered.coverage.holes(),
        scattered.coverage.overlaps()
    );

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        for (name, image) in [
            ("gather", &gathered),
            ("scatter", &scattered.image),
            ("reference", &reference),
        ] {
            let path = dir.join(format!("{name}.png"));
            super::save_image(&path, image, 90)?;
            if verbose {
                println!("Saved: {}", path.display());
            }
        }
    }
    Ok(())
}

fn timed(strategy: Strategy, canvas: &RgbImage, rotation: &Rotation) -> Result<RgbImage> {
    let resampler = strategy.resampler();
    let start = Instant::now();
    let out = resampler.resample(canvas, rotation)?;
    debug!(
        strategy = resampler.name(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "resampled"
    );
    Ok(out)
}
