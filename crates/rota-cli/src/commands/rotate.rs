//! Rotate command - one-shot rotation by an arbitrary angle.

use crate::RotateArgs;
use anyhow::{Result, bail};
use rota_core::Angle;
use rota_ops::{pad::pad_for_rotation, rotate};
use std::time::Instant;
use tracing::{debug, info};

pub fn run(args: RotateArgs, verbose: bool) -> Result<()> {
    if args.repeat == 0 {
        bail!("--repeat must be at least 1");
    }

    let input = super::load_image(&args.input)?;
    info!(
        path = %args.input.display(),
        width = input.width(),
        height = input.height(),
        "loaded"
    );

    let mut current = if args.no_pad {
        input
    } else {
        pad_for_rotation(&input)?
    };
    let center = args.center.unwrap_or_else(|| current.center());

    if verbose {
        println!("Canvas:   {}x{}", current.width(), current.height());
        println!(
            "Rotation: {} about {center} ({})",
            Angle::degrees(args.angle),
            args.strategy
        );
    }

    let start = Instant::now();
    for i in 0..args.repeat {
        current = rotate(&current, args.angle, center, args.strategy)?;
        debug!(iteration = i + 1, "rotated");
    }
    info!(
        strategy = %args.strategy,
        repeat = args.repeat,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "rotation done"
    );

    super::save_image(&args.output, &current, args.quality)?;
    if verbose {
        println!("Saved: {}", args.output.display());
    }
    Ok(())
}
