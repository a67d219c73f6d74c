//! Pad command - enlarge the canvas for rotation.

use crate::PadArgs;
use anyhow::Result;
use rota_ops::pad::pad_for_rotation;
use tracing::info;

pub fn run(args: PadArgs, verbose: bool) -> Result<()> {
    let input = super::load_image(&args.input)?;
    let padded = pad_for_rotation(&input)?;

    if verbose {
        println!(
            "{}x{} -> {}x{}",
            input.width(),
            input.height(),
            padded.width(),
            padded.height()
        );
    }

    super::save_image(&args.output, &padded, args.quality)?;
    info!(path = %args.output.display(), "saved");
    Ok(())
}
