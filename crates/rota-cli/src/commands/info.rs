//! Image info command.
//!
//! Prints dimensions, the circumscribing radius and the padding a rotation
//! would add.

use crate::InfoArgs;
use anyhow::Result;
use rota_io::Format;
use rota_ops::pad::RotationPadding;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    for path in &args.input {
        let image = super::load_image(path)?;
        let format = Format::detect(path).unwrap_or(Format::Unknown);
        let padding = RotationPadding::for_size(image.width(), image.height())?;

        println!("{}", path.display());
        println!("  Format:     {}", format.name());
        println!("  Resolution: {}x{}", image.width(), image.height());
        println!("  Pixels:     {}", image.pixel_count());
        println!("  Radius:     {:.3}", padding.radius);
        println!(
            "  Padding:    {} rows, {} columns per side",
            padding.vertical, padding.horizontal
        );
        if let Some((w, h)) = padding.padded_size(image.width(), image.height()) {
            println!("  Canvas:     {w}x{h}");
        }
        if verbose {
            println!("  Center:     {}", image.center());
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}
