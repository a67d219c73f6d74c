//! Synthetic test images.
//!
//! Used by tests, benchmarks and the `compare` command when no file is at hand.

use crate::{Result, Rgb8, RgbImage};

/// Diagonal RGB gradient: red follows the column, green the row, blue both.
///
/// Every pixel of images up to 256x256 gets a distinct red/green pair, which
/// makes misplaced samples easy to spot.
pub fn gradient(width: u32, height: u32) -> Result<RgbImage> {
    let sx = 255.0 / (width.max(2) - 1) as f32;
    let sy = 255.0 / (height.max(2) - 1) as f32;
    RgbImage::from_fn(width, height, |x, y| {
        let r = (x as f32 * sx).round() as u8;
        let g = (y as f32 * sy).round() as u8;
        let b = ((x + y) as f32 * 0.5 * (sx + sy) * 0.5).round().min(255.0) as u8;
        Rgb8::new(r, g, b)
    })
}

/// Checkerboard of `cell`-sized squares alternating between `a` and `b`.
pub fn checker(width: u32, height: u32, cell: u32, a: Rgb8, b: Rgb8) -> Result<RgbImage> {
    let cell = cell.max(1);
    RgbImage::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 { a } else { b }
    })
}
