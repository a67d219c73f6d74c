//! Pixel-wise image comparison.

use crate::OpsResult;
use rota_core::RgbImage;
use std::fmt;

/// Absolute channel differences between two images.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DiffStats {
    /// Mean absolute difference over all channels of all pixels.
    pub mean_abs: f64,
    /// Largest absolute difference of any channel.
    pub max_abs: u8,
    /// Pixels where at least one channel differs.
    pub differing: usize,
    /// Total pixels compared.
    pub pixels: usize,
}

impl DiffStats {
    /// `true` if no channel differs by more than `tolerance`.
    pub fn within(&self, tolerance: u8) -> bool {
        self.max_abs <= tolerance
    }

    /// Fraction of pixels that differ, in `[0, 1]`.
    pub fn differing_ratio(&self) -> f64 {
        if self.pixels == 0 {
            0.0
        } else {
            self.differing as f64 / self.pixels as f64
        }
    }
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean {:.3}, max {}, {} of {} pixels differ ({:.2}%)",
            self.mean_abs,
            self.max_abs,
            self.differing,
            self.pixels,
            self.differing_ratio() * 100.0
        )
    }
}

/// Compares two images of the same size.
///
/// # Errors
///
/// Fails with a dimension mismatch if the sizes differ.
pub fn diff(a: &RgbImage, b: &RgbImage) -> OpsResult<DiffStats> {
    a.ensure_same_size(b)?;

    let mut total: u64 = 0;
    let mut max_abs = 0u8;
    let mut differing = 0usize;

    for ((_, _, pa), (_, _, pb)) in a.pixels().zip(b.pixels()) {
        total += pa
            .to_array()
            .iter()
            .zip(pb.to_array())
            .map(|(&ca, cb)| u64::from(ca.abs_diff(cb)))
            .sum::<u64>();
        let d = pa.max_channel_diff(pb);
        max_abs = max_abs.max(d);
        differing += usize::from(d != 0);
    }

    let pixels = a.pixel_count();
    Ok(DiffStats {
        mean_abs: total as f64 / (pixels * 3) as f64,
        max_abs,
        differing,
        pixels,
    })
}
