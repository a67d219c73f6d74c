//! Scatter (forward-mapping) rotation, the instructional strategy.
//!
//! Every source pixel is pushed through [`Rotation::forward_map`] and, if it
//! lands inside the edge policy, splatted onto the four surrounding
//! destination pixels with bilinear weights. Contributions are summed without
//! normalization and saturated once at the end.
//!
//! Because the rotated source lattice does not line up with the destination
//! grid, the total weight a destination pixel receives is not constant:
//!
//! - pixels with zero weight are *holes* and stay black
//! - pixels with weight above one are *overlaps* and come out brighter than
//!   the source
//!
//! [`rotate_scatter_with_coverage`] returns the per-pixel weights alongside
//! the image so callers can measure both artifacts.
//!
//! Source rows are cut into bands whose size depends only on the image
//! height. Each band splats into its own accumulator covering just the
//! destination rows it can reach, and the bands are summed into the frame
//! in band order. With the `parallel` feature, bands run on the rayon pool
//! a batch at a time; the summation order stays fixed, so the output is
//! bit-identical for any thread count.

use crate::interp::Footprint;
use crate::rotation::Rotation;
use crate::strategy::Resampler;
use crate::OpsResult;
use rota_core::{Angle, Point, Rgb8, RgbAccum, RgbImage};
use std::ops::Range;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Total weights above `1 + OVERLAP_EPSILON` count as overlaps.
pub const OVERLAP_EPSILON: f32 = 1e-3;

/// Upper bound on the number of source bands.
const MAX_BANDS: u32 = 16;

/// Bands are never thinner than this, so small images use a single band.
const MIN_BAND_ROWS: u32 = 32;

/// The scatter strategy as a [`Resampler`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Scatter;

impl Resampler for Scatter {
    fn name(&self) -> &'static str {
        "scatter"
    }

    fn resample(&self, src: &RgbImage, rotation: &Rotation) -> OpsResult<RgbImage> {
        Ok(scatter(src, rotation)?.image)
    }
}

/// Per-pixel sum of splat weights.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterCoverage {
    width: u32,
    height: u32,
    weights: Vec<f32>,
}

impl ScatterCoverage {
    /// Total weight received by `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn weight(&self, x: u32, y: u32) -> f32 {
        assert!(x < self.width && y < self.height, "coverage index out of bounds");
        self.weights[y as usize * self.width as usize + x as usize]
    }

    /// `true` if nothing was splatted onto `(x, y)`.
    pub fn is_hole(&self, x: u32, y: u32) -> bool {
        self.weight(x, y) == 0.0
    }

    /// Number of pixels that received no weight.
    pub fn holes(&self) -> usize {
        self.weights.iter().filter(|&&w| w == 0.0).count()
    }

    /// Number of pixels that received more than unit weight.
    pub fn overlaps(&self) -> usize {
        self.weights
            .iter()
            .filter(|&&w| w > 1.0 + OVERLAP_EPSILON)
            .count()
    }

    /// Coverage grid size.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Rotated image plus the coverage that produced it.
#[derive(Debug, Clone)]
pub struct ScatterOutput {
    /// The rotated image.
    pub image: RgbImage,
    /// Splat weights per destination pixel.
    pub coverage: ScatterCoverage,
}

/// Rotates `image` by `angle` degrees about `center` using forward mapping.
///
/// Expect holes and uneven brightness; see the module docs.
pub fn rotate_scatter(
    image: &RgbImage,
    angle: impl Into<Angle>,
    center: Point,
) -> OpsResult<RgbImage> {
    Ok(rotate_scatter_with_coverage(image, angle, center)?.image)
}

/// Like [`rotate_scatter`] but also returns the coverage.
pub fn rotate_scatter_with_coverage(
    image: &RgbImage,
    angle: impl Into<Angle>,
    center: Point,
) -> OpsResult<ScatterOutput> {
    scatter(image, &Rotation::new(angle, center))
}

/// Scatter with a prepared [`Rotation`].
pub fn scatter(src: &RgbImage, rotation: &Rotation) -> OpsResult<ScatterOutput> {
    let (width, height) = src.dimensions();
    debug!(
        width,
        height,
        angle = rotation.angle().as_degrees(),
        center = %rotation.center(),
        "scatter rotation"
    );

    let bands = bands(height);
    let mut frame = Accumulator::frame(width, height);

    #[cfg(feature = "parallel")]
    for batch in bands.chunks(rayon::current_num_threads().max(1)) {
        let partials: Vec<Accumulator> = batch
            .par_iter()
            .map(|rows| Accumulator::band(src, rotation, rows.clone()))
            .collect();
        for band in partials {
            frame.absorb(band);
        }
    }

    #[cfg(not(feature = "parallel"))]
    for rows in bands {
        frame.absorb(Accumulator::band(src, rotation, rows));
    }

    let output = frame.finish()?;
    debug!(
        holes = output.coverage.holes(),
        overlaps = output.coverage.overlaps(),
        "scatter coverage"
    );
    Ok(output)
}

/// Splits `0..height` into contiguous source bands.
fn bands(height: u32) -> Vec<Range<u32>> {
    let rows = height.div_ceil(MAX_BANDS).max(MIN_BAND_ROWS);
    (0..height)
        .step_by(rows as usize)
        .map(|start| start..(start + rows).min(height))
        .collect()
}

/// Destination rows that source rows `rows` can splat onto.
fn reach(rotation: &Rotation, width: u32, height: u32, rows: &Range<u32>) -> Range<u32> {
    let right = f64::from(width - 1);
    let top = f64::from(rows.start);
    let bottom = f64::from(rows.end - 1);
    let ys = [(0.0, top), (right, top), (0.0, bottom), (right, bottom)]
        .map(|(x, y)| rotation.forward_map(x, y).y);
    let lo = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // a footprint spans floor(y)..=floor(y) + 1; one extra row each side
    // absorbs rounding in the corner maps
    let limit = f64::from(height);
    let start = (lo.floor() - 1.0).clamp(0.0, limit) as u32;
    let end = (hi.floor() + 3.0).clamp(f64::from(start), limit) as u32;
    start..end
}

/// Wide sums and weights for a window of destination rows.
struct Accumulator {
    width: u32,
    height: u32,
    rows: Range<u32>,
    sums: Vec<RgbAccum>,
    weights: Vec<f32>,
}

impl Accumulator {
    fn new(width: u32, height: u32, rows: Range<u32>) -> Self {
        let len = width as usize * rows.len();
        Self {
            width,
            height,
            rows,
            sums: vec![RgbAccum::ZERO; len],
            weights: vec![0.0; len],
        }
    }

    /// Covers the whole `width x height` destination.
    fn frame(width: u32, height: u32) -> Self {
        Self::new(width, height, 0..height)
    }

    /// Splats source rows `rows` into a window sized to their reach.
    fn band(src: &RgbImage, rotation: &Rotation, rows: Range<u32>) -> Self {
        let (width, height) = src.dimensions();
        let mut acc = Self::new(width, height, reach(rotation, width, height, &rows));
        for y in rows {
            acc.splat_row(src, rotation, y);
        }
        acc
    }

    fn splat_row(&mut self, src: &RgbImage, rotation: &Rotation, y: u32) {
        for x in 0..src.width() {
            let p = rotation.forward_map(f64::from(x), f64::from(y));
            self.splat(p, src.pixel(x, y));
        }
    }

    fn splat(&mut self, p: Point, px: Rgb8) {
        let Some(fp) = Footprint::locate(p, self.width, self.height) else {
            return;
        };
        for ((x, y), w) in fp.cells().into_iter().zip(fp.weights) {
            debug_assert!(self.rows.contains(&y), "row {y} outside {:?}", self.rows);
            if !self.rows.contains(&y) {
                continue;
            }
            let i = (y - self.rows.start) as usize * self.width as usize + x as usize;
            self.sums[i].add_weighted(px, w);
            self.weights[i] += w;
        }
    }

    /// Adds a band's window onto the matching rows of `self`.
    fn absorb(&mut self, band: Self) {
        debug_assert!(
            band.rows.start >= self.rows.start && band.rows.end <= self.rows.end,
            "band {:?} outside {:?}",
            band.rows,
            self.rows
        );
        let offset = (band.rows.start - self.rows.start) as usize * self.width as usize;
        let len = band.sums.len();
        for (a, b) in self.sums[offset..offset + len].iter_mut().zip(band.sums) {
            *a += b;
        }
        for (a, b) in self.weights[offset..offset + len].iter_mut().zip(band.weights) {
            *a += b;
        }
    }

    fn finish(self) -> OpsResult<ScatterOutput> {
        debug_assert_eq!(self.rows, 0..self.height, "finish on a partial window");
        let data = self
            .sums
            .iter()
            .flat_map(|acc| acc.narrow().to_array())
            .collect();
        let image = RgbImage::from_raw(self.width, self.height, data)?;
        Ok(ScatterOutput {
            image,
            coverage: ScatterCoverage {
                width: self.width,
                height: self.height,
                weights: self.weights,
            },
        })
    }
}
