//! Bilinear footprints with strict edge exclusion.
//!
//! A [`Footprint`] is the 2x2 cell of integer pixels surrounding a
//! fractional coordinate together with the four bilinear weights. Gather
//! reads through it, scatter writes through it.
//!
//! # Edge Policy
//!
//! A coordinate is usable only if it lies strictly inside the open box
//! `0 < x < width - 1`, `0 < y < height - 1`. Anything on or beyond those
//! bounds yields no footprint and the caller leaves the pixel alone. This is
//! an exclusion, not a clamp: samples are never pulled in from the edge, and
//! because `x < width - 1` the `ix + 1` / `iy + 1` neighbours are always in
//! range. Non-finite coordinates fail every comparison and are excluded too.

use rota_core::{Point, Rgb8, RgbAccum, RgbImage};

/// Bilinear weights for fractional offsets `(fx, fy)` within a cell.
///
/// Order: `(ix, iy)`, `(ix + 1, iy)`, `(ix, iy + 1)`, `(ix + 1, iy + 1)`.
/// For `fx, fy` in `[0, 1]` the weights are non-negative and sum to 1.
#[inline]
pub fn bilinear_weights(fx: f64, fy: f64) -> [f64; 4] {
    [
        (1.0 - fx) * (1.0 - fy),
        fx * (1.0 - fy),
        (1.0 - fx) * fy,
        fx * fy,
    ]
}

/// Returns `true` if `p` passes the strict edge-exclusion test.
#[inline]
pub fn is_interior(p: Point, width: u32, height: u32) -> bool {
    p.x > 0.0 && p.y > 0.0 && p.x < f64::from(width) - 1.0 && p.y < f64::from(height) - 1.0
}

/// A 2x2 pixel cell and its interpolation weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// Column of the top-left pixel (`floor(x)`).
    pub ix: u32,
    /// Row of the top-left pixel (`floor(y)`).
    pub iy: u32,
    /// Weights in [`bilinear_weights`] order.
    pub weights: [f32; 4],
}

impl Footprint {
    /// Locates the cell around `p` in a `width x height` grid.
    ///
    /// Returns `None` if `p` is excluded by the edge policy.
    #[inline]
    pub fn locate(p: Point, width: u32, height: u32) -> Option<Self> {
        if !is_interior(p, width, height) {
            return None;
        }
        let fx0 = p.x.floor();
        let fy0 = p.y.floor();
        let w = bilinear_weights(p.x - fx0, p.y - fy0);
        Some(Self {
            ix: fx0 as u32,
            iy: fy0 as u32,
            weights: [w[0] as f32, w[1] as f32, w[2] as f32, w[3] as f32],
        })
    }

    /// The four pixel coordinates in weight order.
    #[inline]
    pub fn cells(&self) -> [(u32, u32); 4] {
        let (x, y) = (self.ix, self.iy);
        [(x, y), (x + 1, y), (x, y + 1), (x + 1, y + 1)]
    }

    /// Blends the four source pixels.
    #[inline]
    pub fn sample(&self, src: &RgbImage) -> Rgb8 {
        let mut acc = RgbAccum::ZERO;
        for ((x, y), w) in self.cells().into_iter().zip(self.weights) {
            acc.add_weighted(src.pixel(x, y), w);
        }
        acc.narrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_weights_sum_to_one() {
        for i in 0..=20 {
            for j in 0..=20 {
                let w = bilinear_weights(i as f64 / 20.0, j as f64 / 20.0);
                assert_abs_diff_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
                assert!(w.iter().all(|&v| v >= 0.0));
            }
        }
    }

    #[test]
    fn test_weights_at_corners() {
        assert_eq!(bilinear_weights(0.0, 0.0), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(bilinear_weights(1.0, 0.0), [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(bilinear_weights(0.0, 1.0), [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(bilinear_weights(0.5, 0.5), [0.25; 4]);
    }

    #[test]
    fn test_edges_are_excluded() {
        // 5x4 grid: x in (0, 4), y in (0, 3)
        assert!(is_interior(Point::new(0.001, 1.0), 5, 4));
        assert!(!is_interior(Point::new(0.0, 1.0), 5, 4));
        assert!(!is_interior(Point::new(1.0, 0.0), 5, 4));
        assert!(!is_interior(Point::new(4.0, 1.0), 5, 4));
        assert!(is_interior(Point::new(3.999, 2.999), 5, 4));
        assert!(!is_interior(Point::new(1.0, 3.0), 5, 4));
        assert!(!is_interior(Point::new(f64::NAN, 1.0), 5, 4));
        assert!(!is_interior(Point::new(1.0, f64::INFINITY), 5, 4));
    }

    #[test]
    fn test_tiny_grids_have_no_interior() {
        assert!(!is_interior(Point::new(0.5, 0.5), 1, 1));
        assert!(Footprint::locate(Point::new(0.5, 0.5), 1, 5).is_none());
    }

    #[test]
    fn test_locate_and_cells() {
        let fp = Footprint::locate(Point::new(2.25, 1.75), 6, 6).unwrap();
        assert_eq!((fp.ix, fp.iy), (2, 1));
        assert_eq!(fp.cells(), [(2, 1), (3, 1), (2, 2), (3, 2)]);
        assert_abs_diff_eq!(fp.weights[0], 0.75 * 0.25);
        assert_abs_diff_eq!(fp.weights[3], 0.25 * 0.75);
    }

    #[test]
    fn test_sample_blends() {
        let src = RgbImage::from_fn(4, 4, |x, _| if x < 2 { Rgb8::BLACK } else { Rgb8::gray(200) })
            .unwrap();
        let fp = Footprint::locate(Point::new(1.25, 1.5), 4, 4).unwrap();
        // a quarter of the way from black (x=1) to gray (x=2)
        assert_eq!(fp.sample(&src), Rgb8::gray(50));
    }

    #[test]
    fn test_sample_integer_coordinate_is_exact() {
        let src = RgbImage::from_fn(5, 5, |x, y| Rgb8::new(x as u8 * 10, y as u8 * 10, 7)).unwrap();
        let fp = Footprint::locate(Point::new(3.0, 2.0), 5, 5).unwrap();
        assert_eq!(fp.sample(&src), Rgb8::new(30, 20, 7));
    }
}
