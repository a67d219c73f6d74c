//! The 2D rotation transform shared by all resamplers.
//!
//! A [`Rotation`] fixes an angle and a center for the lifetime of one call
//! and precomputes `sin`/`cos`. It maps coordinates in both directions:
//!
//! ```text
//! inverse_map (destination -> source, used by gather):
//!   x' =  dx * cos + dy * sin + cx
//!   y' = -dx * sin + dy * cos + cy
//!
//! forward_map (source -> destination, used by scatter):
//!   x' =  dx * cos - dy * sin + cx
//!   y' =  dx * sin + dy * cos + cy
//!
//! where dx = x - cx, dy = y - cy
//! ```
//!
//! The two maps are exact inverses, so gather and scatter turn the picture
//! the same way. With rows growing downward, a positive angle turns the
//! picture clockwise on screen.

use rota_core::{Angle, Point, RgbImage};

/// Rotation by a fixed angle about a fixed center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    angle: Angle,
    center: Point,
    sin: f64,
    cos: f64,
}

impl Rotation {
    /// Creates a rotation by `angle` (degrees) about `center`.
    pub fn new(angle: impl Into<Angle>, center: Point) -> Self {
        let angle = angle.into();
        let (sin, cos) = angle.sin_cos();
        Self {
            angle,
            center,
            sin,
            cos,
        }
    }

    /// Creates a rotation about the centroid of `image`.
    pub fn about_center(angle: impl Into<Angle>, image: &RgbImage) -> Self {
        Self::new(angle, image.center())
    }

    /// The rotation angle.
    #[inline]
    pub fn angle(&self) -> Angle {
        self.angle
    }

    /// The fixed center.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// `(sin, cos)` of the angle.
    #[inline]
    pub fn sin_cos(&self) -> (f64, f64) {
        (self.sin, self.cos)
    }

    /// Maps a destination pixel to the source coordinate it samples.
    #[inline]
    pub fn inverse_map(&self, x: f64, y: f64) -> Point {
        let dx = x - self.center.x;
        let dy = y - self.center.y;
        Point::new(
            dx * self.cos + dy * self.sin + self.center.x,
            -dx * self.sin + dy * self.cos + self.center.y,
        )
    }

    /// Maps a source pixel to the destination coordinate it lands on.
    #[inline]
    pub fn forward_map(&self, x: f64, y: f64) -> Point {
        let dx = x - self.center.x;
        let dy = y - self.center.y;
        Point::new(
            dx * self.cos - dy * self.sin + self.center.x,
            dx * self.sin + dy * self.cos + self.center.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_center_is_fixed() {
        let c = Point::new(3.5, 2.0);
        let r = Rotation::new(73.0, c);
        let p = r.inverse_map(c.x, c.y);
        assert_abs_diff_eq!(p.x, c.x, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, c.y, epsilon = 1e-12);
    }

    #[test]
    fn test_maps_are_inverse() {
        let r = Rotation::new(-31.25, Point::new(10.0, 7.5));
        for &(x, y) in &[(0.0, 0.0), (19.0, 3.0), (4.25, 14.5)] {
            let fwd = r.forward_map(x, y);
            let back = r.inverse_map(fwd.x, fwd.y);
            assert_abs_diff_eq!(back.x, x, epsilon = 1e-9);
            assert_abs_diff_eq!(back.y, y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_quarter_turn_is_clockwise() {
        // the point right of center lands below it
        let r = Rotation::new(90.0, Point::new(0.0, 0.0));
        let p = r.forward_map(1.0, 0.0);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);

        // so the destination right of center samples from above
        let s = r.inverse_map(1.0, 0.0);
        assert_abs_diff_eq!(s.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_angle_is_identity() {
        let r = Rotation::new(0.0, Point::new(2.0, 2.0));
        assert_eq!(r.inverse_map(5.0, 1.0), Point::new(5.0, 1.0));
        assert_eq!(r.forward_map(5.0, 1.0), Point::new(5.0, 1.0));
    }

    #[test]
    fn test_preserves_distance() {
        let c = Point::new(4.0, 4.0);
        let r = Rotation::new(123.0, c);
        let p = r.forward_map(7.0, 1.0);
        assert_abs_diff_eq!(p.distance(c), Point::new(7.0, 1.0).distance(c), epsilon = 1e-12);
    }
}
