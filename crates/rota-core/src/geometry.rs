//! Rotation geometry: points and angles.
//!
//! Coordinates follow the raster convention: `x` is the column, `y` is the
//! row, and `y` grows downward. Angles are stored in degrees exactly as the
//! caller supplied them; `-30`, `390` and `30.5` are all meaningful and are
//! never normalized.

use std::fmt;
use std::str::FromStr;

/// A 2D point with floating-point coordinates (`x` = column, `y` = row).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Column coordinate.
    pub x: f64,
    /// Row coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Centroid of a `width x height` pixel grid: `((w - 1) / 2, (h - 1) / 2)`.
    ///
    /// Pixel centers sit on integer coordinates, so the centroid of an 8x8
    /// grid is `(3.5, 3.5)`.
    #[inline]
    pub fn centroid(width: u32, height: u32) -> Self {
        Self::new(
            (f64::from(width) - 1.0) / 2.0,
            (f64::from(height) - 1.0) / 2.0,
        )
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns `true` if both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Parses `"x,y"`.
impl FromStr for Point {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected 'x,y', got '{s}'"))?;
        let x = x
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid x '{}': {e}", x.trim()))?;
        let y = y
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid y '{}': {e}", y.trim()))?;
        Ok(Self::new(x, y))
    }
}

/// Signed rotation angle in degrees.
///
/// ```
/// use rota_core::Angle;
///
/// let a = Angle::degrees(180.0);
/// assert!((a.radians() - std::f64::consts::PI).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Angle(f64);

impl Angle {
    /// No rotation.
    pub const ZERO: Self = Self(0.0);

    /// Creates an angle from degrees.
    #[inline]
    pub const fn degrees(deg: f64) -> Self {
        Self(deg)
    }

    /// Returns the angle in degrees, as given.
    #[inline]
    pub const fn as_degrees(self) -> f64 {
        self.0
    }

    /// Returns the angle in radians.
    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Returns `(sin, cos)` of the angle.
    #[inline]
    pub fn sin_cos(self) -> (f64, f64) {
        self.radians().sin_cos()
    }
}

impl From<f64> for Angle {
    #[inline]
    fn from(deg: f64) -> Self {
        Self::degrees(deg)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_centroid() {
        assert_eq!(Point::centroid(8, 8), Point::new(3.5, 3.5));
        assert_eq!(Point::centroid(5, 3), Point::new(2.0, 1.0));
        assert_eq!(Point::centroid(1, 1), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_point_parse() {
        let p: Point = "3.5, -2".parse().unwrap();
        assert_eq!(p, Point::new(3.5, -2.0));
        assert!("3.5".parse::<Point>().is_err());
        assert!("a,b".parse::<Point>().is_err());
    }

    #[test]
    fn test_angle_not_normalized() {
        assert_eq!(Angle::degrees(-45.0).as_degrees(), -45.0);
        assert_eq!(Angle::degrees(720.0).as_degrees(), 720.0);
    }

    #[test]
    fn test_angle_sin_cos() {
        let (s, c) = Angle::degrees(90.0).sin_cos();
        assert_abs_diff_eq!(s, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c, 0.0, epsilon = 1e-12);

        let (s, c) = Angle::degrees(-30.0).sin_cos();
        assert_abs_diff_eq!(s, -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(c, 3f64.sqrt() / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_distance() {
        assert_abs_diff_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
