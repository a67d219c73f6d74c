//! Pixel types for 8-bit RGB rasters.
//!
//! # Types
//!
//! - [`Rgb8`] - Three 8-bit channels, the storage format of [`crate::RgbImage`]
//! - [`RgbAccum`] - Three `f32` channels used while blending
//!
//! # Wide Arithmetic
//!
//! Interpolation multiplies channels by fractional weights and sums several
//! contributions. Doing that in `u8` truncates each term and wraps on
//! overflow, so every weighted operation produces an [`RgbAccum`]. The result
//! is narrowed once, at the end, by [`RgbAccum::narrow`], which rounds and
//! saturates to `[0, 255]`.
//!
//! ```
//! use rota_core::{Rgb8, RgbAccum};
//!
//! let mut acc = RgbAccum::ZERO;
//! acc += Rgb8::WHITE * 0.75;
//! acc += Rgb8::WHITE * 0.75; // over-accumulated on purpose
//! assert_eq!(acc.narrow(), Rgb8::WHITE); // saturates, no wraparound
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Mul};

/// 8-bit RGB pixel.
///
/// Uses `#[repr(C)]` for predictable layout: `[R, G, B]`.
#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel value.
    pub r: u8,
    /// Green channel value.
    pub g: u8,
    /// Blue channel value.
    pub b: u8,
}

impl Rgb8 {
    /// Black, the background value of padded and rotated buffers.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a new RGB pixel.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a grayscale pixel with equal RGB values.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    /// Get RGB values as an array.
    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(arr: [u8; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Returns `true` if all channels are zero.
    #[inline]
    pub const fn is_black(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Widens to an accumulator without scaling.
    #[inline]
    pub fn widen(self) -> RgbAccum {
        RgbAccum::new(f32::from(self.r), f32::from(self.g), f32::from(self.b))
    }

    /// Largest per-channel absolute difference to `other`.
    #[inline]
    pub fn max_channel_diff(self, other: Self) -> u8 {
        self.r
            .abs_diff(other.r)
            .max(self.g.abs_diff(other.g))
            .max(self.b.abs_diff(other.b))
    }
}

impl fmt::Debug for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb8({}, {}, {})", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb8 {
    #[inline]
    fn from(arr: [u8; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Rgb8> for [u8; 3] {
    #[inline]
    fn from(px: Rgb8) -> Self {
        px.to_array()
    }
}

/// Scaling a pixel by a fractional weight yields a wide accumulator.
impl Mul<f32> for Rgb8 {
    type Output = RgbAccum;

    #[inline]
    fn mul(self, weight: f32) -> RgbAccum {
        self.widen() * weight
    }
}

/// Wide RGB accumulator for weighted sums.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RgbAccum {
    /// Red sum.
    pub r: f32,
    /// Green sum.
    pub g: f32,
    /// Blue sum.
    pub b: f32,
}

impl RgbAccum {
    /// Empty accumulator.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create an accumulator from channel sums.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Adds `px * weight` to the accumulator.
    #[inline]
    pub fn add_weighted(&mut self, px: Rgb8, weight: f32) {
        *self += px * weight;
    }

    /// Rounds and saturates each channel to `[0, 255]`.
    #[inline]
    pub fn narrow(self) -> Rgb8 {
        Rgb8::new(saturate(self.r), saturate(self.g), saturate(self.b))
    }
}

impl Add for RgbAccum {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for RgbAccum {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl Mul<f32> for RgbAccum {
    type Output = Self;

    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s)
    }
}

#[inline]
fn saturate(v: f32) -> u8 {
    // NaN maps to 0 through the float-to-int cast
    v.round().clamp(0.0, 255.0) as u8
}
