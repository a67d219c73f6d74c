//! Error types for rota-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of buffer handling:
//! - Construction of an image with unusable dimensions
//! - Raw data whose length does not match the dimensions
//! - Operations on two images of different sizes
//!
//! # Usage
//!
//! ```rust
//! use rota_core::{Error, RgbImage};
//!
//! let err = RgbImage::new(0, 10).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or accessing image buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Width or height is zero, or the buffer size would overflow.
    ///
    /// This is the "invalid image" failure: callers must not receive a
    /// degenerate buffer.
    #[error("invalid image: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// Raw sample buffer length does not match `width * height * 3`.
    #[error("buffer length mismatch: expected {expected} bytes, got {got}")]
    BufferMismatch {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        got: usize,
    },

    /// Two images that must match in size do not.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First image width
        a_width: u32,
        /// First image height
        a_height: u32,
        /// Second image width
        b_width: u32,
        /// Second image height
        b_height: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Returns `true` if this error means the image itself is unusable.
    #[inline]
    pub fn is_invalid_image(&self) -> bool {
        matches!(self, Self::InvalidDimensions { .. } | Self::BufferMismatch { .. })
    }
}
