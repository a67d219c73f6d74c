//! # rota-core
//!
//! Core types for arbitrary-angle raster rotation.
//!
//! This crate provides the foundational types used throughout the rota workspace:
//!
//! - [`RgbImage`] - Owned row-major 8-bit RGB buffer
//! - [`Rgb8`], [`RgbAccum`] - Narrow pixel and its wide accumulator
//! - [`Point`], [`Angle`] - Rotation geometry
//! - [`Error`] - Failure modes for buffer construction and access
//!
//! ## Crate Structure
//!
//! ```text
//! rota-core (this crate)
//!    ^
//!    |
//!    +-- rota-io (PNG/JPEG decode and encode)
//!    +-- rota-ops (padding, gather/scatter rotation)
//!    +-- rota-cli (the `rota` binary)
//! ```
//!
//! ## Ownership
//!
//! Every transformation in the workspace allocates a fresh [`RgbImage`] and
//! hands it back by value. The previous buffer is dropped when its owner
//! reassigns, so there is never aliasing between the input and the output of
//! a single operation.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod geometry;
pub mod image;
pub mod pattern;
pub mod pixel;

pub use error::{Error, Result};
pub use geometry::{Angle, Point};
pub use image::RgbImage;
pub use pixel::{Rgb8, RgbAccum};

/// Prelude module for convenient imports.
///
/// ```
/// use rota_core::prelude::*;
///
/// let img = RgbImage::filled(4, 4, Rgb8::WHITE).unwrap();
/// assert_eq!(img.center(), Point::new(1.5, 1.5));
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Angle, Point};
    pub use crate::image::RgbImage;
    pub use crate::pixel::{Rgb8, RgbAccum};
}
