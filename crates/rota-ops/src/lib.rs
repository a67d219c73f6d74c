//! # rota-ops
//!
//! Canvas padding and arbitrary-angle rotation of RGB rasters.
//!
//! # Modules
//!
//! - [`pad`] - Border padding and the rotation-safe canvas padder
//! - [`rotation`] - The rotation transform shared by every kernel
//! - [`interp`] - Bilinear footprints and the edge-exclusion policy
//! - [`gather`] - Inverse-mapping rotation (the production kernel)
//! - [`scatter`] - Forward-mapping rotation with coverage diagnostics
//! - [`reference`] - General affine warp used as a baseline
//! - [`strategy`] - [`Resampler`] trait and [`Strategy`] selection
//! - [`compare`] - Pixel-wise difference statistics
//!
//! # Example
//!
//! ```rust
//! use rota_core::{RgbImage, Rgb8};
//! use rota_ops::{pad::pad_for_rotation, rotate, Strategy};
//!
//! let white = RgbImage::filled(4, 4, Rgb8::WHITE).unwrap();
//! let canvas = pad_for_rotation(&white).unwrap();
//! let turned = rotate(&canvas, 45.0, canvas.center(), Strategy::Gather).unwrap();
//!
//! assert_eq!(turned.dimensions(), (8, 8));
//! assert_eq!(turned.pixel(3, 3), Rgb8::WHITE);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - Run the kernels on the rayon thread pool

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod compare;
pub mod gather;
pub mod interp;
pub mod pad;
pub mod reference;
pub mod rotation;
pub mod scatter;
pub mod strategy;

pub use error::{OpsError, OpsResult};
pub use rotation::Rotation;
pub use strategy::{rotate, Resampler, Strategy};
