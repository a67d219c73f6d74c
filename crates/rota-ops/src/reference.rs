//! Library-grade baseline: a general affine warp.
//!
//! The rotation is expressed as a 2x3 affine matrix in the usual
//! `center, angle, scale` form
//!
//! ```text
//! | a   b   (1 - a) * cx - b * cy |     a = scale * cos(angle)
//! | -b  a   b * cx + (1 - a) * cy |     b = scale * sin(angle)
//! ```
//!
//! and [`warp_affine`] resamples through its inverse with bilinear
//! interpolation. Neighbours that fall outside the source read as black, so
//! unlike the gather kernel the outermost rows and columns still contribute.
//! The result is close to [`crate::gather`] but not bit-identical.

use crate::rotation::Rotation;
use crate::strategy::Resampler;
use crate::{OpsError, OpsResult};
use glam::{DAffine2, DMat2, DVec2};
use rota_core::{Angle, Point, Rgb8, RgbAccum, RgbImage};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The reference warp as a [`Resampler`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Reference;

impl Resampler for Reference {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn resample(&self, src: &RgbImage, rotation: &Rotation) -> OpsResult<RgbImage> {
        rotate_reference(src, rotation.angle(), rotation.center())
    }
}

/// Builds the rotation matrix about `center`.
///
/// The matrix maps source coordinates to destination coordinates. A positive
/// angle turns the picture counter-clockwise on screen.
pub fn rotation_matrix(center: Point, angle: Angle, scale: f64) -> DAffine2 {
    let (sin, cos) = angle.sin_cos();
    let a = scale * cos;
    let b = scale * sin;
    let matrix2 = DMat2::from_cols(DVec2::new(a, -b), DVec2::new(b, a));
    let translation = DVec2::new(
        (1.0 - a) * center.x - b * center.y,
        b * center.x + (1.0 - a) * center.y,
    );
    DAffine2::from_mat2_translation(matrix2, translation)
}

/// Rotates `image` by `angle` degrees about `center` through [`warp_affine`].
///
/// The angle is negated before building the matrix so the picture turns the
/// same way as [`crate::gather::rotate_gather`].
pub fn rotate_reference(
    image: &RgbImage,
    angle: impl Into<Angle>,
    center: Point,
) -> OpsResult<RgbImage> {
    let angle = angle.into();
    let matrix = rotation_matrix(center, Angle::degrees(-angle.as_degrees()), 1.0);
    warp_affine(image, &matrix)
}

/// Applies `matrix` (source to destination) to `src`, keeping its size.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if the matrix is singular or not finite.
pub fn warp_affine(src: &RgbImage, matrix: &DAffine2) -> OpsResult<RgbImage> {
    let det = matrix.matrix2.determinant();
    if !det.is_finite() || det.abs() < 1e-12 || !matrix.translation.is_finite() {
        return Err(OpsError::InvalidParameter(format!(
            "affine matrix is not invertible (det = {det})"
        )));
    }
    let inverse = matrix.inverse();

    let (width, height) = src.dimensions();
    debug!(width, height, det, "affine warp");

    let mut dst = RgbImage::new(width, height)?;
    let stride = dst.row_stride();

    #[cfg(feature = "parallel")]
    dst.as_raw_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| warp_row(src, &inverse, y as u32, row));

    #[cfg(not(feature = "parallel"))]
    dst.as_raw_mut()
        .chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| warp_row(src, &inverse, y as u32, row));

    Ok(dst)
}

fn warp_row(src: &RgbImage, inverse: &DAffine2, y: u32, row: &mut [u8]) {
    for x in 0..src.width() {
        let p = inverse.transform_point2(DVec2::new(f64::from(x), f64::from(y)));
        if let Some(px) = sample_zero_border(src, p) {
            let idx = x as usize * 3;
            row[idx..idx + 3].copy_from_slice(&px.to_array());
        }
    }
}

/// Bilinear sample where out-of-range neighbours are black.
///
/// Returns `None` when all four neighbours are outside.
fn sample_zero_border(src: &RgbImage, p: DVec2) -> Option<Rgb8> {
    if !p.is_finite() {
        return None;
    }
    let (width, height) = src.dimensions();
    let x0 = p.x.floor();
    let y0 = p.y.floor();
    if x0 < -1.0 || y0 < -1.0 || x0 >= f64::from(width) || y0 >= f64::from(height) {
        return None;
    }

    let fx = (p.x - x0) as f32;
    let fy = (p.y - y0) as f32;
    let (x0, y0) = (x0 as i64, y0 as i64);
    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    let mut acc = RgbAccum::ZERO;
    for (tx, ty, w) in taps {
        if (0..i64::from(width)).contains(&tx) && (0..i64::from(height)).contains(&ty) {
            acc.add_weighted(src.pixel(tx as u32, ty as u32), w);
        }
    }
    Some(acc.narrow())
}
