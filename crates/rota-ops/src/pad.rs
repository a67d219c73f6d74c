//! Border padding.
//!
//! - [`pad`] - Add explicit borders of a fill color
//! - [`pad_for_rotation`] - Enlarge the canvas so no content leaves the frame
//!   under any rotation about its center
//!
//! # Rotation Padding
//!
//! For an `H x W` image the circumscribing radius is
//! `R = sqrt((H/2)^2 + (W/2)^2)`. The padder adds
//! `ceil(R - H/2) + 1` black rows above and below, and
//! `ceil(R - W/2) + 1` black columns left and right. The extra row/column on
//! each side keeps the rotated content clear of the one-pixel band that the
//! rotation kernels exclude at the frame edge.
//!
//! ```rust
//! use rota_core::{RgbImage, Rgb8};
//! use rota_ops::pad::{pad_for_rotation, RotationPadding};
//!
//! let white = RgbImage::filled(4, 4, Rgb8::WHITE).unwrap();
//! let padding = RotationPadding::for_size(4, 4).unwrap();
//! assert_eq!((padding.vertical, padding.horizontal), (2, 2));
//!
//! let padded = pad_for_rotation(&white).unwrap();
//! assert_eq!(padded.dimensions(), (8, 8));
//! ```

use crate::{OpsError, OpsResult};
use rota_core::{Rgb8, RgbImage};
use tracing::debug;

/// Border widths in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    /// Rows added above.
    pub top: u32,
    /// Columns added on the right.
    pub right: u32,
    /// Rows added below.
    pub bottom: u32,
    /// Columns added on the left.
    pub left: u32,
}

impl Padding {
    /// `vertical` rows above and below, `horizontal` columns left and right.
    pub const fn symmetric(vertical: u32, horizontal: u32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Output size for a `width x height` input, or `None` on overflow.
    pub fn output_size(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        let w = width.checked_add(self.left)?.checked_add(self.right)?;
        let h = height.checked_add(self.top)?.checked_add(self.bottom)?;
        Some((w, h))
    }
}

/// Padding that keeps a `width x height` image inside the frame under rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationPadding {
    /// Circumscribing-circle radius of the original image.
    pub radius: f64,
    /// Rows added above and below.
    pub vertical: u32,
    /// Columns added left and right.
    pub horizontal: u32,
}

impl RotationPadding {
    /// Computes the padding for an image of the given size.
    ///
    /// # Errors
    ///
    /// Zero width or height is an invalid image.
    pub fn for_size(width: u32, height: u32) -> OpsResult<Self> {
        if width == 0 || height == 0 {
            return Err(rota_core::Error::invalid_dimensions(
                width,
                height,
                "cannot pad an empty image",
            )
            .into());
        }

        let half_h = f64::from(height) / 2.0;
        let half_w = f64::from(width) / 2.0;
        let radius = half_h.hypot(half_w);

        let vertical = margin(radius, half_h)?;
        let horizontal = margin(radius, half_w)?;

        Ok(Self {
            radius,
            vertical,
            horizontal,
        })
    }

    /// The equivalent four-sided [`Padding`].
    pub fn as_padding(&self) -> Padding {
        Padding::symmetric(self.vertical, self.horizontal)
    }

    /// Size of the padded canvas: `(W + 2*horizontal, H + 2*vertical)`.
    pub fn padded_size(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        self.as_padding().output_size(width, height)
    }
}

/// `ceil(radius - half) + 1`
fn margin(radius: f64, half: f64) -> OpsResult<u32> {
    let m = (radius - half).ceil() + 1.0;
    if !(0.0..=f64::from(u32::MAX)).contains(&m) {
        return Err(OpsError::InvalidParameter(format!(
            "padding margin {m} out of range"
        )));
    }
    Ok(m as u32)
}

/// Pads an image with borders of `fill`.
///
/// # Errors
///
/// Fails if the padded size does not fit in `u32` or the buffer size
/// overflows.
pub fn pad(image: &RgbImage, padding: Padding, fill: Rgb8) -> OpsResult<RgbImage> {
    let (width, height) = image.dimensions();
    let (new_w, new_h) = padding.output_size(width, height).ok_or_else(|| {
        rota_core::Error::invalid_dimensions(width, height, "padded size overflows")
    })?;

    let mut dst = RgbImage::filled(new_w, new_h, fill)?;

    // copy source rows into the inner region
    let row_bytes = image.row_stride();
    let left_bytes = padding.left as usize * 3;
    for y in 0..height {
        let dst_row = dst.row_mut(y + padding.top);
        dst_row[left_bytes..left_bytes + row_bytes].copy_from_slice(image.row(y));
    }

    Ok(dst)
}

/// Pads an image with black so it can be rotated about its center by any
/// angle without clipping.
pub fn pad_for_rotation(image: &RgbImage) -> OpsResult<RgbImage> {
    let padding = RotationPadding::for_size(image.width(), image.height())?;
    let padded = pad(image, padding.as_padding(), Rgb8::BLACK)?;

    debug!(
        width = image.width(),
        height = image.height(),
        radius = padding.radius,
        vertical = padding.vertical,
        horizontal = padding.horizontal,
        padded_width = padded.width(),
        padded_height = padded.height(),
        "padded canvas for rotation"
    );

    Ok(padded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rotation_padding_square() {
        let p = RotationPadding::for_size(4, 4).unwrap();
        assert_abs_diff_eq!(p.radius, 8f64.sqrt(), epsilon = 1e-12);
        assert_eq!(p.vertical, 2);
        assert_eq!(p.horizontal, 2);
        assert_eq!(p.padded_size(4, 4), Some((8, 8)));
    }

    #[test]
    fn test_rotation_padding_wide() {
        // 200 wide, 50 tall: R = sqrt(25^2 + 100^2) = 103.08
        let p = RotationPadding::for_size(200, 50).unwrap();
        assert_eq!(p.vertical, 80);
        assert_eq!(p.horizontal, 5);
        assert_eq!(p.padded_size(200, 50), Some((210, 210)));
    }

    #[test]
    fn test_rotation_padding_single_pixel() {
        // R = sqrt(0.5) = 0.707, ceil(0.207) + 1 = 2
        let p = RotationPadding::for_size(1, 1).unwrap();
        assert_eq!((p.vertical, p.horizontal), (2, 2));
    }

    #[test]
    fn test_rotation_padding_rejects_empty() {
        let err = RotationPadding::for_size(0, 10).unwrap_err();
        assert!(matches!(err, OpsError::Image(ref e) if e.is_invalid_image()));
    }

    #[test]
    fn test_pad_places_content() {
        let src = RgbImage::filled(2, 2, Rgb8::WHITE).unwrap();
        let padding = Padding {
            top: 1,
            right: 3,
            bottom: 2,
            left: 0,
        };
        let dst = pad(&src, padding, Rgb8::gray(7)).unwrap();

        assert_eq!(dst.dimensions(), (5, 5));
        assert_eq!(dst.pixel(0, 0), Rgb8::gray(7));
        assert_eq!(dst.pixel(0, 1), Rgb8::WHITE);
        assert_eq!(dst.pixel(1, 2), Rgb8::WHITE);
        assert_eq!(dst.pixel(2, 1), Rgb8::gray(7));
        assert_eq!(dst.pixel(0, 3), Rgb8::gray(7));
    }

    #[test]
    fn test_pad_for_rotation_white_square() {
        let src = RgbImage::filled(4, 4, Rgb8::WHITE).unwrap();
        let dst = pad_for_rotation(&src).unwrap();

        assert_eq!(dst.dimensions(), (8, 8));
        for (x, y, px) in dst.pixels() {
            let inside = (2..6).contains(&x) && (2..6).contains(&y);
            assert_eq!(px, if inside { Rgb8::WHITE } else { Rgb8::BLACK }, "at ({x}, {y})");
        }
    }

    #[test]
    fn test_pad_overflow() {
        let src = RgbImage::new(1, 1).unwrap();
        let err = pad(&src, Padding::symmetric(u32::MAX, u32::MAX), Rgb8::BLACK).unwrap_err();
        assert!(matches!(err, OpsError::Image(_)));
    }
}
