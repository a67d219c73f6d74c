//! Owned 8-bit RGB image buffer.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, three
//! interleaved bytes per pixel:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! The raw buffer is exactly `width * height * 3` bytes, so a row is the
//! slice `[y * width * 3 .. (y + 1) * width * 3]`. Row slices are what the
//! parallel rotation kernels hand out to workers.
//!
//! # Usage
//!
//! ```rust
//! use rota_core::{RgbImage, Rgb8};
//!
//! let mut img = RgbImage::new(16, 8).unwrap();
//! img.set_pixel(3, 2, Rgb8::WHITE);
//! assert_eq!(img.pixel(3, 2), Rgb8::WHITE);
//! assert_eq!(img.pixel(0, 0), Rgb8::BLACK);
//! ```

use crate::{Error, Point, Result, Rgb8};

/// Bytes per pixel.
pub const CHANNELS: usize = 3;

/// Owned row-major RGB8 buffer with non-zero dimensions.
///
/// A constructed `RgbImage` always has `width > 0` and `height > 0`; every
/// constructor rejects zero dimensions with [`Error::InvalidDimensions`].
#[derive(Clone, PartialEq, Eq)]
pub struct RgbImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

/// Validates dimensions and returns the buffer length in bytes.
fn buffer_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be > 0",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
}

impl RgbImage {
    /// Creates a black image.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
        })
    }

    /// Creates an image filled with one pixel value.
    pub fn filled(width: u32, height: u32, pixel: Rgb8) -> Result<Self> {
        let mut img = Self::new(width, height)?;
        img.fill(pixel);
        Ok(img)
    }

    /// Creates an image from interleaved RGB bytes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] for zero dimensions,
    /// [`Error::BufferMismatch`] if `data.len() != width * height * 3`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = buffer_len(width, height)?;
        if data.len() != expected {
            return Err(Error::BufferMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image by evaluating `f(x, y)` for every pixel.
    ///
    /// ```rust
    /// use rota_core::{RgbImage, Rgb8};
    ///
    /// let img = RgbImage::from_fn(4, 2, |x, y| Rgb8::new(x as u8, y as u8, 0)).unwrap();
    /// assert_eq!(img.pixel(3, 1), Rgb8::new(3, 1, 0));
    /// ```
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Rgb8,
    {
        let len = buffer_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y).to_array());
            }
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of bytes in one row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Centroid of the pixel grid, the default rotation center.
    #[inline]
    pub fn center(&self) -> Point {
        Point::centroid(self.width, self.height)
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb8 {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        Rgb8::new(self.data[o], self.data[o + 1], self.data[o + 2])
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        (x < self.width && y < self.height).then(|| self.pixel(x, y))
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgb8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        self.data[o..o + CHANNELS].copy_from_slice(&pixel.to_array());
    }

    /// Fills the entire image with a pixel value.
    pub fn fill(&mut self, pixel: Rgb8) {
        for chunk in self.data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&pixel.to_array());
        }
    }

    /// Returns row `y` as interleaved bytes.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.row_stride();
        &self.data[start..start + self.row_stride()]
    }

    /// Returns row `y` as mutable interleaved bytes.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let stride = self.row_stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Raw interleaved bytes.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw interleaved bytes.
    #[inline]
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the image and returns its bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Iterates over all pixels with their coordinates, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Rgb8)> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y, self.pixel(x, y))))
    }

    /// Fails with [`Error::DimensionMismatch`] unless both images have the same size.
    pub fn ensure_same_size(&self, other: &Self) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(self.dimensions(), other.dimensions()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for RgbImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RgbImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_new_is_black() {
        let img = RgbImage::new(10, 7).unwrap();
        assert_eq!(img.dimensions(), (10, 7));
        assert_eq!(img.pixel_count(), 70);
        assert_eq!(img.as_raw().len(), 210);
        assert!(img.pixels().all(|(_, _, px)| px.is_black()));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(RgbImage::new(0, 5).unwrap_err().is_invalid_image());
        assert!(RgbImage::new(5, 0).unwrap_err().is_invalid_image());
        assert!(RgbImage::filled(0, 0, Rgb8::WHITE).is_err());
        assert!(RgbImage::from_raw(0, 1, vec![]).is_err());
    }

    #[test]
    fn test_from_raw_wrong_size() {
        let err = RgbImage::from_raw(2, 2, vec![0; 11]).unwrap_err();
        assert!(matches!(err, Error::BufferMismatch { expected: 12, got: 11 }));
    }

    #[test]
    fn test_set_get_pixel() {
        let mut img = RgbImage::new(4, 3).unwrap();
        img.set_pixel(3, 2, Rgb8::new(1, 2, 3));
        assert_eq!(img.pixel(3, 2), Rgb8::new(1, 2, 3));
        assert_eq!(img.get_pixel(4, 0), None);
        // last pixel is the last three bytes
        assert_eq!(&img.as_raw()[33..36], &[1, 2, 3]);
    }

    #[test]
    fn test_rows() {
        let img = RgbImage::from_fn(3, 2, |x, y| Rgb8::gray((y * 3 + x) as u8)).unwrap();
        assert_eq!(img.row(1), &[3, 3, 3, 4, 4, 4, 5, 5, 5]);
        assert_eq!(img.row_stride(), 9);
    }

    #[test]
    fn test_fill() {
        let mut img = RgbImage::new(5, 5).unwrap();
        img.fill(Rgb8::gray(9));
        assert!(img.pixels().all(|(_, _, px)| px == Rgb8::gray(9)));
    }

    #[test]
    fn test_center() {
        let img = RgbImage::new(8, 6).unwrap();
        assert_eq!(img.center(), Point::new(3.5, 2.5));
    }

    #[test]
    fn test_ensure_same_size() {
        let a = RgbImage::new(4, 4).unwrap();
        let b = RgbImage::new(4, 5).unwrap();
        assert!(a.ensure_same_size(&a.clone()).is_ok());
        assert!(matches!(a.ensure_same_size(&b), Err(Error::DimensionMismatch { .. })));
    }
}
