//! # rota-io
//!
//! Image I/O for the rota workspace.
//!
//! Decoding is delegated to format crates; everything that comes back is
//! normalized to [`RgbImage`] (8-bit RGB, alpha dropped). A file that decodes
//! to a zero-sized raster is rejected with the core "invalid image" error.
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | Yes  | Yes   | `png`   |
//! | JPEG   | Yes  | Yes   | `jpeg`  |
//!
//! # Example
//!
//! ```rust,ignore
//! use rota_io::{read, write};
//!
//! let image = read("what_a_rotation.png")?;
//! write("copy.jpg", &image)?;
//! ```

#![warn(missing_docs)]

pub mod detect;
mod error;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;

pub use detect::Format;
pub use error::{IoError, IoResult};

use rota_core::RgbImage;
use std::path::Path;
use tracing::debug;

/// Encoder settings for [`write_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// JPEG quality, 1-100. Ignored for PNG.
    pub jpeg_quality: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { jpeg_quality: 90 }
    }
}

/// Reads an image, detecting the format from magic bytes or extension.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<RgbImage> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), format = format.name(), "reading image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        other => Err(unsupported(path, other)),
    }
}

/// Writes an image with default options; the format follows the extension.
pub fn write<P: AsRef<Path>>(path: P, image: &RgbImage) -> IoResult<()> {
    write_with(path, image, &WriteOptions::default())
}

/// Writes an image; the format follows the extension.
#[cfg_attr(not(feature = "jpeg"), allow(unused_variables))]
pub fn write_with<P: AsRef<Path>>(
    path: P,
    image: &RgbImage,
    options: &WriteOptions,
) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    debug!(
        path = %path.display(),
        format = format.name(),
        width = image.width(),
        height = image.height(),
        "writing image"
    );

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image, options.jpeg_quality),

        other => Err(unsupported(path, other)),
    }
}

fn unsupported(path: &Path, format: Format) -> IoError {
    let what = match format {
        Format::Unknown => path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
        known => format!("{} (feature disabled)", known.name()),
    };
    IoError::UnsupportedFormat(what)
}
