//! JPEG format support.
//!
//! Decoding converts grayscale, 16-bit grayscale and CMYK to RGB8.
//! Encoding writes baseline RGB with a configurable quality.

use crate::{IoError, IoResult};
use rota_core::RgbImage;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Reads a JPEG file into an RGB8 image.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<RgbImage> {
    let file = File::open(path.as_ref())?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    debug!(
        width = info.width,
        height = info.height,
        format = ?info.pixel_format,
        "decoded jpeg"
    );

    let rgb: Vec<u8> = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels,
        jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
        // high byte of each 16-bit sample
        jpeg_decoder::PixelFormat::L16 => pixels
            .chunks_exact(2)
            .flat_map(|l16| [l16[0], l16[0], l16[0]])
            .collect(),
        jpeg_decoder::PixelFormat::CMYK32 => pixels.chunks_exact(4).flat_map(cmyk_to_rgb).collect(),
    };

    Ok(RgbImage::from_raw(
        u32::from(info.width),
        u32::from(info.height),
        rgb,
    )?)
}

/// Writes an image as JPEG with the given quality (1-100).
pub fn write<P: AsRef<Path>>(path: P, image: &RgbImage, quality: u8) -> IoResult<()> {
    use jpeg_encoder::{ColorType, Encoder};

    let width = u16::try_from(image.width())
        .map_err(|_| IoError::EncodeError(format!("width {} exceeds JPEG limit", image.width())))?;
    let height = u16::try_from(image.height()).map_err(|_| {
        IoError::EncodeError(format!("height {} exceeds JPEG limit", image.height()))
    })?;

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality.clamp(1, 100));
    encoder
        .encode(image.as_raw(), width, height, ColorType::Rgb)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    std::fs::write(path.as_ref(), &buffer)?;
    Ok(())
}

/// Approximate (non color-managed) CMYK to RGB.
fn cmyk_to_rgb(cmyk: &[u8]) -> [u8; 3] {
    let c = f32::from(cmyk[0]) / 255.0;
    let m = f32::from(cmyk[1]) / 255.0;
    let y = f32::from(cmyk[2]) / 255.0;
    let k = f32::from(cmyk[3]) / 255.0;

    let r = ((1.0 - c) * (1.0 - k) * 255.0).round() as u8;
    let g = ((1.0 - m) * (1.0 - k) * 255.0).round() as u8;
    let b = ((1.0 - y) * (1.0 - k) * 255.0).round() as u8;
    [r, g, b]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmyk_to_rgb() {
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 0]), [255, 255, 255]);
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 255]), [0, 0, 0]);
        assert_eq!(cmyk_to_rgb(&[255, 0, 255, 0]), [0, 255, 0]);
    }
}
