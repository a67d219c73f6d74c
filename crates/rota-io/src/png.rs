//! PNG format support.
//!
//! Every PNG flavour the decoder understands is normalized to 8-bit RGB:
//! palette and sub-byte grayscale are expanded, 16-bit samples keep their
//! high byte, gray is replicated into three channels and alpha is dropped.

use crate::{IoError, IoResult};
use rota_core::RgbImage;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

/// Reads a PNG file into an RGB8 image.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<RgbImage> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];

    debug!(
        width = info.width,
        height = info.height,
        color = ?info.color_type,
        depth = ?info.bit_depth,
        "decoded png"
    );

    let rgb = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgb, png::BitDepth::Eight) => bytes.to_vec(),
        (png::ColorType::Rgba, png::BitDepth::Eight) => strip_alpha(bytes, 4),
        (png::ColorType::Grayscale, png::BitDepth::Eight) => gray_to_rgb(bytes, 1),
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => gray_to_rgb(bytes, 2),
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => strip_alpha(&high_bytes(bytes), 3),
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => strip_alpha(&high_bytes(bytes), 4),
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => gray_to_rgb(&high_bytes(bytes), 1),
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Sixteen) => {
            gray_to_rgb(&high_bytes(bytes), 2)
        }
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    Ok(RgbImage::from_raw(info.width, info.height, rgb)?)
}

/// Writes an image as an 8-bit RGB PNG.
pub fn write<P: AsRef<Path>>(path: P, image: &RgbImage) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.as_raw())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

/// Keeps the high byte of each big-endian 16-bit sample.
fn high_bytes(bytes: &[u8]) -> Vec<u8> {
    bytes.chunks_exact(2).map(|s| s[0]).collect()
}

/// Keeps the first three channels of each `stride`-channel pixel.
fn strip_alpha(bytes: &[u8], stride: usize) -> Vec<u8> {
    if stride == 3 {
        return bytes.to_vec();
    }
    bytes
        .chunks_exact(stride)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}

/// Replicates the first channel of each `stride`-channel pixel into RGB.
fn gray_to_rgb(bytes: &[u8], stride: usize) -> Vec<u8> {
    bytes
        .chunks_exact(stride)
        .flat_map(|px| [px[0], px[0], px[0]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_alpha() {
        assert_eq!(strip_alpha(&[1, 2, 3, 4, 5, 6, 7, 8], 4), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_gray_to_rgb() {
        assert_eq!(gray_to_rgb(&[9, 255, 7, 0], 2), vec![9, 9, 9, 7, 7, 7]);
    }

    #[test]
    fn test_high_bytes() {
        assert_eq!(high_bytes(&[0xAB, 0xCD, 0x01, 0x02]), vec![0xAB, 0x01]);
    }
}
