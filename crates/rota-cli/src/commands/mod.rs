//! CLI command implementations

pub mod compare;
pub mod info;
pub mod pad;
pub mod rotate;
pub mod spin;

use anyhow::{Context, Result};
use rota_core::RgbImage;
use rota_io::WriteOptions;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<RgbImage> {
    rota_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &RgbImage, quality: u8) -> Result<()> {
    let options = WriteOptions {
        jpeg_quality: quality,
    };
    rota_io::write_with(path, image, &options)
        .with_context(|| format!("Failed to save: {}", path.display()))
}
