//! Frame presentation.

use anyhow::{Context, Result};
use rota_core::RgbImage;
use std::path::PathBuf;
use tracing::info;

/// Shows one stage of a session to the operator.
pub trait Presenter {
    fn present(&mut self, label: &str, image: &RgbImage) -> Result<()>;
}

/// Writes each frame as `NNNN-<label>.png` into a directory.
///
/// Without a directory the frame is only logged.
pub struct FramePresenter {
    dir: Option<PathBuf>,
    index: u32,
}

impl FramePresenter {
    pub fn new(dir: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = &dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create frame directory: {}", dir.display()))?;
        }
        Ok(Self { dir, index: 0 })
    }

    fn frame_path(&self, label: &str) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(format!("{:04}-{label}.png", self.index)))
    }
}

impl Presenter for FramePresenter {
    fn present(&mut self, label: &str, image: &RgbImage) -> Result<()> {
        match self.frame_path(label) {
            Some(path) => {
                rota_io::write(&path, image)
                    .with_context(|| format!("Failed to save frame: {}", path.display()))?;
                info!(
                    frame = self.index,
                    label,
                    width = image.width(),
                    height = image.height(),
                    path = %path.display(),
                    "frame written"
                );
            }
            None => info!(
                frame = self.index,
                label,
                width = image.width(),
                height = image.height(),
                "frame"
            ),
        }
        self.index += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_core::Rgb8;

    #[test]
    fn test_writes_numbered_frames() {
        let dir = tempfile::tempdir().unwrap();
        let frames = dir.path().join("frames");
        let mut p = FramePresenter::new(Some(frames.clone())).unwrap();

        let img = RgbImage::filled(3, 2, Rgb8::gray(50)).unwrap();
        p.present("input", &img).unwrap();
        p.present("padded", &img).unwrap();

        let first = frames.join("0000-input.png");
        assert!(first.exists());
        assert!(frames.join("0001-padded.png").exists());
        assert_eq!(rota_io::read(&first).unwrap(), img);
    }

    #[test]
    fn test_without_directory_only_counts() {
        let mut p = FramePresenter::new(None).unwrap();
        let img = RgbImage::new(1, 1).unwrap();
        p.present("input", &img).unwrap();
        assert_eq!(p.index, 1);
        assert_eq!(p.frame_path("x"), None);
    }
}
