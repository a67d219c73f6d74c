//! Interactive spin session.
//!
//! ```text
//! input -> present -> pad -> present -> angle -> rotate -> present -+
//!                                          ^                          |
//!                                          +-- repeat / reprompt -----+
//! ```
//!
//! Every iteration rotates the previous iteration's output, so error
//! compounds across iterations.

use crate::display::Presenter;
use crate::prompt::Console;
use anyhow::{bail, Result};
use clap::ValueEnum;
use rota_core::{Point, RgbImage};
use rota_ops::{pad::pad_for_rotation, rotate, Strategy};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// What happens after each rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LoopMode {
    /// Apply the same angle again to the last output.
    #[default]
    Repeat,
    /// Ask for a new angle before every rotation.
    Reprompt,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub strategy: Strategy,
    pub loop_mode: LoopMode,
    /// Stop after this many rotations; unbounded when `None`.
    pub iterations: Option<u32>,
    /// Skip the first prompt and use this angle.
    pub angle: Option<f64>,
    /// Rotation center in canvas coordinates; canvas centroid when `None`.
    pub center: Option<Point>,
    pub pad: bool,
    /// Wait for Enter after each presented frame.
    pub wait: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Gather,
            loop_mode: LoopMode::Repeat,
            iterations: None,
            angle: None,
            center: None,
            pad: true,
            wait: true,
        }
    }
}

pub struct Session<'a, R, W, P> {
    config: SessionConfig,
    console: Console<R, W>,
    presenter: &'a mut P,
}

impl<'a, R, W, P> Session<'a, R, W, P>
where
    R: BufRead,
    W: Write,
    P: Presenter,
{
    pub fn new(config: SessionConfig, console: Console<R, W>, presenter: &'a mut P) -> Self {
        Self {
            config,
            console,
            presenter,
        }
    }

    /// Runs the session and returns the last rotated image, or the padded
    /// canvas when no rotation was requested.
    ///
    /// Fails if input ends before the first angle is known.
    pub fn run(mut self, image: RgbImage) -> Result<RgbImage> {
        self.show("input", &image)?;

        let mut current = if self.config.pad {
            let padded = pad_for_rotation(&image)?;
            self.show("padded", &padded)?;
            padded
        } else {
            image
        };

        if self.config.iterations == Some(0) {
            info!("no rotations requested");
            return Ok(current);
        }

        let center = self.config.center.unwrap_or_else(|| current.center());
        let mut angle = match self.config.angle {
            Some(angle) => angle,
            None => match self.console.prompt_angle()? {
                Some(angle) => angle,
                None => bail!("input closed before an angle was given"),
            },
        };

        info!(
            strategy = %self.config.strategy,
            mode = ?self.config.loop_mode,
            %center,
            "session started"
        );

        let mut done = 0u32;
        loop {
            current = rotate(&current, angle, center, self.config.strategy)?;
            done += 1;
            debug!(iteration = done, angle, "rotated");
            self.show("rotated", &current)?;

            if self.config.iterations.is_some_and(|max| done >= max) {
                break;
            }
            if self.config.loop_mode == LoopMode::Reprompt {
                match self.console.prompt_angle()? {
                    Some(next) => angle = next,
                    None => break,
                }
            }
        }

        info!(iterations = done, "session finished");
        Ok(current)
    }

    fn show(&mut self, label: &str, image: &RgbImage) -> Result<()> {
        self.presenter.present(label, image)?;
        if self.config.wait {
            self.console.pause(label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_core::Rgb8;
    use std::io::Cursor;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(String, RgbImage)>,
    }

    impl Presenter for Recorder {
        fn present(&mut self, label: &str, image: &RgbImage) -> Result<()> {
            self.frames.push((label.to_string(), image.clone()));
            Ok(())
        }
    }

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn labels(rec: &Recorder) -> Vec<&str> {
        rec.frames.iter().map(|(l, _)| l.as_str()).collect()
    }

    fn white() -> RgbImage {
        RgbImage::filled(4, 4, Rgb8::WHITE).unwrap()
    }

    #[test]
    fn test_repeat_compounds() {
        let mut rec = Recorder::default();
        let config = SessionConfig {
            iterations: Some(3),
            wait: false,
            ..SessionConfig::default()
        };
        let out = Session::new(config, console("30\n"), &mut rec)
            .run(white())
            .unwrap();

        assert_eq!(
            labels(&rec),
            ["input", "padded", "rotated", "rotated", "rotated"]
        );
        assert_eq!(out.dimensions(), (8, 8));

        // each step turns the previous output, not the padded input
        assert_ne!(rec.frames[2].1, out);
        assert_eq!(rec.frames[4].1, out);
        assert!(out.pixel(3, 3).r > 128);
    }

    #[test]
    fn test_zero_iterations_does_not_rotate() {
        let mut rec = Recorder::default();
        let config = SessionConfig {
            iterations: Some(0),
            angle: Some(30.0),
            wait: false,
            ..SessionConfig::default()
        };
        let out = Session::new(config, console(""), &mut rec)
            .run(white())
            .unwrap();

        assert_eq!(labels(&rec), ["input", "padded"]);
        assert_eq!(out, rec.frames[1].1);
    }

    #[test]
    fn test_reprompt_reads_each_angle() {
        let mut rec = Recorder::default();
        let config = SessionConfig {
            loop_mode: LoopMode::Reprompt,
            wait: false,
            ..SessionConfig::default()
        };
        Session::new(config, console("10\n-20\nnope\n370\n"), &mut rec)
            .run(white())
            .unwrap();

        // input ends after the third angle
        assert_eq!(labels(&rec).iter().filter(|&&l| l == "rotated").count(), 3);
    }

    #[test]
    fn test_initial_angle_skips_prompt() {
        let mut rec = Recorder::default();
        let config = SessionConfig {
            angle: Some(45.0),
            iterations: Some(1),
            wait: false,
            pad: false,
            ..SessionConfig::default()
        };
        let out = Session::new(config, console(""), &mut rec)
            .run(white())
            .unwrap();
        assert_eq!(labels(&rec), ["input", "rotated"]);
        assert_eq!(out.dimensions(), (4, 4));
    }

    #[test]
    fn test_no_angle_is_error() {
        let mut rec = Recorder::default();
        let config = SessionConfig {
            wait: false,
            ..SessionConfig::default()
        };
        let err = Session::new(config, console(""), &mut rec)
            .run(white())
            .unwrap_err();
        assert!(err.to_string().contains("angle"));
        assert_eq!(labels(&rec), ["input", "padded"]);
    }

    #[test]
    fn test_waits_between_frames() {
        let mut rec = Recorder::default();
        let config = SessionConfig {
            iterations: Some(1),
            ..SessionConfig::default()
        };
        // Enter, Enter, angle, Enter
        let session = Session::new(config, console("\n\n90\n\n"), &mut rec);
        let out = session.run(white()).unwrap();
        assert_eq!(labels(&rec).len(), 3);
        assert_eq!(out.dimensions(), (8, 8));
    }

    #[test]
    fn test_scatter_strategy() {
        let mut rec = Recorder::default();
        let config = SessionConfig {
            strategy: Strategy::Scatter,
            angle: Some(0.0),
            iterations: Some(2),
            wait: false,
            ..SessionConfig::default()
        };
        let out = Session::new(config, console(""), &mut rec)
            .run(white())
            .unwrap();
        assert_eq!(out, rec.frames[1].1);
    }
}
