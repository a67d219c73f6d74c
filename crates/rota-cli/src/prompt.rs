//! Operator console: angle prompts and Enter-to-continue pauses.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Line-oriented operator I/O over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
    closed: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            closed: false,
        }
    }

    /// Asks for a rotation angle in degrees.
    ///
    /// Any finite value is accepted, including negatives and values of 360
    /// or more. Unparsable lines are re-prompted. Returns `Ok(None)` at end
    /// of input.
    pub fn prompt_angle(&mut self) -> Result<Option<f64>> {
        loop {
            write!(self.output, "Angle of rotation (degrees): ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_angle(&line) {
                Some(angle) => {
                    debug!(angle, "operator angle");
                    return Ok(Some(angle));
                }
                None => {
                    warn!(input = line.trim(), "not an angle");
                    writeln!(self.output, "'{}' is not a number, try again", line.trim())?;
                }
            }
        }
    }

    /// Blocks until the operator presses Enter.
    ///
    /// Once input is closed this returns immediately.
    pub fn pause(&mut self, label: &str) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        write!(self.output, "[{label}] press Enter to continue ")?;
        self.output.flush()?;
        if self.read_line()?.is_none() {
            writeln!(self.output)?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("failed to read operator input")?;
        if n == 0 {
            self.closed = true;
            return Ok(None);
        }
        Ok(Some(line))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

fn parse_angle(line: &str) -> Option<f64> {
    let value: f64 = line.trim().trim_end_matches('°').parse().ok()?;
    value.is_finite().then_some(value)
}
