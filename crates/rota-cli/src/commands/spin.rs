//! Spin command - the interactive rotation session.

use crate::display::FramePresenter;
use crate::prompt::Console;
use crate::session::{Session, SessionConfig};
use crate::SpinArgs;
use anyhow::Result;
use std::io;

pub fn run(args: SpinArgs, verbose: bool) -> Result<()> {
    let image = super::load_image(&args.input)?;

    let config = SessionConfig {
        strategy: args.strategy,
        loop_mode: args.loop_mode,
        iterations: args.iterations,
        angle: args.angle,
        center: args.center,
        pad: !args.no_pad,
        wait: !args.no_wait,
    };
    if verbose {
        println!("{config:?}");
    }

    let mut presenter = FramePresenter::new(args.frames)?;
    let console = Console::new(io::stdin().lock(), io::stdout());
    let result = Session::new(config, console, &mut presenter).run(image)?;

    if let Some(output) = &args.output {
        super::save_image(output, &result, 90)?;
        println!("Saved: {}", output.display());
    }
    Ok(())
}
