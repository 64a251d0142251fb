use std::error::Error;

use emu8_core::{Chip8, RunSummary, Scheduler};
use emu8_display::{TerminalDisplay, TerminalInput};

use crate::{Cli, Frontend};

/// Opens the chosen frontend and runs `chip8` on it until the user quits,
/// the tick limit is hit, or the machine faults.
///
/// The frontend is torn down before this returns, so the terminal is back to
/// normal by the time any error is printed.
pub fn run(chip8: &mut Chip8, cli: &Cli) -> Result<RunSummary, Box<dyn Error>> {
    let scheduler = match cli.max_ticks {
        Some(ticks) => Scheduler::new().with_max_ticks(ticks),
        None => Scheduler::new(),
    };

    let summary = match cli.frontend {
        Frontend::Terminal => {
            let input = TerminalInput::new()?;
            let display = TerminalDisplay::new()?;
            scheduler.run(chip8, display, input)?
        }
        Frontend::Sdl => run_sdl(chip8, &scheduler, cli.scale)?,
    };
    Ok(summary)
}

#[cfg(feature = "sdl")]
fn run_sdl(chip8: &mut Chip8, scheduler: &Scheduler, scale: u32) -> Result<RunSummary, Box<dyn Error>> {
    let (display, input) = emu8_display::open_sdl(scale)?;
    Ok(scheduler.run(chip8, display, input)?)
}

#[cfg(not(feature = "sdl"))]
fn run_sdl(_chip8: &mut Chip8, _scheduler: &Scheduler, _scale: u32) -> Result<RunSummary, Box<dyn Error>> {
    Err("this build has no SDL support".into())
}
