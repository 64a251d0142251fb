use std::time::{Duration, Instant};

use log::info;

use crate::chip8::Chip8;
use crate::constants::CLOCK_SPEED;
use crate::error::Chip8Error;
use crate::interfaces::{Display, InputSource};

/// Why a run ended without a fault.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stop {
    /// The input source asked to quit.
    Quit,
    /// The configured number of ticks ran.
    TickLimit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub stop: Stop,
}

/// # Scheduler
/// Drives a `Chip8` at a fixed 60Hz cadence.
///
/// Every tick:
/// - polls the input source for a keypad snapshot
/// - advances the machine by one cycle and its timers by one step
/// - presents the frame buffer
/// - sleeps away whatever is left of the tick
pub struct Scheduler {
    tick_time: Duration,
    max_ticks: Option<u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Scheduler {
            tick_time: Duration::from_nanos(CLOCK_SPEED),
            max_ticks: None,
        }
    }

    /// Stop cleanly after `ticks` ticks.
    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = Some(ticks);
        self
    }

    /// Runs until the input source quits, the tick limit is hit, or the
    /// machine faults.
    pub fn run(
        &self,
        chip8: &mut Chip8,
        mut display: impl Display,
        mut input: impl InputSource,
    ) -> Result<RunSummary, Chip8Error> {
        info!("running at {:?} per tick", self.tick_time);
        let mut ticks = 0;
        let mut last_tick = Instant::now();

        let stop = loop {
            if self.max_ticks.map_or(false, |max| ticks >= max) {
                break Stop::TickLimit;
            }

            let keypad = input.poll();
            if input.quit_requested() {
                break Stop::Quit;
            }

            chip8.tick(&keypad)?;
            display.present(chip8.frame_buffer())?;
            ticks += 1;

            // Handle timing
            let elapsed = last_tick.elapsed();
            if elapsed < self.tick_time {
                std::thread::sleep(self.tick_time - elapsed);
            }
            last_tick = Instant::now();
        };

        info!("stopped after {} ticks ({:?})", ticks, stop);
        Ok(RunSummary { ticks, stop })
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
