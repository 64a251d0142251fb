use std::io::Read;

use log::{error, info, log_enabled, trace, Level};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::Config;
use crate::constants::MAX_PROGRAM_SIZE;
use crate::decoder;
use crate::error::Chip8Error;
use crate::frame_buffer::FrameBuffer;
use crate::instruction::{self, disassemble};
use crate::keypad::Keypad;
use crate::operations::{await_key, Env};
use crate::state::{Mode, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`, which nothing else mutates
///  - the `config` it was built with
///  - a random source for `Cxkk`
///
/// Supplies interfaces for:
/// - loading programs
/// - advancing the CPU and its timers one tick at a time
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    config: Config,
    rng: Box<dyn RngCore>,
}

impl Chip8 {
    /// A machine running `program` with the default config.
    pub fn new(program: &[u8]) -> Result<Self, Chip8Error> {
        Self::with_config(program, Config::default())
    }

    pub fn with_config(program: &[u8], config: Config) -> Result<Self, Chip8Error> {
        let state = State::with_program(program)?;
        let rng: Box<dyn RngCore> = match config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };
        info!("loaded {} byte program", program.len());
        Ok(Chip8 { state, config, rng })
    }

    /// Load a program from some source, e.g. stdin.
    ///
    /// Reads one byte past `MAX_PROGRAM_SIZE` so an oversized program is rejected
    /// rather than silently truncated.
    ///
    /// # Arguments
    /// * `reader` a reader that yields the program bytes
    /// * `config` the config to build the machine with
    pub fn load(reader: &mut dyn Read, config: Config) -> Result<Self, Chip8Error> {
        let mut program = Vec::with_capacity(MAX_PROGRAM_SIZE);
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut program)?;
        Self::with_config(&program, config)
    }

    /// Replace the random source, e.g. with a mock in tests.
    pub fn set_rng(&mut self, rng: Box<dyn RngCore>) {
        self.rng = rng;
    }

    /// Advances the machine by one tick: one CPU cycle, then the timers.
    ///
    /// A fatal error halts the machine for good; it is returned here once and
    /// every later tick fails with `Chip8Error::Halted`.
    pub fn tick(&mut self, keypad: &Keypad) -> Result<(), Chip8Error> {
        if let Err(err) = self.step(keypad) {
            if !matches!(err, Chip8Error::Halted) {
                error!("halting at {:#05X}: {}", self.state.pc, err);
                self.state.mode = Mode::Halted;
            }
            return Err(err);
        }
        self.state.timers.tick();
        Ok(())
    }

    /// Advances the CPU by a single cycle
    /// - polls the keypad instead if awaiting a key
    /// - otherwise gets and executes the next opcode
    pub fn step(&mut self, keypad: &Keypad) -> Result<(), Chip8Error> {
        match self.state.mode {
            Mode::Halted => Err(Chip8Error::Halted),
            Mode::AwaitingKey { .. } => {
                await_key(&mut self.state, keypad);
                Ok(())
            }
            Mode::Running => {
                let op = decoder::fetch(&self.state.memory, self.state.pc)?;
                if log_enabled!(Level::Trace) {
                    trace!(
                        "{:03X}  {:<20} v{:02X?} i{:03X}",
                        self.state.pc,
                        disassemble(op),
                        self.state.registers.v,
                        self.state.registers.i
                    );
                }
                let mut env = Env {
                    keypad,
                    rng: self.rng.as_mut(),
                    quirks: self.config.quirks,
                };
                instruction::execute(op, &mut self.state, &mut env)
            }
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn is_halted(&self) -> bool {
        self.state.mode == Mode::Halted
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// The sound timer is running; a frontend would beep.
    pub fn sound_active(&self) -> bool {
        self.state.timers.sound > 0
    }
}
