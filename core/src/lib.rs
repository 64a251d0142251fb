pub use chip8::Chip8;
pub use config::{Config, Quirks};
pub use constants::CLOCK_SPEED;
pub use error::Chip8Error;
pub use frame_buffer::FrameBuffer;
pub use interfaces::{Display, InputSource};
pub use keypad::Keypad;
pub use scheduler::{RunSummary, Scheduler, Stop};
pub use state::{Mode, State};

mod chip8;
mod config;
pub mod constants;
pub mod decoder;
mod error;
mod frame_buffer;
pub mod instruction;
mod interfaces;
mod keypad;
pub mod memory;
pub mod opcode;
pub mod operations;
mod scheduler;
pub mod state;
