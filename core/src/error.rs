use std::io;

use crate::constants::MAX_PROGRAM_SIZE;

/// Everything that can stop the interpreter.
///
/// Load errors are reported before a `Chip8` exists; every other variant halts
/// a running machine.
#[derive(Debug, thiserror::Error)]
pub enum Chip8Error {
    #[error("no program was supplied")]
    EmptyProgram,

    #[error("program is {size} bytes but at most {max} fit in memory")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("memory access out of bounds at {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("unknown opcode {opcode:#06X} at {address:#05X}")]
    UnknownOpcode { opcode: u16, address: u16 },

    #[error("stack overflow calling from {address:#05X}")]
    StackOverflow { address: u16 },

    #[error("stack underflow returning from {address:#05X}")]
    StackUnderflow { address: u16 },

    #[error("the machine has halted")]
    Halted,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Chip8Error {
    /// Load errors are raised before execution starts and leave no state behind.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Chip8Error::EmptyProgram | Chip8Error::ProgramTooLarge { .. }
        )
    }

    pub(crate) fn too_large(size: usize) -> Self {
        Chip8Error::ProgramTooLarge {
            size,
            max: MAX_PROGRAM_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_errors_are_distinguished() {
        assert!(Chip8Error::EmptyProgram.is_load_error());
        assert!(Chip8Error::too_large(4000).is_load_error());
        assert!(!Chip8Error::Halted.is_load_error());
    }

    #[test]
    fn test_messages_name_the_address() {
        let err = Chip8Error::UnknownOpcode {
            opcode: 0xE1FF,
            address: 0x204,
        };
        assert_eq!(err.to_string(), "unknown opcode 0xE1FF at 0x204");
    }
}
