use crate::constants::{MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::Chip8Error;

/// # Memory
/// 4096 bytes of flat addressable memory.
///
/// - 0x000..0x050 the sprite sheet for hex digits 0..F
/// - 0x050..0x200 reserved for the interpreter
/// - 0x200..0x1000 the loaded program, and whatever it writes
///
/// Every access is bounds checked; an address past 0xFFF is an error, never a wrap.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the sprite sheet in place.
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[0..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Copy a program to `PROGRAM_START`.
    /// Rejects empty and oversized programs without touching memory.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        if program.is_empty() {
            return Err(Chip8Error::EmptyProgram);
        }
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::too_large(program.len()));
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, address: usize) -> Result<u8, Chip8Error> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(Chip8Error::MemoryOutOfBounds { address })
    }

    /// `len` bytes starting at `address`.
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8], Chip8Error> {
        let end = Self::end_of(address, len)?;
        Ok(&self.bytes[address..end])
    }

    /// Mutable `len` bytes starting at `address`.
    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8], Chip8Error> {
        let end = Self::end_of(address, len)?;
        Ok(&mut self.bytes[address..end])
    }

    fn end_of(address: usize, len: usize) -> Result<usize, Chip8Error> {
        let end = address + len;
        if end > MEMORY_SIZE {
            // report the first byte that doesn't exist
            return Err(Chip8Error::MemoryOutOfBounds {
                address: address.max(MEMORY_SIZE),
            });
        }
        Ok(end)
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Memory([u8; {}])", MEMORY_SIZE)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
