use crate::error::Chip8Error;
use crate::memory::Memory;

/// Gets the opcode pointed at by `pc`.
///
/// Memory is stored as bytes, but opcodes are 16 bits so we combine two
/// subsequent bytes, high byte first. Fails if either byte is past the end of
/// memory.
pub fn fetch(memory: &Memory, pc: u16) -> Result<u16, Chip8Error> {
    let word = memory.slice(pc as usize, 2)?;
    Ok(u16::from(word[0]) << 8 | u16::from(word[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_is_big_endian() {
        let mut memory = Memory::new();
        memory.load_program(&[0xAA, 0xBB]).unwrap();
        assert_eq!(fetch(&memory, 0x200).unwrap(), 0xAABB);
    }

    #[test]
    fn test_fetch_last_word() {
        let mut memory = Memory::new();
        memory.slice_mut(0xFFE, 2).unwrap().copy_from_slice(&[0x12, 0x34]);
        assert_eq!(fetch(&memory, 0xFFE).unwrap(), 0x1234);
    }

    #[test]
    fn test_fetch_straddling_end_fails() {
        let memory = Memory::new();
        assert!(matches!(
            fetch(&memory, 0xFFF),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1000 })
        ));
    }
}
