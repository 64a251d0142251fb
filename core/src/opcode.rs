/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each. Their behavior is cased on some combination of:
/// - `(n, _, _, _)` the class; picks the row of the dispatch table
/// - `(_, _, _, n)` specific behavior within a class
/// - `(_, _, n, n)` more specific behavior within a class
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS; clear screen)
///
/// Nibbles not used to determine the operation often (but not always) carry important data.
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` a byte that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` either the register Vx or the range of registers V0..=Vx
/// - `(_, _, n, _)` the register Vy
pub trait Opcode {
    /// The Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The Opcode's most significant nibble.
    /// `[c___]`
    fn class(&self) -> u8;

    /// The Opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> usize;

    /// The Opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> usize;

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_adr]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.class(), self.x() as u8, self.y() as u8, self.n())
    }

    fn class(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> usize {
        ((self & 0x0F00) >> 8) as usize
    }

    fn y(&self) -> usize {
        ((self & 0x00F0) >> 4) as usize
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}
