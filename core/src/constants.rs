/// Width of the Chip-8 display in pixels.
pub const DISPLAY_WIDTH: usize = 64;

/// Height of the Chip-8 display in pixels.
pub const DISPLAY_HEIGHT: usize = 32;

/// Total addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Where programs are loaded and where the program counter starts.
/// Everything below it is reserved for the interpreter (font data).
pub const PROGRAM_START: u16 = 0x200;

/// The largest program that fits between `PROGRAM_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of return addresses the call stack can hold.
pub const STACK_DEPTH: usize = 16;

/// Number of keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// Ticks per second; one instruction and one timer decrement per tick.
pub const TICK_RATE_HZ: u64 = 60;

/// Nanoseconds per tick at `TICK_RATE_HZ`.
pub const CLOCK_SPEED: u64 = 1_000_000_000 / TICK_RATE_HZ;

/// Bytes per font glyph.
pub const GLYPH_SIZE: u16 = 5;

/// # Sprite sheet
/// Hexadecimal digits 0..F, each 4 pixels wide and 5 rows tall.
/// Stored at 0x000 so glyph `n` lives at `n * GLYPH_SIZE`.
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
