use crate::constants::{PROGRAM_START, STACK_DEPTH};
use crate::error::Chip8Error;
use crate::frame_buffer::FrameBuffer;
use crate::memory::Memory;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Stack
/// - 16 return addresses and a pointer
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per tick
///
/// ## Memory
/// - 4096 bytes of addressable memory
/// - 64x32 frame buffer
///
/// ## Mode
/// - execution halts while a key is awaited, or for good after a fault
#[derive(Clone, Debug)]
pub struct State {
    pub memory: Memory,
    pub registers: Registers,
    pub pc: u16,
    pub stack: Stack,
    pub timers: Timers,
    pub frame_buffer: FrameBuffer,
    pub mode: Mode,
}

impl State {
    pub fn new() -> Self {
        State {
            memory: Memory::new(),
            registers: Registers::default(),
            pc: PROGRAM_START,
            stack: Stack::default(),
            timers: Timers::default(),
            frame_buffer: FrameBuffer::new(),
            mode: Mode::Running,
        }
    }

    /// Fresh state with `program` loaded at `PROGRAM_START`.
    pub fn with_program(program: &[u8]) -> Result<Self, Chip8Error> {
        let mut state = State::new();
        state.memory.load_program(program)?;
        Ok(state)
    }

    /// Move on to the next instruction.
    pub fn advance(&mut self) {
        self.pc += 0x2;
    }

    /// Skip the next instruction if `condition` holds, otherwise just advance.
    pub fn skip_if(&mut self, condition: bool) {
        self.pc += if condition { 0x4 } else { 0x2 };
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// General purpose registers V0..VF and the address register I.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; 16],
    pub i: u16,
}

impl Registers {
    pub fn vf(&self) -> u8 {
        self.v[0xF]
    }

    pub fn set_vf(&mut self, flag: bool) {
        self.v[0xF] = u8::from(flag);
    }
}

/// Return addresses pushed by CALL and popped by RET.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    entries: [u16; STACK_DEPTH],
    sp: usize,
}

impl Stack {
    /// Push a return address. `pc` is only used to report an overflow.
    pub fn push(&mut self, address: u16, pc: u16) -> Result<(), Chip8Error> {
        let slot = self
            .entries
            .get_mut(self.sp)
            .ok_or(Chip8Error::StackOverflow { address: pc })?;
        *slot = address;
        self.sp += 1;
        Ok(())
    }

    /// Pop the most recent return address. `pc` is only used to report an underflow.
    pub fn pop(&mut self, pc: u16) -> Result<u16, Chip8Error> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow { address: pc });
        }
        self.sp -= 1;
        Ok(self.entries[self.sp])
    }

    /// Number of return addresses currently held.
    pub fn depth(&self) -> usize {
        self.sp
    }

    pub fn peek(&self) -> Option<u16> {
        self.sp.checked_sub(1).map(|top| self.entries[top])
    }
}

/// The delay and sound timers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    /// Decrement both timers by one, stopping at zero.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }
}

/// Execution sub-state, checked by every tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Fetching and executing instructions.
    Running,
    /// Parked on an `Fx0A` until some key is down; the key lands in `register`.
    AwaitingKey { register: usize },
    /// A fatal error occurred; nothing more will execute.
    Halted,
}
