use log::debug;
use rand::RngCore;

use crate::config::Quirks;
use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, GLYPH_SIZE};
use crate::error::Chip8Error;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::state::{Mode, State};

/// What an operation can see besides the machine state.
pub struct Env<'a> {
    pub keypad: &'a Keypad,
    pub rng: &'a mut dyn RngCore,
    pub quirks: Quirks,
}

/// Applies one instruction to the state; every operation leaves `pc` pointing at
/// the next instruction to fetch.
pub type Operation = fn(op: u16, state: &mut State, env: &mut Env) -> Result<(), Chip8Error>;

/// clear
pub fn clr(_op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    state.frame_buffer.clear();
    state.advance();
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let address = state.stack.pop(state.pc)?;
    debug!("return {:#05X} -> {:#05X}", state.pc, address);
    state.pc = address;
    Ok(())
}

/// PC = addr
pub fn jump(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    state.pc = op.addr();
    Ok(())
}

/// STACK.push(PC + 2); PC = addr
pub fn call(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    state.stack.push(state.pc + 0x2, state.pc)?;
    debug!(
        "call {:#05X} -> {:#05X} (depth {})",
        state.pc,
        op.addr(),
        state.stack.depth()
    );
    state.pc = op.addr();
    Ok(())
}

/// if Vx == kk then skip
pub fn ske(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    state.skip_if(state.registers.v[op.x()] == op.kk());
    Ok(())
}

/// if Vx != kk then skip
pub fn skne(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    state.skip_if(state.registers.v[op.x()] != op.kk());
    Ok(())
}

/// if Vx == Vy then skip
pub fn skre(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let equal = state.registers.v[op.x()] == state.registers.v[op.y()];
    state.skip_if(equal);
    Ok(())
}

/// Vx = kk
pub fn load(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    state.registers.v[op.x()] = op.kk();
    state.advance();
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let v = &mut state.registers.v;
    v[op.x()] = v[op.x()].wrapping_add(op.kk());
    state.advance();
    Ok(())
}

/// Vx = Vy
pub fn mv(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let v = &mut state.registers.v;
    v[op.x()] = v[op.y()];
    state.advance();
    Ok(())
}

/// Vx |= Vy
pub fn or(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let v = &mut state.registers.v;
    v[op.x()] |= v[op.y()];
    state.advance();
    Ok(())
}

/// Vx &= Vy
pub fn and(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let v = &mut state.registers.v;
    v[op.x()] &= v[op.y()];
    state.advance();
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let v = &mut state.registers.v;
    v[op.x()] ^= v[op.y()];
    state.advance();
    Ok(())
}

// The ALU operations below write VF after the result, so VF holds the flag even
// when it is also the destination.

/// Vx += Vy; VF = carry
pub fn addr(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let regs = &mut state.registers;
    let (res, carry) = regs.v[op.x()].overflowing_add(regs.v[op.y()]);
    regs.v[op.x()] = res;
    regs.set_vf(carry);
    state.advance();
    Ok(())
}

/// Vx -= Vy; VF = !borrow
pub fn sub(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let regs = &mut state.registers;
    let (res, borrow) = regs.v[op.x()].overflowing_sub(regs.v[op.y()]);
    regs.v[op.x()] = res;
    regs.set_vf(!borrow);
    state.advance();
    Ok(())
}

/// Vx >>= 1; VF = lsb
pub fn shr(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let regs = &mut state.registers;
    let lsb = regs.v[op.x()] & 0x1;
    regs.v[op.x()] >>= 1;
    regs.v[0xF] = lsb;
    state.advance();
    Ok(())
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let regs = &mut state.registers;
    let (res, borrow) = regs.v[op.y()].overflowing_sub(regs.v[op.x()]);
    regs.v[op.x()] = res;
    regs.set_vf(!borrow);
    state.advance();
    Ok(())
}

/// Vx <<= 1; VF = msb
pub fn shl(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let regs = &mut state.registers;
    let msb = regs.v[op.x()] >> 7;
    regs.v[op.x()] <<= 1;
    regs.v[0xF] = msb;
    state.advance();
    Ok(())
}

/// if Vx != Vy then skip
pub fn skrne(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let differ = state.registers.v[op.x()] != state.registers.v[op.y()];
    state.skip_if(differ);
    Ok(())
}

/// I = addr
pub fn loadi(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    state.registers.i = op.addr();
    state.advance();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    state.pc = u16::from(state.registers.v[0x0]) + op.addr();
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rnd(op: u16, state: &mut State, env: &mut Env) -> Result<(), Chip8Error> {
    let rand_byte = (env.rng.next_u32() & 0xFF) as u8;
    state.registers.v[op.x()] = rand_byte & op.kk();
    state.advance();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased by the sprite as a whole.
pub fn draw(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let x = state.registers.v[op.x()] as usize % DISPLAY_WIDTH;
    let y = state.registers.v[op.y()] as usize % DISPLAY_HEIGHT;
    let sprite = state
        .memory
        .slice(state.registers.i as usize, op.n() as usize)?;

    let mut erased = false;
    for (row, byte) in sprite.iter().enumerate() {
        erased |= state.frame_buffer.xor_row(x, y + row, *byte);
    }

    state.registers.set_vf(erased);
    state.advance();
    Ok(())
}

/// if Vx.pressed then skip
pub fn skpr(op: u16, state: &mut State, env: &mut Env) -> Result<(), Chip8Error> {
    state.skip_if(env.keypad.is_pressed(state.registers.v[op.x()]));
    Ok(())
}

/// if !Vx.pressed then skip
pub fn skup(op: u16, state: &mut State, env: &mut Env) -> Result<(), Chip8Error> {
    state.skip_if(!env.keypad.is_pressed(state.registers.v[op.x()]));
    Ok(())
}

/// Vx = DT
pub fn moved(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    state.registers.v[op.x()] = state.timers.delay;
    state.advance();
    Ok(())
}

/// await keypress for Vx
/// Parks the machine without moving `pc`; resolves straight away if a key is already down.
pub fn keyd(op: u16, state: &mut State, env: &mut Env) -> Result<(), Chip8Error> {
    state.mode = Mode::AwaitingKey { register: op.x() };
    if !await_key(state, env.keypad) {
        debug!("awaiting key for V{:X} at {:#05X}", op.x(), state.pc);
    }
    Ok(())
}

/// Completes a pending `Fx0A` if any key is down: the lowest key lands in the
/// awaiting register and execution resumes after the instruction.
///
/// Returns whether the wait is over.
pub fn await_key(state: &mut State, keypad: &Keypad) -> bool {
    let register = match state.mode {
        Mode::AwaitingKey { register } => register,
        _ => return false,
    };
    match keypad.lowest_pressed() {
        Some(key) => {
            debug!("key {:X} -> V{:X}", key, register);
            state.registers.v[register] = key;
            state.mode = Mode::Running;
            state.advance();
            true
        }
        None => false,
    }
}

/// DT = Vx
pub fn loads(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    state.timers.delay = state.registers.v[op.x()];
    state.advance();
    Ok(())
}

/// ST = Vx
pub fn ld(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    state.timers.sound = state.registers.v[op.x()];
    state.advance();
    Ok(())
}

/// I += Vx
/// Only touches VF under the `add_i_overflow_flag` quirk.
pub fn addi(op: u16, state: &mut State, env: &mut Env) -> Result<(), Chip8Error> {
    let regs = &mut state.registers;
    regs.i = regs.i.wrapping_add(u16::from(regs.v[op.x()]));
    if env.quirks.add_i_overflow_flag {
        regs.set_vf(regs.i > 0x0FFF);
    }
    state.advance();
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    state.registers.i = u16::from(state.registers.v[op.x()]) * GLYPH_SIZE;
    state.advance();
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let value = state.registers.v[op.x()];
    let digits = [value / 100, value / 10 % 10, value % 10];
    state
        .memory
        .slice_mut(state.registers.i as usize, digits.len())?
        .copy_from_slice(&digits);
    state.advance();
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
/// I itself is left unchanged
pub fn stor(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let x = op.x();
    state
        .memory
        .slice_mut(state.registers.i as usize, x + 1)?
        .copy_from_slice(&state.registers.v[..=x]);
    state.advance();
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
/// I itself is left unchanged
pub fn read(op: u16, state: &mut State, _env: &mut Env) -> Result<(), Chip8Error> {
    let x = op.x();
    let bytes = state.memory.slice(state.registers.i as usize, x + 1)?;
    state.registers.v[..=x].copy_from_slice(bytes);
    state.advance();
    Ok(())
}
