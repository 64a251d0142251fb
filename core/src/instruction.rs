use crate::error::Chip8Error;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// One row of the dispatch table: an opcode matches when `op & mask == value`.
pub struct Instruction {
    pub mask: u16,
    pub value: u16,
    pub mnemonic: &'static str,
    pub operation: Operation,
}

impl Instruction {
    const fn new(mask: u16, value: u16, mnemonic: &'static str, operation: Operation) -> Self {
        Instruction {
            mask,
            value,
            mnemonic,
            operation,
        }
    }

    pub fn matches(&self, op: u16) -> bool {
        op & self.mask == self.value
    }
}

const FIXED: u16 = 0xFFFF;
const CLASS: u16 = 0xF000;
const CLASS_N: u16 = 0xF00F;
const CLASS_KK: u16 = 0xF0FF;

// Each class is scanned in order, so more specific masks come first.
static CLASS_0: [Instruction; 2] = [
    Instruction::new(FIXED, 0x00E0, "CLS", clr),
    Instruction::new(FIXED, 0x00EE, "RET", rts),
];
static CLASS_1: [Instruction; 1] = [Instruction::new(CLASS, 0x1000, "JP", jump)];
static CLASS_2: [Instruction; 1] = [Instruction::new(CLASS, 0x2000, "CALL", call)];
static CLASS_3: [Instruction; 1] = [Instruction::new(CLASS, 0x3000, "SE Vx, kk", ske)];
static CLASS_4: [Instruction; 1] = [Instruction::new(CLASS, 0x4000, "SNE Vx, kk", skne)];
static CLASS_5: [Instruction; 1] = [Instruction::new(CLASS_N, 0x5000, "SE Vx, Vy", skre)];
static CLASS_6: [Instruction; 1] = [Instruction::new(CLASS, 0x6000, "LD Vx, kk", load)];
static CLASS_7: [Instruction; 1] = [Instruction::new(CLASS, 0x7000, "ADD Vx, kk", add)];
static CLASS_8: [Instruction; 9] = [
    Instruction::new(CLASS_N, 0x8000, "LD Vx, Vy", mv),
    Instruction::new(CLASS_N, 0x8001, "OR Vx, Vy", or),
    Instruction::new(CLASS_N, 0x8002, "AND Vx, Vy", and),
    Instruction::new(CLASS_N, 0x8003, "XOR Vx, Vy", xor),
    Instruction::new(CLASS_N, 0x8004, "ADD Vx, Vy", addr),
    Instruction::new(CLASS_N, 0x8005, "SUB Vx, Vy", sub),
    Instruction::new(CLASS_N, 0x8006, "SHR Vx", shr),
    Instruction::new(CLASS_N, 0x8007, "SUBN Vx, Vy", subn),
    Instruction::new(CLASS_N, 0x800E, "SHL Vx", shl),
];
static CLASS_9: [Instruction; 1] = [Instruction::new(CLASS_N, 0x9000, "SNE Vx, Vy", skrne)];
static CLASS_A: [Instruction; 1] = [Instruction::new(CLASS, 0xA000, "LD I, addr", loadi)];
static CLASS_B: [Instruction; 1] = [Instruction::new(CLASS, 0xB000, "JP V0, addr", jumpi)];
static CLASS_C: [Instruction; 1] = [Instruction::new(CLASS, 0xC000, "RND Vx, kk", rnd)];
static CLASS_D: [Instruction; 1] = [Instruction::new(CLASS, 0xD000, "DRW Vx, Vy, n", draw)];
static CLASS_E: [Instruction; 2] = [
    Instruction::new(CLASS_KK, 0xE09E, "SKP Vx", skpr),
    Instruction::new(CLASS_KK, 0xE0A1, "SKNP Vx", skup),
];
static CLASS_F: [Instruction; 9] = [
    Instruction::new(CLASS_KK, 0xF007, "LD Vx, DT", moved),
    Instruction::new(CLASS_KK, 0xF00A, "LD Vx, K", keyd),
    Instruction::new(CLASS_KK, 0xF015, "LD DT, Vx", loads),
    Instruction::new(CLASS_KK, 0xF018, "LD ST, Vx", ld),
    Instruction::new(CLASS_KK, 0xF01E, "ADD I, Vx", addi),
    Instruction::new(CLASS_KK, 0xF029, "LD F, Vx", ldspr),
    Instruction::new(CLASS_KK, 0xF033, "LD B, Vx", bcd),
    Instruction::new(CLASS_KK, 0xF055, "LD [I], Vx", stor),
    Instruction::new(CLASS_KK, 0xF065, "LD Vx, [I]", read),
];

/// Instructions grouped by the opcode's class nibble.
static TABLE: [&[Instruction]; 16] = [
    &CLASS_0, &CLASS_1, &CLASS_2, &CLASS_3, &CLASS_4, &CLASS_5, &CLASS_6, &CLASS_7, &CLASS_8,
    &CLASS_9, &CLASS_A, &CLASS_B, &CLASS_C, &CLASS_D, &CLASS_E, &CLASS_F,
];

/// Selects the Instruction for a given opcode, if there is one.
pub fn lookup(op: u16) -> Option<&'static Instruction> {
    TABLE[op.class() as usize]
        .iter()
        .find(|instruction| instruction.matches(op))
}

/// Selects the Instruction for the opcode fetched from `address`.
pub fn decode(op: u16, address: u16) -> Result<&'static Instruction, Chip8Error> {
    lookup(op).ok_or(Chip8Error::UnknownOpcode {
        opcode: op,
        address,
    })
}

/// Decodes and applies `op` to `state`.
pub fn execute(op: u16, state: &mut State, env: &mut Env) -> Result<(), Chip8Error> {
    let instruction = decode(op, state.pc)?;
    (instruction.operation)(op, state, env)
}

/// Human readable form of an opcode for logging, e.g. `D125 DRW Vx, Vy, n`.
pub fn disassemble(op: u16) -> String {
    match lookup(op) {
        Some(instruction) => format!("{:04X} {}", op, instruction.mnemonic),
        None => format!("{:04X} ???", op),
    }
}
