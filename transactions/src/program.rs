//! VM program parsing.
//!
//! A control program is a flat byte string of opcodes. Push opcodes carry
//! inline data; everything else is a single byte. Only the push rules matter
//! here since the adapter classifies programs but never executes them.

use crate::error::ProgramError;

pub const OP_0: u8 = 0x00;
pub const OP_FALSE: u8 = OP_0;
pub const OP_DATA_1: u8 = 0x01;
pub const OP_DATA_20: u8 = 0x14;
pub const OP_DATA_32: u8 = 0x20;
pub const OP_DATA_75: u8 = 0x4b;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1: u8 = 0x51;
pub const OP_TRUE: u8 = OP_1;
pub const OP_16: u8 = 0x60;
pub const OP_FAIL: u8 = 0x6a;

/// One decoded instruction. `data` borrows the pushed bytes from the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction<'a> {
    pub op: u8,
    pub data: &'a [u8],
}

/// Split a program into instructions, failing on truncated pushes.
pub fn parse_program(prog: &[u8]) -> Result<Vec<Instruction<'_>>, ProgramError> {
    let mut insts = Vec::new();
    let mut pc = 0usize;
    while pc < prog.len() {
        let op = prog[pc];
        let (prefix, len) = match op {
            OP_DATA_1..=OP_DATA_75 => (0, op as usize),
            OP_PUSHDATA1 => {
                let [n] = fixed::<1>(prog, pc)?;
                (1, n as usize)
            }
            OP_PUSHDATA2 => (2, u16::from_le_bytes(fixed::<2>(prog, pc)?) as usize),
            OP_PUSHDATA4 => (4, u32::from_le_bytes(fixed::<4>(prog, pc)?) as usize),
            _ => (0, 0),
        };

        let start = pc + 1 + prefix;
        let remaining = prog.len() - start;
        if len > remaining {
            return Err(ProgramError::ShortProgram {
                opcode: op,
                offset: pc,
                needed: len,
                remaining,
            });
        }
        insts.push(Instruction {
            op,
            data: &prog[start..start + len],
        });
        pc = start + len;
    }
    Ok(insts)
}

/// Read the `N`-byte length prefix following the opcode at `pc`.
fn fixed<const N: usize>(prog: &[u8], pc: usize) -> Result<[u8; N], ProgramError> {
    let start = pc + 1;
    let remaining = prog.len() - start;
    if remaining < N {
        return Err(ProgramError::ShortProgram {
            opcode: prog[pc],
            offset: pc,
            needed: N,
            remaining,
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&prog[start..start + N]);
    Ok(out)
}
