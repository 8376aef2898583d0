use crate::registers::{Pair, Reg8};
use std::fmt;

/// One decoded 8080 instruction.
///
/// Immediates and absolute addresses are resolved once at decode time, so
/// executing a value never reads the instruction stream again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Nop,
    Hlt,
    /// MOV dst,src
    Mov { dst: Reg8, src: Reg8 },
    /// MVI dst,d8
    Mvi { dst: Reg8, value: u8 },
    /// LXI rp,d16 (BC, DE, HL or SP)
    Lxi { pair: Pair, value: u16 },
    Lda { addr: u16 },
    Sta { addr: u16 },
    /// LDAX B / LDAX D
    Ldax { pair: Pair },
    /// STAX B / STAX D
    Stax { pair: Pair },
    Lhld { addr: u16 },
    Shld { addr: u16 },
    Sphl,
    Pchl,
    Xchg,
    Add { src: Reg8 },
    Adc { src: Reg8 },
    Sub { src: Reg8 },
    /// Undocumented opcode byte.
    Invalid { opcode: u8 },
    /// Documented opcode with no semantics in this core yet.
    Unimplemented { opcode: u8 },
}

impl Instruction {
    /// Size of the instruction in bytes, opcode included.
    pub fn byte_len(&self) -> u16 {
        match self {
            Instruction::Mvi { .. } => 2,
            Instruction::Lxi { .. }
            | Instruction::Lda { .. }
            | Instruction::Sta { .. }
            | Instruction::Lhld { .. }
            | Instruction::Shld { .. } => 3,
            _ => 1,
        }
    }

    /// Clock cycles consumed, including the extra cost of an `M` operand.
    pub fn cycles(&self) -> u32 {
        match *self {
            Instruction::Nop => 4,
            Instruction::Hlt => 7,
            // Data sheet: MOV r,r takes 5 states, 7 with M.
            Instruction::Mov { dst, src } => {
                if dst.is_memory() || src.is_memory() {
                    7
                } else {
                    5
                }
            }
            Instruction::Mvi { dst, .. } => {
                if dst.is_memory() {
                    10
                } else {
                    7
                }
            }
            Instruction::Lxi { .. } => 10,
            Instruction::Lda { .. } | Instruction::Sta { .. } => 13,
            Instruction::Ldax { .. } | Instruction::Stax { .. } => 7,
            Instruction::Lhld { .. } | Instruction::Shld { .. } => 16,
            Instruction::Sphl | Instruction::Pchl => 5,
            Instruction::Xchg => 4,
            Instruction::Add { src } | Instruction::Adc { src } | Instruction::Sub { src } => {
                if src.is_memory() {
                    7
                } else {
                    4
                }
            }
            Instruction::Invalid { .. } | Instruction::Unimplemented { .. } => 4,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Nop => "NOP",
            Instruction::Hlt => "HLT",
            Instruction::Mov { .. } => "MOV",
            Instruction::Mvi { .. } => "MVI",
            Instruction::Lxi { .. } => "LXI",
            Instruction::Lda { .. } => "LDA",
            Instruction::Sta { .. } => "STA",
            Instruction::Ldax { .. } => "LDAX",
            Instruction::Stax { .. } => "STAX",
            Instruction::Lhld { .. } => "LHLD",
            Instruction::Shld { .. } => "SHLD",
            Instruction::Sphl => "SPHL",
            Instruction::Pchl => "PCHL",
            Instruction::Xchg => "XCHG",
            Instruction::Add { .. } => "ADD",
            Instruction::Adc { .. } => "ADC",
            Instruction::Sub { .. } => "SUB",
            Instruction::Invalid { .. } => "???",
            Instruction::Unimplemented { .. } => "DB",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.mnemonic();
        match *self {
            Instruction::Mov { dst, src } => write!(f, "{m} {dst},{src}"),
            Instruction::Mvi { dst, value } => write!(f, "{m} {dst},0x{value:02X}"),
            Instruction::Lxi { pair, value } => write!(f, "{m} {},0x{value:04X}", pair.name()),
            Instruction::Lda { addr }
            | Instruction::Sta { addr }
            | Instruction::Lhld { addr }
            | Instruction::Shld { addr } => write!(f, "{m} 0x{addr:04X}"),
            Instruction::Ldax { pair } | Instruction::Stax { pair } => {
                write!(f, "{m} {}", pair.name())
            }
            Instruction::Add { src } | Instruction::Adc { src } | Instruction::Sub { src } => {
                write!(f, "{m} {src}")
            }
            Instruction::Invalid { opcode } | Instruction::Unimplemented { opcode } => {
                write!(f, "{m} 0x{opcode:02X}")
            }
            _ => f.write_str(m),
        }
    }
}
