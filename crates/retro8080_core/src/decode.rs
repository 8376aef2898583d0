//! Opcode decoding.
//!
//! 8080 opcodes split into three fields, `xx yyy zzz` (bits 7-6, 5-3, 2-0).
//! [`decode_bytes`] maps every byte value onto exactly one [`Instruction`]:
//! anything not covered by a real instruction becomes `Invalid` (undocumented
//! bytes) or `Unimplemented` (documented but not yet given semantics).

use crate::instruction::Instruction;
use crate::registers::{Pair, PairScheme, Reg8};
use crate::Bus8080;

/// Undocumented opcode bytes of the 8080.
const UNDOCUMENTED: [u8; 12] = [
    0x08, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38, 0xcb, 0xd9, 0xdd, 0xed, 0xfd,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpcodeFields {
    pub xx: u8,
    pub yyy: u8,
    pub zzz: u8,
}

pub fn split_opcode(opcode: u8) -> OpcodeFields {
    OpcodeFields {
        xx: opcode >> 6,
        yyy: (opcode >> 3) & 0x07,
        zzz: opcode & 0x07,
    }
}

/// Decode the instruction at `pc`.
///
/// Reads the opcode and then only the operand bytes that instruction has.
/// Operand addresses wrap at 0xFFFF.
pub fn decode<B: Bus8080>(bus: &mut B, pc: u16) -> Instruction {
    let opcode = bus.mem_read(pc);
    decode_fetched(bus, pc, opcode)
}

/// Decode an opcode already fetched from `pc`, reading its operand bytes.
pub fn decode_fetched<B: Bus8080>(bus: &mut B, pc: u16, opcode: u8) -> Instruction {
    let operands = decode_bytes(opcode, 0, 0).byte_len() - 1;
    let lo = if operands >= 1 {
        bus.mem_read(pc.wrapping_add(1))
    } else {
        0
    };
    let hi = if operands >= 2 {
        bus.mem_read(pc.wrapping_add(2))
    } else {
        0
    };
    decode_bytes(opcode, lo, hi)
}

/// Decode an opcode given the two bytes that follow it.
///
/// Bytes that the instruction does not use are ignored.
pub fn decode_bytes(opcode: u8, lo: u8, hi: u8) -> Instruction {
    let word = u16::from_le_bytes([lo, hi]);
    let OpcodeFields { xx, yyy, zzz } = split_opcode(opcode);

    match (xx, yyy, zzz) {
        (0b00, 0b000, 0b000) => Instruction::Nop,
        (0b00, 0b000 | 0b010, 0b010) => Instruction::Stax {
            pair: Pair::select(yyy >> 1, PairScheme::Sp),
        },
        (0b00, _, 0b001) if yyy & 1 == 0 => Instruction::Lxi {
            pair: Pair::select(yyy >> 1, PairScheme::Sp),
            value: word,
        },
        (0b00, _, 0b110) => Instruction::Mvi {
            dst: Reg8::from_index(yyy),
            value: lo,
        },
        (0b00, 0b001 | 0b011, 0b010) => Instruction::Ldax {
            pair: Pair::select(yyy >> 1, PairScheme::Sp),
        },
        (0b00, 0b100, 0b010) => Instruction::Shld { addr: word },
        (0b00, 0b101, 0b010) => Instruction::Lhld { addr: word },
        (0b00, 0b110, 0b010) => Instruction::Sta { addr: word },
        (0b00, 0b111, 0b010) => Instruction::Lda { addr: word },

        // 0x76 sits in the middle of the MOV block.
        (0b01, 0b110, 0b110) => Instruction::Hlt,
        (0b01, _, _) => Instruction::Mov {
            dst: Reg8::from_index(yyy),
            src: Reg8::from_index(zzz),
        },

        (0b10, 0b000, _) => Instruction::Add {
            src: Reg8::from_index(zzz),
        },
        (0b10, 0b001, _) => Instruction::Adc {
            src: Reg8::from_index(zzz),
        },
        (0b10, 0b010, _) => Instruction::Sub {
            src: Reg8::from_index(zzz),
        },

        (0b11, 0b101, 0b001) => Instruction::Pchl,
        (0b11, 0b101, 0b011) => Instruction::Xchg,
        (0b11, 0b111, 0b001) => Instruction::Sphl,

        _ if UNDOCUMENTED.contains(&opcode) => Instruction::Invalid { opcode },
        _ => Instruction::Unimplemented { opcode },
    }
}
