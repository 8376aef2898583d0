use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Bit layout of the F register.
    ///
    /// From MSB to LSB: `S Z 0 AC 0 P 1 CY`. Bits 3 and 5 always read as 0
    /// and bit 1 always reads as 1.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct FlagBits: u8 {
        const S = 0b1000_0000;
        const Z = 0b0100_0000;
        const AC = 0b0001_0000;
        const P = 0b0000_0100;
        const ALWAYS_ONE = 0b0000_0010;
        const CY = 0b0000_0001;
    }
}

/// CPU flags for Intel 8080.
///
/// The packed F register is always produced from these booleans, so the two
/// views cannot drift apart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub s: bool,  // sign
    pub z: bool,  // zero
    pub ac: bool, // auxiliary carry
    pub p: bool,  // parity
    pub cy: bool, // carry
}

impl Flags {
    pub fn bits(self) -> FlagBits {
        let mut f = FlagBits::ALWAYS_ONE;
        f.set(FlagBits::S, self.s);
        f.set(FlagBits::Z, self.z);
        f.set(FlagBits::AC, self.ac);
        f.set(FlagBits::P, self.p);
        f.set(FlagBits::CY, self.cy);
        f
    }

    pub fn to_u8(self) -> u8 {
        self.bits().bits()
    }

    /// Load all five flags from a packed F value. Fixed bits are ignored.
    pub fn from_u8(&mut self, v: u8) {
        let f = FlagBits::from_bits_truncate(v);
        self.s = f.contains(FlagBits::S);
        self.z = f.contains(FlagBits::Z);
        self.ac = f.contains(FlagBits::AC);
        self.p = f.contains(FlagBits::P);
        self.cy = f.contains(FlagBits::CY);
    }

    /// Set S, Z and P from an 8-bit result.
    pub fn set_szp(&mut self, value: u8) {
        self.s = (value & 0x80) != 0;
        self.z = value == 0;
        self.p = value.count_ones() % 2 == 0;
    }
}

/// The eight 8-bit registers of the register file, F included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Register {
    B,
    C,
    D,
    E,
    H,
    L,
    F,
    A,
}

impl Register {
    /// Snapshot order of the register file.
    pub const ALL: [Register; 8] = [
        Register::B,
        Register::C,
        Register::D,
        Register::E,
        Register::H,
        Register::L,
        Register::F,
        Register::A,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Register::B => "B",
            Register::C => "C",
            Register::D => "D",
            Register::E => "E",
            Register::H => "H",
            Register::L => "L",
            Register::F => "F",
            Register::A => "A",
        }
    }
}

/// 3-bit register operand as encoded in opcodes.
///
/// Index `0b110` is not a register: it names the memory cell addressed by
/// the HL pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg8 {
    B = 0,
    C = 1,
    D = 2,
    E = 3,
    H = 4,
    L = 5,
    M = 6,
    A = 7,
}

impl Reg8 {
    /// Decode a 3-bit operand field. Bits above bit 2 are ignored.
    pub fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => Reg8::B,
            1 => Reg8::C,
            2 => Reg8::D,
            3 => Reg8::E,
            4 => Reg8::H,
            5 => Reg8::L,
            6 => Reg8::M,
            _ => Reg8::A,
        }
    }

    #[inline]
    pub fn is_memory(self) -> bool {
        self == Reg8::M
    }

    /// Register backing this operand, or `None` for the memory operand.
    pub fn register(self) -> Option<Register> {
        match self {
            Reg8::B => Some(Register::B),
            Reg8::C => Some(Register::C),
            Reg8::D => Some(Register::D),
            Reg8::E => Some(Register::E),
            Reg8::H => Some(Register::H),
            Reg8::L => Some(Register::L),
            Reg8::M => None,
            Reg8::A => Some(Register::A),
        }
    }
}

impl fmt::Display for Reg8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.register() {
            Some(r) => f.write_str(r.name()),
            None => f.write_str("M"),
        }
    }
}

/// Pairing scheme selected by an instruction family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairScheme {
    /// BC, DE, HL, SP (LXI, DAD, INX, ...).
    Sp,
    /// BC, DE, HL, AF (PUSH, POP).
    Psw,
}

/// 16-bit register pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pair {
    BC,
    DE,
    HL,
    SP,
    AF,
}

impl Pair {
    /// Decode a 2-bit pair field under the given scheme.
    pub fn select(index: u8, scheme: PairScheme) -> Self {
        match (index & 0x03, scheme) {
            (0, _) => Pair::BC,
            (1, _) => Pair::DE,
            (2, _) => Pair::HL,
            (_, PairScheme::Sp) => Pair::SP,
            (_, PairScheme::Psw) => Pair::AF,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pair::BC => "B",
            Pair::DE => "D",
            Pair::HL => "H",
            Pair::SP => "SP",
            Pair::AF => "PSW",
        }
    }
}

/// Register file of the 8080.
///
/// Pairs are never stored: they are recomputed from the two underlying
/// registers on every read and split on every write. SP is a dedicated
/// 16-bit register reachable only through [`Pair::SP`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub flags: Flags,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self, reg: Register) -> u8 {
        match reg {
            Register::B => self.b,
            Register::C => self.c,
            Register::D => self.d,
            Register::E => self.e,
            Register::H => self.h,
            Register::L => self.l,
            Register::F => self.flags.to_u8(),
            Register::A => self.a,
        }
    }

    pub fn write(&mut self, reg: Register, value: u8) {
        match reg {
            Register::B => self.b = value,
            Register::C => self.c = value,
            Register::D => self.d = value,
            Register::E => self.e = value,
            Register::H => self.h = value,
            Register::L => self.l = value,
            Register::F => self.flags.from_u8(value),
            Register::A => self.a = value,
        }
    }

    pub fn pair(&self, pair: Pair) -> u16 {
        match pair {
            Pair::BC => u16::from_be_bytes([self.b, self.c]),
            Pair::DE => u16::from_be_bytes([self.d, self.e]),
            Pair::HL => u16::from_be_bytes([self.h, self.l]),
            Pair::SP => self.sp,
            Pair::AF => u16::from_be_bytes([self.a, self.flags.to_u8()]),
        }
    }

    pub fn set_pair(&mut self, pair: Pair, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        match pair {
            Pair::BC => {
                self.b = hi;
                self.c = lo;
            }
            Pair::DE => {
                self.d = hi;
                self.e = lo;
            }
            Pair::HL => {
                self.h = hi;
                self.l = lo;
            }
            Pair::SP => self.sp = value,
            Pair::AF => {
                self.a = hi;
                self.flags.from_u8(lo);
            }
        }
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        self.pair(Pair::HL)
    }
}
