pub mod cpu;
pub mod decode;
pub mod error;
pub mod instruction;
pub mod machine;
pub mod memory;
pub mod registers;
pub mod trace;

pub use cpu::{Cpu8080, CpuSnapshot, ExecState, RunSummary, StopReason};
pub use decode::{decode, decode_bytes, decode_fetched, split_opcode, OpcodeFields};
pub use error::{CpuError, MachineError, MemoryError};
pub use instruction::Instruction;
pub use machine::{Machine, MachineConfig};
pub use memory::Memory;
pub use registers::{FlagBits, Flags, Pair, PairScheme, Reg8, Register, RegisterFile};
pub use trace::{LogTracer, NullTracer, TraceEvent, Tracer};

/// Total addressable memory size (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;

/// Simple bus interface for an Intel 8080-compatible CPU core.
///
/// The CPU uses this trait to access memory without knowing anything about
/// the concrete backing store. Addresses are 16 bits wide, so every access
/// is in range by construction.
pub trait Bus8080 {
    fn mem_read(&mut self, addr: u16) -> u8;
    fn mem_write(&mut self, addr: u16, value: u8);
}
