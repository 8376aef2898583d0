use thiserror::Error;

/// Access to the flat memory outside of `0x0000..=0xFFFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("memory address 0x{address:X} is out of range (0x0000-0xFFFF)")]
    AddressOutOfRange { address: usize },
}

/// Fatal conditions detected by the execution core.
///
/// Every variant stops the run loop at the instruction boundary where it was
/// detected. Registers, memory and PC keep the values left by the last
/// instruction that completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuError {
    /// Undocumented opcode byte.
    #[error("invalid opcode 0x{opcode:02X} at 0x{pc:04X}")]
    InvalidOpcode { opcode: u8, pc: u16 },

    /// Documented 8080 opcode without semantics in this core.
    #[error("unimplemented opcode 0x{opcode:02X} at 0x{pc:04X}")]
    Unimplemented { opcode: u8, pc: u16 },

    #[error("CPU is halted")]
    Halted,
}

impl CpuError {
    /// The opcode byte that stopped execution, if any.
    pub fn opcode(&self) -> Option<u8> {
        match *self {
            CpuError::InvalidOpcode { opcode, .. } | CpuError::Unimplemented { opcode, .. } => {
                Some(opcode)
            }
            CpuError::Halted => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    Cpu(#[from] CpuError),
}
