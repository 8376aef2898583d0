use crate::decode::decode_fetched;
use crate::error::CpuError;
use crate::registers::{Flags, Pair, Reg8, Register, RegisterFile};
use crate::trace::{LogTracer, TraceEvent, Tracer};
use crate::Bus8080;
use std::fmt;

mod exec;

pub(crate) use exec::Flow;

/// Execution state of the core.
///
/// `Halted` is terminal: only [`Cpu8080::reset`] brings the CPU back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecState {
    #[default]
    Running,
    Halted,
}

/// Why a bounded run returned without an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// HLT was executed.
    Halted,
    /// The step budget ran out first.
    StepLimit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub cycles: u64,
    pub stop: StopReason,
}

/// Intel 8080 execution core.
///
/// Owns the register file and PC. Memory is passed in on every call so the
/// same core can drive any [`Bus8080`].
#[derive(Clone, Debug, Default)]
pub struct Cpu8080 {
    pub regs: RegisterFile,
    pub pc: u16,
    state: ExecState,
    cycles: u64,
    steps: u64,
}

impl Cpu8080 {
    /// Create a new CPU instance in reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all registers to their power-on values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn state(&self) -> ExecState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == ExecState::Halted
    }

    /// Total cycles consumed since reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Instructions completed since reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn flags(&self) -> Flags {
        self.regs.flags
    }

    /// Read an operand register. `M` reads memory at HL.
    pub fn read_reg8<B: Bus8080>(&self, bus: &mut B, reg: Reg8) -> u8 {
        match reg.register() {
            Some(r) => self.regs.read(r),
            None => bus.mem_read(self.regs.hl()),
        }
    }

    /// Write an operand register. `M` writes memory at HL.
    pub fn write_reg8<B: Bus8080>(&mut self, bus: &mut B, reg: Reg8, value: u8) {
        match reg.register() {
            Some(r) => self.regs.write(r, value),
            None => bus.mem_write(self.regs.hl(), value),
        }
    }

    /// Execute a single instruction and return the number of cycles consumed.
    ///
    /// Events go to [`LogTracer`].
    pub fn step<B: Bus8080>(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        self.step_with(bus, &mut LogTracer)
    }

    /// Execute a single instruction, reporting it to `tracer`.
    ///
    /// On error the CPU halts and nothing else changes: PC still points at
    /// the offending opcode.
    pub fn step_with<B: Bus8080, T: Tracer + ?Sized>(
        &mut self,
        bus: &mut B,
        tracer: &mut T,
    ) -> Result<u32, CpuError> {
        if self.is_halted() {
            return Err(CpuError::Halted);
        }

        let pc = self.pc;
        let opcode = bus.mem_read(pc);
        let instruction = decode_fetched(bus, pc, opcode);

        let flow = match self.execute(bus, instruction, pc) {
            Ok(flow) => flow,
            Err(err) => {
                log::warn!("8080 stopped: {err}");
                self.state = ExecState::Halted;
                return Err(err);
            }
        };

        match flow {
            Flow::Next => self.pc = pc.wrapping_add(instruction.byte_len()),
            Flow::Jump(target) => self.pc = target,
            Flow::Halt => {
                self.pc = pc.wrapping_add(instruction.byte_len());
                self.state = ExecState::Halted;
                log::debug!("8080 halted at 0x{pc:04X}");
            }
        }

        let cycles = instruction.cycles();
        self.cycles = self.cycles.saturating_add(cycles as u64);
        self.steps += 1;
        tracer.trace(&TraceEvent {
            pc,
            opcode,
            instruction,
            cycles,
        });
        Ok(cycles)
    }

    /// Run until HLT or an error.
    pub fn run<B: Bus8080>(&mut self, bus: &mut B) -> Result<RunSummary, CpuError> {
        self.run_with(bus, None, &mut LogTracer)
    }

    /// Run until HLT, an error, or `max_steps` instructions have executed.
    pub fn run_with<B: Bus8080, T: Tracer + ?Sized>(
        &mut self,
        bus: &mut B,
        max_steps: Option<u64>,
        tracer: &mut T,
    ) -> Result<RunSummary, CpuError> {
        if self.is_halted() {
            return Err(CpuError::Halted);
        }
        log::debug!("8080 running from 0x{:04X}", self.pc);

        let mut steps: u64 = 0;
        let mut cycles: u64 = 0;
        loop {
            if max_steps.is_some_and(|max| steps >= max) {
                return Ok(RunSummary {
                    steps,
                    cycles,
                    stop: StopReason::StepLimit,
                });
            }
            let c = self.step_with(bus, tracer)?;
            steps += 1;
            cycles = cycles.saturating_add(c as u64);
            if self.is_halted() {
                return Ok(RunSummary {
                    steps,
                    cycles,
                    stop: StopReason::Halted,
                });
            }
        }
    }

    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            registers: Register::ALL.map(|r| self.regs.read(r)),
            pc: self.pc,
            sp: self.regs.pair(Pair::SP),
            flags: self.regs.flags,
        }
    }
}

impl fmt::Display for Cpu8080 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}

/// Point-in-time copy of the visible CPU state.
///
/// `registers` follows [`Register::ALL`] order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuSnapshot {
    pub registers: [u8; 8],
    pub pc: u16,
    pub sp: u16,
    pub flags: Flags,
}

impl fmt::Display for CpuSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (reg, value) in Register::ALL.iter().zip(self.registers) {
            write!(f, "{}={}; ", reg.name(), value)?;
        }
        write!(f, "PC={}; SP={}; ", self.pc, self.sp)?;
        write!(
            f,
            "Flag_S={}; Flag_Z={}; Flag_A={}; Flag_P={}; Flag_C={}",
            u8::from(self.flags.s),
            u8::from(self.flags.z),
            u8::from(self.flags.ac),
            u8::from(self.flags.p),
            u8::from(self.flags.cy)
        )
    }
}
