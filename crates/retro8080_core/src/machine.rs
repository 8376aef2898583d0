use crate::cpu::{Cpu8080, RunSummary};
use crate::error::MachineError;
use crate::memory::Memory;
use crate::trace::{LogTracer, Tracer};
use typed_builder::TypedBuilder;

/// Host-side settings for a [`Machine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct MachineConfig {
    /// Where program images are copied to.
    #[builder(default = 0x0000)]
    pub load_address: u16,
    /// Initial PC after loading. Defaults to `load_address`.
    #[builder(default, setter(strip_option))]
    pub start_pc: Option<u16>,
    /// Upper bound on instructions executed by [`Machine::run`].
    ///
    /// NOP does not stop the core, so zeroed memory is an endless NOP slide
    /// unless the program ends in HLT.
    #[builder(default, setter(strip_option))]
    pub max_steps: Option<u64>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MachineConfig {
    pub fn entry_point(&self) -> u16 {
        self.start_pc.unwrap_or(self.load_address)
    }
}

/// One 8080 core bound to its own 64 KiB of memory.
#[derive(Default)]
pub struct Machine {
    cpu: Cpu8080,
    memory: Memory,
    config: MachineConfig,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MachineConfig) -> Self {
        let mut machine = Self {
            cpu: Cpu8080::new(),
            memory: Memory::new(),
            config,
        };
        machine.cpu.pc = config.entry_point();
        machine
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn cpu(&self) -> &Cpu8080 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu8080 {
        &mut self.cpu
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Reset the CPU, preserving memory contents.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.cpu.pc = self.config.entry_point();
    }

    /// Copy a flat program image to the configured load address and point
    /// PC at the entry point.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), MachineError> {
        self.memory.load(self.config.load_address, image)?;
        self.cpu.pc = self.config.entry_point();
        log::debug!(
            "loaded {} bytes at 0x{:04X}, entry 0x{:04X}",
            image.len(),
            self.config.load_address,
            self.cpu.pc
        );
        Ok(())
    }

    pub fn step(&mut self) -> Result<u32, MachineError> {
        Ok(self.cpu.step(&mut self.memory)?)
    }

    /// Run until HLT, an error, or the configured step limit.
    pub fn run(&mut self) -> Result<RunSummary, MachineError> {
        self.run_with(&mut LogTracer)
    }

    pub fn run_with<T: Tracer + ?Sized>(
        &mut self,
        tracer: &mut T,
    ) -> Result<RunSummary, MachineError> {
        let summary = self
            .cpu
            .run_with(&mut self.memory, self.config.max_steps, tracer)?;
        Ok(summary)
    }
}
