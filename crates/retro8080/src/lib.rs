use anyhow::{Context, Result};
use retro8080_core::{Machine, MachineConfig, Pair, RunSummary};

/// `MOV D,C; MOV E,M; ADD B; HLT`
pub const DEMO_PROGRAM: &[u8] = &[0x51, 0x5e, 0x80, 0x76];

/// Where a run gets its program from.
pub enum ProgramSource {
    /// The bundled demo with its register preset.
    Demo,
    /// A flat binary image.
    Image(Vec<u8>),
}

/// Build a machine for `source`, run it, and return it for inspection.
pub fn run(config: MachineConfig, source: ProgramSource) -> Result<(Machine, RunSummary)> {
    let mut machine = Machine::with_config(config);
    match source {
        ProgramSource::Demo => load_demo(&mut machine)?,
        ProgramSource::Image(image) => machine.load_program(&image).with_context(|| {
            format!(
                "failed to load {} byte image at 0x{:04X}",
                image.len(),
                config.load_address
            )
        })?,
    }

    log::info!(
        "Running from 0x{:04X} (image at 0x{:04X})",
        machine.cpu().pc,
        machine.config().load_address
    );
    let summary = machine
        .run()
        .with_context(|| format!("execution stopped: {}", machine.cpu()))?;
    log::info!(
        "Stopped ({:?}) after {} instructions, {} cycles",
        summary.stop,
        summary.steps,
        summary.cycles
    );
    Ok((machine, summary))
}

/// Load the demo program and the register/memory state it expects.
pub fn load_demo(machine: &mut Machine) -> Result<()> {
    machine
        .load_program(DEMO_PROGRAM)
        .context("failed to load demo program")?;
    let hl = 0x30;
    let cpu = machine.cpu_mut();
    cpu.regs.b = 2;
    cpu.regs.c = 75;
    cpu.regs.a = 255;
    cpu.regs.set_pair(Pair::HL, hl);
    machine.memory_mut().write(hl, 6);
    Ok(())
}
