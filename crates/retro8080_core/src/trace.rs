use crate::instruction::Instruction;

/// One executed instruction, reported after it completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    /// Address the opcode was fetched from.
    pub pc: u16,
    pub opcode: u8,
    pub instruction: Instruction,
    pub cycles: u32,
}

/// Sink for execution events.
pub trait Tracer {
    fn trace(&mut self, event: &TraceEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTracer;

impl Tracer for NullTracer {
    fn trace(&mut self, _event: &TraceEvent) {}
}

/// Forwards events to `log::trace!`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn trace(&mut self, event: &TraceEvent) {
        log::trace!(
            "{:04X}: {:02X}  {:<14} {:>2} cycles",
            event.pc,
            event.opcode,
            event.instruction.to_string(),
            event.cycles
        );
    }
}

/// Records every event in order.
impl Tracer for Vec<TraceEvent> {
    fn trace(&mut self, event: &TraceEvent) {
        self.push(*event);
    }
}
