use super::Cpu8080;
use crate::error::CpuError;
use crate::instruction::Instruction;
use crate::registers::Pair;
use crate::Bus8080;

/// Where execution continues after an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Fall through to the next instruction.
    Next,
    /// PC was loaded directly.
    Jump(u16),
    /// Fall through and stop.
    Halt,
}

impl Cpu8080 {
    /// Apply one decoded instruction. `pc` is the address of its opcode.
    pub(crate) fn execute<B: Bus8080>(
        &mut self,
        bus: &mut B,
        instruction: Instruction,
        pc: u16,
    ) -> Result<Flow, CpuError> {
        match instruction {
            Instruction::Nop => {}
            Instruction::Hlt => return Ok(Flow::Halt),

            Instruction::Mov { dst, src } => {
                let v = self.read_reg8(bus, src);
                self.write_reg8(bus, dst, v);
            }
            Instruction::Mvi { dst, value } => self.write_reg8(bus, dst, value),
            Instruction::Lxi { pair, value } => self.regs.set_pair(pair, value),

            Instruction::Lda { addr } => self.regs.a = bus.mem_read(addr),
            Instruction::Sta { addr } => bus.mem_write(addr, self.regs.a),
            Instruction::Ldax { pair } => {
                let addr = self.regs.pair(pair);
                self.regs.a = bus.mem_read(addr);
            }
            Instruction::Stax { pair } => {
                let addr = self.regs.pair(pair);
                bus.mem_write(addr, self.regs.a);
            }
            Instruction::Lhld { addr } => {
                self.regs.l = bus.mem_read(addr);
                self.regs.h = bus.mem_read(addr.wrapping_add(1));
            }
            Instruction::Shld { addr } => {
                // Store L then H
                bus.mem_write(addr, self.regs.l);
                bus.mem_write(addr.wrapping_add(1), self.regs.h);
            }

            Instruction::Sphl => self.regs.sp = self.regs.hl(),
            Instruction::Pchl => return Ok(Flow::Jump(self.regs.hl())),
            Instruction::Xchg => {
                let de = self.regs.pair(Pair::DE);
                let hl = self.regs.hl();
                self.regs.set_pair(Pair::DE, hl);
                self.regs.set_pair(Pair::HL, de);
            }

            Instruction::Add { src } => {
                let v = self.read_reg8(bus, src);
                self.add(v, false);
            }
            Instruction::Adc { src } => {
                let v = self.read_reg8(bus, src);
                let carry = self.regs.flags.cy;
                self.add(v, carry);
            }
            Instruction::Sub { src } => {
                let v = self.read_reg8(bus, src);
                self.sub(v);
            }

            Instruction::Invalid { opcode } => {
                return Err(CpuError::InvalidOpcode { opcode, pc });
            }
            Instruction::Unimplemented { opcode } => {
                return Err(CpuError::Unimplemented { opcode, pc });
            }
        }
        Ok(Flow::Next)
    }

    fn add(&mut self, value: u8, carry_in: bool) {
        let carry = u8::from(carry_in);
        let a = self.regs.a;
        let sum = a as u16 + value as u16 + carry as u16;
        let res = sum as u8;
        let flags = &mut self.regs.flags;
        flags.ac = (a & 0x0f) + (value & 0x0f) + carry > 0x0f;
        flags.cy = sum > 0xff;
        flags.set_szp(res);
        self.regs.a = res;
    }

    fn sub(&mut self, value: u8) {
        let a = self.regs.a;
        let res = a.wrapping_sub(value);
        let flags = &mut self.regs.flags;
        // The 8080 subtracts by adding the complement; AC is the carry out of
        // bit 3 of that addition.
        flags.ac = (a & 0x0f) + (!value & 0x0f) + 1 > 0x0f;
        flags.cy = a < value;
        flags.set_szp(res);
        self.regs.a = res;
    }
}
