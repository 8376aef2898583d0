//! End-to-end programs run through `Machine`.

use retro8080_core::{
    CpuError, ExecState, Machine, MachineConfig, MachineError, Pair, StopReason, TraceEvent,
};

#[test]
fn mov_mov_add_scenario() {
    let mut machine = Machine::new();
    machine.load_program(&[0x51, 0x5e, 0x80]).unwrap();
    machine.memory_mut().write(0x30, 6);
    {
        let regs = &mut machine.cpu_mut().regs;
        regs.b = 2;
        regs.c = 75;
        regs.a = 255;
        regs.set_pair(Pair::HL, 0x30);
    }

    for _ in 0..3 {
        machine.step().unwrap();
    }

    let cpu = machine.cpu();
    assert_eq!(cpu.regs.d, 75);
    assert_eq!(cpu.regs.e, 6);
    assert_eq!(cpu.regs.a, 1);
    assert!(cpu.flags().cy);
}

#[test]
fn lxi_then_read_pair_scenario() {
    let mut machine = Machine::new();
    machine.load_program(&[0x01, 0x34, 0x12]).unwrap();
    machine.step().unwrap();

    let regs = &machine.cpu().regs;
    assert_eq!(regs.pair(Pair::BC), 0x1234);
    assert_eq!(regs.b, 0x12);
    assert_eq!(regs.c, 0x34);
}

#[test]
fn unmapped_opcode_scenario() {
    let mut machine = Machine::new();
    machine.load_program(&[0b1100_0000]).unwrap();
    let before = machine.cpu().regs;

    let err = machine.run().unwrap_err();
    match err {
        MachineError::Cpu(cpu_err) => assert_eq!(cpu_err.opcode(), Some(0xc0)),
        other => panic!("expected CPU error, got {other:?}"),
    }
    assert_eq!(machine.cpu().regs, before);
    assert_eq!(machine.cpu().state(), ExecState::Halted);
    assert!(matches!(
        machine.step(),
        Err(MachineError::Cpu(CpuError::Halted))
    ));
}

#[test]
fn copy_block_with_pair_instructions() {
    // LXI H,0x2000   ; source
    // LXI D,0x3000   ; destination
    // MOV A,M
    // XCHG
    // MOV M,A
    // XCHG
    // LHLD 0x2000    ; HL <- the two source bytes
    // SHLD 0x3002
    // LXI SP,0x4000
    // HLT
    let program = [
        0x21, 0x00, 0x20, 0x11, 0x00, 0x30, 0x7e, 0xeb, 0x77, 0xeb, 0x2a, 0x00, 0x20, 0x22,
        0x02, 0x30, 0x31, 0x00, 0x40, 0x76,
    ];
    let config = MachineConfig::builder()
        .load_address(0x0100)
        .max_steps(1_000)
        .build();
    let mut machine = Machine::with_config(config);
    machine.load_program(&program).unwrap();
    machine.memory_mut().write(0x2000, 0xcd);
    machine.memory_mut().write(0x2001, 0xab);

    let mut events: Vec<TraceEvent> = Vec::new();
    let summary = machine.run_with(&mut events).unwrap();
    assert_eq!(summary.stop, StopReason::Halted);
    assert_eq!(summary.steps, 10);
    assert_eq!(events.len(), 10);

    let mem = machine.memory();
    assert_eq!(mem.read(0x3000), 0xcd);
    assert_eq!(mem.read(0x3002), 0xcd);
    assert_eq!(mem.read(0x3003), 0xab);
    assert_eq!(machine.cpu().regs.hl(), 0xabcd);
    assert_eq!(machine.cpu().regs.sp, 0x4000);
    assert_eq!(summary.cycles, machine.cpu().cycles());
}

#[test]
fn pchl_loop_runs_until_step_limit() {
    // LXI H,0x0100; PCHL
    let config = MachineConfig::builder()
        .load_address(0x0100)
        .max_steps(9)
        .build();
    let mut machine = Machine::with_config(config);
    machine.load_program(&[0x21, 0x00, 0x01, 0xe9]).unwrap();

    let summary = machine.run().unwrap();
    assert_eq!(summary.stop, StopReason::StepLimit);
    assert_eq!(summary.steps, 9);
    // Nine steps end just after an LXI.
    assert_eq!(machine.cpu().pc, 0x0103);
}
