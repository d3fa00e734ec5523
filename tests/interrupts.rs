mod common;

use common::{Access, Machine, IRQ_HANDLER, NMI_HANDLER};
use rust_nes_cpu::{CpuConfig, UnmaskPolicy};

const CLI: u8 = 0x58;
const SEI: u8 = 0x78;
const NOP: u8 = 0xEA;

#[test]
fn nmi_wins_when_both_are_pending() {
    let mut m = Machine::new(&[CLI, NOP, NOP, NOP, NOP]);
    // CLI, then the NOP it shares its last cycle with.
    m.run(3);
    m.lines.assert_irq();
    m.lines.signal_nmi();

    m.run_until_fetch_at(NMI_HANDLER);
    assert_eq!(m.reads_of(0xFFFA), 1);
    assert_eq!(m.reads_of(0xFFFB), 1);
    assert_eq!(m.reads_of(0xFFFE), 0);
    assert!(!m.lines.nmi_edge());
    // The core never acknowledges IRQ sources.
    assert!(m.lines.irq_asserted());

    let (ret, p) = m.last_frame();
    assert_eq!(ret, 0x8003);
    assert_eq!(p & 0x30, 0x20, "hardware interrupts push B clear");
    assert!(m.cpu.status().irq_disable);
}

#[test]
fn interrupt_sequence_takes_seven_cycles_and_does_not_advance_pc() {
    let mut m = Machine::new(&[CLI, NOP, NOP, NOP]);
    m.lines.assert_irq();
    m.run(3);
    m.bus.log.clear();

    // The rest of the first NOP, then seven cycles from the replaced fetch to the handler.
    assert_eq!(m.run_until_fetch_at(IRQ_HANDLER), 1 + 7);
    // Dummy read of the NOP, the replaced fetch, and the dummy read of the sequence.
    assert_eq!(m.reads_of(0x8002), 3);
    assert_eq!(m.reads_of(0x8003), 0);
    assert_eq!(m.last_frame().0, 0x8002);
}

#[test]
fn brk_pushes_pc_plus_two_with_b_set() {
    let mut m = Machine::new(&[0x00, 0xFF, NOP]);
    assert_eq!(m.timings(1), vec![7]);
    let (ret, p) = m.last_frame();
    assert_eq!(ret, 0x8002);
    assert_eq!(p & 0x30, 0x30);
    assert!(m.cpu.status().irq_disable);
    assert_eq!(m.cpu.s(), 0xFA);
}

#[test]
fn cli_lets_one_more_instruction_run() {
    let mut m = Machine::new(&[CLI, NOP, NOP, NOP]);
    m.lines.assert_irq();
    m.run_until_fetch_at(IRQ_HANDLER);
    assert_eq!(m.last_frame().0, 0x8002);
}

#[test]
fn immediate_unmask_takes_irq_in_place_of_the_next_instruction() {
    let config = CpuConfig {
        unmask_policy: UnmaskPolicy::Immediate,
    };
    let mut m = Machine::with_config(0x8000, &[CLI, NOP, NOP, NOP], config);
    m.lines.assert_irq();
    m.run_until_fetch_at(IRQ_HANDLER);
    let (ret, p) = m.last_frame();
    assert_eq!(ret, 0x8001);
    assert_eq!(p & 0x04, 0, "I was already clear when pushed");
}

#[test]
fn immediate_unmask_without_irq_changes_nothing() {
    let config = CpuConfig {
        unmask_policy: UnmaskPolicy::Immediate,
    };
    let mut m = Machine::with_config(0x8000, &[CLI, NOP, NOP], config);
    assert_eq!(m.timings(2), vec![2, 2]);
    assert!(!m.cpu.status().irq_disable);
    assert_eq!(m.cpu.pc(), 0x8003);
}

#[test]
fn irq_right_after_sei_is_still_taken_with_i_pushed_set() {
    let mut m = Machine::new(&[CLI, SEI, NOP, NOP]);
    m.lines.assert_irq();
    m.run_until_fetch_at(IRQ_HANDLER);
    let (ret, p) = m.last_frame();
    assert_eq!(ret, 0x8002);
    assert_eq!(p & 0x04, 0x04);
}

#[test]
fn plp_unmask_is_delayed_like_cli() {
    let mut m = Machine::new(&[0x28, NOP, NOP, NOP]);
    // Status byte with I clear
    m.poke(0x01FE, 0x00);
    m.lines.assert_irq();
    m.run_until_fetch_at(IRQ_HANDLER);
    assert_eq!(m.last_frame().0, 0x8002);
}

#[test]
fn rti_unmask_is_immediate() {
    let mut m = Machine::new(&[0x40]);
    m.poke(0x01FE, 0x00);
    m.poke(0x01FF, 0x00);
    m.poke(0x0100, 0x81);
    m.poke(0x8100, NOP);
    m.lines.assert_irq();
    m.run_until_fetch_at(IRQ_HANDLER);
    assert_eq!(m.last_frame().0, 0x8100);
}

#[test]
fn masked_irq_is_ignored() {
    let mut m = Machine::new(&[NOP, NOP, NOP, NOP]);
    m.lines.assert_irq();
    assert_eq!(m.timings(3), vec![2, 2, 2]);
    assert_eq!(m.reads_of(0xFFFE), 0);
}

#[test]
fn nmi_during_brk_pushes_is_taken_through_the_brk() {
    let mut m = Machine::new(&[0x00, 0x00]);
    m.step();
    m.lines.signal_nmi();
    m.run_until_fetch_at(NMI_HANDLER);

    assert_eq!(m.reads_of(0xFFFE), 0);
    assert_eq!(m.reads_of(0xFFFA), 1);
    let (ret, p) = m.last_frame();
    assert_eq!(ret, 0x8002);
    assert_eq!(p & 0x10, 0x10, "still a software break");
    assert!(!m.lines.nmi_edge());

    // Serviced once only.
    m.timings(3);
    assert_eq!(m.reads_of(0xFFFA), 1);
}

#[test]
fn nmi_raised_after_brk_pushes_waits_for_one_handler_instruction() {
    let mut m = Machine::new(&[0x00, 0x00]);
    // Fetch, dummy read, three pushes. The vector reads still poll nothing.
    m.run(5);
    m.lines.signal_nmi();
    m.run_until_fetch_at(NMI_HANDLER);

    assert_eq!(m.reads_of(0xFFFE), 1);
    assert_eq!(m.last_frame().0, IRQ_HANDLER + 1);
}

#[test]
fn taken_branch_in_page_delays_irq_by_an_instruction() {
    // CLI; BNE +0; NOP; NOP
    let mut m = Machine::new(&[CLI, 0xD0, 0x00, NOP, NOP, NOP]);
    m.run(3);
    m.lines.assert_irq();
    m.run_until_fetch_at(IRQ_HANDLER);
    assert_eq!(m.last_frame().0, 0x8004);
}

#[test]
fn taken_branch_across_page_polls_before_the_fixup() {
    // CLI; BNE +$10 from $80FA to $810C
    let mut m = Machine::at(0x80F9, &[CLI, 0xD0, 0x10]);
    m.poke(0x810C, NOP);
    m.run(3);
    m.lines.assert_irq();
    m.run_until_fetch_at(IRQ_HANDLER);
    assert_eq!(m.last_frame().0, 0x810C);
}

#[test]
fn held_nmi_line_fires_once() {
    let mut m = Machine::new(&[NOP; 8]);
    m.lines.set_nmi_line(true);
    m.run_until_fetch_at(NMI_HANDLER);
    m.timings(4);
    m.lines.set_nmi_line(true);
    m.timings(4);
    assert_eq!(m.reads_of(0xFFFA), 1);
}

#[test]
fn interrupt_frame_is_written_top_down() {
    let mut m = Machine::new(&[NOP, NOP, NOP]);
    m.lines.signal_nmi();
    m.run_until_fetch_at(NMI_HANDLER);
    let pushes: Vec<Access> = m
        .bus
        .log
        .iter()
        .copied()
        .filter(|access| matches!(access, Access::Write(..)))
        .collect();
    assert_eq!(
        pushes,
        vec![
            Access::Write(0x01FD, 0x80),
            Access::Write(0x01FC, 0x01),
            Access::Write(0x01FB, 0x24),
        ]
    );
}
