mod common;

use common::Machine;
use common::Access::{Read as R, Write as W};

#[test]
fn implied_ops_read_the_next_byte_and_throw_it_away() {
    let mut m = Machine::new(&[0xEA, 0xEA]);
    m.run(3);
    assert_eq!(m.bus.log, vec![R(0x8000, 0xEA), R(0x8001, 0xEA), R(0x8001, 0xEA)]);
}

#[test]
fn read_modify_write_writes_the_old_value_first() {
    // INC $10; NOP
    let mut m = Machine::new(&[0xE6, 0x10, 0xEA]);
    m.poke(0x10, 0x41);
    m.run(6);
    assert_eq!(
        m.bus.log,
        vec![
            R(0x8000, 0xE6),
            R(0x8001, 0x10),
            R(0x0010, 0x41),
            W(0x0010, 0x41),
            W(0x0010, 0x42),
            R(0x8002, 0xEA),
        ]
    );
    assert!(!m.cpu.status().zero);
}

#[test]
fn jsr_reads_the_stack_then_pushes_the_last_operand_byte_address() {
    // JSR $8010
    let mut m = Machine::new(&[0x20, 0x10, 0x80]);
    m.poke(0x8010, 0xEA);
    m.run(7);
    assert_eq!(
        m.bus.log,
        vec![
            R(0x8000, 0x20),
            R(0x8001, 0x10),
            R(0x01FD, 0x00),
            W(0x01FD, 0x80),
            W(0x01FC, 0x02),
            R(0x8002, 0x80),
            R(0x8010, 0xEA),
        ]
    );
    assert_eq!(m.cpu.s(), 0xFB);
}

#[test]
fn absolute_indexed_read_rereads_after_page_crossing() {
    // LDX #1; LDA $02FF,X
    let mut m = Machine::new(&[0xA2, 0x01, 0xBD, 0xFF, 0x02]);
    m.poke(0x0200, 0x11);
    m.poke(0x0300, 0x77);
    m.run(2);
    m.bus.log.clear();
    m.run(6);
    assert_eq!(
        m.bus.log,
        vec![
            R(0x8002, 0xBD),
            R(0x8003, 0xFF),
            R(0x8004, 0x02),
            R(0x0200, 0x11),
            R(0x0300, 0x77),
            R(0x8005, 0x00),
        ]
    );
    assert_eq!(m.cpu.a(), 0x77);
}

#[test]
fn indexed_store_reads_the_uncorrected_address() {
    // LDX #1; STA $02FF,X
    let mut m = Machine::new(&[0xA2, 0x01, 0x9D, 0xFF, 0x02]);
    m.run(2);
    m.bus.log.clear();
    m.run(6);
    assert_eq!(
        m.bus.log,
        vec![
            R(0x8002, 0x9D),
            R(0x8003, 0xFF),
            R(0x8004, 0x02),
            R(0x0200, 0x00),
            W(0x0300, 0x00),
            R(0x8005, 0x00),
        ]
    );
}

#[test]
fn plain_store_never_reads_its_target() {
    // LDA #$5A; STA $0200
    let mut m = Machine::new(&[0xA9, 0x5A, 0x8D, 0x00, 0x02]);
    m.timings(2);
    assert_eq!(m.reads_of(0x0200), 0);
    assert!(m.bus.log.contains(&W(0x0200, 0x5A)));
}

#[test]
fn zero_page_index_wraps_inside_page_zero() {
    // LDX #$20; LDA $F0,X
    let mut m = Machine::new(&[0xA2, 0x20, 0xB5, 0xF0]);
    m.poke(0x0010, 0x99);
    m.poke(0x0110, 0x11);
    m.timings(2);
    assert_eq!(m.cpu.a(), 0x99);
    assert_eq!(m.reads_of(0x0110), 0);
    // The dummy read at the unindexed address
    assert_eq!(m.reads_of(0x00F0), 1);
}

#[test]
fn indexed_indirect_pointer_wraps_inside_page_zero() {
    // LDA ($FF,X) with X = 0
    let mut m = Machine::new(&[0xA1, 0xFF]);
    m.poke(0x00FF, 0x00);
    m.poke(0x0000, 0x03);
    m.poke(0x0300, 0x5A);
    m.run(7);
    assert_eq!(
        m.bus.log,
        vec![
            R(0x8000, 0xA1),
            R(0x8001, 0xFF),
            R(0x00FF, 0x00),
            R(0x00FF, 0x00),
            R(0x0000, 0x03),
            R(0x0300, 0x5A),
            R(0x8002, 0x00),
        ]
    );
    assert_eq!(m.cpu.a(), 0x5A);
}

#[test]
fn indirect_jump_does_not_carry_into_the_pointer_high_byte() {
    // JMP ($02FF)
    let mut m = Machine::new(&[0x6C, 0xFF, 0x02]);
    m.poke(0x02FF, 0x34);
    m.poke(0x0200, 0x12);
    m.poke(0x0300, 0x56);
    m.poke(0x1234, 0xEA);
    m.run(5);
    assert_eq!(m.cpu.pc(), 0x1234);
    assert_eq!(m.reads_of(0x0200), 1);
    assert_eq!(m.reads_of(0x0300), 0);
}

#[test]
fn taken_branch_reads_the_next_opcode_then_fetches_the_target() {
    // BNE +2
    let mut m = Machine::new(&[0xD0, 0x02]);
    m.run(4);
    assert_eq!(
        m.bus.log,
        vec![R(0x8000, 0xD0), R(0x8001, 0x02), R(0x8002, 0x00), R(0x8004, 0x00)]
    );
}

#[test]
fn taken_branch_across_a_page_reads_the_unfixed_target() {
    // BNE +$10 from $80FB
    let mut m = Machine::at(0x80FB, &[0xD0, 0x10]);
    m.run(5);
    assert_eq!(
        m.bus.log,
        vec![
            R(0x80FB, 0xD0),
            R(0x80FC, 0x10),
            R(0x80FD, 0x00),
            R(0x800D, 0x00),
            R(0x810D, 0x00),
        ]
    );
}
