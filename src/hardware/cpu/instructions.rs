use super::instr_def::{opc, InstrDef};
use super::micro_ops::{Addr, DataOp, Flag, Latch, MemOp, MicroOp, Reg, Source, Target, Vector};
use super::MOS6502;

// ------------- //
// COMMON CYCLES //
// ------------- //

const fn read(from: Addr, into: Latch) -> MemOp {
    MemOp::Read { from, into }
}

const fn cycle(mem: MemOp, data: DataOp) -> MicroOp {
    MicroOp::new(mem, data)
}

/// Operand byte at PC into MDR
const fn operand() -> MicroOp {
    cycle(read(Addr::Pc, Latch::Mdr), DataOp::Nop).inc()
}

/// Throwaway read of the byte after the opcode
const fn dummy_pc() -> MicroOp {
    cycle(read(Addr::Pc, Latch::Discard), DataOp::Nop)
}

const fn zp_addr() -> MicroOp {
    cycle(read(Addr::Pc, Latch::ZeroPageAddr), DataOp::Nop).inc()
}

const fn zp_ptr() -> MicroOp {
    cycle(read(Addr::Pc, Latch::ZeroPagePtr), DataOp::Nop).inc()
}

const fn addr_lo() -> MicroOp {
    cycle(read(Addr::Pc, Latch::AddrLo), DataOp::Nop).inc()
}

const fn addr_hi(data: DataOp) -> MicroOp {
    cycle(read(Addr::Pc, Latch::AddrHi), data).inc()
}

/// Read of the effective address into MDR
const fn effective(data: DataOp) -> MicroOp {
    cycle(read(Addr::Latch, Latch::Mdr), data)
}

const fn write(from: Source) -> MicroOp {
    cycle(MemOp::Write { from }, DataOp::Nop)
}

/// The dummy read of `(zp,X)` at the unindexed pointer
const fn ptr_indexed() -> MicroOp {
    cycle(read(Addr::Ptr, Latch::Discard), DataOp::IndexPtr)
}

const fn ptr_lo() -> MicroOp {
    cycle(read(Addr::Ptr, Latch::AddrLo), DataOp::Nop)
}

const fn ptr_hi(data: DataOp) -> MicroOp {
    cycle(read(Addr::PtrNext, Latch::AddrHi), data)
}

const fn next(data: DataOp) -> MicroOp {
    MicroOp::fetch(data)
}

// --------------- //
// READ OPERATIONS //
// --------------- //
// The operation runs on the cycle that fetches the next opcode.

fn imm(op: DataOp) -> InstrDef {
    InstrDef::from(&[operand(), next(op)])
}

fn zpg(op: DataOp) -> InstrDef {
    InstrDef::from(&[zp_addr(), effective(DataOp::Nop), next(op)])
}

fn zpg_idx(op: DataOp, index: Reg) -> InstrDef {
    InstrDef::from(&[
        zp_addr(),
        effective(DataOp::IndexAddr(index)),
        effective(DataOp::Nop),
        next(op),
    ])
}

fn abs(op: DataOp) -> InstrDef {
    InstrDef::from(&[addr_lo(), addr_hi(DataOp::Nop), effective(DataOp::Nop), next(op)])
}

fn abs_idx(op: DataOp, index: Reg) -> InstrDef {
    InstrDef::from(&[
        addr_lo(),
        addr_hi(DataOp::IndexAddr(index)),
        effective(DataOp::FixAddrHiRead),
        next(op),
    ])
}

fn x_ind(op: DataOp) -> InstrDef {
    InstrDef::from(&[
        zp_ptr(),
        ptr_indexed(),
        ptr_lo(),
        ptr_hi(DataOp::Nop),
        effective(DataOp::Nop),
        next(op),
    ])
}

fn ind_y(op: DataOp) -> InstrDef {
    InstrDef::from(&[
        zp_ptr(),
        ptr_lo(),
        ptr_hi(DataOp::IndexAddr(Reg::Y)),
        effective(DataOp::FixAddrHiRead),
        next(op),
    ])
}

// ---------------- //
// WRITE OPERATIONS //
// ---------------- //

fn zpg_w(from: Source) -> InstrDef {
    InstrDef::from(&[zp_addr(), write(from), next(DataOp::Nop)])
}

fn zpg_idx_w(from: Source, index: Reg) -> InstrDef {
    InstrDef::from(&[
        zp_addr(),
        cycle(read(Addr::Latch, Latch::Discard), DataOp::IndexAddr(index)),
        write(from),
        next(DataOp::Nop),
    ])
}

fn abs_w(from: Source) -> InstrDef {
    InstrDef::from(&[addr_lo(), addr_hi(DataOp::Nop), write(from), next(DataOp::Nop)])
}

fn abs_idx_w(from: Source, index: Reg) -> InstrDef {
    InstrDef::from(&[
        addr_lo(),
        addr_hi(DataOp::IndexAddr(index)),
        cycle(read(Addr::Latch, Latch::Discard), DataOp::FixAddrHi),
        write(from),
        next(DataOp::Nop),
    ])
}

fn x_ind_w(from: Source) -> InstrDef {
    InstrDef::from(&[
        zp_ptr(),
        ptr_indexed(),
        ptr_lo(),
        ptr_hi(DataOp::Nop),
        write(from),
        next(DataOp::Nop),
    ])
}

fn ind_y_w(from: Source) -> InstrDef {
    InstrDef::from(&[
        zp_ptr(),
        ptr_lo(),
        ptr_hi(DataOp::IndexAddr(Reg::Y)),
        cycle(read(Addr::Latch, Latch::Discard), DataOp::FixAddrHi),
        write(from),
        next(DataOp::Nop),
    ])
}

// ------------------------ //
// READ-MODIFY-WRITE        //
// ------------------------ //
// Read, write back the unmodified value while modifying, write the result.

const fn rmw_tail(op: DataOp) -> [MicroOp; 4] {
    [
        effective(DataOp::Nop),
        cycle(MemOp::Write { from: Source::Mdr }, op),
        write(Source::Mdr),
        next(DataOp::Nop),
    ]
}

fn rmw(head: &[MicroOp], op: DataOp) -> InstrDef {
    let mut ops = head.to_vec();
    ops.extend_from_slice(&rmw_tail(op));
    InstrDef::from(&ops)
}

fn zpg_m(op: DataOp) -> InstrDef {
    rmw(&[zp_addr()], op)
}

fn zpg_x_m(op: DataOp) -> InstrDef {
    rmw(
        &[zp_addr(), cycle(read(Addr::Latch, Latch::Discard), DataOp::IndexAddr(Reg::X))],
        op,
    )
}

fn abs_m(op: DataOp) -> InstrDef {
    rmw(&[addr_lo(), addr_hi(DataOp::Nop)], op)
}

fn abs_x_m(op: DataOp) -> InstrDef {
    rmw(
        &[
            addr_lo(),
            addr_hi(DataOp::IndexAddr(Reg::X)),
            cycle(read(Addr::Latch, Latch::Discard), DataOp::FixAddrHi),
        ],
        op,
    )
}

// ----------------- //
// SINGLE-BYTE OPS   //
// ----------------- //

fn implied(op: DataOp) -> InstrDef {
    InstrDef::from(&[dummy_pc(), next(op)])
}

fn push(mem: MemOp) -> InstrDef {
    InstrDef::from(&[dummy_pc(), cycle(mem, DataOp::DecS), next(DataOp::Nop)])
}

fn pull(last: MicroOp) -> InstrDef {
    InstrDef::from(&[dummy_pc(), cycle(MemOp::ReadStack, DataOp::IncS), last, next(DataOp::Nop)])
}

fn branch() -> InstrDef {
    InstrDef::from(&[operand(), cycle(MemOp::Nop, DataOp::Branch)])
}

// ------------- //
// CONTROL FLOW  //
// ------------- //

fn jmp_abs() -> InstrDef {
    InstrDef::from(&[
        operand(),
        cycle(read(Addr::Pc, Latch::Pch), DataOp::MdrToPcl),
        next(DataOp::Nop),
    ])
}

/// Reproduces the page wrap of the pointer's high byte.
fn jmp_ind() -> InstrDef {
    InstrDef::from(&[
        cycle(read(Addr::Pc, Latch::PtrLo), DataOp::Nop).inc(),
        cycle(read(Addr::Pc, Latch::PtrHi), DataOp::Nop).inc(),
        cycle(read(Addr::Ptr, Latch::Mdr), DataOp::Nop),
        cycle(read(Addr::PtrNext, Latch::Pch), DataOp::MdrToPcl),
        next(DataOp::Nop),
    ])
}

fn jsr() -> InstrDef {
    InstrDef::from(&[
        operand(),
        cycle(MemOp::ReadStack, DataOp::Nop),
        cycle(MemOp::Push { from: Source::Pch }, DataOp::DecS),
        cycle(MemOp::Push { from: Source::Pcl }, DataOp::DecS),
        cycle(read(Addr::Pc, Latch::Pch), DataOp::MdrToPcl),
        next(DataOp::Nop),
    ])
}

fn rts() -> InstrDef {
    InstrDef::from(&[
        dummy_pc(),
        cycle(MemOp::ReadStack, DataOp::IncS),
        cycle(MemOp::Pull { into: Latch::Pcl }, DataOp::IncS),
        cycle(MemOp::Pull { into: Latch::Pch }, DataOp::Nop),
        dummy_pc().inc(),
        next(DataOp::Nop),
    ])
}

fn rti() -> InstrDef {
    InstrDef::from(&[
        dummy_pc(),
        cycle(MemOp::ReadStack, DataOp::IncS),
        cycle(MemOp::PullStatus, DataOp::IncS),
        cycle(MemOp::Pull { into: Latch::Pcl }, DataOp::IncS),
        cycle(MemOp::Pull { into: Latch::Pch }, DataOp::Nop),
        next(DataOp::Nop),
    ])
}

/// BRK, and the body of every hardware interrupt once its cycles are marked.
pub(crate) fn brk() -> InstrDef {
    InstrDef::from(&[
        dummy_pc().inc(),
        cycle(MemOp::Push { from: Source::Pch }, DataOp::DecS),
        cycle(MemOp::Push { from: Source::Pcl }, DataOp::DecS),
        cycle(MemOp::PushStatus { software: true }, DataOp::DecS),
        cycle(
            MemOp::ReadVector { vector: Vector::Irq, high: false },
            DataOp::SetFlag(Flag::Interrupt),
        ),
        cycle(MemOp::ReadVector { vector: Vector::Irq, high: true }, DataOp::Nop),
        next(DataOp::Nop),
    ])
}

/// The reset sequence: BRK with its stack writes turned into reads.
pub(crate) fn reset_sequence() -> [MicroOp; 8] {
    [
        dummy_pc(),
        dummy_pc(),
        cycle(MemOp::ReadStack, DataOp::DecS),
        cycle(MemOp::ReadStack, DataOp::DecS),
        cycle(MemOp::ReadStack, DataOp::DecS),
        cycle(
            MemOp::ReadVector { vector: Vector::Reset, high: false },
            DataOp::SetFlag(Flag::Interrupt),
        ),
        cycle(MemOp::ReadVector { vector: Vector::Reset, high: true }, DataOp::Nop),
        next(DataOp::Nop),
    ]
}

impl MOS6502 {
    /// Here we define each CPU opcode by what it does during each cycle of its execution, after
    /// the cycle that fetched it. Every entry ends on the cycle that fetches the following opcode.
    ///
    /// Only the documented opcodes are present; everything else decodes to `None`.
    ///
    /// See [6502 Instruction Set](https://www.masswerk.at/6502/6502_instruction_set.html) for info.
    pub(crate) fn instruction_table() -> [Option<InstrDef>; 256] {
        use DataOp::*;
        let mut res: [Option<InstrDef>; 256] = [None; 256];

        opc!(res, 0x00, brk());                                     // BRK
        opc!(res, 0x01, x_ind(Ora));                                // ORA X,ind
        opc!(res, 0x05, zpg(Ora));                                  // ORA zpg
        opc!(res, 0x06, zpg_m(Asl(Target::Mdr)));                   // ASL zpg
        opc!(res, 0x08, push(MemOp::PushStatus { software: true })); // PHP
        opc!(res, 0x09, imm(Ora));                                  // ORA #
        opc!(res, 0x0A, implied(Asl(Target::A)));                   // ASL A
        opc!(res, 0x0D, abs(Ora));                                  // ORA abs
        opc!(res, 0x0E, abs_m(Asl(Target::Mdr)));                   // ASL abs

        opc!(res, 0x10, branch());                                  // BPL
        opc!(res, 0x11, ind_y(Ora));                                // ORA ind,Y
        opc!(res, 0x15, zpg_idx(Ora, Reg::X));                      // ORA zpg,X
        opc!(res, 0x16, zpg_x_m(Asl(Target::Mdr)));                 // ASL zpg,X
        opc!(res, 0x18, implied(ClearFlag(Flag::Carry)));           // CLC
        opc!(res, 0x19, abs_idx(Ora, Reg::Y));                      // ORA abs,Y
        opc!(res, 0x1D, abs_idx(Ora, Reg::X));                      // ORA abs,X
        opc!(res, 0x1E, abs_x_m(Asl(Target::Mdr)));                 // ASL abs,X

        opc!(res, 0x20, jsr());                                     // JSR
        opc!(res, 0x21, x_ind(And));                                // AND X,ind
        opc!(res, 0x24, zpg(Bit));                                  // BIT zpg
        opc!(res, 0x25, zpg(And));                                  // AND zpg
        opc!(res, 0x26, zpg_m(Rol(Target::Mdr)));                   // ROL zpg
        opc!(res, 0x28, pull(MicroOp::new(MemOp::PullStatus, Nop))); // PLP
        opc!(res, 0x29, imm(And));                                  // AND #
        opc!(res, 0x2A, implied(Rol(Target::A)));                   // ROL A
        opc!(res, 0x2C, abs(Bit));                                  // BIT abs
        opc!(res, 0x2D, abs(And));                                  // AND abs
        opc!(res, 0x2E, abs_m(Rol(Target::Mdr)));                   // ROL abs

        opc!(res, 0x30, branch());                                  // BMI
        opc!(res, 0x31, ind_y(And));                                // AND ind,Y
        opc!(res, 0x35, zpg_idx(And, Reg::X));                      // AND zpg,X
        opc!(res, 0x36, zpg_x_m(Rol(Target::Mdr)));                 // ROL zpg,X
        opc!(res, 0x38, implied(SetFlag(Flag::Carry)));             // SEC
        opc!(res, 0x39, abs_idx(And, Reg::Y));                      // AND abs,Y
        opc!(res, 0x3D, abs_idx(And, Reg::X));                      // AND abs,X
        opc!(res, 0x3E, abs_x_m(Rol(Target::Mdr)));                 // ROL abs,X

        opc!(res, 0x40, rti());                                     // RTI
        opc!(res, 0x41, x_ind(Eor));                                // EOR X,ind
        opc!(res, 0x45, zpg(Eor));                                  // EOR zpg
        opc!(res, 0x46, zpg_m(Lsr(Target::Mdr)));                   // LSR zpg
        opc!(res, 0x48, push(MemOp::Push { from: Source::A }));     // PHA
        opc!(res, 0x49, imm(Eor));                                  // EOR #
        opc!(res, 0x4A, implied(Lsr(Target::A)));                   // LSR A
        opc!(res, 0x4C, jmp_abs());                                 // JMP abs
        opc!(res, 0x4D, abs(Eor));                                  // EOR abs
        opc!(res, 0x4E, abs_m(Lsr(Target::Mdr)));                   // LSR abs

        opc!(res, 0x50, branch());                                  // BVC
        opc!(res, 0x51, ind_y(Eor));                                // EOR ind,Y
        opc!(res, 0x55, zpg_idx(Eor, Reg::X));                      // EOR zpg,X
        opc!(res, 0x56, zpg_x_m(Lsr(Target::Mdr)));                 // LSR zpg,X
        opc!(res, 0x58, implied(ClearFlag(Flag::Interrupt)));       // CLI
        opc!(res, 0x59, abs_idx(Eor, Reg::Y));                      // EOR abs,Y
        opc!(res, 0x5D, abs_idx(Eor, Reg::X));                      // EOR abs,X
        opc!(res, 0x5E, abs_x_m(Lsr(Target::Mdr)));                 // LSR abs,X

        opc!(res, 0x60, rts());                                     // RTS
        opc!(res, 0x61, x_ind(Adc));                                // ADC X,ind
        opc!(res, 0x65, zpg(Adc));                                  // ADC zpg
        opc!(res, 0x66, zpg_m(Ror(Target::Mdr)));                   // ROR zpg
        opc!(res, 0x68, pull(MicroOp::new(MemOp::Pull { into: Latch::Mdr }, Load(Reg::A)))); // PLA
        opc!(res, 0x69, imm(Adc));                                  // ADC #
        opc!(res, 0x6A, implied(Ror(Target::A)));                   // ROR A
        opc!(res, 0x6C, jmp_ind());                                 // JMP ind
        opc!(res, 0x6D, abs(Adc));                                  // ADC abs
        opc!(res, 0x6E, abs_m(Ror(Target::Mdr)));                   // ROR abs

        opc!(res, 0x70, branch());                                  // BVS
        opc!(res, 0x71, ind_y(Adc));                                // ADC ind,Y
        opc!(res, 0x75, zpg_idx(Adc, Reg::X));                      // ADC zpg,X
        opc!(res, 0x76, zpg_x_m(Ror(Target::Mdr)));                 // ROR zpg,X
        opc!(res, 0x78, implied(SetFlag(Flag::Interrupt)));         // SEI
        opc!(res, 0x79, abs_idx(Adc, Reg::Y));                      // ADC abs,Y
        opc!(res, 0x7D, abs_idx(Adc, Reg::X));                      // ADC abs,X
        opc!(res, 0x7E, abs_x_m(Ror(Target::Mdr)));                 // ROR abs,X

        opc!(res, 0x81, x_ind_w(Source::A));                        // STA X,ind
        opc!(res, 0x84, zpg_w(Source::Y));                          // STY zpg
        opc!(res, 0x85, zpg_w(Source::A));                          // STA zpg
        opc!(res, 0x86, zpg_w(Source::X));                          // STX zpg
        opc!(res, 0x88, implied(Dec(Target::Y)));                   // DEY
        opc!(res, 0x8A, implied(Transfer { from: Reg::X, to: Reg::A })); // TXA
        opc!(res, 0x8C, abs_w(Source::Y));                          // STY abs
        opc!(res, 0x8D, abs_w(Source::A));                          // STA abs
        opc!(res, 0x8E, abs_w(Source::X));                          // STX abs

        opc!(res, 0x90, branch());                                  // BCC
        opc!(res, 0x91, ind_y_w(Source::A));                        // STA ind,Y
        opc!(res, 0x94, zpg_idx_w(Source::Y, Reg::X));              // STY zpg,X
        opc!(res, 0x95, zpg_idx_w(Source::A, Reg::X));              // STA zpg,X
        opc!(res, 0x96, zpg_idx_w(Source::X, Reg::Y));              // STX zpg,Y
        opc!(res, 0x98, implied(Transfer { from: Reg::Y, to: Reg::A })); // TYA
        opc!(res, 0x99, abs_idx_w(Source::A, Reg::Y));              // STA abs,Y
        opc!(res, 0x9A, implied(Transfer { from: Reg::X, to: Reg::S })); // TXS
        opc!(res, 0x9D, abs_idx_w(Source::A, Reg::X));              // STA abs,X

        opc!(res, 0xA0, imm(Load(Reg::Y)));                         // LDY #
        opc!(res, 0xA1, x_ind(Load(Reg::A)));                       // LDA X,ind
        opc!(res, 0xA2, imm(Load(Reg::X)));                         // LDX #
        opc!(res, 0xA4, zpg(Load(Reg::Y)));                         // LDY zpg
        opc!(res, 0xA5, zpg(Load(Reg::A)));                         // LDA zpg
        opc!(res, 0xA6, zpg(Load(Reg::X)));                         // LDX zpg
        opc!(res, 0xA8, implied(Transfer { from: Reg::A, to: Reg::Y })); // TAY
        opc!(res, 0xA9, imm(Load(Reg::A)));                         // LDA #
        opc!(res, 0xAA, implied(Transfer { from: Reg::A, to: Reg::X })); // TAX
        opc!(res, 0xAC, abs(Load(Reg::Y)));                         // LDY abs
        opc!(res, 0xAD, abs(Load(Reg::A)));                         // LDA abs
        opc!(res, 0xAE, abs(Load(Reg::X)));                         // LDX abs

        opc!(res, 0xB0, branch());                                  // BCS
        opc!(res, 0xB1, ind_y(Load(Reg::A)));                       // LDA ind,Y
        opc!(res, 0xB4, zpg_idx(Load(Reg::Y), Reg::X));             // LDY zpg,X
        opc!(res, 0xB5, zpg_idx(Load(Reg::A), Reg::X));             // LDA zpg,X
        opc!(res, 0xB6, zpg_idx(Load(Reg::X), Reg::Y));             // LDX zpg,Y
        opc!(res, 0xB8, implied(ClearFlag(Flag::Overflow)));        // CLV
        opc!(res, 0xB9, abs_idx(Load(Reg::A), Reg::Y));             // LDA abs,Y
        opc!(res, 0xBA, implied(Transfer { from: Reg::S, to: Reg::X })); // TSX
        opc!(res, 0xBC, abs_idx(Load(Reg::Y), Reg::X));             // LDY abs,X
        opc!(res, 0xBD, abs_idx(Load(Reg::A), Reg::X));             // LDA abs,X
        opc!(res, 0xBE, abs_idx(Load(Reg::X), Reg::Y));             // LDX abs,Y

        opc!(res, 0xC0, imm(Compare(Reg::Y)));                      // CPY #
        opc!(res, 0xC1, x_ind(Compare(Reg::A)));                    // CMP X,ind
        opc!(res, 0xC4, zpg(Compare(Reg::Y)));                      // CPY zpg
        opc!(res, 0xC5, zpg(Compare(Reg::A)));                      // CMP zpg
        opc!(res, 0xC6, zpg_m(Dec(Target::Mdr)));                   // DEC zpg
        opc!(res, 0xC8, implied(Inc(Target::Y)));                   // INY
        opc!(res, 0xC9, imm(Compare(Reg::A)));                      // CMP #
        opc!(res, 0xCA, implied(Dec(Target::X)));                   // DEX
        opc!(res, 0xCC, abs(Compare(Reg::Y)));                      // CPY abs
        opc!(res, 0xCD, abs(Compare(Reg::A)));                      // CMP abs
        opc!(res, 0xCE, abs_m(Dec(Target::Mdr)));                   // DEC abs

        opc!(res, 0xD0, branch());                                  // BNE
        opc!(res, 0xD1, ind_y(Compare(Reg::A)));                    // CMP ind,Y
        opc!(res, 0xD5, zpg_idx(Compare(Reg::A), Reg::X));          // CMP zpg,X
        opc!(res, 0xD6, zpg_x_m(Dec(Target::Mdr)));                 // DEC zpg,X
        opc!(res, 0xD8, implied(ClearFlag(Flag::Decimal)));         // CLD
        opc!(res, 0xD9, abs_idx(Compare(Reg::A), Reg::Y));          // CMP abs,Y
        opc!(res, 0xDD, abs_idx(Compare(Reg::A), Reg::X));          // CMP abs,X
        opc!(res, 0xDE, abs_x_m(Dec(Target::Mdr)));                 // DEC abs,X

        opc!(res, 0xE0, imm(Compare(Reg::X)));                      // CPX #
        opc!(res, 0xE1, x_ind(Sbc));                                // SBC X,ind
        opc!(res, 0xE4, zpg(Compare(Reg::X)));                      // CPX zpg
        opc!(res, 0xE5, zpg(Sbc));                                  // SBC zpg
        opc!(res, 0xE6, zpg_m(Inc(Target::Mdr)));                   // INC zpg
        opc!(res, 0xE8, implied(Inc(Target::X)));                   // INX
        opc!(res, 0xE9, imm(Sbc));                                  // SBC #
        opc!(res, 0xEA, implied(Nop));                              // NOP
        opc!(res, 0xEC, abs(Compare(Reg::X)));                      // CPX abs
        opc!(res, 0xED, abs(Sbc));                                  // SBC abs
        opc!(res, 0xEE, abs_m(Inc(Target::Mdr)));                   // INC abs

        opc!(res, 0xF0, branch());                                  // BEQ
        opc!(res, 0xF1, ind_y(Sbc));                                // SBC ind,Y
        opc!(res, 0xF5, zpg_idx(Sbc, Reg::X));                      // SBC zpg,X
        opc!(res, 0xF6, zpg_x_m(Inc(Target::Mdr)));                 // INC zpg,X
        opc!(res, 0xF8, implied(SetFlag(Flag::Decimal)));           // SED
        opc!(res, 0xF9, abs_idx(Sbc, Reg::Y));                      // SBC abs,Y
        opc!(res, 0xFD, abs_idx(Sbc, Reg::X));                      // SBC abs,X
        opc!(res, 0xFE, abs_x_m(Inc(Target::Mdr)));                 // INC abs,X

        res
    }
}
