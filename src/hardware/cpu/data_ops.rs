use log::debug;

use super::micro_ops::{Addr, DataOp, Flag, Latch, MemOp, MicroOp, Reg, Target};
use super::{UnmaskPolicy, MOS6502};
use crate::hardware::{Bus, InterruptLines};
use crate::CpuError;

impl MOS6502 {
    /// Data phase of a cycle. Runs after the memory phase of the same op.
    pub(super) fn execute_data<B: Bus + ?Sized>(
        &mut self,
        op: MicroOp,
        bus: &mut B,
        lines: &mut InterruptLines,
    ) -> Result<(), CpuError> {
        match op.data {
            DataOp::Nop => {}

            DataOp::Load(reg) => {
                let value = self.state.mdr;
                self.set_reg(reg, value);
                self.status.update_nz(value);
            }
            DataOp::Transfer { from, to } => {
                let value = self.reg(from);
                self.set_reg(to, value);
                if to != Reg::S {
                    self.status.update_nz(value);
                }
            }
            DataOp::MdrToPcl => self.pcl = self.state.mdr,

            DataOp::Adc => self.adc(self.state.mdr),
            DataOp::Sbc => self.adc(!self.state.mdr),
            DataOp::And => {
                self.a &= self.state.mdr;
                self.status.update_nz(self.a);
            }
            DataOp::Ora => {
                self.a |= self.state.mdr;
                self.status.update_nz(self.a);
            }
            DataOp::Eor => {
                self.a ^= self.state.mdr;
                self.status.update_nz(self.a);
            }
            DataOp::Bit => {
                let m = self.state.mdr;
                self.status.zero = self.a & m == 0;
                self.status.negative = m & 0x80 != 0;
                self.status.overflow = m & 0x40 != 0;
            }
            DataOp::Compare(reg) => self.compare(self.reg(reg), self.state.mdr),

            DataOp::Asl(target) => self.modify(target, |value, _| (value << 1, value & 0x80 != 0)),
            DataOp::Lsr(target) => self.modify(target, |value, _| (value >> 1, value & 0x01 != 0)),
            DataOp::Rol(target) => self.modify(target, |value, carry| {
                (value << 1 | carry as u8, value & 0x80 != 0)
            }),
            DataOp::Ror(target) => self.modify(target, |value, carry| {
                (value >> 1 | (carry as u8) << 7, value & 0x01 != 0)
            }),
            DataOp::Inc(target) => {
                let value = self.target(target).wrapping_add(1);
                self.set_target(target, value);
                self.status.update_nz(value);
            }
            DataOp::Dec(target) => {
                let value = self.target(target).wrapping_sub(1);
                self.set_target(target, value);
                self.status.update_nz(value);
            }
            DataOp::SetFlag(flag) => self.set_flag(flag, true),
            DataOp::ClearFlag(flag) => {
                self.set_flag(flag, false);
                if flag == Flag::Interrupt {
                    self.unmask(op, lines);
                }
            }

            DataOp::IncS => self.s = self.s.wrapping_add(1),
            DataOp::DecS => self.s = self.s.wrapping_sub(1),

            DataOp::IndexAddr(reg) => {
                let (lo, carry) = self.state.addr_lo.overflowing_add(self.reg(reg));
                self.state.addr_lo = lo;
                self.state.carry = carry as u8;
            }
            DataOp::IndexPtr => self.state.ptr_lo = self.state.ptr_lo.wrapping_add(self.x),
            DataOp::FixAddrHi => {
                self.state.addr_hi = self.state.addr_hi.wrapping_add(self.state.carry);
                self.state.carry = 0;
            }
            DataOp::FixAddrHiRead => {
                if self.state.carry != 0 {
                    self.state.addr_hi = self.state.addr_hi.wrapping_add(self.state.carry);
                    self.state.carry = 0;
                    // The read just made used the wrong page.
                    self.state.queue.insert_next(MicroOp::new(
                        MemOp::Read { from: Addr::Latch, into: Latch::Mdr },
                        DataOp::Nop,
                    ));
                }
            }

            DataOp::Branch => self.branch(bus, lines)?,
            DataOp::FixPch => {
                self.pch = self.pch.wrapping_add(self.state.carry);
                self.state.carry = 0;
            }
        }
        Ok(())
    }

    // --- //
    // ALU //
    // --- //

    /// Binary add with carry. SBC is this with the operand complemented.
    fn adc(&mut self, m: u8) {
        let a = self.a;
        let sum = a as u16 + m as u16 + self.status.carry as u16;
        let result = sum as u8;
        self.status.carry = sum > 0xFF;
        self.status.overflow = (a ^ m) & 0x80 == 0 && (a ^ result) & 0x80 != 0;
        self.a = result;
        self.status.update_nz(result);
    }

    /// Subtraction without storing the result. Carry means no borrow.
    fn compare(&mut self, register: u8, m: u8) {
        self.status.carry = register >= m;
        self.status.update_nz(register.wrapping_sub(m));
    }

    /// Shifts and rotates: `f(value, carry_in) -> (result, carry_out)`.
    fn modify(&mut self, target: Target, f: impl Fn(u8, bool) -> (u8, bool)) {
        let (result, carry) = f(self.target(target), self.status.carry);
        self.status.carry = carry;
        self.set_target(target, result);
        self.status.update_nz(result);
    }

    fn set_flag(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::Carry => self.status.carry = value,
            Flag::Interrupt => self.status.irq_disable = value,
            Flag::Decimal => self.status.decimal = value,
            Flag::Overflow => self.status.overflow = value,
        }
    }

    // ----------- //
    // CONTROL     //
    // ----------- //

    /// Condition from the opcode: bits 7-6 pick N, V, C or Z and bit 5 is the value that takes
    /// the branch.
    fn branch_condition(&self) -> bool {
        let flag = match self.state.inst >> 6 {
            0 => self.status.negative,
            1 => self.status.overflow,
            2 => self.status.carry,
            _ => self.status.zero,
        };
        flag == (self.state.inst & 0x20 != 0)
    }

    fn branch<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        lines: &mut InterruptLines,
    ) -> Result<(), CpuError> {
        if !self.branch_condition() {
            // Not taken: this cycle is already the next opcode fetch.
            self.state.inc_pc = true;
            return self.fetch(bus, lines);
        }

        bus.read(self.pc());
        let target = self.pcl as i16 + self.state.mdr as i8 as i16;
        self.pcl = target as u8;
        self.state.carry = (target >> 8) as u8;
        if self.state.carry != 0 {
            self.state.queue.enqueue(MicroOp::new(
                MemOp::Read { from: Addr::Pc, into: Latch::Discard },
                DataOp::FixPch,
            ));
        }
        self.state.queue.enqueue(MicroOp::fetch(DataOp::Nop));
        Ok(())
    }

    /// Under [`UnmaskPolicy::Immediate`], an IRQ that is already asserted when CLI completes
    /// replaces the instruction fetched on this same cycle.
    fn unmask(&mut self, op: MicroOp, lines: &InterruptLines) {
        if self.config.unmask_policy != UnmaskPolicy::Immediate
            || op.mem != MemOp::Fetch
            || self.state.interrupt_fetch
            || !lines.irq_asserted()
        {
            return;
        }
        debug!("IRQ taken on unmask, dropping fetch of ${:02X}", self.state.inst);
        self.state.queue.clear();
        self.state.inc_pc = false;
        self.state.irq_pending = false;
        self.state.interrupt_fetch = true;
        self.state.fetched = None;
        self.begin_interrupt(false);
    }

    // ------- //
    // OPERAND //
    // ------- //

    pub(super) fn reg(&self, reg: Reg) -> u8 {
        match reg {
            Reg::A => self.a,
            Reg::X => self.x,
            Reg::Y => self.y,
            Reg::S => self.s,
        }
    }

    fn set_reg(&mut self, reg: Reg, value: u8) {
        match reg {
            Reg::A => self.a = value,
            Reg::X => self.x = value,
            Reg::Y => self.y = value,
            Reg::S => self.s = value,
        }
    }

    fn target(&self, target: Target) -> u8 {
        match target {
            Target::A => self.a,
            Target::X => self.x,
            Target::Y => self.y,
            Target::Mdr => self.state.mdr,
        }
    }

    fn set_target(&mut self, target: Target, value: u8) {
        match target {
            Target::A => self.a = value,
            Target::X => self.x = value,
            Target::Y => self.y = value,
            Target::Mdr => self.state.mdr = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::FlatRam;
    use crate::Status;

    fn run(cpu: &mut MOS6502, data: DataOp) {
        let mut ram = FlatRam::new();
        let mut lines = InterruptLines::new();
        cpu.execute_data(MicroOp::new(MemOp::Nop, data), &mut ram, &mut lines).unwrap();
    }

    fn add(a: u8, m: u8, carry: bool) -> (u8, Status) {
        let mut cpu = MOS6502::new();
        cpu.a = a;
        cpu.state.mdr = m;
        cpu.status.carry = carry;
        run(&mut cpu, DataOp::Adc);
        (cpu.a, cpu.status)
    }

    fn sub(a: u8, m: u8, carry: bool) -> (u8, Status) {
        let mut cpu = MOS6502::new();
        cpu.a = a;
        cpu.state.mdr = m;
        cpu.status.carry = carry;
        run(&mut cpu, DataOp::Sbc);
        (cpu.a, cpu.status)
    }

    fn flags(n: bool, v: bool, z: bool, c: bool) -> Status {
        Status {
            negative: n,
            overflow: v,
            zero: z,
            carry: c,
            ..Status::default()
        }
    }

    #[test]
    fn adc_truth_table() {
        // (A, M, C) -> (result, N, V, Z, C)
        let cases = [
            (0x7F, 0x01, false, 0x80, true, true, false, false),
            (0xFF, 0x01, false, 0x00, false, false, true, true),
            (0x80, 0x80, false, 0x00, false, true, true, true),
            (0x80, 0xFF, false, 0x7F, false, true, false, true),
            (0x01, 0x01, true, 0x03, false, false, false, false),
            (0x3F, 0x40, true, 0x80, true, true, false, false),
            (0xFF, 0xFF, true, 0xFF, true, false, false, true),
            (0x00, 0x00, false, 0x00, false, false, true, false),
        ];
        for (a, m, c, res, n, v, z, c_out) in cases {
            assert_eq!(add(a, m, c), (res, flags(n, v, z, c_out)), "ADC {:02X}+{:02X}+{}", a, m, c);
        }
    }

    #[test]
    fn sbc_truth_table() {
        let cases = [
            (0x05, 0x03, true, 0x02, false, false, false, true),
            (0x03, 0x05, true, 0xFE, true, false, false, false),
            (0x05, 0x05, true, 0x00, false, false, true, true),
            (0x05, 0x05, false, 0xFF, true, false, false, false),
            (0x80, 0x01, true, 0x7F, false, true, false, true),
            (0x7F, 0xFF, true, 0x80, true, true, false, false),
            (0x00, 0x80, true, 0x80, true, true, false, false),
        ];
        for (a, m, c, res, n, v, z, c_out) in cases {
            assert_eq!(sub(a, m, c), (res, flags(n, v, z, c_out)), "SBC {:02X}-{:02X}-{}", a, m, !c);
        }
    }

    #[test]
    fn compare_sets_carry_when_register_is_not_less() {
        for (reg, m, n, z, c) in [
            (0x10, 0x10, false, true, true),
            (0x10, 0x0F, false, false, true),
            (0x0F, 0x10, true, false, false),
            (0x00, 0xFF, false, false, false),
            (0xFF, 0x00, true, false, true),
        ] {
            let mut cpu = MOS6502::new();
            cpu.x = reg;
            cpu.state.mdr = m;
            cpu.status.overflow = true;
            run(&mut cpu, DataOp::Compare(Reg::X));
            assert_eq!(cpu.status, flags(n, true, z, c), "CPX {:02X} vs {:02X}", reg, m);
            assert_eq!(cpu.x, reg);
        }
    }

    #[test]
    fn rotates_shift_through_carry() {
        let mut cpu = MOS6502::new();
        cpu.a = 0x81;
        cpu.status.carry = false;
        run(&mut cpu, DataOp::Rol(Target::A));
        assert_eq!(cpu.a, 0x02);
        assert!(cpu.status.carry);

        run(&mut cpu, DataOp::Ror(Target::A));
        assert_eq!(cpu.a, 0x81);
        assert!(!cpu.status.carry);
        assert!(cpu.status.negative);

        cpu.state.mdr = 0x01;
        run(&mut cpu, DataOp::Lsr(Target::Mdr));
        assert_eq!(cpu.state.mdr, 0);
        assert!(cpu.status.zero && cpu.status.carry);
    }

    #[test]
    fn bit_takes_n_and_v_from_memory() {
        let mut cpu = MOS6502::new();
        cpu.a = 0x01;
        cpu.state.mdr = 0xC0;
        run(&mut cpu, DataOp::Bit);
        assert!(cpu.status.negative && cpu.status.overflow && cpu.status.zero);
    }

    #[test]
    fn txs_leaves_flags_alone() {
        let mut cpu = MOS6502::new();
        cpu.x = 0;
        run(&mut cpu, DataOp::Transfer { from: Reg::X, to: Reg::S });
        assert_eq!(cpu.s, 0);
        assert!(!cpu.status.zero);

        run(&mut cpu, DataOp::Transfer { from: Reg::S, to: Reg::A });
        assert!(cpu.status.zero);
    }

    #[test]
    fn indexed_read_inserts_a_fixup_only_on_page_cross() {
        let mut cpu = MOS6502::new();
        cpu.state.addr_lo = 0xF0;
        cpu.state.addr_hi = 0x12;
        cpu.y = 0x0F;
        run(&mut cpu, DataOp::IndexAddr(Reg::Y));
        run(&mut cpu, DataOp::FixAddrHiRead);
        assert!(cpu.state.queue.is_empty());
        assert_eq!(cpu.state.addr(), 0x12FF);

        cpu.y = 0x01;
        run(&mut cpu, DataOp::IndexAddr(Reg::Y));
        run(&mut cpu, DataOp::FixAddrHiRead);
        assert_eq!(cpu.state.addr(), 0x1300);
        assert_eq!(cpu.state.queue.len(), 1);
    }

    #[test]
    fn branch_conditions_follow_opcode_bits() {
        let mut cpu = MOS6502::new();
        cpu.status = flags(true, false, false, true);
        for (opcode, taken) in [
            (0x10, false), // BPL
            (0x30, true),  // BMI
            (0x50, true),  // BVC
            (0x70, false), // BVS
            (0x90, false), // BCC
            (0xB0, true),  // BCS
            (0xD0, true),  // BNE
            (0xF0, false), // BEQ
        ] {
            cpu.state.inst = opcode;
            assert_eq!(cpu.branch_condition(), taken, "opcode {:02X}", opcode);
        }
    }
}
