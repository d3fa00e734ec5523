use log::{debug, trace};

use super::disasm;
use super::instructions;
use super::micro_ops::{Addr, Latch, MemOp, MicroOp, Source, Vector};
use super::MOS6502;
use crate::hardware::{Bus, InterruptLines};
use crate::CpuError;

pub(crate) const BRK: u8 = 0x00;
const STACK_PAGE: u16 = 0x0100;

impl MOS6502 {
    /// Memory phase of a cycle: at most one bus access.
    pub(super) fn execute_mem<B: Bus + ?Sized>(
        &mut self,
        op: MicroOp,
        bus: &mut B,
        lines: &mut InterruptLines,
    ) -> Result<(), CpuError> {
        match op.mem {
            MemOp::Nop => {}
            MemOp::Fetch => self.fetch(bus, lines)?,
            MemOp::Read { from, into } => {
                let value = bus.read(self.address(from));
                self.latch(into, value);
            }
            MemOp::Write { from } => bus.write(self.state.addr(), self.source(from)),
            MemOp::Push { from } => bus.write(self.stack_addr(), self.source(from)),
            MemOp::PushStatus { software } => {
                if self.state.inst == BRK && !op.nmi && lines.nmi_edge() {
                    debug!("NMI hijacks {} sequence", if op.irq { "IRQ" } else { "BRK" });
                    lines.clear_nmi();
                    self.state.nmi_hijack = true;
                }
                let value = self.status.to_byte(software && !op.is_interrupt());
                bus.write(self.stack_addr(), value);
            }
            MemOp::Pull { into } => {
                let value = bus.read(self.stack_addr());
                self.latch(into, value);
            }
            MemOp::PullStatus => {
                let value = bus.read(self.stack_addr());
                self.status = super::Status::from_byte(value);
            }
            MemOp::ReadStack => {
                bus.read(self.stack_addr());
            }
            MemOp::ReadVector { vector, high } => {
                let vector = match vector {
                    Vector::Irq if op.nmi || self.state.nmi_hijack => Vector::Nmi,
                    other => other,
                };
                let value = bus.read(vector.address() + high as u16);
                if high {
                    self.pch = value;
                    self.state.nmi_hijack = false;
                } else {
                    self.pcl = value;
                }
            }
        }
        Ok(())
    }

    /// Reads and decodes the next opcode, or starts servicing the interrupt latched at the last
    /// poll point. NMI wins over IRQ.
    pub(super) fn fetch<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        lines: &mut InterruptLines,
    ) -> Result<(), CpuError> {
        let pc = self.pc();

        if self.state.nmi_pending || self.state.irq_pending {
            let nmi = self.state.nmi_pending;
            self.state.nmi_pending = false;
            self.state.irq_pending = false;
            if nmi {
                lines.clear_nmi();
            }
            debug!("{} at ${:04X}", if nmi { "NMI" } else { "IRQ" }, pc);

            // The opcode is still read, then replaced by BRK.
            bus.read(pc);
            self.state.inc_pc = false;
            self.state.interrupt_fetch = true;
            self.begin_interrupt(nmi);
            return Ok(());
        }

        let opcode = bus.read(pc);
        let def = self.instructions[opcode as usize]
            .ok_or(CpuError::UnimplementedOpcode { opcode, pc })?;
        trace!(
            "{:04X}  {:02X}  {:<4} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc,
            opcode,
            disasm::lookup(opcode).map(|(mnemonic, _)| mnemonic.name()).unwrap_or("???"),
            self.a,
            self.x,
            self.y,
            self.status.to_byte(false),
            self.s,
            self.cycles,
        );
        self.state.inst = opcode;
        self.state.interrupt_fetch = false;
        self.state.fetched = Some(pc);
        self.state.queue.extend(def.ops());
        Ok(())
    }

    /// Queues the BRK sequence with every cycle before the closing fetch marked as a hardware
    /// interrupt.
    pub(super) fn begin_interrupt(&mut self, nmi: bool) {
        self.state.inst = BRK;
        for &op in instructions::brk().ops() {
            let op = if op.is_fetch() {
                op
            } else {
                MicroOp {
                    nmi,
                    irq: !nmi,
                    ..op
                }
            };
            self.state.queue.enqueue(op);
        }
    }

    fn address(&self, from: Addr) -> u16 {
        match from {
            Addr::Pc => self.pc(),
            Addr::Latch => self.state.addr(),
            Addr::Ptr => self.state.ptr(),
            Addr::PtrNext => self.state.ptr_next(),
        }
    }

    fn stack_addr(&self) -> u16 {
        STACK_PAGE | self.s as u16
    }

    fn latch(&mut self, into: Latch, value: u8) {
        match into {
            Latch::Discard => {}
            Latch::Mdr => self.state.mdr = value,
            Latch::AddrLo => self.state.addr_lo = value,
            Latch::AddrHi => self.state.addr_hi = value,
            Latch::ZeroPageAddr => {
                self.state.addr_lo = value;
                self.state.addr_hi = 0;
            }
            Latch::PtrLo => self.state.ptr_lo = value,
            Latch::PtrHi => self.state.ptr_hi = value,
            Latch::ZeroPagePtr => {
                self.state.ptr_lo = value;
                self.state.ptr_hi = 0;
            }
            Latch::Pcl => self.pcl = value,
            Latch::Pch => self.pch = value,
        }
    }

    fn source(&self, from: Source) -> u8 {
        match from {
            Source::A => self.a,
            Source::X => self.x,
            Source::Y => self.y,
            Source::Mdr => self.state.mdr,
            Source::Pcl => self.pcl,
            Source::Pch => self.pch,
        }
    }
}
