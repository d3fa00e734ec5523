mod data_ops;
pub mod disasm;
pub(crate) mod instr_def;
pub(crate) mod instructions;
mod mem_ops;
pub mod micro_ops;
pub(crate) mod queue;
pub(crate) mod state;
pub mod status;

use log::debug;

use crate::hardware::{Bus, InterruptLines};
use crate::CpuError;
use instr_def::InstrDef;
use mem_ops::BRK;
use micro_ops::MicroOp;
use state::MOSState;

pub use status::Status;

/// When clearing the interrupt-disable flag lets a pending IRQ through.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UnmaskPolicy {
    /// As on hardware: the IRQ is taken after the instruction that follows CLI.
    #[default]
    Deferred,
    /// CLI cancels the fetch it shares a cycle with, and the IRQ is taken right away.
    Immediate,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CpuConfig {
    pub unmask_policy: UnmaskPolicy,
}

/// Virtual MOS 6502 processor, as found inside the Ricoh 2A03. The roles of `MOS6502` are as
/// follows:
///
/// - Manage program state (program counter, stack)
/// - Fetch, decode and execute instructions, one clock cycle per [`step`](Self::step)
/// - Perform arithmetic operations through integrated ALU
/// - Recognise NMI and IRQ at the cycles the hardware does
///
/// Instructions are decoded into micro-operations held in a queue; each cycle pops one. The last
/// cycle of an instruction is also the fetch of the next one, so register results of most
/// instructions land on that shared cycle.
///
/// Notably, the 6502 is unaware of any memory mapping; everything goes through the [`Bus`].
pub struct MOS6502 {
    pub(crate) a: u8,
    pub(crate) x: u8,
    pub(crate) y: u8,
    pub(crate) s: u8,
    pub(crate) pcl: u8,
    pub(crate) pch: u8,
    pub(crate) status: Status,
    pub(crate) state: MOSState,
    config: CpuConfig,
    cycles: u64,
    instructions: [Option<InstrDef>; 256],
}

impl MOS6502 {
    /// Constructs a new 6502 CPU (`MOS6502`) in its unpowered state. It must be
    /// [`reset`](Self::reset) before it can be stepped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rust_nes_cpu::{FlatRam, InterruptLines, MOS6502};
    ///
    /// let mut ram = FlatRam::new();
    /// ram.load(0x8000, &[0xA9, 0x05]).unwrap();
    /// ram.set_reset_vector(0x8000);
    ///
    /// let mut lines = InterruptLines::new();
    /// let mut cpu = MOS6502::new();
    /// cpu.reset();
    /// for _ in 0..10 {
    ///     cpu.step(&mut ram, &mut lines).unwrap();
    /// }
    /// assert_eq!(cpu.a(), 0x05);
    /// ```
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            s: 0,
            pcl: 0,
            pch: 0,
            status: Status::default(),
            state: MOSState::new(),
            config,
            cycles: 0,
            instructions: Self::instruction_table(),
        }
    }

    /// Puts the CPU in its power-on state and schedules the reset sequence.
    ///
    /// The sequence takes seven cycles: two dummy reads, three stack reads that walk S down from
    /// $00 to $FD, and the two bytes of the reset vector at $FFFC-$FFFD. The eighth cycle fetches
    /// the first instruction. PC keeps whatever it held until the vector is loaded.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.s = 0;
        self.status = Status {
            irq_disable: true,
            ..Status::default()
        };
        self.state = MOSState::new();
        // No polling until the first instruction is under way.
        self.state.inst = BRK;
        self.state.queue.extend(&instructions::reset_sequence());
        self.cycles = 0;
        debug!("reset");
    }

    /// Steps the CPU by one clock cycle.
    ///
    /// The cycle's memory action runs first, then its data action, then the PC increment if the
    /// op asks for one. Last, if the next cycle is the final one of the instruction, the interrupt
    /// lines are sampled for the fetch that follows it.
    pub fn step<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        lines: &mut InterruptLines,
    ) -> Result<(), CpuError> {
        let op = self
            .state
            .queue
            .next()
            .ok_or(CpuError::QueueUnderflow { pc: self.pc() })?;
        self.state.inc_pc = op.inc_pc && !op.is_interrupt();
        self.state.fetched = None;

        self.execute_mem(op, bus, lines)?;
        self.execute_data(op, bus, lines)?;
        if self.state.inc_pc {
            self.increment_pc();
        }
        self.poll(lines);

        self.cycles += 1;
        Ok(())
    }

    /// Interrupts are sampled at the end of an instruction's second-to-last cycle, which is
    /// when the op after the next one is a fetch. BRK and interrupt sequences never poll.
    ///
    /// Branches count their decision cycle as a fetch, so they sample before the operand read,
    /// and again before the PCH fixup of a taken branch that crosses a page.
    fn poll(&mut self, lines: &InterruptLines) {
        if self.state.inst == BRK {
            return;
        }
        let queue = &self.state.queue;
        let penultimate = match (queue.get(0), queue.get(1)) {
            (Some(now), Some(then)) => !now.is_fetch() && then.is_fetch(),
            _ => false,
        };
        if penultimate {
            self.state.nmi_pending = lines.nmi_edge();
            self.state.irq_pending = lines.irq_asserted() && !self.status.irq_disable;
        }
    }

    fn increment_pc(&mut self) {
        let (pcl, carry) = self.pcl.overflowing_add(1);
        self.pcl = pcl;
        if carry {
            self.pch = self.pch.wrapping_add(1);
        }
    }

    // ---------- //
    // INSPECTION //
    // ---------- //

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    /// Stack pointer (offset into page $01)
    pub fn s(&self) -> u8 {
        self.s
    }

    pub fn pc(&self) -> u16 {
        u16::from_le_bytes([self.pcl, self.pch])
    }

    pub fn pcl(&self) -> u8 {
        self.pcl
    }

    pub fn pch(&self) -> u8 {
        self.pch
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Opcode of the instruction in flight. Interrupt sequences report BRK.
    pub fn opcode(&self) -> u8 {
        self.state.inst
    }

    /// Cycles stepped since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn config(&self) -> CpuConfig {
        self.config
    }

    /// Address of the opcode fetched by the last cycle, or `None` if that cycle did not start
    /// an instruction. Covers the fetch a branch that is not taken makes on its decision cycle.
    /// Interrupt sequences are not instructions and report `None`.
    pub fn fetched_pc(&self) -> Option<u16> {
        self.state.fetched
    }

    pub fn next_op(&self) -> Option<MicroOp> {
        self.state.queue.peek().copied()
    }

    /// True when the next cycle fetches an opcode (or decides a branch, which may).
    pub fn at_instruction_boundary(&self) -> bool {
        self.state.queue.peek().is_some_and(MicroOp::is_fetch)
    }
}

impl Default for MOS6502 {
    fn default() -> Self {
        Self::new()
    }
}
