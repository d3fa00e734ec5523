//! The vocabulary of a single clock cycle.
//!
//! A cycle is split into a memory phase ([`MemOp`], at most one bus access) followed by a data
//! phase ([`DataOp`], register and ALU work). Decode-table entries are sequences of [`MicroOp`]s.

/// Hard-wired vector locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vector {
    Nmi,
    Reset,
    /// Shared by IRQ and BRK.
    Irq,
}

impl Vector {
    /// Address of the low byte. The high byte follows it.
    pub const fn address(self) -> u16 {
        match self {
            Vector::Nmi => 0xFFFA,
            Vector::Reset => 0xFFFC,
            Vector::Irq => 0xFFFE,
        }
    }
}

/// Where a bus address comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addr {
    /// Program counter
    Pc,
    /// Effective address latch
    Latch,
    /// Pointer latch
    Ptr,
    /// Pointer latch + 1. The carry never reaches the high byte, which reproduces both the
    /// zero-page wrap of `(zp,X)`/`(zp),Y` and the page wrap of `JMP ($xxFF)`.
    PtrNext,
}

/// Destination of a byte read from the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latch {
    Discard,
    Mdr,
    AddrLo,
    AddrHi,
    /// Low byte of the address latch, clearing the high byte.
    ZeroPageAddr,
    PtrLo,
    PtrHi,
    /// Low byte of the pointer latch, clearing the high byte.
    ZeroPagePtr,
    Pcl,
    Pch,
}

/// Source of a byte written to the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    A,
    X,
    Y,
    Mdr,
    Pcl,
    Pch,
}

/// Registers that can be loaded, transferred and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    A,
    X,
    Y,
    S,
}

/// Operand of the single-operand ALU actions (shifts, rotates, increments, decrements).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    A,
    X,
    Y,
    Mdr,
}

/// Flags that have explicit set/clear instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Carry,
    Interrupt,
    Decimal,
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemOp {
    /// No bus activity this cycle.
    Nop,
    /// Opcode fetch and decode, or the start of a pending interrupt.
    Fetch,
    Read { from: Addr, into: Latch },
    /// Write to the effective address.
    Write { from: Source },
    /// Write to `$0100 + S`.
    Push { from: Source },
    /// Push the status byte. `software` sets the B bit; hardware interrupts clear it.
    PushStatus { software: bool },
    /// Read from `$0100 + S`.
    Pull { into: Latch },
    PullStatus,
    /// Dummy stack read.
    ReadStack,
    /// Read one byte of a vector into PCL (`high == false`) or PCH.
    ReadVector { vector: Vector, high: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOp {
    Nop,

    // Register transfer
    /// reg = MDR, update N/Z
    Load(Reg),
    /// Copy between registers. N/Z follow the copied value unless the destination is S.
    Transfer { from: Reg, to: Reg },
    /// PCL = MDR
    MdrToPcl,

    // ALU
    Adc,
    Sbc,
    And,
    Ora,
    Eor,
    Bit,
    Compare(Reg),
    Asl(Target),
    Lsr(Target),
    Rol(Target),
    Ror(Target),
    Inc(Target),
    Dec(Target),
    SetFlag(Flag),
    ClearFlag(Flag),

    // Stack pointer
    IncS,
    DecS,

    // Address arithmetic
    /// Adds an index to the address latch's low byte, remembering the carry.
    IndexAddr(Reg),
    /// Adds X to the pointer latch's low byte, wrapping in its page.
    IndexPtr,
    /// Applies the remembered carry to the address latch's high byte, always costing the cycle
    /// that was just spent (writes and read-modify-writes).
    FixAddrHi,
    /// Applies the remembered carry, and if there was one schedules a re-read of the corrected
    /// address before anything else (indexed reads).
    FixAddrHiRead,

    // Control flow
    /// Decides a conditional branch from the latched opcode.
    Branch,
    /// Applies the page carry of a taken branch to PCH.
    FixPch,
}

/// One clock cycle's worth of work.
///
/// `nmi` and `irq` mark the cycles of a forced-BRK sequence started by a hardware interrupt. They
/// suppress the PC increments of the sequence, clear the B bit of the pushed status and redirect
/// the IRQ/BRK vector to the NMI vector for an NMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicroOp {
    pub mem: MemOp,
    pub data: DataOp,
    pub inc_pc: bool,
    pub nmi: bool,
    pub irq: bool,
}

impl MicroOp {
    pub const fn new(mem: MemOp, data: DataOp) -> Self {
        Self {
            mem,
            data,
            inc_pc: false,
            nmi: false,
            irq: false,
        }
    }

    /// Same cycle, but the program counter is advanced at its end.
    pub const fn inc(self) -> Self {
        Self {
            inc_pc: true,
            ..self
        }
    }

    /// Opcode fetch, fused with the last data action of the previous instruction.
    pub const fn fetch(data: DataOp) -> Self {
        Self::new(MemOp::Fetch, data).inc()
    }

    /// Whether this cycle starts the next instruction. A branch decision counts, since a branch
    /// that is not taken fetches on that same cycle.
    pub fn is_fetch(&self) -> bool {
        self.mem == MemOp::Fetch || self.data == DataOp::Branch
    }

    pub fn is_interrupt(&self) -> bool {
        self.nmi || self.irq
    }
}
