use super::queue::MicroQueue;

/// Internal state machine responsible for tracking mid-execution information.
///
/// Contains hidden registers:
/// - Instruction register: opcode of the instruction in flight
/// - Memory data register: last byte read for an operation
/// - Address and pointer latches, plus the carry out of the last index addition
/// - Interrupt latches sampled at the last poll point
/// - Micro-op queue: the current and future jobs of the state machine
#[derive(Debug, Default, Clone)]
pub struct MOSState {
    pub inst: u8,
    pub mdr: u8,
    pub addr_lo: u8,
    pub addr_hi: u8,
    pub ptr_lo: u8,
    pub ptr_hi: u8,
    /// 0 or 1 after an index addition; 0, 1 or 0xFF (borrow) after a branch.
    pub carry: u8,
    pub nmi_pending: bool,
    pub irq_pending: bool,
    /// An NMI arrived during the push phase of a BRK or IRQ sequence and took over its vector.
    pub nmi_hijack: bool,
    /// Whether the current cycle ends with a PC increment. Starts as the op's flag and may be
    /// cancelled by the cycle's own actions.
    pub inc_pc: bool,
    /// The last fetch started an interrupt instead of reading an opcode.
    pub interrupt_fetch: bool,
    /// Address of the opcode decoded this cycle, if any.
    pub fetched: Option<u16>,
    pub queue: MicroQueue,
}

impl MOSState {
    pub fn new() -> Self {
        Self {
            queue: MicroQueue::new(),
            ..Self::default()
        }
    }

    pub fn addr(&self) -> u16 {
        u16::from_le_bytes([self.addr_lo, self.addr_hi])
    }

    pub fn ptr(&self) -> u16 {
        u16::from_le_bytes([self.ptr_lo, self.ptr_hi])
    }

    pub fn ptr_next(&self) -> u16 {
        u16::from_le_bytes([self.ptr_lo.wrapping_add(1), self.ptr_hi])
    }
}
