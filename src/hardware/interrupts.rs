/// The two interrupt inputs of the 6502, shared between the CPU and whatever drives them.
///
/// - IRQ is level-triggered and wired-OR: every source that asserts it bumps the counter and
///   must acknowledge it again. The line reads active while any source holds it.
/// - NMI is edge-triggered: the edge flag is raised once per rising edge and stays raised until
///   the CPU begins servicing it.
///
/// Everything runs on the stepping thread between ticks, so no locking is involved.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InterruptLines {
    irq: u8,
    nmi_edge: bool,
    nmi_level: bool,
}

impl InterruptLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source starts holding IRQ low.
    pub fn assert_irq(&mut self) {
        self.irq = self.irq.saturating_add(1);
    }

    /// A source has been acknowledged and released IRQ. Never goes below zero.
    pub fn acknowledge_irq(&mut self) {
        self.irq = self.irq.saturating_sub(1);
    }

    pub fn irq_asserted(&self) -> bool {
        self.irq > 0
    }

    /// Number of sources currently holding IRQ.
    pub fn irq_sources(&self) -> u8 {
        self.irq
    }

    /// Raises the NMI edge directly.
    pub fn signal_nmi(&mut self) {
        self.nmi_edge = true;
    }

    /// Drives the NMI line as a level (the PPU's vblank output). Only a low-to-high transition
    /// raises the edge.
    pub fn set_nmi_line(&mut self, level: bool) {
        if level && !self.nmi_level {
            self.nmi_edge = true;
        }
        self.nmi_level = level;
    }

    pub fn nmi_edge(&self) -> bool {
        self.nmi_edge
    }

    /// Called by the CPU when it starts servicing the NMI.
    pub fn clear_nmi(&mut self) {
        self.nmi_edge = false;
    }
}
