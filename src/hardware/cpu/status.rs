use bitflags::bitflags;

bitflags! {
    /// Layout of the processor status byte as it appears on the stack.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusBits: u8 {
        const CARRY     = 0b0000_0001;
        const ZERO      = 0b0000_0010;
        const INTERRUPT = 0b0000_0100;
        const DECIMAL   = 0b0000_1000;
        const BREAK     = 0b0001_0000;
        const UNUSED    = 0b0010_0000;
        const OVERFLOW  = 0b0100_0000;
        const NEGATIVE  = 0b1000_0000;
    }
}

/// The six real processor flags.
///
/// The B bit is not a flag; it only exists in the byte pushed to the stack, where it records
/// whether the push came from software (BRK/PHP) or hardware (IRQ/NMI). The bit above it always
/// reads as 1. Neither is stored here.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub carry: bool,
    pub zero: bool,
    pub irq_disable: bool,
    /// Stored and restored only; the 2A03 has no BCD arithmetic.
    pub decimal: bool,
    pub overflow: bool,
    pub negative: bool,
}

impl Status {
    /// Packs the flags into the stack layout, with B set for software pushes.
    pub fn to_byte(self, software_break: bool) -> u8 {
        let mut bits = StatusBits::UNUSED;
        bits.set(StatusBits::CARRY, self.carry);
        bits.set(StatusBits::ZERO, self.zero);
        bits.set(StatusBits::INTERRUPT, self.irq_disable);
        bits.set(StatusBits::DECIMAL, self.decimal);
        bits.set(StatusBits::BREAK, software_break);
        bits.set(StatusBits::OVERFLOW, self.overflow);
        bits.set(StatusBits::NEGATIVE, self.negative);
        bits.bits()
    }

    /// Unpacks a stack byte. Bits 4 and 5 are ignored.
    pub fn from_byte(byte: u8) -> Self {
        let bits = StatusBits::from_bits_retain(byte);
        Self {
            carry: bits.contains(StatusBits::CARRY),
            zero: bits.contains(StatusBits::ZERO),
            irq_disable: bits.contains(StatusBits::INTERRUPT),
            decimal: bits.contains(StatusBits::DECIMAL),
            overflow: bits.contains(StatusBits::OVERFLOW),
            negative: bits.contains(StatusBits::NEGATIVE),
        }
    }

    /// Update N and Z flags
    pub(crate) fn update_nz(&mut self, value: u8) {
        self.negative = value & 0x80 != 0;
        self.zero = value == 0;
    }
}
