pub mod bus;
pub mod cpu;
pub mod interrupts;
pub mod ram;
pub mod ricoh;

pub use bus::Bus;
pub use cpu::MOS6502;
pub use interrupts::InterruptLines;
pub use ram::FlatRam;
pub use ricoh::Ricoh2A03;
