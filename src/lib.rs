//! Cycle-accurate core for the NES flavour of the MOS 6502 (the CPU half of the Ricoh 2A03).
//!
//! Every instruction is broken into micro-operations, one per clock cycle, held in a queue. Each
//! call to [`MOS6502::step`] executes exactly one of them against a [`Bus`], so bus accesses,
//! dummy reads and interrupt recognition all land on the same cycle they do on the real chip.

pub mod error;
pub mod hardware;

pub use error::{CpuError, LoadError};
pub use hardware::cpu::{CpuConfig, MOS6502, Status, UnmaskPolicy};
pub use hardware::{Bus, FlatRam, InterruptLines, Ricoh2A03};
