use std::io;
use thiserror::Error;

/// Errors that stop the CPU core. None of these are recoverable: the emulation session is expected
/// to halt once one is returned.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum CpuError {
    /// The fetched byte has no entry in the decode table.
    #[error("unimplemented opcode ${opcode:02X} at ${pc:04X}")]
    UnimplementedOpcode { opcode: u8, pc: u16 },
    /// A cycle started with nothing scheduled. Only reachable by stepping a core that was never
    /// reset, or through a broken decode table.
    #[error("micro-op queue empty at ${pc:04X} (was the CPU reset?)")]
    QueueUnderflow { pc: u16 },
}

/// Errors raised while placing a program image in memory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read image: {0}")]
    Io(#[from] io::Error),
    #[error("image of {len} bytes does not fit at ${address:04X}")]
    TooLarge { address: u16, len: usize },
}
