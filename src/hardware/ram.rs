use std::fs;
use std::path::Path;

use crate::hardware::Bus;
use crate::LoadError;

const ADDRESS_SPACE: usize = 0x10000;

/// Flat, unmapped 64 KiB of RAM. Every address is plain memory, so reads have no side effects.
/// Used by the trace runner and the tests in place of a real NES memory map.
pub struct FlatRam {
    memory: Box<[u8; ADDRESS_SPACE]>,
}

impl FlatRam {
    pub fn new() -> Self {
        Self {
            memory: Box::new([0; ADDRESS_SPACE]),
        }
    }

    /// Copies `image` into memory starting at `address`.
    pub fn load(&mut self, address: u16, image: &[u8]) -> Result<(), LoadError> {
        let start = address as usize;
        let end = start + image.len();
        if end > ADDRESS_SPACE {
            return Err(LoadError::TooLarge { address, len: image.len() });
        }
        self.memory[start..end].copy_from_slice(image);
        Ok(())
    }

    /// Reads a raw image from disk and loads it at `address`. Returns its length.
    pub fn load_file(&mut self, address: u16, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let image = fs::read(path)?;
        self.load(address, &image)?;
        Ok(image.len())
    }

    /// Points the reset vector at `entry`.
    pub fn set_reset_vector(&mut self, entry: u16) {
        let [lo, hi] = entry.to_le_bytes();
        self.memory[0xFFFC] = lo;
        self.memory[0xFFFD] = hi;
    }

    /// Reads without going through the bus. Used by tooling that must not disturb anything.
    pub fn peek(&self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    pub fn poke(&mut self, address: u16, value: u8) {
        self.memory[address as usize] = value;
    }
}

impl Default for FlatRam {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for FlatRam {
    fn read(&mut self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.memory[address as usize] = value;
    }
}
