use log::debug;

use crate::hardware::{Bus, InterruptLines, MOS6502};
use crate::CpuError;

/// PPU OAMDATA port, the destination of sprite DMA.
const OAM_DATA: u16 = 0x2004;

/// Cycles of a DMA that starts on an even cycle: one halt cycle, then 256 read/write pairs.
const DMA_CYCLES: u16 = 513;

/// Sprite DMA in flight.
#[derive(Debug, Clone, Copy)]
struct OamDma {
    page: u8,
    lo: u8,
    data: u8,
    remaining: u16,
}

impl OamDma {
    /// One DMA cycle. Returns true once the transfer is over.
    fn tick<B: Bus + ?Sized>(&mut self, bus: &mut B) -> bool {
        if self.remaining < DMA_CYCLES {
            if self.remaining % 2 == 0 {
                self.data = bus.read(u16::from_le_bytes([self.lo, self.page]));
                self.lo = self.lo.wrapping_add(1);
            } else {
                bus.write(OAM_DATA, self.data);
            }
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

/// The Ricoh 2A03: a 6502 core without decimal mode, plus the on-die sprite DMA unit.
///
/// The CPU is suspended while a DMA runs. Requests come from the bus (a write to `$4014`) and are
/// checked after every CPU cycle.
pub struct Ricoh2A03 {
    core: MOS6502,
    cycle: u64,
    dma: Option<OamDma>,
    /// The last tick ran a core cycle rather than a DMA cycle.
    stepped: bool,
}

impl Ricoh2A03 {
    pub fn new(core: MOS6502) -> Self {
        Self {
            core,
            cycle: 0,
            dma: None,
            stepped: false,
        }
    }

    /// Resets the core and drops any DMA in progress.
    pub fn reset(&mut self) {
        self.core.reset();
        self.dma = None;
        self.cycle = 0;
        self.stepped = false;
    }

    /// Advances one CPU clock.
    pub fn tick<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        lines: &mut InterruptLines,
    ) -> Result<(), CpuError> {
        self.stepped = false;
        match self.dma.as_mut() {
            Some(dma) => {
                if dma.tick(bus) {
                    self.dma = None;
                }
            }
            None => {
                self.core.step(bus, lines)?;
                self.stepped = true;
            }
        }
        self.cycle += 1;

        if self.dma.is_none() {
            if let Some(page) = bus.take_dma_request() {
                self.start_dma(page);
            }
        }
        Ok(())
    }

    /// Runs up to `budget` cycles and returns how many were run. Stops at the first error.
    pub fn run<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        lines: &mut InterruptLines,
        budget: u64,
    ) -> Result<u64, CpuError> {
        for _ in 0..budget {
            self.tick(bus, lines)?;
        }
        Ok(budget)
    }

    /// Starts copying `page` into OAM from the next cycle on. Takes an extra alignment cycle
    /// when that cycle is odd.
    pub fn start_dma(&mut self, page: u8) {
        let remaining = DMA_CYCLES + (self.cycle % 2) as u16;
        debug!("OAM DMA from ${:02X}00, {} cycles", page, remaining);
        self.dma = Some(OamDma {
            page,
            lo: 0,
            data: 0,
            remaining,
        });
    }

    /// Address of the opcode fetched by the last tick. `None` for DMA cycles.
    pub fn fetched_pc(&self) -> Option<u16> {
        if self.stepped {
            self.core.fetched_pc()
        } else {
            None
        }
    }

    pub fn dma_active(&self) -> bool {
        self.dma.is_some()
    }

    /// Cycles since the last reset, DMA included.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn core(&self) -> &MOS6502 {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut MOS6502 {
        &mut self.core
    }
}
