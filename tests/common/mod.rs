#![allow(dead_code)]

use rust_nes_cpu::hardware::cpu::micro_ops::{DataOp, MemOp};
use rust_nes_cpu::{Bus, CpuConfig, FlatRam, InterruptLines, MOS6502};

pub const NMI_HANDLER: u16 = 0x9000;
pub const IRQ_HANDLER: u16 = 0xA000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(u16, u8),
    Write(u16, u8),
}

/// Flat memory that logs every access.
pub struct Recorder {
    pub ram: FlatRam,
    pub log: Vec<Access>,
}

impl Bus for Recorder {
    fn read(&mut self, address: u16) -> u8 {
        let value = self.ram.read(address);
        self.log.push(Access::Read(address, value));
        value
    }

    fn write(&mut self, address: u16, value: u8) {
        self.log.push(Access::Write(address, value));
        self.ram.write(address, value);
    }
}

pub struct Machine {
    pub cpu: MOS6502,
    pub bus: Recorder,
    pub lines: InterruptLines,
}

impl Machine {
    /// Program at $8000, reset done, next cycle fetches the first opcode. The log starts empty.
    pub fn new(program: &[u8]) -> Self {
        Self::at(0x8000, program)
    }

    pub fn at(origin: u16, program: &[u8]) -> Self {
        Self::with_config(origin, program, CpuConfig::default())
    }

    pub fn with_config(origin: u16, program: &[u8], config: CpuConfig) -> Self {
        let mut machine = Self::powered(origin, program, config);
        machine.cpu.reset();
        machine.run(7);
        assert!(machine.cpu.at_instruction_boundary());
        machine.bus.log.clear();
        machine
    }

    /// Memory set up, CPU never reset.
    pub fn powered(origin: u16, program: &[u8], config: CpuConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut ram = FlatRam::new();
        ram.load(origin, program).unwrap();
        ram.set_reset_vector(origin);
        ram.load(0xFFFA, &NMI_HANDLER.to_le_bytes()).unwrap();
        ram.load(0xFFFE, &IRQ_HANDLER.to_le_bytes()).unwrap();
        ram.load(NMI_HANDLER, &[0xEA; 16]).unwrap();
        ram.load(IRQ_HANDLER, &[0xEA; 16]).unwrap();

        Self {
            cpu: MOS6502::with_config(config),
            bus: Recorder { ram, log: Vec::new() },
            lines: InterruptLines::new(),
        }
    }

    /// One cycle. Returns whether it fetched an opcode (or started an interrupt).
    pub fn step(&mut self) -> bool {
        let before = self.cpu.next_op().unwrap();
        self.cpu.step(&mut self.bus, &mut self.lines).unwrap();
        let after = self.cpu.next_op();
        if before.mem == MemOp::Fetch {
            return true;
        }
        if before.data == DataOp::Branch {
            // A taken branch queues its fixup or the fetch; a branch not taken fetched already.
            return !matches!(after, Some(op) if op.mem == MemOp::Fetch || op.data == DataOp::FixPch);
        }
        false
    }

    pub fn run(&mut self, cycles: usize) {
        for _ in 0..cycles {
            self.step();
        }
    }

    /// Cycle counts of the next `n` instructions, each measured from its opcode fetch to the
    /// next one.
    pub fn timings(&mut self, n: usize) -> Vec<usize> {
        let mut fetches = Vec::new();
        let mut cycle = 0;
        while fetches.len() <= n {
            if self.step() {
                fetches.push(cycle);
            }
            cycle += 1;
            assert!(cycle < 1000, "no fetch in sight");
        }
        fetches.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Steps until the next cycle is an opcode fetch at `pc`. Returns the cycles taken.
    pub fn run_until_fetch_at(&mut self, pc: u16) -> usize {
        let mut cycles = 0;
        loop {
            let fetching = matches!(self.cpu.next_op(), Some(op) if op.mem == MemOp::Fetch);
            if fetching && self.cpu.pc() == pc {
                return cycles;
            }
            self.step();
            cycles += 1;
            assert!(cycles < 1000, "never reached ${:04X}", pc);
        }
    }

    pub fn poke(&mut self, address: u16, value: u8) {
        self.bus.ram.poke(address, value);
    }

    pub fn reads_of(&self, address: u16) -> usize {
        self.bus
            .log
            .iter()
            .filter(|access| matches!(access, Access::Read(a, _) if *a == address))
            .count()
    }

    /// The last interrupt stack frame written: (return address, pushed status byte).
    pub fn last_frame(&self) -> (u16, u8) {
        let pushes: Vec<u8> = self
            .bus
            .log
            .iter()
            .filter_map(|access| match access {
                Access::Write(address, value) if address >> 8 == 0x01 => Some(*value),
                _ => None,
            })
            .collect();
        let frame = &pushes[pushes.len() - 3..];
        (u16::from_le_bytes([frame[1], frame[0]]), frame[2])
    }
}
