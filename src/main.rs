use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{error, info};

use rust_nes_cpu::hardware::cpu::disasm;
use rust_nes_cpu::{CpuConfig, FlatRam, InterruptLines, Ricoh2A03, UnmaskPolicy, MOS6502};

/// Runs a raw 6502 program image on the 2A03 core over 64 KiB of flat RAM.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Raw program image
    image: PathBuf,

    /// Load address, in hex
    #[arg(long, default_value = "8000", value_parser = parse_hex)]
    load: u16,

    /// Reset vector override, in hex. Defaults to the load address unless the image covers $FFFC.
    #[arg(long, value_parser = parse_hex)]
    entry: Option<u16>,

    /// Cycle budget
    #[arg(long, default_value_t = 1_000_000)]
    cycles: u64,

    /// Disassemble every instruction as it is fetched
    #[arg(long)]
    trace: bool,

    /// When CLI lets a pending IRQ through
    #[arg(long, value_enum, default_value_t = Unmask::Deferred)]
    irq_unmask: Unmask,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Unmask {
    Deferred,
    Immediate,
}

fn parse_hex(s: &str) -> Result<u16, String> {
    let digits = s.trim_start_matches('$').trim_start_matches("0x");
    u16::from_str_radix(digits, 16).map_err(|e| format!("`{}`: {}", s, e))
}

/// Why a run ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Budget,
    /// The same instruction started twice in a row: a jump or branch to itself.
    Trapped(u16),
}

/// A 2A03 wired to flat RAM, run from reset.
struct Session {
    cpu: Ricoh2A03,
    ram: FlatRam,
    lines: InterruptLines,
    last_fetch: Option<u16>,
}

impl Session {
    fn new(ram: FlatRam, config: CpuConfig) -> Self {
        let mut cpu = Ricoh2A03::new(MOS6502::with_config(config));
        cpu.reset();
        Self {
            cpu,
            ram,
            lines: InterruptLines::new(),
            last_fetch: None,
        }
    }

    /// Ticks until the cycle counter reaches `budget` or the program traps. Each instruction
    /// start is written to `trace`, if given.
    fn run(
        &mut self,
        budget: u64,
        mut trace: Option<&mut dyn Write>,
    ) -> Result<Stop, Box<dyn Error>> {
        while self.cpu.cycle() < budget {
            self.cpu.tick(&mut self.ram, &mut self.lines)?;
            let Some(pc) = self.cpu.fetched_pc() else {
                continue;
            };
            if self.last_fetch == Some(pc) {
                info!("trapped at ${:04X}", pc);
                return Ok(Stop::Trapped(pc));
            }
            self.last_fetch = Some(pc);
            if let Some(out) = trace.as_deref_mut() {
                writeln!(out, "{}", self.trace_line(pc))?;
            }
        }
        Ok(Stop::Budget)
    }

    /// One instruction as it starts. The registers are those it starts with.
    fn trace_line(&self, pc: u16) -> String {
        let core = self.cpu.core();
        let bytes = [0, 1, 2].map(|i| self.ram.peek(pc.wrapping_add(i)));
        let (text, _) = disasm::format(pc, &bytes);
        format!(
            "{:04X}  {:<14} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc,
            text,
            core.a(),
            core.x(),
            core.y(),
            core.status().to_byte(false),
            core.s(),
            self.cpu.cycle() - 1,
        )
    }

    fn report(&self) {
        let core = self.cpu.core();
        println!(
            "PC:{:04X} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} cycles:{}",
            core.pc(),
            core.a(),
            core.x(),
            core.y(),
            core.status().to_byte(false),
            core.s(),
            self.cpu.cycle(),
        );
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut ram = FlatRam::new();
    let len = ram.load_file(args.load, &args.image)?;

    let covers_vector = args.load as usize + len > 0xFFFD;
    match args.entry {
        Some(entry) => ram.set_reset_vector(entry),
        None if !covers_vector => ram.set_reset_vector(args.load),
        None => {}
    }

    let config = CpuConfig {
        unmask_policy: match args.irq_unmask {
            Unmask::Deferred => UnmaskPolicy::Deferred,
            Unmask::Immediate => UnmaskPolicy::Immediate,
        },
    };
    let mut session = Session::new(ram, config);

    let mut stdout = io::stdout().lock();
    let trace: Option<&mut dyn Write> = if args.trace { Some(&mut stdout) } else { None };
    let result = session.run(args.cycles, trace);
    session.report();
    result.map(|_| ())
}
