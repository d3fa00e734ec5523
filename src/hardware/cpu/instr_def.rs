use super::micro_ops::{DataOp, MemOp, MicroOp};

/// Longest canonical sequence (BRK, and the absolute-indexed read-modify-writes), counting the
/// fused fetch of the next instruction.
pub(crate) const MAX_INSTR_CYCLES: usize = 7;

const FILLER: MicroOp = MicroOp::new(MemOp::Nop, DataOp::Nop);

/// Const-sized struct for storing an instruction definition.
///
/// Holds every cycle after the opcode fetch, ending with the cycle that fetches the next opcode.
/// Cycles added at run time (page crossings, taken branches) are never part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrDef {
    len: usize,
    u_ops: [MicroOp; MAX_INSTR_CYCLES],
}

impl InstrDef {
    /// Helper function for generating definitions easily.
    pub(crate) fn from(ops: &[MicroOp]) -> Self {
        debug_assert!(
            ops.len() <= MAX_INSTR_CYCLES,
            "The amount of operations must be less than or equal to {}",
            MAX_INSTR_CYCLES
        );
        let mut u_ops = [FILLER; MAX_INSTR_CYCLES];
        let len = ops.len().min(MAX_INSTR_CYCLES);
        u_ops[..len].copy_from_slice(&ops[..len]);
        Self { len, u_ops }
    }

    pub fn ops(&self) -> &[MicroOp] {
        &self.u_ops[..self.len]
    }

    /// Cycles from this opcode's fetch to the next fetch, with no extra cycles.
    #[cfg(test)]
    pub fn cycles(&self) -> usize {
        self.len
    }
}

/// Registers one opcode in a decode table.
macro_rules! opc {
    ($table:ident, $opcode:literal, $def:expr) => {
        $table[$opcode] = Some($def)
    };
}
pub(crate) use opc;
