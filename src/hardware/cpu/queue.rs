use std::collections::VecDeque;

use super::micro_ops::MicroOp;

/// Work already decided for this and future cycles.
///
/// The op being executed has always been popped before its actions run, so "immediately after
/// the current op" is the front of the queue.
#[derive(Debug, Default, Clone)]
pub struct MicroQueue {
    ops: VecDeque<MicroOp>,
}

impl MicroQueue {
    pub fn new() -> Self {
        Self {
            ops: VecDeque::with_capacity(16),
        }
    }

    /// Appends at the tail (normal sequencing).
    pub fn enqueue(&mut self, op: MicroOp) {
        self.ops.push_back(op);
    }

    pub fn extend(&mut self, ops: &[MicroOp]) {
        self.ops.extend(ops.iter().copied());
    }

    /// Schedules `op` for the very next cycle, ahead of everything already queued.
    pub fn insert_next(&mut self, op: MicroOp) {
        self.ops.push_front(op);
    }

    pub fn next(&mut self) -> Option<MicroOp> {
        self.ops.pop_front()
    }

    pub fn peek(&self) -> Option<&MicroOp> {
        self.ops.front()
    }

    pub fn get(&self, index: usize) -> Option<&MicroOp> {
        self.ops.get(index)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}
