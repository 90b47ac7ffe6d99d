//! Register map table for renaming.
//!
//! Maps each architectural register to the in-flight instruction that will
//! produce its next value, or `None` if the value is already available.
//! Renaming is split into two passes so that an instruction reading and
//! writing the same register depends on the previous producer, not on itself:
//! [`MapTable::resolve_inputs`] reads, then [`MapTable::commit_outputs`] writes.

use crate::common::constants::{MAX_INPUTS, MAX_OUTPUTS};
use crate::isa::instruction::InstIndex;

/// Register-to-producer map: at most one live producer per register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapTable {
    entries: Vec<Option<InstIndex>>,
}

impl MapTable {
    /// Creates a table for `num_registers` registers with no pending producers.
    pub fn new(num_registers: usize) -> Self {
        Self {
            entries: vec![None; num_registers],
        }
    }

    /// Number of registers tracked.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table tracks no registers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current producer of `reg`, or `None` if its value is available.
    #[inline]
    pub fn producer(&self, reg: usize) -> Option<InstIndex> {
        self.entries[reg]
    }

    /// True if no register has a pending producer.
    pub fn is_clear(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// First renaming pass: captures the current producer of every source
    /// register. Unused slots resolve to `None`.
    pub fn resolve_inputs(&self, inputs: &[Option<usize>; MAX_INPUTS]) -> [Option<InstIndex>; MAX_INPUTS] {
        inputs.map(|reg| reg.and_then(|r| self.entries[r]))
    }

    /// Second renaming pass: makes `producer` the pending writer of every
    /// destination register.
    pub fn commit_outputs(&mut self, outputs: &[Option<usize>; MAX_OUTPUTS], producer: InstIndex) {
        for &reg in outputs.iter().flatten() {
            self.entries[reg] = Some(producer);
        }
    }

    /// Clears a register's producer, but ONLY if it is still `producer`.
    /// A newer instruction that renamed the same register keeps its entry.
    pub fn clear_if_match(&mut self, reg: usize, producer: InstIndex) {
        let slot = &mut self.entries[reg];
        if *slot == Some(producer) {
            *slot = None;
        }
    }
}
