//! Instruction trace storage.
//!
//! The trace is the single owner of every instruction record. All pipeline
//! structures refer to instructions by [`InstIndex`], so the backing storage can
//! grow without invalidating anything that points into it.

use std::ops::{Index, IndexMut};

use serde::Serialize;

use crate::isa::instruction::{InstIndex, Instruction};

/// Append-only, index-addressable log of instruction records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    instructions: Vec<Instruction>,
}

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty trace with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instructions: Vec::with_capacity(capacity),
        }
    }

    /// Appends a record, assigning it the next sequence index. Any scheduling
    /// state the record carries is discarded.
    pub fn push(&mut self, mut inst: Instruction) -> InstIndex {
        let index = InstIndex(self.instructions.len());
        inst.index = index;
        inst.clear_schedule();
        self.instructions.push(inst);
        index
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True if the trace holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Returns the record at `index`, if present.
    pub fn get(&self, index: InstIndex) -> Option<&Instruction> {
        self.instructions.get(index.0)
    }

    /// Returns the record at `index` mutably, if present.
    pub fn get_mut(&mut self, index: InstIndex) -> Option<&mut Instruction> {
        self.instructions.get_mut(index.0)
    }

    /// Discards the producers and stage cycles of every record.
    pub fn clear_schedule(&mut self) {
        for inst in &mut self.instructions {
            inst.clear_schedule();
        }
    }

    /// Iterates records in program order.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }
}

impl Index<InstIndex> for Trace {
    type Output = Instruction;

    fn index(&self, index: InstIndex) -> &Instruction {
        &self.instructions[index.0]
    }
}

impl IndexMut<InstIndex> for Trace {
    fn index_mut(&mut self, index: InstIndex) -> &mut Instruction {
        &mut self.instructions[index.0]
    }
}

impl FromIterator<Instruction> for Trace {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        let mut trace = Self::new();
        for inst in iter {
            let _ = trace.push(inst);
        }
        trace
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}
