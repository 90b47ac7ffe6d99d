//! Instruction fetch queue.
//!
//! Bounded FIFO between fetch and dispatch. Only the head entry may leave in a
//! given cycle, so a stalled head blocks everything behind it.

use std::collections::VecDeque;

use crate::isa::flags::OpClass;
use crate::isa::instruction::InstIndex;

/// An instruction waiting in the IFQ, tagged with its validated class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IfqEntry {
    /// Trace index of the instruction.
    pub index: InstIndex,
    /// Class determined at fetch.
    pub class: OpClass,
}

/// Bounded FIFO of fetched, not yet dispatched instructions.
#[derive(Clone, Debug)]
pub struct InstructionQueue {
    queue: VecDeque<IfqEntry>,
    capacity: usize,
}

impl InstructionQueue {
    /// Creates an empty queue holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of entries.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently queued.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True if nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// True if no more entries can be accepted.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.queue.len() >= self.capacity
    }

    /// Appends an entry at the tail. The caller checks [`is_full`](Self::is_full) first.
    pub fn push_back(&mut self, entry: IfqEntry) {
        debug_assert!(!self.is_full(), "IFQ overflow");
        self.queue.push_back(entry);
    }

    /// The oldest entry, if any.
    #[inline]
    pub fn front(&self) -> Option<&IfqEntry> {
        self.queue.front()
    }

    /// Removes and returns the oldest entry.
    pub fn pop_front(&mut self) -> Option<IfqEntry> {
        self.queue.pop_front()
    }

    /// Iterates entries from oldest to youngest.
    pub fn iter(&self) -> impl Iterator<Item = &IfqEntry> {
        self.queue.iter()
    }
}
