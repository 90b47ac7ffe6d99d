//! Reservation station pools.
//!
//! A pool is a fixed array of stations, each holding at most one dispatched
//! instruction while it waits for its operands and a functional unit. Freed
//! stations are available to dispatch in the same cycle they are released.

use crate::isa::flags::OpClass;
use crate::isa::instruction::InstIndex;

/// Instruction resident in a reservation station.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RsEntry {
    /// Trace index of the instruction.
    pub index: InstIndex,
    /// Class of the instruction (decides whether it broadcasts).
    pub class: OpClass,
}

/// Fixed-size pool of reservation stations.
#[derive(Clone, Debug)]
pub struct RsPool {
    stations: Vec<Option<RsEntry>>,
}

impl RsPool {
    /// Creates a pool of `size` empty stations.
    pub fn new(size: usize) -> Self {
        Self {
            stations: vec![None; size],
        }
    }

    /// Number of stations in the pool.
    #[inline]
    pub fn size(&self) -> usize {
        self.stations.len()
    }

    /// True if every station is free.
    pub fn is_empty(&self) -> bool {
        self.stations.iter().all(Option::is_none)
    }

    /// Number of occupied stations.
    pub fn occupied(&self) -> usize {
        self.stations.iter().filter(|s| s.is_some()).count()
    }

    /// Places `entry` in the lowest-numbered free station.
    ///
    /// Returns the station number, or `None` if the pool is full.
    pub fn allocate(&mut self, entry: RsEntry) -> Option<usize> {
        let slot = self.stations.iter().position(Option::is_none)?;
        self.stations[slot] = Some(entry);
        Some(slot)
    }

    /// The entry held by station `slot`.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<&RsEntry> {
        self.stations[slot].as_ref()
    }

    /// Frees station `slot`, returning what it held.
    pub fn release(&mut self, slot: usize) -> RsEntry {
        let entry = self.stations[slot].take();
        match entry {
            Some(entry) => entry,
            None => panic!("released reservation station {slot} which was already free"),
        }
    }

    /// Iterates occupied stations as `(slot, entry)`.
    pub fn occupants(&self) -> impl Iterator<Item = (usize, &RsEntry)> {
        self.stations
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.as_ref().map(|e| (slot, e)))
    }
}
