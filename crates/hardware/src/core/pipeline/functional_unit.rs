//! Functional unit pools.
//!
//! Each unit holds the reservation station whose instruction it is executing;
//! the station and the unit are always released together. Every unit in a pool
//! shares the pool's fixed latency.

/// Fixed-size pool of functional units with a common latency.
#[derive(Clone, Debug)]
pub struct FuPool {
    /// Reservation station slot being executed by each unit.
    units: Vec<Option<usize>>,
    latency: u64,
}

impl FuPool {
    /// Creates `size` idle units with the given latency.
    pub fn new(size: usize, latency: u64) -> Self {
        Self {
            units: vec![None; size],
            latency,
        }
    }

    /// Execution latency in cycles.
    #[inline]
    pub const fn latency(&self) -> u64 {
        self.latency
    }

    /// Number of units in the pool.
    #[inline]
    pub fn size(&self) -> usize {
        self.units.len()
    }

    /// True if every unit is idle.
    pub fn is_empty(&self) -> bool {
        self.units.iter().all(Option::is_none)
    }

    /// First idle unit, if any.
    pub fn free_unit(&self) -> Option<usize> {
        self.units.iter().position(Option::is_none)
    }

    /// Starts executing reservation station `station` on unit `unit`.
    pub fn assign(&mut self, unit: usize, station: usize) {
        debug_assert!(self.units[unit].is_none(), "functional unit {unit} is busy");
        self.units[unit] = Some(station);
    }

    /// Idles unit `unit`, returning the station it was executing.
    pub fn release(&mut self, unit: usize) -> Option<usize> {
        self.units[unit].take()
    }

    /// Iterates busy units as `(unit, station)`.
    pub fn occupants(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.units
            .iter()
            .enumerate()
            .filter_map(|(unit, station)| station.map(|s| (unit, s)))
    }

    /// True if an instruction that started at `execute` has finished by `cycle`.
    #[inline]
    pub const fn is_done(&self, execute: u64, cycle: u64) -> bool {
        cycle >= execute + self.latency
    }
}
