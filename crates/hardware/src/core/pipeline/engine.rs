//! Tomasulo scheduling engine.
//!
//! The engine owns every scheduling structure for one simulation run (IFQ, map
//! table, reservation stations, functional units and the CDB) and advances them
//! one cycle at a time. Stages run in a fixed order so that resources released
//! early in a cycle are reused later in the same cycle:
//! 1. **Retire:** The previous cycle's CDB winner wakes its dependents.
//! 2. **Writeback:** Finished instructions free their units; the oldest wins the CDB.
//! 3. **Execute:** Ready stations start on free functional units.
//! 4. **Dispatch:** The IFQ head takes a reservation station and is renamed.
//! 5. **Fetch:** The next non-trap trace entry enters the IFQ.

use tracing::debug;

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::pipeline::cdb::Cdb;
use crate::core::pipeline::functional_unit::FuPool;
use crate::core::pipeline::ifq::InstructionQueue;
use crate::core::pipeline::map_table::MapTable;
use crate::core::pipeline::reservation::{RsEntry, RsPool};
use crate::core::pipeline::stages::{dispatch, execute, fetch, retire, writeback};
use crate::isa::flags::UnitClass;
use crate::sim::trace::Trace;

/// All scheduling state of one simulation run.
#[derive(Clone, Debug)]
pub struct Engine {
    pub(crate) ifq: InstructionQueue,
    pub(crate) map_table: MapTable,
    pub(crate) int_rs: RsPool,
    pub(crate) fp_rs: RsPool,
    pub(crate) int_fu: FuPool,
    pub(crate) fp_fu: FuPool,
    pub(crate) cdb: Cdb,
    /// Trace position of the next entry to fetch.
    pub(crate) fetch_cursor: usize,
}

impl Engine {
    /// Builds an idle engine sized by `config`.
    ///
    /// `config` must pass [`Config::validate`]; a pool of size zero can never drain.
    pub fn new(config: &Config) -> Self {
        debug_assert!(config.validate().is_ok(), "engine built from an invalid config");
        let p = &config.pipeline;
        Self {
            ifq: InstructionQueue::new(p.ifq_size),
            map_table: MapTable::new(config.general.num_registers),
            int_rs: RsPool::new(p.rs_int),
            fp_rs: RsPool::new(p.rs_fp),
            int_fu: FuPool::new(p.fu_int, p.latency_int),
            fp_fu: FuPool::new(p.fu_fp, p.latency_fp),
            cdb: Cdb::new(),
            fetch_cursor: 0,
        }
    }

    /// Runs all five stages for `cycle`.
    ///
    /// # Errors
    ///
    /// Propagates validation failures of the entry being fetched.
    pub fn tick(&mut self, trace: &mut Trace, cycle: u64) -> Result<(), SimError> {
        retire::retire_stage(self, trace, cycle);
        writeback::writeback_stage(self, trace, cycle);
        execute::execute_stage(self, trace, cycle);
        dispatch::dispatch_stage(self, trace, cycle);
        fetch::fetch_stage(self, trace, cycle)?;

        debug!(
            cycle,
            ifq = self.ifq.len(),
            rs_int = self.int_rs.occupied(),
            rs_fp = self.fp_rs.occupied(),
            cdb = ?self.cdb.occupant(),
            "cycle complete"
        );
        Ok(())
    }

    /// True once every structure is empty and the whole trace has been fetched.
    pub fn is_drained(&self, trace: &Trace) -> bool {
        self.ifq.is_empty()
            && self.int_rs.is_empty()
            && self.fp_rs.is_empty()
            && self.int_fu.is_empty()
            && self.fp_fu.is_empty()
            && self.cdb.is_empty()
            && self.fetch_cursor >= trace.len()
    }

    /// Instruction fetch queue.
    pub const fn ifq(&self) -> &InstructionQueue {
        &self.ifq
    }

    /// Register map table.
    pub const fn map_table(&self) -> &MapTable {
        &self.map_table
    }

    /// Common data bus.
    pub const fn cdb(&self) -> &Cdb {
        &self.cdb
    }

    /// Trace position of the next entry to fetch.
    pub const fn fetch_cursor(&self) -> usize {
        self.fetch_cursor
    }

    /// Reservation station pool for `unit`.
    pub const fn rs(&self, unit: UnitClass) -> &RsPool {
        match unit {
            UnitClass::Int => &self.int_rs,
            UnitClass::Fp => &self.fp_rs,
        }
    }

    /// Functional unit pool for `unit`.
    pub const fn fu(&self, unit: UnitClass) -> &FuPool {
        match unit {
            UnitClass::Int => &self.int_fu,
            UnitClass::Fp => &self.fp_fu,
        }
    }

    /// Reservation station and functional unit pools for `unit`, mutably.
    pub(crate) fn pools_mut(&mut self, unit: UnitClass) -> (&mut RsPool, &mut FuPool) {
        match unit {
            UnitClass::Int => (&mut self.int_rs, &mut self.int_fu),
            UnitClass::Fp => (&mut self.fp_rs, &mut self.fp_fu),
        }
    }

    /// Frees functional unit `unit_slot` of `unit` together with the station it executes.
    pub(crate) fn release(&mut self, unit: UnitClass, unit_slot: usize) -> Option<RsEntry> {
        let (rs, fu) = self.pools_mut(unit);
        fu.release(unit_slot).map(|station| rs.release(station))
    }
}
