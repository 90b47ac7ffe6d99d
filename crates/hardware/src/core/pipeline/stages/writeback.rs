//! Writeback Stage: functional unit to CDB.
//!
//! An instruction is finished once `latency` cycles have passed since it
//! started executing. This stage:
//! 1. Frees finished stores directly; they have no result to broadcast.
//! 2. Picks the oldest finished instruction across both pools as the single
//!    CDB winner and frees its station and unit for reuse later this cycle.
//! 3. Leaves every other finished instruction parked on its unit until it wins.

use tracing::trace;

use crate::core::pipeline::engine::Engine;
use crate::isa::flags::{OpClass, UnitClass};
use crate::isa::instruction::InstIndex;
use crate::sim::trace::Trace;

/// Executes the writeback stage.
pub fn writeback_stage(engine: &mut Engine, trace: &mut Trace, cycle: u64) {
    for unit in [UnitClass::Int, UnitClass::Fp] {
        release_finished_stores(engine, trace, unit, cycle);
    }

    let view: &Engine = engine;
    let log: &Trace = trace;
    let winner = [UnitClass::Int, UnitClass::Fp]
        .into_iter()
        .filter_map(|unit| {
            cdb_candidate(view, log, unit, cycle).map(|(unit_slot, index)| (unit, unit_slot, index))
        })
        .min_by_key(|&(_, _, index)| index);

    if let Some((unit, unit_slot, index)) = winner {
        trace[index].cycles.set_cdb(cycle);
        engine.cdb.broadcast(index);
        let freed = engine.release(unit, unit_slot);
        debug_assert_eq!(
            freed.map(|entry| entry.index),
            Some(index),
            "freed station is not the CDB winner"
        );
        trace!(cycle, inst = %index, pool = %unit, "WB  broadcast on CDB");
    }
}

/// Oldest finished, broadcasting occupant of one pool as `(unit slot, index)`.
fn cdb_candidate(
    engine: &Engine,
    trace: &Trace,
    unit: UnitClass,
    cycle: u64,
) -> Option<(usize, InstIndex)> {
    let (rs, fu) = (engine.rs(unit), engine.fu(unit));
    fu.occupants()
        .filter_map(|(unit_slot, station)| {
            let entry = rs.get(station)?;
            if !entry.class.writes_cdb() {
                return None;
            }
            let started = trace[entry.index].cycles.execute?;
            fu.is_done(started, cycle).then_some((unit_slot, entry.index))
        })
        .min_by_key(|&(_, index)| index)
}

/// Frees the station and unit of every store whose latency has expired.
fn release_finished_stores(engine: &mut Engine, trace: &Trace, unit: UnitClass, cycle: u64) {
    let (rs, fu) = (engine.rs(unit), engine.fu(unit));
    let finished: Vec<usize> = fu
        .occupants()
        .filter(|&(_, station)| {
            rs.get(station).is_some_and(|entry| {
                entry.class == OpClass::Store
                    && trace[entry.index]
                        .cycles
                        .execute
                        .is_some_and(|started| fu.is_done(started, cycle))
            })
        })
        .map(|(unit_slot, _)| unit_slot)
        .collect();

    for unit_slot in finished {
        if let Some(entry) = engine.release(unit, unit_slot) {
            trace!(cycle, inst = %entry.index, "WB  store complete, resources freed");
        }
    }
}
