//! Execute Stage: reservation station to functional unit.
//!
//! For each pool independently, repeatedly match the oldest ready occupant to
//! a free unit until either runs out. An occupant is ready when:
//! - every producer reference has been resolved,
//! - it has spent at least one full cycle in its station (`issue < cycle`), and
//! - it has not started executing yet.
//!
//! This is a greedy oldest-first matching, not a global optimum.

use tracing::trace;

use crate::core::pipeline::engine::Engine;
use crate::core::pipeline::reservation::RsPool;
use crate::isa::flags::UnitClass;
use crate::isa::instruction::InstIndex;
use crate::sim::trace::Trace;

/// Executes the execute stage for both pools.
pub fn execute_stage(engine: &mut Engine, trace: &mut Trace, cycle: u64) {
    for unit in [UnitClass::Int, UnitClass::Fp] {
        issue_pool(engine, trace, unit, cycle);
    }
}

fn issue_pool(engine: &mut Engine, trace: &mut Trace, unit: UnitClass, cycle: u64) {
    while let Some(unit_slot) = engine.fu(unit).free_unit() {
        let Some((station, index)) = oldest_ready(engine.rs(unit), trace, cycle) else {
            break;
        };
        trace[index].cycles.set_execute(cycle);
        let (_, fu) = engine.pools_mut(unit);
        fu.assign(unit_slot, station);
        trace!(cycle, inst = %index, pool = %unit, unit = unit_slot, "EX  start");
    }
}

/// Lowest-index ready occupant of `rs` as `(station, index)`.
fn oldest_ready(rs: &RsPool, trace: &Trace, cycle: u64) -> Option<(usize, InstIndex)> {
    rs.occupants()
        .filter(|(_, entry)| {
            let inst = &trace[entry.index];
            !inst.has_raw_dependences()
                && inst.cycles.issue.is_some_and(|issued| issued < cycle)
                && inst.cycles.execute.is_none()
        })
        .map(|(station, entry)| (station, entry.index))
        .min_by_key(|&(_, index)| index)
}
