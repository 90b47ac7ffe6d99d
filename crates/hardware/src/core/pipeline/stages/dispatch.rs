//! Dispatch Stage: IFQ to reservation station.
//!
//! Only the IFQ head may leave per cycle. Control instructions are resolved
//! instantly and leave without a station. Everything else needs a free station
//! in the pool of its class, otherwise the head stalls and blocks the queue.
//!
//! A successful dispatch renames the instruction: inputs are looked up in the
//! map table before its outputs are recorded there, so an instruction that
//! reads and writes the same register never waits on itself.

use tracing::trace;

use crate::core::pipeline::engine::Engine;
use crate::core::pipeline::map_table::MapTable;
use crate::core::pipeline::reservation::RsEntry;
use crate::isa::flags::OpClass;
use crate::isa::instruction::Instruction;
use crate::sim::trace::Trace;

/// Executes the dispatch stage.
pub fn dispatch_stage(engine: &mut Engine, trace: &mut Trace, cycle: u64) {
    let Some(&head) = engine.ifq.front() else {
        return;
    };

    if head.class.is_control() {
        let _ = engine.ifq.pop_front();
        trace!(cycle, inst = %head.index, "IS  branch resolved");
        return;
    }

    let Some(unit) = head.class.unit() else {
        return;
    };
    let (rs, _) = engine.pools_mut(unit);
    let entry = RsEntry { index: head.index, class: head.class };
    let Some(station) = rs.allocate(entry) else {
        trace!(cycle, inst = %head.index, pool = %unit, "IS  stall, no free station");
        return;
    };

    let _ = engine.ifq.pop_front();
    let inst = &mut trace[head.index];
    inst.cycles.set_issue(cycle);
    rename(&mut engine.map_table, inst, head.class);
    trace!(cycle, inst = %head.index, pool = %unit, station, "IS  dispatched");
}

/// Resolves `inst`'s inputs against `map`, then maps its outputs to it.
fn rename(map: &mut MapTable, inst: &mut Instruction, class: OpClass) {
    inst.producers = map.resolve_inputs(&inst.inputs);
    if class.writes_cdb() {
        map.commit_outputs(&inst.outputs, inst.index);
    }
}
