//! Fetch Stage: trace to IFQ.
//!
//! Pulls at most one instruction per cycle. Each entry is validated as it is
//! reached; traps are stepped over without cost and never enter the queue.

use tracing::trace;

use crate::common::error::SimError;
use crate::core::pipeline::engine::Engine;
use crate::core::pipeline::ifq::IfqEntry;
use crate::isa::instruction::InstIndex;
use crate::sim::trace::Trace;

/// Executes the fetch stage.
///
/// # Errors
///
/// Returns the validation error of the first malformed entry reached.
pub fn fetch_stage(engine: &mut Engine, trace: &mut Trace, cycle: u64) -> Result<(), SimError> {
    if engine.ifq.is_full() {
        return Ok(());
    }

    let num_registers = engine.map_table.len();
    while let Some(inst) = trace.get_mut(InstIndex(engine.fetch_cursor)) {
        let class = inst.validate(num_registers)?;
        engine.fetch_cursor += 1;
        if class.is_trap() {
            trace!(cycle, inst = %inst.index, "FE  skipped trap");
            continue;
        }

        inst.cycles.set_dispatch(cycle);
        engine.ifq.push_back(IfqEntry { index: inst.index, class });
        trace!(cycle, inst = %inst.index, %class, "FE  fetched");
        break;
    }
    Ok(())
}
