//! Retire Stage: CDB to retirement.
//!
//! The instruction broadcast in the previous cycle makes its result visible:
//! 1. Each destination register stops pointing at it, unless a newer producer
//!    has renamed the register since.
//! 2. Every reservation-station occupant waiting on it has that operand resolved.
//! 3. The bus is cleared for this cycle's winner.

use tracing::trace;

use crate::core::pipeline::engine::Engine;
use crate::sim::trace::Trace;

/// Executes the retire stage.
pub fn retire_stage(engine: &mut Engine, trace: &mut Trace, cycle: u64) {
    let Some(done) = engine.cdb.take() else {
        return;
    };

    for &reg in trace[done].outputs.iter().flatten() {
        engine.map_table.clear_if_match(reg, done);
    }

    for pool in [&engine.int_rs, &engine.fp_rs] {
        for (_, entry) in pool.occupants() {
            trace[entry.index].resolve(done);
        }
    }

    trace!(cycle, inst = %done, "RT  retired from CDB");
}
