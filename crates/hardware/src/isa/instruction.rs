//! Dynamic instruction record.
//!
//! One `Instruction` describes one entry of the trace: its decoder flags and
//! architectural operands (immutable once created) plus the scheduling state
//! written as it moves through the pipeline:
//! 1. **Producers:** The Tomasulo `Q` tags, one per source operand.
//! 2. **Stage Cycles:** The cycle the instruction entered dispatch, issue, execute and the CDB.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::constants::{MAX_INPUTS, MAX_OUTPUTS};
use crate::common::error::SimError;
use crate::isa::flags::{OpClass, OpFlags};

/// Sequence index of an instruction in the trace (program order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstIndex(pub usize);

impl fmt::Display for InstIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cycle at which an instruction entered each pipeline stage; `None` until it does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCycles {
    /// Cycle the instruction first sat in the IFQ.
    pub dispatch: Option<u64>,
    /// Cycle the instruction was placed in a reservation station.
    pub issue: Option<u64>,
    /// Cycle the instruction started on a functional unit.
    pub execute: Option<u64>,
    /// Cycle the instruction won the common data bus.
    pub cdb: Option<u64>,
}

/// Writes a stage cycle that must not have been written before.
#[inline]
fn stamp(slot: &mut Option<u64>, cycle: u64, stage: &str) {
    assert!(
        slot.is_none(),
        "{stage} cycle written twice (was {slot:?}, now {cycle})"
    );
    *slot = Some(cycle);
}

impl StageCycles {
    /// Records the dispatch cycle.
    pub fn set_dispatch(&mut self, cycle: u64) {
        stamp(&mut self.dispatch, cycle, "dispatch");
    }

    /// Records the issue cycle.
    pub fn set_issue(&mut self, cycle: u64) {
        stamp(&mut self.issue, cycle, "issue");
    }

    /// Records the execute cycle.
    pub fn set_execute(&mut self, cycle: u64) {
        stamp(&mut self.execute, cycle, "execute");
    }

    /// Records the CDB cycle.
    pub fn set_cdb(&mut self, cycle: u64) {
        stamp(&mut self.cdb, cycle, "cdb");
    }
}

/// One dynamic instruction of the trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Program-order sequence index, assigned when appended to the trace.
    pub index: InstIndex,
    /// Program counter (informational only).
    pub pc: u64,
    /// Decoder flag word.
    pub op: OpFlags,
    /// Destination registers; `None` marks an unused slot.
    pub outputs: [Option<usize>; MAX_OUTPUTS],
    /// Source registers; `None` marks an unused slot.
    pub inputs: [Option<usize>; MAX_INPUTS],
    /// In-flight producer of each source operand; `None` once resolved.
    pub producers: [Option<InstIndex>; MAX_INPUTS],
    /// Stage-entry cycles.
    pub cycles: StageCycles,
}

impl Instruction {
    /// Creates a record with no producers and no stage cycles. The sequence
    /// index is assigned by [`Trace::push`](crate::sim::trace::Trace::push).
    pub fn new(
        op: OpFlags,
        outputs: [Option<usize>; MAX_OUTPUTS],
        inputs: [Option<usize>; MAX_INPUTS],
    ) -> Self {
        Self {
            index: InstIndex::default(),
            pc: 0,
            op,
            outputs,
            inputs,
            producers: [None; MAX_INPUTS],
            cycles: StageCycles::default(),
        }
    }

    /// Creates a record from a class, using the class's canonical flags.
    pub fn with_class(
        class: OpClass,
        outputs: [Option<usize>; MAX_OUTPUTS],
        inputs: [Option<usize>; MAX_INPUTS],
    ) -> Self {
        Self::new(class.flags(), outputs, inputs)
    }

    /// Sets the program counter.
    #[must_use]
    pub const fn at_pc(mut self, pc: u64) -> Self {
        self.pc = pc;
        self
    }

    /// Scheduling class, or `None` if the flags are not recognised.
    #[inline]
    pub const fn class(&self) -> Option<OpClass> {
        OpClass::from_flags(self.op)
    }

    /// Validates the record against a map table of `num_registers` entries.
    ///
    /// Traps are accepted without looking at their registers since they never
    /// reach renaming.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownOpClass`] for unrecognised flags and
    /// [`SimError::RegisterOutOfRange`] for a register id that does not fit.
    pub fn validate(&self, num_registers: usize) -> Result<OpClass, SimError> {
        let class = self.class().ok_or(SimError::UnknownOpClass {
            index: self.index.0,
            flags: self.op.bits(),
        })?;
        if class.is_trap() {
            return Ok(class);
        }

        let mut regs = self.outputs.iter().chain(&self.inputs).flatten();
        if let Some(&reg) = regs.find(|&&reg| reg >= num_registers) {
            return Err(SimError::RegisterOutOfRange {
                index: self.index.0,
                reg,
                limit: num_registers,
            });
        }
        Ok(class)
    }

    /// Drops all scheduling state, leaving the record as the decoder produced it.
    pub fn clear_schedule(&mut self) {
        self.producers = [None; MAX_INPUTS];
        self.cycles = StageCycles::default();
    }

    /// True while any source operand is still waiting on a producer.
    #[inline]
    pub fn has_raw_dependences(&self) -> bool {
        self.producers.iter().any(Option::is_some)
    }

    /// Clears every producer reference naming `producer`.
    pub fn resolve(&mut self, producer: InstIndex) {
        for slot in &mut self.producers {
            if *slot == Some(producer) {
                *slot = None;
            }
        }
    }
}
