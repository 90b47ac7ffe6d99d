//! Tomasulo scheduling simulator library.
//!
//! This crate implements a cycle-accurate model of dynamic instruction scheduling
//! with the following:
//! 1. **ISA:** Decoder flag words, instruction classes and the per-instruction record.
//! 2. **Core:** IFQ, register map table, reservation stations, functional units, the CDB
//!    and the engine running retire, writeback, execute, dispatch and fetch each cycle.
//! 3. **Simulation:** Trace storage, JSON trace loading and the top-level simulator.
//! 4. **Configuration and Statistics:** Machine parameters and post-run metrics.
//!
//! Results of instructions are never computed; only the cycle on which each
//! instruction enters each stage is recorded on the trace.

/// Common constants and error types.
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures, validation).
pub mod config;
/// Scheduling core (pipeline structures, stages, engine).
pub mod core;
/// Instruction description (flags, classes, instruction record).
pub mod isa;
/// Trace storage, trace loading and the simulator.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Error raised by a simulation run.
pub use crate::common::error::{LoadError, SimError};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Scheduling engine; normally driven through [`Simulator`].
pub use crate::core::Engine;
/// Instruction classes and records.
pub use crate::isa::{InstIndex, Instruction, OpClass, OpFlags, StageCycles, UnitClass};
/// Trace loading entry points.
pub use crate::sim::loader::{load_trace, parse_trace};
/// Top-level simulator and one-shot entry point.
pub use crate::sim::simulator::{Simulator, run_tomasulo};
/// Instruction trace container.
pub use crate::sim::trace::Trace;
/// Post-run statistics.
pub use crate::stats::SimStats;
