//! Simulation driver and trace handling.
//!
//! Provides the trace container, JSON trace loading, and the [`simulator::Simulator`]
//! that runs a trace through the scheduling engine.

/// JSON trace loading.
pub mod loader;

/// Top-level simulator and the `run_tomasulo` entry point.
pub mod simulator;

/// Instruction trace storage.
pub mod trace;
