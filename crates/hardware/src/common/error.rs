//! Simulation and trace loading errors.
//!
//! This module defines the error types surfaced to callers of the simulator. It provides:
//! 1. **Simulation Errors:** Malformed trace entries detected at fetch and invalid configurations.
//! 2. **Load Errors:** I/O, JSON and operand-count failures while reading a trace file.
//!
//! Resource exhaustion (a full IFQ, no free reservation station or functional unit)
//! is a stall, not an error, and never appears here.

use thiserror::Error;

/// Errors raised while constructing or running a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The flag word of a trace entry matches none of the known opcode classes.
    #[error("instruction {index}: unknown opcode class (flags {flags:#x})")]
    UnknownOpClass {
        /// Sequence index of the offending instruction.
        index: usize,
        /// Raw decoder flag word.
        flags: u32,
    },

    /// A register identifier does not fit in the register map table.
    #[error("instruction {index}: register {reg} out of range (map table holds {limit})")]
    RegisterOutOfRange {
        /// Sequence index of the offending instruction.
        index: usize,
        /// Register identifier found in the trace.
        reg: usize,
        /// Number of architectural registers tracked by the map table.
        limit: usize,
    },

    /// A configuration parameter is outside its legal range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised while reading a trace from disk or from a JSON string.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The trace file could not be read.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// The trace is not valid JSON or does not match the record layout.
    #[error("failed to parse trace: {0}")]
    Json(#[from] serde_json::Error),

    /// A record lists more register operands than an instruction can hold.
    #[error("trace entry {index}: {count} {kind} registers exceeds the limit of {limit}")]
    TooManyOperands {
        /// Position of the record in the trace file.
        index: usize,
        /// Either `"output"` or `"input"`.
        kind: &'static str,
        /// Number of registers listed.
        count: usize,
        /// Number of register slots available.
        limit: usize,
    },
}
