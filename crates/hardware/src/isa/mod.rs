//! Instruction description as produced by the external decoder.
//!
//! This module provides what the scheduler needs to know about an instruction:
//! 1. **Flags:** SimpleScalar-style opcode flag bits and the classes derived from them.
//! 2. **Instruction:** The per-instruction record stored in the trace.

/// Opcode flag word, instruction classes and pool routing.
pub mod flags;

/// Dynamic instruction record with producer tags and stage cycles.
pub mod instruction;

pub use flags::{OpClass, OpFlags, UnitClass};
pub use instruction::{InstIndex, Instruction, StageCycles};
