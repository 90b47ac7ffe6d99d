//! Common types shared across the simulator.
//!
//! This module provides the building blocks used by every other part of the crate:
//! 1. **Error Handling:** Simulation and trace loading error types.
//! 2. **Constants:** Register-slot limits shared by the instruction record and the loader.

/// Register-slot limits and sentinel values.
pub mod constants;

/// Error types for simulation and trace loading.
pub mod error;

pub use constants::{MAX_INPUTS, MAX_OUTPUTS};
pub use error::{LoadError, SimError};
