//! Scheduling core.
//!
//! Contains the Tomasulo pipeline structures and the [`Engine`] that advances
//! them cycle by cycle.

/// Tomasulo pipeline implementation (structures, stages, engine).
pub mod pipeline;

pub use self::pipeline::engine::Engine;
