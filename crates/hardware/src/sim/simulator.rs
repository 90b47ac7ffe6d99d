//! Simulator: owns the trace and the scheduling engine side by side.
//!
//! The trace is the single owner of every instruction record; the engine only
//! holds indices into it. Keeping them as sibling fields lets each stage borrow
//! both mutably without any interior mutability.

use tracing::info;

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Engine;
use crate::sim::trace::Trace;
use crate::stats::SimStats;

/// Top-level simulator: instruction trace + Tomasulo engine.
#[derive(Clone, Debug)]
pub struct Simulator {
    trace: Trace,
    engine: Engine,
    config: Config,
    cycle: u64,
}

impl Simulator {
    /// Creates a simulator over `trace` with the machine described by `config`.
    /// Stage cycles left on `trace` by an earlier run are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if `config` fails validation.
    pub fn new(mut trace: Trace, config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        trace.clear_schedule();
        Ok(Self {
            trace,
            engine: Engine::new(config),
            config: config.clone(),
            cycle: 0,
        })
    }

    /// Advances the simulation by one clock cycle.
    ///
    /// # Errors
    ///
    /// Returns the validation error of a malformed trace entry reached by fetch.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.cycle += 1;
        self.engine.tick(&mut self.trace, self.cycle)
    }

    /// True once at least one cycle has run and every structure has drained.
    pub fn is_done(&self) -> bool {
        self.cycle > 0 && self.engine.is_drained(&self.trace)
    }

    /// The last simulated cycle (0 before the first tick).
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Runs until the trace has fully drained and returns the total cycle count.
    ///
    /// # Errors
    ///
    /// Returns the first [`SimError`] raised by a tick; the simulation stops there.
    pub fn run(&mut self) -> Result<u64, SimError> {
        while !self.is_done() {
            self.tick()?;
        }
        info!(
            cycles = self.cycle,
            instructions = self.trace.len(),
            "simulation complete"
        );
        Ok(self.cycle)
    }

    /// Instruction trace with the stage cycles recorded so far.
    pub const fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Scheduling engine state.
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Machine configuration of this run.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Statistics over the cycles simulated so far.
    pub fn stats(&self) -> SimStats {
        SimStats::collect(&self.trace, self.cycle, &self.config.pipeline)
    }

    /// Consumes the simulator and returns the annotated trace.
    pub fn into_trace(self) -> Trace {
        self.trace
    }
}

/// Simulates `trace` to completion on the machine described by `config`.
///
/// Returns the total cycle count together with the trace, every instruction
/// annotated with the cycle it entered each stage.
///
/// # Errors
///
/// Returns [`SimError`] for an invalid configuration or a malformed trace entry.
///
/// # Examples
///
/// ```
/// use tomasim_core::{Config, Instruction, OpClass, Trace, run_tomasulo};
///
/// let mut trace = Trace::new();
/// let _ = trace.push(Instruction::with_class(OpClass::IntCompute, [Some(1), None], [None; 3]));
///
/// let (cycles, trace) = run_tomasulo(trace, &Config::default()).unwrap();
/// assert_eq!(cycles, 9);
/// assert_eq!(trace.iter().next().and_then(|inst| inst.cycles.cdb), Some(8));
/// ```
pub fn run_tomasulo(trace: Trace, config: &Config) -> Result<(u64, Trace), SimError> {
    let mut sim = Simulator::new(trace, config)?;
    let cycles = sim.run()?;
    Ok((cycles, sim.into_trace()))
}
