//! Configuration system for the Tomasulo simulator.
//!
//! This module defines the structures used to parameterize the scheduling engine.
//! It provides:
//! 1. **Defaults:** The baseline machine (16-entry IFQ, 5/3 reservation stations,
//!    3/1 functional units, 5/7 cycle latencies).
//! 2. **Structures:** `GeneralConfig` for the register space and `PipelineConfig`
//!    for queue, pool and latency parameters.
//! 3. **Validation:** Rejection of configurations that could never drain a trace.
//!
//! All parameters are fixed at construction time; nothing here changes while a
//! simulation runs. Configuration is supplied as JSON or built with `Config::default()`.

use serde::{Deserialize, Serialize};

use crate::common::constants::PISA_TOTAL_REGS;
use crate::common::error::SimError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Instruction fetch queue capacity.
    pub const IFQ_SIZE: usize = 16;

    /// Integer reservation stations (loads, stores and integer compute).
    pub const RS_INT: usize = 5;

    /// Floating-point reservation stations.
    pub const RS_FP: usize = 3;

    /// Integer functional units.
    pub const FU_INT: usize = 3;

    /// Floating-point functional units.
    pub const FU_FP: usize = 1;

    /// Integer functional unit latency in cycles.
    pub const LATENCY_INT: u64 = 5;

    /// Floating-point functional unit latency in cycles.
    pub const LATENCY_FP: u64 = 7;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use tomasim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.pipeline.ifq_size, 16);
/// assert_eq!(config.pipeline.latency_fp, 7);
/// ```
///
/// Partial JSON only overrides the fields it names:
///
/// ```
/// use tomasim_core::config::Config;
///
/// let config = Config::from_json(r#"{ "pipeline": { "fu_int": 1, "latency_int": 2 } }"#).unwrap();
/// assert_eq!(config.pipeline.fu_int, 1);
/// assert_eq!(config.pipeline.latency_int, 2);
/// assert_eq!(config.pipeline.rs_int, 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Register space settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Queue, pool and latency settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses a configuration from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns the deserializer error for malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Checks that every parameter allows the pipeline to make progress.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidConfig`] naming the first offending parameter.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.general.num_registers == 0 {
            return Err(SimError::InvalidConfig(
                "num_registers must be at least 1".to_string(),
            ));
        }
        let p = &self.pipeline;
        let sizes = [
            ("ifq_size", p.ifq_size),
            ("rs_int", p.rs_int),
            ("rs_fp", p.rs_fp),
            ("fu_int", p.fu_int),
            ("fu_fp", p.fu_fp),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, size)| *size == 0) {
            return Err(SimError::InvalidConfig(format!("{name} must be at least 1")));
        }
        if p.latency_int == 0 || p.latency_fp == 0 {
            return Err(SimError::InvalidConfig(
                "functional unit latencies must be at least 1 cycle".to_string(),
            ));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Number of architectural registers tracked by the map table. Register
    /// ids in the trace must be below this value.
    #[serde(default = "GeneralConfig::default_num_registers")]
    pub num_registers: usize,
}

impl GeneralConfig {
    /// Returns the default architectural register count.
    const fn default_num_registers() -> usize {
        PISA_TOTAL_REGS
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            num_registers: PISA_TOTAL_REGS,
        }
    }
}

/// Scheduling engine parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Instruction fetch queue capacity
    #[serde(default = "PipelineConfig::default_ifq_size")]
    pub ifq_size: usize,

    /// Integer reservation stations
    #[serde(default = "PipelineConfig::default_rs_int")]
    pub rs_int: usize,

    /// Floating-point reservation stations
    #[serde(default = "PipelineConfig::default_rs_fp")]
    pub rs_fp: usize,

    /// Integer functional units
    #[serde(default = "PipelineConfig::default_fu_int")]
    pub fu_int: usize,

    /// Floating-point functional units
    #[serde(default = "PipelineConfig::default_fu_fp")]
    pub fu_fp: usize,

    /// Integer execution latency (cycles)
    #[serde(default = "PipelineConfig::default_latency_int")]
    pub latency_int: u64,

    /// Floating-point execution latency (cycles)
    #[serde(default = "PipelineConfig::default_latency_fp")]
    pub latency_fp: u64,
}

impl PipelineConfig {
    /// Returns the default IFQ capacity.
    const fn default_ifq_size() -> usize {
        defaults::IFQ_SIZE
    }

    /// Returns the default integer reservation station count.
    const fn default_rs_int() -> usize {
        defaults::RS_INT
    }

    /// Returns the default floating-point reservation station count.
    const fn default_rs_fp() -> usize {
        defaults::RS_FP
    }

    /// Returns the default integer functional unit count.
    const fn default_fu_int() -> usize {
        defaults::FU_INT
    }

    /// Returns the default floating-point functional unit count.
    const fn default_fu_fp() -> usize {
        defaults::FU_FP
    }

    /// Returns the default integer latency.
    const fn default_latency_int() -> u64 {
        defaults::LATENCY_INT
    }

    /// Returns the default floating-point latency.
    const fn default_latency_fp() -> u64 {
        defaults::LATENCY_FP
    }
}

impl Default for PipelineConfig {
    /// Creates the baseline machine configuration.
    fn default() -> Self {
        Self {
            ifq_size: defaults::IFQ_SIZE,
            rs_int: defaults::RS_INT,
            rs_fp: defaults::RS_FP,
            fu_int: defaults::FU_INT,
            fu_fp: defaults::FU_FP,
            latency_int: defaults::LATENCY_INT,
            latency_fp: defaults::LATENCY_FP,
        }
    }
}
