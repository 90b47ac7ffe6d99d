use tomasim_core::config::PipelineConfig;
use tomasim_core::{Config, InstIndex, Simulator, StageCycles, Trace};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test writer; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Default configuration with pipeline overrides applied.
pub fn pipeline(f: impl FnOnce(&mut PipelineConfig)) -> Config {
    let mut config = Config::default();
    f(&mut config.pipeline);
    config
}

/// Configuration with enough stations and units that nothing contends for them.
pub fn unbounded() -> Config {
    pipeline(|p| {
        p.ifq_size = 64;
        p.rs_int = 64;
        p.rs_fp = 64;
        p.fu_int = 64;
        p.fu_fp = 64;
    })
}

pub struct TestContext {
    pub sim: Simulator,
}

impl TestContext {
    pub fn new(trace: Trace) -> Self {
        Self::with_config(trace, &Config::default())
    }

    pub fn with_config(trace: Trace, config: &Config) -> Self {
        init_tracing();
        Self {
            sim: Simulator::new(trace, config).unwrap(),
        }
    }

    /// Runs to completion and returns the total cycle count.
    pub fn run(&mut self) -> u64 {
        self.sim.run().unwrap()
    }

    pub fn tick_n(&mut self, n: u64) {
        for _ in 0..n {
            self.sim.tick().unwrap();
        }
    }

    /// Stage cycles of instruction `i`.
    pub fn cycles(&self, i: usize) -> StageCycles {
        self.sim.trace()[InstIndex(i)].cycles
    }
}

/// Shorthand for a fully scheduled `StageCycles`.
pub const fn stamped(dispatch: u64, issue: u64, execute: u64, cdb: Option<u64>) -> StageCycles {
    StageCycles {
        dispatch: Some(dispatch),
        issue: Some(issue),
        execute: Some(execute),
        cdb,
    }
}
