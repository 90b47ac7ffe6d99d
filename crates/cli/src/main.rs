//! Tomasulo scheduling simulator CLI.
//!
//! This binary runs a decoded instruction trace through the scheduler. It performs:
//! 1. **Loading:** Reads a JSON trace and an optional JSON machine configuration.
//! 2. **Simulation:** Runs the trace to completion.
//! 3. **Reporting:** Prints statistics sections, the per-instruction timeline, or
//!    everything as a single JSON document.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tomasim_core::{Config, SimStats, Simulator, Trace, load_trace};

#[derive(Parser, Debug)]
#[command(
    name = "tomasim",
    author,
    version,
    about = "Cycle-accurate Tomasulo scheduling simulator",
    long_about = "Schedule a decoded instruction trace on a Tomasulo machine and report when each instruction entered each stage.\n\nLogging is controlled with RUST_LOG (e.g. RUST_LOG=tomasim_core=trace).\n\nExamples:\n  tomasim run --trace gcc.json\n  tomasim run --trace gcc.json --config wide.json --timeline\n  tomasim run --trace gcc.json --sections summary,stalls"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a trace to completion.
    Run {
        /// JSON trace to schedule.
        #[arg(short, long)]
        trace: PathBuf,

        /// JSON machine configuration; omitted fields keep their defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the per-instruction stage timeline.
        #[arg(long)]
        timeline: bool,

        /// Print statistics and the annotated trace as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Statistics sections to print (summary, instruction_mix, stalls).
        #[arg(long, value_delimiter = ',')]
        sections: Vec<String>,
    },
}

/// Machine-readable report of one run.
#[derive(Serialize)]
struct Report<'a> {
    config: &'a Config,
    stats: SimStats,
    trace: &'a Trace,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            trace,
            config,
            timeline,
            json,
            sections,
        } => cmd_run(&trace, config.as_deref(), timeline, json, &sections),
    }
}

/// Loads the inputs, runs the simulation and prints the requested reports.
///
/// Any failure is reported on stderr and exits with code 1.
fn cmd_run(trace_path: &Path, config_path: Option<&Path>, timeline: bool, json: bool, sections: &[String]) {
    let config = config_path.map_or_else(|| Ok(Config::default()), load_config).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    });

    let trace = load_trace(trace_path).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: '{}': {e}", trace_path.display());
        process::exit(1);
    });
    info!(path = %trace_path.display(), entries = trace.len(), "trace loaded");

    let mut sim = Simulator::new(trace, &config).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    });
    if let Err(e) = sim.run() {
        eprintln!("\n[!] FATAL: simulation aborted at cycle {}: {e}", sim.cycle());
        process::exit(1);
    }

    let stats = sim.stats();
    if json {
        let report = Report {
            config: &config,
            stats,
            trace: sim.trace(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("\n[!] FATAL: could not serialize report: {e}");
                process::exit(1);
            }
        }
        return;
    }

    if timeline {
        SimStats::print_timeline(sim.trace());
    }
    stats.print_sections(sections);
}

/// Reads a JSON configuration file and checks it.
fn load_config(path: &Path) -> Result<Config, String> {
    let json = fs::read_to_string(path).map_err(|e| format!("could not read config '{}': {e}", path.display()))?;
    let config = Config::from_json(&json).map_err(|e| format!("invalid config '{}': {e}", path.display()))?;
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}
