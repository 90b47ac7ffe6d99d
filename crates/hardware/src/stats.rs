//! Simulation statistics collection and reporting.
//!
//! Statistics are derived after the fact from the stage cycles recorded on the
//! trace. This module provides:
//! 1. **Cycle and IPC:** Total cycles, scheduled instructions, and derived metrics (IPC, CPI).
//! 2. **Instruction mix:** Counts by class (load, store, integer, floating point, branch).
//! 3. **Stalls:** Cycles spent waiting for a station, for operands or a unit, and for the CDB.
//! 4. **Timeline:** The per-instruction table of stage-entry cycles.

use serde::Serialize;

use crate::config::PipelineConfig;
use crate::isa::flags::{OpClass, UnitClass};
use crate::sim::trace::Trace;

/// Simulation statistics structure.
///
/// Built with [`SimStats::collect`] from an annotated trace. Instructions that
/// have not reached a stage yet simply do not contribute to its counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of non-trap instructions in the trace.
    pub instructions: u64,
    /// Number of trap entries skipped at fetch.
    pub traps: u64,

    /// Count of load instructions.
    pub inst_load: u64,
    /// Count of store instructions.
    pub inst_store: u64,
    /// Count of integer compute instructions.
    pub inst_int: u64,
    /// Count of floating-point compute instructions.
    pub inst_fp: u64,
    /// Count of conditional and unconditional control instructions.
    pub inst_branch: u64,

    /// Cycles between entering the IFQ and taking a reservation station, summed.
    pub wait_dispatch: u64,
    /// Cycles between taking a station and starting execution, summed.
    pub wait_issue: u64,
    /// Cycles finished results waited for the CDB, summed.
    pub wait_cdb: u64,
    /// Instructions that have started executing.
    pub executed: u64,
    /// Instructions that have been broadcast on the CDB.
    pub broadcast: u64,
}

impl SimStats {
    /// Derives statistics from `trace` after `cycles` simulated cycles.
    pub fn collect(trace: &Trace, cycles: u64, pipeline: &PipelineConfig) -> Self {
        let mut stats = Self { cycles, ..Self::default() };
        for inst in trace {
            let Some(class) = inst.class() else {
                continue;
            };
            match class {
                OpClass::Trap => {
                    stats.traps += 1;
                    continue;
                }
                OpClass::Load => stats.inst_load += 1,
                OpClass::Store => stats.inst_store += 1,
                OpClass::IntCompute => stats.inst_int += 1,
                OpClass::FpCompute => stats.inst_fp += 1,
                OpClass::UncondCtrl | OpClass::CondCtrl => stats.inst_branch += 1,
            }
            stats.instructions += 1;

            let c = &inst.cycles;
            if let (Some(dispatch), Some(issue)) = (c.dispatch, c.issue) {
                stats.wait_dispatch += issue - dispatch;
            }
            if let (Some(issue), Some(execute)) = (c.issue, c.execute) {
                stats.wait_issue += execute - issue;
                stats.executed += 1;
            }
            if let (Some(execute), Some(cdb)) = (c.execute, c.cdb) {
                let latency = match class.unit() {
                    Some(UnitClass::Fp) => pipeline.latency_fp,
                    _ => pipeline.latency_int,
                };
                stats.wait_cdb += cdb.saturating_sub(execute + latency);
                stats.broadcast += 1;
            }
        }
        stats
    }

    /// Instructions per cycle.
    pub fn ipc(&self) -> f64 {
        self.instructions as f64 / self.cycles.max(1) as f64
    }

    /// Cycles per instruction.
    pub fn cpi(&self) -> f64 {
        self.cycles as f64 / self.instructions.max(1) as f64
    }

    /// Mean dispatch-to-issue wait over instructions that took a station.
    pub fn avg_wait_dispatch(&self) -> f64 {
        let stationed = self.instructions - self.inst_branch;
        self.wait_dispatch as f64 / stationed.max(1) as f64
    }

    /// Mean issue-to-execute wait over instructions that started executing.
    pub fn avg_wait_issue(&self) -> f64 {
        self.wait_issue as f64 / self.executed.max(1) as f64
    }

    /// Mean CDB contention over broadcast instructions.
    pub fn avg_wait_cdb(&self) -> f64 {
        self.wait_cdb as f64 / self.broadcast.max(1) as f64
    }

    /// Prints the selected statistics sections to stdout.
    ///
    /// Recognised sections are `summary`, `instruction_mix` and `stalls`; an
    /// empty selection prints all of them.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let total_inst = self.instructions.max(1) as f64;

        if want("summary") {
            println!("\n==========================================================");
            println!("TOMASULO SCHEDULING STATISTICS");
            println!("==========================================================");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions);
            println!("sim_traps                {}", self.traps);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", self.cpi());
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let mix = [
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.int", self.inst_int),
                ("op.fp", self.inst_fp),
                ("op.branch", self.inst_branch),
            ];
            println!("INSTRUCTION MIX");
            for (name, count) in mix {
                println!(
                    "  {:<22} {} ({:.2}%)",
                    name,
                    count,
                    (count as f64 / total_inst) * 100.0
                );
            }
            println!("----------------------------------------------------------");
        }
        if want("stalls") {
            println!("STALLS");
            println!(
                "  stalls.dispatch        {} (avg {:.2})",
                self.wait_dispatch,
                self.avg_wait_dispatch()
            );
            println!(
                "  stalls.issue           {} (avg {:.2})",
                self.wait_issue,
                self.avg_wait_issue()
            );
            println!(
                "  stalls.cdb             {} (avg {:.2})",
                self.wait_cdb,
                self.avg_wait_cdb()
            );
            println!("----------------------------------------------------------");
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }

    /// Prints the stage-entry cycle of every scheduled instruction.
    ///
    /// Traps are omitted; stages an instruction never entered print as `-`.
    pub fn print_timeline(trace: &Trace) {
        let cell = |cycle: Option<u64>| cycle.map_or_else(|| "-".to_owned(), |c| c.to_string());
        println!(
            "{:>6} {:>10} {:<11} {:>8} {:>8} {:>8} {:>8}",
            "inst", "pc", "class", "dispatch", "issue", "execute", "cdb"
        );
        for inst in trace {
            let Some(class) = inst.class().filter(|class| !class.is_trap()) else {
                continue;
            };
            let c = &inst.cycles;
            println!(
                "{:>6} {:>#10x} {:<11} {:>8} {:>8} {:>8} {:>8}",
                inst.index.0,
                inst.pc,
                class.to_string(),
                cell(c.dispatch),
                cell(c.issue),
                cell(c.execute),
                cell(c.cdb)
            );
        }
    }
}
