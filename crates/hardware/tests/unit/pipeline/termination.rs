//! Run Completion Tests.
//!
//! A run ends on the first cycle after which the IFQ, both station pools,
//! both unit pools and the CDB are empty and the whole trace has been fetched.

use rstest::rstest;
use tomasim_core::{Config, OpClass, StageCycles, Trace, UnitClass, run_tomasulo};

use crate::common::builder::TraceBuilder;
use crate::common::harness::{TestContext, stamped};

#[test]
fn test_empty_trace_takes_one_cycle() {
    let mut ctx = TestContext::new(TraceBuilder::new().build());
    assert_eq!(ctx.run(), 1);
}

#[test]
fn test_single_instruction_timeline() {
    let mut ctx = TestContext::new(TraceBuilder::new().int(&[1], &[2]).build());
    let total = ctx.run();

    assert_eq!(ctx.cycles(0), stamped(1, 2, 3, Some(8)));
    assert_eq!(total, 9);
}

#[test]
fn test_not_done_while_result_is_on_cdb() {
    let mut ctx = TestContext::new(TraceBuilder::new().int(&[1], &[]).build());
    ctx.tick_n(8);
    assert!(!ctx.sim.is_done());
    ctx.tick_n(1);
    assert!(ctx.sim.is_done());
}

#[rstest]
#[case::traps_only(TraceBuilder::new().trap().trap(), 1)]
#[case::branch_only(TraceBuilder::new().branch(&[1]), 2)]
#[case::jump_then_branch(TraceBuilder::new().jump().branch(&[]), 3)]
#[case::store_only(TraceBuilder::new().store(1, 2), 8)]
#[case::fp_only(TraceBuilder::new().fp(&[1], &[]), 11)]
fn test_total_cycles(#[case] builder: TraceBuilder, #[case] expected: u64) {
    let (total, _) = run_tomasulo(builder.build(), &Config::default()).unwrap();
    assert_eq!(total, expected);
}

#[rstest]
#[case::leading(TraceBuilder::new().trap().int(&[1], &[]).int(&[2], &[1]))]
#[case::between(TraceBuilder::new().int(&[1], &[]).trap().trap().int(&[2], &[1]))]
#[case::trailing(TraceBuilder::new().int(&[1], &[]).int(&[2], &[1]).trap())]
fn test_traps_do_not_change_the_schedule(#[case] with_traps: TraceBuilder) {
    let plain = TraceBuilder::new().int(&[1], &[]).int(&[2], &[1]).build();
    let (plain_total, plain) = run_tomasulo(plain, &Config::default()).unwrap();
    let (total, trace) = run_tomasulo(with_traps.build(), &Config::default()).unwrap();

    assert_eq!(total, plain_total);
    let scheduled: Vec<_> = trace
        .iter()
        .filter(|inst| inst.class().is_some_and(|class| !class.is_trap()))
        .map(|inst| inst.cycles)
        .collect();
    let expected: Vec<_> = plain.iter().map(|inst| inst.cycles).collect();
    assert_eq!(scheduled, expected);
    let traps_untouched = trace
        .iter()
        .filter(|inst| inst.class().is_some_and(OpClass::is_trap))
        .all(|inst| inst.cycles == StageCycles::default());
    assert!(traps_untouched);
}

#[test]
fn test_everything_drains() {
    let trace = TraceBuilder::new()
        .load(1, 29)
        .fp(&[2], &[1])
        .store(2, 29)
        .branch(&[2])
        .int(&[3], &[2, 1])
        .build();
    let mut ctx = TestContext::new(trace);
    let _ = ctx.run();

    let engine = ctx.sim.engine();
    assert!(engine.ifq().is_empty());
    assert!(engine.rs(UnitClass::Int).is_empty());
    assert!(engine.rs(UnitClass::Fp).is_empty());
    assert!(engine.fu(UnitClass::Int).is_empty());
    assert!(engine.fu(UnitClass::Fp).is_empty());
    assert!(engine.cdb().is_empty());
    assert!(engine.map_table().is_clear());
    assert_eq!(engine.fetch_cursor(), 5);
}

#[test]
fn test_rerun_of_annotated_trace() {
    let trace = TraceBuilder::new()
        .load(1, 29)
        .fp(&[2], &[1])
        .store(2, 29)
        .int(&[3], &[2])
        .build();
    let (total, done) = run_tomasulo(trace, &Config::default()).unwrap();

    let (again_total, again) = run_tomasulo(done.clone(), &Config::default()).unwrap();
    assert_eq!(again_total, total);
    assert_eq!(again, done);

    let rebuilt: Trace = done.iter().cloned().collect();
    let (rebuilt_total, rebuilt) = run_tomasulo(rebuilt, &Config::default()).unwrap();
    assert_eq!(rebuilt_total, total);
    assert_eq!(rebuilt, done);
}
