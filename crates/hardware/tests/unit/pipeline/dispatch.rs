//! Dispatch Stage Unit Tests.
//!
//! Verifies that only the IFQ head moves, that it lands in the pool matching
//! its class, that branches leave without a station, and that renaming reads
//! the map table before writing it.

use rstest::rstest;
use tomasim_core::core::pipeline::stages::{dispatch_stage, fetch_stage};
use tomasim_core::{Config, Engine, InstIndex, OpClass, Trace, UnitClass};

use crate::common::builder::TraceBuilder;
use crate::common::harness::{TestContext, pipeline};

// ══════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════

/// Runs `cycles` cycles of dispatch followed by fetch, the engine's own order.
fn front_end(engine: &mut Engine, trace: &mut Trace, cycles: u64) {
    for cycle in 1..=cycles {
        dispatch_stage(engine, trace, cycle);
        fetch_stage(engine, trace, cycle).unwrap();
    }
}

// ══════════════════════════════════════════════════════════
// Station allocation
// ══════════════════════════════════════════════════════════

#[test]
fn test_issue_is_the_cycle_after_fetch() {
    let mut trace = TraceBuilder::new().int(&[1], &[]).build();
    let mut engine = Engine::new(&Config::default());
    front_end(&mut engine, &mut trace, 2);

    let cycles = trace[InstIndex(0)].cycles;
    assert_eq!(cycles.dispatch, Some(1));
    assert_eq!(cycles.issue, Some(2));
    assert!(engine.ifq().is_empty());
    assert_eq!(engine.rs(UnitClass::Int).occupied(), 1);
}

#[rstest]
#[case::load(OpClass::Load, UnitClass::Int)]
#[case::store(OpClass::Store, UnitClass::Int)]
#[case::int(OpClass::IntCompute, UnitClass::Int)]
#[case::fp(OpClass::FpCompute, UnitClass::Fp)]
fn test_class_selects_pool(#[case] class: OpClass, #[case] unit: UnitClass) {
    let other = match unit {
        UnitClass::Int => UnitClass::Fp,
        UnitClass::Fp => UnitClass::Int,
    };
    let mut trace = TraceBuilder::new().op(class, &[], &[1]).build();
    let mut engine = Engine::new(&Config::default());
    front_end(&mut engine, &mut trace, 2);

    assert_eq!(engine.rs(unit).occupied(), 1);
    assert!(engine.rs(other).is_empty());
}

#[rstest]
#[case::branch(OpClass::CondCtrl)]
#[case::jump(OpClass::UncondCtrl)]
fn test_control_leaves_without_station(#[case] class: OpClass) {
    let mut trace = TraceBuilder::new().op(class, &[], &[1, 2]).build();
    let mut engine = Engine::new(&Config::default());
    front_end(&mut engine, &mut trace, 2);

    assert!(engine.ifq().is_empty());
    assert!(engine.rs(UnitClass::Int).is_empty());
    assert!(engine.rs(UnitClass::Fp).is_empty());
    assert_eq!(trace[InstIndex(0)].cycles.issue, None);
}

#[test]
fn test_full_pool_stalls_head() {
    let config = pipeline(|p| p.rs_fp = 1);
    let mut trace = TraceBuilder::new().fp(&[1], &[]).fp(&[2], &[]).int(&[3], &[]).build();
    let mut engine = Engine::new(&config);
    front_end(&mut engine, &mut trace, 4);

    assert_eq!(engine.ifq().len(), 2);
    assert_eq!(engine.ifq().front().map(|entry| entry.index), Some(InstIndex(1)));
    assert_eq!(trace[InstIndex(2)].cycles.issue, None);
    assert!(engine.rs(UnitClass::Int).is_empty());
}

#[test]
fn test_head_of_line_blocking_over_a_run() {
    let config = pipeline(|p| {
        p.rs_fp = 1;
        p.fu_fp = 1;
    });
    let trace = TraceBuilder::new().fp(&[1], &[]).fp(&[2], &[]).int(&[3], &[]).build();
    let mut ctx = TestContext::with_config(trace, &config);
    let _ = ctx.run();

    // The second fp takes the station freed by the first one's broadcast.
    assert_eq!(ctx.cycles(0).cdb, Some(10));
    assert_eq!(ctx.cycles(1).issue, Some(10));
    assert_eq!(ctx.cycles(2).issue, Some(11));
    assert_eq!(ctx.cycles(2).execute, Some(12));
}

// ══════════════════════════════════════════════════════════
// Renaming
// ══════════════════════════════════════════════════════════

#[test]
fn test_read_then_write_same_register() {
    let mut trace = TraceBuilder::new().int(&[1], &[1]).int(&[2], &[1]).build();
    let mut engine = Engine::new(&Config::default());
    front_end(&mut engine, &mut trace, 3);

    assert_eq!(trace[InstIndex(0)].producers, [None; 3]);
    assert_eq!(trace[InstIndex(1)].producers, [Some(InstIndex(0)), None, None]);
    assert_eq!(engine.map_table().producer(1), Some(InstIndex(0)));
    assert_eq!(engine.map_table().producer(2), Some(InstIndex(1)));
}

#[test]
fn test_repeated_input_tracks_each_slot() {
    let mut trace = TraceBuilder::new().load(4, 29).int(&[5], &[4, 4, 6]).build();
    let mut engine = Engine::new(&Config::default());
    front_end(&mut engine, &mut trace, 3);

    let producer = Some(InstIndex(0));
    assert_eq!(trace[InstIndex(1)].producers, [producer, producer, None]);
}

#[test]
fn test_latest_writer_wins_the_map() {
    let mut trace = TraceBuilder::new().int(&[1], &[]).fp(&[1], &[]).int(&[2], &[1]).build();
    let mut engine = Engine::new(&Config::default());
    front_end(&mut engine, &mut trace, 4);

    assert_eq!(trace[InstIndex(2)].producers[0], Some(InstIndex(1)));
}

#[rstest]
#[case::store(OpClass::Store)]
#[case::branch(OpClass::CondCtrl)]
fn test_non_broadcasting_outputs_are_not_mapped(#[case] class: OpClass) {
    let mut trace = TraceBuilder::new().op(class, &[5], &[1]).int(&[6], &[5]).build();
    let mut engine = Engine::new(&Config::default());
    front_end(&mut engine, &mut trace, 3);

    assert_eq!(engine.map_table().producer(5), None);
    assert_eq!(trace[InstIndex(1)].producers, [None; 3]);
    assert_eq!(trace[InstIndex(1)].cycles.issue, Some(3));
}
