//! # Error Tests
//!
//! Malformed trace entries surface as errors when fetch reaches them, and the
//! messages name the offending instruction.

use crate::common::builder::TraceBuilder;
use crate::common::harness::init_tracing;
use tomasim_core::{Config, SimError, Simulator, run_tomasulo};

#[test]
fn test_unknown_class_is_reported_at_fetch() {
    init_tracing();
    let trace = TraceBuilder::new().int(&[1], &[]).raw(0x20, &[], &[]).build();
    let mut sim = Simulator::new(trace, &Config::default()).unwrap();

    sim.tick().unwrap();
    assert_eq!(sim.tick(), Err(SimError::UnknownOpClass { index: 1, flags: 0x20 }));
}

#[test]
fn test_register_out_of_range() {
    let trace = TraceBuilder::new().int(&[70], &[]).build();
    let err = run_tomasulo(trace, &Config::default()).unwrap_err();
    assert_eq!(err, SimError::RegisterOutOfRange { index: 0, reg: 70, limit: 70 });
}

#[test]
fn test_register_limit_follows_config() {
    let mut config = Config::default();
    config.general.num_registers = 8;
    let trace = TraceBuilder::new().int(&[1], &[7]).fp(&[2], &[8]).build();
    let err = run_tomasulo(trace, &config).unwrap_err();
    assert_eq!(err, SimError::RegisterOutOfRange { index: 1, reg: 8, limit: 8 });
}

#[test]
fn test_trap_registers_are_not_checked() {
    let trace = TraceBuilder::new().op(tomasim_core::OpClass::Trap, &[500], &[]).build();
    assert_eq!(run_tomasulo(trace, &Config::default()).unwrap().0, 1);
}

#[test]
fn test_error_messages() {
    let unknown = SimError::UnknownOpClass { index: 3, flags: 0x0 };
    assert_eq!(unknown.to_string(), "instruction 3: unknown opcode class (flags 0x0)");

    let range = SimError::RegisterOutOfRange { index: 0, reg: 90, limit: 70 };
    assert!(range.to_string().contains("register 90 out of range"));
}
