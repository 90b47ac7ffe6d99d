//! # Trace Loader Tests
//!
//! Verifies JSON trace parsing, operand packing, file loading, and that a
//! loaded trace schedules exactly like one built in code.

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;
use tomasim_core::{Config, LoadError, OpClass, load_trace, parse_trace, run_tomasulo};

use crate::common::builder::TraceBuilder;

const SAMPLE: &str = r#"[
    { "pc": 4096, "op": "Load", "outputs": [2], "inputs": [29] },
    { "pc": 4104, "op": "IntCompute", "outputs": [3], "inputs": [2, 2] },
    { "pc": 4112, "op": 2048 },
    { "pc": 4120, "op": "Store", "inputs": [3, 29] },
    { "pc": 4128, "op": "CondCtrl", "inputs": [3, null] }
]"#;

#[test]
fn test_parse_sample() {
    let trace = parse_trace(SAMPLE).unwrap();
    assert_eq!(trace.len(), 5);

    let classes: Vec<_> = trace.iter().map(|inst| inst.class()).collect();
    assert_eq!(
        classes,
        vec![
            Some(OpClass::Load),
            Some(OpClass::IntCompute),
            Some(OpClass::Trap),
            Some(OpClass::Store),
            Some(OpClass::CondCtrl),
        ]
    );

    let add = trace.iter().nth(1).unwrap();
    assert_eq!(add.pc, 4104);
    assert_eq!(add.outputs, [Some(3), None]);
    assert_eq!(add.inputs, [Some(2), Some(2), None]);
    assert_eq!(add.index.0, 1);
}

#[test]
fn test_loaded_trace_schedules_like_built_trace() {
    let built = TraceBuilder::new()
        .load(2, 29)
        .int(&[3], &[2, 2])
        .trap()
        .store(3, 29)
        .branch(&[3])
        .build();

    let (loaded_cycles, loaded) = run_tomasulo(parse_trace(SAMPLE).unwrap(), &Config::default()).unwrap();
    let (built_cycles, built) = run_tomasulo(built, &Config::default()).unwrap();

    assert_eq!(loaded_cycles, built_cycles);
    let loaded: Vec<_> = loaded.iter().map(|inst| inst.cycles).collect();
    let built: Vec<_> = built.iter().map(|inst| inst.cycles).collect();
    assert_eq!(loaded, built);
}

#[test]
fn test_load_trace_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let trace = load_trace(file.path()).unwrap();
    assert_eq!(trace.len(), 5);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_trace(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn test_too_many_inputs() {
    let err = parse_trace(r#"[{ "op": "IntCompute" }, { "op": "FpCompute", "inputs": [1, 2, 3, 4] }]"#).unwrap_err();
    assert!(matches!(
        err,
        LoadError::TooManyOperands { index: 1, kind: "input", count: 4, limit: 3 }
    ));
}

#[test]
fn test_unknown_field_is_rejected() {
    let err = parse_trace(r#"[{ "op": "Load", "latency": 3 }]"#).unwrap_err();
    assert!(matches!(err, LoadError::Json(_)));
}

#[test]
fn test_not_an_array() {
    assert!(matches!(parse_trace(r#"{ "op": "Load" }"#), Err(LoadError::Json(_))));
}

#[test]
fn test_empty_array() {
    assert!(parse_trace("[]").unwrap().is_empty());
}
