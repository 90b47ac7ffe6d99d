//! Trace Loader.
//!
//! This module reads decoded instruction traces from JSON. It performs:
//! 1. **Parsing:** A JSON array of records, each naming its opcode either by raw
//!    decoder flag word or by class name.
//! 2. **Operand packing:** Register lists are packed into the fixed output and
//!    input slots; `null` marks an unused slot.
//! 3. **File loading:** Reading a trace file from disk.
//!
//! A record looks like:
//!
//! ```json
//! { "pc": 4096, "op": "IntCompute", "outputs": [3], "inputs": [1, 2] }
//! ```
//!
//! Class validity and register ranges are checked later, at fetch.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::{MAX_INPUTS, MAX_OUTPUTS};
use crate::common::error::LoadError;
use crate::isa::flags::{OpClass, OpFlags};
use crate::isa::instruction::Instruction;
use crate::sim::trace::Trace;

/// Opcode of a record: a raw flag word or a class name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OpSpec {
    Flags(u32),
    Class(OpClass),
}

impl OpSpec {
    const fn flags(&self) -> OpFlags {
        match self {
            Self::Flags(bits) => OpFlags(*bits),
            Self::Class(class) => class.flags(),
        }
    }
}

/// One trace record as it appears on disk.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TraceRecord {
    #[serde(default)]
    pc: u64,
    op: OpSpec,
    #[serde(default)]
    outputs: Vec<Option<usize>>,
    #[serde(default)]
    inputs: Vec<Option<usize>>,
}

/// Packs `regs` into `N` slots, leaving the tail empty.
fn to_slots<const N: usize>(
    regs: &[Option<usize>],
    index: usize,
    kind: &'static str,
) -> Result<[Option<usize>; N], LoadError> {
    if regs.len() > N {
        return Err(LoadError::TooManyOperands {
            index,
            kind,
            count: regs.len(),
            limit: N,
        });
    }
    let mut slots = [None; N];
    slots[..regs.len()].copy_from_slice(regs);
    Ok(slots)
}

/// Parses a JSON trace.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for malformed JSON or records, and
/// [`LoadError::TooManyOperands`] when a record lists too many registers.
///
/// # Examples
///
/// ```
/// use tomasim_core::sim::loader::parse_trace;
///
/// let trace = parse_trace(r#"[
///     { "op": "Load", "outputs": [2], "inputs": [29] },
///     { "op": 1, "outputs": [3], "inputs": [2, 2] }
/// ]"#).unwrap();
/// assert_eq!(trace.len(), 2);
/// ```
pub fn parse_trace(json: &str) -> Result<Trace, LoadError> {
    let records: Vec<TraceRecord> = serde_json::from_str(json)?;
    let mut trace = Trace::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let outputs = to_slots::<MAX_OUTPUTS>(&record.outputs, index, "output")?;
        let inputs = to_slots::<MAX_INPUTS>(&record.inputs, index, "input")?;
        let _ = trace.push(Instruction::new(record.op.flags(), outputs, inputs).at_pc(record.pc));
    }
    Ok(trace)
}

/// Reads and parses the JSON trace at `path`.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise as [`parse_trace`].
pub fn load_trace(path: impl AsRef<Path>) -> Result<Trace, LoadError> {
    let json = fs::read_to_string(path)?;
    parse_trace(&json)
}
