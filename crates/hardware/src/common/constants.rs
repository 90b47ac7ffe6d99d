//! Global Simulator Constants.
//!
//! This module defines constants shared by the instruction record, the trace
//! loader and the scheduler. It includes:
//! 1. **Operand Limits:** Number of output and input register slots per instruction.
//! 2. **Register File:** Size of the SimpleScalar PISA architectural register space.

/// Number of destination register slots in an instruction record.
pub const MAX_OUTPUTS: usize = 2;

/// Number of source register slots (and producer references) in an instruction record.
pub const MAX_INPUTS: usize = 3;

/// Total architectural registers of the PISA target (32 integer, 32 FP, HI, LO,
/// FCC, and three bookkeeping slots). This is the default map table size.
pub const PISA_TOTAL_REGS: usize = 70;
