//! Pipeline stage implementations.
//!
//! This module contains the individual implementations of the five per-cycle
//! steps of the scheduling engine, in the order the engine runs them:
//! 1. **Retire:** Publishes the previous CDB winner to the map table and waiting stations.
//! 2. **Writeback:** Frees finished stores and moves the oldest finished instruction onto the CDB.
//! 3. **Execute:** Starts ready reservation-station occupants on free functional units.
//! 4. **Dispatch:** Moves the IFQ head into a reservation station and renames it.
//! 5. **Fetch:** Pulls the next non-trap trace entry into the IFQ.

/// IFQ to reservation station (dispatch to issue).
pub mod dispatch;

/// Reservation station to functional unit (issue to execute).
pub mod execute;

/// Trace to IFQ.
pub mod fetch;

/// CDB to retirement.
pub mod retire;

/// Functional unit to CDB (execute to writeback).
pub mod writeback;

/// Dispatch stage entry point.
pub use dispatch::dispatch_stage;
/// Execute stage entry point.
pub use execute::execute_stage;
/// Fetch stage entry point.
pub use fetch::fetch_stage;
/// Retire stage entry point.
pub use retire::retire_stage;
/// Writeback stage entry point.
pub use writeback::writeback_stage;
