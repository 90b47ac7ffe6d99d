//! Tomasulo scheduling pipeline.
//!
//! This module contains the scheduling structures and the engine that drives them:
//! 1. **IFQ:** Bounded in-order queue between the trace and dispatch.
//! 2. **Map Table:** Register renaming from architectural register to producer.
//! 3. **Reservation Stations:** Integer and floating-point waiting pools.
//! 4. **Functional Units:** Integer and floating-point execution pools.
//! 5. **CDB:** The single result broadcast slot.
//! 6. **Stages:** The five per-cycle steps run by the [`engine::Engine`].

/// Common data bus.
pub mod cdb;

/// Scheduling engine owning every structure of one run.
pub mod engine;

/// Functional unit pools.
pub mod functional_unit;

/// Instruction fetch queue.
pub mod ifq;

/// Register map table.
pub mod map_table;

/// Reservation station pools.
pub mod reservation;

/// Pipeline stage implementations (retire, writeback, execute, dispatch, fetch).
pub mod stages;
