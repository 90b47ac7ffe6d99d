//! Common data bus.
//!
//! A single broadcast slot. The winner placed on the bus in cycle `c` retires
//! at the start of cycle `c + 1`, which is when its dependents observe the value.

use crate::isa::instruction::InstIndex;

/// Single-slot broadcast bus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cdb {
    slot: Option<InstIndex>,
}

impl Cdb {
    /// Creates an idle bus.
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Instruction currently on the bus.
    #[inline]
    pub const fn occupant(&self) -> Option<InstIndex> {
        self.slot
    }

    /// True if nothing is on the bus.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Places `index` on the bus.
    ///
    /// # Panics
    ///
    /// If the bus already carries an instruction: two winners in one cycle is
    /// a scheduler bug.
    pub fn broadcast(&mut self, index: InstIndex) {
        assert!(
            self.slot.is_none(),
            "CDB already carries {:?} while broadcasting {index}",
            self.slot
        );
        self.slot = Some(index);
    }

    /// Removes the instruction on the bus.
    pub fn take(&mut self) -> Option<InstIndex> {
        self.slot.take()
    }
}
