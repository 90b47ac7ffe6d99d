//! Opcode flags and instruction classes.
//!
//! The external decoder describes each dynamic instruction with a flag word
//! using SimpleScalar's bit assignments. The scheduler only cares about the
//! coarse class derived from those bits:
//! 1. **Flag Word:** `OpFlags`, a thin wrapper over the decoder's `u32`.
//! 2. **Classes:** `OpClass`, one of load, store, int/fp compute, control or trap.
//! 3. **Unit Routing:** `UnitClass`, the reservation-station/functional-unit pool a class uses.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// Raw decoder flag word attached to every trace entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpFlags(pub u32);

impl OpFlags {
    /// Integer computation.
    pub const ICOMP: Self = Self(0x0000_0001);
    /// Floating-point computation.
    pub const FCOMP: Self = Self(0x0000_0002);
    /// Control instruction.
    pub const CTRL: Self = Self(0x0000_0004);
    /// Unconditional change of control.
    pub const UNCOND: Self = Self(0x0000_0008);
    /// Conditional change of control.
    pub const COND: Self = Self(0x0000_0010);
    /// Memory access.
    pub const MEM: Self = Self(0x0000_0020);
    /// Load.
    pub const LOAD: Self = Self(0x0000_0040);
    /// Store.
    pub const STORE: Self = Self(0x0000_0080);
    /// Displaced (R+C) addressing.
    pub const DISP: Self = Self(0x0000_0100);
    /// R+R addressing.
    pub const RR: Self = Self(0x0000_0200);
    /// Direct addressing.
    pub const DIRECT: Self = Self(0x0000_0400);
    /// Trap instruction (system call, break).
    pub const TRAP: Self = Self(0x0000_0800);
    /// Long latency operation.
    pub const LONGLAT: Self = Self(0x0000_1000);
    /// Direct jump.
    pub const DIRJMP: Self = Self(0x0000_2000);
    /// Indirect jump.
    pub const INDIRJMP: Self = Self(0x0000_4000);
    /// Function call.
    pub const CALL: Self = Self(0x0000_8000);
    /// FP conditional branch.
    pub const FPCOND: Self = Self(0x0001_0000);
    /// Instruction has an immediate operand.
    pub const IMM: Self = Self(0x0002_0000);

    /// Returns `true` if any bit of `other` is set in `self`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns the raw flag bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for OpFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for OpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Scheduling class of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum OpClass {
    /// Memory load; integer pool, broadcasts its destination.
    Load,
    /// Memory store; integer pool, never broadcasts.
    Store,
    /// Integer computation.
    IntCompute,
    /// Floating-point computation.
    FpCompute,
    /// Unconditional jump or call.
    UncondCtrl,
    /// Conditional branch.
    CondCtrl,
    /// System overhead, skipped at fetch.
    Trap,
}

/// Functional-unit pool used by a class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitClass {
    /// Integer reservation stations and functional units.
    Int,
    /// Floating-point reservation stations and functional units.
    Fp,
}

impl OpClass {
    /// Classifies a decoder flag word.
    ///
    /// Precedence follows the decoder's own overlaps: a trap is a trap no matter
    /// what else is set, calls count as unconditional control, and memory
    /// operations win over the computation bits some decoders also set on them.
    /// Returns `None` when no classifying bit is present.
    pub const fn from_flags(flags: OpFlags) -> Option<Self> {
        if flags.intersects(OpFlags::TRAP) {
            Some(Self::Trap)
        } else if flags.intersects(OpFlags(OpFlags::UNCOND.0 | OpFlags::CALL.0)) {
            Some(Self::UncondCtrl)
        } else if flags.intersects(OpFlags::COND) {
            Some(Self::CondCtrl)
        } else if flags.intersects(OpFlags::STORE) {
            Some(Self::Store)
        } else if flags.intersects(OpFlags::LOAD) {
            Some(Self::Load)
        } else if flags.intersects(OpFlags::FCOMP) {
            Some(Self::FpCompute)
        } else if flags.intersects(OpFlags::ICOMP) {
            Some(Self::IntCompute)
        } else {
            None
        }
    }

    /// Canonical flag word for this class, as a decoder would report it.
    pub const fn flags(self) -> OpFlags {
        match self {
            Self::Load => OpFlags(OpFlags::MEM.0 | OpFlags::LOAD.0 | OpFlags::DISP.0),
            Self::Store => OpFlags(OpFlags::MEM.0 | OpFlags::STORE.0 | OpFlags::DISP.0),
            Self::IntCompute => OpFlags::ICOMP,
            Self::FpCompute => OpFlags::FCOMP,
            Self::UncondCtrl => OpFlags(OpFlags::CTRL.0 | OpFlags::UNCOND.0 | OpFlags::DIRJMP.0),
            Self::CondCtrl => OpFlags(OpFlags::CTRL.0 | OpFlags::COND.0 | OpFlags::DIRJMP.0),
            Self::Trap => OpFlags::TRAP,
        }
    }

    /// Conditional or unconditional control transfer.
    #[inline]
    pub const fn is_control(self) -> bool {
        matches!(self, Self::UncondCtrl | Self::CondCtrl)
    }

    /// Trap entries never enter the pipeline.
    #[inline]
    pub const fn is_trap(self) -> bool {
        matches!(self, Self::Trap)
    }

    /// Whether completion is published on the common data bus.
    #[inline]
    pub const fn writes_cdb(self) -> bool {
        matches!(self, Self::IntCompute | Self::Load | Self::FpCompute)
    }

    /// Pool this class is scheduled on, or `None` for control and trap entries.
    pub const fn unit(self) -> Option<UnitClass> {
        match self {
            Self::Load | Self::Store | Self::IntCompute => Some(UnitClass::Int),
            Self::FpCompute => Some(UnitClass::Fp),
            Self::UncondCtrl | Self::CondCtrl | Self::Trap => None,
        }
    }
}

impl fmt::Display for OpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Load => "load",
            Self::Store => "store",
            Self::IntCompute => "int",
            Self::FpCompute => "fp",
            Self::UncondCtrl => "jump",
            Self::CondCtrl => "branch",
            Self::Trap => "trap",
        };
        f.write_str(name)
    }
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => f.write_str("int"),
            Self::Fp => f.write_str("fp"),
        }
    }
}
