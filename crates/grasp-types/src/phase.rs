//! Update phases and bit masks.
//!
//! The engine is driven by an external tick loop that invokes the
//! interaction manager once per logical phase, in this order within a
//! frame:
//!
//! ```text
//! Fixed ──► Dynamic ──► Late ──► OnBeforeRender
//! ```
//!
//! Arbitration (hover/select/focus commits) happens only in the
//! `Dynamic` phase; the other phases flush registration and run the
//! supplier's per-interactor hooks for interactors that opted in via
//! [`PhaseMask`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A discrete update phase within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdatePhase {
    /// Fixed-timestep update, before the dynamic phase.
    Fixed,
    /// The main per-frame update where arbitration runs.
    Dynamic,
    /// Late update, after arbitration.
    Late,
    /// Final update just before rendering.
    OnBeforeRender,
}

impl UpdatePhase {
    /// Returns the mask bit for this phase.
    #[must_use]
    pub fn mask(&self) -> PhaseMask {
        match self {
            Self::Fixed => PhaseMask::FIXED,
            Self::Dynamic => PhaseMask::DYNAMIC,
            Self::Late => PhaseMask::LATE,
            Self::OnBeforeRender => PhaseMask::ON_BEFORE_RENDER,
        }
    }
}

impl std::fmt::Display for UpdatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "Fixed"),
            Self::Dynamic => write!(f, "Dynamic"),
            Self::Late => write!(f, "Late"),
            Self::OnBeforeRender => write!(f, "OnBeforeRender"),
        }
    }
}

bitflags! {
    /// Which update phases an interactor's supplier hooks run in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PhaseMask: u8 {
        /// Fixed-timestep phase.
        const FIXED = 1 << 0;
        /// Dynamic (main) phase.
        const DYNAMIC = 1 << 1;
        /// Late phase.
        const LATE = 1 << 2;
        /// Just-before-render phase.
        const ON_BEFORE_RENDER = 1 << 3;
    }
}

impl PhaseMask {
    /// Returns `true` if the mask includes the given phase.
    #[must_use]
    pub fn includes(&self, phase: UpdatePhase) -> bool {
        self.contains(phase.mask())
    }
}

impl Default for PhaseMask {
    fn default() -> Self {
        Self::all()
    }
}

bitflags! {
    /// Interaction layers shared by interactors and interactables.
    ///
    /// An interactor may only hover/select/focus an interactable when
    /// their layer masks overlap in at least one bit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct LayerMask: u32 {
        /// The default layer every entity starts on.
        const DEFAULT = 1 << 0;
    }
}

impl LayerMask {
    /// Builds a mask from a raw layer index (0..=31).
    #[must_use]
    pub fn layer(index: u32) -> Self {
        Self::from_bits_retain(1 << (index & 31))
    }

    /// Returns `true` if the two masks share at least one layer.
    #[must_use]
    pub fn overlaps(&self, other: Self) -> bool {
        !(*self & other).is_empty()
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::DEFAULT
    }
}
