//! GRASP interaction arbitration engine.
//!
//! Decides, among a dynamic population of interactors (input sources)
//! and interactables (targets), which pairs are hovering, selecting,
//! and focusing each tick. Geometry stays outside: a
//! [`CandidateSupplier`] hands the engine raw candidate lists and
//! answers distance queries.
//!
//! ```text
//! CandidateSupplier ──► raw candidates per interactor
//!                              │
//!                              ▼
//!                    TargetFilter (grasp-filter)
//!                              │
//!                              ▼
//!               InteractionGroup priority + override
//!                              │
//!                              ▼
//!          Interactable hover/select/focus commitment
//!                              │
//!                              ▼
//!              InteractionEvent queue (grasp-event)
//! ```
//!
//! The [`InteractionManager`] owns every entity. Registration is
//! deferred-flush ([`RegistrationList`]): adds and removes buffer until
//! the next tick's flush, so processing never observes the committed
//! snapshot changing mid-iteration.

mod error;
mod group;
mod interactable;
mod interactor;
mod manager;
mod registry;
mod supplier;

pub use error::RegistryError;
pub use group::{Group, GroupMember};
pub use interactable::{Interactable, InteractionFilter, StrengthFilter};
pub use interactor::Interactor;
pub use manager::InteractionManager;
pub use registry::RegistrationList;
pub use supplier::CandidateSupplier;

// Event and id types collaborators need alongside the engine.
pub use grasp_event::InteractionEvent;
pub use grasp_types::{
    ColliderId, DistanceMode, FocusMode, FocusScope, GroupId, InteractableId, InteractorId,
    LayerMask, PhaseMask, SelectMode, UpdatePhase,
};

/// Test utilities: scripted suppliers and instrumented filters.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    pub use crate::interactable::testing::{CountingFilter, ScalingStrengthFilter};
    pub use crate::supplier::testing::ScriptedSupplier;
}
