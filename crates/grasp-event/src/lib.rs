//! Interaction events for GRASP.
//!
//! This crate provides the notification types the arbitration engine
//! emits for external collaborators (presentation, haptics, logging).
//!
//! # Event Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 InteractionManager                   │
//! │  arbitration commits hover/select/focus transitions  │
//! └──────────────────────────────────────────────────────┘
//!            │ push (in commit order)
//!            ▼
//!      Vec<InteractionEvent>
//!            │ drain_events()
//!            ▼
//! ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//! │   Visuals    │  │   Haptics    │  │  Recording   │
//! └──────────────┘  └──────────────┘  └──────────────┘
//! ```
//!
//! # Event Categories
//!
//! | Kind | Variants | Carries |
//! |------|----------|---------|
//! | Registration | `*Registered` / `*Unregistered` | entity id, containing group |
//! | Hover | `HoverEntered` / `HoverExited` | interactor, interactable |
//! | Select | `SelectEntered` / `SelectExited` | interactor, interactable |
//! | Focus | `FocusEntered` / `FocusExited` | interactor, interactable, scope |
//!
//! Exit variants additionally carry `canceled`, distinguishing orderly
//! arbitration exits from teardown caused by unregistration.

mod event;

pub use event::InteractionEvent;

// Re-export from grasp_types for convenience
pub use grasp_types::{FocusScope, GroupId, InteractableId, InteractorId};
