//! Core types for GRASP.
//!
//! This crate provides the identifier types, policy modes, update
//! phases, and the unified error interface shared by every other
//! crate in the GRASP (Group-Resolved Arbitration of Selection and
//! Pointing) workspace.
//!
//! # Crate Architecture
//!
//! GRASP is layered leaves-first:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  grasp-engine   : registration, groups, manager          │
//! ├──────────────────────────────────────────────────────────┤
//! │  grasp-filter   : target scoring pipeline                │
//! │  grasp-event    : interaction events                     │
//! ├──────────────────────────────────────────────────────────┤
//! │  grasp-types    : ids, modes, phases, ErrorCode ◄── HERE │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Identity
//!
//! Entities live in arenas owned by the interaction manager; the types
//! here ([`InteractorId`], [`InteractableId`], [`GroupId`],
//! [`ColliderId`]) are the copyable handles that cross API boundaries.
//!
//! # Error Handling
//!
//! All GRASP errors implement [`ErrorCode`]:
//!
//! ```
//! use grasp_types::ErrorCode;
//!
//! #[derive(Debug)]
//! struct Cycle;
//!
//! impl ErrorCode for Cycle {
//!     fn code(&self) -> &'static str { "GROUP_MEMBERSHIP_CYCLE" }
//!     fn is_recoverable(&self) -> bool { false }
//! }
//!
//! assert_eq!(Cycle.code(), "GROUP_MEMBERSHIP_CYCLE");
//! ```

mod error;
mod id;
mod modes;
mod phase;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{ColliderId, FocusScope, GroupId, InteractableId, InteractorId};
pub use modes::{DistanceMode, FocusMode, SelectMode};
pub use phase::{LayerMask, PhaseMask, UpdatePhase};
