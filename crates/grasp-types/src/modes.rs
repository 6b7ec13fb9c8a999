//! Interaction policy modes for interactables.
//!
//! Each interactable carries three independent policies:
//!
//! | Mode | Governs | Variants |
//! |------|---------|----------|
//! | [`SelectMode`] | Concurrent selectors | `Single`, `Multiple` |
//! | [`FocusMode`] | Concurrent focusing scopes | `None`, `Single`, `Multiple` |
//! | [`DistanceMode`] | Distance query shape | `TransformPosition`, `ColliderPosition`, `ColliderVolume` |
//!
//! `Single` modes evict the previous holder when a new one commits;
//! observers always see the exit before the new enter.

use serde::{Deserialize, Serialize};

/// How many interactors may select an interactable at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectMode {
    /// At most one selector; the most recent selector evicts the prior one.
    #[default]
    Single,
    /// Any number of concurrent selectors.
    Multiple,
}

impl SelectMode {
    /// Returns `true` if only one selector is allowed at a time.
    #[must_use]
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single)
    }
}

impl std::fmt::Display for SelectMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "Single"),
            Self::Multiple => write!(f, "Multiple"),
        }
    }
}

/// How many focus scopes may focus an interactable at once.
///
/// Focus is keyed by scope (a group, or an ungrouped interactor acting
/// as its own scope), not by individual interactor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocusMode {
    /// The interactable can never gain focus.
    None,
    /// At most one scope; a newly focusing scope evicts the prior one.
    #[default]
    Single,
    /// Any number of concurrent focusing scopes.
    Multiple,
}

impl FocusMode {
    /// Returns `true` if the interactable accepts focus at all.
    #[must_use]
    pub fn accepts_focus(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns `true` if only one scope may hold focus at a time.
    #[must_use]
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single)
    }
}

impl std::fmt::Display for FocusMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Single => write!(f, "Single"),
            Self::Multiple => write!(f, "Multiple"),
        }
    }
}

/// Which reference point the candidate supplier should measure distance
/// against when answering `distance_sqr` queries.
///
/// The engine never computes geometry itself; it forwards the mode to
/// the supplier on every query and never caches the answer across ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceMode {
    /// Measure to the interactable's transform position.
    #[default]
    TransformPosition,
    /// Measure to the position of the nearest collider.
    ColliderPosition,
    /// Measure to the nearest point on the nearest collider volume.
    ColliderVolume,
}

impl std::fmt::Display for DistanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransformPosition => write!(f, "TransformPosition"),
            Self::ColliderPosition => write!(f, "ColliderPosition"),
            Self::ColliderVolume => write!(f, "ColliderVolume"),
        }
    }
}
