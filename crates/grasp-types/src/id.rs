//! Identifier types for GRASP.
//!
//! All identifiers are UUID-based so that entity handles stay valid
//! across registration churn and can be logged, serialized, and
//! compared without borrowing the entity arenas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for an interactor (an input source capable of hovering
/// and selecting targets).
///
/// Interactor state lives in the interaction manager's arena; this
/// handle is what crosses API boundaries, appears in events, and keys
/// hover/select sets.
///
/// # Example
///
/// ```
/// use grasp_types::InteractorId;
///
/// let left = InteractorId::new();
/// let right = InteractorId::new();
/// assert_ne!(left, right);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractorId(pub Uuid);

#[allow(clippy::new_without_default)] // Default intentionally not implemented - see below
impl InteractorId {
    /// Creates a new [`InteractorId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

// NOTE: InteractorId intentionally does NOT implement Default.
// Default::default() would mint a handle that no arena knows about;
// handles should come from InteractionManager::add_interactor.

impl std::fmt::Display for InteractorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "interactor:{}", self.0)
    }
}

/// Identifier for an interactable (a target that can be hovered,
/// selected, or focused).
///
/// # Example
///
/// ```
/// use grasp_types::InteractableId;
///
/// let cube = InteractableId::new();
/// println!("target: {}", cube);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractableId(pub Uuid);

#[allow(clippy::new_without_default)] // Default intentionally not implemented
impl InteractableId {
    /// Creates a new [`InteractableId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for InteractableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "interactable:{}", self.0)
    }
}

/// Identifier for an interaction group (a priority-ordered container
/// arbitrating which member interacts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub Uuid);

#[allow(clippy::new_without_default)] // Default intentionally not implemented
impl GroupId {
    /// Creates a new [`GroupId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "group:{}", self.0)
    }
}

/// Opaque handle for a physical collider owned by an interactable.
///
/// The engine never interprets collider geometry; it only maintains
/// the collider-to-interactable association table for O(1) lookup by
/// contact-based candidate suppliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColliderId(pub Uuid);

#[allow(clippy::new_without_default)] // Default intentionally not implemented
impl ColliderId {
    /// Creates a new [`ColliderId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ColliderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "collider:{}", self.0)
    }
}

/// Identity of a focus scope.
///
/// Focus is arbitrated per scope rather than per interactor: members
/// of a group compete as one scope, while an ungrouped interactor is
/// its own singleton scope. A group and the ungrouped interactors
/// around it are therefore peers when an interactable enforces
/// [`FocusMode::Single`](crate::FocusMode::Single).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocusScope {
    /// Focus held on behalf of an interaction group.
    Group(GroupId),
    /// Focus held by an ungrouped interactor acting as its own scope.
    Solo(InteractorId),
}

impl FocusScope {
    /// Returns `true` if this scope belongs to a group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Returns the group id when the scope is a group scope.
    #[must_use]
    pub fn group(&self) -> Option<GroupId> {
        match self {
            Self::Group(id) => Some(*id),
            Self::Solo(_) => None,
        }
    }
}

impl std::fmt::Display for FocusScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Group(id) => write!(f, "scope:{}", id),
            Self::Solo(id) => write!(f, "scope:{}", id),
        }
    }
}
