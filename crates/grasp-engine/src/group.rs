//! Interaction groups: prioritized member lists with override edges.
//!
//! A group arbitrates which single member interactor may hover or
//! select each tick. Priority is the member's snapshot index (0 is
//! highest). Override edges let a configured lower-priority member
//! pre-empt the active interactor when it can service one of the same
//! targets. All structural mutation and the per-tick arbitration live
//! on [`InteractionManager`](crate::InteractionManager), which can
//! validate containment and cycles across the whole entity arena; the
//! group itself is the record those operations maintain.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use grasp_types::{GroupId, InteractorId};

use crate::registry::RegistrationList;

/// A member of an interaction group: an interactor or a nested group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupMember {
    /// An interactor member.
    Interactor(InteractorId),
    /// A nested group member.
    Group(GroupId),
}

impl GroupMember {
    /// The interactor id, when this member is an interactor.
    #[must_use]
    pub fn interactor(&self) -> Option<InteractorId> {
        match self {
            Self::Interactor(id) => Some(*id),
            Self::Group(_) => None,
        }
    }

    /// The group id, when this member is a nested group.
    #[must_use]
    pub fn group(&self) -> Option<GroupId> {
        match self {
            Self::Interactor(_) => None,
            Self::Group(id) => Some(*id),
        }
    }
}

impl std::fmt::Display for GroupMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Interactor(id) => write!(f, "{id}"),
            Self::Group(id) => write!(f, "{id}"),
        }
    }
}

/// A priority-ordered container arbitrating which member interacts.
pub struct Group {
    id: GroupId,
    pub(crate) members: RegistrationList<GroupMember>,
    pub(crate) overrides: HashMap<GroupMember, HashSet<GroupMember>>,
    pub(crate) active_interactor: Option<InteractorId>,
    pub(crate) containing_group: Option<GroupId>,
}

impl Group {
    /// Creates an empty group with a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: GroupId::new(),
            members: RegistrationList::new(),
            overrides: HashMap::new(),
            active_interactor: None,
            containing_group: None,
        }
    }

    /// This group's id.
    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// The interactor that performed interaction within this group on
    /// the last Dynamic tick, if any.
    #[must_use]
    pub fn active_interactor(&self) -> Option<InteractorId> {
        self.active_interactor
    }

    /// The group this group is nested within, if any.
    #[must_use]
    pub fn containing_group(&self) -> Option<GroupId> {
        self.containing_group
    }

    /// Returns `true` if the member belongs to this group, considering
    /// pending membership changes.
    #[must_use]
    pub fn contains_member(&self, member: GroupMember) -> bool {
        self.members.is_registered(member)
    }

    /// Collects the members in priority order, considering pending
    /// membership changes.
    pub fn members(&self, out: &mut Vec<GroupMember>) {
        self.members.registered_items(out);
    }

    /// The override members configured for `member`, if any.
    #[must_use]
    pub fn overrides_for(&self, member: GroupMember) -> Option<&HashSet<GroupMember>> {
        self.overrides.get(&member)
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}
