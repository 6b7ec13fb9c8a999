//! The interaction manager: the top-level arbiter.
//!
//! The manager owns every interactor, interactable, and group, drives
//! the per-phase update pipeline, and commits all hover/select/focus
//! transitions. Collaborators observe transitions through the event
//! queue ([`drain_events`](InteractionManager::drain_events)).
//!
//! # Dynamic Tick Pipeline
//!
//! ```text
//! flush registration lists
//!        │
//!        ▼
//! pre-process hooks (phase-gated per interactor)
//!        │
//!        ▼
//! collect candidates (supplier → linked target filter)
//!        │
//!        ▼
//! clear stale focus (every group scope, then solo scopes)
//!        │
//!        ▼
//! group arbitration (top-level groups, priority + override)
//!        │
//!        ▼
//! ungrouped interactors (clear invalid → select → hover)
//!        │
//!        ▼
//! interaction strength
//!        │
//!        ▼
//! process hooks (phase-gated per interactor)
//! ```
//!
//! `Fixed`, `Late`, and `OnBeforeRender` phases flush and run hooks
//! only.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tracing::{error, warn};

use grasp_event::InteractionEvent;
use grasp_types::{
    ColliderId, FocusScope, GroupId, InteractableId, InteractorId, SelectMode, UpdatePhase,
};

use crate::group::{Group, GroupMember};
use crate::interactable::{run_filter_chain, Interactable, InteractionFilter};
use crate::interactor::Interactor;
use crate::registry::RegistrationList;
use crate::supplier::CandidateSupplier;

/// The interactor and interactable a focus scope currently holds.
struct FocusState {
    interactor: InteractorId,
    interactable: InteractableId,
}

/// Top-level coordinator for interaction arbitration.
///
/// Entities are added once ([`add_interactor`](Self::add_interactor)
/// and friends) and from then on referred to by id. Unregistering an
/// entity tears down its interactions but keeps its configuration, so
/// it can register again later.
pub struct InteractionManager {
    interactors: HashMap<InteractorId, Interactor>,
    interactables: HashMap<InteractableId, Interactable>,
    groups: HashMap<GroupId, Group>,
    interactor_registry: RegistrationList<InteractorId>,
    interactable_registry: RegistrationList<InteractableId>,
    group_registry: RegistrationList<GroupId>,
    // Shadow sets of members currently arbitrated within a group; the
    // top-level pipeline skips these.
    grouped_interactors: HashSet<InteractorId>,
    grouped_groups: HashSet<GroupId>,
    collider_map: HashMap<ColliderId, InteractableId>,
    focus_scopes: HashMap<FocusScope, FocusState>,
    hover_filters: Vec<Box<dyn InteractionFilter>>,
    select_filters: Vec<Box<dyn InteractionFilter>>,
    events: Vec<InteractionEvent>,
}

impl InteractionManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interactors: HashMap::new(),
            interactables: HashMap::new(),
            groups: HashMap::new(),
            interactor_registry: RegistrationList::new(),
            interactable_registry: RegistrationList::new(),
            group_registry: RegistrationList::new(),
            grouped_interactors: HashSet::new(),
            grouped_groups: HashSet::new(),
            collider_map: HashMap::new(),
            focus_scopes: HashMap::new(),
            hover_filters: Vec::new(),
            select_filters: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Adds an interactor to the arena and registers it.
    pub fn add_interactor(&mut self, interactor: Interactor) -> InteractorId {
        let id = interactor.id();
        self.interactors.insert(id, interactor);
        self.register_interactor(id);
        id
    }

    /// Adds an interactable to the arena and registers it.
    pub fn add_interactable(&mut self, interactable: Interactable) -> InteractableId {
        let id = interactable.id();
        self.interactables.insert(id, interactable);
        self.register_interactable(id);
        id
    }

    /// Adds a group to the arena and registers it.
    pub fn add_group(&mut self, group: Group) -> GroupId {
        let id = group.id();
        self.groups.insert(id, group);
        self.register_group(id);
        id
    }

    /// Shared access to an interactor.
    #[must_use]
    pub fn interactor(&self, id: InteractorId) -> Option<&Interactor> {
        self.interactors.get(&id)
    }

    /// Mutable access to an interactor's configuration.
    pub fn interactor_mut(&mut self, id: InteractorId) -> Option<&mut Interactor> {
        self.interactors.get_mut(&id)
    }

    /// Shared access to an interactable.
    #[must_use]
    pub fn interactable(&self, id: InteractableId) -> Option<&Interactable> {
        self.interactables.get(&id)
    }

    /// Mutable access to an interactable's configuration.
    pub fn interactable_mut(&mut self, id: InteractableId) -> Option<&mut Interactable> {
        self.interactables.get_mut(&id)
    }

    /// Shared access to a group.
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Returns `true` if the interactor is registered, considering
    /// pending operations.
    #[must_use]
    pub fn is_interactor_registered(&self, id: InteractorId) -> bool {
        self.interactor_registry.is_registered(id)
    }

    /// Returns `true` if the interactable is registered, considering
    /// pending operations.
    #[must_use]
    pub fn is_interactable_registered(&self, id: InteractableId) -> bool {
        self.interactable_registry.is_registered(id)
    }

    /// Returns `true` if the group is registered, considering pending
    /// operations.
    #[must_use]
    pub fn is_group_registered(&self, id: GroupId) -> bool {
        self.group_registry.is_registered(id)
    }

    /// Appends a manager-level hover predicate filter.
    pub fn add_hover_filter(&mut self, filter: Box<dyn InteractionFilter>) {
        self.hover_filters.push(filter);
    }

    /// Appends a manager-level select predicate filter.
    pub fn add_select_filter(&mut self, filter: Box<dyn InteractionFilter>) {
        self.select_filters.push(filter);
    }

    /// The interactable owning a collider handle, if any.
    #[must_use]
    pub fn interactable_for_collider(&self, collider: ColliderId) -> Option<InteractableId> {
        self.collider_map.get(&collider).copied()
    }

    /// The interactable a focus scope currently holds, if any.
    #[must_use]
    pub fn focused_interactable(&self, scope: FocusScope) -> Option<InteractableId> {
        self.focus_scopes.get(&scope).map(|s| s.interactable)
    }

    /// Hands the accumulated events to the caller, clearing the queue.
    pub fn drain_events(&mut self) -> Vec<InteractionEvent> {
        std::mem::take(&mut self.events)
    }
}

// Registration.
impl InteractionManager {
    /// Registers an interactor previously added to the arena.
    ///
    /// Fails (error log, no event) if the interactor is unknown or its
    /// containing group is not registered yet.
    pub fn register_interactor(&mut self, id: InteractorId) -> bool {
        let Some(interactor) = self.interactors.get(&id) else {
            error!(interactor = %id, "cannot register unknown interactor");
            return false;
        };
        let containing = interactor.containing_group;
        if let Some(group) = containing {
            if !self.group_registry.is_registered(group) {
                error!(
                    interactor = %id,
                    group = %group,
                    "cannot register interactor before its containing group"
                );
                return false;
            }
        }
        if !self.interactor_registry.register(id) {
            return false;
        }
        if containing.is_some() {
            self.grouped_interactors.insert(id);
        } else {
            self.grouped_interactors.remove(&id);
        }
        self.events.push(InteractionEvent::InteractorRegistered {
            interactor: id,
            containing_group: containing,
        });
        true
    }

    /// Unregisters an interactor, canceling its focus, selections, and
    /// hovers (exit events carry `canceled: true`).
    pub fn unregister_interactor(&mut self, id: InteractorId) -> bool {
        if !self.interactor_registry.is_registered(id) {
            return false;
        }
        self.cancel_interactor_focus(id);
        let selected: Vec<_> = self
            .interactors
            .get(&id)
            .map(|i| i.selected.clone())
            .unwrap_or_default();
        for interactable in selected.into_iter().rev() {
            self.select_exit(id, interactable, true);
        }
        let hovered: Vec<_> = self
            .interactors
            .get(&id)
            .map(|i| i.hovered.clone())
            .unwrap_or_default();
        for interactable in hovered.into_iter().rev() {
            self.hover_exit(id, interactable, true);
        }
        if let Some(interactor) = self.interactors.get_mut(&id) {
            // A stale candidate list must not keep an unregistered
            // interactor eligible for arbitration probes.
            interactor.valid_targets.clear();
        }
        self.interactor_registry.unregister(id);
        self.grouped_interactors.remove(&id);
        self.events
            .push(InteractionEvent::InteractorUnregistered { interactor: id });
        true
    }

    /// Registers an interactable previously added to the arena,
    /// associating its collider handles.
    ///
    /// The first association for a collider wins; a conflicting second
    /// association logs a warning and leaves the first in place.
    pub fn register_interactable(&mut self, id: InteractableId) -> bool {
        let Some(interactable) = self.interactables.get(&id) else {
            error!(interactable = %id, "cannot register unknown interactable");
            return false;
        };
        let colliders = interactable.colliders().to_vec();
        if !self.interactable_registry.register(id) {
            return false;
        }
        for collider in colliders {
            match self.collider_map.entry(collider) {
                Entry::Occupied(existing) => {
                    if *existing.get() != id {
                        warn!(
                            collider = %collider,
                            existing = %existing.get(),
                            interactable = %id,
                            "collider already associated with another interactable; keeping the first association"
                        );
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
        }
        self.events
            .push(InteractionEvent::InteractableRegistered { interactable: id });
        true
    }

    /// Unregisters an interactable, canceling focus, selections, and
    /// hovers involving it and dropping its collider associations.
    pub fn unregister_interactable(&mut self, id: InteractableId) -> bool {
        if !self.interactable_registry.is_registered(id) {
            return false;
        }
        let scopes: Vec<_> = self
            .focus_scopes
            .iter()
            .filter(|(_, state)| state.interactable == id)
            .map(|(scope, _)| *scope)
            .collect();
        for scope in scopes {
            self.focus_exit_scope(scope, true);
        }
        let selecting: Vec<_> = self
            .interactables
            .get(&id)
            .map(|i| i.selecting.clone())
            .unwrap_or_default();
        for interactor in selecting.into_iter().rev() {
            self.select_exit(interactor, id, true);
        }
        let hovering: Vec<_> = self
            .interactables
            .get(&id)
            .map(|i| i.hovering.clone())
            .unwrap_or_default();
        for interactor in hovering.into_iter().rev() {
            self.hover_exit(interactor, id, true);
        }
        // Only entries still pointing at this interactable are removed;
        // a collider that lost a first-wins conflict stays with its
        // current owner.
        self.collider_map.retain(|_, owner| *owner != id);
        self.interactable_registry.unregister(id);
        self.events
            .push(InteractionEvent::InteractableUnregistered { interactable: id });
        true
    }

    /// Registers a group previously added to the arena and claims its
    /// members for group arbitration.
    ///
    /// A nested group registers only after its containing group.
    pub fn register_group(&mut self, id: GroupId) -> bool {
        let Some(group) = self.groups.get(&id) else {
            error!(group = %id, "cannot register unknown group");
            return false;
        };
        let containing = group.containing_group;
        if let Some(parent) = containing {
            if !self.group_registry.is_registered(parent) {
                error!(
                    group = %id,
                    parent = %parent,
                    "cannot register nested group before its containing group"
                );
                return false;
            }
        }
        if !self.group_registry.register(id) {
            return false;
        }
        if containing.is_some() {
            self.grouped_groups.insert(id);
        } else {
            self.grouped_groups.remove(&id);
        }
        self.events.push(InteractionEvent::GroupRegistered {
            group: id,
            containing_group: containing,
        });
        let members = self.flushed_members(id);
        for member in members {
            self.claim_member(id, member);
        }
        true
    }

    /// Unregisters a group, canceling its focus and re-registering all
    /// of its members as independent.
    ///
    /// Member re-registration events carry `containing_group: None`;
    /// hover/select state restarts from scratch on both transitions.
    pub fn unregister_group(&mut self, id: GroupId) -> bool {
        if !self.group_registry.is_registered(id) {
            return false;
        }
        let scope = FocusScope::Group(id);
        if self.focus_scopes.contains_key(&scope) {
            self.focus_exit_scope(scope, true);
        }
        let members = self.flushed_members(id);
        for member in members {
            self.release_member(id, member);
        }
        if let Some(group) = self.groups.get_mut(&id) {
            group.active_interactor = None;
        }
        self.group_registry.unregister(id);
        self.grouped_groups.remove(&id);
        self.events
            .push(InteractionEvent::GroupUnregistered { group: id });
        true
    }

    fn flushed_members(&mut self, id: GroupId) -> Vec<GroupMember> {
        match self.groups.get_mut(&id) {
            Some(group) => {
                group.members.flush();
                group.members.snapshot().to_vec()
            }
            None => Vec::new(),
        }
    }

    /// Sets the containment back-reference and re-registers the member
    /// so collaborators observe the transition into the group.
    fn claim_member(&mut self, id: GroupId, member: GroupMember) {
        match member {
            GroupMember::Interactor(interactor) => {
                let already = self
                    .interactors
                    .get(&interactor)
                    .is_some_and(|i| i.containing_group == Some(id));
                if already {
                    if self.interactor_registry.is_registered(interactor) {
                        self.grouped_interactors.insert(interactor);
                    }
                    return;
                }
                if let Some(i) = self.interactors.get_mut(&interactor) {
                    i.containing_group = Some(id);
                }
                if self.interactor_registry.is_registered(interactor) {
                    self.unregister_interactor(interactor);
                    self.register_interactor(interactor);
                }
            }
            GroupMember::Group(sub) => {
                let already = self
                    .groups
                    .get(&sub)
                    .is_some_and(|g| g.containing_group == Some(id));
                if already {
                    if self.group_registry.is_registered(sub) {
                        self.grouped_groups.insert(sub);
                    }
                    return;
                }
                if let Some(g) = self.groups.get_mut(&sub) {
                    g.containing_group = Some(id);
                }
                if self.group_registry.is_registered(sub) {
                    self.unregister_group(sub);
                    self.register_group(sub);
                }
            }
        }
    }

    /// Clears the containment back-reference and re-registers the
    /// member as independent.
    fn release_member(&mut self, id: GroupId, member: GroupMember) {
        match member {
            GroupMember::Interactor(interactor) => {
                let claimed = self
                    .interactors
                    .get(&interactor)
                    .is_some_and(|i| i.containing_group == Some(id));
                if !claimed {
                    return;
                }
                if let Some(i) = self.interactors.get_mut(&interactor) {
                    i.containing_group = None;
                }
                if self.interactor_registry.is_registered(interactor) {
                    self.unregister_interactor(interactor);
                    self.register_interactor(interactor);
                }
                self.grouped_interactors.remove(&interactor);
            }
            GroupMember::Group(sub) => {
                let claimed = self
                    .groups
                    .get(&sub)
                    .is_some_and(|g| g.containing_group == Some(id));
                if !claimed {
                    return;
                }
                if let Some(g) = self.groups.get_mut(&sub) {
                    g.containing_group = None;
                }
                if self.group_registry.is_registered(sub) {
                    self.unregister_group(sub);
                    self.register_group(sub);
                }
                self.grouped_groups.remove(&sub);
            }
        }
    }
}

// Group structure.
impl InteractionManager {
    /// Adds a member to a group's priority list (buffered until the
    /// group's next flush).
    ///
    /// Rejects with an error log and no state change when the member is
    /// unknown, already belongs to another group, or would create a
    /// containment cycle. Re-adding an existing member is a silent
    /// `false`.
    pub fn add_group_member(&mut self, id: GroupId, member: GroupMember) -> bool {
        if !self.validate_group_member(id, member) {
            return false;
        }
        let Some(group) = self.groups.get_mut(&id) else {
            return false;
        };
        if !group.members.register(member) {
            return false;
        }
        if self.group_registry.is_registered(id) {
            self.claim_member(id, member);
        }
        true
    }

    /// Removes a member, pruning its override edges in both directions,
    /// resetting the active interactor when the removed member is or
    /// contains it, and re-registering the member as independent.
    pub fn remove_group_member(&mut self, id: GroupId, member: GroupMember) -> bool {
        let Some(group) = self.groups.get_mut(&id) else {
            error!(group = %id, "cannot remove member from unknown group");
            return false;
        };
        if !group.members.unregister(member) {
            return false;
        }
        group.overrides.remove(&member);
        for overriders in group.overrides.values_mut() {
            overriders.remove(&member);
        }
        let active = group.active_interactor;
        if let Some(active) = active {
            if self.member_is_or_contains(member, active) {
                if let Some(group) = self.groups.get_mut(&id) {
                    group.active_interactor = None;
                }
            }
        }
        self.release_member(id, member);
        true
    }

    /// Repositions a member in the priority order, applied immediately
    /// so the order reads consistently mid-tick. A member not yet in
    /// the group is inserted at the index.
    pub fn move_group_member_to(&mut self, id: GroupId, member: GroupMember, index: usize) -> bool {
        if !self.validate_group_member(id, member) {
            return false;
        }
        let was_member = self
            .groups
            .get(&id)
            .is_some_and(|g| g.members.is_registered(member));
        let Some(group) = self.groups.get_mut(&id) else {
            return false;
        };
        group.members.flush();
        let moved = match group.members.move_item_immediately(member, index) {
            Ok(moved) => moved,
            Err(err) => {
                error!(group = %id, member = %member, error = %err, "cannot move group member");
                return false;
            }
        };
        if !was_member && self.group_registry.is_registered(id) {
            self.claim_member(id, member);
        }
        moved
    }

    /// Removes every member, highest priority first.
    pub fn clear_group_members(&mut self, id: GroupId) {
        let members = self.flushed_members(id);
        for member in members.into_iter().rev() {
            self.remove_group_member(id, member);
        }
    }

    /// Returns `true` if the member belongs to the group, considering
    /// pending membership changes.
    #[must_use]
    pub fn contains_group_member(&self, id: GroupId, member: GroupMember) -> bool {
        self.groups
            .get(&id)
            .is_some_and(|g| g.contains_member(member))
    }

    /// Permits `overrider` to pre-empt `source`'s active interaction.
    ///
    /// Both must currently be members of the group; self-overrides and
    /// override cycles (direct or transitive) are rejected with an
    /// error log.
    pub fn add_interaction_override(
        &mut self,
        id: GroupId,
        source: GroupMember,
        overrider: GroupMember,
    ) -> bool {
        let Some(group) = self.groups.get(&id) else {
            error!(group = %id, "cannot configure override on unknown group");
            return false;
        };
        if !group.contains_member(source) || !group.contains_member(overrider) {
            error!(
                group = %id,
                source = %source,
                overrider = %overrider,
                "override members must both belong to the group"
            );
            return false;
        }
        if self.override_chain_contains(id, overrider, source) {
            error!(
                group = %id,
                source = %source,
                overrider = %overrider,
                "override would create a cycle"
            );
            return false;
        }
        match self.groups.get_mut(&id) {
            Some(group) => group.overrides.entry(source).or_default().insert(overrider),
            None => false,
        }
    }

    /// Withdraws an override permission. The source must currently be a
    /// member of the group.
    pub fn remove_interaction_override(
        &mut self,
        id: GroupId,
        source: GroupMember,
        overrider: GroupMember,
    ) -> bool {
        let Some(group) = self.groups.get_mut(&id) else {
            error!(group = %id, "cannot remove override from unknown group");
            return false;
        };
        if !group.members.is_registered(source) {
            error!(group = %id, source = %source, "override source is not a member of the group");
            return false;
        }
        group
            .overrides
            .get_mut(&source)
            .is_some_and(|set| set.remove(&overrider))
    }

    /// Withdraws every override permission configured for a source
    /// member.
    pub fn clear_interaction_overrides(&mut self, id: GroupId, source: GroupMember) -> bool {
        let Some(group) = self.groups.get_mut(&id) else {
            error!(group = %id, "cannot clear overrides on unknown group");
            return false;
        };
        if !group.members.is_registered(source) {
            error!(group = %id, source = %source, "override source is not a member of the group");
            return false;
        }
        group.overrides.remove(&source).is_some()
    }

    /// Returns `true` iff some containing group resolved an active
    /// interactor other than `interactor` on the last Dynamic tick.
    ///
    /// Correct through arbitrary nesting: each level's active
    /// interactor is the actual performing interactor, so comparing
    /// against the querying interactor works at every depth.
    #[must_use]
    pub fn is_blocked_by_interaction_within_group(&self, interactor: InteractorId) -> bool {
        let mut current = self
            .interactors
            .get(&interactor)
            .and_then(|i| i.containing_group);
        while let Some(id) = current {
            let Some(group) = self.groups.get(&id) else {
                break;
            };
            if let Some(active) = group.active_interactor {
                if active != interactor {
                    return true;
                }
            }
            current = group.containing_group;
        }
        false
    }

    fn validate_group_member(&self, id: GroupId, member: GroupMember) -> bool {
        if !self.groups.contains_key(&id) {
            error!(group = %id, "cannot mutate members of unknown group");
            return false;
        }
        let known = match member {
            GroupMember::Interactor(interactor) => self.interactors.contains_key(&interactor),
            GroupMember::Group(group) => self.groups.contains_key(&group),
        };
        if !known {
            error!(group = %id, member = %member, "cannot add unknown member to group");
            return false;
        }
        if let Some(container) = self.structural_container(member) {
            if container != id {
                error!(
                    group = %id,
                    member = %member,
                    containing = %container,
                    "member already belongs to a group; remove it from that group first"
                );
                return false;
            }
        }
        if let GroupMember::Group(sub) = member {
            if self.has_dependency_on_group(sub, id) {
                error!(
                    group = %id,
                    member = %member,
                    "adding the member would create a containment cycle"
                );
                return false;
            }
        }
        true
    }

    /// The group whose member list contains `member`, considering
    /// pending membership changes.
    fn structural_container(&self, member: GroupMember) -> Option<GroupId> {
        self.groups
            .iter()
            .find(|(_, group)| group.members.is_registered(member))
            .map(|(id, _)| *id)
    }

    /// Returns `true` if `group` is `target` or contains it anywhere in
    /// its member subtree.
    fn has_dependency_on_group(&self, group: GroupId, target: GroupId) -> bool {
        if group == target {
            return true;
        }
        let Some(record) = self.groups.get(&group) else {
            return false;
        };
        let mut members = Vec::new();
        record.members.registered_items(&mut members);
        members
            .into_iter()
            .filter_map(|member| member.group())
            .any(|sub| self.has_dependency_on_group(sub, target))
    }

    fn member_is_or_contains(&self, member: GroupMember, interactor: InteractorId) -> bool {
        match member {
            GroupMember::Interactor(id) => id == interactor,
            GroupMember::Group(id) => {
                let Some(group) = self.groups.get(&id) else {
                    return false;
                };
                let mut members = Vec::new();
                group.members.registered_items(&mut members);
                members
                    .into_iter()
                    .any(|sub| self.member_is_or_contains(sub, interactor))
            }
        }
    }

    fn override_chain_contains(&self, id: GroupId, from: GroupMember, target: GroupMember) -> bool {
        if from == target {
            return true;
        }
        let Some(group) = self.groups.get(&id) else {
            return false;
        };
        group.overrides.get(&from).is_some_and(|set| {
            set.iter()
                .any(|&next| self.override_chain_contains(id, next, target))
        })
    }
}

// Capability checks.
impl InteractionManager {
    /// Whether the pair may hover: capability flag, layer overlap, then
    /// the manager and interactable filter chains (each chain fully
    /// invoked).
    #[must_use]
    pub fn can_hover(&self, interactor: InteractorId, interactable: InteractableId) -> bool {
        let (Some(source), Some(target)) = (
            self.interactors.get(&interactor),
            self.interactables.get(&interactable),
        ) else {
            return false;
        };
        source.allow_hover
            && source.layers.overlaps(target.layers)
            && run_filter_chain(&self.hover_filters, interactor, interactable)
            && target.allows_hover(interactor)
    }

    /// Whether the pair may select: capability flag, layer overlap,
    /// then the manager and interactable filter chains.
    #[must_use]
    pub fn can_select(&self, interactor: InteractorId, interactable: InteractableId) -> bool {
        let (Some(source), Some(target)) = (
            self.interactors.get(&interactor),
            self.interactables.get(&interactable),
        ) else {
            return false;
        };
        source.allow_select
            && source.layers.overlaps(target.layers)
            && run_filter_chain(&self.select_filters, interactor, interactable)
            && target.allows_select(interactor)
    }

    /// Whether the pair may hold focus: the interactable's focus mode
    /// accepts focus and the layers overlap.
    #[must_use]
    pub fn can_focus(&self, interactor: InteractorId, interactable: InteractableId) -> bool {
        let (Some(source), Some(target)) = (
            self.interactors.get(&interactor),
            self.interactables.get(&interactable),
        ) else {
            return false;
        };
        target.focus_mode.accepts_focus() && source.layers.overlaps(target.layers)
    }

    /// The squared distance between a pair, computed by the supplier
    /// under the interactable's configured distance mode.
    ///
    /// Recomputed on every call; nothing is cached across ticks.
    #[must_use]
    pub fn distance_sqr_to_interactor(
        &self,
        supplier: &dyn CandidateSupplier,
        interactor: InteractorId,
        interactable: InteractableId,
    ) -> f32 {
        let mode = self
            .interactables
            .get(&interactable)
            .map(|i| i.distance_mode)
            .unwrap_or_default();
        supplier.distance_sqr(interactor, interactable, mode)
    }

    /// The interactor's post-filter candidate list, pruned of
    /// interactables that are no longer registered at read time.
    #[must_use]
    pub fn valid_targets(&self, interactor: InteractorId) -> Vec<InteractableId> {
        let Some(source) = self.interactors.get(&interactor) else {
            return Vec::new();
        };
        source
            .valid_targets
            .iter()
            .copied()
            .filter(|target| self.interactable_registry.is_registered(*target))
            .collect()
    }
}

// Hover/select/focus transitions.
impl InteractionManager {
    /// Commits a selection, resolving an existing selection first.
    ///
    /// Re-selecting by the same interactor is ignored. On a Single-mode
    /// interactable the prior selectors exit before the new selection
    /// commits, so observers always see the deselect first. A committed
    /// selection grants focus to the interactor's scope.
    pub fn select_enter(&mut self, interactor: InteractorId, interactable: InteractableId) {
        let Some(target) = self.interactables.get(&interactable) else {
            return;
        };
        if target.selecting.contains(&interactor) {
            return;
        }
        if target.is_selected() && target.select_mode == SelectMode::Single {
            let holders = target.selecting.clone();
            for holder in holders.into_iter().rev() {
                self.select_exit(holder, interactable, false);
            }
        }
        if let Some(source) = self.interactors.get_mut(&interactor) {
            source.selected.push(interactable);
        }
        if let Some(target) = self.interactables.get_mut(&interactable) {
            target.selecting.push(interactor);
        }
        self.events.push(InteractionEvent::SelectEntered {
            interactor,
            interactable,
        });
        self.focus_enter(interactor, interactable);
    }

    /// Releases a selection. No event fires when the pair was not
    /// selecting.
    pub fn select_exit(
        &mut self,
        interactor: InteractorId,
        interactable: InteractableId,
        canceled: bool,
    ) {
        let mut was_selecting = false;
        if let Some(source) = self.interactors.get_mut(&interactor) {
            if let Some(pos) = source.selected.iter().position(|&i| i == interactable) {
                source.selected.remove(pos);
                was_selecting = true;
            }
        }
        if let Some(target) = self.interactables.get_mut(&interactable) {
            if let Some(pos) = target.selecting.iter().position(|&i| i == interactor) {
                target.selecting.remove(pos);
                was_selecting = true;
            }
        }
        if was_selecting {
            self.events.push(InteractionEvent::SelectExited {
                interactor,
                interactable,
                canceled,
            });
        }
    }

    /// Commits a hover. Re-hovering by the same interactor is ignored.
    pub fn hover_enter(&mut self, interactor: InteractorId, interactable: InteractableId) {
        let Some(target) = self.interactables.get(&interactable) else {
            return;
        };
        if target.hovering.contains(&interactor) {
            return;
        }
        if let Some(source) = self.interactors.get_mut(&interactor) {
            source.hovered.push(interactable);
        }
        if let Some(target) = self.interactables.get_mut(&interactable) {
            target.hovering.push(interactor);
        }
        self.events.push(InteractionEvent::HoverEntered {
            interactor,
            interactable,
        });
    }

    /// Ends a hover. No event fires when the pair was not hovering.
    pub fn hover_exit(
        &mut self,
        interactor: InteractorId,
        interactable: InteractableId,
        canceled: bool,
    ) {
        let mut was_hovering = false;
        if let Some(source) = self.interactors.get_mut(&interactor) {
            if let Some(pos) = source.hovered.iter().position(|&i| i == interactable) {
                source.hovered.remove(pos);
                was_hovering = true;
            }
        }
        if let Some(target) = self.interactables.get_mut(&interactable) {
            if let Some(pos) = target.hovering.iter().position(|&i| i == interactor) {
                target.hovering.remove(pos);
                was_hovering = true;
            }
        }
        if was_hovering {
            self.events.push(InteractionEvent::HoverExited {
                interactor,
                interactable,
                canceled,
            });
        }
    }

    /// Grants focus of an interactable to the interactor's scope.
    ///
    /// A grouped interactor focuses on behalf of its immediate
    /// containing group; an ungrouped interactor is its own scope. On a
    /// Single-mode interactable any other focusing scope exits first.
    /// `FocusMode::None` refuses focus entirely.
    fn focus_enter(&mut self, interactor: InteractorId, interactable: InteractableId) {
        let Some(target) = self.interactables.get(&interactable) else {
            return;
        };
        if !target.focus_mode.accepts_focus() {
            return;
        }
        let single = target.focus_mode.is_single();
        let scope = self.focus_scope_of(interactor);
        if let Some(state) = self.focus_scopes.get(&scope) {
            if state.interactable == interactable {
                return;
            }
            // The scope is moving to a new interactable.
            self.focus_exit_scope(scope, false);
        }
        if single {
            let others: Vec<_> = self
                .interactables
                .get(&interactable)
                .map(|i| i.focusing.clone())
                .unwrap_or_default();
            for other in others {
                self.focus_exit_scope(other, false);
            }
        }
        self.focus_scopes.insert(
            scope,
            FocusState {
                interactor,
                interactable,
            },
        );
        if let Some(target) = self.interactables.get_mut(&interactable) {
            target.focusing.push(scope);
        }
        self.events.push(InteractionEvent::FocusEntered {
            interactor,
            interactable,
            scope,
        });
    }

    fn focus_exit_scope(&mut self, scope: FocusScope, canceled: bool) {
        let Some(state) = self.focus_scopes.remove(&scope) else {
            return;
        };
        if let Some(target) = self.interactables.get_mut(&state.interactable) {
            target.focusing.retain(|s| *s != scope);
        }
        self.events.push(InteractionEvent::FocusExited {
            interactor: Some(state.interactor),
            interactable: state.interactable,
            scope,
            canceled,
        });
    }

    fn cancel_interactor_focus(&mut self, interactor: InteractorId) {
        let scopes: Vec<_> = self
            .focus_scopes
            .iter()
            .filter(|(_, state)| state.interactor == interactor)
            .map(|(scope, _)| *scope)
            .collect();
        for scope in scopes {
            self.focus_exit_scope(scope, true);
        }
    }

    fn focus_scope_of(&self, interactor: InteractorId) -> FocusScope {
        match self
            .interactors
            .get(&interactor)
            .and_then(|i| i.containing_group)
        {
            Some(group) => FocusScope::Group(group),
            None => FocusScope::Solo(interactor),
        }
    }
}

// Update pipeline.
impl InteractionManager {
    /// Runs one update tick for the given phase.
    ///
    /// Every phase flushes registration lists and runs the supplier's
    /// per-interactor hooks (gated by each interactor's phase mask).
    /// `Dynamic` additionally runs the full interaction pipeline.
    pub fn update(&mut self, phase: UpdatePhase, supplier: &mut dyn CandidateSupplier) {
        self.flush_registration();
        let interactors: Vec<_> = self.interactor_registry.snapshot().to_vec();
        for &interactor in &interactors {
            if self.phase_enabled(interactor, phase) {
                supplier.pre_process(interactor, phase);
            }
        }
        if phase == UpdatePhase::Dynamic {
            self.collect_candidates(supplier, &interactors);
            self.clear_stale_group_focus();
            let groups: Vec<_> = self.group_registry.snapshot().to_vec();
            for group in groups {
                if self.grouped_groups.contains(&group)
                    || !self.group_registry.is_still_registered(group)
                {
                    continue;
                }
                let pre = self.resolve_pre_prioritized(group);
                self.update_group_members(group, pre);
            }
            for &interactor in &interactors {
                if self.grouped_interactors.contains(&interactor)
                    || !self.interactor_registry.is_still_registered(interactor)
                {
                    continue;
                }
                self.clear_stale_focus(FocusScope::Solo(interactor));
                self.clear_interactor_selection(interactor);
                self.clear_interactor_hover(interactor);
                self.interactor_select_valid_targets(interactor);
                self.interactor_hover_valid_targets(interactor);
            }
            self.process_interaction_strength();
        }
        for &interactor in &interactors {
            if self.phase_enabled(interactor, phase) {
                supplier.process(interactor, phase);
            }
        }
    }

    fn phase_enabled(&self, interactor: InteractorId, phase: UpdatePhase) -> bool {
        self.interactors
            .get(&interactor)
            .is_some_and(|i| i.phases.includes(phase))
    }

    fn flush_registration(&mut self) {
        self.interactor_registry.flush();
        self.interactable_registry.flush();
        self.group_registry.flush();
        for group in self.groups.values_mut() {
            group.members.flush();
        }
    }

    fn collect_candidates(
        &mut self,
        supplier: &mut dyn CandidateSupplier,
        interactors: &[InteractorId],
    ) {
        let mut raw = Vec::new();
        let mut filtered = Vec::new();
        for &interactor in interactors {
            supplier.candidates(interactor, &mut raw);
            filtered.clear();
            match self.interactors.get(&interactor) {
                Some(source) => match source.target_filter() {
                    Some(filter) if filter.can_process() => {
                        filter.process(interactor, &raw, &mut filtered);
                    }
                    _ => filtered.extend_from_slice(&raw),
                },
                None => continue,
            }
            if let Some(source) = self.interactors.get_mut(&interactor) {
                std::mem::swap(&mut source.valid_targets, &mut filtered);
            }
        }
    }

    /// Exits a scope's focus when its interactor is select-capable yet
    /// no longer selecting the focused interactable, or the pair can no
    /// longer focus at all.
    fn clear_stale_focus(&mut self, scope: FocusScope) {
        let Some(state) = self.focus_scopes.get(&scope) else {
            return;
        };
        let (interactor, interactable) = (state.interactor, state.interactable);
        let stale = self.interactors.get(&interactor).is_some_and(|source| {
            source.allow_select && !source.is_selecting(interactable)
        });
        if stale || !self.can_focus(interactor, interactable) {
            self.focus_exit_scope(scope, false);
        }
    }

    fn clear_stale_group_focus(&mut self) {
        let groups: Vec<_> = self.group_registry.snapshot().to_vec();
        for group in groups {
            self.clear_stale_focus(FocusScope::Group(group));
        }
    }

    fn clear_interactor_selection(&mut self, interactor: InteractorId) {
        let Some(source) = self.interactors.get(&interactor) else {
            return;
        };
        let keep = source.keep_selected_target_valid;
        let selected = source.selected.clone();
        let valid = self.valid_targets(interactor);
        for interactable in selected.into_iter().rev() {
            if !self.can_select(interactor, interactable)
                || (!keep && !valid.contains(&interactable))
            {
                self.select_exit(interactor, interactable, false);
            }
        }
    }

    fn clear_interactor_hover(&mut self, interactor: InteractorId) {
        let Some(source) = self.interactors.get(&interactor) else {
            return;
        };
        let hovered = source.hovered.clone();
        let valid = self.valid_targets(interactor);
        for interactable in hovered.into_iter().rev() {
            if !self.can_hover(interactor, interactable) || !valid.contains(&interactable) {
                self.hover_exit(interactor, interactable, false);
            }
        }
    }

    fn interactor_select_valid_targets(&mut self, interactor: InteractorId) {
        for interactable in self.valid_targets(interactor) {
            let selecting = self
                .interactors
                .get(&interactor)
                .is_some_and(|i| i.is_selecting(interactable));
            if !selecting && self.can_select(interactor, interactable) {
                self.select_enter(interactor, interactable);
            }
        }
    }

    fn interactor_hover_valid_targets(&mut self, interactor: InteractorId) {
        for interactable in self.valid_targets(interactor) {
            let hovering = self
                .interactors
                .get(&interactor)
                .is_some_and(|i| i.is_hovering(interactable));
            if !hovering && self.can_hover(interactor, interactable) {
                self.hover_enter(interactor, interactable);
            }
        }
    }

    /// Recomputes interaction strengths for every registered
    /// interactable: base 1.0 per selecting interactor, 0.0 per
    /// merely-hovering interactor, run through the interactable's
    /// strength chain. Nothing carries over from the previous tick.
    fn process_interaction_strength(&mut self) {
        let ids: Vec<_> = self.interactable_registry.snapshot().to_vec();
        for id in ids {
            let Some(target) = self.interactables.get(&id) else {
                continue;
            };
            let mut strengths = HashMap::new();
            for &interactor in &target.selecting {
                strengths.insert(interactor, target.process_strength(interactor, 1.0));
            }
            for &interactor in &target.hovering {
                if !strengths.contains_key(&interactor) {
                    strengths.insert(interactor, target.process_strength(interactor, 0.0));
                }
            }
            if let Some(target) = self.interactables.get_mut(&id) {
                target.strengths = strengths;
            }
        }
    }
}

// Group arbitration.
impl InteractionManager {
    /// Scans a group's members in priority order, letting exactly one
    /// interactor interact and tearing down the rest.
    ///
    /// Every level consults its own override edges first: a winning
    /// override member replaces the pre-prioritized interactor handed
    /// down by the containing group, so an edge configured on a nested
    /// group fires even while an outer member holds priority.
    ///
    /// Returns the interactor that performed interaction, which also
    /// becomes the group's active interactor. Members with pending
    /// unregistration or not registered with the manager are skipped
    /// and never block lower-priority members.
    fn update_group_members(
        &mut self,
        id: GroupId,
        mut pre_prioritized: Option<InteractorId>,
    ) -> Option<InteractorId> {
        if let Some(overrider) = self.should_override_active_interaction(id) {
            pre_prioritized = Some(overrider);
        }
        let members: Vec<_> = self
            .groups
            .get(&id)
            .map(|g| g.members.snapshot().to_vec())
            .unwrap_or_default();
        let mut performed = None;
        for member in members {
            let still = self
                .groups
                .get(&id)
                .is_some_and(|g| g.members.is_still_registered(member));
            if !still {
                continue;
            }
            match member {
                GroupMember::Interactor(interactor) => {
                    if !self.interactor_registry.is_registered(interactor) {
                        continue;
                    }
                    let prevent =
                        pre_prioritized.is_some() && pre_prioritized != Some(interactor);
                    if self.update_interactor_interactions(interactor, prevent) {
                        performed = Some(interactor);
                        pre_prioritized = Some(interactor);
                    }
                }
                GroupMember::Group(sub) => {
                    if !self.group_registry.is_registered(sub) {
                        continue;
                    }
                    if let Some(winner) = self.update_group_members(sub, pre_prioritized) {
                        performed = Some(winner);
                        pre_prioritized = Some(winner);
                    }
                }
            }
        }
        if let Some(group) = self.groups.get_mut(&id) {
            group.active_interactor = performed;
        }
        performed
    }

    /// Runs one member interactor's tick. A prevented member tears down
    /// all of its selections and hovers and commits nothing.
    fn update_interactor_interactions(&mut self, interactor: InteractorId, prevent: bool) -> bool {
        if prevent {
            let selected: Vec<_> = self
                .interactors
                .get(&interactor)
                .map(|i| i.selected.clone())
                .unwrap_or_default();
            for interactable in selected.into_iter().rev() {
                self.select_exit(interactor, interactable, false);
            }
            let hovered: Vec<_> = self
                .interactors
                .get(&interactor)
                .map(|i| i.hovered.clone())
                .unwrap_or_default();
            for interactable in hovered.into_iter().rev() {
                self.hover_exit(interactor, interactable, false);
            }
            return false;
        }
        self.clear_interactor_selection(interactor);
        self.clear_interactor_hover(interactor);
        self.interactor_select_valid_targets(interactor);
        self.interactor_hover_valid_targets(interactor);
        self.interactors
            .get(&interactor)
            .is_some_and(|i| i.has_interaction())
    }

    /// Resolves the interactor that holds priority before the member
    /// scan: the previous active interactor while it can start or
    /// continue any select. The override probe runs separately, per
    /// level, inside [`update_group_members`](Self::update_group_members).
    fn resolve_pre_prioritized(&self, id: GroupId) -> Option<InteractorId> {
        let active = self.groups.get(&id)?.active_interactor?;
        if self.interactor_registry.is_registered(active)
            && self.can_start_or_continue_any_select(active)
        {
            Some(active)
        } else {
            None
        }
    }

    /// While `keep_selected_target_valid` is set, a held selection that
    /// is still selectable keeps the holder prioritized even with no
    /// valid target; otherwise priority requires a selectable valid
    /// target.
    fn can_start_or_continue_any_select(&self, interactor: InteractorId) -> bool {
        let Some(source) = self.interactors.get(&interactor) else {
            return false;
        };
        if source.keep_selected_target_valid {
            for &interactable in &source.selected {
                if self.can_select(interactor, interactable) {
                    return true;
                }
            }
        }
        self.valid_targets(interactor)
            .into_iter()
            .any(|interactable| self.can_select(interactor, interactable))
    }

    /// Probes the override members configured for whichever group
    /// member is or contains the active interactor, in member-priority
    /// order. Select filters gate the probe; hover filters do not.
    /// Members no longer registered with the manager never win.
    fn should_override_active_interaction(&self, id: GroupId) -> Option<InteractorId> {
        let active = self.groups.get(&id)?.active_interactor?;
        if !self.interactor_registry.is_registered(active) {
            return None;
        }
        let source = self.member_containing_interactor(id, active)?;
        let group = self.groups.get(&id)?;
        let overriders = group.overrides.get(&source)?;
        if overriders.is_empty() {
            return None;
        }
        for &member in group.members.snapshot() {
            if !overriders.contains(&member) {
                continue;
            }
            match member {
                GroupMember::Interactor(interactor) => {
                    if self.interactor_registry.is_registered(interactor)
                        && self.should_interactor_override(interactor, active)
                    {
                        return Some(interactor);
                    }
                }
                GroupMember::Group(sub) => {
                    if !self.group_registry.is_registered(sub) {
                        continue;
                    }
                    if let Some(winner) = self.any_member_override(sub, active) {
                        return Some(winner);
                    }
                }
            }
        }
        None
    }

    /// Walks the active interactor's containment chain up to the member
    /// of this group that holds it.
    fn member_containing_interactor(
        &self,
        id: GroupId,
        active: InteractorId,
    ) -> Option<GroupMember> {
        let mut current = GroupMember::Interactor(active);
        let mut container = self
            .interactors
            .get(&active)
            .and_then(|i| i.containing_group);
        while let Some(group) = container {
            if group == id {
                return Some(current);
            }
            current = GroupMember::Group(group);
            container = self.groups.get(&group).and_then(|g| g.containing_group);
        }
        error!(
            group = %id,
            interactor = %active,
            "active interactor is not contained within the group"
        );
        None
    }

    /// An override interactor wins iff it can select at least one
    /// interactable the active interactor is currently selecting or
    /// hovering.
    fn should_interactor_override(&self, overrider: InteractorId, active: InteractorId) -> bool {
        let Some(holder) = self.interactors.get(&active) else {
            return false;
        };
        self.valid_targets(overrider).into_iter().any(|target| {
            (holder.is_selecting(target) || holder.is_hovering(target))
                && self.can_select(overrider, target)
        })
    }

    fn any_member_override(&self, id: GroupId, active: InteractorId) -> Option<InteractorId> {
        let group = self.groups.get(&id)?;
        for &member in group.members.snapshot() {
            match member {
                GroupMember::Interactor(interactor) => {
                    if self.interactor_registry.is_registered(interactor)
                        && self.should_interactor_override(interactor, active)
                    {
                        return Some(interactor);
                    }
                }
                GroupMember::Group(sub) => {
                    if !self.group_registry.is_registered(sub) {
                        continue;
                    }
                    if let Some(winner) = self.any_member_override(sub, active) {
                        return Some(winner);
                    }
                }
            }
        }
        None
    }
}

impl Default for InteractionManager {
    fn default() -> Self {
        Self::new()
    }
}
