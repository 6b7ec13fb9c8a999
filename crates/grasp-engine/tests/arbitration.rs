//! End-to-end arbitration scenarios driven through the manager.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use grasp_engine::testing::{CountingFilter, ScalingStrengthFilter, ScriptedSupplier};
use grasp_engine::{
    FocusMode, FocusScope, Group, GroupMember, Interactable, InteractionEvent, InteractionManager,
    Interactor, SelectMode, UpdatePhase,
};
use grasp_filter::testing::MockEvaluator;
use grasp_filter::TargetFilter;

fn tick(manager: &mut InteractionManager, supplier: &mut ScriptedSupplier) {
    manager.update(UpdatePhase::Dynamic, supplier);
}

#[test]
fn priority_scan_activates_highest_priority_member() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let group = manager.add_group(Group::new());
    let members: Vec<_> = (0..3)
        .map(|_| manager.add_interactor(Interactor::new()))
        .collect();
    for &member in &members {
        manager.add_group_member(group, GroupMember::Interactor(member));
    }
    let interactable = manager.add_interactable(Interactable::new());
    for &member in &members {
        supplier.set_candidates(member, vec![interactable]);
    }

    tick(&mut manager, &mut supplier);

    assert_eq!(
        manager.group(group).unwrap().active_interactor(),
        Some(members[0])
    );
    assert!(manager.interactor(members[0]).unwrap().is_hovering(interactable));
    assert!(!manager.interactor(members[1]).unwrap().has_interaction());
    assert!(!manager.interactor(members[2]).unwrap().has_interaction());

    // Removing the active member promotes the next priority.
    manager.remove_group_member(group, GroupMember::Interactor(members[0]));
    supplier.clear_candidates(members[0]);
    tick(&mut manager, &mut supplier);

    assert_eq!(
        manager.group(group).unwrap().active_interactor(),
        Some(members[1])
    );
    assert!(manager.interactor(members[1]).unwrap().is_hovering(interactable));
}

#[test]
fn unregistered_member_does_not_block_lower_priority() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let group = manager.add_group(Group::new());
    let first = manager.add_interactor(Interactor::new());
    let second = manager.add_interactor(Interactor::new());
    manager.add_group_member(group, GroupMember::Interactor(first));
    manager.add_group_member(group, GroupMember::Interactor(second));
    let interactable = manager.add_interactable(Interactable::new());
    supplier.set_candidates(first, vec![interactable]);
    supplier.set_candidates(second, vec![interactable]);

    manager.unregister_interactor(first);
    tick(&mut manager, &mut supplier);

    assert_eq!(
        manager.group(group).unwrap().active_interactor(),
        Some(second)
    );
}

#[test]
fn reordering_members_changes_priority() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let group = manager.add_group(Group::new());
    // Hover-only members, so no held selection pins the active slot.
    let first = manager.add_interactor(Interactor::new().without_select());
    let second = manager.add_interactor(Interactor::new().without_select());
    manager.add_group_member(group, GroupMember::Interactor(first));
    manager.add_group_member(group, GroupMember::Interactor(second));
    let interactable = manager.add_interactable(Interactable::new());
    supplier.set_candidates(first, vec![interactable]);
    supplier.set_candidates(second, vec![interactable]);

    tick(&mut manager, &mut supplier);
    assert_eq!(
        manager.group(group).unwrap().active_interactor(),
        Some(first)
    );

    assert!(manager.move_group_member_to(group, GroupMember::Interactor(second), 0));
    tick(&mut manager, &mut supplier);
    assert_eq!(
        manager.group(group).unwrap().active_interactor(),
        Some(second)
    );
}

#[test]
fn override_preempts_only_when_sharing_a_target() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let group = manager.add_group(Group::new());
    let holder = manager.add_interactor(Interactor::new());
    let overrider = manager.add_interactor(Interactor::new().releasing_invalid_targets());
    manager.add_group_member(group, GroupMember::Interactor(holder));
    manager.add_group_member(group, GroupMember::Interactor(overrider));
    assert!(manager.add_interaction_override(
        group,
        GroupMember::Interactor(holder),
        GroupMember::Interactor(overrider),
    ));

    let shared = manager.add_interactable(Interactable::new());
    let other = manager.add_interactable(Interactable::new());
    supplier.set_candidates(holder, vec![shared]);

    tick(&mut manager, &mut supplier);
    assert!(manager.interactor(holder).unwrap().is_selecting(shared));

    // A candidate the holder is not interacting with grants nothing.
    supplier.set_candidates(overrider, vec![other]);
    tick(&mut manager, &mut supplier);
    assert!(manager.interactor(holder).unwrap().is_selecting(shared));
    assert!(!manager.interactor(overrider).unwrap().has_interaction());

    // Gaining the holder's target pre-empts in the same tick.
    supplier.set_candidates(overrider, vec![shared, other]);
    tick(&mut manager, &mut supplier);
    assert!(!manager.interactor(holder).unwrap().is_selecting(shared));
    assert!(manager.interactor(overrider).unwrap().is_selecting(shared));
    assert_eq!(
        manager.group(group).unwrap().active_interactor(),
        Some(overrider)
    );

    // Losing every target hands interaction back to the holder.
    supplier.clear_candidates(overrider);
    tick(&mut manager, &mut supplier);
    assert!(manager.interactor(holder).unwrap().is_selecting(shared));
    assert!(!manager.interactor(overrider).unwrap().has_interaction());
    assert_eq!(
        manager.group(group).unwrap().active_interactor(),
        Some(holder)
    );
}

#[test]
fn override_probe_is_gated_by_select_filters() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let group = manager.add_group(Group::new());
    let holder = manager.add_interactor(Interactor::new());
    let overrider = manager.add_interactor(Interactor::new());
    manager.add_group_member(group, GroupMember::Interactor(holder));
    manager.add_group_member(group, GroupMember::Interactor(overrider));
    manager.add_interaction_override(
        group,
        GroupMember::Interactor(holder),
        GroupMember::Interactor(overrider),
    );

    // The shared target refuses selection by anyone but the holder.
    let mut shared = Interactable::new();
    let holder_only = holder;
    shared.add_select_filter(Box::new(SelectOnly(holder_only)));
    let shared = manager.add_interactable(shared);
    supplier.set_candidates(holder, vec![shared]);

    tick(&mut manager, &mut supplier);
    assert!(manager.interactor(holder).unwrap().is_selecting(shared));

    supplier.set_candidates(overrider, vec![shared]);
    tick(&mut manager, &mut supplier);

    // The overrider shares the target but cannot select it, so the
    // holder keeps its interaction.
    assert!(manager.interactor(holder).unwrap().is_selecting(shared));
    assert_eq!(
        manager.group(group).unwrap().active_interactor(),
        Some(holder)
    );
}

#[test]
fn unregistered_overrider_cannot_preempt() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let group = manager.add_group(Group::new());
    let holder = manager.add_interactor(Interactor::new());
    let overrider = manager.add_interactor(Interactor::new());
    manager.add_group_member(group, GroupMember::Interactor(holder));
    manager.add_group_member(group, GroupMember::Interactor(overrider));
    manager.add_interaction_override(
        group,
        GroupMember::Interactor(holder),
        GroupMember::Interactor(overrider),
    );

    let shared = manager.add_interactable(Interactable::new());
    supplier.set_candidates(holder, vec![shared]);
    supplier.set_candidates(overrider, vec![shared]);

    tick(&mut manager, &mut supplier);
    assert!(manager.interactor(holder).unwrap().is_selecting(shared));

    // The overrider leaves with a candidate list still naming the
    // shared target; it must not win the probe from the sidelines.
    manager.unregister_interactor(overrider);
    tick(&mut manager, &mut supplier);

    assert!(manager.interactor(holder).unwrap().is_selecting(shared));
    assert!(!manager.interactor(overrider).unwrap().has_interaction());
    assert_eq!(
        manager.group(group).unwrap().active_interactor(),
        Some(holder)
    );
}

struct SelectOnly(grasp_engine::InteractorId);

impl grasp_engine::InteractionFilter for SelectOnly {
    fn allow(
        &self,
        interactor: grasp_engine::InteractorId,
        _interactable: grasp_engine::InteractableId,
    ) -> bool {
        interactor == self.0
    }
}

#[test]
fn kept_selection_defers_preemption_until_the_target_is_lost() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let group = manager.add_group(Group::new());
    // The lower-priority holder keeps its selected target valid.
    let challenger = manager.add_interactor(Interactor::new());
    let holder = manager.add_interactor(Interactor::new());
    manager.add_group_member(group, GroupMember::Interactor(challenger));
    manager.add_group_member(group, GroupMember::Interactor(holder));

    let interactable = manager.add_interactable(Interactable::new());
    supplier.set_candidates(holder, vec![interactable]);

    tick(&mut manager, &mut supplier);
    assert_eq!(
        manager.group(group).unwrap().active_interactor(),
        Some(holder)
    );

    // The holder loses its candidate but the held selection is still
    // selectable, so the higher-priority challenger stays blocked.
    supplier.clear_candidates(holder);
    supplier.set_candidates(challenger, vec![interactable]);
    tick(&mut manager, &mut supplier);
    assert!(manager.interactor(holder).unwrap().is_selecting(interactable));
    assert!(!manager.interactor(challenger).unwrap().has_interaction());

    // Releasing the hold lets priority win again.
    manager.interactor_mut(holder).unwrap().keep_selected_target_valid = false;
    tick(&mut manager, &mut supplier);
    assert!(!manager.interactor(holder).unwrap().has_interaction());
    assert!(manager
        .interactor(challenger)
        .unwrap()
        .is_selecting(interactable));
}

#[test]
fn single_select_eviction_exits_before_entering() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let first = manager.add_interactor(Interactor::new());
    let second = manager.add_interactor(Interactor::new());
    let interactable = manager.add_interactable(Interactable::new());
    supplier.set_candidates(first, vec![interactable]);
    supplier.set_candidates(second, vec![interactable]);
    manager.drain_events();

    tick(&mut manager, &mut supplier);

    let target = manager.interactable(interactable).unwrap();
    assert_eq!(target.interactors_selecting(), &[second]);

    let events = manager.drain_events();
    let exit = events
        .iter()
        .position(|e| {
            matches!(e, InteractionEvent::SelectExited { interactor, .. } if *interactor == first)
        })
        .expect("first interactor's eviction");
    let enter = events
        .iter()
        .position(|e| {
            matches!(e, InteractionEvent::SelectEntered { interactor, .. } if *interactor == second)
        })
        .expect("second interactor's selection");
    assert!(exit < enter, "deselect must be observable before the new select");
}

#[test]
fn group_disable_releases_members_and_reenable_restarts() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let group = manager.add_group(Group::new());
    let first = manager.add_interactor(Interactor::new());
    let second = manager.add_interactor(Interactor::new());
    manager.add_group_member(group, GroupMember::Interactor(first));
    manager.add_group_member(group, GroupMember::Interactor(second));
    let interactable =
        manager.add_interactable(Interactable::new().with_select_mode(SelectMode::Multiple));
    supplier.set_candidates(first, vec![interactable]);
    supplier.set_candidates(second, vec![interactable]);

    tick(&mut manager, &mut supplier);
    assert!(!manager.interactor(second).unwrap().has_interaction());
    manager.drain_events();

    // Disabling the group releases both members as independent.
    manager.unregister_group(group);
    let events = manager.drain_events();
    let released = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                InteractionEvent::InteractorRegistered {
                    containing_group: None,
                    ..
                }
            )
        })
        .count();
    assert_eq!(released, 2);
    // Interaction state restarts from scratch.
    assert!(!manager.interactor(first).unwrap().has_interaction());
    assert!(manager.interactor(first).unwrap().containing_group().is_none());

    tick(&mut manager, &mut supplier);
    assert!(manager.interactor(first).unwrap().is_hovering(interactable));
    assert!(manager.interactor(second).unwrap().is_hovering(interactable));

    // Re-enabling claims the members back and arbitration resumes.
    manager.register_group(group);
    let events = manager.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        InteractionEvent::InteractorRegistered {
            containing_group: Some(g),
            ..
        } if *g == group
    )));
    assert!(!manager.interactor(first).unwrap().has_interaction());

    tick(&mut manager, &mut supplier);
    assert!(manager.interactor(first).unwrap().is_hovering(interactable));
    assert!(!manager.interactor(second).unwrap().has_interaction());
}

#[test]
fn nested_group_blocking_answers_through_depth() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let parent = manager.add_group(Group::new());
    let child = manager.add_group(Group::new());
    let outer = manager.add_interactor(Interactor::new().releasing_invalid_targets());
    let inner = manager.add_interactor(Interactor::new().releasing_invalid_targets());
    manager.add_group_member(parent, GroupMember::Interactor(outer));
    manager.add_group_member(parent, GroupMember::Group(child));
    manager.add_group_member(child, GroupMember::Interactor(inner));

    let interactable = manager.add_interactable(Interactable::new());
    supplier.set_candidates(outer, vec![interactable]);
    supplier.set_candidates(inner, vec![interactable]);

    tick(&mut manager, &mut supplier);
    assert_eq!(
        manager.group(parent).unwrap().active_interactor(),
        Some(outer)
    );
    assert!(manager.is_blocked_by_interaction_within_group(inner));
    assert!(!manager.is_blocked_by_interaction_within_group(outer));

    // The nested member takes over once the outer member goes idle.
    supplier.clear_candidates(outer);
    tick(&mut manager, &mut supplier);
    assert_eq!(
        manager.group(parent).unwrap().active_interactor(),
        Some(inner)
    );
    assert_eq!(
        manager.group(child).unwrap().active_interactor(),
        Some(inner)
    );
    assert!(manager.is_blocked_by_interaction_within_group(outer));
    assert!(!manager.is_blocked_by_interaction_within_group(inner));
}

#[test]
fn nested_group_override_preempts_the_holder() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let parent = manager.add_group(Group::new());
    let child = manager.add_group(Group::new());
    let holder = manager.add_interactor(Interactor::new());
    let overrider = manager.add_interactor(Interactor::new());
    manager.add_group_member(parent, GroupMember::Group(child));
    manager.add_group_member(child, GroupMember::Interactor(holder));
    manager.add_group_member(child, GroupMember::Interactor(overrider));
    // The edge lives on the nested group, not the top-level one.
    assert!(manager.add_interaction_override(
        child,
        GroupMember::Interactor(holder),
        GroupMember::Interactor(overrider),
    ));

    let shared = manager.add_interactable(Interactable::new());
    supplier.set_candidates(holder, vec![shared]);

    tick(&mut manager, &mut supplier);
    assert!(manager.interactor(holder).unwrap().is_selecting(shared));
    assert_eq!(
        manager.group(parent).unwrap().active_interactor(),
        Some(holder)
    );

    supplier.set_candidates(overrider, vec![shared]);
    tick(&mut manager, &mut supplier);

    assert!(!manager.interactor(holder).unwrap().is_selecting(shared));
    assert!(manager.interactor(overrider).unwrap().is_selecting(shared));
    assert_eq!(
        manager.group(child).unwrap().active_interactor(),
        Some(overrider)
    );
    assert_eq!(
        manager.group(parent).unwrap().active_interactor(),
        Some(overrider)
    );
}

#[test]
fn group_membership_round_trip() {
    let mut manager = InteractionManager::new();
    let first = manager.add_group(Group::new());
    let second = manager.add_group(Group::new());
    let interactor = manager.add_interactor(Interactor::new());
    let member = GroupMember::Interactor(interactor);

    assert!(manager.add_group_member(first, member));
    assert!(manager.contains_group_member(first, member));
    assert_eq!(
        manager.interactor(interactor).unwrap().containing_group(),
        Some(first)
    );

    // A member of one group cannot join another.
    assert!(!manager.add_group_member(second, member));
    assert!(!manager.contains_group_member(second, member));

    assert!(manager.remove_group_member(first, member));
    assert!(!manager.contains_group_member(first, member));
    assert!(manager.interactor(interactor).unwrap().containing_group().is_none());

    // Removal makes it eligible again.
    assert!(manager.add_group_member(second, member));
    assert_eq!(
        manager.interactor(interactor).unwrap().containing_group(),
        Some(second)
    );
}

#[test]
fn containment_cycles_are_rejected_with_one_error_each() {
    let errors = Arc::new(AtomicUsize::new(0));
    let subscriber = ErrorCountingSubscriber {
        errors: Arc::clone(&errors),
    };

    tracing::subscriber::with_default(subscriber, || {
        let mut manager = InteractionManager::new();
        let a = manager.add_group(Group::new());
        let b = manager.add_group(Group::new());

        // Self-containment.
        assert!(!manager.add_group_member(a, GroupMember::Group(a)));
        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert!(!manager.contains_group_member(a, GroupMember::Group(a)));

        // Mutual containment.
        assert!(manager.add_group_member(a, GroupMember::Group(b)));
        assert!(!manager.add_group_member(b, GroupMember::Group(a)));
        assert_eq!(errors.load(Ordering::SeqCst), 2);
        assert!(!manager.contains_group_member(b, GroupMember::Group(a)));
    });
}

#[test]
fn override_cycles_and_self_overrides_are_rejected() {
    let mut manager = InteractionManager::new();
    let group = manager.add_group(Group::new());
    let a = GroupMember::Interactor(manager.add_interactor(Interactor::new()));
    let b = GroupMember::Interactor(manager.add_interactor(Interactor::new()));
    let outsider = GroupMember::Interactor(manager.add_interactor(Interactor::new()));
    manager.add_group_member(group, a);
    manager.add_group_member(group, b);

    assert!(!manager.add_interaction_override(group, a, a));
    assert!(!manager.add_interaction_override(group, a, outsider));

    assert!(manager.add_interaction_override(group, a, b));
    // The reverse edge would allow mutual pre-emption.
    assert!(!manager.add_interaction_override(group, b, a));

    assert!(manager.remove_interaction_override(group, a, b));
    assert!(!manager.remove_interaction_override(group, a, b));
    assert!(manager.add_interaction_override(group, b, a));
}

#[test]
fn removing_a_member_prunes_its_override_edges() {
    let mut manager = InteractionManager::new();
    let group = manager.add_group(Group::new());
    let a = GroupMember::Interactor(manager.add_interactor(Interactor::new()));
    let b = GroupMember::Interactor(manager.add_interactor(Interactor::new()));
    manager.add_group_member(group, a);
    manager.add_group_member(group, b);
    manager.add_interaction_override(group, a, b);

    manager.remove_group_member(group, b);
    manager.add_group_member(group, b);

    // The stale edge is gone, so the reverse direction is legal now.
    assert!(manager.add_interaction_override(group, b, a));
}

#[test]
fn hover_filters_all_run_despite_early_denial() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let mut interactable = Interactable::new();
    let deny = CountingFilter::new(false);
    let second = CountingFilter::new(true);
    let third = CountingFilter::new(true);
    let counters = [deny.calls(), second.calls(), third.calls()];
    interactable.add_hover_filter(Box::new(deny));
    interactable.add_hover_filter(Box::new(second));
    interactable.add_hover_filter(Box::new(third));

    let interactor = manager.add_interactor(Interactor::new());
    let interactable = manager.add_interactable(interactable);
    supplier.set_candidates(interactor, vec![interactable]);

    tick(&mut manager, &mut supplier);

    assert!(!manager.interactor(interactor).unwrap().is_hovering(interactable));
    let calls: Vec<_> = counters
        .iter()
        .map(|c| c.load(Ordering::SeqCst))
        .collect();
    assert!(calls[0] > 0);
    assert_eq!(calls[0], calls[1]);
    assert_eq!(calls[1], calls[2]);
}

#[test]
fn target_filter_reranks_candidates() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let near = manager.add_interactable(Interactable::new());
    let far = manager.add_interactable(Interactable::new());

    let mut filter = TargetFilter::new();
    filter.add_evaluator(Box::new(MockEvaluator::scored(move |_, target| {
        if target == near {
            1.0
        } else {
            0.5
        }
    })));
    let mut interactor = Interactor::new();
    interactor.set_target_filter(Some(filter));
    let interactor = manager.add_interactor(interactor);

    // Supplier order favors the far target; the filter reranks.
    supplier.set_candidates(interactor, vec![far, near]);
    tick(&mut manager, &mut supplier);

    assert_eq!(manager.valid_targets(interactor), vec![near, far]);
}

#[test]
fn single_focus_mode_evicts_the_other_scope() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let first = manager.add_interactor(Interactor::new());
    let second = manager.add_interactor(Interactor::new());
    let interactable = manager.add_interactable(
        Interactable::new()
            .with_select_mode(SelectMode::Multiple)
            .with_focus_mode(FocusMode::Single),
    );
    supplier.set_candidates(first, vec![interactable]);
    supplier.set_candidates(second, vec![interactable]);

    tick(&mut manager, &mut supplier);

    // Both select (Multiple), but only the later scope holds focus.
    assert!(manager.interactor(first).unwrap().is_selecting(interactable));
    assert!(manager.interactor(second).unwrap().is_selecting(interactable));
    assert_eq!(manager.focused_interactable(FocusScope::Solo(first)), None);
    assert_eq!(
        manager.focused_interactable(FocusScope::Solo(second)),
        Some(interactable)
    );
    assert_eq!(
        manager.interactable(interactable).unwrap().focusing_scopes(),
        &[FocusScope::Solo(second)]
    );
}

#[test]
fn grouped_focus_is_held_by_the_containing_group() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let group = manager.add_group(Group::new());
    let member = manager.add_interactor(Interactor::new());
    manager.add_group_member(group, GroupMember::Interactor(member));
    let interactable = manager.add_interactable(Interactable::new());
    supplier.set_candidates(member, vec![interactable]);

    tick(&mut manager, &mut supplier);

    assert_eq!(
        manager.focused_interactable(FocusScope::Group(group)),
        Some(interactable)
    );
    assert_eq!(manager.focused_interactable(FocusScope::Solo(member)), None);
}

#[test]
fn strength_chain_applies_during_the_tick() {
    let mut manager = InteractionManager::new();
    let mut supplier = ScriptedSupplier::new();

    let mut interactable = Interactable::new();
    interactable.add_strength_filter(Box::new(ScalingStrengthFilter { factor: 0.5 }));
    let interactor = manager.add_interactor(Interactor::new());
    let interactable = manager.add_interactable(interactable);
    supplier.set_candidates(interactor, vec![interactable]);

    tick(&mut manager, &mut supplier);

    let target = manager.interactable(interactable).unwrap();
    assert_eq!(target.interaction_strength(interactor), 0.5);
    assert_eq!(target.largest_interaction_strength(), 0.5);
}

/// Counts ERROR-level events so tests can assert a rejected mutation
/// logs exactly once.
struct ErrorCountingSubscriber {
    errors: Arc<AtomicUsize>,
}

impl tracing::Subscriber for ErrorCountingSubscriber {
    fn enabled(&self, metadata: &tracing::Metadata<'_>) -> bool {
        *metadata.level() == tracing::Level::ERROR
    }

    fn new_span(&self, _span: &tracing::span::Attributes<'_>) -> tracing::span::Id {
        tracing::span::Id::from_u64(1)
    }

    fn record(&self, _span: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

    fn record_follows_from(&self, _span: &tracing::span::Id, _follows: &tracing::span::Id) {}

    fn event(&self, event: &tracing::Event<'_>) {
        if *event.metadata().level() == tracing::Level::ERROR {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn enter(&self, _span: &tracing::span::Id) {}

    fn exit(&self, _span: &tracing::span::Id) {}
}
