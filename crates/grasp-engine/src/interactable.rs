//! Interactable configuration, filter chains, and aggregated state.

use std::collections::HashMap;

use grasp_types::{
    ColliderId, DistanceMode, FocusMode, FocusScope, InteractableId, InteractorId, LayerMask,
    SelectMode,
};

/// A predicate filter gating hover or select eligibility.
///
/// Chains are conjunctive: a pair passes only when every filter in the
/// chain allows it. Every filter in a chain is invoked on every
/// evaluation, even after an earlier one has already denied the pair,
/// so instrumentation filters observe all traffic.
pub trait InteractionFilter: Send + Sync {
    /// Returns `true` to allow the interaction for this pair.
    fn allow(&self, interactor: InteractorId, interactable: InteractableId) -> bool;
}

/// A stage in an interactable's interaction-strength chain.
///
/// Stages run in order over the base strength (1.0 while selected, 0.0
/// while merely hovered); the final value is clamped to `[0, 1]`.
pub trait StrengthFilter: Send + Sync {
    /// Maps the running strength for this pair to a new value.
    fn process(&self, interactor: InteractorId, interactable: InteractableId, strength: f32)
        -> f32;
}

/// A target that can be hovered, selected, and focused.
///
/// Construct with [`Interactable::new`] and hand to
/// [`InteractionManager::add_interactable`](crate::InteractionManager::add_interactable).
/// Hover/select/focus sets and interaction strengths are
/// engine-maintained; configuration fields are plain and may change
/// between ticks.
pub struct Interactable {
    id: InteractableId,
    /// How many interactors may select simultaneously.
    pub select_mode: SelectMode,
    /// How many scopes may focus simultaneously.
    pub focus_mode: FocusMode,
    /// Distance calculation mode forwarded to the supplier.
    pub distance_mode: DistanceMode,
    /// Interaction layers this interactable accepts.
    pub layers: LayerMask,
    colliders: Vec<ColliderId>,
    hover_filters: Vec<Box<dyn InteractionFilter>>,
    select_filters: Vec<Box<dyn InteractionFilter>>,
    strength_filters: Vec<Box<dyn StrengthFilter>>,
    pub(crate) hovering: Vec<InteractorId>,
    pub(crate) selecting: Vec<InteractorId>,
    pub(crate) focusing: Vec<FocusScope>,
    pub(crate) strengths: HashMap<InteractorId, f32>,
}

impl Interactable {
    /// Creates an interactable with a fresh id and defaults: single
    /// select, single focus, transform-position distance, default
    /// layer, no colliders, empty filter chains.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: InteractableId::new(),
            select_mode: SelectMode::Single,
            focus_mode: FocusMode::Single,
            distance_mode: DistanceMode::TransformPosition,
            layers: LayerMask::DEFAULT,
            colliders: Vec::new(),
            hover_filters: Vec::new(),
            select_filters: Vec::new(),
            strength_filters: Vec::new(),
            hovering: Vec::new(),
            selecting: Vec::new(),
            focusing: Vec::new(),
            strengths: HashMap::new(),
        }
    }

    /// Sets the select mode.
    #[must_use]
    pub fn with_select_mode(mut self, mode: SelectMode) -> Self {
        self.select_mode = mode;
        self
    }

    /// Sets the focus mode.
    #[must_use]
    pub fn with_focus_mode(mut self, mode: FocusMode) -> Self {
        self.focus_mode = mode;
        self
    }

    /// Sets the distance calculation mode.
    #[must_use]
    pub fn with_distance_mode(mut self, mode: DistanceMode) -> Self {
        self.distance_mode = mode;
        self
    }

    /// Sets the interaction layers.
    #[must_use]
    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }

    /// Attaches a collider handle.
    ///
    /// Handles attached after registration are associated with this
    /// interactable the next time it registers.
    #[must_use]
    pub fn with_collider(mut self, collider: ColliderId) -> Self {
        self.colliders.push(collider);
        self
    }

    /// This interactable's id.
    #[must_use]
    pub fn id(&self) -> InteractableId {
        self.id
    }

    /// Attached collider handles.
    #[must_use]
    pub fn colliders(&self) -> &[ColliderId] {
        &self.colliders
    }

    /// Attaches a collider handle to a live interactable.
    pub fn add_collider(&mut self, collider: ColliderId) {
        if !self.colliders.contains(&collider) {
            self.colliders.push(collider);
        }
    }

    /// Appends a hover predicate filter to the chain.
    pub fn add_hover_filter(&mut self, filter: Box<dyn InteractionFilter>) {
        self.hover_filters.push(filter);
    }

    /// Appends a select predicate filter to the chain.
    pub fn add_select_filter(&mut self, filter: Box<dyn InteractionFilter>) {
        self.select_filters.push(filter);
    }

    /// Appends an interaction-strength stage to the chain.
    pub fn add_strength_filter(&mut self, filter: Box<dyn StrengthFilter>) {
        self.strength_filters.push(filter);
    }

    /// Runs the hover filter chain for a pair. Every filter is invoked.
    #[must_use]
    pub fn allows_hover(&self, interactor: InteractorId) -> bool {
        run_filter_chain(&self.hover_filters, interactor, self.id)
    }

    /// Runs the select filter chain for a pair. Every filter is invoked.
    #[must_use]
    pub fn allows_select(&self, interactor: InteractorId) -> bool {
        run_filter_chain(&self.select_filters, interactor, self.id)
    }

    /// Runs the strength chain over a base strength, clamped to `[0, 1]`.
    #[must_use]
    pub fn process_strength(&self, interactor: InteractorId, base: f32) -> f32 {
        let mut strength = base;
        for filter in &self.strength_filters {
            strength = filter.process(interactor, self.id, strength);
        }
        strength.clamp(0.0, 1.0)
    }

    /// Interactors currently hovering, in hover-entered order.
    #[must_use]
    pub fn interactors_hovering(&self) -> &[InteractorId] {
        &self.hovering
    }

    /// Interactors currently selecting, in select-entered order.
    #[must_use]
    pub fn interactors_selecting(&self) -> &[InteractorId] {
        &self.selecting
    }

    /// Scopes currently focusing this interactable.
    #[must_use]
    pub fn focusing_scopes(&self) -> &[FocusScope] {
        &self.focusing
    }

    /// Returns `true` if any interactor is hovering.
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        !self.hovering.is_empty()
    }

    /// Returns `true` if any interactor is selecting.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        !self.selecting.is_empty()
    }

    /// The interaction strength last computed for an interactor.
    #[must_use]
    pub fn interaction_strength(&self, interactor: InteractorId) -> f32 {
        self.strengths.get(&interactor).copied().unwrap_or(0.0)
    }

    /// The largest interaction strength across all interactors.
    #[must_use]
    pub fn largest_interaction_strength(&self) -> f32 {
        self.strengths.values().fold(0.0, |max, &s| max.max(s))
    }
}

impl Default for Interactable {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a conjunctive filter chain without short-circuiting: every
/// filter is invoked even after one has denied the pair.
pub(crate) fn run_filter_chain(
    chain: &[Box<dyn InteractionFilter>],
    interactor: InteractorId,
    interactable: InteractableId,
) -> bool {
    let mut allowed = true;
    for filter in chain {
        let verdict = filter.allow(interactor, interactable);
        allowed = allowed && verdict;
    }
    allowed
}

/// Test utilities for filter chains.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// A predicate filter with a fixed verdict and a call counter.
    pub struct CountingFilter {
        verdict: bool,
        calls: Arc<AtomicUsize>,
    }

    impl CountingFilter {
        /// Creates a filter that always returns `verdict`.
        #[must_use]
        pub fn new(verdict: bool) -> Self {
            Self {
                verdict,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Returns a handle to the call counter.
        #[must_use]
        pub fn calls(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.calls)
        }
    }

    impl InteractionFilter for CountingFilter {
        fn allow(&self, _interactor: InteractorId, _interactable: InteractableId) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verdict
        }
    }

    /// A strength stage that multiplies the running strength.
    pub struct ScalingStrengthFilter {
        /// Multiplier applied to the running strength.
        pub factor: f32,
    }

    impl StrengthFilter for ScalingStrengthFilter {
        fn process(
            &self,
            _interactor: InteractorId,
            _interactable: InteractableId,
            strength: f32,
        ) -> f32 {
            strength * self.factor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{CountingFilter, ScalingStrengthFilter};
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn filter_chain_invokes_every_filter() {
        let mut interactable = Interactable::new();
        let deny = CountingFilter::new(false);
        let after_deny = CountingFilter::new(true);
        let deny_calls = deny.calls();
        let after_calls = after_deny.calls();
        interactable.add_hover_filter(Box::new(deny));
        interactable.add_hover_filter(Box::new(after_deny));

        assert!(!interactable.allows_hover(InteractorId::new()));
        assert_eq!(deny_calls.load(Ordering::SeqCst), 1);
        // The second filter still ran after the first denied.
        assert_eq!(after_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_chain_allows() {
        let interactable = Interactable::new();
        assert!(interactable.allows_hover(InteractorId::new()));
        assert!(interactable.allows_select(InteractorId::new()));
    }

    #[test]
    fn strength_chain_clamps() {
        let mut interactable = Interactable::new();
        interactable.add_strength_filter(Box::new(ScalingStrengthFilter { factor: 3.0 }));
        assert_eq!(interactable.process_strength(InteractorId::new(), 1.0), 1.0);

        let mut negative = Interactable::new();
        negative.add_strength_filter(Box::new(ScalingStrengthFilter { factor: -1.0 }));
        assert_eq!(negative.process_strength(InteractorId::new(), 1.0), 0.0);
    }

    #[test]
    fn largest_strength_over_interactors() {
        let mut interactable = Interactable::new();
        assert_eq!(interactable.largest_interaction_strength(), 0.0);

        let weak = InteractorId::new();
        let strong = InteractorId::new();
        interactable.strengths.insert(weak, 0.25);
        interactable.strengths.insert(strong, 0.75);
        assert_eq!(interactable.largest_interaction_strength(), 0.75);
        assert_eq!(interactable.interaction_strength(weak), 0.25);
    }

    #[test]
    fn duplicate_collider_ignored() {
        let collider = ColliderId::new();
        let mut interactable = Interactable::new().with_collider(collider);
        interactable.add_collider(collider);
        assert_eq!(interactable.colliders(), &[collider]);
    }
}
