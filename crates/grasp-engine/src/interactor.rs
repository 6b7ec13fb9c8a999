//! Interactor configuration and live interaction state.

use grasp_filter::TargetFilter;
use grasp_types::{GroupId, InteractableId, InteractorId, LayerMask, PhaseMask};

/// An input source capable of hovering and selecting targets.
///
/// Construct with [`Interactor::new`] and hand to
/// [`InteractionManager::add_interactor`](crate::InteractionManager::add_interactor);
/// the manager owns it from then on and exposes it by id.
///
/// Capability flags and masks are plain fields so callers can toggle
/// them between ticks; hover/select state and the post-filter candidate
/// list are engine-maintained and read-only from outside.
pub struct Interactor {
    id: InteractorId,
    /// Whether this interactor may hover targets this tick.
    pub allow_hover: bool,
    /// Whether this interactor may select targets this tick.
    pub allow_select: bool,
    /// While `true`, a held selection survives the target dropping out
    /// of the candidate list; only filter or capability failure
    /// releases it. Also defers group pre-emption while the held
    /// selection remains selectable.
    pub keep_selected_target_valid: bool,
    /// Interaction layers this interactor operates on.
    pub layers: LayerMask,
    /// Update phases whose supplier hooks run for this interactor.
    pub phases: PhaseMask,
    filter: Option<TargetFilter>,
    pub(crate) containing_group: Option<GroupId>,
    pub(crate) hovered: Vec<InteractableId>,
    pub(crate) selected: Vec<InteractableId>,
    pub(crate) valid_targets: Vec<InteractableId>,
}

impl Interactor {
    /// Creates an interactor with a fresh id and default capabilities:
    /// hover and select allowed, held selections kept valid, default
    /// layer, all update phases.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: InteractorId::new(),
            allow_hover: true,
            allow_select: true,
            keep_selected_target_valid: true,
            layers: LayerMask::DEFAULT,
            phases: PhaseMask::all(),
            filter: None,
            containing_group: None,
            hovered: Vec::new(),
            selected: Vec::new(),
            valid_targets: Vec::new(),
        }
    }

    /// Sets the interaction layers.
    #[must_use]
    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }

    /// Sets the update phases whose hooks run for this interactor.
    #[must_use]
    pub fn with_phases(mut self, phases: PhaseMask) -> Self {
        self.phases = phases;
        self
    }

    /// Disables hovering.
    #[must_use]
    pub fn without_hover(mut self) -> Self {
        self.allow_hover = false;
        self
    }

    /// Disables selecting.
    #[must_use]
    pub fn without_select(mut self) -> Self {
        self.allow_select = false;
        self
    }

    /// Releases held selections as soon as the target leaves the
    /// candidate list.
    #[must_use]
    pub fn releasing_invalid_targets(mut self) -> Self {
        self.keep_selected_target_valid = false;
        self
    }

    /// This interactor's id.
    #[must_use]
    pub fn id(&self) -> InteractorId {
        self.id
    }

    /// The group this interactor is currently arbitrated within.
    #[must_use]
    pub fn containing_group(&self) -> Option<GroupId> {
        self.containing_group
    }

    /// Replaces the linked target filter.
    ///
    /// The outgoing filter is unlinked from this interactor and the
    /// incoming one linked, so linkable evaluators observe the change.
    pub fn set_target_filter(&mut self, filter: Option<TargetFilter>) {
        if let Some(old) = &mut self.filter {
            old.unlink(self.id);
        }
        self.filter = filter;
        if let Some(new) = &mut self.filter {
            new.link(self.id);
        }
    }

    /// The linked target filter, if any.
    #[must_use]
    pub fn target_filter(&self) -> Option<&TargetFilter> {
        self.filter.as_ref()
    }

    /// Mutable access to the linked target filter.
    pub fn target_filter_mut(&mut self) -> Option<&mut TargetFilter> {
        self.filter.as_mut()
    }

    /// Interactables currently hovered, in hover-entered order.
    #[must_use]
    pub fn interactables_hovered(&self) -> &[InteractableId] {
        &self.hovered
    }

    /// Interactables currently selected, in select-entered order.
    #[must_use]
    pub fn interactables_selected(&self) -> &[InteractableId] {
        &self.selected
    }

    /// Returns `true` if this interactor is hovering the interactable.
    #[must_use]
    pub fn is_hovering(&self, interactable: InteractableId) -> bool {
        self.hovered.contains(&interactable)
    }

    /// Returns `true` if this interactor is selecting the interactable.
    #[must_use]
    pub fn is_selecting(&self, interactable: InteractableId) -> bool {
        self.selected.contains(&interactable)
    }

    /// Returns `true` if this interactor has any hover or selection.
    #[must_use]
    pub fn has_interaction(&self) -> bool {
        !self.hovered.is_empty() || !self.selected.is_empty()
    }
}

impl Default for Interactor {
    fn default() -> Self {
        Self::new()
    }
}
