//! Interaction event payloads.
//!
//! Events are plain data. The engine accumulates them during a tick
//! and hands them to collaborators (visual feedback, haptics,
//! recording) via `drain_events()`; nothing in this crate dispatches.

use grasp_types::{FocusScope, GroupId, InteractableId, InteractorId};
use serde::{Deserialize, Serialize};

/// A notification emitted by the interaction manager.
///
/// # Ordering Guarantees
///
/// Within a tick, exits always precede the enters they make room for:
/// a `Single`-mode interactable emits [`SelectExited`] for the evicted
/// interactor before [`SelectEntered`] for the new one, and an
/// overridden group member's teardown precedes the overrider's commit.
///
/// # Cancellation
///
/// Exit variants carry `canceled`: `false` for an orderly exit decided
/// by arbitration, `true` when the relationship was torn down because
/// one side was unregistered mid-interaction.
///
/// [`SelectExited`]: InteractionEvent::SelectExited
/// [`SelectEntered`]: InteractionEvent::SelectEntered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionEvent {
    /// An interactor was registered with the manager.
    InteractorRegistered {
        /// The registered interactor.
        interactor: InteractorId,
        /// Its containing group at registration time, if any.
        containing_group: Option<GroupId>,
    },
    /// An interactor was unregistered from the manager.
    InteractorUnregistered {
        /// The unregistered interactor.
        interactor: InteractorId,
    },
    /// An interactable was registered with the manager.
    InteractableRegistered {
        /// The registered interactable.
        interactable: InteractableId,
    },
    /// An interactable was unregistered from the manager.
    InteractableUnregistered {
        /// The unregistered interactable.
        interactable: InteractableId,
    },
    /// An interaction group was registered with the manager.
    GroupRegistered {
        /// The registered group.
        group: GroupId,
        /// Its containing group at registration time, if any.
        containing_group: Option<GroupId>,
    },
    /// An interaction group was unregistered from the manager.
    GroupUnregistered {
        /// The unregistered group.
        group: GroupId,
    },
    /// An interactor began hovering an interactable.
    HoverEntered {
        /// The hovering interactor.
        interactor: InteractorId,
        /// The hovered interactable.
        interactable: InteractableId,
    },
    /// An interactor stopped hovering an interactable.
    HoverExited {
        /// The interactor that was hovering.
        interactor: InteractorId,
        /// The interactable that was hovered.
        interactable: InteractableId,
        /// `true` if the exit was caused by unregistration.
        canceled: bool,
    },
    /// An interactor selected an interactable.
    SelectEntered {
        /// The selecting interactor.
        interactor: InteractorId,
        /// The selected interactable.
        interactable: InteractableId,
    },
    /// An interactor released an interactable.
    SelectExited {
        /// The interactor that was selecting.
        interactor: InteractorId,
        /// The interactable that was selected.
        interactable: InteractableId,
        /// `true` if the exit was caused by unregistration.
        canceled: bool,
    },
    /// A focus scope gained focus of an interactable.
    FocusEntered {
        /// The interactor whose selection granted focus.
        interactor: InteractorId,
        /// The focused interactable.
        interactable: InteractableId,
        /// The scope that holds the focus.
        scope: FocusScope,
    },
    /// A focus scope lost focus of an interactable.
    FocusExited {
        /// The interactor that held the focus, if still known.
        interactor: Option<InteractorId>,
        /// The interactable that was focused.
        interactable: InteractableId,
        /// The scope that held the focus.
        scope: FocusScope,
        /// `true` if the exit was caused by unregistration.
        canceled: bool,
    },
}

impl InteractionEvent {
    /// Returns the interactable involved, if the event concerns one.
    #[must_use]
    pub fn interactable(&self) -> Option<InteractableId> {
        match self {
            Self::InteractableRegistered { interactable }
            | Self::InteractableUnregistered { interactable }
            | Self::HoverEntered { interactable, .. }
            | Self::HoverExited { interactable, .. }
            | Self::SelectEntered { interactable, .. }
            | Self::SelectExited { interactable, .. }
            | Self::FocusEntered { interactable, .. }
            | Self::FocusExited { interactable, .. } => Some(*interactable),
            _ => None,
        }
    }

    /// Returns the interactor involved, if the event concerns one.
    #[must_use]
    pub fn interactor(&self) -> Option<InteractorId> {
        match self {
            Self::InteractorRegistered { interactor, .. }
            | Self::InteractorUnregistered { interactor }
            | Self::HoverEntered { interactor, .. }
            | Self::HoverExited { interactor, .. }
            | Self::SelectEntered { interactor, .. }
            | Self::SelectExited { interactor, .. }
            | Self::FocusEntered { interactor, .. } => Some(*interactor),
            Self::FocusExited { interactor, .. } => *interactor,
            _ => None,
        }
    }

    /// Returns `true` for hover/select/focus exit events.
    #[must_use]
    pub fn is_exit(&self) -> bool {
        matches!(
            self,
            Self::HoverExited { .. } | Self::SelectExited { .. } | Self::FocusExited { .. }
        )
    }

    /// Returns `true` for exits caused by unregistration.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(
            self,
            Self::HoverExited { canceled: true, .. }
                | Self::SelectExited { canceled: true, .. }
                | Self::FocusExited { canceled: true, .. }
        )
    }

    /// Returns `true` for registration and unregistration events.
    #[must_use]
    pub fn is_registration(&self) -> bool {
        matches!(
            self,
            Self::InteractorRegistered { .. }
                | Self::InteractorUnregistered { .. }
                | Self::InteractableRegistered { .. }
                | Self::InteractableUnregistered { .. }
                | Self::GroupRegistered { .. }
                | Self::GroupUnregistered { .. }
        )
    }
}
