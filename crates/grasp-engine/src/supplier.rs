//! The candidate supplier boundary.
//!
//! All geometry lives outside the engine. Each tick the manager asks
//! the supplier for per-interactor candidate lists and, on demand, for
//! squared distances under a given [`DistanceMode`]. The engine never
//! caches a distance across ticks.

use grasp_types::{DistanceMode, InteractableId, InteractorId, UpdatePhase};

/// External source of interaction candidates and distances.
///
/// Implementations wrap whatever produces targeting data (physics
/// overlap, raycasts, gesture recognition). The candidate list for one
/// interactor must be stable within a tick and free of duplicates.
pub trait CandidateSupplier {
    /// Collects the raw candidate interactables for `interactor` into
    /// `out`, replacing its contents.
    fn candidates(&self, interactor: InteractorId, out: &mut Vec<InteractableId>);

    /// Returns the squared distance between an interactor and an
    /// interactable under the requested mode.
    fn distance_sqr(
        &self,
        interactor: InteractorId,
        interactable: InteractableId,
        mode: DistanceMode,
    ) -> f32;

    /// Per-phase hook invoked for each registered interactor before
    /// interaction state is updated.
    fn pre_process(&mut self, _interactor: InteractorId, _phase: UpdatePhase) {}

    /// Per-phase hook invoked for each registered interactor after
    /// interaction state is updated.
    fn process(&mut self, _interactor: InteractorId, _phase: UpdatePhase) {}
}

/// Test utilities for driving the engine without real geometry.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    use super::*;
    use std::collections::HashMap;

    /// A supplier scripted from the outside.
    ///
    /// Tests assign each interactor's candidate list up front and
    /// reassign it between ticks to model targets moving in and out of
    /// reach.
    #[derive(Default)]
    pub struct ScriptedSupplier {
        targets: HashMap<InteractorId, Vec<InteractableId>>,
        distances: HashMap<(InteractorId, InteractableId), f32>,
        pre_process_calls: usize,
        process_calls: usize,
    }

    impl ScriptedSupplier {
        /// Creates a supplier with no candidates scripted.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Replaces the candidate list for an interactor.
        pub fn set_candidates(&mut self, interactor: InteractorId, targets: Vec<InteractableId>) {
            self.targets.insert(interactor, targets);
        }

        /// Removes all candidates for an interactor.
        pub fn clear_candidates(&mut self, interactor: InteractorId) {
            self.targets.remove(&interactor);
        }

        /// Scripts the squared distance for a pair. Unscripted pairs
        /// report `f32::MAX`.
        pub fn set_distance_sqr(
            &mut self,
            interactor: InteractorId,
            interactable: InteractableId,
            distance_sqr: f32,
        ) {
            self.distances.insert((interactor, interactable), distance_sqr);
        }

        /// Number of `pre_process` hook invocations so far.
        #[must_use]
        pub fn pre_process_calls(&self) -> usize {
            self.pre_process_calls
        }

        /// Number of `process` hook invocations so far.
        #[must_use]
        pub fn process_calls(&self) -> usize {
            self.process_calls
        }
    }

    impl CandidateSupplier for ScriptedSupplier {
        fn candidates(&self, interactor: InteractorId, out: &mut Vec<InteractableId>) {
            out.clear();
            if let Some(targets) = self.targets.get(&interactor) {
                out.extend_from_slice(targets);
            }
        }

        fn distance_sqr(
            &self,
            interactor: InteractorId,
            interactable: InteractableId,
            _mode: DistanceMode,
        ) -> f32 {
            self.distances
                .get(&(interactor, interactable))
                .copied()
                .unwrap_or(f32::MAX)
        }

        fn pre_process(&mut self, _interactor: InteractorId, _phase: UpdatePhase) {
            self.pre_process_calls += 1;
        }

        fn process(&mut self, _interactor: InteractorId, _phase: UpdatePhase) {
            self.process_calls += 1;
        }
    }
}
