//! Target evaluator trait and testing utilities.

use grasp_types::{InteractableId, InteractorId};

/// Directives an evaluator may issue about itself from within a
/// lifecycle callback.
///
/// Evaluators receive a `&mut Lifecycle` in `on_awake` and `on_enable`
/// and may request their own disabling or disposal. The owning
/// [`TargetFilter`](crate::TargetFilter) applies the directive
/// synchronously after the callback returns, so the evaluator list is
/// never enumerated while being mutated.
#[derive(Debug, Default)]
pub struct Lifecycle {
    pub(crate) disable_requested: bool,
    pub(crate) dispose_requested: bool,
}

impl Lifecycle {
    /// Requests that this evaluator be disabled once the current
    /// callback returns.
    pub fn disable_self(&mut self) {
        self.disable_requested = true;
    }

    /// Requests that this evaluator be disposed once the current
    /// callback returns. Disposal is terminal: the evaluator is
    /// removed from the filter and receives no further callbacks.
    pub fn dispose_self(&mut self) {
        self.dispose_requested = true;
    }
}

/// A single scoring stage in a target filter chain.
///
/// Each evaluator produces a normalized score in `[0, 1]` for an
/// (interactor, candidate) pair. The filter remaps the score through
/// the evaluator's weight curve and multiplies it into the candidate's
/// running score.
///
/// # Lifecycle
///
/// ```text
/// add_evaluator ──► on_awake (once) ──► on_enable ◄──► on_disable
///                                            │
/// remove_evaluator ──► on_disable ──► on_dispose (terminal)
/// ```
///
/// `on_link`/`on_unlink` fire per linked interactor; the default
/// implementations do nothing, so only evaluators that care about
/// which interactors use the filter need to override them.
pub trait TargetEvaluator: Send + Sync {
    /// Computes the normalized score for a candidate.
    fn evaluate(&self, interactor: InteractorId, target: InteractableId) -> f32;

    /// Called once, when the evaluator is added to a filter.
    fn on_awake(&mut self, _lifecycle: &mut Lifecycle) {}

    /// Called when the evaluator becomes enabled.
    fn on_enable(&mut self, _lifecycle: &mut Lifecycle) {}

    /// Called when the evaluator becomes disabled.
    fn on_disable(&mut self) {}

    /// Called when the evaluator is removed from the filter. Terminal.
    fn on_dispose(&mut self) {}

    /// Called when an interactor links to the owning filter.
    fn on_link(&mut self, _interactor: InteractorId) {}

    /// Called when an interactor unlinks from the owning filter.
    fn on_unlink(&mut self, _interactor: InteractorId) {}
}

/// Test utilities for the filter pipeline.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Shared call counters for a [`MockEvaluator`].
    ///
    /// Handles stay valid after the evaluator is boxed and moved into
    /// a filter, so tests can assert on lifecycle traffic.
    #[derive(Debug, Default, Clone)]
    pub struct EvaluatorCounters {
        /// Number of `evaluate` calls.
        pub evaluate: Arc<AtomicUsize>,
        /// Number of `on_awake` calls.
        pub awake: Arc<AtomicUsize>,
        /// Number of `on_enable` calls.
        pub enable: Arc<AtomicUsize>,
        /// Number of `on_disable` calls.
        pub disable: Arc<AtomicUsize>,
        /// Number of `on_dispose` calls.
        pub dispose: Arc<AtomicUsize>,
        /// Number of `on_link` calls.
        pub link: Arc<AtomicUsize>,
        /// Number of `on_unlink` calls.
        pub unlink: Arc<AtomicUsize>,
    }

    impl EvaluatorCounters {
        /// Loads a counter value.
        pub fn get(counter: &Arc<AtomicUsize>) -> usize {
            counter.load(Ordering::SeqCst)
        }
    }

    /// A mock evaluator for testing.
    ///
    /// Returns a fixed or computed score on every `evaluate` call and
    /// tracks all lifecycle traffic via [`EvaluatorCounters`].
    pub struct MockEvaluator {
        /// Scoring function.
        pub score_fn: Box<dyn Fn(InteractorId, InteractableId) -> f32 + Send + Sync>,
        /// Shared call counters.
        pub counters: EvaluatorCounters,
        /// Request self-disposal during `on_awake`.
        pub dispose_on_awake: bool,
        /// Request self-disabling during `on_enable`.
        pub disable_on_enable: bool,
    }

    impl MockEvaluator {
        /// Creates a mock returning the same score for every pair.
        pub fn constant(score: f32) -> Self {
            Self::scored(move |_, _| score)
        }

        /// Creates a mock with a custom scoring function.
        pub fn scored(
            score_fn: impl Fn(InteractorId, InteractableId) -> f32 + Send + Sync + 'static,
        ) -> Self {
            Self {
                score_fn: Box::new(score_fn),
                counters: EvaluatorCounters::default(),
                dispose_on_awake: false,
                disable_on_enable: false,
            }
        }

        /// Creates a mock that disposes itself from within `on_awake`.
        pub fn self_disposing() -> Self {
            let mut mock = Self::constant(1.0);
            mock.dispose_on_awake = true;
            mock
        }

        /// Creates a mock that disables itself from within `on_enable`.
        pub fn self_disabling() -> Self {
            let mut mock = Self::constant(1.0);
            mock.disable_on_enable = true;
            mock
        }

        /// Returns a counters handle that outlives the boxed mock.
        pub fn counters(&self) -> EvaluatorCounters {
            self.counters.clone()
        }

        /// Returns the number of `evaluate` calls so far.
        pub fn evaluations(&self) -> usize {
            self.counters.evaluate.load(Ordering::SeqCst)
        }
    }

    impl TargetEvaluator for MockEvaluator {
        fn evaluate(&self, interactor: InteractorId, target: InteractableId) -> f32 {
            self.counters.evaluate.fetch_add(1, Ordering::SeqCst);
            (self.score_fn)(interactor, target)
        }

        fn on_awake(&mut self, lifecycle: &mut Lifecycle) {
            self.counters.awake.fetch_add(1, Ordering::SeqCst);
            if self.dispose_on_awake {
                lifecycle.dispose_self();
            }
        }

        fn on_enable(&mut self, lifecycle: &mut Lifecycle) {
            self.counters.enable.fetch_add(1, Ordering::SeqCst);
            if self.disable_on_enable {
                lifecycle.disable_self();
            }
        }

        fn on_disable(&mut self) {
            self.counters.disable.fetch_add(1, Ordering::SeqCst);
        }

        fn on_dispose(&mut self) {
            self.counters.dispose.fetch_add(1, Ordering::SeqCst);
        }

        fn on_link(&mut self, _interactor: InteractorId) {
            self.counters.link.fetch_add(1, Ordering::SeqCst);
        }

        fn on_unlink(&mut self, _interactor: InteractorId) {
            self.counters.unlink.fetch_add(1, Ordering::SeqCst);
        }
    }
}
