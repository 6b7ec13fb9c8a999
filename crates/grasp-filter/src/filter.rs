//! Ordered evaluator chain that re-ranks candidate lists.

use crate::{FilterError, Lifecycle, TargetEvaluator, WeightCurve};
use grasp_types::{InteractableId, InteractorId};

struct EvaluatorSlot {
    evaluator: Box<dyn TargetEvaluator>,
    enabled: bool,
    weight: WeightCurve,
}

/// An ordered chain of scoring evaluators.
///
/// An interactor links one filter; each tick the filter re-ranks that
/// interactor's raw candidate list. Per candidate, the running score
/// starts at `1.0` and is multiplied by each enabled evaluator's
/// weighted score in chain order. Evaluation for a candidate stops
/// once the score is `<= 0`; candidates whose final score is negative
/// are dropped; survivors are sorted by score descending.
///
/// # Example
///
/// ```
/// use grasp_filter::{TargetEvaluator, TargetFilter};
/// use grasp_types::{InteractableId, InteractorId};
///
/// struct Half;
///
/// impl TargetEvaluator for Half {
///     fn evaluate(&self, _: InteractorId, _: InteractableId) -> f32 {
///         0.5
///     }
/// }
///
/// let mut filter = TargetFilter::new();
/// filter.add_evaluator(Box::new(Half));
///
/// let interactor = InteractorId::new();
/// let a = InteractableId::new();
/// let mut results = Vec::new();
/// filter.process(interactor, &[a], &mut results);
/// assert_eq!(results, vec![a]);
/// ```
pub struct TargetFilter {
    enabled: bool,
    slots: Vec<EvaluatorSlot>,
    linked: Vec<InteractorId>,
}

impl TargetFilter {
    /// Creates an empty, enabled filter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            slots: Vec::new(),
            linked: Vec::new(),
        }
    }

    /// Whether the filter participates in candidate processing.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the whole filter. A disabled filter is
    /// skipped at process time; callers fall back to the raw list.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Number of evaluators in the chain, enabled or not.
    #[must_use]
    pub fn evaluator_count(&self) -> usize {
        self.slots.len()
    }

    /// Whether the evaluator at `index` is enabled.
    #[must_use]
    pub fn is_evaluator_enabled(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.enabled)
    }

    /// The interactors currently linked to this filter.
    #[must_use]
    pub fn linked_interactors(&self) -> &[InteractorId] {
        &self.linked
    }

    /// Returns `true` if processing would actually re-rank: the filter
    /// is enabled and at least one evaluator is enabled.
    #[must_use]
    pub fn can_process(&self) -> bool {
        self.enabled && self.slots.iter().any(|s| s.enabled)
    }

    /// Appends an evaluator to the chain.
    ///
    /// Runs `on_awake` (once per evaluator lifetime) and, if the
    /// evaluator is still enabled afterwards, `on_enable` plus
    /// `on_link` for every already-linked interactor. An evaluator
    /// that disposes itself from `on_awake` or `on_enable` is never
    /// added; the chain stays consistent.
    ///
    /// Returns the index the evaluator landed at, or `None` if it
    /// disposed itself during setup.
    pub fn add_evaluator(&mut self, evaluator: Box<dyn TargetEvaluator>) -> Option<usize> {
        let mut slot = EvaluatorSlot {
            evaluator,
            enabled: true,
            weight: WeightCurve::default(),
        };

        let mut lifecycle = Lifecycle::default();
        slot.evaluator.on_awake(&mut lifecycle);
        if lifecycle.dispose_requested {
            slot.evaluator.on_dispose();
            return None;
        }
        if lifecycle.disable_requested {
            slot.enabled = false;
        }

        if slot.enabled {
            let mut lifecycle = Lifecycle::default();
            slot.evaluator.on_enable(&mut lifecycle);
            if lifecycle.dispose_requested {
                slot.evaluator.on_disable();
                slot.evaluator.on_dispose();
                return None;
            }
            if lifecycle.disable_requested {
                slot.evaluator.on_disable();
                slot.enabled = false;
            } else {
                for interactor in &self.linked {
                    slot.evaluator.on_link(*interactor);
                }
            }
        }

        self.slots.push(slot);
        Some(self.slots.len() - 1)
    }

    /// Removes and disposes the evaluator at `index`.
    ///
    /// The evaluator is disabled first (if enabled), unlinked from
    /// every linked interactor, then disposed.
    pub fn remove_evaluator(&mut self, index: usize) -> Result<(), FilterError> {
        if index >= self.slots.len() {
            return Err(FilterError::IndexOutOfRange {
                index,
                len: self.slots.len(),
            });
        }

        let mut slot = self.slots.remove(index);
        if slot.enabled {
            slot.evaluator.on_disable();
            for interactor in &self.linked {
                slot.evaluator.on_unlink(*interactor);
            }
        }
        slot.evaluator.on_dispose();
        Ok(())
    }

    /// Repositions the evaluator at `index` to `new_index`.
    ///
    /// `new_index` is clamped to the chain length. Returns `true` iff
    /// the chain order changed.
    pub fn move_evaluator_to(
        &mut self,
        index: usize,
        new_index: usize,
    ) -> Result<bool, FilterError> {
        if index >= self.slots.len() {
            return Err(FilterError::IndexOutOfRange {
                index,
                len: self.slots.len(),
            });
        }

        let new_index = new_index.min(self.slots.len() - 1);
        if new_index == index {
            return Ok(false);
        }

        let slot = self.slots.remove(index);
        self.slots.insert(new_index, slot);
        Ok(true)
    }

    /// Enables or disables the evaluator at `index`, driving its
    /// `on_enable`/`on_disable` callbacks. An evaluator that disposes
    /// itself from `on_enable` is removed from the chain.
    pub fn set_evaluator_enabled(
        &mut self,
        index: usize,
        enabled: bool,
    ) -> Result<(), FilterError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(FilterError::IndexOutOfRange { index, len })?;

        if slot.enabled == enabled {
            return Ok(());
        }

        if enabled {
            let mut lifecycle = Lifecycle::default();
            slot.evaluator.on_enable(&mut lifecycle);
            if lifecycle.dispose_requested {
                slot.evaluator.on_disable();
                let mut slot = self.slots.remove(index);
                slot.evaluator.on_dispose();
                return Ok(());
            }
            if lifecycle.disable_requested {
                slot.evaluator.on_disable();
            } else {
                slot.enabled = true;
                for interactor in &self.linked {
                    slot.evaluator.on_link(*interactor);
                }
            }
        } else {
            slot.enabled = false;
            slot.evaluator.on_disable();
        }
        Ok(())
    }

    /// Replaces the weight curve for the evaluator at `index`.
    pub fn set_evaluator_weight(
        &mut self,
        index: usize,
        weight: WeightCurve,
    ) -> Result<(), FilterError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(FilterError::IndexOutOfRange { index, len })?;
        slot.weight = weight;
        Ok(())
    }

    /// Links an interactor to this filter, notifying enabled
    /// evaluators. Linking the same interactor twice is a no-op.
    pub fn link(&mut self, interactor: InteractorId) {
        if self.linked.contains(&interactor) {
            tracing::warn!(%interactor, "interactor already linked to target filter");
            return;
        }
        self.linked.push(interactor);
        for slot in self.slots.iter_mut().filter(|s| s.enabled) {
            slot.evaluator.on_link(interactor);
        }
    }

    /// Unlinks an interactor, notifying enabled evaluators. Unlinking
    /// an interactor that was never linked is a no-op.
    pub fn unlink(&mut self, interactor: InteractorId) {
        let Some(pos) = self.linked.iter().position(|i| *i == interactor) else {
            return;
        };
        self.linked.remove(pos);
        for slot in self.slots.iter_mut().filter(|s| s.enabled) {
            slot.evaluator.on_unlink(interactor);
        }
    }

    /// Re-ranks `candidates` into `results`.
    ///
    /// When the filter cannot process (disabled, or no enabled
    /// evaluator) the candidates pass through untouched and unsorted.
    pub fn process(
        &self,
        interactor: InteractorId,
        candidates: &[InteractableId],
        results: &mut Vec<InteractableId>,
    ) {
        results.clear();

        if !self.can_process() {
            results.extend_from_slice(candidates);
            return;
        }

        let mut scored: Vec<(InteractableId, f32)> = Vec::with_capacity(candidates.len());
        for &candidate in candidates {
            let mut score = 1.0_f32;
            for slot in self.slots.iter().filter(|s| s.enabled) {
                score *= slot.weight.sample(slot.evaluator.evaluate(interactor, candidate));
                if score <= 0.0 {
                    break;
                }
            }
            if score >= 0.0 {
                scored.push((candidate, score));
            }
        }

        // Stable: candidates with equal scores keep supplier order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        results.extend(scored.into_iter().map(|(candidate, _)| candidate));
    }
}

impl Default for TargetFilter {
    fn default() -> Self {
        Self::new()
    }
}
