//! Weight curves for evaluator score shaping.

use serde::{Deserialize, Serialize};

/// A piecewise-linear curve over the normalized range `[0, 1]`.
///
/// An evaluator produces a normalized score; its weight curve remaps
/// that score before it enters the filter's combination. The default
/// curve is the identity line over `[0, 1]`, so an unconfigured
/// evaluator contributes its raw score within that range; input
/// outside the key range clamps to the end key values, so a raw score
/// below zero enters the combination as `0.0`.
///
/// # Example
///
/// ```
/// use grasp_filter::WeightCurve;
///
/// let linear = WeightCurve::linear();
/// assert_eq!(linear.sample(0.25), 0.25);
///
/// // Inverted: near candidates score high.
/// let inverted = WeightCurve::from_keys(vec![(0.0, 1.0), (1.0, 0.0)]);
/// assert_eq!(inverted.sample(0.25), 0.75);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightCurve {
    /// `(time, value)` keys sorted by time ascending.
    keys: Vec<(f32, f32)>,
}

impl WeightCurve {
    /// The identity line from `(0, 0)` to `(1, 1)`.
    #[must_use]
    pub fn linear() -> Self {
        Self {
            keys: vec![(0.0, 0.0), (1.0, 1.0)],
        }
    }

    /// A flat curve that maps every input to `value`.
    #[must_use]
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![(0.0, value)],
        }
    }

    /// Builds a curve from explicit `(time, value)` keys.
    ///
    /// Keys are sorted by time; an empty key list behaves like
    /// `constant(0.0)`.
    #[must_use]
    pub fn from_keys(mut keys: Vec<(f32, f32)>) -> Self {
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { keys }
    }

    /// Samples the curve at `t`, clamping to the key range.
    #[must_use]
    pub fn sample(&self, t: f32) -> f32 {
        let Some(first) = self.keys.first() else {
            return 0.0;
        };
        if t <= first.0 {
            return first.1;
        }
        // Safe: keys is non-empty here.
        let last = self.keys[self.keys.len() - 1];
        if t >= last.0 {
            return last.1;
        }

        for pair in self.keys.windows(2) {
            let (t0, v0) = pair[0];
            let (t1, v1) = pair[1];
            if t >= t0 && t <= t1 {
                if (t1 - t0).abs() < f32::EPSILON {
                    return v1;
                }
                let alpha = (t - t0) / (t1 - t0);
                return v0 + (v1 - v0) * alpha;
            }
        }

        last.1
    }
}

impl Default for WeightCurve {
    fn default() -> Self {
        Self::linear()
    }
}
