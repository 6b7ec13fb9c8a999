//! Target filter pipeline for GRASP.
//!
//! A [`TargetFilter`] is an ordered chain of [`TargetEvaluator`]s that
//! re-ranks the raw candidate list a supplier produced for one
//! interactor, before arbitration sees it.
//!
//! # Pipeline Position
//!
//! ```text
//! candidate supplier ──► raw candidates
//!                              │
//!                              ▼
//!                       TargetFilter::process
//!                   (score, drop, sort descending)
//!                              │
//!                              ▼
//!                    group / manager arbitration
//! ```
//!
//! # Scoring
//!
//! | Final score | Outcome |
//! |-------------|---------|
//! | `> 0` | kept, ranked by score descending |
//! | `= 0` | kept at the bottom; later evaluators skipped |
//! | `< 0` | dropped |
//!
//! Scores combine multiplicatively in chain order; each evaluator's
//! raw score passes through its [`WeightCurve`] first.
//!
//! # Evaluator Lifecycle
//!
//! Evaluators are owned by the filter and live through
//! `on_awake` → `on_enable`/`on_disable` cycles → `on_dispose`.
//! An evaluator may disable or dispose *itself* from inside `on_awake`
//! or `on_enable` via the [`Lifecycle`] handle; the filter applies the
//! directive after the callback returns, so re-entrant self-removal
//! never corrupts the chain.

mod curve;
mod error;
mod evaluator;
mod filter;

pub use curve::WeightCurve;
pub use error::FilterError;
pub use evaluator::{Lifecycle, TargetEvaluator};
pub use filter::TargetFilter;

#[cfg(any(test, feature = "test-utils"))]
pub use evaluator::testing;
