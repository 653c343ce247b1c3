//! Cross-record statistics
//!
//! Every worker folds its record into one shared [`GlobalAggregate`]. The
//! aggregate is guarded by a single mutex that is held only for the handful of
//! scalar updates in [`GlobalAggregate::merge`].
//!
//! All updates are increments, maxima and minima. They commute, so the final
//! [`AggregateSummary`] is the same for every interleaving of workers and
//! equals a sequential fold of [`AggregateSummary::apply`] over the records.
//!
//! # Example
//!
//! ```
//! use scorepulse::stats::GlobalAggregate;
//!
//! let aggregate = GlobalAggregate::new(2, 60);
//! aggregate.merge(&[80, 40], true);
//! aggregate.merge(&[60, 60], true);
//!
//! let summary = aggregate.into_summary();
//! assert_eq!(summary.per_item_passed, vec![2, 1]);
//! assert_eq!(summary.total_passed, 2);
//! assert_eq!(summary.highest(), Some(80));
//! assert_eq!(summary.lowest(), Some(40));
//! ```

use crate::record::Score;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// Running statistics over all merged records
///
/// `highest_score` starts at `Score::MIN` and `lowest_score` at `Score::MAX`,
/// the identities for max and min. Use [`highest`](Self::highest) and
/// [`lowest`](Self::lowest) to read them without the sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSummary {
    /// Records passing each question, by question position
    pub per_item_passed: Vec<u64>,
    /// Records whose average met the pass threshold
    pub total_passed: u64,
    /// Highest single score seen
    pub highest_score: Score,
    /// Lowest single score seen
    pub lowest_score: Score,
    /// Records merged so far
    pub merged: u64,
    /// Threshold applied to each question score
    pub pass_threshold: Score,
}

impl AggregateSummary {
    /// Identity summary for `item_count` questions
    pub fn new(item_count: usize, pass_threshold: Score) -> Self {
        Self {
            per_item_passed: vec![0; item_count],
            total_passed: 0,
            highest_score: Score::MIN,
            lowest_score: Score::MAX,
            merged: 0,
            pass_threshold,
        }
    }

    /// Fold one record into the summary
    ///
    /// This is the whole merge step. `GlobalAggregate::merge` runs exactly
    /// this under its lock. Must stay free of I/O and allocation.
    #[inline]
    pub fn apply(&mut self, scores: &[Score], passed: bool) {
        debug_assert_eq!(scores.len(), self.per_item_passed.len());

        if passed {
            self.total_passed += 1;
        }

        for (count, &score) in self.per_item_passed.iter_mut().zip(scores) {
            if score >= self.pass_threshold {
                *count += 1;
            }
            self.highest_score = self.highest_score.max(score);
            self.lowest_score = self.lowest_score.min(score);
        }

        self.merged += 1;
    }

    /// Number of questions tracked
    pub fn item_count(&self) -> usize {
        self.per_item_passed.len()
    }

    /// Highest score, or `None` if nothing was merged
    pub fn highest(&self) -> Option<Score> {
        self.has_scores().then_some(self.highest_score)
    }

    /// Lowest score, or `None` if nothing was merged
    pub fn lowest(&self) -> Option<Score> {
        self.has_scores().then_some(self.lowest_score)
    }

    fn has_scores(&self) -> bool {
        self.merged > 0 && !self.per_item_passed.is_empty()
    }
}

/// Shared statistics object, one per run
///
/// Handed to every worker by shared reference. `merge` is the only mutating
/// entry point.
#[derive(Debug)]
pub struct GlobalAggregate {
    state: Mutex<AggregateSummary>,
}

impl GlobalAggregate {
    /// Create an aggregate for records with `item_count` questions
    pub fn new(item_count: usize, pass_threshold: Score) -> Self {
        Self {
            state: Mutex::new(AggregateSummary::new(item_count, pass_threshold)),
        }
    }

    /// Merge one record's contribution as a single indivisible update
    ///
    /// A poisoned lock is taken over rather than propagated: `apply` leaves
    /// the summary consistent, and the coordinator already fails any run in
    /// which a worker panicked.
    pub fn merge(&self, scores: &[Score], passed: bool) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.apply(scores, passed);
    }

    /// Clone the current state under the lock
    pub fn snapshot(&self) -> AggregateSummary {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Consume the aggregate after every worker has been joined
    pub fn into_summary(self) -> AggregateSummary {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
