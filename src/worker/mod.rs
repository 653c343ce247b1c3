//! Per-record worker
//!
//! One `Worker` runs per record, each on its own thread. A worker has two
//! phases:
//!
//! 1. **Local**: compute the record's average and pass flag. The record is
//!    borrowed mutably by this worker alone, so nothing is locked.
//! 2. **Merge**: fold the record into the shared [`GlobalAggregate`]. This is
//!    the only point where a worker can block.
//!
//! Optional jitter sleeps a seeded random duration at the end of the local
//! phase. It never runs while the aggregate lock is held.
//!
//! # Example
//!
//! ```
//! use scorepulse::record::Record;
//! use scorepulse::stats::GlobalAggregate;
//! use scorepulse::worker::Worker;
//!
//! let aggregate = GlobalAggregate::new(2, 60);
//! let mut record = Record::new(1, vec![80, 40]);
//!
//! Worker::new(0, &mut record, &aggregate, 60).run();
//!
//! let outcome = record.outcome().unwrap();
//! assert_eq!(outcome.average, 60.0);
//! assert!(outcome.passed);
//! assert_eq!(aggregate.into_summary().per_item_passed, vec![1, 0]);
//! ```

use crate::record::{Outcome, Record, Score};
use crate::stats::GlobalAggregate;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::thread;
use std::time::Duration;
use tracing::trace;

/// Seeded random delay applied in the local phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jitter {
    /// Longest delay
    pub max: Duration,
    /// Run-wide seed, combined with the worker index
    pub seed: u64,
}

impl Jitter {
    /// Delay for the worker at `index`
    ///
    /// Deterministic for a given seed and index.
    pub fn delay_for(&self, index: usize) -> Duration {
        let max_us = self.max.as_micros().min(u128::from(u64::MAX)) as u64;
        if max_us == 0 {
            return Duration::ZERO;
        }
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.seed ^ index as u64);
        Duration::from_micros(rng.gen_range(0..=max_us))
    }
}

/// Compute the grading outcome for a set of scores
///
/// `scores` must be non-empty. The loader rejects records with no questions.
#[inline]
pub fn grade(scores: &[Score], pass_threshold: Score) -> Outcome {
    debug_assert!(!scores.is_empty());

    let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    let average = sum as f64 / scores.len() as f64;

    Outcome {
        average,
        passed: average >= f64::from(pass_threshold),
    }
}

/// Worker for a single record
pub struct Worker<'a> {
    /// Position of the record in load order
    index: usize,

    /// The record, owned exclusively by this worker for the run
    record: &'a mut Record,

    /// Shared statistics
    aggregate: &'a GlobalAggregate,

    /// Inclusive pass threshold for averages
    pass_threshold: Score,

    /// Optional scheduling jitter
    jitter: Option<Jitter>,
}

impl<'a> Worker<'a> {
    /// Create a worker for `record`
    pub fn new(
        index: usize,
        record: &'a mut Record,
        aggregate: &'a GlobalAggregate,
        pass_threshold: Score,
    ) -> Self {
        Self {
            index,
            record,
            aggregate,
            pass_threshold,
            jitter: None,
        }
    }

    /// Enable jitter for this worker
    pub fn with_jitter(mut self, jitter: Option<Jitter>) -> Self {
        self.jitter = jitter;
        self
    }

    /// Grade the record and merge it into the aggregate
    pub fn run(self) {
        let outcome = grade(self.record.scores(), self.pass_threshold);
        self.record.set_outcome(outcome);

        if let Some(jitter) = self.jitter {
            let delay = jitter.delay_for(self.index);
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }

        trace!(
            index = self.index,
            record_id = self.record.id(),
            average = outcome.average,
            passed = outcome.passed,
            "merging record"
        );
        self.aggregate.merge(self.record.scores(), outcome.passed);
    }
}
