//! Exam records
//!
//! A `Record` is one student's submission: an identifier and one score per
//! question. Scores never change after loading. The grading outcome (average
//! and pass flag) is written exactly once by the worker that owns the record.
//!
//! The `RecordStore` holds every record for the run in load order, together
//! with the question count shared by all of them.

pub mod loader;

use serde::{Deserialize, Serialize};

/// A single question score, in `0..=100`
pub type Score = u32;

/// Highest score the loader accepts
pub const MAX_SCORE: Score = 100;

/// Grading outcome for one record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Mean of all question scores
    pub average: f64,
    /// Whether the average meets the pass threshold
    pub passed: bool,
}

/// One student's submission
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: i64,
    scores: Vec<Score>,
    outcome: Option<Outcome>,
}

impl Record {
    /// Create a record with no outcome yet
    pub fn new(id: i64, scores: Vec<Score>) -> Self {
        Self {
            id,
            scores,
            outcome: None,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    /// Grading outcome, `None` until the owning worker has run
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Store the grading outcome
    ///
    /// Only the owning worker calls this, once. A second write is a bug.
    pub fn set_outcome(&mut self, outcome: Outcome) {
        debug_assert!(self.outcome.is_none(), "outcome for record {} written twice", self.id);
        self.outcome = Some(outcome);
    }
}

/// All records of a run, in load order
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    item_count: usize,
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store for records with `item_count` questions each
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            records: Vec::new(),
        }
    }

    /// Create a store with capacity for `record_count` records
    pub fn with_capacity(item_count: usize, record_count: usize) -> Self {
        Self {
            item_count,
            records: Vec::with_capacity(record_count),
        }
    }

    /// Append a record
    ///
    /// # Panics
    ///
    /// Panics if the record's score count differs from the store's question
    /// count. The loader guarantees this never happens for parsed input.
    pub fn push(&mut self, record: Record) {
        assert_eq!(
            record.scores.len(),
            self.item_count,
            "record {} has {} scores, store expects {}",
            record.id,
            record.scores.len(),
            self.item_count
        );
        self.records.push(record);
    }

    /// Number of questions per record
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Mutable access for handing each record to its worker
    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}
