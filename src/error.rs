//! Typed errors for the load and run phases
//!
//! Every error here is terminal for the run. Callers restart from scratch;
//! nothing is retried or resumed.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning input text into a `RecordStore`
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read input file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("input is empty: expected a header with record and question counts")]
    MissingHeader,

    #[error("line {line}: expected {field}, found {token:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        token: String,
    },

    #[error("question count must be at least 1")]
    NoQuestions,

    #[error("line {line}: record {record_id} has score {score}, expected 0..=100")]
    ScoreOutOfRange {
        line: usize,
        record_id: i64,
        score: i64,
    },

    #[error("input ended early: expected {expected} records, found {found} complete")]
    Truncated { expected: usize, found: usize },

    #[error("line {line}: unexpected data after the last declared record")]
    TrailingData { line: usize },
}

/// Errors raised while running the worker fan-out
///
/// None of these produce a report: a run with fewer completed workers than
/// records holds an inconsistent aggregate.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to spawn worker for record index {index}")]
    Spawn {
        index: usize,
        #[source]
        source: io::Error,
    },

    #[error("worker for record {record_id} panicked")]
    WorkerPanicked { record_id: i64 },

    #[error("a worker thread panicked before it was joined")]
    ScopePanicked,

    #[error("run incomplete: {completed} of {expected} records were merged")]
    Incomplete { completed: u64, expected: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_messages() {
        let err = LoadError::InvalidNumber {
            line: 3,
            field: "score",
            token: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "line 3: expected score, found \"abc\"");

        let err = LoadError::Truncated { expected: 4, found: 2 };
        assert_eq!(
            err.to_string(),
            "input ended early: expected 4 records, found 2 complete"
        );
    }

    #[test]
    fn test_run_error_source() {
        use std::error::Error as _;

        let err = RunError::Spawn {
            index: 7,
            source: io::Error::new(io::ErrorKind::WouldBlock, "no threads"),
        };
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "failed to spawn worker for record index 7");
    }
}
