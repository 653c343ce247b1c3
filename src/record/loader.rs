//! Input file parsing
//!
//! The input is a stream of whitespace-separated integers. Line breaks carry
//! no meaning, but line numbers are tracked for error messages.
//!
//! ```text
//! N M
//! id s1 s2 .. sM      (repeated N times)
//! ```
//!
//! Any deviation is a fatal [`LoadError`]: the run never starts on partial
//! input.

use super::{Record, RecordStore, Score, MAX_SCORE};
use crate::error::LoadError;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Upper bound on the up-front allocation driven by the declared record count
const MAX_PREALLOCATED_RECORDS: usize = 4096;

/// Read and parse an input file
pub fn load_records(path: &Path) -> Result<RecordStore, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let store = parse_records(&contents)?;
    debug!(
        path = %path.display(),
        records = store.len(),
        questions = store.item_count(),
        "loaded input"
    );
    Ok(store)
}

/// Parse input text into a record store
pub fn parse_records(contents: &str) -> Result<RecordStore, LoadError> {
    let mut tokens = contents
        .lines()
        .enumerate()
        .flat_map(|(idx, line)| line.split_whitespace().map(move |tok| (idx + 1, tok)));

    let record_count: usize = match tokens.next() {
        Some((line, tok)) => parse_token(line, tok, "record count")?,
        None => return Err(LoadError::MissingHeader),
    };
    let item_count: usize = match tokens.next() {
        Some((line, tok)) => parse_token(line, tok, "question count")?,
        None => return Err(LoadError::MissingHeader),
    };
    if item_count == 0 {
        return Err(LoadError::NoQuestions);
    }

    let mut store =
        RecordStore::with_capacity(item_count, record_count.min(MAX_PREALLOCATED_RECORDS));

    for index in 0..record_count {
        let truncated = || LoadError::Truncated {
            expected: record_count,
            found: index,
        };

        let (line, tok) = tokens.next().ok_or_else(truncated)?;
        let id: i64 = parse_token(line, tok, "record id")?;

        let mut scores = Vec::with_capacity(item_count);
        for _ in 0..item_count {
            let (line, tok) = tokens.next().ok_or_else(truncated)?;
            // Parsed signed so negative scores report as out of range
            let raw: i64 = parse_token(line, tok, "score")?;
            if !(0..=i64::from(MAX_SCORE)).contains(&raw) {
                return Err(LoadError::ScoreOutOfRange {
                    line,
                    record_id: id,
                    score: raw,
                });
            }
            scores.push(raw as Score);
        }

        store.push(Record::new(id, scores));
    }

    if let Some((line, _)) = tokens.next() {
        return Err(LoadError::TrailingData { line });
    }

    Ok(store)
}

fn parse_token<T: FromStr>(line: usize, tok: &str, field: &'static str) -> Result<T, LoadError> {
    tok.parse().map_err(|_| LoadError::InvalidNumber {
        line,
        field,
        token: tok.to_string(),
    })
}
