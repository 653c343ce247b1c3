//! JSON output formatting
//!
//! One document per run:
//!
//! ```json
//! {
//!   "generated_at": "2026-01-01T00:00:00+00:00",
//!   "record_count": 3,
//!   "item_count": 2,
//!   "pass_threshold": 60,
//!   "elapsed_us": 412,
//!   "records": [{ "id": 1, "average": 60.0, "passed": true }],
//!   "statistics": {
//!     "per_item_passed": [3, 2],
//!     "total_passed": 3,
//!     "highest": 100,
//!     "lowest": 40
//!   }
//! }
//! ```
//!
//! `highest` and `lowest` are `null` when there were no records.

use crate::coordinator::{RecordResult, RunReport};
use crate::output::round2;
use crate::record::Score;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Top-level JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub record_count: usize,
    pub item_count: usize,
    pub pass_threshold: Score,
    pub elapsed_us: u64,
    pub records: Vec<RecordResult>,
    pub statistics: JsonStatistics,
}

/// Cross-record statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonStatistics {
    pub per_item_passed: Vec<u64>,
    pub total_passed: u64,
    pub highest: Option<Score>,
    pub lowest: Option<Score>,
}

impl JsonReport {
    pub fn from_report(report: &RunReport) -> Self {
        let summary = &report.summary;
        Self {
            generated_at: Utc::now().to_rfc3339(),
            record_count: report.records.len(),
            item_count: report.item_count(),
            pass_threshold: report.pass_threshold(),
            elapsed_us: report.elapsed.as_micros() as u64,
            records: report
                .records
                .iter()
                .map(|r| RecordResult {
                    id: r.id,
                    average: round2(r.average),
                    passed: r.passed,
                })
                .collect(),
            statistics: JsonStatistics {
                per_item_passed: summary.per_item_passed.clone(),
                total_passed: summary.total_passed,
                highest: summary.highest(),
                lowest: summary.lowest(),
            },
        }
    }
}

/// Write the JSON report, pretty-printed, with a trailing newline
pub fn write_json<W: Write>(report: &RunReport, w: &mut W) -> io::Result<()> {
    let doc = JsonReport::from_report(report);
    serde_json::to_writer_pretty(&mut *w, &doc)?;
    writeln!(w)
}
