//! Human-readable text output
//!
//! ```text
//! 1 60.00 Passed
//! 2 60.00 Passed
//! 3 100.00 Passed
//!
//! --- Overall Statistics ---
//! Number of students passing each question:
//! Question 1: 3 students passed.
//! Question 2: 2 students passed.
//! Total number of students who passed overall: 3
//! Highest grade: 100
//! Lowest grade: 40
//! ```

use crate::coordinator::RunReport;
use crate::record::Score;
use std::io::{self, Write};

/// Write the text report
pub fn write_text<W: Write>(report: &RunReport, w: &mut W) -> io::Result<()> {
    for record in &report.records {
        writeln!(
            w,
            "{} {:.2} {}",
            record.id,
            record.average,
            pass_label(record.passed)
        )?;
    }

    writeln!(w)?;

    let summary = &report.summary;
    writeln!(w, "--- Overall Statistics ---")?;
    writeln!(w, "Number of students passing each question:")?;
    for (idx, count) in summary.per_item_passed.iter().enumerate() {
        writeln!(w, "Question {}: {} students passed.", idx + 1, count)?;
    }
    writeln!(w, "Total number of students who passed overall: {}", summary.total_passed)?;
    writeln!(w, "Highest grade: {}", format_grade(summary.highest()))?;
    writeln!(w, "Lowest grade: {}", format_grade(summary.lowest()))?;

    Ok(())
}

/// Label used for a record's result
pub fn pass_label(passed: bool) -> &'static str {
    if passed {
        "Passed"
    } else {
        "Failed"
    }
}

fn format_grade(grade: Option<Score>) -> String {
    match grade {
        Some(g) => g.to_string(),
        None => "n/a".to_string(),
    }
}
