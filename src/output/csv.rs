//! CSV output formatting
//!
//! One row per record, in load order. Aggregate statistics are not part of
//! the CSV; use the text or JSON format for those.

use crate::coordinator::RunReport;
use crate::output::text::pass_label;
use std::io::{self, Write};

/// CSV header row
pub const CSV_HEADER: &str = "id,average,result";

/// Write the CSV report
pub fn write_csv<W: Write>(report: &RunReport, w: &mut W) -> io::Result<()> {
    writeln!(w, "{}", CSV_HEADER)?;
    for record in &report.records {
        writeln!(w, "{},{:.2},{}", record.id, record.average, pass_label(record.passed))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{reference_report, report_for};

    fn render(report: &RunReport) -> String {
        let mut buf = Vec::new();
        write_csv(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_csv_reference_scenario() {
        assert_eq!(
            render(&reference_report()),
            "id,average,result\n1,60.00,Passed\n2,60.00,Passed\n3,100.00,Passed\n"
        );
    }

    #[test]
    fn test_csv_negative_id_and_fail() {
        assert_eq!(
            render(&report_for("1 2\n-4 10 20\n")),
            "id,average,result\n-4,15.00,Failed\n"
        );
    }

    #[test]
    fn test_csv_no_records() {
        assert_eq!(render(&report_for("0 3\n")), "id,average,result\n");
    }
}
