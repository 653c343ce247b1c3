//! Report output
//!
//! Renders a [`RunReport`] as text, JSON, or CSV to a file or stdout.
//! Rendering happens strictly after the coordinator's barrier.

pub mod csv;
pub mod json;
pub mod text;

use crate::config::{OutputConfig, OutputFormat};
use crate::coordinator::RunReport;
use crate::Result;
use anyhow::Context;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Render `report` in `format` into `writer`
pub fn render<W: Write>(report: &RunReport, format: OutputFormat, writer: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Text => text::write_text(report, writer),
        OutputFormat::Json => json::write_json(report, writer),
        OutputFormat::Csv => csv::write_csv(report, writer),
    }
}

/// Render `report` to the destination named in `output`
pub fn write_report(report: &RunReport, output: &OutputConfig) -> Result<()> {
    if output.is_stdout() {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        render(report, output.format, &mut writer).context("Failed to write report to stdout")?;
        writer.flush().context("Failed to flush stdout")?;
        return Ok(());
    }

    let file = File::create(&output.path)
        .with_context(|| format!("Failed to create output file: {}", output.path.display()))?;
    let mut writer = BufWriter::new(file);
    render(report, output.format, &mut writer)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write report: {}", output.path.display()))?;

    Ok(())
}

/// Round to two decimal places, matching the text report
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::coordinator::{Coordinator, RunReport};
    use crate::record::loader::parse_records;
    use crate::RunConfig;

    /// Report for the three-record reference scenario
    pub fn reference_report() -> RunReport {
        report_for("3 2\n1 80 40\n2 60 60\n3 100 100\n")
    }

    pub fn report_for(input: &str) -> RunReport {
        let store = parse_records(input).unwrap();
        Coordinator::new(RunConfig::default()).run(store).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_round2() {
        assert_eq!(round2(60.0), 60.0);
        assert_eq!(round2(58.333333), 58.33);
        assert_eq!(round2(66.666666), 66.67);
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        let output = OutputConfig {
            path: path.clone(),
            format: OutputFormat::Csv,
        };

        write_report(&test_support::reference_report(), &output).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("id,average,result\n"));
        assert_eq!(contents.lines().count(), 4);
    }

    #[test]
    fn test_write_report_bad_directory() {
        let output = OutputConfig {
            path: PathBuf::from("/nonexistent-dir/scorepulse/results.txt"),
            format: OutputFormat::Text,
        };
        assert!(write_report(&test_support::reference_report(), &output).is_err());
    }
}
