//! CLI to Config conversion utilities

use crate::config::{self, cli};
use anyhow::{Context, Result};

/// Parse a time string (e.g., "100us", "1ms", "2s") to microseconds
///
/// A bare number is taken as microseconds.
pub fn parse_time_us(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase();

    let (num_str, multiplier) = if s.ends_with("us") {
        (s.trim_end_matches("us"), 1u64)
    } else if s.ends_with("ms") {
        (s.trim_end_matches("ms"), 1000)
    } else if s.ends_with('s') {
        (s.trim_end_matches('s'), 1_000_000)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .parse()
        .with_context(|| format!("Invalid time format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Time value too large: {}", s))
}

/// Convert CLI OutputFormat to config OutputFormat
pub fn convert_output_format(cli_format: cli::OutputFormat) -> config::OutputFormat {
    match cli_format {
        cli::OutputFormat::Text => config::OutputFormat::Text,
        cli::OutputFormat::Json => config::OutputFormat::Json,
        cli::OutputFormat::Csv => config::OutputFormat::Csv,
    }
}
