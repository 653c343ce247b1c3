//! TOML configuration file parsing
//!
//! ```toml
//! [input]
//! path = "input.txt"
//!
//! [output]
//! path = "results.txt"
//! format = "text"      # text | json | csv
//!
//! [grading]
//! pass_threshold = 60
//!
//! [workers]
//! jitter_us = 500
//! seed = 42
//! ```
//!
//! Every section and key is optional.

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert::{convert_output_format, parse_time_us};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<RunConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<RunConfig> {
    let config: RunConfig = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: RunConfig) -> Result<RunConfig> {
    if let Some(ref input) = cli.input {
        config.input.path = input.clone();
    }

    if let Some(ref output) = cli.output {
        config.output.path = output.clone();
    }
    if let Some(format) = cli.format {
        config.output.format = convert_output_format(format);
    }

    if let Some(threshold) = cli.pass_threshold {
        config.grading.pass_threshold = threshold;
    }

    if let Some(ref jitter) = cli.jitter {
        let jitter_us = parse_time_us(jitter).context("Invalid jitter")?;
        config.workers.jitter_us = Some(jitter_us);
    }
    if let Some(seed) = cli.seed {
        config.workers.seed = seed;
    }

    Ok(config)
}

/// Build the effective configuration from CLI arguments
///
/// Loads the TOML file named by `--config` if any, otherwise starts from
/// defaults, then applies CLI overrides.
pub fn build_config(cli: &Cli) -> Result<RunConfig> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => RunConfig::default(),
    };

    merge_cli_with_config(cli, base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_parse_empty_toml() {
        let config = parse_toml_string("").unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_parse_full_toml() {
        let config = parse_toml_string(
            r#"
            [input]
            path = "exams/input.txt"

            [output]
            path = "-"
            format = "csv"

            [grading]
            pass_threshold = 55

            [workers]
            jitter_us = 500
            seed = 42
            "#,
        )
        .unwrap();

        assert_eq!(config.input.path, PathBuf::from("exams/input.txt"));
        assert!(config.output.is_stdout());
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.grading.pass_threshold, 55);
        assert_eq!(config.workers.jitter_us, Some(500));
        assert_eq!(config.workers.seed, 42);
    }

    #[test]
    fn test_parse_partial_section_keeps_defaults() {
        let config = parse_toml_string("[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.path, PathBuf::from("results.txt"));
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(parse_toml_string("[output]\nformat = \"xml\"\n").is_err());
        assert!(parse_toml_string("[grading]\npass_threshold = \"sixty\"\n").is_err());
    }

    #[test]
    fn test_cli_overrides_toml() {
        let config = parse_toml_string(
            "[output]\npath = \"out.json\"\nformat = \"json\"\n[grading]\npass_threshold = 70\n",
        )
        .unwrap();
        let cli = Cli::try_parse_from([
            "scorepulse",
            "other.txt",
            "--pass-threshold",
            "50",
            "--jitter",
            "1ms",
        ])
        .unwrap();

        let merged = merge_cli_with_config(&cli, config).unwrap();
        assert_eq!(merged.input.path, PathBuf::from("other.txt"));
        assert_eq!(merged.output.path, PathBuf::from("out.json"));
        assert_eq!(merged.output.format, OutputFormat::Json);
        assert_eq!(merged.grading.pass_threshold, 50);
        assert_eq!(merged.workers.jitter_us, Some(1000));
    }

    #[test]
    fn test_invalid_jitter_rejected() {
        let cli = Cli::try_parse_from(["scorepulse", "--jitter", "soon"]).unwrap();
        assert!(merge_cli_with_config(&cli, RunConfig::default()).is_err());
    }

    #[test]
    fn test_build_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[workers]\nseed = 7").unwrap();

        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["scorepulse", "--config", path.as_str()]).unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.workers.seed, 7);
        assert_eq!(config.grading.pass_threshold, 60);
    }

    #[test]
    fn test_build_config_missing_file() {
        let cli = Cli::try_parse_from(["scorepulse", "--config", "/nonexistent/scorepulse.toml"]).unwrap();
        assert!(build_config(&cli).is_err());
    }
}
