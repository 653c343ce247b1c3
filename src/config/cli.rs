//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    Text,
    /// JSON document
    Json,
    /// CSV, one row per record
    Csv,
}

/// scorepulse - Parallel exam-result aggregation
#[derive(Parser, Debug)]
#[command(name = "scorepulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input file with the record and question counts followed by the records
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Report destination (use "-" for stdout)
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// TOML configuration file (CLI flags override its values)
    #[arg(short = 'c', long, value_name = "FILE", env = "SCOREPULSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Minimum average that counts as passing, inclusive (0-100)
    #[arg(long)]
    pub pass_threshold: Option<u32>,

    /// Maximum random delay per worker before merging (e.g., 500us, 2ms)
    #[arg(long, value_name = "TIME")]
    pub jitter: Option<String>,

    /// Seed for worker jitter
    #[arg(long)]
    pub seed: Option<u64>,

    /// Validate configuration and input, then exit without grading
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Check argument combinations clap cannot express
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(threshold) = self.pass_threshold {
            if threshold > 100 {
                anyhow::bail!("--pass-threshold must be between 0 and 100, got {}", threshold);
            }
        }
        Ok(())
    }
}
