//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! Precedence is defaults, then the TOML file, then CLI flags.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::record::Score;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Path value meaning "standard output"
pub const STDOUT_PATH: &str = "-";

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub grading: GradingConfig,
    #[serde(default)]
    pub workers: WorkerConfig,
}

/// Where records are loaded from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the input file
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

fn default_input_path() -> PathBuf {
    PathBuf::from("input.txt")
}

/// Where and how the report is written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report destination, `-` for stdout
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    /// Report format
    #[serde(default)]
    pub format: OutputFormat,
}

impl OutputConfig {
    /// Whether the report goes to stdout
    pub fn is_stdout(&self) -> bool {
        self.path == Path::new(STDOUT_PATH)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: OutputFormat::default(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("results.txt")
}

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text, one line per record followed by overall statistics
    #[default]
    Text,
    /// Single JSON document
    Json,
    /// One CSV row per record
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Pass/fail rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Minimum average (and per-question score) that counts as passing, inclusive
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: Score,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            pass_threshold: default_pass_threshold(),
        }
    }
}

fn default_pass_threshold() -> Score {
    60
}

/// Worker behaviour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Upper bound on a random delay each worker takes before merging
    ///
    /// Used to shake out interleavings. The delay happens outside the lock.
    #[serde(default)]
    pub jitter_us: Option<u64>,
    /// Seed for the per-worker jitter generators
    #[serde(default)]
    pub seed: u64,
}

impl WorkerConfig {
    /// Jitter bound as a duration, `None` when disabled or zero
    pub fn jitter(&self) -> Option<Duration> {
        self.jitter_us
            .filter(|&us| us > 0)
            .map(Duration::from_micros)
    }
}
