//! Configuration validation

use super::*;
use crate::record::MAX_SCORE;
use anyhow::Result;

/// Longest jitter a worker may be configured to take
pub const MAX_JITTER_US: u64 = 1_000_000;

/// Validate complete configuration
pub fn validate_config(config: &RunConfig) -> Result<()> {
    validate_input(&config.input)?;
    validate_output(&config.output)?;
    validate_grading(&config.grading)?;
    validate_workers(&config.workers)?;

    Ok(())
}

/// Validate input configuration
pub fn validate_input(input: &InputConfig) -> Result<()> {
    if input.path.as_os_str().is_empty() {
        anyhow::bail!("input path must not be empty");
    }
    if input.path == Path::new(STDOUT_PATH) {
        anyhow::bail!("input path \"-\" is not supported, give a file path");
    }
    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if output.path.as_os_str().is_empty() {
        anyhow::bail!("output path must not be empty (use \"-\" for stdout)");
    }
    Ok(())
}

/// Validate grading configuration
pub fn validate_grading(grading: &GradingConfig) -> Result<()> {
    if grading.pass_threshold > MAX_SCORE {
        anyhow::bail!(
            "pass_threshold must be between 0 and {}, got {}",
            MAX_SCORE,
            grading.pass_threshold
        );
    }
    Ok(())
}

/// Validate worker configuration
pub fn validate_workers(workers: &WorkerConfig) -> Result<()> {
    if let Some(jitter_us) = workers.jitter_us {
        if jitter_us > MAX_JITTER_US {
            anyhow::bail!(
                "jitter_us must be at most {} (1s), got {}",
                MAX_JITTER_US,
                jitter_us
            );
        }
    }
    Ok(())
}
