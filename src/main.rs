//! scorepulse CLI entry point

use anyhow::{Context, Result};
use scorepulse::config::{cli::Cli, toml::build_config, validator::validate_config, RunConfig};
use scorepulse::coordinator::Coordinator;
use scorepulse::output::write_report;
use scorepulse::record::loader::load_records;
use scorepulse::util::logging;
use scorepulse::util::time::{calculate_rate, format_duration, format_rate};
use tracing::{debug, info};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    cli.validate()?;
    logging::init(cli.debug);

    let config = build_config(&cli)?;
    validate_config(&config).context("Configuration validation failed")?;
    debug!(?config, "effective configuration");

    let store = load_records(&config.input.path)
        .with_context(|| format!("Failed to load records from {}", config.input.path.display()))?;

    print_plan(&config, store.len(), store.item_count());

    if cli.dry_run {
        info!("dry run: configuration and input validated, no workers started");
        return Ok(());
    }

    let record_count = store.len();
    let report = Coordinator::new(config.clone())
        .run(store)
        .context("Grading run failed")?;

    write_report(&report, &config.output)?;

    info!(
        records = record_count,
        elapsed = %format_duration(report.elapsed),
        rate = %format_rate(calculate_rate(record_count as u64, report.elapsed)),
        "graded records (rate is records/s)"
    );
    if !config.output.is_stdout() {
        info!(path = %config.output.path.display(), format = %config.output.format, "report written");
    }

    Ok(())
}

/// Log what the run is about to do
fn print_plan(config: &RunConfig, records: usize, questions: usize) {
    info!(
        input = %config.input.path.display(),
        records,
        questions,
        pass_threshold = config.grading.pass_threshold,
        "loaded input"
    );
    if let Some(jitter) = config.workers.jitter() {
        info!(
            max = %format_duration(jitter),
            seed = config.workers.seed,
            "worker jitter enabled"
        );
    }
}
