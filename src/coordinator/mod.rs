//! Coordinator module
//!
//! Orchestrates one run: spawns one worker thread per record, waits for all
//! of them, and assembles the final [`RunReport`].
//!
//! # Lifecycle
//!
//! 1. **Fan-out**: every record is handed to its own thread through a fallible
//!    builder inside a scoped region, so records and the aggregate are
//!    borrowed rather than shared through `Arc`.
//! 2. **Barrier**: every handle is joined. Only after the last join does the
//!    coordinator touch the aggregate or any outcome.
//! 3. **Assembly**: the report is built only if every record has an outcome
//!    and the aggregate counted exactly one merge per record.
//!
//! A spawn failure or worker panic aborts the run. Workers that were already
//! running are still joined by the scope before the error is returned, and
//! their partial results are dropped.

use crate::config::RunConfig;
use crate::error::RunError;
use crate::record::{Record, RecordStore, Score};
use crate::stats::{AggregateSummary, GlobalAggregate};
use crate::util::time::format_duration;
use crate::worker::{Jitter, Worker};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Ratio of workers to CPUs above which a warning is logged
const OVERSUBSCRIPTION_WARN_FACTOR: usize = 64;

/// Final result for one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    pub id: i64,
    pub average: f64,
    pub passed: bool,
}

/// Everything the renderers need, frozen after the barrier
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Per-record results in load order
    pub records: Vec<RecordResult>,
    /// Cross-record statistics
    pub summary: AggregateSummary,
    /// Wall time of the concurrent phase
    pub elapsed: Duration,
}

impl RunReport {
    /// Build a report from the post-barrier state
    ///
    /// Fails with [`RunError::Incomplete`] if any record was never graded or
    /// the aggregate's merge count does not match the record count.
    pub fn assemble(
        store: &RecordStore,
        summary: AggregateSummary,
        elapsed: Duration,
    ) -> Result<Self, RunError> {
        let incomplete = || RunError::Incomplete {
            completed: summary.merged,
            expected: store.len(),
        };

        if summary.merged != store.len() as u64 {
            return Err(incomplete());
        }

        let records = store
            .iter()
            .map(|record| {
                record.outcome().map(|outcome| RecordResult {
                    id: record.id(),
                    average: outcome.average,
                    passed: outcome.passed,
                })
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(incomplete)?;

        Ok(Self {
            records,
            summary,
            elapsed,
        })
    }

    /// Number of questions per record
    pub fn item_count(&self) -> usize {
        self.summary.item_count()
    }

    /// Threshold the run was graded with
    pub fn pass_threshold(&self) -> Score {
        self.summary.pass_threshold
    }
}

/// Runs the worker fan-out for one record store
pub struct Coordinator {
    config: RunConfig,
}

impl Coordinator {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Grade every record in parallel and return the final report
    pub fn run(&self, mut store: RecordStore) -> Result<RunReport, RunError> {
        let record_count = store.len();
        let pass_threshold = self.config.grading.pass_threshold;
        let jitter = self.config.workers.jitter().map(|max| Jitter {
            max,
            seed: self.config.workers.seed,
        });

        let cpus = num_cpus::get();
        if record_count > cpus.saturating_mul(OVERSUBSCRIPTION_WARN_FACTOR) {
            warn!(
                records = record_count,
                cpus,
                "spawning one thread per record on a heavily oversubscribed machine"
            );
        }

        info!(
            records = record_count,
            questions = store.item_count(),
            pass_threshold,
            "starting workers"
        );

        let aggregate = GlobalAggregate::new(store.item_count(), pass_threshold);
        let start = Instant::now();

        spawn_and_join(store.records_mut(), &aggregate, pass_threshold, jitter)?;

        let elapsed = start.elapsed();
        let summary = aggregate.into_summary();
        let report = RunReport::assemble(&store, summary, elapsed)?;

        info!(
            records = record_count,
            passed = report.summary.total_passed,
            elapsed = %format_duration(elapsed),
            "all workers finished"
        );

        Ok(report)
    }
}

/// Spawn one worker per record and join them all
///
/// Returns only after every spawned thread has finished, whether or not an
/// error occurred.
fn spawn_and_join(
    records: &mut [Record],
    aggregate: &GlobalAggregate,
    pass_threshold: Score,
    jitter: Option<Jitter>,
) -> Result<(), RunError> {
    let scope_result = crossbeam::thread::scope(|scope| -> Result<(), RunError> {
        let mut handles = Vec::with_capacity(records.len());

        for (index, record) in records.iter_mut().enumerate() {
            let record_id = record.id();
            let handle = scope
                .builder()
                .name(format!("record-{}", index))
                .spawn(move |_| {
                    Worker::new(index, record, aggregate, pass_threshold)
                        .with_jitter(jitter)
                        .run();
                })
                .map_err(|source| RunError::Spawn { index, source })?;

            handles.push((record_id, handle));
        }

        debug!(workers = handles.len(), "all workers spawned, waiting");

        for (record_id, handle) in handles {
            handle
                .join()
                .map_err(|_| RunError::WorkerPanicked { record_id })?;
        }

        Ok(())
    });

    match scope_result {
        Ok(result) => result,
        Err(_) => Err(RunError::ScopePanicked),
    }
}
