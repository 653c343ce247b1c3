//! scorepulse - Parallel exam-result aggregation
//!
//! scorepulse grades a fixed batch of exam submissions in parallel, one worker
//! thread per submission, and folds every worker's result into a single set of
//! shared statistics guarded by one mutex.
//!
//! # Architecture
//!
//! - **Records**: loaded once, each owned by exactly one worker during the run
//! - **Workers**: compute a local average and pass flag, then merge under lock
//! - **Aggregate**: per-question pass counts, total passed, highest/lowest grade
//! - **Coordinator**: spawns one worker per record, joins all, assembles report
//! - **Output**: text, JSON, and CSV renderers
//!
//! # Example
//!
//! ```
//! use scorepulse::config::RunConfig;
//! use scorepulse::coordinator::Coordinator;
//! use scorepulse::record::loader::parse_records;
//!
//! let store = parse_records("3 2\n1 80 40\n2 60 60\n3 100 100\n")?;
//! let report = Coordinator::new(RunConfig::default()).run(store)?;
//!
//! assert_eq!(report.summary.per_item_passed, vec![3, 2]);
//! assert_eq!(report.summary.total_passed, 3);
//! assert_eq!(report.summary.highest(), Some(100));
//! assert_eq!(report.summary.lowest(), Some(40));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod output;
pub mod record;
pub mod stats;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::RunConfig;
pub use coordinator::{Coordinator, RunReport};
pub use record::{Record, RecordStore, Score};
pub use stats::{AggregateSummary, GlobalAggregate};

/// Result type used throughout scorepulse
pub type Result<T> = anyhow::Result<T>;
