//! Per-run benchmark record aggregation
//!
//! One [`BenchmarkRecord`] per benchmark run collects run metadata (backlog
//! item number, timestamp, git provenance, repetition counters) together
//! with an ordered chain of per-stage metric snapshots, and produces:
//!
//! - a content-addressed hash of the pipeline configuration (SHA-256 over
//!   a canonical sorted-key JSON form), and
//! - a single nested run document whose nesting depth equals the number of
//!   chained modules.
//!
//! Pipeline stages stay external: they participate through the
//! [`ModuleMetrics`] capability trait. [`StoredRecord`] wraps a document
//! rehydrated from a previous run behind the same [`RunRecord`] read
//! contract, so orchestrators dispatch over live and replayed records
//! without type inspection.

pub mod chain;
pub mod error;
pub mod fakes;
pub mod metrics;
pub mod record;
pub mod stored;

pub use chain::MetricChain;
pub use error::{RecordError, Result};
pub use metrics::ModuleMetrics;
pub use record::{BenchmarkRecord, RunRecord, TOTAL_TIME_UNIT};
pub use stored::StoredRecord;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
