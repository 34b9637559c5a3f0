//! The per-run benchmark record and its flattened document.

use chrono::Utc;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::chain::MetricChain;
use crate::metrics::ModuleMetrics;

/// Unit for all recorded durations.
pub const TOTAL_TIME_UNIT: &str = "ms";

/// Shared read contract over live and replayed run records.
///
/// The orchestrator calls `sum_up_times` then `to_document` on every record
/// it holds, without caring whether the record is being built during this
/// run ([`BenchmarkRecord`]) or was rehydrated from a previous one
/// ([`StoredRecord`](crate::StoredRecord)).
pub trait RunRecord {
    /// Fold per-module timings into the record's total, where applicable.
    fn sum_up_times(&mut self);

    /// The full run document.
    fn to_document(&self) -> Value;
}

/// All metric snapshots and general information generated by a single
/// benchmark run.
///
/// Created once per run before the first module executes; the orchestrator
/// appends one snapshot per module at whichever chain end matches the
/// module's pipeline position. `Clone` produces a fully independent deep
/// copy, chain elements included.
#[derive(Debug, Clone)]
pub struct BenchmarkRecord {
    /// Number of the item in the benchmark backlog.
    pub benchmark_backlog_item_number: u64,

    /// Timestamp of the benchmark run.
    pub timestamp: String,

    /// Git revision number during the benchmark run.
    pub git_revision_number: String,

    /// Indication if there were uncommitted changes during the run.
    pub git_uncommitted_changes: String,

    /// Current repetition of the benchmark run (1-based).
    pub repetition: u32,

    /// Total repetitions of the benchmark run.
    pub total_repetitions: u32,

    /// Summed module timings; `None` until [`sum_up_times`](Self::sum_up_times).
    pub total_time: Option<f64>,

    /// Unit of `total_time`.
    pub total_time_unit: &'static str,

    chain: MetricChain,
}

impl BenchmarkRecord {
    /// Create a record with an empty metric chain.
    pub fn new(
        benchmark_backlog_item_number: u64,
        timestamp: String,
        git_revision_number: String,
        git_uncommitted_changes: String,
        repetition: u32,
        total_repetitions: u32,
    ) -> Self {
        BenchmarkRecord {
            benchmark_backlog_item_number,
            timestamp,
            git_revision_number,
            git_uncommitted_changes,
            repetition,
            total_repetitions,
            total_time: None,
            total_time_unit: TOTAL_TIME_UNIT,
            chain: MetricChain::new(),
        }
    }

    /// RFC 3339 UTC timestamp string for stamping a run at creation.
    pub fn timestamp_now() -> String {
        Utc::now().to_rfc3339()
    }

    /// Append a module's snapshot to the end of the chain.
    pub fn append_right(&mut self, metrics: Box<dyn ModuleMetrics>) {
        debug!(
            "Appended module record '{}' at chain tail (length: {})",
            metrics.module_name(),
            self.chain.len() + 1
        );
        self.chain.push_back(metrics);
    }

    /// Append a module's snapshot to the beginning of the chain.
    pub fn append_left(&mut self, metrics: Box<dyn ModuleMetrics>) {
        debug!(
            "Appended module record '{}' at chain head (length: {})",
            metrics.module_name(),
            self.chain.len() + 1
        );
        self.chain.push_front(metrics);
    }

    /// The metric chain attached so far, in pipeline execution order.
    pub fn chain(&self) -> &MetricChain {
        &self.chain
    }

    /// Sum up the recorded timings.
    ///
    /// Sets `total_time` to the sum over all snapshots currently in the
    /// chain (0.0 when empty). Idempotent for an unchanged chain.
    pub fn sum_up_times(&mut self) {
        self.total_time = Some(self.chain.iter().map(|m| m.total_time()).sum());
    }

    /// Content-addressed fingerprint of the pipeline configuration.
    ///
    /// Builds the nested `{module_name, module_config, submodule}` tree over
    /// an independent copy of the chain, serializes it with keys sorted
    /// lexicographically at every level, and returns the hex-encoded SHA-256
    /// of that canonical string. Equal ordered sequences of (name, config)
    /// pairs yield equal hashes regardless of config key insertion order;
    /// the digest is stable across processes and platforms.
    pub fn config_hash(&self) -> String {
        let tree = config_tree(self.chain.clone());
        let mut canonical = String::new();
        write_canonical(&tree, &mut canonical);

        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        let digest = hex::encode(hasher.finalize());
        debug!(
            "Computed config hash {} over {} module(s)",
            &digest[..12],
            self.chain.len()
        );
        digest
    }

    /// The full run document.
    ///
    /// Run-level metadata verbatim, the config hash, and a `module` subtree
    /// with one nesting level per chained snapshot. Re-derived fresh on
    /// every call; never fails, even with an empty chain (`module` is then
    /// an empty mapping). `total_time` serializes as null until
    /// [`sum_up_times`](Self::sum_up_times) has run.
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();
        doc.insert(
            "benchmark_backlog_item_number".to_string(),
            Value::from(self.benchmark_backlog_item_number),
        );
        doc.insert(
            "timestamp".to_string(),
            Value::String(self.timestamp.clone()),
        );
        doc.insert("config_hash".to_string(), Value::String(self.config_hash()));
        doc.insert(
            "total_time".to_string(),
            match self.total_time {
                Some(total) => Value::from(total),
                None => Value::Null,
            },
        );
        doc.insert(
            "total_time_unit".to_string(),
            Value::from(self.total_time_unit),
        );
        doc.insert(
            "git_revision_number".to_string(),
            Value::String(self.git_revision_number.clone()),
        );
        doc.insert(
            "git_uncommitted_changes".to_string(),
            Value::String(self.git_uncommitted_changes.clone()),
        );
        doc.insert("repetition".to_string(), Value::from(self.repetition));
        doc.insert(
            "total_repetitions".to_string(),
            Value::from(self.total_repetitions),
        );
        doc.insert("module".to_string(), module_tree(self.chain.clone()));
        Value::Object(doc)
    }
}

impl RunRecord for BenchmarkRecord {
    fn sum_up_times(&mut self) {
        BenchmarkRecord::sum_up_times(self);
    }

    fn to_document(&self) -> Value {
        BenchmarkRecord::to_document(self)
    }
}

/// Nested `{module_name, module_config, submodule}` tree for hashing.
///
/// Consumes an owned chain copy back-to-front so each node wraps the tree
/// built so far; the innermost `submodule` (and an empty chain's whole
/// tree) is an empty mapping.
fn config_tree(chain: MetricChain) -> Value {
    let mut node = Value::Object(Map::new());
    for metrics in chain.into_iter().rev() {
        let mut map = Map::new();
        map.insert(
            "module_name".to_string(),
            Value::String(metrics.module_name().to_string()),
        );
        map.insert(
            "module_config".to_string(),
            Value::Object(metrics.module_config()),
        );
        map.insert("submodule".to_string(), node);
        node = Value::Object(map);
    }
    node
}

/// Nested run document subtree: one level per snapshot, front-to-back.
///
/// Each level is the snapshot's own flattened fields plus `module_level`
/// (0-based depth) and `submodule`; the injected keys are inserted last and
/// win over same-named snapshot fields.
fn module_tree(chain: MetricChain) -> Value {
    let mut node = Value::Object(Map::new());
    for (level, metrics) in chain.into_iter().enumerate().rev() {
        let mut map = metrics.flatten();
        map.insert("module_level".to_string(), Value::from(level as u64));
        map.insert("submodule".to_string(), node);
        node = Value::Object(map);
    }
    node
}

/// Serialize a value as compact JSON with object keys sorted
/// lexicographically at every level.
///
/// serde_json's map only iterates in key order as long as no crate in the
/// dependency graph enables its `preserve_order` feature; the hash input
/// must not depend on that, so keys are sorted explicitly here.
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            out.push('{');
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        other => out.push_str(&other.to_string()),
    }
}
