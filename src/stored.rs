//! Read-only adapter over a previously persisted run document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RecordError, Result};
use crate::record::RunRecord;

/// A run document rehydrated from persisted results.
///
/// Wraps one already-flattened document (e.g., one element of a persisted
/// list of past runs) behind the same read contract as
/// [`BenchmarkRecord`](crate::BenchmarkRecord), so consumers never
/// distinguish live from replayed records. Terminal and read-only from
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredRecord {
    record: Value,
}

impl StoredRecord {
    /// Wrap an already-flattened run document.
    pub fn new(record: Value) -> Self {
        StoredRecord { record }
    }

    /// Rehydrate a record from persisted JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: Value = serde_json::from_str(json)?;
        if !record.is_object() {
            return Err(RecordError::MalformedDocument(
                "stored run document must be a JSON object".to_string(),
            ));
        }
        Ok(StoredRecord { record })
    }
}

impl RunRecord for StoredRecord {
    /// Nothing to sum; the wrapped document already carries its totals.
    fn sum_up_times(&mut self) {}

    /// The wrapped document, unchanged.
    fn to_document(&self) -> Value {
        self.record.clone()
    }
}
