//! Integration tests for the full record lifecycle: append, sum, flatten,
//! and uniform dispatch over live and stored records.

use bench_record::fakes::StaticModuleMetrics;
use bench_record::{BenchmarkRecord, RunRecord, StoredRecord};
use serde_json::json;

fn two_stage_record() -> BenchmarkRecord {
    let mut record = BenchmarkRecord::new(
        1,
        "T0".to_string(),
        "abc123".to_string(),
        "false".to_string(),
        1,
        3,
    );
    record.append_right(Box::new(
        StaticModuleMetrics::new("mapping", 10.0).with_config("size", 4),
    ));
    record.append_right(Box::new(
        StaticModuleMetrics::new("solving", 25.0).with_config("backend", "x"),
    ));
    record
}

/// Test: end-to-end two-stage run produces the expected document
#[test]
fn test_end_to_end_two_stage_run() {
    let mut record = two_stage_record();

    record.sum_up_times();
    assert_eq!(record.total_time, Some(35.0));

    let doc = record.to_document();
    assert_eq!(doc["benchmark_backlog_item_number"], json!(1));
    assert_eq!(doc["timestamp"], json!("T0"));
    assert_eq!(doc["git_revision_number"], json!("abc123"));
    assert_eq!(doc["git_uncommitted_changes"], json!("false"));
    assert_eq!(doc["repetition"], json!(1));
    assert_eq!(doc["total_repetitions"], json!(3));
    assert_eq!(doc["total_time"], json!(35.0));
    assert_eq!(doc["total_time_unit"], json!("ms"));

    let outer = &doc["module"];
    assert_eq!(outer["module_level"], json!(0));
    assert_eq!(outer["module_name"], json!("mapping"));
    let inner = &outer["submodule"];
    assert_eq!(inner["module_level"], json!(1));
    assert_eq!(inner["module_name"], json!("solving"));
    assert_eq!(inner["submodule"], json!({}));
}

/// Test: config hash is stable across repeated document derivations
#[test]
fn test_config_hash_stable_across_calls() {
    let record = two_stage_record();
    let first = record.to_document();
    let second = record.to_document();
    assert_eq!(first["config_hash"], second["config_hash"]);
    assert_eq!(first["config_hash"], json!(record.config_hash()));
}

/// Test: a captured document does not change when the live record does
#[test]
fn test_captured_document_does_not_alias_live_record() {
    let mut record = two_stage_record();
    let captured = record.to_document();

    record.append_left(Box::new(StaticModuleMetrics::new("preprocess", 3.0)));
    record.sum_up_times();

    assert_eq!(captured["module"]["module_name"], json!("mapping"));
    assert_eq!(captured["total_time"], json!(null));
    assert_ne!(captured["config_hash"], record.to_document()["config_hash"]);
}

/// Test: a persisted document round-trips through the stored adapter
#[test]
fn test_rehydrated_record_matches_original_document() {
    let mut record = two_stage_record();
    record.sum_up_times();
    let doc = record.to_document();

    let persisted = serde_json::to_string(&doc).expect("document serializes");
    let stored = StoredRecord::from_json(&persisted).expect("rehydration");
    assert_eq!(stored.to_document(), doc);
}

/// Test: orchestrator-style dispatch treats live and stored records alike
#[test]
fn test_uniform_dispatch_over_record_kinds() {
    let live = two_stage_record();
    let stored = StoredRecord::new(json!({
        "benchmark_backlog_item_number": 2,
        "total_time": 8.0,
        "module": {}
    }));

    let mut records: Vec<Box<dyn RunRecord>> = vec![Box::new(live), Box::new(stored)];

    let docs: Vec<serde_json::Value> = records
        .iter_mut()
        .map(|record| {
            record.sum_up_times();
            record.to_document()
        })
        .collect();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["total_time"], json!(35.0));
    assert_eq!(docs[1]["total_time"], json!(8.0));
}
