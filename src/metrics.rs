//! Capability contract for per-stage metric snapshots.
//!
//! Pipeline stages live outside this crate; a stage participates in a
//! benchmark record by satisfying [`ModuleMetrics`]. The record never
//! inspects a snapshot beyond this surface.

use std::fmt;

use serde_json::{Map, Value};

/// Metric snapshot produced by one pipeline module.
///
/// Implementations must be deep-copyable through [`ModuleMetrics::boxed_clone`]
/// so that chains of snapshots can be cloned without aliasing: the returned
/// box must share no mutable state with `self`.
pub trait ModuleMetrics: fmt::Debug {
    /// Identifier of the pipeline stage (e.g., "mapping", "solving").
    fn module_name(&self) -> &str;

    /// The stage's configuration as a string-keyed mapping.
    ///
    /// Returned by value: callers fold it into hash trees and documents
    /// that must not alias the live snapshot.
    fn module_config(&self) -> Map<String, Value>;

    /// Duration contributed by this stage, in milliseconds.
    fn total_time(&self) -> f64;

    /// Flat mapping of this stage's own summary fields.
    ///
    /// Used verbatim as the base of the stage's node in the flattened run
    /// document. The record reserves the `module_level` and `submodule` keys
    /// and overwrites them if present here.
    fn flatten(&self) -> Map<String, Value>;

    /// Independent deep copy of this snapshot.
    fn boxed_clone(&self) -> Box<dyn ModuleMetrics>;
}

impl Clone for Box<dyn ModuleMetrics> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}
