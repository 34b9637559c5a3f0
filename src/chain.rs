//! Ordered double-ended chain of per-module metric snapshots.

use std::collections::VecDeque;

use crate::metrics::ModuleMetrics;

/// Ordered sequence of metric snapshots in pipeline execution order.
///
/// Snapshots are attached at either end (pipelines may prepend
/// pre-processing stages discovered after the fact) and never reordered or
/// removed during a run. `Clone` deep-copies every element, so a cloned
/// chain can be consumed destructively without touching the live one.
#[derive(Debug, Clone, Default)]
pub struct MetricChain {
    items: VecDeque<Box<dyn ModuleMetrics>>,
}

impl MetricChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a snapshot as the new last element. O(1).
    pub fn push_back(&mut self, metrics: Box<dyn ModuleMetrics>) {
        self.items.push_back(metrics);
    }

    /// Insert a snapshot as the new first element. O(1).
    pub fn push_front(&mut self, metrics: Box<dyn ModuleMetrics>) {
        self.items.push_front(metrics);
    }

    /// Number of snapshots in the chain.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the chain holds no snapshots yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the snapshots front-to-back.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ModuleMetrics> {
        self.items.iter().map(|boxed| boxed.as_ref())
    }
}

impl IntoIterator for MetricChain {
    type Item = Box<dyn ModuleMetrics>;
    type IntoIter = std::collections::vec_deque::IntoIter<Box<dyn ModuleMetrics>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
