//! Static fakes for the metrics capability (testing only)
//!
//! Provides `StaticModuleMetrics`, a snapshot with fixed contents that
//! satisfies [`ModuleMetrics`](crate::ModuleMetrics) without a real
//! pipeline stage behind it.

use serde_json::{Map, Value};

use crate::metrics::ModuleMetrics;
use crate::record::TOTAL_TIME_UNIT;

/// A metric snapshot with fixed name, config, timing, and summary fields.
#[derive(Debug, Clone)]
pub struct StaticModuleMetrics {
    name: String,
    config: Map<String, Value>,
    total_time: f64,
    extra: Map<String, Value>,
}

impl StaticModuleMetrics {
    /// Create a snapshot with an empty config and no extra summary fields.
    pub fn new(name: impl Into<String>, total_time: f64) -> Self {
        StaticModuleMetrics {
            name: name.into(),
            config: Map::new(),
            total_time,
            extra: Map::new(),
        }
    }

    /// Add a configuration entry.
    pub fn with_config(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.config.insert(key.to_string(), value.into());
        self
    }

    /// Add an extra summary field reported by `flatten`.
    pub fn with_metric(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

impl ModuleMetrics for StaticModuleMetrics {
    fn module_name(&self) -> &str {
        &self.name
    }

    fn module_config(&self) -> Map<String, Value> {
        self.config.clone()
    }

    fn total_time(&self) -> f64 {
        self.total_time
    }

    fn flatten(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("module_name".to_string(), Value::String(self.name.clone()));
        fields.insert(
            "module_config".to_string(),
            Value::Object(self.config.clone()),
        );
        fields.insert("total_time".to_string(), Value::from(self.total_time));
        fields.insert(
            "total_time_unit".to_string(),
            Value::from(TOTAL_TIME_UNIT),
        );
        for (key, value) in &self.extra {
            fields.insert(key.clone(), value.clone());
        }
        fields
    }

    fn boxed_clone(&self) -> Box<dyn ModuleMetrics> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_contains_builder_fields() {
        let metrics = StaticModuleMetrics::new("mapping", 10.0)
            .with_config("size", 4)
            .with_metric("solution_quality", 0.97);

        let flat = metrics.flatten();
        assert_eq!(flat["module_name"], json!("mapping"));
        assert_eq!(flat["module_config"], json!({"size": 4}));
        assert_eq!(flat["total_time"], json!(10.0));
        assert_eq!(flat["total_time_unit"], json!(TOTAL_TIME_UNIT));
        assert_eq!(flat["solution_quality"], json!(0.97));
    }

    #[test]
    fn test_boxed_clone_is_independent() {
        let metrics = StaticModuleMetrics::new("solving", 25.0).with_config("backend", "x");
        let cloned = metrics.boxed_clone();

        assert_eq!(cloned.module_name(), "solving");
        assert_eq!(cloned.module_config(), metrics.module_config());
        assert_eq!(cloned.total_time(), 25.0);
    }
}
