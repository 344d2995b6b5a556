//! Data models for the benchmark analyzer.
//!
//! This module contains the core data structures used throughout
//! the application for representing metric records, histograms,
//! and aggregate statistics.

use serde_json::Value;
use std::collections::HashMap;

/// Fallback name for records that carry no `tool` or `model` field.
pub const UNKNOWN_LABEL: &str = "unknown";

/// One measured iteration decoded from the metrics log.
///
/// Every field is optional: the log is written by more than one generation
/// of the loop, so absent or wrong-typed fields resolve to a default
/// through the accessors instead of invalidating the record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Wall-clock latency of the iteration in seconds.
    pub latency: Option<f64>,
    /// Estimated token usage of the iteration.
    pub tokens: Option<u64>,
    /// Consecutive lazy iterations observed at this point in the run.
    pub lazy_streak: Option<u64>,
    /// Tool that drove the iteration.
    pub tool: Option<String>,
    /// Model that served the iteration.
    pub model: Option<String>,
}

impl Record {
    /// Build a record from one decoded log line.
    ///
    /// Returns `None` when the value is not a JSON object. Unrecognized
    /// keys are ignored; recognized keys holding the wrong type are
    /// treated as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        Some(Self {
            latency: obj.get("latency").and_then(Value::as_f64),
            tokens: obj.get("tokens").and_then(Value::as_u64),
            lazy_streak: obj.get("lazy_streak").and_then(Value::as_u64),
            tool: obj.get("tool").and_then(Value::as_str).map(String::from),
            model: obj.get("model").and_then(Value::as_str).map(String::from),
        })
    }

    /// Latency in seconds, defaulting to 0.
    pub fn latency(&self) -> f64 {
        self.latency.unwrap_or(0.0)
    }

    /// Token count, defaulting to 0.
    pub fn tokens(&self) -> u64 {
        self.tokens.unwrap_or(0)
    }

    /// Lazy streak, defaulting to 0.
    pub fn lazy_streak(&self) -> u64 {
        self.lazy_streak.unwrap_or(0)
    }

    /// Tool name, defaulting to [`UNKNOWN_LABEL`].
    pub fn tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(UNKNOWN_LABEL)
    }

    /// Model name, defaulting to [`UNKNOWN_LABEL`].
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(UNKNOWN_LABEL)
    }
}

/// Count-per-name mapping that remembers first-seen order.
///
/// `HashMap` iteration order is arbitrary, so keys are also tracked in a
/// separate list in the order they first appear. Reports list categories
/// in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    counts: HashMap<String, u64>,
    order: Vec<String>,
}

impl Histogram {
    /// Increment the count for `name`, registering it on first sight.
    pub fn record(&mut self, name: &str) {
        if !self.counts.contains_key(name) {
            self.order.push(name.to_string());
        }
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Count for a single name, 0 when never seen.
    #[allow(dead_code)] // Utility for lookups
    pub fn get(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Number of distinct names.
    #[allow(dead_code)] // Utility for statistics
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether any name has been recorded.
    #[allow(dead_code)] // Utility for statistics
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts.
    #[allow(dead_code)] // Invariant check: counts sum to the record total
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate `(name, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.order
            .iter()
            .map(move |name| (name.as_str(), self.counts[name]))
    }
}

/// Aggregate rollup of every record in one metrics log.
///
/// Created once per run; `None` at the call site signals an empty log.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    /// Number of records that decoded successfully.
    pub total_iterations: usize,
    /// Sum of all latencies in seconds.
    pub total_latency: f64,
    /// Sum of all token counts.
    pub total_tokens: u64,
    /// Arithmetic mean latency per iteration.
    pub avg_latency: f64,
    /// Arithmetic mean tokens per iteration.
    pub avg_tokens: f64,
    /// Largest lazy streak seen in any record.
    pub max_lazy_streak: u64,
    /// Iterations per tool, in first-seen order.
    pub tools: Histogram,
    /// Iterations per model, in first-seen order.
    pub models: Histogram,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_from_full_object() {
        let value = json!({
            "latency": 1.5,
            "tokens": 42,
            "lazy_streak": 3,
            "tool": "editor",
            "model": "sonnet",
        });

        let record = Record::from_value(&value).unwrap();
        assert_eq!(record.latency(), 1.5);
        assert_eq!(record.tokens(), 42);
        assert_eq!(record.lazy_streak(), 3);
        assert_eq!(record.tool(), "editor");
        assert_eq!(record.model(), "sonnet");
    }

    #[test]
    fn test_record_defaults_for_missing_fields() {
        let record = Record::from_value(&json!({})).unwrap();
        assert_eq!(record.latency(), 0.0);
        assert_eq!(record.tokens(), 0);
        assert_eq!(record.lazy_streak(), 0);
        assert_eq!(record.tool(), UNKNOWN_LABEL);
        assert_eq!(record.model(), UNKNOWN_LABEL);
    }

    #[test]
    fn test_record_defaults_for_wrong_typed_fields() {
        // A record with garbage field types is kept, not dropped.
        let value = json!({
            "latency": "fast",
            "tokens": -7,
            "lazy_streak": [1, 2],
            "tool": 9,
            "model": null,
        });

        let record = Record::from_value(&value).unwrap();
        assert_eq!(record.latency(), 0.0);
        assert_eq!(record.tokens(), 0);
        assert_eq!(record.lazy_streak(), 0);
        assert_eq!(record.tool(), UNKNOWN_LABEL);
        assert_eq!(record.model(), UNKNOWN_LABEL);
    }

    #[test]
    fn test_record_accepts_integer_latency() {
        let record = Record::from_value(&json!({"latency": 2})).unwrap();
        assert_eq!(record.latency(), 2.0);
    }

    #[test]
    fn test_record_rejects_non_objects() {
        assert!(Record::from_value(&json!(3)).is_none());
        assert!(Record::from_value(&json!("latency")).is_none());
        assert!(Record::from_value(&json!([{"latency": 1.0}])).is_none());
        assert!(Record::from_value(&json!(null)).is_none());
    }

    #[test]
    fn test_record_ignores_unrecognized_keys() {
        let value = json!({"tokens": 5, "iteration": 12, "phase": "build"});
        let record = Record::from_value(&value).unwrap();
        assert_eq!(record.tokens(), 5);
    }

    #[test]
    fn test_histogram_counts_and_order() {
        let mut hist = Histogram::default();
        hist.record("b");
        hist.record("a");
        hist.record("b");
        hist.record("c");

        let pairs: Vec<_> = hist.iter().collect();
        assert_eq!(pairs, vec![("b", 2), ("a", 1), ("c", 1)]);
        assert_eq!(hist.get("b"), 2);
        assert_eq!(hist.get("missing"), 0);
        assert_eq!(hist.len(), 3);
        assert_eq!(hist.total(), 4);
    }

    #[test]
    fn test_histogram_empty() {
        let hist = Histogram::default();
        assert!(hist.is_empty());
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.iter().count(), 0);
    }
}
