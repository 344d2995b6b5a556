//! Record aggregation and statistics.
//!
//! One pass over the parsed records produces the counters, means, and
//! per-category histograms the report is rendered from.

use crate::models::{Histogram, Record, StatsSummary};

/// Roll the record sequence up into a [`StatsSummary`].
///
/// Returns `None` for an empty sequence, which downstream treats as
/// "nothing to report". Field access never fails: absent or wrong-typed
/// fields already resolved to defaults inside [`Record`].
pub fn aggregate(records: &[Record]) -> Option<StatsSummary> {
    if records.is_empty() {
        return None;
    }

    let total_iterations = records.len();
    let mut total_latency = 0.0f64;
    let mut total_tokens = 0u64;
    let mut max_lazy_streak = 0u64;
    let mut tools = Histogram::default();
    let mut models = Histogram::default();

    for record in records {
        total_latency += record.latency();
        total_tokens += record.tokens();
        max_lazy_streak = max_lazy_streak.max(record.lazy_streak());
        tools.record(record.tool());
        models.record(record.model());
    }

    let avg_latency = total_latency / total_iterations as f64;
    let avg_tokens = total_tokens as f64 / total_iterations as f64;

    Some(StatsSummary {
        total_iterations,
        total_latency,
        total_tokens,
        avg_latency,
        avg_tokens,
        max_lazy_streak,
        tools,
        models,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNKNOWN_LABEL;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(&value).unwrap()
    }

    #[test]
    fn test_aggregate_empty_is_none() {
        assert!(aggregate(&[]).is_none());
    }

    #[test]
    fn test_aggregate_two_records() {
        let records = vec![
            record(json!({"latency": 1.0, "tokens": 10, "tool": "a", "model": "x"})),
            record(json!({"latency": 3.0, "tokens": 20, "tool": "b", "model": "x"})),
        ];

        let summary = aggregate(&records).unwrap();
        assert_eq!(summary.total_iterations, 2);
        assert_eq!(summary.total_latency, 4.0);
        assert_eq!(summary.avg_latency, 2.0);
        assert_eq!(summary.total_tokens, 30);
        assert_eq!(summary.avg_tokens, 15.0);
        assert_eq!(summary.tools.get("a"), 1);
        assert_eq!(summary.tools.get("b"), 1);
        assert_eq!(summary.models.get("x"), 2);
    }

    #[test]
    fn test_histogram_counts_sum_to_total() {
        let records = vec![
            record(json!({"tool": "a", "model": "x"})),
            record(json!({"tool": "a"})),
            record(json!({"model": "y"})),
            record(json!({})),
        ];

        let summary = aggregate(&records).unwrap();
        assert_eq!(summary.tools.total(), summary.total_iterations as u64);
        assert_eq!(summary.models.total(), summary.total_iterations as u64);
    }

    #[test]
    fn test_missing_names_count_as_unknown() {
        let records = vec![
            record(json!({"tool": "a"})),
            record(json!({})),
            record(json!({})),
        ];

        let summary = aggregate(&records).unwrap();
        assert_eq!(summary.tools.get(UNKNOWN_LABEL), 2);
        assert_eq!(summary.models.get(UNKNOWN_LABEL), 3);
    }

    #[test]
    fn test_max_lazy_streak_defaults_missing_to_zero() {
        let records = vec![
            record(json!({"lazy_streak": 4})),
            record(json!({})),
            record(json!({"lazy_streak": 2})),
        ];

        let summary = aggregate(&records).unwrap();
        assert_eq!(summary.max_lazy_streak, 4);
    }

    #[test]
    fn test_all_defaults_record() {
        let summary = aggregate(&[record(json!({}))]).unwrap();
        assert_eq!(summary.total_iterations, 1);
        assert_eq!(summary.total_latency, 0.0);
        assert_eq!(summary.avg_latency, 0.0);
        assert_eq!(summary.total_tokens, 0);
        assert_eq!(summary.max_lazy_streak, 0);
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let records = vec![
            record(json!({"tool": "write", "model": "m2"})),
            record(json!({"tool": "bash", "model": "m1"})),
            record(json!({"tool": "write", "model": "m1"})),
        ];

        let summary = aggregate(&records).unwrap();
        let tools: Vec<_> = summary.tools.iter().map(|(n, _)| n.to_string()).collect();
        let models: Vec<_> = summary.models.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(tools, vec!["write", "bash"]);
        assert_eq!(models, vec!["m2", "m1"]);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let records = vec![
            record(json!({"latency": 0.5, "tokens": 3, "tool": "a"})),
            record(json!({"latency": 1.5, "tokens": 9, "model": "x"})),
        ];

        assert_eq!(aggregate(&records), aggregate(&records));
    }
}
