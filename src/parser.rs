//! Tolerant line-oriented parsing of the metrics log.
//!
//! The log is one JSON object per line, appended by the loop after each
//! iteration. Interrupted runs leave blank or truncated lines behind, so
//! everything that fails to decode is skipped rather than reported.

use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::models::Record;

/// Read the metrics log at `path` into records, in file order.
///
/// A missing or unreadable file is a soft condition: a diagnostic goes to
/// stderr and the empty vector flows on to the rest of the pipeline.
/// Blank lines, undecodable lines, and lines holding non-object JSON are
/// skipped silently.
pub fn parse_metrics(path: &Path) -> Vec<Record> {
    if !path.exists() {
        eprintln!("Error: Metrics file not found at {}", path.display());
        return Vec::new();
    }

    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: cannot read metrics file {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let reader = std::io::BufReader::new(file);
    let mut records: Vec<Record> = Vec::new();
    let mut lines_read = 0u64;
    let mut lines_skipped = 0u64;

    for line_result in reader.lines() {
        let line = match line_result {
            Ok(l) => l,
            Err(_) => continue,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        lines_read += 1;

        let value: serde_json::Value = match serde_json::from_str(trimmed) {
            Ok(v) => v,
            Err(e) => {
                debug!("Skipping undecodable line in {}: {}", path.display(), e);
                lines_skipped += 1;
                continue;
            }
        };

        match Record::from_value(&value) {
            Some(record) => records.push(record),
            None => {
                debug!("Skipping non-object line in {}", path.display());
                lines_skipped += 1;
            }
        }
    }

    // Undecodable lines are expected noise from older log formats, so the
    // skip count stays at debug level.
    debug!(
        "Parsed {} records from {} ({} of {} non-empty lines skipped)",
        records.len(),
        path.display(),
        lines_skipped,
        lines_read
    );

    records
}
