//! Markdown report generation.
//!
//! Renders a [`StatsSummary`] into the fixed-structure benchmark report
//! and delivers it to a file or stdout. Apart from the generation
//! timestamp the rendering is fully deterministic.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::Path;

use crate::models::StatsSummary;

/// Render the complete markdown document.
///
/// Lines are joined with `\n` and the document carries no trailing
/// newline, so repeated runs over the same log differ only in the
/// timestamp line.
pub fn render_report(summary: &StatsSummary, title: &str, generated_at: DateTime<Local>) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {}", title));
    lines.push(String::new());
    lines.push(format!(
        "Generated on: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(String::new());

    lines.extend(summary_lines(summary));
    lines.extend(utilization_lines(summary));

    lines.join("\n")
}

/// The `## Summary Metrics` block.
fn summary_lines(summary: &StatsSummary) -> Vec<String> {
    vec![
        "## Summary Metrics".to_string(),
        format!("- **Total Iterations:** {}", summary.total_iterations),
        format!("- **Total Execution Time:** {:.2}s", summary.total_latency),
        format!("- **Total Tokens (Est):** {}", summary.total_tokens),
        format!("- **Average Latency/Iteration:** {:.2}s", summary.avg_latency),
        format!("- **Average Tokens/Iteration:** {:.1}", summary.avg_tokens),
        format!("- **Max Lazy Streak:** {}", summary.max_lazy_streak),
    ]
}

/// The `## Utilization` block: tools then models, in first-seen order.
fn utilization_lines(summary: &StatsSummary) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "## Utilization".to_string(),
        String::new(),
        "### Tools Used".to_string(),
    ];

    for (tool, count) in summary.tools.iter() {
        lines.push(format!("- {}: {} iterations", tool, count));
    }

    lines.push(String::new());
    lines.push("### Models Used".to_string());

    for (model, count) in summary.models.iter() {
        lines.push(format!("- {}: {} iterations", model, count));
    }

    lines
}

/// Deliver the report for `summary` to `output`, or stdout when no path
/// is given.
///
/// An absent summary prints a single diagnostic and writes nothing. A
/// failed file write is the one hard error in the pipeline and bubbles
/// up with the path attached.
pub fn emit(summary: Option<&StatsSummary>, output: Option<&Path>, title: &str) -> Result<()> {
    let summary = match summary {
        Some(s) => s,
        None => {
            println!("No statistics to report.");
            return Ok(());
        }
    };

    let report = render_report(summary, title, Local::now());

    match output {
        Some(path) => {
            std::fs::write(path, &report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("Report generated at {}", path.display());
        }
        None => println!("{}", report),
    }

    Ok(())
}
