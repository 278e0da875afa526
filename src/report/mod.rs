//! Plain-text rendering of estimate and tagging results
//!
//! Rendering only builds strings; callers decide where they go.

use crate::estimator::EstimateReport;
use crate::survey::AgentDims;
use crate::tagging::{TagMode, TagSummary};

/// Presentation settings for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    /// Dimensions the estimates assume, echoed in the header
    pub dims: AgentDims,
    /// Width of separator rules
    pub width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            dims: AgentDims::default(),
            width: 80,
        }
    }
}

/// Format an integer with thousands separators (`19,330`)
pub fn with_separators(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Render a parameter estimate table with summary statistics
pub fn render_estimates(report: &EstimateReport, config: &ReportConfig) -> String {
    let rule = "=".repeat(config.width);
    let mut output = String::new();

    output.push_str(&format!("{}\n", rule));
    output.push_str("Model Parameter Count Estimates (Balanced Configurations)\n");
    output.push_str(&format!("{}\n", rule));
    output.push_str("Assumptions:\n");
    output.push_str(&format!("  - Agents: {}\n", config.dims.n_agents));
    output.push_str(&format!("  - Observation dim per agent: {}\n", config.dims.obs_dim));
    output.push_str(&format!("  - Action dim per agent: {}\n", config.dims.action_dim));
    output.push_str(&format!("{}\n\n", rule));

    output.push_str(&format!("{:<30} {:>15}\n", "Model", "Est. Params"));
    output.push_str(&format!("{} {}\n", "-".repeat(30), "-".repeat(15)));
    for (name, count) in &report.counts {
        output.push_str(&format!("{:<30} {:>15}\n", name, with_separators(*count)));
    }

    match &report.statistics {
        Some(stats) => {
            output.push_str(&format!("\n{}\n", rule));
            output.push_str("Summary Statistics:\n");
            output.push_str(&format!(
                "  Mean:     {:>10} parameters\n",
                with_separators(stats.mean.round() as u64)
            ));
            output.push_str(&format!("  Min:      {:>10} parameters\n", with_separators(stats.min)));
            output.push_str(&format!("  Max:      {:>10} parameters\n", with_separators(stats.max)));
            output.push_str(&format!("  Range:    {:>10} parameters\n", with_separators(stats.range)));
            output.push_str(&format!(
                "  Std Dev:  {:>10} (sample)\n",
                with_separators(stats.std_dev.round() as u64)
            ));
            output.push_str(&format!("{}\n", rule));
        }
        None => output.push_str("\nNo models to summarize\n"),
    }

    output
}

/// Render the totals of a tagging batch
pub fn render_tag_summary(summary: &TagSummary) -> String {
    let rule = "=".repeat(60);
    let mut output = String::new();

    for run in &summary.runs {
        match (&run.label, &run.status, &run.error) {
            (_, _, Some(error)) => output.push_str(&format!("  {}: FAILED ({})\n", run.run, error)),
            (Some(label), Some(status), None) => {
                output.push_str(&format!("  {}: {} [{}]\n", run.run, label, status))
            }
            _ => output.push_str(&format!("  {}: no result\n", run.run)),
        }
    }

    output.push_str(&format!("{}\n", rule));
    output.push_str("Summary:\n");
    output.push_str(&format!("  Total runs: {}\n", summary.total));
    output.push_str(&format!("  Updated: {}\n", summary.added));
    output.push_str(&format!("  Skipped: {}\n", summary.skipped));
    output.push_str(&format!("  Failed: {}\n", summary.failed));

    if summary.mode == TagMode::DryRun {
        output.push_str("\nThis was a DRY RUN. No changes were made.\n");
        output.push_str("Run with --no-dry-run to actually update the tags.\n");
    }

    output
}
