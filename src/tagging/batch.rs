use log::{error, info};
use serde::Serialize;

use super::{reconcile_tags, TagMode, TagStatus, TrackedRun};
use crate::classifier::ArchitectureLabel;

/// Per-run line of a batch summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub run: String,
    pub label: Option<ArchitectureLabel>,
    pub status: Option<TagStatus>,
    pub error: Option<String>,
}

/// Totals for one batch
///
/// `total == added + skipped + failed` always holds.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TagSummary {
    pub mode: TagMode,
    pub total: usize,
    pub added: usize,
    pub skipped: usize,
    pub failed: usize,
    pub runs: Vec<RunReport>,
}

impl TagSummary {
    fn new(mode: TagMode) -> Self {
        TagSummary {
            mode,
            ..Default::default()
        }
    }
}

/// Reconcile every run independently
///
/// A failing run is logged with its identifier and counted as failed; the
/// remaining runs are still processed.
pub fn tag_runs<R: TrackedRun>(runs: &mut [R], mode: TagMode) -> TagSummary {
    let mut summary = TagSummary::new(mode);

    for run in runs.iter_mut() {
        summary.total += 1;

        match reconcile_tags(run, mode) {
            Ok(outcome) => {
                if outcome.added {
                    summary.added += 1;
                } else {
                    summary.skipped += 1;
                }
                summary.runs.push(RunReport {
                    run: run.name().to_string(),
                    label: Some(outcome.label),
                    status: Some(outcome.status),
                    error: None,
                });
            }
            Err(err) => {
                error!("run {} ({}): failed to update tags: {}", run.name(), run.id(), err);
                summary.failed += 1;
                summary.runs.push(RunReport {
                    run: run.name().to_string(),
                    label: None,
                    status: None,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    info!(
        "tagged {} runs: {} added, {} skipped, {} failed{}",
        summary.total,
        summary.added,
        summary.skipped,
        summary.failed,
        if mode.is_dry_run() { " (dry run)" } else { "" }
    );

    summary
}
