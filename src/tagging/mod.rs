//! # Run Tagging
//!
//! Reconciles the architecture label of tracked runs with their tag sets.
//!
//! ## Core Concepts
//!
//! - **Tracked run**: a run record owned by a tracking service, with a
//!   read-only configuration and a mutable tag set pushed upstream by
//!   [`TrackedRun::persist`]
//! - **Reconciliation**: classify the run and append the label if it is
//!   missing; repeated calls never duplicate a tag
//! - **Batch**: reconciliation over many runs where one run's failure is
//!   recorded and the batch moves on

pub mod batch;

pub use batch::{tag_runs, RunReport, TagSummary};

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classifier::{classify, ArchitectureLabel};
use crate::error::Result;

/// A run stored by a tracking service
pub trait TrackedRun {
    /// Stable run identifier
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// Recorded configuration
    fn config(&self) -> &Value;

    /// Current local tag set
    fn tags(&self) -> &[String];

    /// Append a tag locally; returns `false` if it was already present
    fn push_tag(&mut self, tag: &str) -> bool;

    /// Remove a tag locally; returns `false` if it was absent
    fn remove_tag(&mut self, tag: &str) -> bool;

    /// Push local tag changes to the tracking service
    fn persist(&mut self) -> Result<()>;

    fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }
}

/// Source of tracked runs
pub trait RunTracker {
    type Run: TrackedRun;

    /// List every run of a project; fails if the project cannot be resolved
    fn list_runs(&self, project: &str, entity: Option<&str>) -> Result<Vec<Self::Run>>;
}

/// Whether reconciliation writes to the tracking service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagMode {
    /// Classify and report intended changes only
    #[default]
    DryRun,
    /// Append and persist missing labels
    Apply,
}

impl TagMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            TagMode::DryRun
        } else {
            TagMode::Apply
        }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self, TagMode::DryRun)
    }
}

/// What reconciliation did (or would do) to one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagStatus {
    /// Label appended and persisted
    Added,
    /// Label missing; dry run left it untouched
    WouldAdd,
    /// Label already in the tag set
    AlreadyTagged,
    /// No label could be inferred
    Unclassified,
}

impl fmt::Display for TagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TagStatus::Added => "added",
            TagStatus::WouldAdd => "would add",
            TagStatus::AlreadyTagged => "already tagged",
            TagStatus::Unclassified => "unclassified",
        };
        f.write_str(text)
    }
}

/// Result of reconciling one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagOutcome {
    pub label: ArchitectureLabel,
    /// True when the label was added, or would be added in a dry run
    pub added: bool,
    pub status: TagStatus,
}

impl TagOutcome {
    fn new(label: ArchitectureLabel, status: TagStatus) -> Self {
        TagOutcome {
            label,
            added: matches!(status, TagStatus::Added | TagStatus::WouldAdd),
            status,
        }
    }
}

/// Make sure a run carries its architecture label
///
/// Only ever appends. If persisting fails the local append is undone and the
/// error is returned, so the run can be retried.
pub fn reconcile_tags<R: TrackedRun + ?Sized>(run: &mut R, mode: TagMode) -> Result<TagOutcome> {
    let label = classify(run.config());

    if label.is_unknown() {
        debug!("run {}: no architecture label inferred", run.name());
        return Ok(TagOutcome::new(label, TagStatus::Unclassified));
    }

    if run.has_tag(label.as_str()) {
        debug!("run {}: already tagged '{}'", run.name(), label);
        return Ok(TagOutcome::new(label, TagStatus::AlreadyTagged));
    }

    if mode.is_dry_run() {
        info!("run {}: would add tag '{}' (dry run)", run.name(), label);
        return Ok(TagOutcome::new(label, TagStatus::WouldAdd));
    }

    run.push_tag(label.as_str());
    if let Err(err) = run.persist() {
        run.remove_tag(label.as_str());
        return Err(err);
    }

    info!("run {}: added tag '{}'", run.name(), label);
    Ok(TagOutcome::new(label, TagStatus::Added))
}
