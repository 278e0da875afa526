//! File-backed run tracking store
//!
//! Runs are kept as one JSON document per run:
//!
//! ```text
//! <root>/<entity>/<project>/<run-id>.json
//! ```
//!
//! where `<entity>` is `default` when none is given. Each document holds the
//! run's `id`, `name`, recorded `config` and `tags`. Listing skips, and logs,
//! any file that does not load as a run document.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SurveyError};
use crate::tagging::{RunTracker, TrackedRun};

/// Entity directory used when no entity is given
pub const DEFAULT_ENTITY: &str = "default";

/// On-disk run document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDocument {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub config: Value,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A run loaded from a [`LocalRunStore`]
#[derive(Debug, Clone)]
pub struct StoredRun {
    document: RunDocument,
    path: PathBuf,
}

impl StoredRun {
    /// Load a run document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let unreadable = |reason: String| SurveyError::tracker(path.display().to_string(), reason);
        let content = fs::read_to_string(path).map_err(|err| unreadable(err.to_string()))?;
        let document: RunDocument =
            serde_json::from_str(&content).map_err(|err| unreadable(err.to_string()))?;

        Ok(StoredRun {
            document,
            path: path.to_path_buf(),
        })
    }
}

impl TrackedRun for StoredRun {
    fn id(&self) -> &str {
        &self.document.id
    }

    fn name(&self) -> &str {
        &self.document.name
    }

    fn config(&self) -> &Value {
        &self.document.config
    }

    fn tags(&self) -> &[String] {
        &self.document.tags
    }

    fn push_tag(&mut self, tag: &str) -> bool {
        if self.has_tag(tag) {
            return false;
        }
        self.document.tags.push(tag.to_string());
        true
    }

    fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.document.tags.len();
        self.document.tags.retain(|t| t != tag);
        self.document.tags.len() != before
    }

    fn persist(&mut self) -> Result<()> {
        write_document(&self.path, &self.document)
            .map_err(|err| SurveyError::tracker(self.document.id.clone(), err.to_string()))?;
        debug!("persisted run {} to {}", self.document.id, self.path.display());
        Ok(())
    }
}

/// Run store rooted at a local directory
#[derive(Debug, Clone)]
pub struct LocalRunStore {
    root: PathBuf,
}

impl LocalRunStore {
    /// Open a store; the root directory is created on first write
    pub fn open<P: AsRef<Path>>(root: P) -> Self {
        LocalRunStore {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory holding a project's runs
    pub fn project_dir(&self, project: &str, entity: Option<&str>) -> PathBuf {
        self.root.join(entity.unwrap_or(DEFAULT_ENTITY)).join(project)
    }

    /// Write a new run, replacing any run with the same id
    pub fn create_run(&self, project: &str, entity: Option<&str>, document: RunDocument) -> Result<StoredRun> {
        if document.id.is_empty() || document.id.contains(['/', '\\']) {
            return Err(SurveyError::InvalidParameter {
                name: "id".to_string(),
                reason: format!("'{}' is not a valid run id", document.id),
            });
        }

        let dir = self.project_dir(project, entity);
        fs::create_dir_all(&dir)?;

        let path = dir.join(format!("{}.json", document.id));
        write_document(&path, &document)?;

        Ok(StoredRun { document, path })
    }
}

impl RunTracker for LocalRunStore {
    type Run = StoredRun;

    fn list_runs(&self, project: &str, entity: Option<&str>) -> Result<Vec<StoredRun>> {
        let dir = self.project_dir(project, entity);
        if !dir.is_dir() {
            return Err(SurveyError::ProjectNotFound {
                project: project.to_string(),
                entity: entity.map(str::to_string),
            });
        }

        let mut runs = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                warn!("skipping non-run entry {}", path.display());
                continue;
            }
            match StoredRun::load(&path) {
                Ok(run) => runs.push(run),
                Err(err) => error!("skipping unreadable run file: {}", err),
            }
        }
        runs.sort_by(|a, b| a.document.id.cmp(&b.document.id));

        debug!("listed {} runs in {}", runs.len(), dir.display());
        Ok(runs)
    }
}

/// Write through a temporary sibling and rename over the target
fn write_document(path: &Path, document: &RunDocument) -> Result<()> {
    let content = serde_json::to_string_pretty(document)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
