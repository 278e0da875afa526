//! # Architecture Classifier
//!
//! Infers an [`ArchitectureLabel`] from the configuration a tracking service
//! recorded for a training run. The configuration is parsed once into a
//! [`ModelRecord`] and then matched against ordered rule tables:
//!
//! - single families (`mlp`, `deepsets`) map through a static table
//! - `gnn` inspects the layer class, attention before generic message passing
//! - `sequencemodel` collects the set of stage kinds and applies the
//!   combination rules top to bottom
//! - everything else is [`ArchitectureLabel::Unknown`]
//!
//! Classification is a best-effort heuristic and never fails.

pub mod label;
pub mod record;
pub mod rules;

pub use label::ArchitectureLabel;
pub use record::{BlockKind, ModelRecord, PrimitiveFamily};
pub use rules::{ComboRule, COMBO_RULES, GNN_CLASS_RULES, PRIMITIVE_LABELS};

use serde_json::Value;

/// Classify a recorded run configuration
pub fn classify(config: &Value) -> ArchitectureLabel {
    ModelRecord::parse(config).label()
}
