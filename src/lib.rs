//! # marl-survey - Multi-Agent RL Model Survey Tooling
//!
//! Companion library for surveying model architectures across VMAS
//! multi-agent tasks. Training, environment simulation and the tracking
//! backend live in external frameworks; this crate covers the pieces around
//! them.
//!
//! ## Key Features
//!
//! - **Parameter Estimates**: closed-form trainable-parameter counts for MLP,
//!   message-passing, DeepSets and sequence topologies, without building models
//! - **Architecture Labels**: rule-based classification of recorded run
//!   configurations into architecture labels
//! - **Run Tagging**: idempotent tag reconciliation over tracked runs, with a
//!   dry-run mode and per-run fault isolation
//! - **Survey Planning**: the task x model experiment matrix with names, tags
//!   and device selection
//!
//! ## Quick Start
//!
//! ```rust
//! use marl_survey::builders::SequenceBuilder;
//! use marl_survey::estimator::estimate;
//! use marl_survey::classifier::{classify, ArchitectureLabel};
//! use serde_json::json;
//!
//! // MLP[64] -> GATv2 -> MLP[64]
//! let topology = SequenceBuilder::new(18)
//!     .linear(&[64], 64)
//!     .gatv2(64, 4, false)
//!     .linear(&[64], 2)
//!     .build()
//!     .unwrap();
//! assert_eq!(estimate(&topology), 13954);
//!
//! let config = json!({
//!     "model_name": "gnn",
//!     "model_config": { "gnn_class": "torch_geometric.nn.conv.GATv2Conv" }
//! });
//! assert_eq!(classify(&config), ArchitectureLabel::GnnBalancedGatv2);
//! ```
//!
//! ## Module Organization
//!
//! - [`builders`] - Fluent construction of sequence topologies
//! - [`classifier`] - Architecture labels inferred from run configurations
//! - [`error`] - Error types and result handling
//! - [`estimator`] - Parameter count estimates
//! - [`metrics`] - Summary statistics over parameter counts
//! - [`report`] - Plain-text rendering of results
//! - [`survey`] - VMAS tasks, model catalogue and experiment planning
//! - [`tagging`] - Tag reconciliation against a run tracker
//! - [`topology`] - Shape-only network descriptors
//! - [`tracker`] - File-backed run tracking store

pub mod builders;
pub mod classifier;
pub mod error;
pub mod estimator;
pub mod metrics;
pub mod report;
pub mod survey;
pub mod tagging;
pub mod topology;
pub mod tracker;

pub use error::{Result, SurveyError};

#[cfg(test)]
mod tests;
