//! # VMAS Model Survey
//!
//! Describes the experiment matrix of the model survey: which VMAS tasks are
//! covered, which balanced model configurations run on them, which device
//! they use, and how each experiment is named and tagged in the tracking
//! service. Running the experiments is left to the training framework.

pub mod catalogue;
pub mod device;
pub mod plan;
pub mod tasks;

pub use catalogue::{AgentDims, CatalogueEntry, ModelCatalogue};
pub use device::Device;
pub use plan::{ExperimentName, PlannedExperiment, RunContext, SurveyConfig, SurveyPlan};
pub use tasks::VmasTask;
