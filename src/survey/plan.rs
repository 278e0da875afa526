use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::catalogue::ModelCatalogue;
use super::device::Device;
use super::tasks::VmasTask;
use crate::classifier::ArchitectureLabel;
use crate::error::{Result, SurveyError};

/// Survey-wide experiment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    pub project: String,
    pub algorithm: String,
    pub seed: u64,
    pub max_iterations: usize,
    pub frames_per_batch: usize,
    pub envs_per_worker: usize,
    pub evaluation: bool,
    pub evaluation_interval: usize,
    pub evaluation_episodes: usize,
    /// Zero disables checkpointing
    pub checkpoint_interval: usize,
    pub loggers: Vec<String>,
    /// Restrict the survey to these tasks; all tasks when empty
    pub tasks: Vec<VmasTask>,
    /// Restrict the survey to these catalogue models; all models when empty
    pub models: Vec<String>,
    /// Tag shared by every survey run
    pub survey_tag: String,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        SurveyConfig {
            project: "benchmarl-10-30".to_string(),
            algorithm: "mappo".to_string(),
            seed: 1,
            max_iterations: 500,
            frames_per_batch: 6000,
            envs_per_worker: 10,
            evaluation: true,
            evaluation_interval: 120_000,
            evaluation_episodes: 5,
            checkpoint_interval: 0,
            loggers: vec!["wandb".to_string(), "csv".to_string()],
            tasks: Vec::new(),
            models: Vec::new(),
            survey_tag: "vmas_survey".to_string(),
        }
    }
}

impl SurveyConfig {
    /// Load a survey configuration from a JSON file; missing fields keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SurveyConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Short smoke-test settings: one task, one model, csv logging only
    pub fn smoke_test(task: VmasTask, model: &str) -> Self {
        SurveyConfig {
            max_iterations: 50,
            evaluation: false,
            loggers: vec!["csv".to_string()],
            tasks: vec![task],
            models: vec![model.to_string()],
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.project.trim().is_empty() {
            return Err(SurveyError::invalid_parameter("project", "must not be empty"));
        }
        if self.algorithm.trim().is_empty() {
            return Err(SurveyError::invalid_parameter("algorithm", "must not be empty"));
        }
        if self.max_iterations == 0 {
            return Err(SurveyError::invalid_parameter("max_iterations", "must be greater than zero"));
        }
        if self.frames_per_batch == 0 || self.envs_per_worker == 0 {
            return Err(SurveyError::invalid_parameter(
                "frames_per_batch",
                "batch size and envs per worker must be greater than zero",
            ));
        }
        if self.evaluation && (self.evaluation_interval == 0 || self.evaluation_episodes == 0) {
            return Err(SurveyError::invalid_parameter(
                "evaluation_interval",
                "evaluation needs a positive interval and episode count",
            ));
        }
        Ok(())
    }

    /// Tasks this survey covers
    pub fn selected_tasks(&self) -> Vec<VmasTask> {
        if self.tasks.is_empty() {
            VmasTask::ALL.to_vec()
        } else {
            self.tasks.clone()
        }
    }
}

/// Where and when an experiment runs; part of every experiment name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    pub date: NaiveDate,
    pub host: String,
    pub device: Device,
}

/// `<architecture>-<task>-<algorithm>-<date>-<host>-<device>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperimentName {
    pub architecture: ArchitectureLabel,
    pub task: VmasTask,
    pub algorithm: String,
    pub date: NaiveDate,
    pub host: String,
    pub device: Device,
}

impl fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}-{}-{}",
            self.architecture,
            self.task,
            self.algorithm,
            self.date.format("%Y-%m-%d"),
            self.host,
            self.device.tag_name()
        )
    }
}

/// One (model, task) experiment of a survey
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedExperiment {
    pub model: String,
    pub task: VmasTask,
    pub name: String,
    pub architecture: ArchitectureLabel,
    pub group: String,
    pub tags: Vec<String>,
    pub seed: u64,
    pub device: String,
    pub max_iterations: usize,
}

/// Full matrix of experiments to hand to the training framework
///
/// Carries the whole validated config so batching, evaluation, checkpointing
/// and logger settings reach the consumer along with the experiments.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyPlan {
    pub project: String,
    pub config: SurveyConfig,
    pub experiments: Vec<PlannedExperiment>,
}

impl SurveyPlan {
    /// Enumerate one experiment per selected model and task, model-major
    pub fn new(config: &SurveyConfig, catalogue: &ModelCatalogue, context: &RunContext) -> Result<Self> {
        config.validate()?;

        let mut catalogue = catalogue.clone();
        if !config.models.is_empty() {
            if let Some(missing) = config.models.iter().find(|m| catalogue.get(m).is_none()) {
                return Err(SurveyError::InvalidParameter {
                    name: "models".to_string(),
                    reason: format!("'{}' is not in the model catalogue", missing),
                });
            }
            catalogue.retain_named(&config.models);
        }

        let tasks = config.selected_tasks();
        let mut experiments = Vec::with_capacity(catalogue.len() * tasks.len());

        for entry in catalogue.entries() {
            let architecture = entry.architecture();
            debug!("model {} classified as {}", entry.name, architecture);

            for &task in &tasks {
                let name = ExperimentName {
                    architecture,
                    task,
                    algorithm: config.algorithm.clone(),
                    date: context.date,
                    host: context.host.clone(),
                    device: context.device,
                };

                experiments.push(PlannedExperiment {
                    model: entry.name.clone(),
                    task,
                    name: name.to_string(),
                    architecture,
                    group: format!("{}_{}", config.survey_tag, entry.name),
                    tags: vec![
                        format!("model:{}", entry.name),
                        config.survey_tag.clone(),
                        architecture.to_string(),
                        config.algorithm.clone(),
                        task.to_string(),
                    ],
                    seed: config.seed,
                    device: context.device.torch_name(),
                    max_iterations: config.max_iterations,
                });
            }
        }

        info!(
            "planned {} experiments ({} models x {} tasks) for project {}",
            experiments.len(),
            catalogue.len(),
            tasks.len(),
            config.project
        );

        Ok(SurveyPlan {
            project: config.project.clone(),
            config: config.clone(),
            experiments,
        })
    }

    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
}
