use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::builders::SequenceBuilder;
use crate::classifier::{classify, ArchitectureLabel};
use crate::error::Result;
use crate::topology::Topology;

/// Per-agent input/output widths of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDims {
    pub n_agents: usize,
    pub obs_dim: usize,
    pub action_dim: usize,
}

impl Default for AgentDims {
    /// Typical VMAS navigation dimensions
    fn default() -> Self {
        AgentDims {
            n_agents: 3,
            obs_dim: 18,
            action_dim: 2,
        }
    }
}

/// One model of the survey
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueEntry {
    /// Survey-local model name (`mlp`, `gnn_gatv2`, ...)
    pub name: String,
    /// Shape used for parameter estimates
    pub topology: Topology,
    /// Configuration as the tracking service records it
    pub record: Value,
}

impl CatalogueEntry {
    /// Label the classifier assigns to this model's recorded configuration
    pub fn architecture(&self) -> ArchitectureLabel {
        classify(&self.record)
    }
}

/// Ordered set of survey models
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCatalogue {
    entries: Vec<CatalogueEntry>,
}

impl ModelCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Models with roughly balanced parameter counts
    ///
    /// - `mlp`: MLP [128, 128]
    /// - `gnn_graphconv`: MLP [64] -> GraphConv -> MLP [64]
    /// - `gnn_gatv2`: MLP [64] -> GATv2 (4 averaged heads) -> MLP [64]
    /// - `deepsets`: local [128] -> sum -> global [128]
    pub fn balanced(dims: AgentDims) -> Result<Self> {
        let obs = dims.obs_dim;
        let act = dims.action_dim;

        let graph_conv = SequenceBuilder::new(obs)
            .linear(&[64], 64)
            .graph_conv(64)
            .linear(&[64], act)
            .build()?;
        let gatv2 = SequenceBuilder::new(obs)
            .linear(&[64], 64)
            .gatv2(64, 4, false)
            .linear(&[64], act)
            .build()?;

        Ok(ModelCatalogue::new()
            .with_entry("mlp", Topology::linear(obs, &[128, 128], act)?, mlp_record(&[128, 128]))
            .with_entry(
                "gnn_graphconv",
                graph_conv,
                sequence_record(&[
                    stage_record(mlp_record(&[64])),
                    stage_record(gnn_record("torch_geometric.nn.conv.GraphConv", json!({ "aggr": "add" }))),
                    stage_record(mlp_record(&[64])),
                ]),
            )
            .with_entry(
                "gnn_gatv2",
                gatv2,
                sequence_record(&[
                    stage_record(mlp_record(&[64])),
                    stage_record(gnn_record(
                        "torch_geometric.nn.conv.GATv2Conv",
                        json!({ "heads": 4, "concat": false }),
                    )),
                    stage_record(mlp_record(&[64])),
                ]),
            )
            .with_entry(
                "deepsets",
                Topology::local_global(obs, 128, 128, act, 1, 1)?,
                deepsets_record(128, 128),
            ))
    }

    /// Append an entry, replacing one with the same name
    pub fn with_entry(mut self, name: &str, topology: Topology, record: Value) -> Self {
        self.entries.retain(|entry| entry.name != name);
        self.entries.push(CatalogueEntry {
            name: name.to_string(),
            topology,
            record,
        });
        self
    }

    /// Keep only the named models, in catalogue order
    pub fn retain_named(&mut self, names: &[String]) {
        self.entries.retain(|entry| names.iter().any(|n| n == &entry.name));
    }

    pub fn get(&self, name: &str) -> Option<&CatalogueEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Topologies keyed by model name, ready for estimation
    pub fn topologies(&self) -> BTreeMap<String, Topology> {
        self.entries
            .iter()
            .map(|entry| (entry.name.clone(), entry.topology.clone()))
            .collect()
    }
}

fn mlp_record(num_cells: &[usize]) -> Value {
    json!({
        "model_name": "mlp",
        "model_config": {
            "_target_": "benchmarl.models.mlp.MlpConfig",
            "num_cells": num_cells,
            "activation_class": "torch.nn.Tanh",
            "layer_class": "torch.nn.Linear",
        }
    })
}

fn gnn_record(gnn_class: &str, gnn_kwargs: Value) -> Value {
    json!({
        "model_name": "gnn",
        "model_config": {
            "_target_": "benchmarl.models.gnn.GnnConfig",
            "topology": "full",
            "self_loops": false,
            "gnn_class": gnn_class,
            "gnn_kwargs": gnn_kwargs,
        }
    })
}

fn deepsets_record(local_hidden: usize, global_hidden: usize) -> Value {
    json!({
        "model_name": "deepsets",
        "model_config": {
            "_target_": "benchmarl.models.deepsets.DeepsetsConfig",
            "aggr": "sum",
            "out_features_local_nn": local_hidden,
            "local_nn_num_cells": [local_hidden],
            "local_nn_activation_class": "torch.nn.Tanh",
            "global_nn_num_cells": [global_hidden],
            "global_nn_activation_class": "torch.nn.Tanh",
        }
    })
}

/// The stage's own model config, as flattened into a sequence record
fn stage_record(record: Value) -> Value {
    record.get("model_config").cloned().unwrap_or(Value::Null)
}

/// Sequence configuration with stages under `model_configs_<i>` keys
fn sequence_record(stages: &[Value]) -> Value {
    let mut model_config = serde_json::Map::new();
    for (i, stage) in stages.iter().enumerate() {
        model_config.insert(format!("model_configs_{}", i), stage.clone());
    }
    model_config.insert(
        "intermediate_sizes".to_string(),
        json!(vec![64; stages.len().saturating_sub(1)]),
    );

    json!({
        "model_name": "sequencemodel",
        "model_config": model_config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::estimate;

    #[test]
    fn test_balanced_catalogue_names() {
        let catalogue = ModelCatalogue::balanced(AgentDims::default()).unwrap();
        let names: Vec<&str> = catalogue.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["mlp", "gnn_graphconv", "gnn_gatv2", "deepsets"]);
    }

    #[test]
    fn test_balanced_catalogue_estimates() {
        let catalogue = ModelCatalogue::balanced(AgentDims::default()).unwrap();
        let count = |name: &str| estimate(&catalogue.get(name).unwrap().topology);

        assert_eq!(count("mlp"), 19330);
        assert_eq!(count("gnn_graphconv"), 5376 + 4160 + 4290);
        assert_eq!(count("gnn_gatv2"), 5376 + 4288 + 4290);
        assert_eq!(count("deepsets"), 35714);
    }

    #[test]
    fn test_recorded_configs_classify() {
        let catalogue = ModelCatalogue::balanced(AgentDims::default()).unwrap();
        let label = |name: &str| catalogue.get(name).unwrap().architecture();

        assert_eq!(label("mlp"), ArchitectureLabel::MlpBalanced);
        assert_eq!(label("deepsets"), ArchitectureLabel::Deepsets);
        // MLP-wrapped GNNs are recorded as sequence models
        assert_eq!(label("gnn_graphconv"), ArchitectureLabel::SequenceModelCombo);
        assert_eq!(label("gnn_gatv2"), ArchitectureLabel::SequenceModelCombo);
    }

    #[test]
    fn test_with_entry_replaces_same_name() {
        let catalogue = ModelCatalogue::new()
            .with_entry("m", Topology::linear(4, &[], 2).unwrap(), Value::Null)
            .with_entry("m", Topology::linear(8, &[], 2).unwrap(), Value::Null);
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.get("m").unwrap().topology.input_dim(), 8);
    }
}
