use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

/// Top-level field naming the model family
pub const FAMILY_FIELD: &str = "model_name";
/// Nested record holding the model's own configuration
pub const MODEL_CONFIG_FIELD: &str = "model_config";
/// Class identifier of the message-passing layer inside a GNN config
pub const GNN_CLASS_FIELD: &str = "gnn_class";
/// Class identifier of a sequence stage
pub const TARGET_FIELD: &str = "_target_";
/// Key prefix shared by sequence stage records (`model_configs_0`, ...)
pub const STAGE_PREFIX: &str = "model_configs";

/// Single-model families mapped straight to a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveFamily {
    Mlp,
    DeepSets,
}

/// Building block detected inside a sequence stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    MessagePassing,
    Lstm,
    Gru,
    Feedforward,
    DeepSets,
}

impl BlockKind {
    /// Substring checked against a lower-cased stage class identifier.
    /// A stage yields the first kind that matches in this order.
    const DETECTION_ORDER: [(&'static str, BlockKind); 5] = [
        ("gnn", BlockKind::MessagePassing),
        ("lstm", BlockKind::Lstm),
        ("gru", BlockKind::Gru),
        ("mlp", BlockKind::Feedforward),
        ("deepsets", BlockKind::DeepSets),
    ];

    /// Detect the building block named by a class identifier
    pub fn detect(class_name: &str) -> Option<BlockKind> {
        let lowered = class_name.to_lowercase();
        BlockKind::DETECTION_ORDER
            .iter()
            .find(|(needle, _)| lowered.contains(needle))
            .map(|&(_, kind)| kind)
    }
}

/// Typed view of a recorded run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum ModelRecord {
    Primitive { kind: PrimitiveFamily },
    Gnn { class_name: Option<String> },
    Sequence { kinds: BTreeSet<BlockKind> },
    Unrecognized { name: Option<String> },
}

impl ModelRecord {
    /// Parse a run configuration. Never fails; anything unexpected becomes
    /// [`ModelRecord::Unrecognized`] or an empty detail.
    pub fn parse(config: &Value) -> Self {
        let family = match config.get(FAMILY_FIELD).and_then(Value::as_str) {
            Some(family) => family.to_lowercase(),
            None => return ModelRecord::Unrecognized { name: None },
        };
        let model_config = config.get(MODEL_CONFIG_FIELD).and_then(Value::as_object);

        match family.as_str() {
            "mlp" => ModelRecord::Primitive {
                kind: PrimitiveFamily::Mlp,
            },
            "deepsets" => ModelRecord::Primitive {
                kind: PrimitiveFamily::DeepSets,
            },
            "gnn" => ModelRecord::Gnn {
                class_name: model_config
                    .and_then(|c| c.get(GNN_CLASS_FIELD))
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            "sequencemodel" => ModelRecord::Sequence {
                kinds: model_config.map(stage_kinds).unwrap_or_default(),
            },
            _ => ModelRecord::Unrecognized { name: Some(family) },
        }
    }
}

/// Collect the kinds of every stage record. Stage keys are matched by prefix,
/// so their enumeration order has no effect on the result.
fn stage_kinds(model_config: &Map<String, Value>) -> BTreeSet<BlockKind> {
    model_config
        .iter()
        .filter(|(key, _)| key.starts_with(STAGE_PREFIX))
        .flat_map(|(_, value)| stage_records(value))
        .filter_map(|stage| stage.get(TARGET_FIELD).and_then(Value::as_str))
        .filter_map(BlockKind::detect)
        .collect()
}

/// A stage entry is either one record or a list of records
fn stage_records(value: &Value) -> Vec<&Map<String, Value>> {
    match value {
        Value::Object(record) => vec![record],
        Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_block_kinds() {
        assert_eq!(BlockKind::detect("benchmarl.models.gnn.GnnConfig"), Some(BlockKind::MessagePassing));
        assert_eq!(BlockKind::detect("benchmarl.models.LSTM"), Some(BlockKind::Lstm));
        assert_eq!(BlockKind::detect("benchmarl.models.gru.Gru"), Some(BlockKind::Gru));
        assert_eq!(BlockKind::detect("benchmarl.models.mlp.Mlp"), Some(BlockKind::Feedforward));
        assert_eq!(BlockKind::detect("benchmarl.models.deepsets.Deepsets"), Some(BlockKind::DeepSets));
        assert_eq!(BlockKind::detect("benchmarl.models.cnn.Cnn"), None);
    }

    #[test]
    fn test_parse_family_is_case_insensitive() {
        let record = ModelRecord::parse(&json!({ "model_name": "MLP" }));
        assert_eq!(record, ModelRecord::Primitive { kind: PrimitiveFamily::Mlp });
    }

    #[test]
    fn test_parse_missing_or_non_string_family() {
        assert_eq!(ModelRecord::parse(&json!({})), ModelRecord::Unrecognized { name: None });
        assert_eq!(
            ModelRecord::parse(&json!({ "model_name": 3 })),
            ModelRecord::Unrecognized { name: None }
        );
        assert_eq!(ModelRecord::parse(&json!("mlp")), ModelRecord::Unrecognized { name: None });
    }

    #[test]
    fn test_parse_sequence_stage_forms() {
        let keyed = json!({
            "model_name": "sequencemodel",
            "model_config": {
                "model_configs_1": { "_target_": "benchmarl.models.lstm.Lstm" },
                "model_configs_0": { "_target_": "benchmarl.models.gnn.Gnn" },
                "intermediate_sizes": [64],
            }
        });
        let listed = json!({
            "model_name": "sequencemodel",
            "model_config": {
                "model_configs": [
                    { "_target_": "benchmarl.models.gnn.Gnn" },
                    { "_target_": "benchmarl.models.lstm.Lstm" },
                ]
            }
        });

        let expected: BTreeSet<BlockKind> = [BlockKind::MessagePassing, BlockKind::Lstm].into_iter().collect();
        assert_eq!(ModelRecord::parse(&keyed), ModelRecord::Sequence { kinds: expected.clone() });
        assert_eq!(ModelRecord::parse(&listed), ModelRecord::Sequence { kinds: expected });
    }

    #[test]
    fn test_parse_ignores_stages_without_target() {
        let record = ModelRecord::parse(&json!({
            "model_name": "sequencemodel",
            "model_config": {
                "model_configs_0": { "num_cells": [64] },
                "model_configs_1": "not a record",
            }
        }));
        assert_eq!(record, ModelRecord::Sequence { kinds: BTreeSet::new() });
    }
}
