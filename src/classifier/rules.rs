use std::collections::BTreeSet;

use super::label::ArchitectureLabel;
use super::record::{BlockKind, ModelRecord, PrimitiveFamily};

/// Labels for single-model families
pub const PRIMITIVE_LABELS: [(PrimitiveFamily, ArchitectureLabel); 2] = [
    (PrimitiveFamily::Mlp, ArchitectureLabel::MlpBalanced),
    (PrimitiveFamily::DeepSets, ArchitectureLabel::Deepsets),
];

/// Lower-case class substrings for GNN layers, checked in order.
/// The attention pattern comes first so the generic match cannot shadow it.
pub const GNN_CLASS_RULES: [(&str, ArchitectureLabel); 2] = [
    ("gatv2", ArchitectureLabel::GnnBalancedGatv2),
    ("graphconv", ArchitectureLabel::GnnBalancedGraphconv),
];

/// A combination rule matches when every required kind was detected
#[derive(Debug, Clone, Copy)]
pub struct ComboRule {
    pub requires: &'static [BlockKind],
    pub label: ArchitectureLabel,
}

impl ComboRule {
    pub fn matches(&self, kinds: &BTreeSet<BlockKind>) -> bool {
        self.requires.iter().all(|kind| kinds.contains(kind))
    }
}

/// Combination rules in precedence order; the first match wins
pub const COMBO_RULES: [ComboRule; 4] = [
    ComboRule {
        requires: &[BlockKind::MessagePassing, BlockKind::Lstm],
        label: ArchitectureLabel::GnnLstmCombo,
    },
    ComboRule {
        requires: &[BlockKind::DeepSets, BlockKind::MessagePassing],
        label: ArchitectureLabel::DeepsetsGnnCombo,
    },
    ComboRule {
        requires: &[BlockKind::Gru, BlockKind::DeepSets],
        label: ArchitectureLabel::GruDeepsetsCombo,
    },
    ComboRule {
        requires: &[BlockKind::Feedforward, BlockKind::MessagePassing, BlockKind::Gru],
        label: ArchitectureLabel::MlpGnnGruCombo,
    },
];

pub fn primitive_label(family: PrimitiveFamily) -> ArchitectureLabel {
    PRIMITIVE_LABELS
        .iter()
        .find(|(candidate, _)| *candidate == family)
        .map_or(ArchitectureLabel::Unknown, |&(_, label)| label)
}

pub fn gnn_label(class_name: Option<&str>) -> ArchitectureLabel {
    let lowered = class_name.unwrap_or_default().to_lowercase();
    GNN_CLASS_RULES
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map_or(ArchitectureLabel::GnnBalanced, |&(_, label)| label)
}

pub fn combo_label(kinds: &BTreeSet<BlockKind>) -> ArchitectureLabel {
    COMBO_RULES
        .iter()
        .find(|rule| rule.matches(kinds))
        .map_or(ArchitectureLabel::SequenceModelCombo, |rule| rule.label)
}

impl ModelRecord {
    /// Architecture label for this record
    pub fn label(&self) -> ArchitectureLabel {
        match self {
            ModelRecord::Primitive { kind } => primitive_label(*kind),
            ModelRecord::Gnn { class_name } => gnn_label(class_name.as_deref()),
            ModelRecord::Sequence { kinds } => combo_label(kinds),
            ModelRecord::Unrecognized { .. } => ArchitectureLabel::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(list: &[BlockKind]) -> BTreeSet<BlockKind> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_combo_precedence() {
        use BlockKind::*;

        assert_eq!(combo_label(&kinds(&[MessagePassing, Lstm])), ArchitectureLabel::GnnLstmCombo);
        assert_eq!(
            combo_label(&kinds(&[MessagePassing, Lstm, Feedforward, Gru])),
            ArchitectureLabel::GnnLstmCombo
        );
        assert_eq!(
            combo_label(&kinds(&[DeepSets, MessagePassing, Gru])),
            ArchitectureLabel::DeepsetsGnnCombo
        );
        assert_eq!(combo_label(&kinds(&[Gru, DeepSets])), ArchitectureLabel::GruDeepsetsCombo);
        assert_eq!(
            combo_label(&kinds(&[Feedforward, MessagePassing, Gru])),
            ArchitectureLabel::MlpGnnGruCombo
        );
        assert_eq!(
            combo_label(&kinds(&[Feedforward, MessagePassing])),
            ArchitectureLabel::SequenceModelCombo
        );
        assert_eq!(combo_label(&kinds(&[])), ArchitectureLabel::SequenceModelCombo);
    }

    #[test]
    fn test_gnn_class_rules() {
        assert_eq!(
            gnn_label(Some("torch_geometric.nn.conv.GATv2Conv")),
            ArchitectureLabel::GnnBalancedGatv2
        );
        assert_eq!(
            gnn_label(Some("<class 'torch_geometric.nn.conv.graph_conv.GraphConv'>")),
            ArchitectureLabel::GnnBalancedGraphconv
        );
        assert_eq!(gnn_label(Some("torch_geometric.nn.conv.GINConv")), ArchitectureLabel::GnnBalanced);
        assert_eq!(gnn_label(None), ArchitectureLabel::GnnBalanced);
    }
}
