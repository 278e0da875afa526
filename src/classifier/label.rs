use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SurveyError;

/// Human-readable architecture label attached to tracked runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchitectureLabel {
    MlpBalanced,
    Deepsets,
    GnnBalancedGraphconv,
    GnnBalancedGatv2,
    GnnBalanced,
    GnnLstmCombo,
    DeepsetsGnnCombo,
    GruDeepsetsCombo,
    MlpGnnGruCombo,
    SequenceModelCombo,
    Unknown,
}

impl ArchitectureLabel {
    pub const ALL: [ArchitectureLabel; 11] = [
        ArchitectureLabel::MlpBalanced,
        ArchitectureLabel::Deepsets,
        ArchitectureLabel::GnnBalancedGraphconv,
        ArchitectureLabel::GnnBalancedGatv2,
        ArchitectureLabel::GnnBalanced,
        ArchitectureLabel::GnnLstmCombo,
        ArchitectureLabel::DeepsetsGnnCombo,
        ArchitectureLabel::GruDeepsetsCombo,
        ArchitectureLabel::MlpGnnGruCombo,
        ArchitectureLabel::SequenceModelCombo,
        ArchitectureLabel::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArchitectureLabel::MlpBalanced => "mlp_balanced",
            ArchitectureLabel::Deepsets => "deepsets",
            ArchitectureLabel::GnnBalancedGraphconv => "gnn_balanced_graphconv",
            ArchitectureLabel::GnnBalancedGatv2 => "gnn_balanced_gatv2",
            ArchitectureLabel::GnnBalanced => "gnn_balanced",
            ArchitectureLabel::GnnLstmCombo => "gnn_lstm_combo",
            ArchitectureLabel::DeepsetsGnnCombo => "deepsets_gnn_combo",
            ArchitectureLabel::GruDeepsetsCombo => "gru_deepsets_combo",
            ArchitectureLabel::MlpGnnGruCombo => "mlp_gnn_gru_combo",
            ArchitectureLabel::SequenceModelCombo => "sequence_model_combo",
            ArchitectureLabel::Unknown => "unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ArchitectureLabel::Unknown)
    }
}

impl fmt::Display for ArchitectureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchitectureLabel {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArchitectureLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| SurveyError::InvalidParameter {
                name: "architecture_label".to_string(),
                reason: format!("unrecognized label '{}'", s),
            })
    }
}
