//! # Topology Descriptors
//!
//! Shape-only descriptions of the small networks used in the survey. A
//! descriptor never carries weights; it only records the dimensions needed to
//! count trainable parameters in closed form.
//!
//! Every constructor validates its arguments, so an existing descriptor is
//! always well formed and estimation cannot fail.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SurveyError};
use crate::estimator;

/// Message-passing layer flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessagePassingKind {
    /// Plain message passing (GraphConv style), no attention heads
    Basic,
    /// Attention-weighted message passing (GATv2 style)
    Attention,
}

/// Stack of fully-connected affine layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinearSpec {
    input_dim: usize,
    hidden_dims: Vec<usize>,
    output_dim: usize,
}

impl LinearSpec {
    pub fn new(input_dim: usize, hidden_dims: &[usize], output_dim: usize) -> Result<Self> {
        ensure_positive("input_dim", input_dim)?;
        ensure_positive("output_dim", output_dim)?;
        for (i, &dim) in hidden_dims.iter().enumerate() {
            ensure_positive(&format!("hidden_dims[{}]", i), dim)?;
        }

        let spec = LinearSpec {
            input_dim,
            hidden_dims: hidden_dims.to_vec(),
            output_dim,
        };
        ensure_countable(estimator::checked_linear(&spec))?;
        Ok(spec)
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn hidden_dims(&self) -> &[usize] {
        &self.hidden_dims
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    /// Full dimension chain: input, every hidden width, output
    pub fn dims(&self) -> Vec<usize> {
        let mut dims = Vec::with_capacity(self.hidden_dims.len() + 2);
        dims.push(self.input_dim);
        dims.extend_from_slice(&self.hidden_dims);
        dims.push(self.output_dim);
        dims
    }
}

/// Single message-passing layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagePassingSpec {
    input_dim: usize,
    output_dim: usize,
    kind: MessagePassingKind,
    heads: usize,
    concat_heads: bool,
}

impl MessagePassingSpec {
    pub fn new(
        input_dim: usize,
        output_dim: usize,
        kind: MessagePassingKind,
        heads: usize,
        concat_heads: bool,
    ) -> Result<Self> {
        ensure_positive("input_dim", input_dim)?;
        ensure_positive("output_dim", output_dim)?;
        if heads == 0 {
            return Err(SurveyError::invalid_parameter("heads", "must be at least 1"));
        }

        let spec = MessagePassingSpec {
            input_dim,
            output_dim,
            kind,
            heads,
            concat_heads,
        };
        ensure_countable(estimator::checked_message_passing(&spec))?;
        Ok(spec)
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    pub fn kind(&self) -> MessagePassingKind {
        self.kind
    }

    pub fn heads(&self) -> usize {
        self.heads
    }

    pub fn concat_heads(&self) -> bool {
        self.concat_heads
    }
}

/// Two-stage network: per-element local encoder, parameter-free aggregation,
/// then a global decoder (DeepSets)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalGlobalSpec {
    input_dim: usize,
    local_hidden: usize,
    global_hidden: usize,
    output_dim: usize,
    local_layers: usize,
    global_layers: usize,
}

impl LocalGlobalSpec {
    pub fn new(
        input_dim: usize,
        local_hidden: usize,
        global_hidden: usize,
        output_dim: usize,
        local_layers: usize,
        global_layers: usize,
    ) -> Result<Self> {
        ensure_positive("input_dim", input_dim)?;
        ensure_positive("local_hidden", local_hidden)?;
        ensure_positive("global_hidden", global_hidden)?;
        ensure_positive("output_dim", output_dim)?;
        ensure_positive("local_layers", local_layers)?;
        ensure_positive("global_layers", global_layers)?;

        let spec = LocalGlobalSpec {
            input_dim,
            local_hidden,
            global_hidden,
            output_dim,
            local_layers,
            global_layers,
        };
        ensure_countable(estimator::checked_local_global(&spec))?;
        Ok(spec)
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn local_hidden(&self) -> usize {
        self.local_hidden
    }

    pub fn global_hidden(&self) -> usize {
        self.global_hidden
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    pub fn local_layers(&self) -> usize {
        self.local_layers
    }

    pub fn global_layers(&self) -> usize {
        self.global_layers
    }
}

/// Ordered composition of stages
///
/// Stage dimensions are taken as declared; no cross-stage consistency check
/// is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceSpec {
    stages: Vec<Topology>,
}

impl SequenceSpec {
    pub fn new(stages: Vec<Topology>) -> Result<Self> {
        if stages.is_empty() {
            return Err(SurveyError::invalid_parameter(
                "stages",
                "a sequence needs at least one stage",
            ));
        }
        let spec = SequenceSpec { stages };
        ensure_countable(estimator::checked_sequence(&spec))?;
        Ok(spec)
    }

    pub fn stages(&self) -> &[Topology] {
        &self.stages
    }
}

/// Shape description of a network topology
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Topology {
    Linear(LinearSpec),
    MessagePassing(MessagePassingSpec),
    LocalGlobal(LocalGlobalSpec),
    Sequence(SequenceSpec),
}

impl Topology {
    /// Plain MLP
    pub fn linear(input_dim: usize, hidden_dims: &[usize], output_dim: usize) -> Result<Self> {
        LinearSpec::new(input_dim, hidden_dims, output_dim).map(Topology::Linear)
    }

    /// GraphConv-style message passing layer
    pub fn graph_conv(input_dim: usize, output_dim: usize) -> Result<Self> {
        MessagePassingSpec::new(input_dim, output_dim, MessagePassingKind::Basic, 1, false)
            .map(Topology::MessagePassing)
    }

    /// GATv2-style attention layer
    pub fn gatv2(input_dim: usize, output_dim: usize, heads: usize, concat_heads: bool) -> Result<Self> {
        MessagePassingSpec::new(
            input_dim,
            output_dim,
            MessagePassingKind::Attention,
            heads,
            concat_heads,
        )
        .map(Topology::MessagePassing)
    }

    /// DeepSets-style local/global network
    pub fn local_global(
        input_dim: usize,
        local_hidden: usize,
        global_hidden: usize,
        output_dim: usize,
        local_layers: usize,
        global_layers: usize,
    ) -> Result<Self> {
        LocalGlobalSpec::new(
            input_dim,
            local_hidden,
            global_hidden,
            output_dim,
            local_layers,
            global_layers,
        )
        .map(Topology::LocalGlobal)
    }

    pub fn sequence(stages: Vec<Topology>) -> Result<Self> {
        SequenceSpec::new(stages).map(Topology::Sequence)
    }

    /// Declared input width
    pub fn input_dim(&self) -> usize {
        match self {
            Topology::Linear(spec) => spec.input_dim(),
            Topology::MessagePassing(spec) => spec.input_dim(),
            Topology::LocalGlobal(spec) => spec.input_dim(),
            // Non-empty by construction
            Topology::Sequence(spec) => spec.stages.first().map_or(0, Topology::input_dim),
        }
    }

    /// Declared output width
    pub fn output_dim(&self) -> usize {
        match self {
            Topology::Linear(spec) => spec.output_dim(),
            Topology::MessagePassing(spec) => spec.output_dim(),
            Topology::LocalGlobal(spec) => spec.output_dim(),
            Topology::Sequence(spec) => spec.stages.last().map_or(0, Topology::output_dim),
        }
    }
}

/// Every descriptor's parameter count must fit in a `ParameterCount`
fn ensure_countable(count: Option<estimator::ParameterCount>) -> Result<()> {
    match count {
        Some(_) => Ok(()),
        None => Err(SurveyError::invalid_parameter(
            "dimensions",
            "parameter count does not fit in 64 bits",
        )),
    }
}

fn ensure_positive(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(SurveyError::invalid_parameter(name, "must be greater than zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_dims_chain() {
        let spec = LinearSpec::new(18, &[128, 128], 2).unwrap();
        assert_eq!(spec.dims(), vec![18, 128, 128, 2]);

        let single = LinearSpec::new(4, &[], 2).unwrap();
        assert_eq!(single.dims(), vec![4, 2]);
    }

    #[test]
    fn test_constructor_preconditions() {
        assert!(Topology::linear(0, &[8], 2).is_err());
        assert!(Topology::linear(4, &[8, 0], 2).is_err());
        assert!(Topology::linear(4, &[8], 0).is_err());
        assert!(Topology::gatv2(8, 8, 0, true).is_err());
        assert!(Topology::local_global(8, 16, 16, 2, 0, 1).is_err());
        assert!(Topology::local_global(8, 16, 16, 2, 1, 0).is_err());
        assert!(Topology::sequence(Vec::new()).is_err());
    }

    #[test]
    fn test_precondition_error_names_field() {
        let err = Topology::linear(4, &[8, 0], 2).unwrap_err();
        assert_eq!(
            err,
            SurveyError::invalid_parameter("hidden_dims[1]", "must be greater than zero")
        );
    }

    #[test]
    fn test_oversized_descriptors_rejected() {
        let too_wide =
            SurveyError::invalid_parameter("dimensions", "parameter count does not fit in 64 bits");

        assert_eq!(Topology::linear(1 << 33, &[], 1 << 33).unwrap_err(), too_wide);
        assert_eq!(Topology::linear(4, &[1 << 33, 1 << 33], 2).unwrap_err(), too_wide);
        assert_eq!(Topology::gatv2(1 << 20, 1 << 20, 1 << 30, true).unwrap_err(), too_wide);
        assert_eq!(Topology::local_global(4, 1 << 20, 8, 2, 1 << 30, 1).unwrap_err(), too_wide);

        // Each stage fits on its own, the total does not
        let big = || Topology::linear(1 << 31, &[], 1 << 31).unwrap();
        assert!(Topology::sequence(vec![big(), big(), big()]).is_ok());
        assert_eq!(Topology::sequence(vec![big(), big(), big(), big()]).unwrap_err(), too_wide);
    }

    #[test]
    fn test_sequence_declared_dims() {
        let seq = Topology::sequence(vec![
            Topology::linear(18, &[64], 64).unwrap(),
            Topology::graph_conv(64, 64).unwrap(),
            Topology::linear(64, &[64], 2).unwrap(),
        ])
        .unwrap();

        assert_eq!(seq.input_dim(), 18);
        assert_eq!(seq.output_dim(), 2);
    }
}
