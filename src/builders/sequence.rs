use crate::error::{Result, SurveyError};
use crate::topology::{MessagePassingKind, MessagePassingSpec, Topology};

/// Builder for sequence topologies with a fluent API
///
/// Each appended stage starts at the previous stage's declared output width.
/// Construction errors are held until [`SequenceBuilder::build`].
pub struct SequenceBuilder {
    input_dim: usize,
    stages: Vec<Topology>,
    error: Option<SurveyError>,
}

impl SequenceBuilder {
    /// Create a new sequence builder starting at `input_dim`
    pub fn new(input_dim: usize) -> Self {
        SequenceBuilder {
            input_dim,
            stages: Vec::new(),
            error: None,
        }
    }

    /// Width the next stage will consume
    pub fn current_dim(&self) -> usize {
        self.stages.last().map_or(self.input_dim, Topology::output_dim)
    }

    /// Append an MLP stage
    pub fn linear(self, hidden_dims: &[usize], output_dim: usize) -> Self {
        let input_dim = self.current_dim();
        self.push(Topology::linear(input_dim, hidden_dims, output_dim))
    }

    /// Append a message-passing stage
    pub fn message_passing(
        self,
        kind: MessagePassingKind,
        output_dim: usize,
        heads: usize,
        concat_heads: bool,
    ) -> Self {
        let input_dim = self.current_dim();
        self.push(
            MessagePassingSpec::new(input_dim, output_dim, kind, heads, concat_heads)
                .map(Topology::MessagePassing),
        )
    }

    /// Append a GraphConv-style stage
    pub fn graph_conv(self, output_dim: usize) -> Self {
        self.message_passing(MessagePassingKind::Basic, output_dim, 1, false)
    }

    /// Append a GATv2-style stage
    pub fn gatv2(self, output_dim: usize, heads: usize, concat_heads: bool) -> Self {
        self.message_passing(MessagePassingKind::Attention, output_dim, heads, concat_heads)
    }

    /// Append a DeepSets stage
    pub fn local_global(
        self,
        local_hidden: usize,
        global_hidden: usize,
        output_dim: usize,
        local_layers: usize,
        global_layers: usize,
    ) -> Self {
        let input_dim = self.current_dim();
        self.push(Topology::local_global(
            input_dim,
            local_hidden,
            global_hidden,
            output_dim,
            local_layers,
            global_layers,
        ))
    }

    /// Append an already constructed stage as-is
    pub fn stage(self, topology: Topology) -> Self {
        self.push(Ok(topology))
    }

    /// Build the sequence topology
    pub fn build(self) -> Result<Topology> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.input_dim == 0 {
            return Err(SurveyError::invalid_parameter(
                "input_dim",
                "must be greater than zero",
            ));
        }
        Topology::sequence(self.stages)
    }

    fn push(mut self, stage: Result<Topology>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match stage {
            Ok(stage) => self.stages.push(stage),
            Err(err) => self.error = Some(err),
        }
        self
    }
}
