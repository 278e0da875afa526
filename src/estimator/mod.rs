//! # Parameter Estimator
//!
//! Closed-form trainable-parameter counts for [`Topology`] descriptors. No
//! model is ever built; the counts follow from the declared shapes alone.
//!
//! ## Attention approximation
//!
//! The attention estimate counts one transform and bias per head plus two
//! attention-coefficient vectors per head. It does not model the separate
//! source/target projections a faithful GATv2 layer carries, so real layers
//! are larger than the estimate. The approximation is kept so counts stay
//! comparable with previously reported surveys.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::metrics::CountStatistics;
use crate::topology::{
    LinearSpec, LocalGlobalSpec, MessagePassingKind, MessagePassingSpec, SequenceSpec, Topology,
};

/// Number of trainable scalar parameters
pub type ParameterCount = u64;

/// Estimate the trainable parameters of a topology
///
/// Descriptor constructors reject shapes whose count would not fit, so the
/// saturated value is never returned for a constructed topology.
pub fn estimate(topology: &Topology) -> ParameterCount {
    checked_estimate(topology).unwrap_or(ParameterCount::MAX)
}

/// Estimate, or `None` when the count overflows a `ParameterCount`
pub fn checked_estimate(topology: &Topology) -> Option<ParameterCount> {
    match topology {
        Topology::Linear(spec) => checked_linear(spec),
        Topology::MessagePassing(spec) => checked_message_passing(spec),
        Topology::LocalGlobal(spec) => checked_local_global(spec),
        Topology::Sequence(spec) => checked_sequence(spec),
    }
}

/// Estimate every named topology
pub fn estimate_many(topologies: &BTreeMap<String, Topology>) -> BTreeMap<String, ParameterCount> {
    topologies
        .iter()
        .map(|(name, topology)| (name.clone(), estimate(topology)))
        .collect()
}

/// Weight matrix plus one bias per output unit, for each layer boundary
pub fn estimate_linear(spec: &LinearSpec) -> ParameterCount {
    checked_linear(spec).unwrap_or(ParameterCount::MAX)
}

pub fn estimate_message_passing(spec: &MessagePassingSpec) -> ParameterCount {
    checked_message_passing(spec).unwrap_or(ParameterCount::MAX)
}

/// Local encoder plus global decoder; aggregation is parameter-free
pub fn estimate_local_global(spec: &LocalGlobalSpec) -> ParameterCount {
    checked_local_global(spec).unwrap_or(ParameterCount::MAX)
}

pub fn checked_linear(spec: &LinearSpec) -> Option<ParameterCount> {
    spec.dims()
        .windows(2)
        .try_fold(0u64, |total, pair| total.checked_add(affine(pair[0], pair[1])?))
}

pub fn checked_message_passing(spec: &MessagePassingSpec) -> Option<ParameterCount> {
    let fan_out = count(spec.output_dim())?;

    match spec.kind() {
        // Head settings do not apply to basic message passing
        MessagePassingKind::Basic => affine(spec.input_dim(), spec.output_dim()),
        MessagePassingKind::Attention if spec.concat_heads() => {
            let heads = count(spec.heads())?;
            // Per head: transform, bias, two attention vectors
            let per_head = affine(spec.input_dim(), spec.output_dim())?.checked_add(fan_out.checked_mul(2)?)?;
            per_head.checked_mul(heads)
        }
        // Averaged heads: width independent of head count
        MessagePassingKind::Attention => {
            affine(spec.input_dim(), spec.output_dim())?.checked_add(fan_out.checked_mul(2)?)
        }
    }
}

/// Local encoder: input -> hidden, then `local_layers` hidden -> hidden layers.
/// Global decoder: hidden -> global, `global_layers - 1` global -> global
/// layers, then global -> output.
pub fn checked_local_global(spec: &LocalGlobalSpec) -> Option<ParameterCount> {
    let (hidden, global) = (spec.local_hidden(), spec.global_hidden());

    let local = affine(spec.input_dim(), hidden)?
        .checked_add(affine(hidden, hidden)?.checked_mul(count(spec.local_layers())?)?)?;
    let decoder = affine(hidden, global)?
        .checked_add(affine(global, global)?.checked_mul(count(spec.global_layers() - 1)?)?)?
        .checked_add(affine(global, spec.output_dim())?)?;

    local.checked_add(decoder)
}

/// Stages are counted independently and summed
pub fn checked_sequence(spec: &SequenceSpec) -> Option<ParameterCount> {
    spec.stages()
        .iter()
        .try_fold(0u64, |total, stage| total.checked_add(checked_estimate(stage)?))
}

/// One dense layer: `fan_in * fan_out` weights plus `fan_out` biases
fn affine(fan_in: usize, fan_out: usize) -> Option<ParameterCount> {
    let fan_out = count(fan_out)?;
    count(fan_in)?.checked_mul(fan_out)?.checked_add(fan_out)
}

fn count(value: usize) -> Option<ParameterCount> {
    ParameterCount::try_from(value).ok()
}

/// Estimates for a set of named topologies with their summary statistics
#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    pub counts: BTreeMap<String, ParameterCount>,
    pub statistics: Option<CountStatistics>,
}

impl EstimateReport {
    pub fn from_topologies(topologies: &BTreeMap<String, Topology>) -> Self {
        let counts = estimate_many(topologies);
        let values: Vec<ParameterCount> = counts.values().copied().collect();

        EstimateReport {
            statistics: CountStatistics::from_counts(&values),
            counts,
        }
    }

    /// Count for one named topology
    pub fn get(&self, name: &str) -> Option<ParameterCount> {
        self.counts.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_closed_form() {
        let mlp = Topology::linear(18, &[128, 128], 2).unwrap();
        assert_eq!(estimate(&mlp), 19330);
    }

    #[test]
    fn test_single_layer_linear() {
        let layer = Topology::linear(4, &[], 3).unwrap();
        assert_eq!(estimate(&layer), 4 * 3 + 3);
    }

    #[test]
    fn test_basic_message_passing_ignores_heads() {
        let one = MessagePassingSpec::new(64, 64, MessagePassingKind::Basic, 1, false).unwrap();
        let many = MessagePassingSpec::new(64, 64, MessagePassingKind::Basic, 8, true).unwrap();
        assert_eq!(estimate_message_passing(&one), 4160);
        assert_eq!(estimate_message_passing(&many), 4160);
    }

    #[test]
    fn test_attention_estimates() {
        let averaged = Topology::gatv2(64, 64, 4, false).unwrap();
        let concat = Topology::gatv2(64, 64, 4, true).unwrap();
        assert_eq!(estimate(&averaged), 4288);
        assert_eq!(estimate(&concat), 17152);
    }

    #[test]
    fn test_local_global() {
        // 18*128+128 + 128*128+128 | 128*128+128 + 128*2+2
        let deepsets = Topology::local_global(18, 128, 128, 2, 1, 1).unwrap();
        assert_eq!(estimate(&deepsets), 2432 + 16512 + 16512 + 258);
    }

    #[test]
    fn test_sequence_is_sum_of_stages() {
        let stages = vec![
            Topology::linear(18, &[64], 64).unwrap(),
            Topology::graph_conv(64, 64).unwrap(),
            Topology::linear(64, &[64], 2).unwrap(),
        ];
        let expected: u64 = stages.iter().map(estimate).sum();
        let seq = Topology::sequence(stages).unwrap();
        assert_eq!(estimate(&seq), expected);
        assert_eq!(estimate(&seq), 5376 + 4160 + 4290);
    }

    #[test]
    fn test_estimate_many_keeps_names() {
        let mut topologies = BTreeMap::new();
        topologies.insert("mlp".to_string(), Topology::linear(18, &[128, 128], 2).unwrap());
        topologies.insert("gat".to_string(), Topology::gatv2(64, 64, 4, false).unwrap());

        let counts = estimate_many(&topologies);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["mlp"], 19330);
        assert_eq!(counts["gat"], 4288);
    }

    #[test]
    fn test_deep_local_global_counts_every_layer() {
        // local: 8*16+16 + 3*(16*16+16) | global: 16*32+32 + 1*(32*32+32) + 32*2+2
        let spec = LocalGlobalSpec::new(8, 16, 32, 2, 3, 2).unwrap();
        assert_eq!(estimate_local_global(&spec), 144 + 816 + 544 + 1056 + 66);
    }

    #[test]
    fn test_checked_estimate_matches_estimate() {
        let seq = Topology::sequence(vec![
            Topology::linear(18, &[64], 64).unwrap(),
            Topology::gatv2(64, 64, 4, true).unwrap(),
        ])
        .unwrap();
        assert_eq!(checked_estimate(&seq), Some(estimate(&seq)));
        assert_eq!(estimate(&seq), 5376 + 17152);
    }

    #[test]
    fn test_largest_accepted_layer_is_exact() {
        // 2^31 * 2^31 + 2^31 still fits, and is reported exactly
        let wide = Topology::linear(1 << 31, &[], 1 << 31).unwrap();
        assert_eq!(estimate(&wide), (1u64 << 62) + (1u64 << 31));
    }
}
