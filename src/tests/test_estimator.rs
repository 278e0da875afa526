use std::collections::BTreeMap;

use crate::builders::SequenceBuilder;
use crate::estimator::{estimate, estimate_many, EstimateReport};
use crate::error::SurveyError;
use crate::topology::{MessagePassingKind, MessagePassingSpec, Topology};

#[test]
fn test_linear_matches_worked_example() {
    // 18*128+128 + 128*128+128 + 128*2+2
    let mlp = Topology::linear(18, &[128, 128], 2).unwrap();
    assert_eq!(estimate(&mlp), 2432 + 16512 + 258);
    assert_eq!(estimate(&mlp), 19330);
}

#[test]
fn test_attention_head_count_invariance_without_concat() {
    for heads in [1, 2, 4, 8, 16] {
        let layer = Topology::gatv2(64, 64, heads, false).unwrap();
        assert_eq!(estimate(&layer), 4288, "heads = {}", heads);
    }
}

#[test]
fn test_attention_concat_scales_with_heads() {
    let one = Topology::gatv2(64, 64, 1, true).unwrap();
    let four = Topology::gatv2(64, 64, 4, true).unwrap();
    assert_eq!(estimate(&one), 4288);
    assert_eq!(estimate(&four), 17152);
    assert_eq!(estimate(&four), 4 * estimate(&one));
}

#[test]
fn test_basic_message_passing() {
    let spec = MessagePassingSpec::new(32, 16, MessagePassingKind::Basic, 3, true).unwrap();
    assert_eq!(estimate(&Topology::MessagePassing(spec)), 32 * 16 + 16);
}

#[test]
fn test_local_global_repeated_layers() {
    // local: 10->8->8->8 ; global: 8->4->4->4->3
    let topology = Topology::local_global(10, 8, 4, 3, 2, 3).unwrap();
    let local = (10 * 8 + 8) + (8 * 8 + 8) + (8 * 8 + 8);
    let global = (8 * 4 + 4) + (4 * 4 + 4) + (4 * 4 + 4) + (4 * 3 + 3);
    assert_eq!(estimate(&topology), (local + global) as u64);
}

#[test]
fn test_sequence_uses_declared_dims() {
    // Mismatched boundary (64 -> 32) is not corrected
    let seq = Topology::sequence(vec![
        Topology::linear(18, &[], 64).unwrap(),
        Topology::linear(32, &[], 2).unwrap(),
    ])
    .unwrap();
    assert_eq!(estimate(&seq), (18 * 64 + 64) + (32 * 2 + 2));
}

#[test]
fn test_nested_sequences() {
    let inner = SequenceBuilder::new(18).linear(&[64], 64).graph_conv(64).build().unwrap();
    let inner_count = estimate(&inner);
    let outer = SequenceBuilder::new(18)
        .stage(inner)
        .linear(&[64], 2)
        .build()
        .unwrap();
    assert_eq!(estimate(&outer), inner_count + 4290);
}

#[test]
fn test_invalid_descriptors_fail_at_construction() {
    let err = Topology::linear(18, &[128, 0], 2).unwrap_err();
    assert!(matches!(err, SurveyError::InvalidParameter { .. }));

    assert!(Topology::graph_conv(0, 64).is_err());
    assert!(Topology::sequence(vec![]).is_err());
}

#[test]
fn test_estimate_report_statistics() {
    let mut topologies = BTreeMap::new();
    topologies.insert("a".to_string(), Topology::linear(1, &[], 1).unwrap()); // 2
    topologies.insert("b".to_string(), Topology::linear(1, &[], 3).unwrap()); // 6
    topologies.insert("c".to_string(), Topology::linear(3, &[], 1).unwrap()); // 4

    let counts = estimate_many(&topologies);
    assert_eq!(counts.values().copied().collect::<Vec<_>>(), vec![2, 6, 4]);

    let report = EstimateReport::from_topologies(&topologies);
    let stats = report.statistics.as_ref().unwrap();
    assert_eq!(stats.count, 3);
    assert_eq!(stats.min, 2);
    assert_eq!(stats.max, 6);
    assert_eq!(stats.range, 4);
    assert!((stats.mean - 4.0).abs() < 1e-12);
    assert!((stats.std_dev - 2.0).abs() < 1e-12);
    assert_eq!(report.get("b"), Some(6));
    assert_eq!(report.get("missing"), None);
}

#[test]
fn test_empty_estimate_report() {
    let report = EstimateReport::from_topologies(&BTreeMap::new());
    assert!(report.counts.is_empty());
    assert!(report.statistics.is_none());
}
