//! Estimator and classifier throughput
//!
//! Both are pure functions over small inputs; this keeps an eye on
//! accidental allocation-heavy changes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use marl_survey::builders::SequenceBuilder;
use marl_survey::classifier::classify;
use marl_survey::estimator::{estimate, EstimateReport};
use marl_survey::survey::{AgentDims, ModelCatalogue};
use serde_json::json;

fn bench_estimate(c: &mut Criterion) {
    let topology = SequenceBuilder::new(18)
        .linear(&[64, 64], 64)
        .gatv2(64, 4, true)
        .local_global(128, 128, 64, 2, 2)
        .linear(&[64], 2)
        .build()
        .unwrap();

    c.bench_function("estimate_sequence", |b| b.iter(|| estimate(black_box(&topology))));

    let topologies = ModelCatalogue::balanced(AgentDims::default()).unwrap().topologies();
    c.bench_function("estimate_report_catalogue", |b| {
        b.iter(|| EstimateReport::from_topologies(black_box(&topologies)))
    });
}

fn bench_classify(c: &mut Criterion) {
    let config = json!({
        "model_name": "sequencemodel",
        "model_config": {
            "model_configs_0": { "_target_": "benchmarl.models.mlp.MlpConfig", "num_cells": [64] },
            "model_configs_1": { "_target_": "benchmarl.models.gnn.GnnConfig", "gnn_class": "GraphConv" },
            "model_configs_2": { "_target_": "benchmarl.models.gru.GruConfig", "hidden_size": 64 },
            "intermediate_sizes": [64, 64],
        }
    });

    c.bench_function("classify_sequence", |b| b.iter(|| classify(black_box(&config))));
}

criterion_group!(benches, bench_estimate, bench_classify);
criterion_main!(benches);
