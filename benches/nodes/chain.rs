//! Benchmarks for graph nodes driven the way a host drives them.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use metanodes::graph::{create_node, GraphNode, NodeKind};
use metanodes::NodeConfig;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("nodes/chain");

    for &size in BLOCK_SIZES {
        let config = NodeConfig::new(SAMPLE_RATE, size).expect("valid config");
        let mut buffer = vec![0.0f32; size];

        // Folder alone on a fixed input
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin()).collect();
        let mut folder = create_node(NodeKind::WaveFolder, &config).expect("folder");
        group.bench_with_input(BenchmarkId::new("wave_folder", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                folder.render_block(black_box(&mut buffer));
            })
        });

        // FM → fold → gain, each node working on the same block in place
        let mut fm = create_node(NodeKind::FmGenerator, &config).expect("fm");
        let mut folder = create_node(NodeKind::WaveFolder, &config).expect("folder");
        let mut gain = create_node(NodeKind::Gain, &config).expect("gain");
        group.bench_with_input(BenchmarkId::new("fm_fold_gain", size), &size, |b, _| {
            b.iter(|| {
                fm.render_block(black_box(&mut buffer));
                folder.render_block(black_box(&mut buffer));
                gain.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
