//! Benchmarks for the feedback wave folder at the oversampled rate.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use metanodes::dsp::fold::{FoldParams, FoldShaper};
use metanodes::OVERSAMPLE_FACTOR;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/fold");

    for &size in BLOCK_SIZES {
        // The shaper always sees oversampled blocks
        let len = size * OVERSAMPLE_FACTOR;
        let input: Vec<f32> = (0..len).map(|i| (i as f32 * 0.02).sin()).collect();

        let mut shaper = FoldShaper::new(SAMPLE_RATE);
        let params = FoldParams::default();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("default", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                shaper.process(black_box(&mut buffer), black_box(&params));
            })
        });

        // Dense folding
        let mut shaper = FoldShaper::new(SAMPLE_RATE);
        let dense = FoldParams {
            depth: 1.0,
            shape_frequency: 8.0,
            ..FoldParams::default()
        };
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("dense", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                shaper.process(black_box(&mut buffer), black_box(&dense));
            })
        });
    }

    group.finish();
}
