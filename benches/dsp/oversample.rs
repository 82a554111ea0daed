//! Benchmarks for the 4× oversampler with an identity stage, isolating the
//! cost of zero-stuffing, filtering and decimation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use metanodes::dsp::oversample::{OversampleFilter, Oversampler};
use metanodes::NodeConfig;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oversample(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oversample");

    for &size in BLOCK_SIZES {
        let config = NodeConfig::new(SAMPLE_RATE, size).expect("valid config");
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        for (name, mode) in [
            ("bypass", OversampleFilter::Bypass),
            ("lowpass", OversampleFilter::Lowpass),
        ] {
            let mut oversampler = Oversampler::new(&config, mode);
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    oversampler.process_in_place(black_box(&mut buffer), |_| {});
                })
            });
        }
    }

    group.finish();
}
