//! Benchmarks for the two-operator FM oscillator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use metanodes::dsp::fm::{FmOscillator, FmParams, ModulationEnvelope};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_fm(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/fm");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Default 1:1 patch
        let mut osc = FmOscillator::new(SAMPLE_RATE);
        let params = FmParams::default();
        group.bench_with_input(BenchmarkId::new("default", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), black_box(&params));
            })
        });

        // Bell: high ratio and index, phases wrap often
        let mut osc = FmOscillator::new(SAMPLE_RATE);
        let bell = FmParams {
            frequency: 880.0,
            modulator_ratio: 7,
            modulation_index: 6,
            ..FmParams::default()
        };
        group.bench_with_input(BenchmarkId::new("bell", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), black_box(&bell));
            })
        });

        // Per-sample modulation envelope
        let mut osc = FmOscillator::new(SAMPLE_RATE);
        let envelope: Vec<f32> = (0..size).map(|i| 1.0 - i as f32 / size as f32).collect();
        group.bench_with_input(BenchmarkId::new("audio_envelope", size), &size, |b, _| {
            b.iter(|| {
                osc.render_with_envelope(
                    black_box(&mut buffer),
                    black_box(&params),
                    ModulationEnvelope::Audio(&envelope),
                );
            })
        });
    }

    group.finish();
}
