//! Benchmarks for low-level DSP primitives.

mod fm;
mod fold;
mod oversample;

pub use fm::bench_fm;
pub use fold::bench_fold;
pub use oversample::bench_oversample;
