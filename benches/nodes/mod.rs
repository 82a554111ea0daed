//! Benchmarks for host-facing graph nodes.

mod chain;

pub use chain::bench_chain;
