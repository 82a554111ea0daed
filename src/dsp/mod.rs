//! Low-level DSP primitives used by the graph nodes.
//!
//! These components never allocate once constructed, making them safe to run
//! on a realtime audio thread. They stay focused on the signal-processing math;
//! the `graph` layer adds the host-facing contract and interface metadata.

/// Two-operator FM oscillator.
pub mod fm;
/// State-variable lowpass used for anti-aliasing.
pub mod filter;
/// Wave folding with feedback saturation.
pub mod fold;
/// Constant gain.
pub mod gain;
/// 4× oversampling around a non-linear stage.
pub mod oversample;

pub use fm::{FmOscillator, FmParams, ModulationEnvelope};
pub use fold::{FoldParams, FoldShaper};
pub use oversample::{OversampleFilter, Oversampler};
