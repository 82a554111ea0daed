//! Wave folding with feedback saturation.
//!
//! The shaper mixes three things per sample:
//!
//! - `tanh(x)`: soft saturation of the input
//! - `feedback_drive * tanh(previous_output)`: a one-sample recursive term
//! - `depth * sin(π * x * shape)`: a sine fold that reflects large excursions
//!   back toward zero instead of clipping them
//!
//! and normalises by `1 + tanh(previous_output)`.
//!
//! # Why oversample
//!
//! Every one of those terms is non-linear, so the output contains harmonics
//! well above the input's bandwidth. At the native rate those harmonics alias
//! back into the audible band. The node runs this shaper over a 4× oversampled
//! signal (see `oversample.rs`) and decimates afterwards.
//!
//! # Feedback ceiling
//!
//! With positive drive the recursion can run away: once `tanh(previous_output)`
//! nears -1 the denominator nears 0 and the next sample explodes. Any result
//! beyond ±`FEEDBACK_CEILING`, or not finite at all, is replaced by 0 and the
//! recursion restarts from rest. Clamping instead would pin the output to the
//! rail: at -4 the denominator is `1 - tanh(4) ≈ 6.7e-4`, so every following
//! sample overshoots again.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Lowest value `shape_frequency` is allowed to reach.
pub const SHAPE_FREQUENCY_FLOOR: f32 = 1e-5;

/// Largest magnitude the shaper will emit or feed back. Past it, the
/// recursion restarts at 0.
pub const FEEDBACK_CEILING: f32 = 4.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldParams {
    /// Amount of the folding sine subtracted from the saturated signal
    pub depth: f32,
    /// Folding sine frequency. Clamped to `SHAPE_FREQUENCY_FLOOR`.
    pub shape_frequency: f32,
    /// Weight of the feedback saturation term
    pub feedback_drive: f32,
}

impl Default for FoldParams {
    fn default() -> Self {
        Self {
            depth: 0.5,
            shape_frequency: 0.5,
            feedback_drive: 0.9,
        }
    }
}

/// One step of the fold/saturate recurrence.
///
/// `fold_rate` is the folding sine's angular rate per unit of input, i.e.
/// `2π * (shape * sample_rate / 2) / sample_rate`. Precompute it once per
/// block with [`fold_rate`].
#[inline]
pub fn fold_saturate(
    input: f32,
    previous_output: f32,
    depth: f32,
    feedback_drive: f32,
    fold_rate: f32,
) -> f32 {
    let fb = previous_output.tanh();
    let saturated = input.tanh() + feedback_drive * fb;
    let fold_term = depth * (input * fold_rate).sin();
    let y = (saturated - fold_term) / (1.0 + fb);

    // NaN fails the comparison too
    if y.abs() <= FEEDBACK_CEILING {
        y
    } else {
        0.0
    }
}

/// Angular rate of the folding sine for a given shape and sample rate.
#[inline]
pub fn fold_rate(shape_frequency: f32, sample_rate: f32) -> f32 {
    let shape = shape_frequency.max(SHAPE_FREQUENCY_FLOOR);
    TAU * (shape * sample_rate / 2.0) / sample_rate
}

/// Stateful shaper carrying the previous output between samples and blocks.
pub struct FoldShaper {
    sample_rate: f32,
    previous_output: f32,
}

impl FoldShaper {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            previous_output: 0.0,
        }
    }

    /// Most recent shaper output (at the oversampled rate).
    pub fn previous_output(&self) -> f32 {
        self.previous_output
    }

    pub fn reset(&mut self) {
        self.previous_output = 0.0;
    }

    /// Shape `buffer` in place, carrying feedback from sample to sample.
    pub fn process(&mut self, buffer: &mut [f32], params: &FoldParams) {
        let rate = fold_rate(params.shape_frequency, self.sample_rate);
        let mut prev = self.previous_output;

        for sample in buffer.iter_mut() {
            prev = fold_saturate(*sample, prev, params.depth, params.feedback_drive, rate);
            *sample = prev;
        }

        self.previous_output = prev;
    }
}
