//! Fixed 4× oversampling around a non-linear stage.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::NodeConfig;
use crate::dsp::filter::{SVFilter, BUTTERWORTH_DAMPING};
use crate::OVERSAMPLE_FACTOR;

/*
Oversampling
============

A waveshaper creates harmonics far above its input. Any harmonic above
Nyquist (sample_rate / 2) folds back down as an inharmonic alias. Running
the shaper at a higher rate gives those harmonics room to exist before they
are thrown away.

Procedure (factor N = 4)
------------------------

  1. Zero-stuff     x[0] 0 0 0 x[1] 0 0 0 x[2] ...      (length N * L)
  2. Interpolate    lowpass at the old Nyquist, gain N   (Lowpass mode only)
  3. Shape          caller's closure over the whole oversampled buffer
  4. Band-limit     lowpass at the old Nyquist           (Lowpass mode only)
  5. Decimate       keep indices 0, N, 2N, ...           (length L)

    input   ●───────●───────●───────●
    stuffed ●─○─○─○─●─○─○─○─●─○─○─○─●     ○ = inserted zero
    output  ●───────●───────●───────●

Filter Modes
------------

Bypass:   Steps 2 and 4 are skipped. The shaper sees the raw zero-stuffed
          signal and the result is decimated without band-limiting, so
          alias suppression is only partial. This is the plain
          zero-stuff / pick-every-Nth path.

Lowpass:  Two cascaded Butterworth SVF sections per direction at
          0.9 * Nyquist (0.45 * sample_rate). Filter state
          carries across blocks like any other filter.

All buffers are sized at construction. Blocks longer than the configured
maximum are handled in consecutive chunks.
*/

/// Cutoff of the anti-aliasing filters as a fraction of the native Nyquist.
const CUTOFF_RATIO: f32 = 0.9;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OversampleFilter {
    /// Zero-stuff and decimate without filtering
    Bypass,
    /// Band-limit around the non-linearity
    #[default]
    Lowpass,
}

pub struct Oversampler {
    mode: OversampleFilter,
    max_block_size: usize,
    buffer: Vec<f32>, // OVERSAMPLE_FACTOR * max_block_size, allocated once
    interpolators: [SVFilter; 2],
    decimators: [SVFilter; 2],
}

impl Oversampler {
    /// Size buffers for `config.max_block_size` native samples. A zero block
    /// size is treated as 1 so chunking always makes progress.
    pub fn new(config: &NodeConfig, mode: OversampleFilter) -> Self {
        let sample_rate = config.sample_rate;
        let max_block_size = config.max_block_size.max(1);
        let oversampled_rate = sample_rate * OVERSAMPLE_FACTOR as f32;
        let cutoff = config.nyquist() * CUTOFF_RATIO;
        let section = || {
            let mut filter = SVFilter::lowpass(cutoff, oversampled_rate);
            filter.set_damping(BUTTERWORTH_DAMPING);
            filter
        };

        tracing::debug!(
            sample_rate,
            max_block_size,
            ?mode,
            "allocating {}x oversampling buffer",
            OVERSAMPLE_FACTOR
        );

        Self {
            mode,
            max_block_size,
            buffer: vec![0.0; OVERSAMPLE_FACTOR * max_block_size],
            interpolators: [section(), section()],
            decimators: [section(), section()],
        }
    }

    pub fn mode(&self) -> OversampleFilter {
        self.mode
    }

    /// Switch filter mode. Clears filter memory so stale state from the
    /// other mode does not leak into the next block.
    pub fn set_mode(&mut self, mode: OversampleFilter) {
        if mode != self.mode {
            tracing::debug!(?mode, "switching oversampling filter");
            self.mode = mode;
            self.reset();
        }
    }

    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    pub fn reset(&mut self) {
        for filter in self.interpolators.iter_mut().chain(self.decimators.iter_mut()) {
            filter.reset();
        }
        self.buffer.fill(0.0);
    }

    /// Oversample `buffer`, run `shape` at the higher rate, and write the
    /// decimated result back into `buffer`.
    pub fn process_in_place<F>(&mut self, buffer: &mut [f32], mut shape: F)
    where
        F: FnMut(&mut [f32]),
    {
        for chunk in buffer.chunks_mut(self.max_block_size) {
            self.process_chunk(chunk, &mut shape);
        }
    }

    /// Same as [`process_in_place`](Self::process_in_place) with separate
    /// input and output. Both slices must be the same length.
    pub fn process<F>(&mut self, input: &[f32], output: &mut [f32], shape: F)
    where
        F: FnMut(&mut [f32]),
    {
        debug_assert_eq!(input.len(), output.len());
        let len = input.len().min(output.len());
        output[..len].copy_from_slice(&input[..len]);
        self.process_in_place(&mut output[..len], shape);
    }

    fn process_chunk<F>(&mut self, chunk: &mut [f32], shape: &mut F)
    where
        F: FnMut(&mut [f32]),
    {
        let oversampled = &mut self.buffer[..chunk.len() * OVERSAMPLE_FACTOR];

        let gain = match self.mode {
            OversampleFilter::Bypass => 1.0,
            OversampleFilter::Lowpass => OVERSAMPLE_FACTOR as f32,
        };
        zero_stuff(chunk, oversampled, gain);

        if self.mode == OversampleFilter::Lowpass {
            for filter in self.interpolators.iter_mut() {
                filter.render(oversampled);
            }
        }

        shape(oversampled);

        if self.mode == OversampleFilter::Lowpass {
            for filter in self.decimators.iter_mut() {
                filter.render(oversampled);
            }
        }

        decimate(oversampled, chunk);
    }
}

/// Place `input[i] * gain` at `output[N * i]` and zero the slots in between.
#[inline]
pub fn zero_stuff(input: &[f32], output: &mut [f32], gain: f32) {
    for (frame, &sample) in output.chunks_exact_mut(OVERSAMPLE_FACTOR).zip(input) {
        frame.fill(0.0);
        frame[0] = sample * gain;
    }
}

/// Keep every Nth sample of `input`.
#[inline]
pub fn decimate(input: &[f32], output: &mut [f32]) {
    for (out, frame) in output.iter_mut().zip(input.chunks_exact(OVERSAMPLE_FACTOR)) {
        *out = frame[0];
    }
}
