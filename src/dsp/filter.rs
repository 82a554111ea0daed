use std::f32::consts::PI;

/*
State-Variable Lowpass
======================

Topology-preserving (trapezoidal) state-variable filter, lowpass tap only.
The oversampler uses it for both band-limiting jobs:

| job           | runs at          | removes                                  |
| ------------- | ---------------- | ---------------------------------------- |
| interpolation | 4 × sample rate  | spectral images created by zero-stuffing |
| decimation    | 4 × sample rate  | harmonics that would alias on the way down |

Coefficients
------------

  g = tan(π * cutoff / sample_rate)     pre-warped integrator gain
  k = 1 / Q                             damping (√2 for Butterworth)

Two sections in series give a 4-pole (24 dB/oct) response.
*/

/// Damping for a maximally-flat (Butterworth) second-order section.
pub const BUTTERWORTH_DAMPING: f32 = std::f32::consts::SQRT_2;

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    g: f32,
    k: f32,
}

impl SVFilter {
    pub fn lowpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        // Keep the cutoff strictly below Nyquist so tan() stays finite
        let cutoff = cutoff_hz.clamp(1.0, sample_rate * 0.49);
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: (PI * cutoff / sample_rate).tan(),
            k: BUTTERWORTH_DAMPING,
        }
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> f32 {
        let g = self.g;
        let h = 1.0 / (1.0 + g * (g + self.k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        v2
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    /// Set damping directly. 2.0 is critically damped, lower values ring.
    pub fn set_damping(&mut self, k: f32) {
        self.k = k.max(0.01);
    }
}
