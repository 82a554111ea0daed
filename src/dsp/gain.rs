//! Constant gain.
//!
//! The simplest node in the crate: every sample is scaled by one factor.
//!
//! ```text
//! gain > 1.0  →  louder
//! gain = 1.0  →  unchanged
//! gain = 0.25 →  -12 dB (the gain node's default)
//! gain = 0.0  →  silence
//! ```

/// Scale a signal by a constant factor (in-place).
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

/// Write `input * gain` into `out`.
///
/// # Panics
/// Panics in debug builds if the slices have different lengths.
#[inline]
pub fn gain_buffer(input: &[f32], out: &mut [f32], gain: f32) {
    debug_assert_eq!(input.len(), out.len());

    for (o, &s) in out.iter_mut().zip(input.iter()) {
        *o = s * gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_gain() {
        let mut signal = [1.0, 0.5, -0.5, -1.0];
        apply_gain(&mut signal, 0.5);
        assert_eq!(signal, [0.5, 0.25, -0.25, -0.5]);
    }

    #[test]
    fn test_gain_buffer_quarter() {
        let input = [1.0, -2.0, 0.4];
        let mut out = [0.0; 3];
        gain_buffer(&input, &mut out, 0.25);
        assert_eq!(out, [0.25, -0.5, 0.1]);
    }

    #[test]
    fn test_zero_gain_silences() {
        let mut signal = [0.3, -0.7, 0.5];
        apply_gain(&mut signal, 0.0);
        assert_eq!(signal, [0.0, 0.0, 0.0]);
    }
}
