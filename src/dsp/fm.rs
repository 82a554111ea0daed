//! Two-operator FM tone generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/*
Two-Operator FM
===============

Two sine oscillators ("operators") run side by side. The modulator never
reaches the output directly; its value bends the carrier's frequency, and the
carrier is what you hear.

Vocabulary
----------

  carrier       The audible oscillator. Its base pitch is frequency * C ratio.

  modulator     The oscillator that wobbles the carrier. Its pitch is
                frequency * M ratio.

  ratio         Integer multiple of the base frequency. Integer ratios keep
                the sidebands on the harmonic series, so the tone stays
                pitched. 1:1 gives a saw-like spectrum, 1:2 a square-like one.

  index         Modulation depth. Larger index = more sidebands = brighter.

  phase         Angular position of an oscillator in [0, 2π). Advanced every
                sample by 2π * f / sample_rate.


The Recurrence
--------------

For every sample:

    mod_amp    = f * M * index * mod_env
    offset_hz  = mod_amp * sin(mod_phase)
    out        = amp_env * sin(carrier_phase)
    carrier_hz = f * C + offset_hz

    mod_phase     += 2π * (f * M) / sample_rate
    carrier_phase += 2π * carrier_hz / sample_rate

The modulator output is turned into a frequency offset in Hz before it is
added to the carrier's base frequency. That makes this true frequency
modulation (the carrier's phase is the integral of the modulated frequency)
rather than the phase modulation most "FM" synths actually do.

    mod_phase:      0 ──────────→ 2π ──→ wraps
    offset_hz:      +f·M·I ... 0 ... -f·M·I
    carrier speed:  faster ......... slower


Phase Wrapping
--------------

Phases are kept in [0, 2π) with a single conditional subtract. That is only
enough while one sample's increment stays under a full period, which holds
for any frequency below the sample rate. Extreme or negative parameter
values fall back to a slower euclidean wrap so the phase never leaves the
range or becomes NaN.
*/

/// Control-rate parameters for the FM generator.
///
/// All values are read once per block and held for the whole block.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FmParams {
    /// Base frequency in Hz
    pub frequency: f32,
    /// Modulator frequency as a multiple of `frequency`
    pub modulator_ratio: i32,
    /// Carrier frequency as a multiple of `frequency`
    pub carrier_ratio: i32,
    /// Modulation depth
    pub modulation_index: i32,
    /// Extra scale on modulation depth (e.g. from an envelope)
    pub modulation_envelope: f32,
    /// Output amplitude. Exactly 0 forces silence.
    pub amplitude_envelope: f32,
}

impl Default for FmParams {
    fn default() -> Self {
        Self {
            frequency: 440.0,
            modulator_ratio: 1,
            carrier_ratio: 1,
            modulation_index: 1,
            modulation_envelope: 1.0,
            amplitude_envelope: 1.0,
        }
    }
}

/// Source of the modulation envelope for one block.
#[derive(Debug, Clone, Copy)]
pub enum ModulationEnvelope<'a> {
    /// One value for the whole block
    Control(f32),
    /// One value per output sample. A short buffer holds its last value;
    /// an empty one means no modulation.
    Audio(&'a [f32]),
}

impl ModulationEnvelope<'_> {
    #[inline]
    fn at(&self, index: usize) -> f32 {
        match self {
            ModulationEnvelope::Control(value) => *value,
            ModulationEnvelope::Audio(buffer) => buffer
                .get(index)
                .or_else(|| buffer.last())
                .copied()
                .unwrap_or(0.0),
        }
    }
}

/// Wrap a phase into [0, 2π).
///
/// One conditional step covers every increment smaller than a period. Anything
/// else goes through `rem_euclid`; non-finite phases restart at 0.
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    let mut p = phase;
    if p >= TAU {
        p -= TAU;
    } else if p < 0.0 {
        p += TAU;
    }

    if !(0.0..TAU).contains(&p) {
        p = if p.is_finite() { p.rem_euclid(TAU) } else { 0.0 };
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if p >= TAU {
            p = 0.0;
        }
    }

    p
}

/// Carrier + modulator phase accumulators.
pub struct FmOscillator {
    sample_rate: f32,
    carrier_phase: f32,
    modulator_phase: f32,
}

impl FmOscillator {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            carrier_phase: 0.0,
            modulator_phase: 0.0,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn carrier_phase(&self) -> f32 {
        self.carrier_phase
    }

    pub fn modulator_phase(&self) -> f32 {
        self.modulator_phase
    }

    pub fn reset(&mut self) {
        self.carrier_phase = 0.0;
        self.modulator_phase = 0.0;
    }

    /// Produce one sample and advance both phases.
    #[inline]
    pub fn next_sample(&mut self, params: &FmParams, modulation_envelope: f32) -> f32 {
        let frequency = params.frequency;
        let modulator_hz = frequency * params.modulator_ratio as f32;

        let mod_amplitude = modulator_hz * params.modulation_index as f32 * modulation_envelope;
        let mod_offset_hz = mod_amplitude * self.modulator_phase.sin();

        // Silence still advances phase so the tone resumes where it would have been
        let output = if params.amplitude_envelope == 0.0 {
            0.0
        } else {
            params.amplitude_envelope * self.carrier_phase.sin()
        };

        let carrier_hz = frequency * params.carrier_ratio as f32 + mod_offset_hz;
        let carrier_inc = TAU * carrier_hz / self.sample_rate;
        let modulator_inc = TAU * modulator_hz / self.sample_rate;

        self.modulator_phase = wrap_phase(self.modulator_phase + modulator_inc);
        self.carrier_phase = wrap_phase(self.carrier_phase + carrier_inc);

        output
    }

    /// Fill `out` using a block-constant modulation envelope from `params`.
    pub fn render(&mut self, out: &mut [f32], params: &FmParams) {
        self.render_with_envelope(
            out,
            params,
            ModulationEnvelope::Control(params.modulation_envelope),
        );
    }

    /// Fill `out`, taking the modulation envelope from `envelope`.
    pub fn render_with_envelope(
        &mut self,
        out: &mut [f32],
        params: &FmParams,
        envelope: ModulationEnvelope<'_>,
    ) {
        for (i, sample) in out.iter_mut().enumerate() {
            *sample = self.next_sample(params, envelope.at(i));
        }
    }
}
