use crate::config::NodeConfig;
use crate::dsp::fm::{FmOscillator, FmParams, ModulationEnvelope};
use crate::error::NodeError;
use crate::graph::interface::{NodeInterface, ParamSpec, ParamValue};
use crate::graph::node::{check_input, to_int_param, GraphNode, Parameterized};

/*
FM Generator Node
=================

A two-operator FM tone generator. A modulator sine bends the frequency of a
carrier sine; the carrier is the output. See `dsp/fm.rs` for the math.

Parameters
----------

Frequency (Hz, default 440):
  Base pitch. Both operators are integer multiples of it.

Modulation Ratio / Carrier Ratio (default 1 / 1):
  Operator pitch as a multiple of Frequency.
  1:1 = saw-like, C1:M2 = hollow/square-like, C1:M7 = bell/metallic

Modulation Index (default 1):
  Depth. 0 = pure sine, higher = brighter and noisier.

Modulation Envelope (default 1):
  Extra scale on depth. Read once per block through `render_block`; use
  `render_modulated` to supply a per-sample envelope instead.

Amplitude Envelope (default 1):
  Output level. Exactly 0 outputs silence (phases keep running).

Example usage:

  let config = NodeConfig::default();
  let mut bell = FmNode::new(&config)?.with_params(FmParams {
      frequency: 220.0,
      modulator_ratio: 7,
      modulation_index: 3,
      ..FmParams::default()
  });
  bell.render_block(&mut out);
*/

pub static FM_INTERFACE: NodeInterface = NodeInterface {
    class_name: "FM Generator Node",
    display_name: "FM Node",
    description: "Two-operator FM tone generator.",
    version: (1, 0),
    inputs: &[
        ParamSpec::float("Frequency", "Tone frequency.", 440.0),
        ParamSpec::int("Modulation Ratio", "Modulator frequency as a multiple of Frequency.", 1),
        ParamSpec::int("Carrier Ratio", "Carrier frequency as a multiple of Frequency.", 1),
        ParamSpec::int("Modulation Index", "Modulation depth (modAmp / modFreq).", 1),
        ParamSpec::float(
            "Modulation Envelope",
            "Envelope applied to the modulation oscillator.",
            1.0,
        ),
        ParamSpec::float("Amplitude Envelope", "Envelope applied to the entire output.", 1.0),
    ],
    output: "Out",
};

/// Parameters that can be set on an FM node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FmParam {
    Frequency,
    ModulatorRatio,
    CarrierRatio,
    ModulationIndex,
    ModulationEnvelope,
    AmplitudeEnvelope,
}

impl FmParam {
    /// Interface order
    pub const ALL: [FmParam; 6] = [
        FmParam::Frequency,
        FmParam::ModulatorRatio,
        FmParam::CarrierRatio,
        FmParam::ModulationIndex,
        FmParam::ModulationEnvelope,
        FmParam::AmplitudeEnvelope,
    ];
}

pub struct FmNode {
    osc: FmOscillator,
    params: FmParams,
}

impl FmNode {
    pub fn new(config: &NodeConfig) -> Result<Self, NodeError> {
        config.validate()?;
        tracing::debug!(sample_rate = config.sample_rate, "creating FM node");

        Ok(Self {
            osc: FmOscillator::new(config.sample_rate),
            params: FmParams::default(),
        })
    }

    pub fn with_params(mut self, params: FmParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &FmParams {
        &self.params
    }

    pub fn set_params(&mut self, params: FmParams) {
        self.params = params;
    }

    /// Current (carrier, modulator) phase in radians.
    pub fn phases(&self) -> (f32, f32) {
        (self.osc.carrier_phase(), self.osc.modulator_phase())
    }

    /// Render one block with a per-sample modulation envelope.
    ///
    /// `envelope` must be exactly as long as `out`; on mismatch nothing is
    /// written and phases do not advance.
    pub fn render_modulated(&mut self, out: &mut [f32], envelope: &[f32]) -> Result<(), NodeError> {
        if envelope.len() != out.len() {
            return Err(NodeError::BlockLengthMismatch {
                expected: out.len(),
                actual: envelope.len(),
            });
        }

        let params = self.params;
        self.osc
            .render_with_envelope(out, &params, ModulationEnvelope::Audio(envelope));
        Ok(())
    }
}

impl GraphNode for FmNode {
    fn interface(&self) -> &'static NodeInterface {
        &FM_INTERFACE
    }

    fn render_block(&mut self, out: &mut [f32]) {
        // Snapshot so the whole block sees one set of values
        let params = self.params;
        self.osc.render(out, &params);
    }

    fn set_input(&mut self, index: usize, value: ParamValue) -> Result<(), NodeError> {
        check_input(&FM_INTERFACE, index, &value)?;
        self.set_param(FmParam::ALL[index], value.as_f32());
        Ok(())
    }

    fn reset(&mut self) {
        tracing::debug!("resetting FM node");
        self.osc.reset();
    }
}

impl Parameterized for FmNode {
    type Param = FmParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            FmParam::Frequency => self.params.frequency,
            FmParam::ModulatorRatio => self.params.modulator_ratio as f32,
            FmParam::CarrierRatio => self.params.carrier_ratio as f32,
            FmParam::ModulationIndex => self.params.modulation_index as f32,
            FmParam::ModulationEnvelope => self.params.modulation_envelope,
            FmParam::AmplitudeEnvelope => self.params.amplitude_envelope,
        }
    }

    fn set_param(&mut self, param: Self::Param, value: f32) {
        match param {
            FmParam::Frequency => self.params.frequency = value,
            FmParam::ModulatorRatio => self.params.modulator_ratio = to_int_param(value),
            FmParam::CarrierRatio => self.params.carrier_ratio = to_int_param(value),
            FmParam::ModulationIndex => self.params.modulation_index = to_int_param(value),
            FmParam::ModulationEnvelope => self.params.modulation_envelope = value,
            FmParam::AmplitudeEnvelope => self.params.amplitude_envelope = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn node() -> FmNode {
        FmNode::new(&NodeConfig::default()).unwrap()
    }

    #[test]
    fn test_interface_matches_params() {
        assert_eq!(FM_INTERFACE.inputs.len(), FmParam::ALL.len());

        // Defaults declared in the interface must match FmParams::default()
        let fm = node();
        for (index, spec) in FM_INTERFACE.inputs.iter().enumerate() {
            let declared = spec.default.unwrap().as_f32();
            assert_eq!(declared, fm.get_param(FmParam::ALL[index]), "{}", spec.name);
        }
    }

    #[test]
    fn test_phase_stays_wrapped_every_sample() {
        let mut fm = node().with_params(FmParams {
            frequency: 5_000.0,
            modulator_ratio: 3,
            carrier_ratio: 2,
            modulation_index: 4,
            ..FmParams::default()
        });

        let mut sample = [0.0f32; 1];
        for _ in 0..10_000 {
            fm.render_block(&mut sample);
            let (carrier, modulator) = fm.phases();
            assert!((0.0..TAU).contains(&carrier), "carrier phase {}", carrier);
            assert!((0.0..TAU).contains(&modulator), "modulator phase {}", modulator);
        }
    }

    #[test]
    fn test_negative_frequency_stays_finite() {
        let mut fm = node().with_params(FmParams {
            frequency: -880.0,
            modulation_index: 8,
            ..FmParams::default()
        });
        let mut buffer = vec![0.0f32; 2048];
        fm.render_block(&mut buffer);

        assert!(buffer.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
        let (carrier, modulator) = fm.phases();
        assert!((0.0..TAU).contains(&carrier));
        assert!((0.0..TAU).contains(&modulator));
    }

    #[test]
    fn test_silence_short_circuit() {
        let mut fm = node().with_params(FmParams {
            frequency: 1234.0,
            modulator_ratio: 5,
            carrier_ratio: 3,
            modulation_index: 9,
            modulation_envelope: 2.0,
            amplitude_envelope: 0.0,
        });
        let mut buffer = vec![1.0f32; 512];
        fm.render_block(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));

        // Phases kept moving underneath the silence
        let (carrier, _) = fm.phases();
        assert!(carrier != 0.0);
    }

    #[test]
    fn test_set_input_by_index() {
        let mut fm = node();
        let ratio = FM_INTERFACE.input_index("Carrier Ratio").unwrap();

        fm.set_input(ratio, ParamValue::Int(3)).unwrap();
        assert_eq!(fm.params().carrier_ratio, 3);

        assert!(matches!(
            fm.set_input(ratio, ParamValue::Float(2.5)),
            Err(NodeError::ParamTypeMismatch { .. })
        ));

        let freq = FM_INTERFACE.input_index("Frequency").unwrap();
        fm.set_input(freq, ParamValue::Int(220)).unwrap();
        assert_eq!(fm.params().frequency, 220.0);

        assert_eq!(
            fm.set_input(6, ParamValue::Float(1.0)),
            Err(NodeError::UnknownInput { index: 6 })
        );
    }

    #[test]
    fn test_render_modulated_rejects_short_envelope() {
        let mut fm = node();
        let mut out = vec![0.0f32; 64];
        let envelope = vec![1.0f32; 32];
        assert_eq!(
            fm.render_modulated(&mut out, &envelope),
            Err(NodeError::BlockLengthMismatch {
                expected: 64,
                actual: 32
            })
        );
        assert_eq!(fm.phases(), (0.0, 0.0));
    }

    #[test]
    fn test_render_modulated_constant_matches_control() {
        let mut a = node();
        let mut b = node();
        let mut out_a = vec![0.0f32; 128];
        let mut out_b = vec![0.0f32; 128];

        a.render_block(&mut out_a);
        b.render_modulated(&mut out_b, &[1.0; 128]).unwrap();
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = NodeConfig::default().with_sample_rate(0.0);
        assert!(FmNode::new(&config).is_err());
    }
}
