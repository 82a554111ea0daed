use crate::config::NodeConfig;
use crate::dsp::fold::{FoldParams, FoldShaper};
use crate::dsp::oversample::{OversampleFilter, Oversampler};
use crate::error::NodeError;
use crate::graph::interface::{NodeInterface, ParamSpec, ParamValue};
use crate::graph::node::{check_input, GraphNode, Parameterized};

/*
Wave Folder Node
================

Folds and saturates a signal with one-sample feedback, running the
non-linearity at 4× the sample rate and decimating back.

Parameters
----------

Depth (default 0.5):
  How much of the folding sine is subtracted. 0 = saturation only.

Shape Frequency (default 0.5):
  Frequency of the folding sine per unit of input. Higher = more folds
  across the same input swing = denser, more metallic harmonics.
  Never goes below 1e-5.

Feedback Drive (default 0.9):
  Weight of the previous output fed back through tanh. Higher values thicken
  the tone. When strong positive drive makes the feedback blow past ±4, the
  shaper restarts from rest instead, which is heard as a short dropout.

Oversampling Filter (construction option, default Lowpass):
  Lowpass band-limits around the non-linearity. Bypass reproduces the plain
  zero-stuff / pick-every-4th behaviour.

Example usage:

  let mut folder = FoldNode::new(&config)?
      .with_params(FoldParams { depth: 0.8, ..FoldParams::default() });

  fm.render_block(&mut block);      // source writes into the block
  folder.render_block(&mut block);  // folder processes it in place
*/

pub static FOLD_INTERFACE: NodeInterface = NodeInterface {
    class_name: "Wave Folder Node",
    display_name: "Wave Folder",
    description: "Oversampled wave folder with feedback saturation.",
    version: (1, 0),
    inputs: &[
        ParamSpec::audio("In", "Audio input."),
        ParamSpec::float("Depth", "Amount of folding subtracted from the saturated signal.", 0.5),
        ParamSpec::float("Shape Frequency", "Frequency of the folding sine.", 0.5),
        ParamSpec::float("Feedback Drive", "Weight of the feedback saturation term.", 0.9),
    ],
    output: "Out",
};

/// Parameters that can be set on a fold node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoldParam {
    Depth,
    ShapeFrequency,
    FeedbackDrive,
}

pub struct FoldNode {
    shaper: FoldShaper,
    oversampler: Oversampler,
    params: FoldParams,
}

impl FoldNode {
    pub fn new(config: &NodeConfig) -> Result<Self, NodeError> {
        Self::with_filter(config, OversampleFilter::default())
    }

    pub fn with_filter(config: &NodeConfig, filter: OversampleFilter) -> Result<Self, NodeError> {
        config.validate()?;
        tracing::debug!(
            sample_rate = config.sample_rate,
            max_block_size = config.max_block_size,
            ?filter,
            "creating wave folder node"
        );

        Ok(Self {
            shaper: FoldShaper::new(config.sample_rate),
            oversampler: Oversampler::new(config, filter),
            params: FoldParams::default(),
        })
    }

    pub fn with_params(mut self, params: FoldParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &FoldParams {
        &self.params
    }

    pub fn set_params(&mut self, params: FoldParams) {
        self.params = params;
    }

    pub fn filter(&self) -> OversampleFilter {
        self.oversampler.mode()
    }

    /// Change the oversampling filter. Filter memory is cleared; feedback
    /// state is kept.
    pub fn set_filter(&mut self, filter: OversampleFilter) {
        self.oversampler.set_mode(filter);
    }

    /// Last value produced by the non-linearity (oversampled rate).
    pub fn previous_output(&self) -> f32 {
        self.shaper.previous_output()
    }

    /// Fold `input` into `out`. Both must be the same length.
    pub fn process(&mut self, input: &[f32], out: &mut [f32]) -> Result<(), NodeError> {
        if input.len() != out.len() {
            return Err(NodeError::BlockLengthMismatch {
                expected: out.len(),
                actual: input.len(),
            });
        }

        out.copy_from_slice(input);
        self.render_block(out);
        Ok(())
    }
}

impl GraphNode for FoldNode {
    fn interface(&self) -> &'static NodeInterface {
        &FOLD_INTERFACE
    }

    fn render_block(&mut self, out: &mut [f32]) {
        let params = self.params;
        let shaper = &mut self.shaper;
        self.oversampler
            .process_in_place(out, |oversampled| shaper.process(oversampled, &params));
    }

    fn set_input(&mut self, index: usize, value: ParamValue) -> Result<(), NodeError> {
        check_input(&FOLD_INTERFACE, index, &value)?;
        let param = match index {
            1 => FoldParam::Depth,
            2 => FoldParam::ShapeFrequency,
            _ => FoldParam::FeedbackDrive,
        };
        self.set_param(param, value.as_f32());
        Ok(())
    }

    fn reset(&mut self) {
        tracing::debug!("resetting wave folder node");
        self.shaper.reset();
        self.oversampler.reset();
    }
}

impl Parameterized for FoldNode {
    type Param = FoldParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            FoldParam::Depth => self.params.depth,
            FoldParam::ShapeFrequency => self.params.shape_frequency,
            FoldParam::FeedbackDrive => self.params.feedback_drive,
        }
    }

    fn set_param(&mut self, param: Self::Param, value: f32) {
        match param {
            FoldParam::Depth => self.params.depth = value,
            FoldParam::ShapeFrequency => self.params.shape_frequency = value,
            FoldParam::FeedbackDrive => self.params.feedback_drive = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::fold::FEEDBACK_CEILING;
    use std::f32::consts::TAU;

    fn config() -> NodeConfig {
        NodeConfig::default().with_max_block_size(64)
    }

    fn sine(freq: f32, amplitude: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| amplitude * (TAU * freq * i as f32 / 48_000.0).sin())
            .collect()
    }

    #[test]
    fn test_length_preserved_for_any_block() {
        for filter in [OversampleFilter::Bypass, OversampleFilter::Lowpass] {
            let mut folder = FoldNode::with_filter(&config(), filter).unwrap();
            for len in [0, 1, 7, 63, 64, 65, 200, 1000] {
                let input = sine(440.0, 0.5, len);
                let mut out = vec![f32::NAN; len];
                folder.process(&input, &mut out).unwrap();
                assert_eq!(out.len(), len);
                assert!(out.iter().all(|s| s.is_finite()), "partial fill at len {}", len);
            }
        }
    }

    #[test]
    fn test_chunked_matches_single_pass() {
        let input = sine(330.0, 0.7, 256);

        let mut small = FoldNode::with_filter(&config(), OversampleFilter::Lowpass).unwrap();
        let mut big = FoldNode::with_filter(
            &NodeConfig::default().with_max_block_size(256),
            OversampleFilter::Lowpass,
        )
        .unwrap();

        let mut a = vec![0.0; 256];
        let mut b = vec![0.0; 256];
        small.process(&input, &mut a).unwrap();
        big.process(&input, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let mut folder = FoldNode::new(&config()).unwrap();
        let input = vec![0.0; 16];
        let mut out = vec![0.0; 8];
        assert_eq!(
            folder.process(&input, &mut out),
            Err(NodeError::BlockLengthMismatch {
                expected: 8,
                actual: 16
            })
        );
    }

    #[test]
    fn test_bounded_for_bounded_input() {
        for filter in [OversampleFilter::Bypass, OversampleFilter::Lowpass] {
            for drive in [-0.9, 0.0, 0.5, 0.9] {
                let mut folder = FoldNode::with_filter(&config(), filter)
                    .unwrap()
                    .with_params(FoldParams {
                        feedback_drive: drive,
                        ..FoldParams::default()
                    });
                let input = sine(220.0, 1.0, 4800);
                let mut out = vec![0.0; 4800];
                folder.process(&input, &mut out).unwrap();

                // Lowpass decimation may overshoot the ceiling slightly
                let bound = FEEDBACK_CEILING * 1.25;
                for &sample in &out {
                    assert!(sample.is_finite());
                    assert!(
                        sample.abs() <= bound,
                        "{:?} drive {} produced {}",
                        filter,
                        drive,
                        sample
                    );
                }
            }
        }
    }

    #[test]
    fn test_default_params_keep_moving() {
        for filter in [OversampleFilter::Bypass, OversampleFilter::Lowpass] {
            let mut folder = FoldNode::with_filter(&config(), filter).unwrap();
            let input = sine(220.0, 0.5, 48_000);
            let mut out = vec![0.0; 48_000];
            folder.process(&input, &mut out).unwrap();

            let tail = &out[24_000..];
            let (min, max) = tail
                .iter()
                .fold((f32::MAX, f32::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));
            assert!(max - min > 0.1, "{:?} peak-to-peak {}", filter, max - min);

            let at_rail = tail
                .iter()
                .filter(|s| s.abs() >= FEEDBACK_CEILING - 1e-3)
                .count();
            assert!(
                at_rail < tail.len() / 100,
                "{:?} had {} samples on the rail",
                filter,
                at_rail
            );
        }
    }

    #[test]
    fn test_filter_modes_differ() {
        let input = sine(3_000.0, 0.9, 512);
        let mut bypass = FoldNode::with_filter(&config(), OversampleFilter::Bypass).unwrap();
        let mut lowpass = FoldNode::with_filter(&config(), OversampleFilter::Lowpass).unwrap();
        let mut a = vec![0.0; 512];
        let mut b = vec![0.0; 512];
        bypass.process(&input, &mut a).unwrap();
        lowpass.process(&input, &mut b).unwrap();
        assert!(a.iter().zip(b.iter()).any(|(x, y)| (x - y).abs() > 1e-3));
    }

    #[test]
    fn test_set_input_updates_params() {
        let mut folder = FoldNode::new(&config()).unwrap();
        let depth = FOLD_INTERFACE.input_index("Depth").unwrap();
        let drive = FOLD_INTERFACE.input_index("Feedback Drive").unwrap();

        folder.set_input(depth, ParamValue::Float(0.1)).unwrap();
        folder.set_input(drive, ParamValue::Int(0)).unwrap();
        assert_eq!(folder.params().depth, 0.1);
        assert_eq!(folder.params().feedback_drive, 0.0);

        assert_eq!(
            folder.set_input(0, ParamValue::Float(1.0)),
            Err(NodeError::NotAControl { name: "In" })
        );
    }

    #[test]
    fn test_reset_clears_feedback() {
        let mut folder = FoldNode::with_filter(&config(), OversampleFilter::Bypass).unwrap();
        let mut block = vec![1.0; 8];
        folder.render_block(&mut block);
        assert!(folder.previous_output() != 0.0);

        folder.reset();
        assert_eq!(folder.previous_output(), 0.0);
        let mut silence = vec![0.0; 8];
        folder.render_block(&mut silence);
        assert!(silence.iter().all(|&s| s == 0.0));
    }
}
