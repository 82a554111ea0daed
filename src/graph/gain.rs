use crate::dsp::gain::{apply_gain, gain_buffer};
use crate::error::NodeError;
use crate::graph::interface::{NodeInterface, ParamSpec, ParamValue};
use crate::graph::node::{check_input, GraphNode, Parameterized};

pub static GAIN_INTERFACE: NodeInterface = NodeInterface {
    class_name: "Test Node",
    display_name: "Gain",
    description: "Pass-through gain.",
    version: (1, 0),
    inputs: &[
        ParamSpec::audio("In", "Audio input."),
        ParamSpec::float("Gain", "Linear gain applied to the input.", DEFAULT_GAIN),
    ],
    output: "Out",
};

/// -12 dB
pub const DEFAULT_GAIN: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GainParam {
    Gain,
}

/// Scales its input by a constant.
pub struct GainNode {
    gain: f32,
}

impl GainNode {
    pub fn new(gain: f32) -> Self {
        Self { gain }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Write `input * gain` into `out`. Both must be the same length.
    pub fn process(&mut self, input: &[f32], out: &mut [f32]) -> Result<(), NodeError> {
        if input.len() != out.len() {
            return Err(NodeError::BlockLengthMismatch {
                expected: out.len(),
                actual: input.len(),
            });
        }
        gain_buffer(input, out, self.gain);
        Ok(())
    }
}

impl Default for GainNode {
    fn default() -> Self {
        Self::new(DEFAULT_GAIN)
    }
}

impl GraphNode for GainNode {
    fn interface(&self) -> &'static NodeInterface {
        &GAIN_INTERFACE
    }

    fn render_block(&mut self, out: &mut [f32]) {
        apply_gain(out, self.gain);
    }

    fn set_input(&mut self, index: usize, value: ParamValue) -> Result<(), NodeError> {
        check_input(&GAIN_INTERFACE, index, &value)?;
        self.set_param(GainParam::Gain, value.as_f32());
        Ok(())
    }
}

impl Parameterized for GainNode {
    type Param = GainParam;

    fn get_param(&self, _param: Self::Param) -> f32 {
        self.gain
    }

    fn set_param(&mut self, _param: Self::Param, value: f32) {
        self.gain = value;
    }
}
