//! Audio setup and the realtime render loop

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};

use metanodes::{
    graph::{FmNode, FoldNode, GainNode, GraphNode},
    NodeConfig, MAX_BLOCK_SIZE,
};

use super::ui::{ControlMessage, PatchState, UiApp};

/// Samples buffered between the audio callback and the scope
const SCOPE_QUEUE_SIZE: usize = 16_384;
/// UI → audio commands in flight
const CONTROL_QUEUE_SIZE: usize = 64;

/// Builder for the demo: FM generator into the wave folder, with a fixed
/// output gain so the folder's ±4 range stays comfortable.
pub struct Demo {
    patch: PatchState,
}

impl Demo {
    pub fn new() -> Self {
        Self {
            patch: PatchState::default(),
        }
    }

    /// Open the default output device, start the stream and hand the terminal
    /// to the UI until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        tracing::info!(sample_rate, channels, "opened output device");

        let node_config = NodeConfig::new(sample_rate, MAX_BLOCK_SIZE)?;
        let (control_tx, control_rx) = RingBuffer::<ControlMessage>::new(CONTROL_QUEUE_SIZE);
        let (scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_QUEUE_SIZE);

        let mut engine = AudioEngine::new(&node_config, &self.patch, control_rx, scope_tx)?;

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| engine.render_interleaved(data, channels),
            |err| tracing::error!(%err, "audio stream error"),
            None,
        )?;
        stream.play()?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(control_tx, scope_rx, self.patch, sample_rate).run(&mut terminal);
        ratatui::restore();
        result
    }
}

impl Default for Demo {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the audio callback owns. Nothing in here is shared; the UI
/// only reaches it through the ring buffers.
struct AudioEngine {
    fm: FmNode,
    folder: FoldNode,
    output: GainNode,
    fold_bypassed: bool,
    control_rx: Consumer<ControlMessage>,
    scope_tx: Producer<f32>,
    block: Vec<f32>,
}

impl AudioEngine {
    fn new(
        config: &NodeConfig,
        patch: &PatchState,
        control_rx: Consumer<ControlMessage>,
        scope_tx: Producer<f32>,
    ) -> EyreResult<Self> {
        Ok(Self {
            fm: FmNode::new(config)?.with_params(patch.fm),
            folder: FoldNode::with_filter(config, patch.filter)?.with_params(patch.fold),
            output: GainNode::default(),
            fold_bypassed: patch.fold_bypassed,
            control_rx,
            scope_tx,
            block: vec![0.0; config.max_block_size],
        })
    }

    fn apply_controls(&mut self) {
        while let Ok(message) = self.control_rx.pop() {
            match message {
                ControlMessage::SetFm(params) => self.fm.set_params(params),
                ControlMessage::SetFold(params) => self.folder.set_params(params),
                ControlMessage::SetFilter(filter) => self.folder.set_filter(filter),
                ControlMessage::SetFoldBypass(bypassed) => self.fold_bypassed = bypassed,
                ControlMessage::Reset => {
                    self.fm.reset();
                    self.folder.reset();
                }
            }
        }
    }

    /// Render mono blocks and copy them to every channel of `data`.
    fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        self.apply_controls();

        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames_to_render = (total_frames - frames_written).min(self.block.len());
            let block = &mut self.block[..frames_to_render];

            self.fm.render_block(block);
            if !self.fold_bypassed {
                self.folder.render_block(block);
            }
            self.output.render_block(block);

            let out_off = frames_written * channels;
            for (i, &sample) in block.iter().enumerate() {
                let frame = &mut data[out_off + i * channels..out_off + (i + 1) * channels];
                frame.fill(sample);
                // Scope drops samples when the UI falls behind
                let _ = self.scope_tx.push(sample);
            }

            frames_written += frames_to_render;
        }
    }
}
