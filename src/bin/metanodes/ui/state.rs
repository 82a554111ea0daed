//! Patch state owned by the UI and the messages that carry it to audio.
//!
//! The UI keeps the authoritative copy of every parameter. Each edit sends
//! the whole (Copy) parameter set, so the audio thread never allocates.

use metanodes::dsp::{FmParams, FoldParams, OversampleFilter};

/// Commands sent from UI thread to audio thread
#[derive(Clone, Copy, Debug)]
pub enum ControlMessage {
    SetFm(FmParams),
    SetFold(FoldParams),
    SetFilter(OversampleFilter),
    SetFoldBypass(bool),
    /// Zero phases, feedback and filter memory
    Reset,
}

/// One editable row in the parameter panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Frequency,
    ModulatorRatio,
    CarrierRatio,
    ModulationIndex,
    Amplitude,
    Depth,
    ShapeFrequency,
    FeedbackDrive,
}

impl Slot {
    pub const ALL: [Slot; 8] = [
        Slot::Frequency,
        Slot::ModulatorRatio,
        Slot::CarrierRatio,
        Slot::ModulationIndex,
        Slot::Amplitude,
        Slot::Depth,
        Slot::ShapeFrequency,
        Slot::FeedbackDrive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Slot::Frequency => "Frequency",
            Slot::ModulatorRatio => "Mod Ratio",
            Slot::CarrierRatio => "Carrier Ratio",
            Slot::ModulationIndex => "Mod Index",
            Slot::Amplitude => "Amplitude",
            Slot::Depth => "Fold Depth",
            Slot::ShapeFrequency => "Shape Freq",
            Slot::FeedbackDrive => "Feedback",
        }
    }

    pub fn is_fold(&self) -> bool {
        matches!(self, Slot::Depth | Slot::ShapeFrequency | Slot::FeedbackDrive)
    }
}

/// Everything the demo lets the user change
#[derive(Clone, Copy, Debug)]
pub struct PatchState {
    pub fm: FmParams,
    pub fold: FoldParams,
    pub filter: OversampleFilter,
    pub fold_bypassed: bool,
    pub selected: usize,
}

impl Default for PatchState {
    fn default() -> Self {
        Self {
            fm: FmParams {
                frequency: 110.0,
                modulator_ratio: 2,
                ..FmParams::default()
            },
            fold: FoldParams::default(),
            filter: OversampleFilter::default(),
            fold_bypassed: false,
            selected: 0,
        }
    }
}

impl PatchState {
    pub fn selected_slot(&self) -> Slot {
        Slot::ALL[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % Slot::ALL.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + Slot::ALL.len() - 1) % Slot::ALL.len();
    }

    /// Display value for a slot
    pub fn value(&self, slot: Slot) -> String {
        match slot {
            Slot::Frequency => format!("{:.1} Hz", self.fm.frequency),
            Slot::ModulatorRatio => self.fm.modulator_ratio.to_string(),
            Slot::CarrierRatio => self.fm.carrier_ratio.to_string(),
            Slot::ModulationIndex => self.fm.modulation_index.to_string(),
            Slot::Amplitude => format!("{:.2}", self.fm.amplitude_envelope),
            Slot::Depth => format!("{:.2}", self.fold.depth),
            Slot::ShapeFrequency => format!("{:.2}", self.fold.shape_frequency),
            Slot::FeedbackDrive => format!("{:.2}", self.fold.feedback_drive),
        }
    }

    /// Step the selected slot up (`steps > 0`) or down and return the message
    /// that brings the audio thread in line.
    pub fn adjust(&mut self, steps: i32) -> ControlMessage {
        let slot = self.selected_slot();
        let fine = steps as f32 * 0.05;

        match slot {
            Slot::Frequency => {
                // One semitone per step
                let ratio = 2f32.powf(steps as f32 / 12.0);
                self.fm.frequency = (self.fm.frequency * ratio).clamp(20.0, 5_000.0);
            }
            Slot::ModulatorRatio => {
                self.fm.modulator_ratio = (self.fm.modulator_ratio + steps).clamp(1, 16)
            }
            Slot::CarrierRatio => {
                self.fm.carrier_ratio = (self.fm.carrier_ratio + steps).clamp(1, 16)
            }
            Slot::ModulationIndex => {
                self.fm.modulation_index = (self.fm.modulation_index + steps).clamp(0, 20)
            }
            Slot::Amplitude => {
                self.fm.amplitude_envelope = (self.fm.amplitude_envelope + fine).clamp(0.0, 1.0)
            }
            Slot::Depth => self.fold.depth = (self.fold.depth + fine).clamp(0.0, 2.0),
            Slot::ShapeFrequency => {
                self.fold.shape_frequency = (self.fold.shape_frequency + fine).clamp(0.0, 4.0)
            }
            Slot::FeedbackDrive => {
                self.fold.feedback_drive = (self.fold.feedback_drive + fine).clamp(-0.95, 0.95)
            }
        }

        if slot.is_fold() {
            ControlMessage::SetFold(self.fold)
        } else {
            ControlMessage::SetFm(self.fm)
        }
    }

    pub fn toggle_filter(&mut self) -> ControlMessage {
        self.filter = match self.filter {
            OversampleFilter::Bypass => OversampleFilter::Lowpass,
            OversampleFilter::Lowpass => OversampleFilter::Bypass,
        };
        ControlMessage::SetFilter(self.filter)
    }

    pub fn toggle_bypass(&mut self) -> ControlMessage {
        self.fold_bypassed = !self.fold_bypassed;
        ControlMessage::SetFoldBypass(self.fold_bypassed)
    }
}
