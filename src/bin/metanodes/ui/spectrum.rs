//! Spectrum view
//!
//! Linear frequency axis so FM sidebands and fold harmonics show up as evenly
//! spaced peaks. Magnitudes are in dB relative to a full-scale sine.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::TAU;
use std::sync::Arc;

/// Highest frequency drawn
const DISPLAY_MAX_HZ: f32 = 12_000.0;
const FLOOR_DB: f64 = -90.0;
/// Per-frame falloff applied to the displayed magnitude (dB)
const DECAY_DB: f64 = 1.5;

pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    /// Normalisation so a full-scale sine reads 0 dB
    reference: f32,
    bin_hz: f64,
    /// (frequency_hz, magnitude_db) per displayed bin
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_size: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(fft_size);

        let window: Vec<f32> = (0..fft_size)
            .map(|i| 0.5 - 0.5 * (TAU * i as f32 / fft_size.max(1) as f32).cos())
            .collect();
        let reference = (window.iter().sum::<f32>() / 2.0).max(f32::EPSILON);

        let bin_hz = sample_rate as f64 / fft_size.max(1) as f64;
        let max_hz = DISPLAY_MAX_HZ.min(sample_rate / 2.0) as f64;
        let bins = ((max_hz / bin_hz) as usize).min(fft_size / 2);
        let spectrum = (0..bins).map(|i| (i as f64 * bin_hz, FLOOR_DB)).collect();

        Self {
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); fft_size],
            reference,
            bin_hz,
            spectrum,
        }
    }

    /// Analyse the newest samples. Buffers of the wrong length are ignored.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (i, (freq, db)) in self.spectrum.iter_mut().enumerate() {
            let magnitude = self.scratch[i].norm() / self.reference;
            let fresh = (20.0 * (magnitude.max(1e-9) as f64).log10()).max(FLOOR_DB);
            // Rise instantly, fall slowly
            *db = fresh.max(*db - DECAY_DB);
            *freq = i as f64 * self.bin_hz;
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let max_freq = spectrum.last().map(|(f, _)| *f).unwrap_or(1.0).max(1.0);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let khz_label = |hz: f64| format!("{:.0}k", hz / 1000.0);
    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_freq])
                .labels(vec![
                    "0".to_string(),
                    khz_label(max_freq / 2.0),
                    khz_label(max_freq),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 6.0])
                .labels(vec!["-90", "-45", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
