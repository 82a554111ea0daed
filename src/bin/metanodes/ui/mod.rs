//! Terminal UI: parameter panel, oscilloscope and spectrum.

mod params;
mod spectrum;
pub mod state;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::time::Duration;

pub use state::{ControlMessage, PatchState};

use params::render_params;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, AudioStats};
use waveform::render_waveform;

/// Samples shown by the scope and fed to the FFT
const VIS_BUFFER_SIZE: usize = 2048;

pub struct UiApp {
    control_tx: Producer<ControlMessage>,
    scope_rx: Consumer<f32>,
    patch: PatchState,
    sample_rate: f32,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        control_tx: Producer<ControlMessage>,
        scope_rx: Consumer<f32>,
        patch: PatchState,
        sample_rate: f32,
    ) -> Self {
        Self {
            control_tx,
            scope_rx,
            patch,
            sample_rate,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.spectrum.update(&self.audio_buffer);

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Drain the scope queue, keeping the newest VIS_BUFFER_SIZE samples
    fn poll_audio(&mut self) {
        while let Ok(sample) = self.scope_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let message = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Up => {
                self.patch.select_previous();
                None
            }
            KeyCode::Down => {
                self.patch.select_next();
                None
            }
            KeyCode::Left => Some(self.patch.adjust(-1)),
            KeyCode::Right => Some(self.patch.adjust(1)),
            KeyCode::Char('f') => Some(self.patch.toggle_filter()),
            KeyCode::Char('b') => Some(self.patch.toggle_bypass()),
            KeyCode::Char('r') => Some(ControlMessage::Reset),
            _ => None,
        };

        if let Some(message) = message {
            if self.control_tx.push(message).is_err() {
                tracing::warn!(?message, "control queue full, dropping message");
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Status bar
                Constraint::Min(10),    // Params + scope
                Constraint::Length(12), // Spectrum
                Constraint::Length(1),  // Help bar
            ])
            .split(frame.area());

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(frame, rows[0], &self.patch, self.sample_rate, &stats);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(20)])
            .split(rows[1]);
        render_params(frame, middle[0], &self.patch);
        render_waveform(frame, middle[1], &self.audio_buffer);

        render_spectrum(frame, rows[2], self.spectrum.data());

        let help = Paragraph::new(
            " [↑↓] Select  [←→] Adjust  [F] Filter  [B] Bypass fold  [R] Reset  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[3]);
    }
}
