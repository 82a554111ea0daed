//! Status bar: engine routing and output level

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use metanodes::dsp::OversampleFilter;

use super::state::PatchState;

pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    patch: &PatchState,
    sample_rate: f32,
    stats: &AudioStats,
) {
    let block = Block::default().title(" metanodes ").borders(Borders::ALL);

    let (route, route_color) = if patch.fold_bypassed {
        ("FM → out", Color::Yellow)
    } else {
        ("FM → fold → out", Color::Green)
    };
    let filter = match patch.filter {
        OversampleFilter::Lowpass => "4× lowpass",
        OversampleFilter::Bypass => "4× unfiltered",
    };

    let line = Line::from(vec![
        Span::styled(format!(" {}  ", route), Style::default().fg(route_color)),
        Span::styled(format!("{}  ", filter), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{:.1}kHz  ", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
