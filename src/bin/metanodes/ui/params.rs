//! Parameter panel

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::{PatchState, Slot};

pub fn render_params(frame: &mut Frame, area: Rect, patch: &PatchState) {
    let block = Block::default().title(" Patch ").borders(Borders::ALL);

    let lines: Vec<Line> = Slot::ALL
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let selected = i == patch.selected;
            let dimmed = slot.is_fold() && patch.fold_bypassed;

            let color = match (selected, dimmed) {
                (true, _) => Color::Yellow,
                (false, true) => Color::DarkGray,
                (false, false) => Color::White,
            };
            let mut style = Style::default().fg(color);
            if selected {
                style = style.add_modifier(Modifier::BOLD);
            }

            let marker = if selected { "▸ " } else { "  " };
            Line::from(vec![
                Span::styled(format!("{}{:<14}", marker, slot.label()), style),
                Span::styled(patch.value(*slot), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
