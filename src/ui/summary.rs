use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::format::format_currency;
use crate::ui::{BRAND_BLUE, BRAND_TEAL};
use crate::view_model::Summary;

/// (label, value, accent) for each dashboard tile, left to right.
pub fn tiles(summary: &Summary) -> [(&'static str, String, Color); 4] {
    [
        ("Total projets", summary.total.to_string(), Color::White),
        ("En cours", summary.in_progress.to_string(), BRAND_BLUE),
        ("Terminés", summary.completed.to_string(), BRAND_TEAL),
        ("Budget total", format_currency(summary.total_budget), Color::Magenta),
    ]
}

pub fn render_summary<B: Backend>(frame: &mut Frame<B>, summary: &Summary, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4].as_ref())
        .split(area);

    for (chunk, (label, value, accent)) in chunks.iter().zip(tiles(summary)) {
        let tile = Paragraph::new(vec![
            Spans::from(Span::styled(label, Style::default().fg(Color::Gray))),
            Spans::from(Span::styled(
                value,
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(tile, *chunk);
    }
}
