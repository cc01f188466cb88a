pub mod header;
pub mod project_form;
pub mod projects;
pub mod summary;

use tui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
};

use crate::format::ProgressBand;
use crate::models::{ProjectStatus, ProjectType};

pub const BRAND_BLUE: Color = Color::Rgb(13, 110, 253);
pub const BRAND_TEAL: Color = Color::Rgb(32, 201, 151);

pub fn type_color(project_type: ProjectType) -> Color {
    match project_type {
        ProjectType::Forage => BRAND_BLUE,
        ProjectType::Solaire => Color::Yellow,
        ProjectType::Geophysique => Color::Magenta,
        ProjectType::Maintenance => BRAND_TEAL,
    }
}

pub fn status_color(status: ProjectStatus) -> Color {
    match status {
        ProjectStatus::Planning => Color::Gray,
        ProjectStatus::InProgress => BRAND_BLUE,
        ProjectStatus::Completed => BRAND_TEAL,
        ProjectStatus::OnHold => Color::Yellow,
    }
}

pub fn band_color(band: ProgressBand) -> Color {
    match band {
        ProgressBand::High => BRAND_TEAL,
        ProgressBand::Medium => BRAND_BLUE,
        ProgressBand::Low => Color::Yellow,
        ProgressBand::Minimal => Color::DarkGray,
    }
}

// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Rect of `width` x `height` hanging off the top-right corner of `area`,
/// just below a header of `top` rows. Clipped to `area`.
pub fn dropdown_rect(area: Rect, top: u16, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let y = area.y + top.min(area.height);
    let height = height.min(area.height.saturating_sub(y - area.y));
    Rect {
        x: area.x + area.width - width,
        y,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropdown_hangs_from_the_right_edge() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = dropdown_rect(area, 3, 40, 10);
        assert_eq!(rect, Rect::new(60, 3, 40, 10));
    }

    #[test]
    fn dropdown_is_clipped_to_small_areas() {
        let area = Rect::new(0, 0, 30, 8);
        let rect = dropdown_rect(area, 3, 40, 10);
        assert_eq!(rect, Rect::new(0, 3, 30, 5));
    }
}
