pub mod confirm;
pub mod player_entry;
pub mod playing;
pub mod results;
pub mod screen;
pub mod setup;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::App;

pub const HORIZONTAL_MARGIN: u16 = 5;
pub const VERTICAL_MARGIN: u16 = 2;

/// Draw the current screen, then the confirmation prompt over it if one is pending
pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(&app.state()).render(app, f);

    if let Some(pending) = app.confirm {
        confirm::render_confirm(pending, f);
    }
}

/// Key hints shown on the last line of every screen
pub fn legend(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(
        text,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
}

/// A rectangle of `percent_x` by `percent_y` centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_and_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let r = centered_rect(60, 50, area);
        assert_eq!(r.width, 60);
        assert_eq!(r.height, 20);
        assert_eq!(r.x, 20);
        assert_eq!(r.y, 10);
    }

    #[test]
    fn centered_rect_handles_tiny_areas() {
        let area = Rect::new(0, 0, 3, 2);
        let r = centered_rect(60, 30, area);
        assert!(r.width <= area.width);
        assert!(r.height <= area.height);
    }
}
