use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{ui::centered_rect, Confirm};

fn prompt(pending: Confirm) -> (&'static str, &'static str) {
    match pending {
        Confirm::ClearHistory => (
            "Clear all movie history?",
            "Previously guessed movies will be able to appear again.",
        ),
        Confirm::NewGame => (
            "Start a new game?",
            "This resets all current scores and returns to game setup.",
        ),
    }
}

pub fn render_confirm(pending: Confirm, f: &mut Frame) {
    let area = centered_rect(60, 30, f.area());
    let (question, detail) = prompt(pending);

    let text = vec![
        Line::from(Span::styled(
            question,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(detail),
        Line::from(""),
        Line::from(Span::styled(
            "(y)es / any other key cancels",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];

    let widget = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title("Are you sure?"),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(widget, area);
}
