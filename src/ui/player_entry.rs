use itertools::Itertools;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use charades::{config::GameMode, util::format_minutes};

use crate::{
    ui::{legend, HORIZONTAL_MARGIN, VERTICAL_MARGIN},
    App,
};

pub fn render_player_entry(app: &App, f: &mut Frame) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(2), // banner
            Constraint::Length(2), // summary
            Constraint::Length(3), // name input
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(f.area());

    let banner = match app.session.current_team() {
        Some(team) => Span::styled(
            format!("Team {team}'s Turn!"),
            bold_style.fg(Color::Cyan),
        ),
        None => Span::styled("Your Turn!", bold_style.fg(Color::Cyan)),
    };
    f.render_widget(
        Paragraph::new(banner).alignment(Alignment::Center),
        chunks[1],
    );

    if let Some(cfg) = app.session.config() {
        let mode = match cfg.game_mode {
            GameMode::Team => "Team Mode",
            GameMode::Individual => "Individual Mode",
        };
        let summary = format!(
            "{} • {} per turn • {} • turn {}",
            mode,
            format_minutes(cfg.time_per_round),
            cfg.categories.iter().map(|c| c.label()).join(", "),
            app.session.players().len() + 1
        );
        f.render_widget(
            Paragraph::new(Span::styled(summary, dim_style)).alignment(Alignment::Center),
            chunks[2],
        );
    }

    let input = Paragraph::new(Line::from(vec![
        Span::styled(app.name_input.as_str(), bold_style),
        Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Player name"));
    f.render_widget(input, chunks[3]);

    f.render_widget(legend("(enter) begin / (esc) new game"), chunks[5]);
}
