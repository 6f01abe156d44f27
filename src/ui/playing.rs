use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use charades::{
    clock::WARNING_AT_SECS,
    game::{GameScreen, PlayState},
    turn::Turn,
    util::format_clock,
};

use crate::{
    ui::{legend, HORIZONTAL_MARGIN, VERTICAL_MARGIN},
    App,
};

pub fn render_playing(app: &App, f: &mut Frame) {
    match app.session.screen() {
        GameScreen::Playing(PlayState::Active(turn)) => render_turn(app, turn, f),
        GameScreen::Playing(PlayState::NoMovies) => render_loading(f),
        _ => {}
    }
}

fn render_loading(f: &mut Frame) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let loading = Paragraph::new(Span::styled(
        "Loading movies...",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(loading, chunks[1]);
    f.render_widget(legend("(esc) new game"), chunks[3]);
}

/// Lines the title needs at `width` columns, at least one
fn title_lines(title: &str, width: u16) -> u16 {
    if width == 0 || title.width() <= width as usize {
        return 1;
    }
    (title.width() as f64 / width as f64).ceil() as u16 + 1
}

fn render_turn(app: &App, turn: &Turn, f: &mut Frame) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let warning = turn.remaining() <= WARNING_AT_SECS;
    let accent = if warning { Color::Red } else { Color::Green };

    let area = f.area();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
    let occupied = title_lines(turn.current_title(), max_chars_per_line);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // player
            Constraint::Length(1), // timer
            Constraint::Length(1), // progress
            Constraint::Length(1), // counters
            Constraint::Min(0),
            Constraint::Length(occupied), // title
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let player = match app.session.current_team() {
        Some(team) => format!("{} • Team {}", app.session.player_name(), team),
        None => app.session.player_name().to_string(),
    };
    f.render_widget(
        Paragraph::new(Span::styled(player, dim_style)).alignment(Alignment::Center),
        chunks[0],
    );

    let timer = Paragraph::new(Line::from(vec![
        Span::raw("Time Remaining  "),
        Span::styled(format_clock(turn.remaining()), bold_style.fg(accent)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(timer, chunks[1]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(accent))
        .ratio(turn.clock().progress().clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, chunks[2]);

    let counters = Paragraph::new(Line::from(vec![
        Span::styled(format!("Skipped: {}", turn.skipped()), dim_style),
        Span::raw("    "),
        Span::styled(format!("Score: {}", turn.score()), bold_style),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(counters, chunks[3]);

    render_title(turn, chunks[5], occupied, f);

    let hint = if turn.is_finished() {
        legend("Time's up!")
    } else {
        legend("(space) got it! / (s)kip / (esc) new game")
    };
    f.render_widget(hint, chunks[7]);
}

fn render_title(turn: &Turn, area: Rect, occupied: u16, f: &mut Frame) {
    let style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let widget = Paragraph::new(Span::styled(turn.current_title(), style))
        .alignment(if occupied == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}
