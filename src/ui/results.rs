use itertools::Itertools;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use charades::{
    config::GameMode,
    game::{GameScreen, Player, Team},
    leaderboard::{headline, ranked, TeamStandings},
    turn::TurnResult,
    util::pluralize,
};

use crate::{
    ui::{legend, HORIZONTAL_MARGIN, VERTICAL_MARGIN},
    App,
};

fn headline_color(accuracy: u32) -> Color {
    match accuracy {
        80.. => Color::Green,
        60..=79 => Color::Cyan,
        40..=59 => Color::Yellow,
        _ => Color::Red,
    }
}

/// One leaderboard row; the player who just finished is highlighted
fn present_row(rank: usize, player: &Player, latest: bool) -> Row<'static> {
    let team = player
        .team
        .map(|t| format!("Team {t}"))
        .unwrap_or_default();
    let details = format!(
        "{} • {}% accuracy",
        pluralize(player.total as usize, "movie", "movies"),
        player.accuracy
    );
    let row = Row::new(vec![
        Cell::from(format!("{rank}")),
        Cell::from(player.name.clone()),
        Cell::from(team),
        Cell::from(player.score.to_string()),
        Cell::from(details),
    ]);
    if latest {
        row.style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        row
    }
}

fn standings_line(standings: &TeamStandings) -> Line<'static> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let team_span = |team: Team| {
        let style = if standings.leader() == Some(team) {
            bold_style.fg(Color::Green)
        } else {
            Style::default()
        };
        Span::styled(format!("Team {}: {}", team, standings.score(team)), style)
    };
    let verdict = match standings.leader() {
        Some(team) => format!("Team {team} leads"),
        None => "Tied".to_string(),
    };
    Line::from(vec![
        team_span(Team::A),
        Span::raw("    "),
        team_span(Team::B),
        Span::raw("    "),
        Span::styled(verdict, Style::default().add_modifier(Modifier::ITALIC)),
    ])
}

pub fn render_results(app: &App, f: &mut Frame) {
    let GameScreen::Results(result) = app.session.screen() else {
        return;
    };
    render_turn_result(app, result, f);
}

fn render_turn_result(app: &App, result: &TurnResult, f: &mut Frame) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let team_mode = app.session.game_mode() == Some(GameMode::Team);
    let accuracy = result.accuracy();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // headline
            Constraint::Length(1), // player
            Constraint::Length(1), // stats
            Constraint::Length(3), // guessed titles
            Constraint::Length(if team_mode { 2 } else { 0 }),
            Constraint::Min(4), // leaderboard
            Constraint::Length(1),
        ])
        .split(f.area());

    let head = Paragraph::new(Span::styled(
        headline(accuracy),
        bold_style.fg(headline_color(accuracy)),
    ))
    .alignment(Alignment::Center);
    f.render_widget(head, chunks[0]);

    let player = match app.session.players().last().and_then(|p| p.team) {
        Some(team) => format!("{} • Team {}", app.session.player_name(), team),
        None => app.session.player_name().to_string(),
    };
    f.render_widget(
        Paragraph::new(Span::styled(player, bold_style)).alignment(Alignment::Center),
        chunks[1],
    );

    let stats = Paragraph::new(Span::raw(format!(
        "Score {}   Skipped {}   Total {}   {}% accuracy",
        result.score, result.skipped, result.total, accuracy
    )))
    .alignment(Alignment::Center);
    f.render_widget(stats, chunks[2]);

    let guessed = if result.completed_titles.is_empty() {
        "No movies guessed this turn".to_string()
    } else {
        format!(
            "Guessed: {}",
            result.completed_titles.iter().sorted().join(", ")
        )
    };
    f.render_widget(
        Paragraph::new(Span::styled(guessed, dim_style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[3],
    );

    if team_mode {
        let standings = TeamStandings::from_players(app.session.players());
        f.render_widget(
            Paragraph::new(standings_line(&standings)).alignment(Alignment::Center),
            chunks[4],
        );
    }

    let players = app.session.players();
    let latest = players.last();
    let rows: Vec<Row> = ranked(players)
        .into_iter()
        .enumerate()
        .map(|(idx, p)| present_row(idx + 1, p, latest.is_some_and(|l| std::ptr::eq(l, p))))
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Min(24),
        ],
    )
    .header(
        Row::new(vec!["#", "Player", "Team", "Score", "Details"])
            .style(bold_style.add_modifier(Modifier::UNDERLINED)),
    )
    .block(Block::default().borders(Borders::ALL).title("Leaderboard"));
    f.render_widget(table, chunks[5]);

    f.render_widget(
        legend("(n)ext player / (g) new game / (q)uit"),
        chunks[6],
    );
}
