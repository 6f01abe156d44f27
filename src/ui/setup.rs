use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use charades::{
    catalog::MovieCategory,
    config::{GameMode, TIME_OPTIONS},
    util::{format_minutes, pluralize},
};

use crate::{
    ui::{legend, HORIZONTAL_MARGIN, VERTICAL_MARGIN},
    App,
};

const INSTRUCTIONS: &str = "Pick the categories and the time per turn, then press enter. \
Each player gets a name and a turn: hand them the screen, let them act out the movie \
title without speaking, and press space when their team guesses it or s to skip. \
Ten seconds before the end the clock turns red and a warning sounds. \
Guessed movies are remembered and will not come up again until the history is cleared. \
In team mode turns alternate between Team A and Team B.";

const LEGEND: &str = "(1-8) category / (m)ode / (t)ime / (?) help / (enter) continue / (q)uit";

pub fn render_setup(app: &App, f: &mut Frame) {
    let draft = &app.setup.draft;

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let selected_style = Style::default().patch(bold_style).fg(Color::Yellow);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2),  // title
            Constraint::Length(2),  // mode
            Constraint::Length(2),  // time
            Constraint::Length(10), // categories
            Constraint::Length(2),  // history
            Constraint::Length(1),  // message
            Constraint::Min(0),     // instructions
            Constraint::Length(1),  // legend
        ])
        .split(f.area());

    let title = Paragraph::new(Span::styled(
        "Dumb Charades: Movie Edition",
        bold_style.fg(Color::Magenta),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let mode_span = |mode: GameMode, label: &'static str| {
        Span::styled(
            label,
            if draft.game_mode == mode {
                selected_style
            } else {
                dim_style
            },
        )
    };
    let mode_line = Line::from(vec![
        Span::styled("(m) Mode: ", bold_style),
        mode_span(GameMode::Team, "Team Mode"),
        Span::raw("  "),
        mode_span(GameMode::Individual, "Individual Mode"),
    ]);
    f.render_widget(Paragraph::new(mode_line), chunks[1]);

    let mut time_spans = vec![Span::styled("(t) Time per turn: ", bold_style)];
    for secs in TIME_OPTIONS {
        time_spans.push(Span::styled(
            format_minutes(secs),
            if draft.time_per_round == secs {
                selected_style
            } else {
                dim_style
            },
        ));
        time_spans.push(Span::raw("  "));
    }
    if !TIME_OPTIONS.contains(&draft.time_per_round) {
        time_spans.push(Span::styled(
            format!("{}s", draft.time_per_round),
            selected_style,
        ));
    }
    f.render_widget(Paragraph::new(Line::from(time_spans)), chunks[2]);

    let category_lines: Vec<Line> = MovieCategory::ALL
        .iter()
        .enumerate()
        .map(|(idx, category)| {
            let checked = draft.has_category(*category);
            Line::from(vec![
                Span::styled(format!("({}) ", idx + 1), dim_style),
                Span::styled(
                    format!("[{}] {}", if checked { "x" } else { " " }, category.label()),
                    if checked { selected_style } else { Style::default() },
                ),
            ])
        })
        .collect();
    let categories = Paragraph::new(category_lines).block(
        Block::default().borders(Borders::ALL).title(format!(
            "Categories ({} selected)",
            draft.categories.len()
        )),
    );
    f.render_widget(categories, chunks[3]);

    let completed = app.session.completed_count();
    let history_line = if completed > 0 {
        Line::from(vec![
            Span::raw(format!(
                "{} completed across all games  ",
                pluralize(completed, "movie", "movies")
            )),
            Span::styled("(c) clear history", dim_style),
        ])
    } else {
        Line::from(Span::styled("No movies completed yet", dim_style))
    };
    f.render_widget(Paragraph::new(history_line), chunks[4]);

    if let Some(message) = &app.setup.message {
        let msg = Paragraph::new(Span::styled(message.as_str(), bold_style.fg(Color::Red)));
        f.render_widget(msg, chunks[5]);
    }

    if app.setup.show_instructions {
        let help = Paragraph::new(INSTRUCTIONS)
            .block(Block::default().borders(Borders::ALL).title("How to Play"))
            .wrap(Wrap { trim: true });
        f.render_widget(help, chunks[6]);
    }

    f.render_widget(legend(LEGEND), chunks[7]);
}
