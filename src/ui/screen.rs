use ratatui::Frame;

use crate::{
    ui::{
        player_entry::render_player_entry, playing::render_playing, results::render_results,
        setup::render_setup,
    },
    App, AppState,
};

/// A UI Screen boundary; key handling stays on `App`
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

pub struct SetupScreen;

impl Screen for SetupScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_setup(app, f);
    }
}

pub struct PlayerEntryScreen;

impl Screen for PlayerEntryScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_player_entry(app, f);
    }
}

pub struct PlayingScreen;

impl Screen for PlayingScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_playing(app, f);
    }
}

pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_results(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Setup => Box::new(SetupScreen),
        AppState::PlayerEntry => Box::new(PlayerEntryScreen),
        AppState::Playing => Box::new(PlayingScreen),
        AppState::Results => Box::new(ResultsScreen),
    }
}
