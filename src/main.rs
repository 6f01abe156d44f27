pub mod ui;

use charades::{
    app_dirs::AppDirs,
    audio::{BellCuePlayer, CommandCuePlayer, CuePlayer, SilentCuePlayer},
    catalog::{Catalog, MovieCategory},
    config::{FileSettingsStore, GameConfig, GameMode, SettingsStore},
    game::{GameScreen, GameSession},
    history, logging,
    runtime::{self, GameEvent, Runner},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    rc::Rc,
    time::Duration,
};

/// pass-the-terminal dumb charades
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Dumb charades for one shared terminal: act out movie titles against the clock, swap players between turns, and track individual or team scores. Titles guessed correctly are remembered and kept out of later rounds."
)]
pub struct Cli {
    /// seconds per turn (defaults to the last game's setting)
    #[clap(short = 't', long, value_parser = clap::value_parser!(u32).range(1..))]
    time: Option<u32>,

    /// movie category to play with; repeat for several
    #[clap(short = 'c', long = "category", value_enum)]
    categories: Vec<MovieCategory>,

    /// play as individuals or alternate between two teams
    #[clap(short = 'm', long, value_enum)]
    mode: Option<GameMode>,

    /// disable the warning and time-up sound cues
    #[clap(long)]
    mute: bool,

    /// external program used to play sound files (e.g. paplay, afplay); falls back to the terminal bell
    #[clap(long, requires_all = ["warning_sound", "finish_sound"])]
    sound_command: Option<String>,

    /// sound file played with ten seconds left
    #[clap(long)]
    warning_sound: Option<PathBuf>,

    /// sound file played when time is up
    #[clap(long)]
    finish_sound: Option<PathBuf>,

    /// file used to remember correctly guessed movies across games
    #[clap(long)]
    history_file: Option<PathBuf>,
}

impl Cli {
    /// Setup screen defaults: saved settings with command line overrides
    fn setup_defaults(&self, saved: GameConfig) -> GameConfig {
        let mut cfg = saved;
        if let Some(time) = self.time {
            cfg.time_per_round = time;
        }
        if !self.categories.is_empty() {
            cfg.categories.clear();
            for category in &self.categories {
                if !cfg.categories.contains(category) {
                    cfg.categories.push(*category);
                }
            }
        }
        if let Some(mode) = self.mode {
            cfg.game_mode = mode;
        }
        cfg
    }

    fn cue_player(&self) -> Rc<dyn CuePlayer> {
        if self.mute {
            return Rc::new(SilentCuePlayer);
        }
        match (&self.sound_command, &self.warning_sound, &self.finish_sound) {
            (Some(program), Some(warning), Some(finish)) => Rc::new(CommandCuePlayer::new(
                program.clone(),
                warning.clone(),
                finish.clone(),
            )),
            _ => Rc::new(BellCuePlayer),
        }
    }
}

/// Which screen the UI shows, derived from the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Setup,
    PlayerEntry,
    Playing,
    Results,
}

impl From<&GameScreen> for AppState {
    fn from(screen: &GameScreen) -> Self {
        match screen {
            GameScreen::Setup => AppState::Setup,
            GameScreen::PlayerEntry => AppState::PlayerEntry,
            GameScreen::Playing(_) => AppState::Playing,
            GameScreen::Results(_) => AppState::Results,
        }
    }
}

/// Destructive actions that need a yes before they happen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    ClearHistory,
    NewGame,
}

#[derive(Debug)]
pub struct SetupForm {
    pub draft: GameConfig,
    pub message: Option<String>,
    pub show_instructions: bool,
}

impl SetupForm {
    fn new(draft: GameConfig) -> Self {
        Self {
            draft,
            message: None,
            show_instructions: false,
        }
    }
}

pub struct App {
    pub session: GameSession,
    pub setup: SetupForm,
    pub name_input: String,
    pub confirm: Option<Confirm>,
    pub should_quit: bool,
    settings: Box<dyn SettingsStore>,
}

impl App {
    pub fn new(session: GameSession, defaults: GameConfig, settings: Box<dyn SettingsStore>) -> Self {
        Self {
            session,
            setup: SetupForm::new(defaults),
            name_input: String::new(),
            confirm: None,
            should_quit: false,
            settings,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::from(self.session.screen())
    }

    pub fn on_tick(&mut self, dt: Duration) {
        if self.session.advance(dt) {
            self.name_input.clear();
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if let Some(pending) = self.confirm.take() {
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                self.apply_confirmed(pending);
            }
            return;
        }

        match self.state() {
            AppState::Setup => self.on_setup_key(key),
            AppState::PlayerEntry => self.on_player_entry_key(key),
            AppState::Playing => self.on_playing_key(key),
            AppState::Results => self.on_results_key(key),
        }
    }

    fn apply_confirmed(&mut self, confirmed: Confirm) {
        match confirmed {
            Confirm::ClearHistory => {
                if let Err(err) = self.session.clear_history() {
                    self.setup.message = Some(err.to_string());
                }
            }
            Confirm::NewGame => {
                self.session.new_game();
                self.name_input.clear();
                self.setup = SetupForm::new(self.settings.load());
            }
        }
    }

    fn on_setup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Enter => self.submit_setup(),
            KeyCode::Char('m') => {
                self.setup.draft.game_mode = self.setup.draft.game_mode.toggled();
            }
            KeyCode::Char('t') => self.setup.draft.cycle_time(),
            KeyCode::Char('c') => {
                if self.session.completed_count() > 0 {
                    self.confirm = Some(Confirm::ClearHistory);
                }
            }
            KeyCode::Char('?') => {
                self.setup.show_instructions = !self.setup.show_instructions;
            }
            KeyCode::Char(c) => {
                if let Some(category) = MovieCategory::from_hotkey(c) {
                    self.setup.draft.toggle_category(category);
                    self.setup.message = None;
                }
            }
            _ => {}
        }
    }

    fn submit_setup(&mut self) {
        let draft = self.setup.draft.clone();
        match self.session.submit_config(draft.clone()) {
            Ok(()) => {
                self.setup.message = None;
                self.name_input.clear();
                if let Err(err) = self.settings.save(&draft) {
                    tracing::warn!(error = %err, "could not save settings");
                }
            }
            Err(err) => self.setup.message = Some(err.to_string()),
        }
    }

    fn on_player_entry_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.confirm = Some(Confirm::NewGame),
            KeyCode::Enter => {
                if !self.name_input.trim().is_empty() {
                    let name = self.name_input.clone();
                    if let Err(err) = self.session.submit_name(&name) {
                        tracing::warn!(error = %err, "could not begin turn");
                    }
                }
            }
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) => self.name_input.push(c),
            _ => {}
        }
    }

    fn on_playing_key(&mut self, key: KeyEvent) {
        let outcome = match key.code {
            KeyCode::Esc => {
                self.confirm = Some(Confirm::NewGame);
                return;
            }
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('g') => self.session.got_it(),
            KeyCode::Char('s') | KeyCode::Right => self.session.skip(),
            _ => return,
        };
        if let Err(err) = outcome {
            tracing::debug!(error = %err, "ignored playing key");
        }
    }

    fn on_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('n') | KeyCode::Enter => {
                if self.session.next_player().is_ok() {
                    self.name_input.clear();
                }
            }
            KeyCode::Char('g') => self.confirm = Some(Confirm::NewGame),
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(log_path) = AppDirs::log_path() {
        logging::init_file_logging(&log_path);
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting charades");

    let settings = FileSettingsStore::new();
    let defaults = cli.setup_defaults(settings.load());
    let session = GameSession::new(
        Catalog::builtin(),
        history::open_store(cli.history_file.clone()),
    )
    .with_cues(cli.cue_player());
    let mut app = App::new(session, defaults, Box::new(settings));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::with_default_tick(runtime::terminal_events());

    terminal.draw(|f| ui::draw(app, f))?;

    while !app.should_quit {
        let event = runner.step();
        // time first, so a key pressed after the last second is rejected
        app.on_tick(runner.elapsed());
        match event {
            GameEvent::Key(key) => app.on_key(key),
            GameEvent::Resize | GameEvent::Tick => {}
        }
        terminal.draw(|f| ui::draw(app, f))?;
    }

    tracing::info!("quitting");
    Ok(())
}
