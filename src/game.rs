use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::audio::{CuePlayer, SilentCuePlayer};
use crate::catalog::Catalog;
use crate::config::{GameConfig, GameMode};
use crate::error::GameError;
use crate::history::HistoryStore;
use crate::round::{Picker, RandomPicker};
use crate::turn::{Turn, TurnResult};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn flip(self) -> Self {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

/// A finished turn as it appears on the leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub team: Option<Team>,
    pub score: u32,
    pub skipped: u32,
    pub total: u32,
    pub accuracy: u32,
}

impl Player {
    pub fn from_result(name: impl Into<String>, team: Option<Team>, result: &TurnResult) -> Self {
        Self {
            name: name.into(),
            team,
            score: result.score,
            skipped: result.skipped,
            total: result.total,
            accuracy: result.accuracy(),
        }
    }
}

#[derive(Debug)]
pub enum PlayState {
    Active(Box<Turn>),
    /// Selected categories produced no titles; the clock never starts
    NoMovies,
}

/// The four screens and the data each one needs
#[derive(Debug)]
pub enum GameScreen {
    Setup,
    PlayerEntry,
    Playing(PlayState),
    Results(TurnResult),
}

impl GameScreen {
    pub fn name(&self) -> &'static str {
        match self {
            GameScreen::Setup => "setup",
            GameScreen::PlayerEntry => "player entry",
            GameScreen::Playing(_) => "playing",
            GameScreen::Results(_) => "results",
        }
    }
}

pub type PickerFactory = Box<dyn Fn() -> Box<dyn Picker>>;

/// Session-wide state: configuration, screen, players and the history mirror.
///
/// Transitions:
/// Setup → PlayerEntry → Playing → Results → PlayerEntry ..., and any → Setup
/// through [`GameSession::new_game`].
pub struct GameSession {
    catalog: Catalog,
    store: Box<dyn HistoryStore>,
    history: HashSet<String>,
    cues: Rc<dyn CuePlayer>,
    new_picker: PickerFactory,
    screen: GameScreen,
    config: Option<GameConfig>,
    players: Vec<Player>,
    current_team: Team,
    player_name: String,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("screen", &self.screen)
            .field("config", &self.config)
            .field("players", &self.players)
            .field("current_team", &self.current_team)
            .field("history", &self.history.len())
            .finish()
    }
}

impl GameSession {
    pub fn new(catalog: Catalog, store: Box<dyn HistoryStore>) -> Self {
        let history = store.load();
        tracing::info!(completed = history.len(), "loaded movie history");
        Self {
            catalog,
            store,
            history,
            cues: Rc::new(SilentCuePlayer),
            new_picker: Box::new(|| -> Box<dyn Picker> { Box::new(RandomPicker::new()) }),
            screen: GameScreen::Setup,
            config: None,
            players: Vec::new(),
            current_team: Team::A,
            player_name: String::new(),
        }
    }

    pub fn with_cues(mut self, cues: Rc<dyn CuePlayer>) -> Self {
        self.cues = cues;
        self
    }

    pub fn with_picker_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Picker> + 'static,
    {
        self.new_picker = Box::new(factory);
        self
    }

    /// Setup → PlayerEntry
    pub fn submit_config(&mut self, config: GameConfig) -> Result<(), GameError> {
        self.expect_screen(matches!(self.screen, GameScreen::Setup), "start a game")?;
        config.validate()?;
        tracing::info!(
            time_per_round = config.time_per_round,
            categories = ?config.categories,
            mode = %config.game_mode,
            "game configured"
        );
        self.config = Some(config);
        self.current_team = Team::A;
        self.screen = GameScreen::PlayerEntry;
        Ok(())
    }

    /// PlayerEntry → Playing
    pub fn submit_name(&mut self, name: &str) -> Result<(), GameError> {
        self.expect_screen(
            matches!(self.screen, GameScreen::PlayerEntry),
            "begin a turn",
        )?;
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }
        let config = self
            .config
            .as_ref()
            .ok_or(GameError::invalid_transition("player entry", "begin a turn"))?;

        self.player_name = name.to_string();
        let play = match Turn::start(
            &self.catalog,
            config,
            &self.history,
            (self.new_picker)(),
            Rc::clone(&self.cues),
        ) {
            Ok(turn) => PlayState::Active(Box::new(turn)),
            Err(err) => {
                tracing::warn!(error = %err, "turn could not start");
                PlayState::NoMovies
            }
        };
        tracing::info!(player = %self.player_name, team = ?self.team_for_turn(), "turn started");
        self.screen = GameScreen::Playing(play);
        Ok(())
    }

    /// Returns whether the action was counted
    pub fn got_it(&mut self) -> Result<bool, GameError> {
        Ok(self.active_turn("mark a title guessed")?.is_some_and(|t| t.got_it()))
    }

    /// Returns whether the action was counted
    pub fn skip(&mut self) -> Result<bool, GameError> {
        Ok(self.active_turn("skip a title")?.is_some_and(|t| t.skip()))
    }

    fn active_turn(&mut self, action: &'static str) -> Result<Option<&mut Turn>, GameError> {
        match &mut self.screen {
            GameScreen::Playing(PlayState::Active(turn)) => Ok(Some(turn.as_mut())),
            GameScreen::Playing(PlayState::NoMovies) => Ok(None),
            other => Err(GameError::invalid_transition(other.name(), action)),
        }
    }

    /// Drive the turn clock. Returns true when the turn ended and the session
    /// moved to Results.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let result = match &mut self.screen {
            GameScreen::Playing(PlayState::Active(turn)) => turn.advance(dt),
            _ => None,
        };
        match result {
            Some(result) => {
                self.finish_turn(result);
                true
            }
            None => false,
        }
    }

    /// Playing → Results, with the bookkeeping every finished turn needs
    fn finish_turn(&mut self, result: TurnResult) {
        let player = Player::from_result(self.player_name.clone(), self.team_for_turn(), &result);
        tracing::info!(
            player = %player.name,
            score = player.score,
            skipped = player.skipped,
            accuracy = player.accuracy,
            "turn recorded"
        );
        self.players.push(player);

        if let Err(err) = self.store.add_all(&result.completed_titles) {
            tracing::warn!(error = %err, "could not persist completed movies");
        }
        self.history
            .extend(result.completed_titles.iter().cloned());
        self.screen = GameScreen::Results(result);
    }

    /// Results → PlayerEntry
    pub fn next_player(&mut self) -> Result<(), GameError> {
        self.expect_screen(
            matches!(self.screen, GameScreen::Results(_)),
            "move to the next player",
        )?;
        self.player_name.clear();
        if self.game_mode() == Some(GameMode::Team) {
            self.current_team = self.current_team.flip();
        }
        self.screen = GameScreen::PlayerEntry;
        Ok(())
    }

    /// Any → Setup. Drops the active turn, the players and the configuration.
    pub fn new_game(&mut self) {
        tracing::info!(players = self.players.len(), from = self.screen.name(), "new game");
        self.players.clear();
        self.player_name.clear();
        self.config = None;
        self.current_team = Team::A;
        self.screen = GameScreen::Setup;
    }

    /// Forget every remembered title (setup screen only)
    pub fn clear_history(&mut self) -> Result<(), GameError> {
        self.expect_screen(
            matches!(self.screen, GameScreen::Setup),
            "clear the movie history",
        )?;
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "could not clear persisted history");
        }
        self.history.clear();
        tracing::info!("movie history cleared");
        Ok(())
    }

    fn expect_screen(&self, ok: bool, action: &'static str) -> Result<(), GameError> {
        if ok {
            Ok(())
        } else {
            Err(GameError::invalid_transition(self.screen.name(), action))
        }
    }

    fn team_for_turn(&self) -> Option<Team> {
        match self.game_mode() {
            Some(GameMode::Team) => Some(self.current_team),
            _ => None,
        }
    }

    pub fn screen(&self) -> &GameScreen {
        &self.screen
    }

    pub fn config(&self) -> Option<&GameConfig> {
        self.config.as_ref()
    }

    pub fn game_mode(&self) -> Option<GameMode> {
        self.config.as_ref().map(|c| c.game_mode)
    }

    /// Team whose turn it is, in team mode only
    pub fn current_team(&self) -> Option<Team> {
        self.team_for_turn()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn history(&self) -> &HashSet<String> {
        &self.history
    }

    pub fn completed_count(&self) -> usize {
        self.history.len()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MovieCategory;
    use crate::history::MemoryHistoryStore;
    use crate::round::ScriptedPicker;
    use assert_matches::assert_matches;

    fn session() -> GameSession {
        GameSession::new(Catalog::builtin(), Box::new(MemoryHistoryStore::new()))
            .with_picker_factory(|| Box::new(ScriptedPicker::first()))
    }

    fn team_config(secs: u32) -> GameConfig {
        GameConfig {
            time_per_round: secs,
            categories: vec![MovieCategory::Bollywood, MovieCategory::Hollywood],
            game_mode: GameMode::Team,
        }
    }

    fn play_turn(session: &mut GameSession, name: &str, guesses: u32, skips: u32) {
        session.submit_name(name).unwrap();
        for _ in 0..guesses {
            assert!(session.got_it().unwrap());
        }
        for _ in 0..skips {
            assert!(session.skip().unwrap());
        }
        let secs = session.config().unwrap().time_per_round;
        for _ in 0..secs {
            assert!(!session.advance(Duration::from_secs(1)));
        }
        assert!(session.advance(Duration::from_millis(600)));
    }

    #[test]
    fn starts_on_setup() {
        let s = session();
        assert_matches!(s.screen(), GameScreen::Setup);
        assert!(s.config().is_none());
        assert!(s.players().is_empty());
    }

    #[test]
    fn rejects_config_without_categories() {
        let mut s = session();
        let cfg = GameConfig {
            categories: vec![],
            ..team_config(60)
        };
        assert_matches!(s.submit_config(cfg), Err(GameError::NoCategories));
        assert_matches!(s.screen(), GameScreen::Setup);
        assert!(s.config().is_none());
    }

    #[test]
    fn rejects_blank_names() {
        let mut s = session();
        s.submit_config(team_config(60)).unwrap();
        assert_matches!(s.submit_name("   "), Err(GameError::EmptyName));
        assert_matches!(s.screen(), GameScreen::PlayerEntry);
    }

    #[test]
    fn trims_player_names() {
        let mut s = session();
        s.submit_config(team_config(60)).unwrap();
        s.submit_name("  Priya ").unwrap();
        assert_eq!(s.player_name(), "Priya");
        assert_matches!(s.screen(), GameScreen::Playing(PlayState::Active(_)));
    }

    #[test]
    fn actions_outside_playing_are_invalid() {
        let mut s = session();
        assert_matches!(
            s.got_it(),
            Err(GameError::InvalidTransition { from: "setup", .. })
        );
        assert_matches!(s.next_player(), Err(GameError::InvalidTransition { .. }));
        assert_matches!(s.submit_name("x"), Err(GameError::InvalidTransition { .. }));
        assert!(!s.advance(Duration::from_secs(5)));
    }

    #[test]
    fn finished_turn_records_player_and_history() {
        let mut s = session();
        s.submit_config(team_config(20)).unwrap();
        play_turn(&mut s, "Asha", 3, 1);

        let result = match s.screen() {
            GameScreen::Results(r) => r.clone(),
            other => panic!("expected results, got {}", other.name()),
        };
        assert_eq!((result.score, result.skipped, result.total), (3, 1, 4));

        let player = &s.players()[0];
        assert_eq!(player.name, "Asha");
        assert_eq!(player.team, Some(Team::A));
        assert_eq!(player.accuracy, 75);
        assert_eq!(s.completed_count(), 3);
        assert_eq!(s.history(), &result.completed_titles);
    }

    #[test]
    fn history_is_persisted_through_the_store() {
        let store = Rc::new(MemoryHistoryStore::new());
        struct Shared(Rc<MemoryHistoryStore>);
        impl HistoryStore for Shared {
            fn load(&self) -> HashSet<String> {
                self.0.load()
            }
            fn add_all(&self, t: &HashSet<String>) -> Result<(), crate::error::HistoryError> {
                self.0.add_all(t)
            }
            fn clear(&self) -> Result<(), crate::error::HistoryError> {
                self.0.clear()
            }
        }

        let mut s = GameSession::new(Catalog::builtin(), Box::new(Shared(Rc::clone(&store))))
            .with_picker_factory(|| Box::new(ScriptedPicker::first()));
        s.submit_config(team_config(15)).unwrap();
        play_turn(&mut s, "Ravi", 2, 0);
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn next_turn_avoids_titles_guessed_earlier() {
        let mut s = session();
        s.submit_config(team_config(15)).unwrap();
        play_turn(&mut s, "Asha", 4, 0);
        let guessed = s.history().clone();

        s.next_player().unwrap();
        s.submit_name("Ben").unwrap();
        match s.screen() {
            GameScreen::Playing(PlayState::Active(turn)) => {
                assert!(!guessed.contains(turn.current_title()));
            }
            other => panic!("expected active turn, got {}", other.name()),
        }
    }

    #[test]
    fn teams_alternate_across_next_player() {
        let mut s = session();
        s.submit_config(team_config(11)).unwrap();
        let mut teams = vec![];
        for name in ["a", "b", "c", "d", "e"] {
            teams.push(s.current_team().unwrap());
            play_turn(&mut s, name, 1, 0);
            s.next_player().unwrap();
        }
        assert_eq!(teams, vec![Team::A, Team::B, Team::A, Team::B, Team::A]);
        let recorded: Vec<_> = s.players().iter().map(|p| p.team).collect();
        assert_eq!(
            recorded,
            vec![
                Some(Team::A),
                Some(Team::B),
                Some(Team::A),
                Some(Team::B),
                Some(Team::A)
            ]
        );
    }

    #[test]
    fn individual_mode_has_no_teams() {
        let mut s = session();
        s.submit_config(GameConfig {
            game_mode: GameMode::Individual,
            ..team_config(11)
        })
        .unwrap();
        assert_eq!(s.current_team(), None);
        play_turn(&mut s, "Solo", 0, 0);
        s.next_player().unwrap();
        assert_eq!(s.players()[0].team, None);
        assert_eq!(s.players()[0].accuracy, 0);
        assert_eq!(s.current_team(), None);
    }

    #[test]
    fn next_player_clears_name() {
        let mut s = session();
        s.submit_config(team_config(11)).unwrap();
        play_turn(&mut s, "Asha", 1, 0);
        s.next_player().unwrap();
        assert_eq!(s.player_name(), "");
        assert_matches!(s.screen(), GameScreen::PlayerEntry);
    }

    #[test]
    fn new_game_resets_everything_but_history() {
        let mut s = session();
        s.submit_config(team_config(11)).unwrap();
        play_turn(&mut s, "Asha", 2, 0);
        s.next_player().unwrap();
        s.submit_name("Ben").unwrap();

        s.new_game();
        assert_matches!(s.screen(), GameScreen::Setup);
        assert!(s.players().is_empty());
        assert!(s.config().is_none());
        assert_eq!(s.player_name(), "");
        assert_eq!(s.completed_count(), 2);

        s.submit_config(team_config(11)).unwrap();
        assert_eq!(s.current_team(), Some(Team::A));
    }

    #[test]
    fn clear_history_only_from_setup() {
        let mut s = GameSession::new(
            Catalog::builtin(),
            Box::new(MemoryHistoryStore::with_titles(["Sholay", "Up"])),
        );
        assert_eq!(s.completed_count(), 2);
        s.submit_config(team_config(11)).unwrap();
        assert_matches!(s.clear_history(), Err(GameError::InvalidTransition { .. }));
        s.new_game();
        s.clear_history().unwrap();
        assert_eq!(s.completed_count(), 0);
    }

    #[test]
    fn empty_pool_shows_no_movies_and_never_ends() {
        let catalog = Catalog::from_entries([(MovieCategory::Korean, Vec::<String>::new())]);
        let mut s = GameSession::new(catalog, Box::new(MemoryHistoryStore::new()));
        s.submit_config(GameConfig {
            time_per_round: 1,
            categories: vec![MovieCategory::Korean],
            game_mode: GameMode::Individual,
        })
        .unwrap();
        s.submit_name("Kim").unwrap();
        assert_matches!(s.screen(), GameScreen::Playing(PlayState::NoMovies));
        assert_eq!(s.got_it(), Ok(false));
        assert!(!s.advance(Duration::from_secs(60)));
        assert_matches!(s.screen(), GameScreen::Playing(PlayState::NoMovies));
    }
}
