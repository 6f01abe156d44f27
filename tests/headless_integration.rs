use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

use assert_matches::assert_matches;
use charades::{
    audio::{Cue, RecordingCuePlayer},
    catalog::{Catalog, MovieCategory},
    config::{GameConfig, GameMode},
    game::{GameScreen, GameSession, PlayState, Team},
    history::MemoryHistoryStore,
    round::ScriptedPicker,
    runtime::{ChannelEventSource, GameEvent, Runner},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key(c: char) -> GameEvent {
    GameEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn config(secs: u32, mode: GameMode) -> GameConfig {
    GameConfig {
        time_per_round: secs,
        categories: vec![MovieCategory::Bollywood, MovieCategory::Hollywood],
        game_mode: mode,
    }
}

// Each Tick stands for one second of game time so the test never sleeps
// for a whole turn.
fn drive_turn(session: &mut GameSession, events: Vec<GameEvent>) {
    let (tx, rx) = mpsc::channel();
    for ev in events {
        tx.send(ev).unwrap();
    }
    drop(tx);

    let runner = Runner::new(ChannelEventSource::new(rx), Duration::from_millis(1));

    for _ in 0..1000u32 {
        let ended = match runner.step() {
            GameEvent::Tick => session.advance(Duration::from_secs(1)),
            GameEvent::Resize => false,
            GameEvent::Key(k) => {
                match k.code {
                    KeyCode::Char(' ') => {
                        session.got_it().unwrap();
                    }
                    KeyCode::Char('s') => {
                        session.skip().unwrap();
                    }
                    _ => {}
                }
                false
            }
        };
        if ended {
            return;
        }
    }
    panic!("turn never ended");
}

#[test]
fn headless_team_game_alternates_and_accumulates() {
    let cues = RecordingCuePlayer::new();
    let mut session = GameSession::new(Catalog::builtin(), Box::new(MemoryHistoryStore::new()))
        .with_cues(Rc::new(cues.clone()))
        .with_picker_factory(|| Box::new(ScriptedPicker::first()));

    session.submit_config(config(12, GameMode::Team)).unwrap();

    session.submit_name("Asha").unwrap();
    drive_turn(&mut session, vec![key(' '), key(' '), key('s'), key(' ')]);
    assert_matches!(session.screen(), GameScreen::Results(r) if r.score == 3 && r.skipped == 1);
    assert_eq!(cues.played(), vec![Cue::Warning, Cue::Finish]);

    session.next_player().unwrap();
    assert_eq!(session.current_team(), Some(Team::B));
    session.submit_name("Ben").unwrap();
    drive_turn(&mut session, vec![key('s'), key(' ')]);

    let players = session.players();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].team, Some(Team::A));
    assert_eq!(players[1].team, Some(Team::B));
    assert_eq!(players[1].accuracy, 50);
    assert_eq!(session.completed_count(), 4);
}

#[test]
fn headless_guessed_titles_do_not_return_next_turn() {
    let mut session = GameSession::new(Catalog::builtin(), Box::new(MemoryHistoryStore::new()))
        .with_picker_factory(|| Box::new(ScriptedPicker::first()));
    session.submit_config(config(11, GameMode::Individual)).unwrap();

    session.submit_name("One").unwrap();
    drive_turn(&mut session, vec![key(' '); 5]);
    let guessed = session.history().clone();
    assert_eq!(guessed.len(), 5);

    session.next_player().unwrap();
    session.submit_name("Two").unwrap();
    for _ in 0..20 {
        match session.screen() {
            GameScreen::Playing(PlayState::Active(turn)) => {
                assert!(!guessed.contains(turn.current_title()));
            }
            other => panic!("expected an active turn, got {}", other.name()),
        }
        session.skip().unwrap();
    }
}

#[test]
fn headless_keys_after_time_up_do_not_count() {
    let mut session = GameSession::new(Catalog::builtin(), Box::new(MemoryHistoryStore::new()))
        .with_picker_factory(|| Box::new(ScriptedPicker::first()));
    session.submit_config(config(3, GameMode::Individual)).unwrap();
    session.submit_name("Late").unwrap();

    for _ in 0..3 {
        assert!(!session.advance(Duration::from_secs(1)));
    }
    assert_eq!(session.got_it(), Ok(false));
    assert_eq!(session.skip(), Ok(false));
    assert!(session.advance(Duration::from_millis(600)));
    assert_matches!(session.screen(), GameScreen::Results(r) if r.total == 0);
    assert_eq!(session.players()[0].accuracy, 0);
}

#[test]
fn headless_new_game_mid_turn_keeps_history_only() {
    let mut session = GameSession::new(Catalog::builtin(), Box::new(MemoryHistoryStore::new()))
        .with_picker_factory(|| Box::new(ScriptedPicker::first()));
    session.submit_config(config(5, GameMode::Team)).unwrap();
    session.submit_name("A").unwrap();
    drive_turn(&mut session, vec![key(' ')]);
    session.next_player().unwrap();
    session.submit_name("B").unwrap();
    session.got_it().unwrap();

    session.new_game();
    assert_matches!(session.screen(), GameScreen::Setup);
    assert!(session.players().is_empty());
    // only finished turns reach the history
    assert_eq!(session.completed_count(), 1);
    assert!(!session.advance(Duration::from_secs(10)));
}
