use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use crate::audio::{play_cue, Cue, CuePlayer};
use crate::catalog::Catalog;
use crate::clock::{ClockSignal, TurnClock};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::round::{Picker, RoundEngine};
use crate::util::accuracy;

/// Outcome of a finished turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    pub score: u32,
    pub skipped: u32,
    pub total: u32,
    pub completed_titles: HashSet<String>,
}

impl TurnResult {
    pub fn new(score: u32, skipped: u32, completed_titles: HashSet<String>) -> Self {
        Self {
            score,
            skipped,
            total: score + skipped,
            completed_titles,
        }
    }

    pub fn accuracy(&self) -> u32 {
        accuracy(self.score, self.total)
    }
}

/// One player's timed turn: the title sequence plus its countdown
pub struct Turn {
    engine: RoundEngine,
    clock: TurnClock,
    cues: Rc<dyn CuePlayer>,
    snapshot: Option<TurnResult>,
}

impl std::fmt::Debug for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Turn")
            .field("engine", &self.engine)
            .field("clock", &self.clock)
            .field("snapshot", &self.snapshot)
            .finish()
    }
}

impl Turn {
    pub fn start(
        catalog: &Catalog,
        config: &GameConfig,
        history: &HashSet<String>,
        picker: Box<dyn Picker>,
        cues: Rc<dyn CuePlayer>,
    ) -> Result<Self, GameError> {
        let engine = RoundEngine::start(catalog, &config.categories, history, picker)?;
        let mut turn = Self {
            engine,
            clock: TurnClock::new(config.time_per_round),
            cues,
            snapshot: None,
        };
        if let Some(signal) = turn.clock.start() {
            turn.on_signal(signal);
        }
        Ok(turn)
    }

    /// Count the current title as guessed. Rejected once time is up.
    pub fn got_it(&mut self) -> bool {
        if self.clock.is_finished() {
            return false;
        }
        self.engine.got_it();
        true
    }

    /// Rejected once time is up.
    pub fn skip(&mut self) -> bool {
        if self.clock.is_finished() {
            return false;
        }
        self.engine.skip();
        true
    }

    /// Feed elapsed time. Returns the result exactly once, after the finish
    /// cue's grace delay; the counts are those at the finishing tick.
    pub fn advance(&mut self, dt: Duration) -> Option<TurnResult> {
        let mut result = None;
        for signal in self.clock.advance(dt) {
            if let Some(done) = self.on_signal(signal) {
                result = Some(done);
            }
        }
        result
    }

    fn on_signal(&mut self, signal: ClockSignal) -> Option<TurnResult> {
        match signal {
            ClockSignal::Warning => play_cue(self.cues.as_ref(), Cue::Warning),
            ClockSignal::Finished => {
                play_cue(self.cues.as_ref(), Cue::Finish);
                self.snapshot = Some(self.result_so_far());
                tracing::info!(
                    score = self.engine.score(),
                    skipped = self.engine.skipped(),
                    "turn finished"
                );
            }
            ClockSignal::Expired => return self.snapshot.take(),
        }
        None
    }

    fn result_so_far(&self) -> TurnResult {
        TurnResult::new(
            self.engine.score(),
            self.engine.skipped(),
            self.engine.completed().clone(),
        )
    }

    pub fn current_title(&self) -> &str {
        self.engine.current()
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn skipped(&self) -> u32 {
        self.engine.skipped()
    }

    pub fn remaining(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    pub fn clock(&self) -> &TurnClock {
        &self.clock
    }

    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }
}
