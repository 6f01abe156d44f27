use std::collections::HashSet;

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::catalog::{Catalog, MovieCategory};
use crate::error::GameError;

/// Source of uniform indices for title selection
pub trait Picker {
    /// Index in `0..len`; callers never pass `len == 0`
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform random picks backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RandomPicker<R = ThreadRng> {
    rng: R,
}

impl RandomPicker<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomPicker<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPicker<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> Picker for RandomPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed index script (each index taken modulo the pool size),
/// repeating the script once it runs out
#[derive(Debug, Clone)]
pub struct ScriptedPicker {
    script: Vec<usize>,
    pos: usize,
}

impl ScriptedPicker {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, pos: 0 }
    }

    /// Always the first candidate
    pub fn first() -> Self {
        Self::new(vec![0])
    }
}

impl Picker for ScriptedPicker {
    fn pick(&mut self, len: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let idx = self.script[self.pos % self.script.len()];
        self.pos += 1;
        idx % len
    }
}

/// Title selection for a single turn.
///
/// Picks prefer titles that are neither in the global history nor already
/// shown this turn. When those run out it falls back to anything outside the
/// history, then to the whole pool, avoiding the title on screen whenever
/// another candidate exists.
pub struct RoundEngine {
    available: Vec<String>,
    history: HashSet<String>,
    shown_this_turn: HashSet<String>,
    completed: HashSet<String>,
    current: String,
    score: u32,
    skipped: u32,
    picker: Box<dyn Picker>,
}

impl std::fmt::Debug for RoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundEngine")
            .field("available", &self.available.len())
            .field("shown_this_turn", &self.shown_this_turn.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("skipped", &self.skipped)
            .finish()
    }
}

impl RoundEngine {
    pub fn start(
        catalog: &Catalog,
        categories: &[MovieCategory],
        history: &HashSet<String>,
        mut picker: Box<dyn Picker>,
    ) -> Result<Self, GameError> {
        let available = catalog.titles_for(categories);
        if available.is_empty() {
            return Err(GameError::NoMovies);
        }

        let unseen: Vec<&String> = available.iter().filter(|t| !history.contains(*t)).collect();
        let first = if unseen.is_empty() {
            available[picker.pick(available.len())].clone()
        } else {
            unseen[picker.pick(unseen.len())].clone()
        };

        tracing::debug!(
            pool = available.len(),
            unseen = unseen.len(),
            "round engine started"
        );

        Ok(Self {
            shown_this_turn: HashSet::from([first.clone()]),
            current: first,
            available,
            history: history.clone(),
            completed: HashSet::new(),
            score: 0,
            skipped: 0,
            picker,
        })
    }

    /// Advance to the next title
    pub fn next(&mut self) -> &str {
        let fresh: Vec<&String> = self
            .available
            .iter()
            .filter(|t| !self.history.contains(*t) && !self.shown_this_turn.contains(*t))
            .collect();

        let picked = if !fresh.is_empty() {
            fresh[self.picker.pick(fresh.len())].clone()
        } else {
            let mut pool: Vec<&String> = self
                .available
                .iter()
                .filter(|t| !self.history.contains(*t))
                .collect();
            if pool.is_empty() {
                pool = self.available.iter().collect();
            }
            if pool.iter().any(|t| **t != self.current) {
                pool.retain(|t| **t != self.current);
            }
            pool[self.picker.pick(pool.len())].clone()
        };

        self.shown_this_turn.insert(picked.clone());
        self.current = picked;
        &self.current
    }

    /// Current title was guessed
    pub fn got_it(&mut self) -> &str {
        self.score += 1;
        self.completed.insert(self.current.clone());
        self.next()
    }

    pub fn skip(&mut self) -> &str {
        self.skipped += 1;
        self.next()
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn shown_this_turn(&self) -> &HashSet<String> {
        &self.shown_this_turn
    }

    pub fn completed(&self) -> &HashSet<String> {
        &self.completed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    pub fn into_completed(self) -> HashSet<String> {
        self.completed
    }
}
