use std::time::Duration;

/// Seconds remaining at which the warning cue fires
pub const WARNING_AT_SECS: u32 = 10;

/// Pause between the finish cue and handing the turn result over
pub const GRACE: Duration = Duration::from_millis(600);

const SECOND: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSignal {
    /// Ten seconds left
    Warning,
    /// Time is up; actions are rejected from here on
    Finished,
    /// Grace delay after `Finished` has elapsed; the turn is over
    Expired,
}

/// Countdown for one turn. Each signal is latched and fires at most once.
#[derive(Debug, Clone)]
pub struct TurnClock {
    time_per_round: u32,
    remaining: u32,
    active: bool,
    started: bool,
    warning_emitted: bool,
    finished_emitted: bool,
    expired_emitted: bool,
    elapsed: Duration,
    grace_left: Duration,
}

impl TurnClock {
    pub fn new(time_per_round: u32) -> Self {
        Self {
            time_per_round,
            remaining: time_per_round,
            active: time_per_round > 0,
            started: false,
            warning_emitted: false,
            finished_emitted: false,
            expired_emitted: false,
            elapsed: Duration::ZERO,
            grace_left: GRACE,
        }
    }

    /// The turn begins. A round exactly `WARNING_AT_SECS` long warns here,
    /// since no tick will ever land on that value. Later calls do nothing.
    pub fn start(&mut self) -> Option<ClockSignal> {
        if self.started {
            return None;
        }
        self.started = true;
        self.check_warning()
    }

    fn check_warning(&mut self) -> Option<ClockSignal> {
        if self.active && !self.warning_emitted && self.remaining == WARNING_AT_SECS {
            self.warning_emitted = true;
            return Some(ClockSignal::Warning);
        }
        None
    }

    /// One real second has passed
    pub fn tick(&mut self) -> Option<ClockSignal> {
        self.started = true;
        if !self.active {
            return self.finish();
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            return self.finish();
        }

        self.check_warning()
    }

    fn finish(&mut self) -> Option<ClockSignal> {
        self.active = false;
        if self.finished_emitted {
            return None;
        }
        self.finished_emitted = true;
        Some(ClockSignal::Finished)
    }

    /// Feed wall-clock time. Whole seconds become ticks; once finished the
    /// grace delay runs down and `Expired` is emitted.
    pub fn advance(&mut self, dt: Duration) -> Vec<ClockSignal> {
        let mut signals = Vec::new();
        if self.expired_emitted {
            return signals;
        }

        signals.extend(self.start());

        let mut budget = dt;
        if !self.finished_emitted {
            self.elapsed += budget;
            budget = Duration::ZERO;
            while self.elapsed >= SECOND && !self.finished_emitted {
                self.elapsed -= SECOND;
                signals.extend(self.tick());
            }
            if self.finished_emitted {
                // time left over in this step counts towards the grace delay
                budget = std::mem::take(&mut self.elapsed);
            }
        }

        if self.finished_emitted {
            self.grace_left = self.grace_left.saturating_sub(budget);
            if self.grace_left.is_zero() {
                self.expired_emitted = true;
                signals.push(ClockSignal::Expired);
            }
        }
        signals
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn time_per_round(&self) -> u32 {
        self.time_per_round
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    pub fn is_expired(&self) -> bool {
        self.expired_emitted
    }

    /// Fraction of the round already used, 0.0..=1.0
    pub fn progress(&self) -> f64 {
        if self.time_per_round == 0 {
            return 1.0;
        }
        (self.time_per_round - self.remaining) as f64 / self.time_per_round as f64
    }
}
