use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// UI redraw period; the turn clock turns elapsed wall time into seconds
pub const TICK_RATE_MS: u64 = 100;

#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    /// Nothing arrived within one tick interval
    Tick,
}

/// Where the game loop gets its input from
pub trait GameEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Events delivered over a channel. The terminal reader thread feeds one in
/// production; tests push scripted key presses into their own.
pub struct ChannelEventSource {
    rx: Receiver<GameEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl GameEventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Map a raw terminal event to what the game reacts to. Key releases (reported
/// on Windows) are dropped so one press never counts as two "Got It"s.
pub fn translate(ev: CtEvent) -> Option<GameEvent> {
    match ev {
        CtEvent::Key(key) if key.kind != KeyEventKind::Release => Some(GameEvent::Key(key)),
        CtEvent::Resize(_, _) => Some(GameEvent::Resize),
        _ => None,
    }
}

/// Spawn the blocking crossterm reader. It stops when the terminal errors or
/// the game loop drops its end of the channel.
pub fn terminal_events() -> ChannelEventSource {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || loop {
        let ev = match event::read() {
            Ok(ev) => ev,
            Err(_) => break,
        };
        if let Some(game_event) = translate(ev) {
            if tx.send(game_event).is_err() {
                break;
            }
        }
    });
    ChannelEventSource::new(rx)
}

/// Pulls one event per loop iteration and measures the wall time between
/// iterations for the turn clock.
pub struct Runner<E: GameEventSource> {
    source: E,
    tick: Duration,
    last_step: Instant,
}

impl<E: GameEventSource> Runner<E> {
    pub fn new(source: E, tick: Duration) -> Self {
        Self {
            source,
            tick,
            last_step: Instant::now(),
        }
    }

    pub fn with_default_tick(source: E) -> Self {
        Self::new(source, Duration::from_millis(TICK_RATE_MS))
    }

    /// Next input, or `Tick` after one interval of silence. A closed source
    /// also yields `Tick` so a running turn still times out.
    pub fn step(&self) -> GameEvent {
        match self.source.recv_timeout(self.tick) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => GameEvent::Tick,
        }
    }

    /// Wall time since the previous call. Keys arriving faster than the tick
    /// interval therefore never stall the clock.
    pub fn elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last_step);
        self.last_step = now;
        dt
    }

    pub fn interval(&self) -> Duration {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn space(kind: KeyEventKind) -> CtEvent {
        CtEvent::Key(KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn key_release_is_not_a_second_press() {
        assert!(matches!(
            translate(space(KeyEventKind::Press)),
            Some(GameEvent::Key(k)) if k.code == KeyCode::Char(' ')
        ));
        assert!(translate(space(KeyEventKind::Repeat)).is_some());
        assert!(translate(space(KeyEventKind::Release)).is_none());
    }

    #[test]
    fn resize_passes_and_focus_is_ignored() {
        assert!(matches!(
            translate(CtEvent::Resize(80, 24)),
            Some(GameEvent::Resize)
        ));
        assert!(translate(CtEvent::FocusLost).is_none());
    }

    #[test]
    fn queued_skip_arrives_before_any_tick() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Key(KeyEvent::new(
            KeyCode::Char('s'),
            KeyModifiers::NONE,
        )))
        .unwrap();
        let runner = Runner::new(ChannelEventSource::new(rx), Duration::from_millis(50));

        assert!(matches!(
            runner.step(),
            GameEvent::Key(k) if k.code == KeyCode::Char('s')
        ));
        assert!(matches!(runner.step(), GameEvent::Tick));
    }

    #[test]
    fn closed_source_keeps_the_clock_ticking() {
        let (tx, rx) = mpsc::channel::<GameEvent>();
        drop(tx);
        let runner = Runner::with_default_tick(ChannelEventSource::new(rx));
        for _ in 0..3 {
            assert!(matches!(runner.step(), GameEvent::Tick));
        }
        assert_eq!(runner.interval(), Duration::from_millis(TICK_RATE_MS));
    }

    #[test]
    fn elapsed_covers_time_spent_waiting() {
        let (_tx, rx) = mpsc::channel();
        let mut runner = Runner::new(ChannelEventSource::new(rx), Duration::from_millis(20));
        runner.elapsed();
        runner.step();
        assert!(runner.elapsed() >= Duration::from_millis(20));
    }
}
