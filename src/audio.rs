use std::cell::RefCell;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::rc::Rc;

use crate::error::AudioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Ten seconds left in the turn
    Warning,
    /// Time is up
    Finish,
}

/// Fire-and-forget sound playback
pub trait CuePlayer {
    fn play(&self, cue: Cue) -> Result<(), AudioError>;
}

/// Play a cue and swallow any failure; sound never gates the turn.
pub fn play_cue(player: &dyn CuePlayer, cue: Cue) {
    if let Err(err) = player.play(cue) {
        tracing::debug!(?cue, error = %err, "cue playback failed");
    }
}

/// Terminal bell: one ring for the warning, two for the finish
#[derive(Debug, Default, Clone, Copy)]
pub struct BellCuePlayer;

impl CuePlayer for BellCuePlayer {
    fn play(&self, cue: Cue) -> Result<(), AudioError> {
        let bells: &[u8] = match cue {
            Cue::Warning => b"\x07",
            Cue::Finish => b"\x07\x07",
        };
        let mut out = io::stdout().lock();
        out.write_all(bells)?;
        out.flush()?;
        Ok(())
    }
}

/// Spawns an external player (e.g. `paplay`, `afplay`) with a sound file
#[derive(Debug, Clone)]
pub struct CommandCuePlayer {
    program: String,
    warning: PathBuf,
    finish: PathBuf,
}

impl CommandCuePlayer {
    pub fn new(program: impl Into<String>, warning: PathBuf, finish: PathBuf) -> Self {
        Self {
            program: program.into(),
            warning,
            finish,
        }
    }

    fn asset(&self, cue: Cue) -> &PathBuf {
        match cue {
            Cue::Warning => &self.warning,
            Cue::Finish => &self.finish,
        }
    }
}

impl CuePlayer for CommandCuePlayer {
    fn play(&self, cue: Cue) -> Result<(), AudioError> {
        let mut child = Command::new(&self.program)
            .arg(self.asset(cue))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AudioError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        // reap in the background so the turn never waits on playback
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCuePlayer;

impl CuePlayer for SilentCuePlayer {
    fn play(&self, _cue: Cue) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Remembers every cue it was asked to play; clones share the log
#[derive(Debug, Default, Clone)]
pub struct RecordingCuePlayer {
    played: Rc<RefCell<Vec<Cue>>>,
}

impl RecordingCuePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<Cue> {
        self.played.borrow().clone()
    }
}

impl CuePlayer for RecordingCuePlayer {
    fn play(&self, cue: Cue) -> Result<(), AudioError> {
        self.played.borrow_mut().push(cue);
        Ok(())
    }
}
