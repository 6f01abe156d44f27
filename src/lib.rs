// Game logic without the terminal; the TUI binary and tests/ build on it.
pub mod app_dirs;
pub mod audio;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod leaderboard;
pub mod logging;
pub mod round;
pub mod runtime;
pub mod turn;
pub mod util;

pub use catalog::{Catalog, MovieCategory};
pub use config::{GameConfig, GameMode};
pub use error::GameError;
pub use game::{GameScreen, GameSession, PlayState, Player, Team};
pub use history::{FileHistoryStore, HistoryStore, MemoryHistoryStore};
pub use turn::{Turn, TurnResult};
