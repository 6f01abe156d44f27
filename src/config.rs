use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::catalog::MovieCategory;
use crate::error::GameError;

/// Round lengths offered on the setup screen, in seconds
pub const TIME_OPTIONS: [u32; 4] = [60, 120, 180, 300];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Individual,
    Team,
}

impl GameMode {
    pub fn toggled(self) -> Self {
        match self {
            GameMode::Individual => GameMode::Team,
            GameMode::Team => GameMode::Individual,
        }
    }
}

/// Settings chosen on the setup screen; fixed until a new game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    pub time_per_round: u32,
    pub categories: Vec<MovieCategory>,
    pub game_mode: GameMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_per_round: 120,
            categories: vec![MovieCategory::Bollywood, MovieCategory::Hollywood],
            game_mode: GameMode::Team,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.categories.is_empty() {
            return Err(GameError::NoCategories);
        }
        if self.time_per_round == 0 {
            return Err(GameError::InvalidTime);
        }
        Ok(())
    }

    /// Add or remove a category, keeping selection order
    pub fn toggle_category(&mut self, category: MovieCategory) {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
    }

    pub fn has_category(&self, category: MovieCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Step to the next entry of [`TIME_OPTIONS`]; custom values restart the cycle
    pub fn cycle_time(&mut self) {
        self.time_per_round = match TIME_OPTIONS.iter().position(|t| *t == self.time_per_round) {
            Some(i) => TIME_OPTIONS[(i + 1) % TIME_OPTIONS.len()],
            None => TIME_OPTIONS[0],
        };
    }
}

/// Persistence of the last submitted setup, used as the next session's defaults
pub trait SettingsStore {
    fn load(&self) -> GameConfig;
    fn save(&self, cfg: &GameConfig) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::settings_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> GameConfig {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<GameConfig>(&bytes) {
                if cfg.validate().is_ok() {
                    return cfg;
                }
            }
        }
        GameConfig::default()
    }

    fn save(&self, cfg: &GameConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
