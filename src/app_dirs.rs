use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "charades";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `$HOME/.local/state/charades`, or the platform data-local dir
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    /// Cross-session set of correctly guessed titles
    pub fn history_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("completed_movies.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("charades.log"))
    }

    pub fn settings_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", APP_NAME) {
            pd.config_dir().join("settings.json")
        } else {
            PathBuf::from("charades_settings.json")
        }
    }
}
