use thiserror::Error;

/// Errors raised by game-flow operations. None of them are fatal: the caller
/// reports them on the current screen and the session state is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("please select at least one category")]
    NoCategories,

    #[error("time per round must be at least one second")]
    InvalidTime,

    #[error("player name must not be empty")]
    EmptyName,

    #[error("no movies available for the selected categories")]
    NoMovies,

    #[error("cannot {action} while on the {from} screen")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

impl GameError {
    pub fn invalid_transition(from: &'static str, action: &'static str) -> Self {
        Self::InvalidTransition { from, action }
    }
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("history could not be encoded: {0}")]
    Json(#[from] serde_json::Error),

    #[error("history could not be persisted: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to start sound player `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to ring terminal bell: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_message_names_screen_and_action() {
        let err = GameError::invalid_transition("setup", "skip a title");
        assert_eq!(
            err.to_string(),
            "cannot skip a title while on the setup screen"
        );
    }

    #[test]
    fn history_error_wraps_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = HistoryError::from(io);
        assert!(err.to_string().contains("nope"));
    }
}
