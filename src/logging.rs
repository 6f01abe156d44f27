use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Env var holding a tracing filter directive, e.g. `charades=debug`
pub const LOG_ENV: &str = "CHARADES_LOG";

const DEFAULT_FILTER: &str = "charades=info";

/// Route tracing output to `path`; the TUI owns the terminal so nothing goes
/// to stdout/stderr. Returns false (and leaves logging off) if the file
/// cannot be opened or a subscriber is already installed.
pub fn init_file_logging(path: &Path) -> bool {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn unwritable_location_disables_logging() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"").unwrap();
        // parent is a regular file, so the log cannot be created
        assert!(!init_file_logging(&blocker.join("charades.log")));
    }
}
