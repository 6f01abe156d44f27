use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::app_dirs::AppDirs;
use crate::error::HistoryError;

/// Cross-session set of titles that were guessed correctly.
///
/// `load` never fails: a missing, unreadable or corrupt store reads as empty.
/// Writes replace the whole persisted value.
pub trait HistoryStore {
    fn load(&self) -> HashSet<String>;
    fn add_all(&self, titles: &HashSet<String>) -> Result<(), HistoryError>;
    fn clear(&self) -> Result<(), HistoryError>;
}

/// JSON array of strings on disk
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    /// Store at the default state location, if the platform has one
    pub fn new() -> Option<Self> {
        AppDirs::history_path().map(Self::with_path)
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, titles: &HashSet<String>) -> Result<(), HistoryError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut sorted: Vec<&String> = titles.iter().collect();
        sorted.sort();

        let temp_file = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer(&mut writer, &sorted)?;
            writer.flush()?;
        }
        temp_file.persist(&self.path)?;
        Ok(())
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> HashSet<String> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), error = %err, "history unreadable, starting empty");
                }
                return HashSet::new();
            }
        };
        match serde_json::from_slice::<Vec<String>>(&bytes) {
            Ok(titles) => titles.into_iter().collect(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "history corrupt, starting empty");
                HashSet::new()
            }
        }
    }

    fn add_all(&self, titles: &HashSet<String>) -> Result<(), HistoryError> {
        if titles.is_empty() {
            return Ok(());
        }
        let mut merged = self.load();
        let before = merged.len();
        merged.extend(titles.iter().cloned());
        if merged.len() == before && self.path.exists() {
            return Ok(());
        }
        self.write(&merged)
    }

    fn clear(&self) -> Result<(), HistoryError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Process-local history, used when no persistent location exists and in tests
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    titles: RefCell<HashSet<String>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_titles<I, T>(titles: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            titles: RefCell::new(titles.into_iter().map(Into::into).collect()),
        }
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> HashSet<String> {
        self.titles.borrow().clone()
    }

    fn add_all(&self, titles: &HashSet<String>) -> Result<(), HistoryError> {
        self.titles.borrow_mut().extend(titles.iter().cloned());
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        self.titles.borrow_mut().clear();
        Ok(())
    }
}

/// File store at `path`, or the default location, or memory as a last resort
pub fn open_store(path: Option<PathBuf>) -> Box<dyn HistoryStore> {
    match path.map(FileHistoryStore::with_path).or_else(FileHistoryStore::new) {
        Some(store) => {
            tracing::info!(path = %store.path().display(), "using history file");
            Box::new(store)
        }
        None => {
            tracing::warn!("no state directory available, history kept in memory");
            Box::new(MemoryHistoryStore::new())
        }
    }
}
