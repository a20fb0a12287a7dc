//! Note store configuration.
//!
//! # Responsibility
//! - Resolve the base directory that holds one record per note.
//! - Derive each record location from the note id alone.
//!
//! # Invariants
//! - Record path is `<notes_dir>/<id>.json`; titles never affect paths.

use crate::model::note::NoteId;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension shared by every note record.
pub const NOTE_FILE_EXTENSION: &str = "json";
/// Directory name created under the user's home for the default store.
pub const NOTES_DIR_NAME: &str = ".notes";
/// Sibling directory of the store that receives rolling log files.
pub const LOG_DIR_NAME: &str = ".colornote-logs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("home directory could not be determined")]
    HomeDirUnavailable,
}

/// Where note records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    notes_dir: PathBuf,
}

impl StoreConfig {
    /// Uses `notes_dir` as the base directory. It does not need to exist yet.
    pub fn new(notes_dir: impl Into<PathBuf>) -> Self {
        Self {
            notes_dir: notes_dir.into(),
        }
    }

    /// Per-user default store at `~/.notes`.
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
        Ok(Self::new(home.join(NOTES_DIR_NAME)))
    }

    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    pub fn record_path(&self, id: &NoteId) -> PathBuf {
        self.notes_dir.join(format!("{}.{NOTE_FILE_EXTENSION}", id.as_str()))
    }

    /// Log directory placed beside the store, so logs never mix with records.
    pub fn log_dir(&self) -> PathBuf {
        match self.notes_dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(LOG_DIR_NAME),
            _ => self.notes_dir.join(LOG_DIR_NAME),
        }
    }
}
