//! Core domain logic for ColorNote.
//! This crate is the single source of truth for note persistence and ordering.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, StoreConfig, NOTE_FILE_EXTENSION};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::color::{foreground_for, Rgb, DEFAULT_NOTE_COLOR};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use repo::note_repo::{
    list_all_notes, list_all_notes_lenient, JsonNoteRepository, LoadReport, NoteRepository,
    RepoError, RepoResult,
};
pub use service::board_service::{BoardError, BoardResult, NoteBoard};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
