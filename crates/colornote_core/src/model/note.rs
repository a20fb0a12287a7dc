//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted entity: title, content, order and color.
//! - Guard every content mutation with the text-only check.
//! - Delegate persistence to a `NoteRepository` passed in by the caller.
//!
//! # Invariants
//! - `id` is generated once and never changes; it is also the record filename stem.
//! - An unset order sorts as `0`, same as an explicit `0`.
//! - A failed content assignment leaves the previous content untouched.

use crate::model::color::{foreground_for, Rgb};
use crate::repo::note_repo::{NoteRepository, RepoResult};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use uuid::Uuid;

/// Validation failures for note fields and identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteValidationError {
    #[error("invalid note content: expected text, found {found}")]
    ContentNotText { found: &'static str },
    #[error("invalid note color: `{0}`")]
    InvalidColor(String),
    #[error("note id must be a non-empty file stem")]
    EmptyId,
}

/// Stable note identifier, doubling as the record filename stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(String);

impl NoteId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier, typically a record filename stem.
    ///
    /// # Errors
    /// - `EmptyId` when the value is blank, `.`/`..`, or contains a path separator.
    pub fn parse(value: impl Into<String>) -> Result<Self, NoteValidationError> {
        let value = value.into();
        if value.trim().is_empty()
            || value == "."
            || value == ".."
            || value.contains(['/', '\\'])
        {
            return Err(NoteValidationError::EmptyId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One user note.
///
/// Fields are private so that content can only change through the guarded
/// setters. Mutations are in-memory only; call [`Note::save`] to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    title: String,
    content: String,
    order: Option<u64>,
    color: Option<Rgb>,
}

impl Note {
    /// Creates a fresh note with a generated id, empty content and no order.
    pub fn new(title: impl Into<String>, color: Option<Rgb>) -> Self {
        Self::from_parts(NoteId::generate(), title, String::new(), None, color)
    }

    /// Rebuilds a note whose identity already exists (load path).
    pub fn from_parts(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        order: Option<u64>,
        color: Option<Rgb>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            order,
            color,
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replaces the content with text.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Replaces the content from a dynamically typed value.
    ///
    /// # Errors
    /// - `ContentNotText` when `value` is not a JSON string; content is kept.
    pub fn try_set_content(&mut self, value: &Value) -> Result<(), NoteValidationError> {
        match value {
            Value::String(text) => {
                self.content = text.clone();
                Ok(())
            }
            other => Err(NoteValidationError::ContentNotText {
                found: json_type_name(other),
            }),
        }
    }

    /// Effective sort key. Unset orders sort as `0`.
    pub fn order(&self) -> u64 {
        self.order.unwrap_or(0)
    }

    /// Order as stored, `None` when never assigned (or stored falsy).
    pub fn explicit_order(&self) -> Option<u64> {
        self.order
    }

    pub fn set_order(&mut self, order: u64) {
        self.order = Some(order);
    }

    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    /// Replaces the color. Does not persist by itself.
    pub fn change_color(&mut self, color: Option<Rgb>) {
        self.color = color;
    }

    /// Text color for rendering this note; uncolored notes render on white.
    pub fn foreground(&self) -> Rgb {
        foreground_for(self.color.unwrap_or(Rgb::WHITE))
    }

    /// Writes this note's record, fully replacing any previous one.
    pub fn save<R: NoteRepository + ?Sized>(&self, repo: &R) -> RepoResult<()> {
        repo.save_note(self)
    }

    /// Removes this note's record.
    ///
    /// Returns `true` only when the record no longer exists afterwards. The
    /// handle must not be saved again after a successful delete.
    pub fn delete<R: NoteRepository + ?Sized>(&self, repo: &R) -> bool {
        repo.delete_note(&self.id)
    }
}

impl Display for Note {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
