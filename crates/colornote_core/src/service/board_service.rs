//! Note board use-case service.
//!
//! # Responsibility
//! - Hold the ordered note list a UI shell renders.
//! - Route every shell action (create, rename, edit, recolor, delete,
//!   reorder, close) to the matching in-memory mutation plus save.
//!
//! # Invariants
//! - After any insert, reorder or delete, `order` equals the zero-based display
//!   position for every note, and every note is persisted.
//! - Recoloring is "change color, then save"; there is no color-only path.
//! - A note stays on the board when its record could not be removed.

use crate::model::color::{Rgb, DEFAULT_NOTE_COLOR};
use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError};
use log::info;
use std::collections::HashSet;
use thiserror::Error;

pub type BoardResult<T> = Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("note not found on board: {0}")]
    UnknownNote(NoteId),
    #[error("index {index} out of range for {len} notes")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("note title cannot be empty")]
    EmptyTitle,
    #[error("reorder must list each of the {expected} notes exactly once")]
    ReorderMismatch { expected: usize },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// In-memory ordered note list backed by a repository.
pub struct NoteBoard<R: NoteRepository> {
    repo: R,
    notes: Vec<Note>,
}

impl<R: NoteRepository> NoteBoard<R> {
    /// Loads every note from `repo` in stored order.
    pub fn load(repo: R) -> BoardResult<Self> {
        let notes = repo.list_notes()?;
        Ok(Self { repo, notes })
    }

    /// Notes in display order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id() == id)
    }

    /// Display index of `id`, if it is on the board.
    pub fn position(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id() == id)
    }

    /// Re-reads the board from storage, dropping unsaved in-memory state.
    pub fn reload(&mut self) -> BoardResult<()> {
        self.notes = self.repo.list_notes()?;
        Ok(())
    }

    /// Creates, saves and appends a note with the default color.
    pub fn create_note(&mut self, title: &str) -> BoardResult<NoteId> {
        self.create_note_with_color(title, DEFAULT_NOTE_COLOR)
    }

    /// Appends a new note at the end of the board, then reindexes and
    /// persists every note so the insert survives a reload in place.
    pub fn create_note_with_color(&mut self, title: &str, color: Rgb) -> BoardResult<NoteId> {
        if title.trim().is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        let note = Note::new(title, Some(color));
        let id = note.id().clone();
        self.notes.push(note);
        self.reindex_and_persist()?;
        Ok(id)
    }

    pub fn rename(&mut self, id: &NoteId, title: &str) -> BoardResult<()> {
        if title.trim().is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        let note = self.note_mut(id)?;
        note.set_title(title);
        self.save_at(id)
    }

    pub fn edit_content(&mut self, id: &NoteId, content: impl Into<String>) -> BoardResult<()> {
        self.note_mut(id)?.set_content(content);
        self.save_at(id)
    }

    /// Applies `color` and then persists the note.
    pub fn recolor(&mut self, id: &NoteId, color: Rgb) -> BoardResult<()> {
        self.note_mut(id)?.change_color(Some(color));
        self.save_at(id)
    }

    /// Foreground to render `id` with.
    pub fn foreground_for(&self, id: &NoteId) -> BoardResult<Rgb> {
        self.get(id)
            .map(Note::foreground)
            .ok_or_else(|| BoardError::UnknownNote(id.clone()))
    }

    /// Deletes the note's record and, on success, drops it from the board.
    ///
    /// Returns `Ok(false)` and keeps the note visible when the record was not
    /// removed.
    pub fn delete(&mut self, id: &NoteId) -> BoardResult<bool> {
        let index = self
            .position(id)
            .ok_or_else(|| BoardError::UnknownNote(id.clone()))?;
        if !self.notes[index].delete(&self.repo) {
            return Ok(false);
        }
        self.notes.remove(index);
        self.reindex_and_persist()?;
        Ok(true)
    }

    /// Moves the note at `from` to `to` (drag-reorder).
    pub fn move_note(&mut self, from: usize, to: usize) -> BoardResult<()> {
        let len = self.notes.len();
        for index in [from, to] {
            if index >= len {
                return Err(BoardError::IndexOutOfRange { index, len });
            }
        }
        let note = self.notes.remove(from);
        self.notes.insert(to, note);
        self.reindex_and_persist()
    }

    /// Replaces the display order with `ids`, which must be a permutation
    /// of the notes on the board.
    pub fn reorder(&mut self, ids: &[NoteId]) -> BoardResult<()> {
        let expected = self.notes.len();
        let unique: HashSet<&NoteId> = ids.iter().collect();
        if ids.len() != expected || unique.len() != expected {
            return Err(BoardError::ReorderMismatch { expected });
        }

        if let Some(missing) = ids.iter().find(|id| self.position(id).is_none()) {
            return Err(BoardError::UnknownNote(missing.clone()));
        }

        let mut reordered = Vec::with_capacity(expected);
        for id in ids {
            if let Some(index) = self.position(id) {
                reordered.push(self.notes.swap_remove(index));
            }
        }
        self.notes = reordered;
        self.reindex_and_persist()
    }

    /// Final flush: reindex and persist everything.
    pub fn close(&mut self) -> BoardResult<()> {
        self.reindex_and_persist()?;
        info!(
            "event=board_close module=service status=ok count={}",
            self.notes.len()
        );
        Ok(())
    }

    fn reindex_and_persist(&mut self) -> BoardResult<()> {
        for (position, note) in self.notes.iter_mut().enumerate() {
            note.set_order(position as u64);
            note.save(&self.repo)?;
        }
        Ok(())
    }

    fn note_mut(&mut self, id: &NoteId) -> BoardResult<&mut Note> {
        self.notes
            .iter_mut()
            .find(|note| note.id() == id)
            .ok_or_else(|| BoardError::UnknownNote(id.clone()))
    }

    fn save_at(&self, id: &NoteId) -> BoardResult<()> {
        let note = self
            .get(id)
            .ok_or_else(|| BoardError::UnknownNote(id.clone()))?;
        note.save(&self.repo)?;
        Ok(())
    }
}
