//! Note domain model.
//!
//! # Responsibility
//! - Define the note entity and its display color.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId` that is also its record
//!   filename stem.
//! - Deletion removes the record; there are no tombstones.

pub mod color;
pub mod note;
