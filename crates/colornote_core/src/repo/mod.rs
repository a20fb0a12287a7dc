//! Repository layer for note records.
//!
//! # Responsibility
//! - Define the persistence contract notes and the board depend on.
//! - Keep file layout and record decoding inside one module.
//!
//! # Invariants
//! - One record file per note; filename stem == note id.

pub mod note_repo;
