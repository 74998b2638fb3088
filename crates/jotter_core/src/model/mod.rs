//! Domain model for stored notes.
//!
//! # Responsibility
//! - Define the note record passed between callers and the store.
//! - Keep author identity an explicit value rather than an ambient lookup.
//!
//! # Invariants
//! - Every persisted note is identified by an engine-assigned `NoteId`.
//! - Notes are never updated in place; deletion is a hard delete.

pub mod note;
