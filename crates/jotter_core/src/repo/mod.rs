//! Repository layer for note persistence.
//!
//! # Responsibility
//! - Define the note store contract used by the CLI and picker.
//! - Isolate SQLite/JSON query details from callers.
//!
//! # Invariants
//! - Store APIs return semantic errors (`NotFound`) in addition to storage
//!   transport errors.

pub mod note_store;
