//! Core domain logic for jotter.
//! Notes, their document storage, and the process-wide ambient setup.

pub mod db;
pub mod identity;
pub mod logging;
pub mod model;
pub mod repo;

pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::note::{Author, AuthorError, NewNote, Note, NoteId, UNKNOWN_AUTHOR};
pub use repo::note_store::{
    NoteStore, SqliteNoteStore, StoreCause, StoreError, StoreResult, NOTES_COLLECTION,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
