//! SQLite storage bootstrap for the note document collection.
//!
//! # Responsibility
//! - Open and configure the single SQLite handle used by jotter.
//! - Create the `documents` collection table before any store touches it.
//!
//! # Invariants
//! - Bootstrap version is tracked via `PRAGMA user_version`.
//! - Stores must not read/write documents before bootstrap succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{database_file_name, open_db, open_db_in_memory, DEFAULT_DATABASE_NAME};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or bootstrapping the jotter database.
#[derive(Debug)]
pub enum DbError {
    /// SQLite refused to open, configure or run the bootstrap on the file.
    Sqlite(rusqlite::Error),
    /// The file was bootstrapped by a newer jotter build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A table the note store reads from is absent.
    MissingRequiredTable(&'static str),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "jotter database is at bootstrap version {db_version}, this build only knows up to {latest_supported}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; database was not bootstrapped")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            return Some(err);
        }
        None
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
