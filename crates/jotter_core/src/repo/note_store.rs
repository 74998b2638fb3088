//! Note store contract and SQLite document-collection implementation.
//!
//! # Responsibility
//! - Persist notes as JSON documents in the `notes` collection.
//! - Map storage failures to `NotFound` / `Read` / `Write` / `Connection`.
//!
//! # Invariants
//! - All queries are constrained to `collection = 'notes'`.
//! - `id` is the engine-assigned row key; the document body never stores it.
//! - Decode failures are returned, never skipped.
//! - Note bodies are never written to logs.

use crate::db::DbError;
use crate::model::note::{Author, NewNote, Note, NoteId};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Fixed collection name for note documents.
pub const NOTES_COLLECTION: &str = "notes";

const DOCUMENTS_TABLE: &str = "documents";

pub type StoreResult<T> = Result<T, StoreError>;

/// Underlying cause of a read or write failure.
#[derive(Debug)]
pub enum StoreCause {
    Sqlite(rusqlite::Error),
    Json(serde_json::Error),
}

impl Display for StoreCause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "document codec: {err}"),
        }
    }
}

impl From<rusqlite::Error> for StoreCause {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreCause {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Error taxonomy for note store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Query matched zero documents.
    NotFound { field: &'static str, value: String },
    /// Query or decode failure other than not-found.
    Read { op: &'static str, cause: StoreCause },
    /// Insert, delete or encode failure.
    Write { op: &'static str, cause: StoreCause },
    /// Database handle is unusable for note storage.
    Connection(DbError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    fn read(op: &'static str, cause: impl Into<StoreCause>) -> Self {
        Self::Read {
            op,
            cause: cause.into(),
        }
    }

    fn write(op: &'static str, cause: impl Into<StoreCause>) -> Self {
        Self::Write {
            op,
            cause: cause.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { field, value } => {
                write!(f, "no note found with {field} `{value}`")
            }
            Self::Read { op, cause } => write!(f, "{op}: read failed: {cause}"),
            Self::Write { op, cause } => write!(f, "{op}: write failed: {cause}"),
            Self::Connection(err) => write!(f, "note storage unavailable: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Read { cause, .. } | Self::Write { cause, .. } => match cause {
                StoreCause::Sqlite(err) => Some(err),
                StoreCause::Json(err) => Some(err),
            },
            Self::Connection(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Connection(value)
    }
}

/// Repository interface for note persistence.
pub trait NoteStore {
    /// Stamps author and creation time, persists the note and returns it
    /// with its engine-assigned id.
    fn create(&self, note: &NewNote) -> StoreResult<Note>;
    /// Removes at most one note. Missing ids are not an error.
    fn delete(&self, id: NoteId) -> StoreResult<()>;
    /// Returns one note whose author matches exactly. Choice among duplicates
    /// is unspecified.
    fn find_by_author(&self, author: &str) -> StoreResult<Note>;
    /// Returns one note whose name matches exactly. Choice among duplicates
    /// is unspecified.
    fn find_by_name(&self, name: &str) -> StoreResult<Note>;
    /// Returns every stored note in storage order.
    fn list_all(&self) -> StoreResult<Vec<Note>>;
}

/// Document body as stored in the collection.
#[derive(Debug, Serialize, Deserialize)]
struct NoteDocument<'a> {
    #[serde(borrow)]
    name: Cow<'a, str>,
    #[serde(borrow)]
    text: Cow<'a, str>,
    #[serde(borrow, default)]
    tag: Cow<'a, str>,
    #[serde(borrow)]
    author: Cow<'a, str>,
    created_at: i64,
}

impl NoteDocument<'_> {
    fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            name: self.name.into_owned(),
            text: self.text.into_owned(),
            tag: self.tag.into_owned(),
            author: self.author.into_owned(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum NoteField {
    Author,
    Name,
}

impl NoteField {
    fn name(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Name => "name",
        }
    }

    fn json_path(self) -> &'static str {
        match self {
            Self::Author => "$.author",
            Self::Name => "$.name",
        }
    }

    fn op(self) -> &'static str {
        match self {
            Self::Author => "find_by_author",
            Self::Name => "find_by_name",
        }
    }
}

/// SQLite-backed note store over the `notes` document collection.
pub struct SqliteNoteStore<'conn> {
    conn: &'conn Connection,
    author: Author,
}

impl<'conn> SqliteNoteStore<'conn> {
    /// Constructs a store from a bootstrapped connection.
    ///
    /// # Errors
    /// - Returns [`StoreError::Connection`] when the collection table is
    ///   missing or the schema cannot be inspected.
    pub fn try_new(conn: &'conn Connection, author: Author) -> StoreResult<Self> {
        ensure_collection_ready(conn)?;
        Ok(Self { conn, author })
    }

    /// Author stamped onto notes created through this store.
    pub fn author(&self) -> &Author {
        &self.author
    }

    fn find_one(&self, field: NoteField, value: &str) -> StoreResult<Note> {
        let op = field.op();
        let row = self
            .conn
            .query_row(
                "SELECT id, body
                 FROM documents
                 WHERE collection = ?1
                   AND json_extract(body, ?2) = ?3
                 ORDER BY id ASC
                 LIMIT 1;",
                params![NOTES_COLLECTION, field.json_path(), value],
                read_id_and_body,
            )
            .optional()
            .map_err(|err| log_failure(StoreError::read(op, err)))?;

        match row {
            Some((id, body)) => {
                let note = decode_note(id, &body)
                    .map_err(|err| log_failure(StoreError::read(op, err)))?;
                debug!(
                    "event=note_find module=repo status=ok field={} id={}",
                    field.name(),
                    id
                );
                Ok(note)
            }
            None => {
                debug!(
                    "event=note_find module=repo status=not_found field={}",
                    field.name()
                );
                Err(StoreError::NotFound {
                    field: field.name(),
                    value: value.to_string(),
                })
            }
        }
    }
}

impl NoteStore for SqliteNoteStore<'_> {
    fn create(&self, note: &NewNote) -> StoreResult<Note> {
        let document = NoteDocument {
            name: Cow::Borrowed(note.name.as_str()),
            text: Cow::Borrowed(note.text.as_str()),
            tag: Cow::Borrowed(note.tag.as_str()),
            author: Cow::Borrowed(self.author.as_str()),
            created_at: now_epoch_ms(),
        };
        let body = serde_json::to_string(&document)
            .map_err(|err| log_failure(StoreError::write("create", err)))?;

        self.conn
            .execute(
                "INSERT INTO documents (collection, body) VALUES (?1, ?2);",
                params![NOTES_COLLECTION, body],
            )
            .map_err(|err| log_failure(StoreError::write("create", err)))?;
        let id = self.conn.last_insert_rowid();

        debug!("event=note_create module=repo status=ok id={}", id);
        Ok(document.into_note(id))
    }

    fn delete(&self, id: NoteId) -> StoreResult<()> {
        let removed = self
            .conn
            .execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2;",
                params![NOTES_COLLECTION, id],
            )
            .map_err(|err| log_failure(StoreError::write("delete", err)))?;

        debug!(
            "event=note_delete module=repo status=ok id={} removed={}",
            id, removed
        );
        Ok(())
    }

    fn find_by_author(&self, author: &str) -> StoreResult<Note> {
        self.find_one(NoteField::Author, author)
    }

    fn find_by_name(&self, name: &str) -> StoreResult<Note> {
        self.find_one(NoteField::Name, name)
    }

    fn list_all(&self) -> StoreResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, body
                 FROM documents
                 WHERE collection = ?1
                 ORDER BY id ASC;",
            )
            .map_err(|err| log_failure(StoreError::read("list_all", err)))?;

        let rows = stmt
            .query_map([NOTES_COLLECTION], read_id_and_body)
            .map_err(|err| log_failure(StoreError::read("list_all", err)))?;

        let mut notes = Vec::new();
        for row in rows {
            let (id, body) = row.map_err(|err| log_failure(StoreError::read("list_all", err)))?;
            let note = decode_note(id, &body)
                .map_err(|err| log_failure(StoreError::read("list_all", err)))?;
            notes.push(note);
        }

        debug!("event=note_list module=repo status=ok count={}", notes.len());
        Ok(notes)
    }
}

fn read_id_and_body(row: &Row<'_>) -> rusqlite::Result<(NoteId, String)> {
    Ok((row.get("id")?, row.get("body")?))
}

fn decode_note(id: NoteId, body: &str) -> Result<Note, serde_json::Error> {
    let document: NoteDocument<'_> = serde_json::from_str(body)?;
    Ok(document.into_note(id))
}

fn log_failure(err: StoreError) -> StoreError {
    error!("event=note_store module=repo status=error error={}", err);
    err
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

fn ensure_collection_ready(conn: &Connection) -> StoreResult<()> {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [DOCUMENTS_TABLE],
            |row| row.get(0),
        )
        .map_err(DbError::from)?;

    if exists != 1 {
        return Err(StoreError::Connection(DbError::MissingRequiredTable(
            DOCUMENTS_TABLE,
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode_note, StoreCause, StoreError};

    #[test]
    fn decode_note_merges_key_into_record() {
        let note = decode_note(
            7,
            r#"{"name":"a","text":"b","tag":"c","author":"d","created_at":42}"#,
        )
        .unwrap();
        assert_eq!(note.id, 7);
        assert_eq!(note.name, "a");
        assert_eq!(note.created_at, 42);
    }

    #[test]
    fn decode_note_defaults_missing_tag_to_empty() {
        let note = decode_note(1, r#"{"name":"a","text":"b","author":"d","created_at":1}"#)
            .unwrap();
        assert!(note.tag.is_empty());
    }

    #[test]
    fn decode_note_rejects_wrong_shape() {
        assert!(decode_note(1, r#"{"name":5}"#).is_err());
    }

    #[test]
    fn not_found_message_names_field_and_value() {
        let err = StoreError::NotFound {
            field: "name",
            value: "shopping".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no note found with name `shopping`");
    }

    #[test]
    fn read_error_carries_operation_context() {
        let cause = serde_json::from_str::<u8>("x").unwrap_err();
        let err = StoreError::Read {
            op: "list_all",
            cause: StoreCause::Json(cause),
        };
        assert!(err.to_string().starts_with("list_all: read failed"));
    }
}
