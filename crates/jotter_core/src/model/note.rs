//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record and its creation input.
//! - Validate author names before they are stamped onto notes.
//!
//! # Invariants
//! - `id` is assigned by storage, never by the caller.
//! - `author` is never blank.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by the storage engine at write time.
pub type NoteId = i64;

/// Author used when no OS user can be resolved.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// Stored note as read back from the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Engine-assigned key.
    pub id: NoteId,
    /// Human-chosen lookup key. Not unique.
    pub name: String,
    /// Note body.
    pub text: String,
    /// Free-form category; empty when absent.
    pub tag: String,
    /// Author stamped by the store at creation.
    pub author: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Caller-supplied fields for a new note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    pub name: String,
    pub text: String,
    pub tag: String,
}

impl NewNote {
    /// Creates a note input with an empty tag.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            tag: String::new(),
        }
    }

    /// Sets the free-form tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

/// Author identity stamped onto created notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author(String);

impl Author {
    /// Creates an author from an explicit name.
    ///
    /// # Errors
    /// - Returns [`AuthorError::Blank`] when `name` is empty after trimming.
    pub fn new(name: impl AsRef<str>) -> Result<Self, AuthorError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AuthorError::Blank);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Resolves the author from the current OS user, or [`UNKNOWN_AUTHOR`].
    pub fn from_os_user() -> Self {
        crate::identity::current_os_user()
            .map(Self)
            .unwrap_or_else(|| Self(UNKNOWN_AUTHOR.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Author validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorError {
    Blank,
}

impl Display for AuthorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => write!(f, "author name cannot be blank"),
        }
    }
}

impl Error for AuthorError {}
