//! Error types for texture-notes.

use thiserror::Error;

use crate::models::{Note, Subject};

/// Result type alias using texture-notes' Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for texture-notes operations.
///
/// Domain conditions (not-found, dangling, already-exists, invalid input)
/// are dedicated variants carrying the offending entity so that callers can
/// branch on them and keep going; storage-engine failures wrap the
/// underlying error unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Subject name fails format, length, or reserved-keyword checks
    #[error("Invalid subject name {name:?}: {reason}")]
    InvalidSubjectName { name: String, reason: String },

    /// Note title fails format, length, or reserved-keyword checks
    #[error("Invalid note title {title:?}: {reason}")]
    InvalidNoteTitle { title: String, reason: String },

    /// A subject with the same name is already in the catalog
    #[error("Subject already exists: {0}")]
    SubjectAlreadyExists(String),

    /// A note with the same title already exists under the subject
    #[error("Note {title:?} already exists under subject {subject:?}")]
    NoteAlreadyExists { subject: String, title: String },

    /// No catalog row for the subject
    #[error("No subject found: {0}")]
    SubjectNotFound(String),

    /// No catalog row with the given subject id
    #[error("No subject found with id {0}")]
    SubjectIdNotFound(i64),

    /// No catalog row for the note under the given subject
    #[error("No note {title:?} found under subject {subject:?}")]
    NoteNotFound { subject: String, title: String },

    /// No catalog row with the given note id
    #[error("No note found with id {0}")]
    NoteIdNotFound(i64),

    /// Subject row exists but its directory is missing on disk.
    ///
    /// Carries the now-orphaned row; when auto-repair was enabled the row
    /// has already been deleted from the catalog by the time the caller
    /// sees this.
    #[error("Dangling subject: {} (directory missing on disk)", .0.name)]
    DanglingSubject(Subject),

    /// Note row exists but its file is missing on disk.
    #[error("Dangling note: {} (file missing on disk)", .0.title)]
    DanglingNote(Note),

    /// Strict batch subject lookup found missing and/or dangling entries
    #[error("Subject lookup failed: {} missing, {} dangling", missing.len(), dangling.len())]
    MultipleSubjects {
        missing: Vec<String>,
        dangling: Vec<Subject>,
    },

    /// Strict batch note lookup found dangling entries
    #[error("{} dangling note(s) found", .0.len())]
    DanglingNotes(Vec<Note>),

    /// A profile already exists at the given location
    #[error("Profile already exists at {0}")]
    ProfileAlreadyExists(String),

    /// No profile found at the given location
    #[error("No profile found at {0}")]
    ProfileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Compiler invocation failed before producing an exit status
    #[error("Compile error: {0}")]
    Compile(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
