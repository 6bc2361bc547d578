//! Name and title validation enforced at the storage boundary.
//!
//! The catalog store calls these before every insert so no caller can
//! bypass the format, length, and reserved-keyword constraints.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::defaults::{
    NOTE_TITLE_MAX_LEN, RESERVED_NOTE_TITLES, RESERVED_SUBJECT_NAMES, SUBJECT_NAME_MAX_LEN,
};
use crate::error::{Error, Result};

static SUBJECT_NAME_CHARSET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\d -]+$").unwrap());
static PURELY_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// Validate a subject display name, returning the trimmed form.
///
/// Subjects also get leading/trailing hyphens trimmed so that the derived
/// slug never starts or ends with a separator.
pub fn validate_subject_name(name: &str) -> Result<String> {
    let name = name.trim_matches(|c: char| c.is_whitespace() || c == '-');

    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.chars().count() > SUBJECT_NAME_MAX_LEN {
        Some("name is longer than 128 characters")
    } else if RESERVED_SUBJECT_NAMES
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(name))
    {
        Some("name is a reserved keyword")
    } else if !SUBJECT_NAME_CHARSET.is_match(name) {
        Some("name contains invalid characters")
    } else if PURELY_NUMERIC.is_match(name) {
        Some("name cannot be purely numeric")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidSubjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(name.to_string()),
    }
}

/// Validate a note title, returning the trimmed form.
pub fn validate_note_title(title: &str) -> Result<String> {
    let title = title.trim();

    let reason = if title.is_empty() {
        Some("title is empty")
    } else if title.chars().count() > NOTE_TITLE_MAX_LEN {
        Some("title is longer than 256 characters")
    } else if RESERVED_NOTE_TITLES
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(title))
    {
        Some("title is a reserved keyword")
    } else if PURELY_NUMERIC.is_match(title) {
        Some("title cannot be purely numeric")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidNoteTitle {
            title: title.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(title.to_string()),
    }
}
