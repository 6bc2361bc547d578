//! Core data models for texture-notes.
//!
//! These types are shared across all texture-notes crates and represent the
//! catalog's domain entities plus the common result and option shapes of the
//! reconciled lookup paths.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::slug::kebab_case;

/// File extension of note documents.
pub const NOTE_FILE_EXTENSION: &str = "tex";

/// A top-level grouping of notes, mirrored to a directory on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    /// Set by the catalog store at insert time, `%Y-%m-%d %H:%M:%S`.
    pub datetime_modified: NaiveDateTime,
}

impl Subject {
    /// Filesystem-safe directory name derived from the display name.
    pub fn slug(&self) -> String {
        kebab_case(&self.name)
    }
}

/// A single document belonging to exactly one subject, mirrored to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub subject_id: i64,
    pub title: String,
    pub datetime_modified: NaiveDateTime,
}

impl Note {
    /// Filesystem-safe stem derived from the title.
    pub fn slug(&self) -> String {
        kebab_case(&self.title)
    }

    /// File name of the document inside its subject directory.
    pub fn filename(&self) -> String {
        format!("{}.{}", self.slug(), NOTE_FILE_EXTENSION)
    }
}

/// Sort key for list queries.
///
/// `Name` sorts subjects by display name and notes by title. Ordering is
/// always ascending with ties broken by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Id,
    Name,
    Date,
}

/// Options controlling reconciled lookups.
#[derive(Debug, Clone, Copy)]
pub struct LookupOptions {
    /// Delete catalog rows found dangling during the lookup. The dangling
    /// condition is surfaced to the caller either way.
    pub auto_repair: bool,
    /// For batch lookups: fail when any dangling or missing entry is found,
    /// discarding the consistent partition.
    pub strict: bool,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            auto_repair: true,
            strict: false,
        }
    }
}

impl LookupOptions {
    /// Leave dangling rows in the catalog instead of repairing them.
    pub fn keep_dangling(mut self) -> Self {
        self.auto_repair = false;
        self
    }

    /// Turn any dangling/missing partition into an error.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

/// Result of a batch subject lookup, partitioned by consistency.
///
/// `found` are rows whose directory exists on disk, ordered by the requested
/// sort key. `dangling` are rows whose directory is missing (repaired away
/// from the catalog unless repair was disabled). `missing` holds requested
/// names with no catalog row at all; it stays empty for list-all queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectListing {
    pub found: Vec<Subject>,
    pub dangling: Vec<Subject>,
    pub missing: Vec<String>,
}

impl SubjectListing {
    /// True when every requested subject was found consistent.
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.missing.is_empty()
    }
}

/// Result of a batch note lookup, partitioned by consistency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteListing {
    pub found: Vec<Note>,
    pub dangling: Vec<Note>,
    pub missing: Vec<String>,
}

impl NoteListing {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.missing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_subject_slug() {
        let subject = Subject {
            id: 1,
            name: "Linear Algebra".to_string(),
            datetime_modified: ts(),
        };
        assert_eq!(subject.slug(), "linear-algebra");
    }

    #[test]
    fn test_note_filename() {
        let note = Note {
            id: 1,
            subject_id: 1,
            title: "Vector Spaces".to_string(),
            datetime_modified: ts(),
        };
        assert_eq!(note.slug(), "vector-spaces");
        assert_eq!(note.filename(), "vector-spaces.tex");
    }

    #[test]
    fn test_lookup_options_defaults() {
        let opts = LookupOptions::default();
        assert!(opts.auto_repair);
        assert!(!opts.strict);

        let opts = LookupOptions::default().keep_dangling().strict();
        assert!(!opts.auto_repair);
        assert!(opts.strict);
    }

    #[test]
    fn test_listing_is_clean() {
        let mut listing = SubjectListing::default();
        assert!(listing.is_clean());

        listing.missing.push("Physics".to_string());
        assert!(!listing.is_clean());
    }
}
