//! # texture-core
//!
//! Core types and abstractions for the texture-notes binder.
//!
//! This crate provides the foundational data structures, the error taxonomy,
//! and the pure helpers (slug normalization, name validation, template
//! rendering) that the other texture-notes crates depend on.

pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod slug;
pub mod templates;
pub mod validate;

// Re-export commonly used types at crate root
pub use config::Preferences;
pub use error::{Error, Result};
pub use models::{
    LookupOptions, Note, NoteListing, SortBy, Subject, SubjectListing,
};
pub use slug::kebab_case;
pub use templates::render;
pub use validate::{validate_note_title, validate_subject_name};
