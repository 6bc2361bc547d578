//! # texture-db
//!
//! SQLite catalog, filesystem mirror, and reconciliation layer for the
//! texture-notes binder.
//!
//! This crate provides:
//! - Connection pool management over the profile's `notes.db`
//! - Catalog stores for subjects and notes with storage-boundary validation
//! - The filesystem mirror translating rows into directories and files
//! - The reconciliation layer that detects and repairs catalog rows whose
//!   on-disk artifact has gone missing ("dangling" entries)
//! - The [`Binder`] facade composing the above into the public verbs
//!
//! ## Example
//!
//! ```rust,ignore
//! use texture_db::{Binder, Profile};
//!
//! #[tokio::main]
//! async fn main() -> texture_core::Result<()> {
//!     let profile = Profile::create(std::path::Path::new(".")).await?;
//!     let binder = Binder::open(profile).await?;
//!
//!     let subject = binder.create_subject("Linear Algebra").await?;
//!     let note = binder.create_note("Linear Algebra", "Vector Spaces", false).await?;
//!     println!("created note {} under subject {}", note.id, subject.id);
//!     Ok(())
//! }
//! ```

pub mod binder;
pub mod mirror;
pub mod notes;
pub mod pool;
pub mod profile;
pub mod reconcile;
pub mod schema;
pub mod subjects;

#[cfg(test)]
mod tests;

// Fixtures shared by the test modules
#[cfg(test)]
pub mod test_fixtures;

pub use binder::Binder;
pub use mirror::{Layout, Mirror};
pub use notes::NoteStore;
pub use profile::Profile;
pub use reconcile::{Lookup, Reconciler};
pub use subjects::SubjectStore;

// Re-export core types
pub use texture_core::*;
