//! Test fixtures for catalog and reconciliation tests.
//!
//! Provides a temporary on-disk profile with an opened binder, so tests
//! can exercise the real SQLite catalog and the real filesystem mirror
//! without touching anything outside a tempdir.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use texture_db::test_fixtures::TestProfile;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let fixture = TestProfile::new().await;
//!     let subject = fixture.binder.create_subject("Calculus").await.unwrap();
//!     // tempdir is cleaned up when the fixture drops
//! }
//! ```

use std::path::PathBuf;

use crate::binder::Binder;
use crate::profile::Profile;

/// A binder over a freshly created profile in a tempdir.
pub struct TestProfile {
    pub binder: Binder,
    pub root: PathBuf,
    // held for its Drop
    _tmp: tempfile::TempDir,
}

impl TestProfile {
    pub async fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create tempdir");
        let root = tmp.path().to_path_buf();

        let profile = Profile::create(&root).await.expect("create profile");
        let binder = Binder::open(profile).await.expect("open binder");

        Self {
            binder,
            root,
            _tmp: tmp,
        }
    }

    /// Path of the directory mirroring a subject, for tests that sabotage
    /// the mirror by hand.
    pub fn subject_dir(&self, slug: &str) -> PathBuf {
        self.binder.layout().subject_dir(slug)
    }

    /// Path of the file mirroring a note.
    pub fn note_path(&self, subject_slug: &str, note_slug: &str) -> PathBuf {
        self.binder.layout().note_path(subject_slug, note_slug)
    }
}
