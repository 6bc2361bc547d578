//! Filesystem mirror of the catalog.
//!
//! Translates subject and note rows into their expected on-disk locations
//! and performs the physical create/delete operations that must stay
//! consistent with the catalog. Deletions are best-effort: an already
//! absent target is not an error.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use texture_core::models::NOTE_FILE_EXTENSION;
use texture_core::{defaults, Error, Result};

/// Path layout of a binder profile.
#[derive(Debug, Clone)]
pub struct Layout {
    profile: PathBuf,
}

impl Layout {
    /// Create a layout rooted at an existing (or to-be-created) profile
    /// directory.
    pub fn new(profile: impl Into<PathBuf>) -> Self {
        Self {
            profile: profile.into(),
        }
    }

    pub fn profile(&self) -> &Path {
        &self.profile
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.profile.join(defaults::NOTES_DIRECTORY_NAME)
    }

    pub fn styles_dir(&self) -> PathBuf {
        self.profile.join(defaults::STYLES_DIRECTORY_NAME)
    }

    /// The catalog database, at the profile root next to the latexmkrc.
    pub fn db_path(&self) -> PathBuf {
        self.profile.join(defaults::NOTES_DB_FILENAME)
    }

    /// The shared latexmkrc at the profile root, linked into every subject
    /// directory.
    pub fn latexmkrc_path(&self) -> PathBuf {
        self.profile.join(defaults::LATEXMKRC_FILENAME)
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.profile.join(defaults::PREFERENCES_FILENAME)
    }

    /// Directory mirroring a subject row.
    pub fn subject_dir(&self, subject_slug: &str) -> PathBuf {
        self.notes_dir().join(subject_slug)
    }

    /// File mirroring a note row.
    pub fn note_path(&self, subject_slug: &str, note_slug: &str) -> PathBuf {
        self.subject_dir(subject_slug)
            .join(format!("{}.{}", note_slug, NOTE_FILE_EXTENSION))
    }

    /// Figure stub inside a subject's graphics directory.
    pub fn figure_path(&self, subject_slug: &str, figure_slug: &str) -> PathBuf {
        self.subject_dir(subject_slug)
            .join(defaults::GRAPHICS_DIRECTORY_NAME)
            .join(format!("{}.{}", figure_slug, defaults::FIGURE_FILE_EXTENSION))
    }

    /// Path of the per-subject aggregate document.
    pub fn main_note_path(&self, subject_slug: &str) -> PathBuf {
        self.subject_dir(subject_slug)
            .join(format!("{}.{}", defaults::MAIN_NOTE_STEM, NOTE_FILE_EXTENSION))
    }
}

/// Performs the physical filesystem operations for a layout.
#[derive(Debug, Clone)]
pub struct Mirror {
    layout: Layout,
}

impl Mirror {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Whether the directory mirroring `subject_slug` exists.
    ///
    /// Directory existence is the only disk check at the subject level;
    /// the auxiliary files inside are not part of the consistency probe.
    pub async fn subject_dir_exists(&self, subject_slug: &str) -> bool {
        fs::metadata(self.layout.subject_dir(subject_slug))
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    /// Whether the file mirroring a note exists.
    pub async fn note_file_exists(&self, subject_slug: &str, note_slug: &str) -> bool {
        fs::metadata(self.layout.note_path(subject_slug, note_slug))
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// Create the directory tree for a subject: the directory itself, a
    /// `graphics/` subdirectory, a bibliography stub, and a link to the
    /// shared latexmkrc. Idempotent when the tree is already present.
    pub async fn create_subject_tree(&self, subject_slug: &str) -> Result<()> {
        let subject_dir = self.layout.subject_dir(subject_slug);

        fs::create_dir_all(subject_dir.join(defaults::GRAPHICS_DIRECTORY_NAME))
            .await
            .map_err(Error::Io)?;

        let bibfile = subject_dir.join(defaults::BIBLIOGRAPHY_FILENAME);
        if fs::metadata(&bibfile).await.is_err() {
            fs::write(&bibfile, b"").await.map_err(Error::Io)?;
        }

        self.link_latexmkrc(&subject_dir).await?;

        debug!(
            subsystem = "mirror",
            op = "create_subject_tree",
            slug = subject_slug,
            "Created subject tree"
        );

        Ok(())
    }

    /// Link the profile's shared latexmkrc into a subject directory.
    ///
    /// The link target is relative (`../../latexmkrc`) so the profile stays
    /// relocatable. Platforms or filesystems refusing symlinks get a plain
    /// copy instead.
    async fn link_latexmkrc(&self, subject_dir: &Path) -> Result<()> {
        let link = subject_dir.join(defaults::LATEXMKRC_FILENAME);

        // replace a stale regular file, keep an existing link
        match fs::symlink_metadata(&link).await {
            Ok(meta) if meta.is_symlink() => return Ok(()),
            Ok(_) => fs::remove_file(&link).await.map_err(Error::Io)?,
            Err(_) => {}
        }

        let relative_target = Path::new("..").join("..").join(defaults::LATEXMKRC_FILENAME);

        #[cfg(unix)]
        let linked = fs::symlink(&relative_target, &link).await;
        #[cfg(windows)]
        let linked = fs::symlink_file(&relative_target, &link).await;

        if let Err(e) = linked {
            warn!(
                subsystem = "mirror",
                op = "link_latexmkrc",
                error = %e,
                "Symlink refused, copying shared latexmkrc instead"
            );
            fs::copy(self.layout.latexmkrc_path(), &link)
                .await
                .map_err(Error::Io)?;
        }

        Ok(())
    }

    /// Write `content` to a note file.
    ///
    /// An existing file is never truncated unless `force` is set; creating
    /// a note over a file someone wrote by hand keeps their content.
    pub async fn create_note_file(&self, path: &Path, content: &str, force: bool) -> Result<()> {
        if !force && fs::metadata(path).await.is_ok() {
            debug!(
                subsystem = "mirror",
                op = "create_note_file",
                path = %path.display(),
                "Note file already present, keeping existing content"
            );
            return Ok(());
        }

        fs::write(path, content).await.map_err(Error::Io)
    }

    /// Write a blank figure canvas into a subject's graphics directory.
    ///
    /// A figure someone already drew into is kept as-is; only absent stubs
    /// are created.
    pub async fn create_figure_file(&self, subject_slug: &str, figure_slug: &str) -> Result<PathBuf> {
        let path = self.layout.figure_path(subject_slug, figure_slug);
        if fs::metadata(&path).await.is_err() {
            fs::write(&path, defaults::SVG_FIGURE_TEMPLATE)
                .await
                .map_err(Error::Io)?;
        }
        Ok(path)
    }

    /// Remove a subject's directory tree. Best-effort; an absent tree is
    /// not an error.
    pub async fn remove_subject_tree(&self, subject_slug: &str) -> Result<()> {
        match fs::remove_dir_all(self.layout.subject_dir(subject_slug)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Remove a note's file. Best-effort; an absent file is not an error.
    pub async fn remove_note_file(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}
