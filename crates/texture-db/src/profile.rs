//! Binder profile creation and discovery.
//!
//! A profile is the root directory structure holding one user's note
//! collection: the shared latexmkrc, the stylesheet directory, and the
//! notes tree with the catalog database inside.

use std::path::Path;

use tokio::fs;
use tracing::info;

use texture_core::{defaults, Error, Preferences, Result};

use crate::mirror::Layout;

/// An opened (or freshly created) profile: its layout plus the user's
/// preferences, loaded from the profile root.
#[derive(Debug, Clone)]
pub struct Profile {
    layout: Layout,
    preferences: Preferences,
}

impl Profile {
    /// Create a new profile under `root`.
    ///
    /// Lays down the profile directory, the shared latexmkrc, and the
    /// `styles/` and `notes/` directories. Fails with
    /// [`Error::ProfileAlreadyExists`] when anything (including a stale
    /// symlink) already occupies the profile path.
    pub async fn create(root: &Path) -> Result<Self> {
        let layout = Layout::new(root.join(defaults::PROFILE_DIRECTORY_NAME));

        if fs::symlink_metadata(layout.profile()).await.is_ok() {
            return Err(Error::ProfileAlreadyExists(root.display().to_string()));
        }

        fs::create_dir_all(layout.profile()).await.map_err(Error::Io)?;
        fs::write(layout.latexmkrc_path(), defaults::LATEXMKRC_TEMPLATE)
            .await
            .map_err(Error::Io)?;
        fs::create_dir(layout.styles_dir()).await.map_err(Error::Io)?;
        fs::create_dir(layout.notes_dir()).await.map_err(Error::Io)?;

        let preferences = Preferences::load(&layout.preferences_path())?;

        info!(
            subsystem = "db",
            component = "profile",
            op = "create",
            path = %layout.profile().display(),
            "Created binder profile"
        );

        Ok(Self {
            layout,
            preferences,
        })
    }

    /// Open the profile under `root`, failing with
    /// [`Error::ProfileNotFound`] when none exists there.
    pub async fn open(root: &Path) -> Result<Self> {
        let layout = Layout::new(root.join(defaults::PROFILE_DIRECTORY_NAME));

        let is_dir = fs::metadata(layout.profile())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(Error::ProfileNotFound(root.display().to_string()));
        }

        let preferences = Preferences::load(&layout.preferences_path())?;

        Ok(Self {
            layout,
            preferences,
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }
}
