//! The binder facade: public entity operations over the catalog, the
//! mirror, and the reconciliation layer.
//!
//! This is the surface the CLI layer consumes. Each verb composes the
//! stores and the mirror through the reconciler so that every returned
//! entity is a reconciled view, and every mutating sequence is ordered to
//! leave the system at worst dangling (and therefore self-healing on the
//! next lookup) if interrupted partway.

use std::path::PathBuf;

use chrono::Local;
use sqlx::SqlitePool;
use tracing::{info, warn};

use texture_core::templates::{document_vars, render};
use texture_core::{
    kebab_case, Error, LookupOptions, Note, NoteListing, Preferences, Result, SortBy, Subject,
    SubjectListing,
};

use crate::mirror::{Layout, Mirror};
use crate::notes::NoteStore;
use crate::pool;
use crate::profile::Profile;
use crate::reconcile::{Lookup, Reconciler};
use crate::subjects::SubjectStore;

/// Facade over one opened profile.
#[derive(Clone)]
pub struct Binder {
    pool: SqlitePool,
    preferences: Preferences,
    subjects: SubjectStore,
    notes: NoteStore,
    mirror: Mirror,
    reconciler: Reconciler,
}

impl Binder {
    /// Open the catalog of `profile` and build the operation surface.
    pub async fn open(profile: Profile) -> Result<Self> {
        let pool = pool::connect(&profile.layout().db_path()).await?;

        let subjects = SubjectStore::new(pool.clone());
        let notes = NoteStore::new(pool.clone());
        let mirror = Mirror::new(profile.layout().clone());
        let reconciler = Reconciler::new(subjects.clone(), notes.clone(), mirror.clone());

        Ok(Self {
            pool,
            preferences: profile.preferences().clone(),
            subjects,
            notes,
            mirror,
            reconciler,
        })
    }

    pub fn layout(&self) -> &Layout {
        self.mirror.layout()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Close the catalog connection. Dropping the binder also closes it;
    /// this just makes the lifecycle explicit for command-scoped use.
    pub async fn close(self) {
        self.pool.close().await;
    }

    // ========================================================================
    // Subjects
    // ========================================================================

    /// Add a subject: catalog row, then mirrored directory tree, then a
    /// reconciled re-fetch so the returned row is a verified view.
    ///
    /// The pre-check goes through the reconciled lookup; a row in any
    /// found state (consistent or dangling) means the subject already
    /// exists. Not-found is the only proceed condition.
    pub async fn create_subject(&self, name: &str) -> Result<Subject> {
        match self
            .reconciler
            .lookup_subject(name, LookupOptions::default())
            .await?
        {
            Lookup::NotFound => {}
            Lookup::Found(existing) | Lookup::Dangling(existing) => {
                return Err(Error::SubjectAlreadyExists(existing.name));
            }
        }

        let subject = self.subjects.insert(name).await?;
        self.mirror.create_subject_tree(&subject.slug()).await?;

        info!(
            subsystem = "db",
            op = "create_subject",
            subject_id = subject.id,
            name = %subject.name,
            "Added subject"
        );

        self.reconciler
            .require_subject(&subject.name, LookupOptions::default())
            .await
    }

    /// Reconciled lookup of a subject by display name.
    pub async fn get_subject(&self, name: &str, opts: LookupOptions) -> Result<Subject> {
        self.reconciler.require_subject(name, opts).await
    }

    pub async fn get_subject_by_id(&self, id: i64, opts: LookupOptions) -> Result<Subject> {
        self.reconciler.require_subject_by_id(id, opts).await
    }

    /// Reconciled lookup of a name set, partitioned into
    /// found/dangling/missing.
    pub async fn get_subjects(
        &self,
        names: &[String],
        sort: SortBy,
        opts: LookupOptions,
    ) -> Result<SubjectListing> {
        self.reconciler.subjects_by_names(names, sort, opts).await
    }

    /// Reconciled listing of every subject.
    pub async fn list_subjects(&self, sort: SortBy, opts: LookupOptions) -> Result<SubjectListing> {
        self.reconciler.all_subjects(sort, opts).await
    }

    /// Remove a subject. The row (and, through the cascade, its notes) is
    /// deleted first; the directory tree only goes when `delete_files` is
    /// set, and only after the catalog no longer references it.
    pub async fn remove_subject(&self, name: &str, delete_files: bool) -> Result<Subject> {
        let subject = self
            .reconciler
            .require_subject(name, LookupOptions::default())
            .await?;

        self.subjects.delete(subject.id).await?;
        if delete_files {
            self.mirror.remove_subject_tree(&subject.slug()).await?;
        }

        info!(
            subsystem = "db",
            op = "remove_subject",
            subject_id = subject.id,
            name = %subject.name,
            delete_files,
            "Removed subject"
        );

        Ok(subject)
    }

    /// Create blank figure canvases under a subject's graphics directory,
    /// one `graphics/<slug>.svg` per requested figure name. Figures already
    /// on disk keep their content; names that slug down to nothing are
    /// skipped. Returns the path of every requested figure that exists
    /// afterwards.
    pub async fn create_subject_graphics(
        &self,
        subject: &str,
        figures: &[String],
    ) -> Result<Vec<PathBuf>> {
        let subject = self
            .reconciler
            .require_subject(subject, LookupOptions::default())
            .await?;

        let mut paths = Vec::with_capacity(figures.len());
        for figure in figures {
            let slug = kebab_case(figure);
            if slug.is_empty() {
                warn!(
                    subsystem = "db",
                    op = "create_subject_graphics",
                    figure = %figure,
                    "Figure name has no usable characters, skipping"
                );
                continue;
            }
            paths.push(self.mirror.create_figure_file(&subject.slug(), &slug).await?);
        }

        info!(
            subsystem = "db",
            op = "create_subject_graphics",
            subject_id = subject.id,
            result_count = paths.len(),
            "Created figure stubs"
        );

        Ok(paths)
    }

    /// Remove every subject, returning the listing that drove the removal
    /// (dangling entries were already repaired by the listing itself).
    pub async fn remove_all_subjects(&self, delete_files: bool) -> Result<SubjectListing> {
        let listing = self
            .list_subjects(SortBy::Name, LookupOptions::default())
            .await?;

        for subject in &listing.found {
            self.subjects.delete(subject.id).await?;
            if delete_files {
                self.mirror.remove_subject_tree(&subject.slug()).await?;
            }
        }

        Ok(listing)
    }

    // ========================================================================
    // Notes
    // ========================================================================

    /// Add a note under a subject: catalog row, then boilerplate file,
    /// then a reconciled re-fetch.
    ///
    /// `force` truncates an existing file with fresh boilerplate; without
    /// it a file already on disk is adopted as-is.
    pub async fn create_note(&self, subject: &str, title: &str, force: bool) -> Result<Note> {
        let subject = self
            .reconciler
            .require_subject(subject, LookupOptions::default())
            .await?;

        match self
            .reconciler
            .lookup_note(&subject, title, LookupOptions::default())
            .await?
        {
            Lookup::NotFound => {}
            Lookup::Found(existing) | Lookup::Dangling(existing) => {
                return Err(Error::NoteAlreadyExists {
                    subject: subject.name,
                    title: existing.title,
                });
            }
        }

        let note = self.notes.insert(&subject, title).await?;

        let today = Local::now().date_naive();
        let content = render(
            &self.preferences.subfile_template,
            &document_vars(&note.title, &self.preferences.author, today),
        );
        let path = self.layout().note_path(&subject.slug(), &note.slug());
        self.mirror.create_note_file(&path, &content, force).await?;

        info!(
            subsystem = "db",
            op = "create_note",
            note_id = note.id,
            subject_id = subject.id,
            title = %note.title,
            "Added note"
        );

        self.reconciler
            .require_note(&subject, &note.title, LookupOptions::default())
            .await
    }

    /// Reconciled lookup of a note by title.
    pub async fn get_note(&self, subject: &str, title: &str, opts: LookupOptions) -> Result<Note> {
        let subject = self.reconciler.require_subject(subject, opts).await?;
        self.reconciler.require_note(&subject, title, opts).await
    }

    /// Reconciled lookup of a note by id, returning the owning subject
    /// alongside it.
    pub async fn get_note_by_id(&self, id: i64, opts: LookupOptions) -> Result<(Subject, Note)> {
        self.reconciler.require_note_by_id(id, opts).await
    }

    /// Reconciled listing of every note under a subject.
    pub async fn list_notes(
        &self,
        subject: &str,
        sort: SortBy,
        opts: LookupOptions,
    ) -> Result<NoteListing> {
        let subject = self.reconciler.require_subject(subject, opts).await?;
        self.reconciler.notes_for_subject(&subject, sort, opts).await
    }

    /// Remove a note. Row first; the file only goes when `delete_files`
    /// is set.
    pub async fn remove_note(&self, subject: &str, title: &str, delete_files: bool) -> Result<Note> {
        let subject = self
            .reconciler
            .require_subject(subject, LookupOptions::default())
            .await?;
        let note = self
            .reconciler
            .require_note(&subject, title, LookupOptions::default())
            .await?;

        self.notes.delete(note.id).await?;
        if delete_files {
            let path = self.layout().note_path(&subject.slug(), &note.slug());
            self.mirror.remove_note_file(&path).await?;
        }

        info!(
            subsystem = "db",
            op = "remove_note",
            note_id = note.id,
            subject_id = subject.id,
            delete_files,
            "Removed note"
        );

        Ok(note)
    }

    /// Remove every note under a subject.
    pub async fn remove_all_notes(&self, subject: &str, delete_files: bool) -> Result<NoteListing> {
        let subject = self
            .reconciler
            .require_subject(subject, LookupOptions::default())
            .await?;
        let listing = self
            .reconciler
            .notes_for_subject(&subject, SortBy::Name, LookupOptions::default())
            .await?;

        for note in &listing.found {
            self.notes.delete(note.id).await?;
            if delete_files {
                let path = self.layout().note_path(&subject.slug(), &note.slug());
                self.mirror.remove_note_file(&path).await?;
            }
        }

        Ok(listing)
    }

    /// Write the per-subject aggregate document (`main.tex`), pulling in
    /// every consistent note as a `\part`. An optional preface (or a
    /// `README.txt` in the subject directory) becomes a leading chapter;
    /// `${__subject__}` inside it is substituted with the subject name.
    pub async fn create_main_note(&self, subject: &str, preface: Option<&str>) -> Result<PathBuf> {
        let subject = self
            .reconciler
            .require_subject(subject, LookupOptions::default())
            .await?;
        let listing = self
            .reconciler
            .notes_for_subject(&subject, SortBy::Name, LookupOptions::default())
            .await?;

        let preface_text = match preface {
            Some(text) => Some(text.to_string()),
            None => {
                let readme = self.layout().subject_dir(&subject.slug()).join("README.txt");
                match tokio::fs::read_to_string(&readme).await {
                    Ok(text) => Some(text),
                    Err(_) => None,
                }
            }
        };
        let preface_block = preface_text
            .map(|text| {
                let mut vars = std::collections::HashMap::new();
                vars.insert("subject", subject.name.clone());
                format!("\\chapter{{Preface}}\n{}\n\\newpage\n", render(&text, &vars))
            })
            .unwrap_or_default();

        let mut main_content = String::new();
        for note in &listing.found {
            main_content.push_str(&format!(
                "\\part{{{}}}\n\\inputchilddocument{{{}}}\n\n",
                note.title,
                note.slug()
            ));
        }

        let today = Local::now().date_naive();
        let mut vars = document_vars(&subject.name, &self.preferences.author, today);
        vars.insert("preface", preface_block);
        vars.insert("main", main_content);

        let content = render(&self.preferences.main_template, &vars);
        let path = self.layout().main_note_path(&subject.slug());
        tokio::fs::write(&path, content).await.map_err(Error::Io)?;

        Ok(path)
    }
}
