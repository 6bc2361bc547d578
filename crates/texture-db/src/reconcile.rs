//! Reconciliation between the catalog and the filesystem mirror.
//!
//! Every read path goes through here: after a row is retrieved, the mirror
//! is probed for the corresponding artifact. A row whose artifact is gone
//! is "dangling": it is deleted from the catalog (unless the caller opted
//! out of repair) and the condition is surfaced to the caller rather than
//! silently dropped. Repair is strictly one-way: the catalog is repaired
//! toward the disk, never the other way around. Artifacts without rows are
//! simply invisible to the catalog.
//!
//! Store-level errors pass through this layer untouched.

use tracing::warn;

use texture_core::{
    Error, LookupOptions, Note, NoteListing, Result, SortBy, Subject, SubjectListing,
};

use crate::mirror::Mirror;
use crate::notes::NoteStore;
use crate::subjects::{normalize_name, SubjectStore};

/// Outcome of a reconciled single-entity lookup.
///
/// The transition logic is the same for subjects and notes: a row with its
/// artifact is `Found` (terminal success), a row without its artifact is
/// `Dangling` (repair then terminal failure), and no row at all is
/// `NotFound` (terminal failure, nothing to repair).
#[derive(Debug, Clone)]
pub enum Lookup<T> {
    Found(T),
    Dangling(T),
    NotFound,
}

/// The invariant-keeper between catalog rows and mirrored artifacts.
#[derive(Clone)]
pub struct Reconciler {
    subjects: SubjectStore,
    notes: NoteStore,
    mirror: Mirror,
}

impl Reconciler {
    pub fn new(subjects: SubjectStore, notes: NoteStore, mirror: Mirror) -> Self {
        Self {
            subjects,
            notes,
            mirror,
        }
    }

    // ========================================================================
    // Subjects
    // ========================================================================

    /// Probe a retrieved subject row against the mirror, repairing the
    /// catalog when the directory is gone.
    async fn probe_subject(&self, subject: Subject, opts: LookupOptions) -> Result<Lookup<Subject>> {
        if self.mirror.subject_dir_exists(&subject.slug()).await {
            return Ok(Lookup::Found(subject));
        }

        if opts.auto_repair {
            self.subjects.delete(subject.id).await?;
            warn!(
                subsystem = "db",
                component = "reconcile",
                subject_id = subject.id,
                name = %subject.name,
                "Repaired dangling subject row (directory missing on disk)"
            );
        }

        Ok(Lookup::Dangling(subject))
    }

    /// Reconciled lookup of a subject by display name.
    pub async fn lookup_subject(&self, name: &str, opts: LookupOptions) -> Result<Lookup<Subject>> {
        match self.subjects.find_by_name(name).await? {
            Some(subject) => self.probe_subject(subject, opts).await,
            None => Ok(Lookup::NotFound),
        }
    }

    /// Like [`lookup_subject`](Self::lookup_subject) but mapping the
    /// failure states to errors: repair happens first, the condition is
    /// reported regardless.
    pub async fn require_subject(&self, name: &str, opts: LookupOptions) -> Result<Subject> {
        match self.lookup_subject(name, opts).await? {
            Lookup::Found(subject) => Ok(subject),
            Lookup::Dangling(subject) => Err(Error::DanglingSubject(subject)),
            Lookup::NotFound => Err(Error::SubjectNotFound(normalize_name(name).to_string())),
        }
    }

    pub async fn require_subject_by_id(&self, id: i64, opts: LookupOptions) -> Result<Subject> {
        let subject = self
            .subjects
            .find_by_id(id)
            .await?
            .ok_or(Error::SubjectIdNotFound(id))?;

        match self.probe_subject(subject, opts).await? {
            Lookup::Found(subject) => Ok(subject),
            Lookup::Dangling(subject) => Err(Error::DanglingSubject(subject)),
            Lookup::NotFound => unreachable!("probe never yields NotFound for a retrieved row"),
        }
    }

    /// Reconciled lookup of a set of subjects by name.
    ///
    /// The result is partitioned three ways: consistent rows in the
    /// requested sort order, dangling rows (repaired per the usual rule),
    /// and requested names with no row at all. In strict mode a non-empty
    /// dangling or missing partition fails the whole call.
    pub async fn subjects_by_names(
        &self,
        names: &[String],
        sort: SortBy,
        opts: LookupOptions,
    ) -> Result<SubjectListing> {
        // deduplicate while preserving request order
        let mut requested: Vec<String> = Vec::new();
        for name in names {
            let name = normalize_name(name);
            if !requested.iter().any(|seen| seen == name) {
                requested.push(name.to_string());
            }
        }

        let rows = self.subjects.find_by_names(&requested, sort).await?;

        let mut listing = SubjectListing {
            missing: requested
                .iter()
                .filter(|name| !rows.iter().any(|row| row.name.eq_ignore_ascii_case(name)))
                .cloned()
                .collect(),
            ..Default::default()
        };

        for subject in rows {
            match self.probe_subject(subject, opts).await? {
                Lookup::Found(subject) => listing.found.push(subject),
                Lookup::Dangling(subject) => listing.dangling.push(subject),
                Lookup::NotFound => {}
            }
        }

        if opts.strict && !listing.is_clean() {
            return Err(Error::MultipleSubjects {
                missing: listing.missing,
                dangling: listing.dangling,
            });
        }

        Ok(listing)
    }

    /// Reconciled listing of every subject in the catalog. The `missing`
    /// partition is always empty for list-all queries.
    pub async fn all_subjects(&self, sort: SortBy, opts: LookupOptions) -> Result<SubjectListing> {
        let rows = self.subjects.list(sort).await?;

        let mut listing = SubjectListing::default();
        for subject in rows {
            match self.probe_subject(subject, opts).await? {
                Lookup::Found(subject) => listing.found.push(subject),
                Lookup::Dangling(subject) => listing.dangling.push(subject),
                Lookup::NotFound => {}
            }
        }

        if opts.strict && !listing.dangling.is_empty() {
            return Err(Error::MultipleSubjects {
                missing: Vec::new(),
                dangling: listing.dangling,
            });
        }

        Ok(listing)
    }

    // ========================================================================
    // Notes
    // ========================================================================

    async fn probe_note(
        &self,
        subject: &Subject,
        note: Note,
        opts: LookupOptions,
    ) -> Result<Lookup<Note>> {
        if self
            .mirror
            .note_file_exists(&subject.slug(), &note.slug())
            .await
        {
            return Ok(Lookup::Found(note));
        }

        if opts.auto_repair {
            self.notes.delete(note.id).await?;
            warn!(
                subsystem = "db",
                component = "reconcile",
                note_id = note.id,
                subject_id = subject.id,
                title = %note.title,
                "Repaired dangling note row (file missing on disk)"
            );
        }

        Ok(Lookup::Dangling(note))
    }

    /// Reconciled lookup of a note by title under an already reconciled
    /// subject.
    pub async fn lookup_note(
        &self,
        subject: &Subject,
        title: &str,
        opts: LookupOptions,
    ) -> Result<Lookup<Note>> {
        match self.notes.find(subject.id, title).await? {
            Some(note) => self.probe_note(subject, note, opts).await,
            None => Ok(Lookup::NotFound),
        }
    }

    pub async fn require_note(
        &self,
        subject: &Subject,
        title: &str,
        opts: LookupOptions,
    ) -> Result<Note> {
        match self.lookup_note(subject, title, opts).await? {
            Lookup::Found(note) => Ok(note),
            Lookup::Dangling(note) => Err(Error::DanglingNote(note)),
            Lookup::NotFound => Err(Error::NoteNotFound {
                subject: subject.name.clone(),
                title: title.trim().to_string(),
            }),
        }
    }

    /// Reconciled lookup of a note by id. The owning subject is reconciled
    /// first; a dangling subject fails the lookup before the note file is
    /// ever probed.
    pub async fn require_note_by_id(
        &self,
        id: i64,
        opts: LookupOptions,
    ) -> Result<(Subject, Note)> {
        let note = self
            .notes
            .find_by_id(id)
            .await?
            .ok_or(Error::NoteIdNotFound(id))?;

        let subject = self.require_subject_by_id(note.subject_id, opts).await?;

        match self.probe_note(&subject, note, opts).await? {
            Lookup::Found(note) => Ok((subject, note)),
            Lookup::Dangling(note) => Err(Error::DanglingNote(note)),
            Lookup::NotFound => unreachable!("probe never yields NotFound for a retrieved row"),
        }
    }

    /// Reconciled listing of every note under an already reconciled
    /// subject. The `missing` partition is always empty here; notes are
    /// never looked up by title set.
    pub async fn notes_for_subject(
        &self,
        subject: &Subject,
        sort: SortBy,
        opts: LookupOptions,
    ) -> Result<NoteListing> {
        let rows = self.notes.list(subject.id, sort).await?;

        let mut listing = NoteListing::default();
        for note in rows {
            match self.probe_note(subject, note, opts).await? {
                Lookup::Found(note) => listing.found.push(note),
                Lookup::Dangling(note) => listing.dangling.push(note),
                Lookup::NotFound => {}
            }
        }

        if opts.strict && !listing.dangling.is_empty() {
            return Err(Error::DanglingNotes(listing.dangling));
        }

        Ok(listing)
    }
}
