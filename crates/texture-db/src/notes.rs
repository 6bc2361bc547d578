//! Note catalog store.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use texture_core::{validate_note_title, Error, Note, Result, SortBy, Subject};

use crate::pool::{now_text, parse_datetime};

pub(crate) fn map_note_row(row: &SqliteRow) -> Result<Note> {
    Ok(Note {
        id: row.get("id"),
        subject_id: row.get("subject_id"),
        title: row.get("title"),
        datetime_modified: parse_datetime(&row.get::<String, _>("datetime_modified"))?,
    })
}

fn order_clause(sort: SortBy) -> &'static str {
    match sort {
        SortBy::Id => "ORDER BY id ASC",
        SortBy::Name => "ORDER BY title ASC, id ASC",
        SortBy::Date => "ORDER BY datetime_modified ASC, id ASC",
    }
}

/// SQLite store for note rows.
#[derive(Clone)]
pub struct NoteStore {
    pool: SqlitePool,
}

impl NoteStore {
    /// Create a new NoteStore over the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a note row under `subject`, returning the stored row.
    ///
    /// Title uniqueness is per subject: the same title may exist under two
    /// different subjects. The duplicate check runs inside the insert
    /// transaction (with the schema trigger as backstop), so the
    /// [`Error::NoteAlreadyExists`] condition can never race the insert on
    /// the single-connection pool.
    pub async fn insert(&self, subject: &Subject, title: &str) -> Result<Note> {
        let title = validate_note_title(title)?;

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM notes WHERE subject_id = ? AND title = ?")
                .bind(subject.id)
                .bind(&title)
                .fetch_optional(&mut *tx)
                .await
                .map_err(Error::Database)?;

        if existing.is_some() {
            return Err(Error::NoteAlreadyExists {
                subject: subject.name.clone(),
                title,
            });
        }

        let row = sqlx::query(
            "INSERT INTO notes (title, subject_id, datetime_modified) VALUES (?, ?, ?)
             RETURNING id, title, subject_id, datetime_modified",
        )
        .bind(&title)
        .bind(subject.id)
        .bind(now_text())
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::Database)?;

        let note = map_note_row(&row)?;
        tx.commit().await.map_err(Error::Database)?;

        Ok(note)
    }

    /// Find a note by exact title under the given subject.
    pub async fn find(&self, subject_id: i64, title: &str) -> Result<Option<Note>> {
        let row = sqlx::query(
            "SELECT id, title, subject_id, datetime_modified FROM notes
             WHERE subject_id = ? AND title = ?",
        )
        .bind(subject_id)
        .bind(title.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.as_ref().map(map_note_row).transpose()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Note>> {
        let row = sqlx::query(
            "SELECT id, title, subject_id, datetime_modified FROM notes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.as_ref().map(map_note_row).transpose()
    }

    /// List every note under a subject in the requested order (ascending,
    /// ties by id).
    pub async fn list(&self, subject_id: i64, sort: SortBy) -> Result<Vec<Note>> {
        let sql = format!(
            "SELECT id, title, subject_id, datetime_modified FROM notes WHERE subject_id = ? {}",
            order_clause(sort)
        );

        let rows = sqlx::query(&sql)
            .bind(subject_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        rows.iter().map(map_note_row).collect()
    }

    /// Delete a note row.
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}
