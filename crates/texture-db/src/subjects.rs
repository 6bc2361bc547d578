//! Subject catalog store.
//!
//! All invariants on subject rows (name format, length, reserved keywords,
//! case-insensitive uniqueness, store-written timestamps) are enforced
//! here, at the storage boundary, so no caller can bypass them.

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use texture_core::{validate_subject_name, Error, Result, SortBy, Subject};

use crate::pool::{now_text, parse_datetime};

/// Trim applied to every subject name before validation, lookup, or error
/// reporting, matching what [`validate_subject_name`] strips on insert.
pub(crate) fn normalize_name(name: &str) -> &str {
    name.trim_matches(|c: char| c.is_whitespace() || c == '-')
}

pub(crate) fn map_subject_row(row: &SqliteRow) -> Result<Subject> {
    Ok(Subject {
        id: row.get("id"),
        name: row.get("name"),
        datetime_modified: parse_datetime(&row.get::<String, _>("datetime_modified"))?,
    })
}

fn order_clause(sort: SortBy) -> &'static str {
    match sort {
        SortBy::Id => "ORDER BY id ASC",
        SortBy::Name => "ORDER BY name COLLATE NOCASE ASC, id ASC",
        SortBy::Date => "ORDER BY datetime_modified ASC, id ASC",
    }
}

/// SQLite store for subject rows.
#[derive(Clone)]
pub struct SubjectStore {
    pool: SqlitePool,
}

impl SubjectStore {
    /// Create a new SubjectStore over the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a subject row, returning the stored row.
    ///
    /// Fails with [`Error::SubjectAlreadyExists`] when the name collides
    /// case-insensitively with an existing row, and with
    /// [`Error::InvalidSubjectName`] when validation rejects the name.
    pub async fn insert(&self, name: &str) -> Result<Subject> {
        let name = validate_subject_name(name)?;

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let row = sqlx::query(
            "INSERT INTO subjects (name, datetime_modified) VALUES (?, ?)
             RETURNING id, name, datetime_modified",
        )
        .bind(&name)
        .bind(now_text())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::SubjectAlreadyExists(name.clone())
            }
            _ => Error::Database(e),
        })?;

        let subject = map_subject_row(&row)?;
        tx.commit().await.map_err(Error::Database)?;

        Ok(subject)
    }

    /// Find a subject by display name (case-insensitive, per the uniqueness
    /// constraint on the column).
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Subject>> {
        let row = sqlx::query("SELECT id, name, datetime_modified FROM subjects WHERE name = ?")
            .bind(normalize_name(name))
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.as_ref().map(map_subject_row).transpose()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Subject>> {
        let row = sqlx::query("SELECT id, name, datetime_modified FROM subjects WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.as_ref().map(map_subject_row).transpose()
    }

    /// Find every subject whose name is in `names`.
    ///
    /// Bound parameters only; the requested-but-absent set is computed by
    /// the reconciliation layer from the difference.
    pub async fn find_by_names(&self, names: &[String], sort: SortBy) -> Result<Vec<Subject>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id, name, datetime_modified FROM subjects WHERE name IN (");
        let mut values = qb.separated(", ");
        for name in names {
            values.push_bind(name);
        }
        qb.push(") ");
        qb.push(order_clause(sort));

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        rows.iter().map(map_subject_row).collect()
    }

    /// List every subject row in the requested order (ascending, ties by id).
    pub async fn list(&self, sort: SortBy) -> Result<Vec<Subject>> {
        let sql = format!(
            "SELECT id, name, datetime_modified FROM subjects {}",
            order_clause(sort)
        );

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        rows.iter().map(map_subject_row).collect()
    }

    /// Delete a subject row. Child notes are removed by the `ON DELETE
    /// CASCADE` foreign key.
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM subjects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}
