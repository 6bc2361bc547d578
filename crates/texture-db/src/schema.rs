//! Catalog schema, applied idempotently at connect time.

use sqlx::SqlitePool;

use texture_core::{Error, Result};

/// Catalog schema for a binder profile.
///
/// Subject names are unique case-insensitively via `COLLATE NOCASE`. The
/// per-subject uniqueness of note titles is enforced by a BEFORE INSERT
/// trigger so that even raw inserts cannot produce duplicates; the store
/// additionally pre-checks inside its transaction to report the collision
/// as a typed condition. Format and keyword constraints on names live at
/// the store boundary (`texture_core::validate`), since SQLite has no
/// built-in regex.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS "subjects" (
    "id" INTEGER,
    "name" TEXT UNIQUE COLLATE NOCASE NOT NULL,
    "datetime_modified" TEXT NOT NULL,
    PRIMARY KEY("id"),
    CHECK(
        TYPEOF("name") == "text" AND
        LENGTH("name") <= 128 AND
        TYPEOF("datetime_modified") == "text"
    )
);

CREATE TABLE IF NOT EXISTS "notes" (
    "id" INTEGER,
    "title" TEXT NOT NULL,
    "subject_id" INTEGER NOT NULL,
    "datetime_modified" TEXT NOT NULL,
    PRIMARY KEY("id"),
    FOREIGN KEY("subject_id") REFERENCES "subjects"("id")
        ON DELETE CASCADE
        ON UPDATE CASCADE,
    CHECK(
        TYPEOF("title") == "text" AND
        LENGTH("title") <= 256 AND
        TYPEOF("datetime_modified") == "text"
    )
);

-- There may be notes with the same title under two different subjects,
-- but never under the same subject.
CREATE TRIGGER IF NOT EXISTS unique_note_title_per_subject
BEFORE INSERT ON notes
BEGIN
    SELECT
    CASE
        WHEN (SELECT COUNT(*) FROM notes WHERE subject_id == NEW.subject_id AND title == NEW.title) >= 1
            THEN RAISE(FAIL, "There's already a note with the same title under the specified subject.")
    END;
END;

CREATE INDEX IF NOT EXISTS notes_index ON "notes"("title", "subject_id");
"#;

/// Apply the catalog schema. Safe to run on every connect.
pub async fn apply(pool: &SqlitePool) -> Result<()> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(Error::Database)?;
    Ok(())
}
