//! Database connection pool management for the catalog.

use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

use texture_core::{Error, Result};

use crate::schema;

/// Default connection timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Text format of every `datetime_modified` column, written by the store
/// itself at insert time. Lexicographic order equals chronological order.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Open (and initialize) the catalog database at `db_path`.
///
/// The pool is capped at a single connection: the catalog is a single
/// shared mutable resource and every operation must observe a serialized
/// view, so the pool doubles as the single-writer lock.
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    let start = Instant::now();

    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))
        .map_err(Error::Database)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .connect_with(options)
        .await
        .map_err(Error::Database)?;

    schema::apply(&pool).await?;

    info!(
        subsystem = "db",
        component = "pool",
        op = "connect",
        duration_ms = start.elapsed().as_millis() as u64,
        path = %db_path.display(),
        "Opened catalog database"
    );

    Ok(pool)
}

/// Current time in the catalog's timestamp format.
pub(crate) fn now_text() -> String {
    chrono::Utc::now().format(DATETIME_FORMAT).to_string()
}

/// Parse a catalog timestamp column back into a `NaiveDateTime`.
///
/// The format is a store-level constraint; a row that fails to parse is a
/// corrupted catalog, not caller error.
pub(crate) fn parse_datetime(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .map_err(|e| Error::Internal(format!("malformed catalog timestamp {:?}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_text_round_trips() {
        let text = now_text();
        let parsed = parse_datetime(&text).unwrap();
        assert_eq!(parsed.format(DATETIME_FORMAT).to_string(), text);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(parse_datetime("not a date").is_err());
        assert!(parse_datetime("2024-13-40 99:99:99").is_err());
    }

    #[tokio::test]
    async fn test_connect_creates_and_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("notes.db");

        let pool = connect(&db_path).await.unwrap();
        drop(pool);
        assert!(db_path.is_file());

        // schema application is idempotent on reopen
        let pool = connect(&db_path).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subjects")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
