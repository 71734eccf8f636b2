//! Entry store backed by SQLite.
//!
//! Owns the single `entries` table. The schema carries a
//! `CHECK (end_time > start_time)` constraint so the temporal invariant
//! holds at rest, independent of the validation layer upstream.

pub mod errors;
pub mod models;

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{QueryBuilder, SqlitePool};
use tracing::info;

use errors::{StoreError, StoreResult};
use models::{Entry, EntryPatch, ListFilter, NewEntry, ProjectStats};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    start_time DATETIME NOT NULL,
    end_time DATETIME NOT NULL,
    project TEXT NOT NULL,
    notes TEXT,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL,
    CHECK (end_time > start_time)
);
CREATE INDEX IF NOT EXISTS idx_project ON entries(project);
CREATE INDEX IF NOT EXISTS idx_start_time ON entries(start_time);";

/// Handle to the entries database.
///
/// Cheap to clone; all operations go through the shared connection pool.
#[derive(Clone)]
pub struct EntryStore {
    pool: SqlitePool,
}

impl EntryStore {
    /// Opens (creating if missing) the database at `db_path` and ensures
    /// the schema exists. Idempotent.
    pub async fn open(db_path: &Path) -> StoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let opts = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&pool).await?;
        }

        info!("database ready at {}", db_path.display());
        Ok(Self { pool })
    }

    /// Inserts a new entry and returns the stored row, generated id and
    /// timestamps included.
    pub async fn create(&self, entry: NewEntry) -> StoreResult<Entry> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO entries (start_time, end_time, project, notes, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(entry.start_time)
        .bind(entry.end_time)
        .bind(&entry.project)
        .bind(&entry.notes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(constraint_or_sqlx)?;

        let id = result.last_insert_rowid();
        let row = self.get(id).await?.ok_or(sqlx::Error::RowNotFound)?;
        Ok(row)
    }

    /// Fetches a single entry by id.
    pub async fn get(&self, id: i64) -> StoreResult<Option<Entry>> {
        let row = sqlx::query_as::<_, Entry>("SELECT * FROM entries WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Lists entries, most recent start first. Filter, ordering, then
    /// limit/offset.
    pub async fn list(&self, filter: &ListFilter) -> StoreResult<Vec<Entry>> {
        let rows = match &filter.project {
            Some(project) => {
                sqlx::query_as::<_, Entry>(
                    "SELECT * FROM entries WHERE project = ? \
                     ORDER BY start_time DESC LIMIT ? OFFSET ?",
                )
                .bind(project)
                .bind(filter.limit)
                .bind(filter.offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Entry>(
                    "SELECT * FROM entries ORDER BY start_time DESC LIMIT ? OFFSET ?",
                )
                .bind(filter.limit)
                .bind(filter.offset)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// Applies a partial update. Fields absent from the patch keep their
    /// stored values; `updated_at` refreshes on any accepted change. A
    /// write that would violate the CHECK constraint fails with
    /// `ConstraintViolation` and mutates nothing.
    pub async fn update(&self, id: i64, patch: &EntryPatch) -> StoreResult<Option<Entry>> {
        if patch.is_empty() {
            return self.get(id).await;
        }

        let mut qb = QueryBuilder::new("UPDATE entries SET ");
        {
            let mut sep = qb.separated(", ");
            if let Some(start_time) = patch.start_time {
                sep.push("start_time = ").push_bind_unseparated(start_time);
            }
            if let Some(end_time) = patch.end_time {
                sep.push("end_time = ").push_bind_unseparated(end_time);
            }
            if let Some(project) = &patch.project {
                sep.push("project = ").push_bind_unseparated(project.clone());
            }
            if let Some(notes) = &patch.notes {
                sep.push("notes = ").push_bind_unseparated(notes.clone());
            }
            sep.push("updated_at = ").push_bind_unseparated(Utc::now());
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);

        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(constraint_or_sqlx)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    /// Removes an entry. Returns whether a row existed. Idempotent;
    /// "not found" semantics belong to the handler layer.
    pub async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Per-project totals, busiest projects first. Hours come from
    /// SQLite julian-day arithmetic on the stored timestamps.
    pub async fn stats_by_project(&self) -> StoreResult<Vec<ProjectStats>> {
        let rows = sqlx::query_as::<_, ProjectStats>(
            "SELECT project, \
                    COUNT(*) AS total_entries, \
                    SUM((julianday(end_time) - julianday(start_time)) * 24.0) AS total_hours, \
                    MIN(start_time) AS first_entry, \
                    MAX(end_time) AS last_entry \
             FROM entries \
             GROUP BY project \
             ORDER BY total_hours DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Cheap liveness probe used by the health endpoint.
    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes the connection pool. Idempotent.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn constraint_or_sqlx(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.message().contains("CHECK constraint failed") => {
            StoreError::ConstraintViolation
        }
        _ => StoreError::Sqlx(e),
    }
}
