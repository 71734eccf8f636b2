//! Row and input types for the `entries` table.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A stored time entry.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Entry {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub project: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating an entry.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub project: String,
    pub notes: Option<String>,
}

/// Validated partial update.
///
/// `None` fields are left untouched; `notes: Some(None)` clears the
/// notes column.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub project: Option<String>,
    pub notes: Option<Option<String>>,
}

impl EntryPatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none()
            && self.end_time.is_none()
            && self.project.is_none()
            && self.notes.is_none()
    }
}

/// Filter and window for listing entries.
#[derive(Debug, Clone)]
pub struct ListFilter {
    pub project: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Per-project aggregate row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProjectStats {
    pub project: String,
    pub total_entries: i64,
    pub total_hours: f64,
    pub first_entry: DateTime<Utc>,
    pub last_entry: DateTime<Utc>,
}
