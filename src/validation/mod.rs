//! Input validation for entry requests.
//!
//! Validation happens before anything reaches the store. Failures are
//! collected per field and returned together rather than short-circuiting
//! on the first violation. The `end_time > start_time` rule is checked
//! here and again by the table's CHECK constraint; the two layers are
//! independent.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::store::models::{Entry, EntryPatch, ListFilter, NewEntry};

pub const PROJECT_MAX_LEN: usize = 255;
pub const NOTES_MAX_LEN: usize = 1000;
pub const LIST_DEFAULT_LIMIT: i64 = 100;
pub const LIST_MAX_LIMIT: i64 = 1000;

/// A single field-attributed validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Body of `POST /api/entries`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateEntryRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub project: Option<String>,
    pub notes: Option<String>,
}

/// Body of `PATCH /api/entries/{id}`.
///
/// `notes` distinguishes "absent" from an explicit null: null clears the
/// stored notes, absent leaves them untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEntryRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub project: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

fn double_option<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(de).map(Some)
}

/// Validates a create request, returning the typed insert input or the
/// full list of violations.
pub fn validate_create(req: &CreateEntryRequest) -> Result<NewEntry, Vec<FieldError>> {
    let mut errors = Vec::new();

    let start_time = match &req.start_time {
        Some(raw) => parse_timestamp("start_time", raw, &mut errors),
        None => {
            errors.push(FieldError::new("start_time", "start_time is required"));
            None
        }
    };
    let end_time = match &req.end_time {
        Some(raw) => parse_timestamp("end_time", raw, &mut errors),
        None => {
            errors.push(FieldError::new("end_time", "end_time is required"));
            None
        }
    };
    let project = match &req.project {
        Some(raw) => check_project(raw, &mut errors),
        None => {
            errors.push(FieldError::new("project", "project is required"));
            None
        }
    };
    let notes = match &req.notes {
        Some(raw) => check_notes(raw, &mut errors),
        None => None,
    };

    if let (Some(start), Some(end)) = (start_time, end_time) {
        check_order(start, end, &mut errors);
    }

    match (start_time, end_time, project) {
        (Some(start_time), Some(end_time), Some(project)) if errors.is_empty() => Ok(NewEntry {
            start_time,
            end_time,
            project,
            notes,
        }),
        _ => Err(errors),
    }
}

/// Validates a partial update against the stored entry.
///
/// Only supplied fields are validated; the temporal rule is evaluated on
/// the entry as it would look after the patch, so a lone `end_time` is
/// still checked against the stored `start_time` (and vice versa).
pub fn validate_update(
    req: &UpdateEntryRequest,
    existing: &Entry,
) -> Result<EntryPatch, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut patch = EntryPatch::default();

    if let Some(raw) = &req.start_time {
        patch.start_time = parse_timestamp("start_time", raw, &mut errors);
    }
    if let Some(raw) = &req.end_time {
        patch.end_time = parse_timestamp("end_time", raw, &mut errors);
    }
    if let Some(raw) = &req.project {
        patch.project = check_project(raw, &mut errors);
    }
    if let Some(notes) = &req.notes {
        patch.notes = match notes {
            Some(raw) => check_notes(raw, &mut errors).map(Some),
            None => Some(None),
        };
    }

    let start_known = req.start_time.is_none() || patch.start_time.is_some();
    let end_known = req.end_time.is_none() || patch.end_time.is_some();
    if (req.start_time.is_some() || req.end_time.is_some()) && start_known && end_known {
        let start = patch.start_time.unwrap_or(existing.start_time);
        let end = patch.end_time.unwrap_or(existing.end_time);
        check_order(start, end, &mut errors);
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

/// Validates list query parameters, applying defaults for absent ones.
pub fn validate_list_params(
    project: Option<String>,
    limit: Option<String>,
    offset: Option<String>,
) -> Result<ListFilter, Vec<FieldError>> {
    let mut errors = Vec::new();

    let limit = match limit.as_deref() {
        None => LIST_DEFAULT_LIMIT,
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if (1..=LIST_MAX_LIMIT).contains(&n) => n,
            Ok(_) => {
                errors.push(FieldError::new(
                    "limit",
                    format!("limit must be between 1 and {}", LIST_MAX_LIMIT),
                ));
                LIST_DEFAULT_LIMIT
            }
            Err(_) => {
                errors.push(FieldError::new("limit", "limit must be an integer"));
                LIST_DEFAULT_LIMIT
            }
        },
    };

    let offset = match offset.as_deref() {
        None => 0,
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n >= 0 => n,
            Ok(_) => {
                errors.push(FieldError::new(
                    "offset",
                    "offset must be greater than or equal to 0",
                ));
                0
            }
            Err(_) => {
                errors.push(FieldError::new("offset", "offset must be an integer"));
                0
            }
        },
    };

    if errors.is_empty() {
        Ok(ListFilter {
            project,
            limit,
            offset,
        })
    } else {
        Err(errors)
    }
}

/// Parses a path identifier. A non-integer id is a validation error,
/// not a missing entry.
pub fn parse_id(raw: &str) -> Result<i64, Vec<FieldError>> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| vec![FieldError::new("id", "id must be a valid integer")])
}

/// Accepts RFC 3339, or a naive date-time taken as UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    None
}

fn parse_timestamp(field: &str, raw: &str, errors: &mut Vec<FieldError>) -> Option<DateTime<Utc>> {
    match parse_datetime(raw) {
        Some(ts) => Some(ts),
        None => {
            errors.push(FieldError::new(
                field,
                format!("{} must be a valid ISO 8601 date", field),
            ));
            None
        }
    }
}

fn check_order(start: DateTime<Utc>, end: DateTime<Utc>, errors: &mut Vec<FieldError>) {
    if end <= start {
        errors.push(FieldError::new(
            "end_time",
            "end_time must be after start_time",
        ));
    }
}

fn check_project(raw: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new("project", "project cannot be empty"));
        return None;
    }
    if trimmed.chars().count() > PROJECT_MAX_LEN {
        errors.push(FieldError::new(
            "project",
            "project cannot exceed 255 characters",
        ));
        return None;
    }
    Some(trimmed.to_string())
}

fn check_notes(raw: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.chars().count() > NOTES_MAX_LEN {
        errors.push(FieldError::new(
            "notes",
            "notes cannot exceed 1000 characters",
        ));
        return None;
    }
    Some(trimmed.to_string())
}
