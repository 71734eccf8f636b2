//! Entry HTTP Routes
//!
//! CRUD endpoints for time entries under /api/entries.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::store::models::Entry;
use crate::validation::{
    parse_id, validate_create, validate_list_params, validate_update, CreateEntryRequest,
    UpdateEntryRequest,
};

use super::responses::{entry_not_found, store_error, validation_error, HandlerError};
use super::server::ApiState;

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub success: bool,
    pub data: Entry,
}

#[derive(Debug, Serialize)]
pub struct EntryListResponse {
    pub success: bool,
    pub data: Vec<Entry>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    pub id: i64,
}

/// Raw list query parameters; validated (and defaulted) before use.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub project: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

// ==================
// Entry Routes
// ==================

/// Create entry routes
pub fn entry_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/entries", post(create_entry_handler))
        .route("/entries", get(list_entries_handler))
        .route(
            "/entries/{id}",
            get(get_entry_handler)
                .patch(update_entry_handler)
                .delete(delete_entry_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn create_entry_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<EntryResponse>), HandlerError> {
    let new_entry = validate_create(&request).map_err(validation_error)?;
    let entry = state.store.create(new_entry).await.map_err(store_error)?;

    Ok((
        StatusCode::CREATED,
        Json(EntryResponse {
            success: true,
            data: entry,
        }),
    ))
}

async fn list_entries_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<EntryListResponse>, HandlerError> {
    let filter = validate_list_params(query.project, query.limit, query.offset)
        .map_err(validation_error)?;
    let entries = state.store.list(&filter).await.map_err(store_error)?;

    Ok(Json(EntryListResponse {
        success: true,
        count: entries.len(),
        data: entries,
    }))
}

async fn get_entry_handler(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<EntryResponse>, HandlerError> {
    let id = parse_id(&id).map_err(validation_error)?;
    let entry = state
        .store
        .get(id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| entry_not_found(id))?;

    Ok(Json(EntryResponse {
        success: true,
        data: entry,
    }))
}

async fn update_entry_handler(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateEntryRequest>,
) -> Result<Json<EntryResponse>, HandlerError> {
    let id = parse_id(&id).map_err(validation_error)?;

    // Existence first, so a bad id reads as 404 rather than a failed write.
    let existing = state
        .store
        .get(id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| entry_not_found(id))?;

    let patch = validate_update(&request, &existing).map_err(validation_error)?;
    let updated = state
        .store
        .update(id, &patch)
        .await
        .map_err(store_error)?
        .ok_or_else(|| entry_not_found(id))?;

    Ok(Json(EntryResponse {
        success: true,
        data: updated,
    }))
}

async fn delete_entry_handler(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, HandlerError> {
    let id = parse_id(&id).map_err(validation_error)?;

    if state.store.get(id).await.map_err(store_error)?.is_none() {
        return Err(entry_not_found(id));
    }

    let deleted = state.store.delete(id).await.map_err(store_error)?;
    if !deleted {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to delete entry" })),
        ));
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: "Entry deleted successfully".to_string(),
        id,
    }))
}
