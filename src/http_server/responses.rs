//! Shared error envelope helpers.
//!
//! Every failure leaves the API as `{error, ...}`; validation failures
//! carry a `details` list of `{field, message}` pairs.

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::error;

use crate::store::errors::StoreError;
use crate::validation::FieldError;

/// Error half of every handler result.
pub type HandlerError = (StatusCode, Json<Value>);

/// 400 envelope carrying the collected field violations.
pub fn validation_error(details: Vec<FieldError>) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Validation error",
            "details": details,
        })),
    )
}

/// 404 envelope echoing the requested id.
pub fn entry_not_found(id: i64) -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Entry not found",
            "id": id,
        })),
    )
}

/// Maps store failures onto the wire contract. The CHECK-constraint
/// backstop presents exactly like the upstream validation layer, so the
/// two independent checks look the same to clients.
pub fn store_error(err: StoreError) -> HandlerError {
    match err {
        StoreError::ConstraintViolation => validation_error(vec![FieldError::new(
            "end_time",
            "end_time must be after start_time",
        )]),
        other => {
            error!("store error: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": other.to_string() })),
            )
        }
    }
}
