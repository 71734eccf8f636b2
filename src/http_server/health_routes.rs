//! Health HTTP Route
//!
//! Liveness endpoint at /health (outside the /api prefix). Reports
//! whether the store answers a trivial query.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use serde_json::json;
use tracing::warn;

use super::server::ApiState;

/// Create health routes
pub fn health_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    let timestamp = Utc::now().to_rfc3339();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": timestamp,
                "environment": state.environment,
                "database": "connected",
            })),
        ),
        Err(err) => {
            warn!("health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "error",
                    "timestamp": timestamp,
                    "error": "Database unavailable",
                })),
            )
        }
    }
}
