//! Statistics HTTP Routes
//!
//! Per-project aggregate totals under /api/stats.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::models::ProjectStats;

use super::responses::{store_error, HandlerError};
use super::server::ApiState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub data: Vec<ProjectStatsBody>,
    pub count: usize,
}

/// Wire shape of one aggregate row. Hours are rounded to two decimals;
/// sub-second precision is not part of the contract.
#[derive(Debug, Serialize)]
pub struct ProjectStatsBody {
    pub project: String,
    pub total_entries: i64,
    pub total_hours: f64,
    pub first_entry: DateTime<Utc>,
    pub last_entry: DateTime<Utc>,
}

impl From<ProjectStats> for ProjectStatsBody {
    fn from(stats: ProjectStats) -> Self {
        Self {
            project: stats.project,
            total_entries: stats.total_entries,
            total_hours: (stats.total_hours * 100.0).round() / 100.0,
            first_entry: stats.first_entry,
            last_entry: stats.last_entry,
        }
    }
}

/// Create stats routes
pub fn stats_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/stats", get(stats_handler))
        .with_state(state)
}

async fn stats_handler(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<StatsResponse>, HandlerError> {
    let stats = state.store.stats_by_project().await.map_err(store_error)?;
    let data: Vec<ProjectStatsBody> = stats.into_iter().map(ProjectStatsBody::from).collect();

    Ok(Json(StatsResponse {
        success: true,
        count: data.len(),
        data,
    }))
}
