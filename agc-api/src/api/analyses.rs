//! Cross-framework analysis endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::error;
use uuid::Uuid;

use crate::db::analyses::{self, Analysis};
use crate::{ApiError, ApiResult, AppState};

/// GET /api/systems/:system_id/cross-framework/latest
pub async fn latest_analysis(
    State(state): State<AppState>,
    Path(system_id): Path<Uuid>,
) -> ApiResult<Json<Analysis>> {
    let found = analyses::latest_for_system(&state.db, system_id)
        .await
        .map_err(|e| {
            error!("Failed to load latest analysis for system {}: {}", system_id, e);
            ApiError::Internal("Failed to fetch analysis".to_string())
        })?;

    match found {
        Some(analysis) => Ok(Json(analysis)),
        None => Err(ApiError::NotFound(format!(
            "No cross-framework analyses for system {}",
            system_id
        ))),
    }
}

/// Build analysis routes
pub fn analysis_routes() -> Router<AppState> {
    Router::new().route(
        "/api/systems/:system_id/cross-framework/latest",
        get(latest_analysis),
    )
}
