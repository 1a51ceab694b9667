//! EU AI Act assessment endpoints
//!
//! `GET /api/assessments/:id` returns one assessment with its system's
//! display fields; `GET /api/systems/:system_id/assessments/latest`
//! returns the most recent assessment for a system.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::db::assessments::{self, Assessment};
use crate::db::systems::AiSystem;
use crate::{ApiError, ApiResult, AppState};

/// Assessment with its system's display fields
#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub system: AiSystem,
}

/// GET /api/assessments/:id
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(assessment_id): Path<Uuid>,
) -> ApiResult<Json<AssessmentResponse>> {
    let found = assessments::load_with_system(&state.db, assessment_id)
        .await
        .map_err(|e| {
            error!("Failed to load assessment {}: {}", assessment_id, e);
            ApiError::Internal("Failed to fetch assessment".to_string())
        })?;

    match found {
        Some((assessment, system)) => Ok(Json(AssessmentResponse { assessment, system })),
        None => Err(ApiError::NotFound(format!(
            "Assessment {} not found",
            assessment_id
        ))),
    }
}

/// GET /api/systems/:system_id/assessments/latest
pub async fn latest_assessment(
    State(state): State<AppState>,
    Path(system_id): Path<Uuid>,
) -> ApiResult<Json<Assessment>> {
    let found = assessments::latest_for_system(&state.db, system_id)
        .await
        .map_err(|e| {
            error!("Failed to load latest assessment for system {}: {}", system_id, e);
            ApiError::Internal("Failed to fetch assessment".to_string())
        })?;

    match found {
        Some(assessment) => Ok(Json(assessment)),
        None => Err(ApiError::NotFound(format!(
            "No assessments for system {}",
            system_id
        ))),
    }
}

/// Build assessment routes
pub fn assessment_routes() -> Router<AppState> {
    Router::new()
        .route("/api/assessments/:id", get(get_assessment))
        .route(
            "/api/systems/:system_id/assessments/latest",
            get(latest_assessment),
        )
}
