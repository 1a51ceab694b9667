//! Model card endpoints
//!
//! "Latest" returns the full card with system display fields; the
//! versions listing returns a projection only (no content), newest
//! first, and an empty list rather than 404 for a system without
//! cards.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::db::model_cards::{self, ModelCard, ModelCardVersion};
use crate::db::systems::AiSystem;
use crate::{ApiError, ApiResult, AppState};

/// Model card with its system's display fields
#[derive(Debug, Serialize)]
pub struct ModelCardResponse {
    #[serde(flatten)]
    pub card: ModelCard,
    pub system: AiSystem,
}

/// Version-history listing response
#[derive(Debug, Serialize)]
pub struct VersionListResponse {
    pub system_id: Uuid,
    pub versions: Vec<ModelCardVersion>,
}

/// GET /api/systems/:system_id/model-card/latest
pub async fn latest_model_card(
    State(state): State<AppState>,
    Path(system_id): Path<Uuid>,
) -> ApiResult<Json<ModelCardResponse>> {
    let found = model_cards::latest_for_system(&state.db, system_id)
        .await
        .map_err(|e| {
            error!("Failed to load latest model card for system {}: {}", system_id, e);
            ApiError::Internal("Failed to fetch model card".to_string())
        })?;

    match found {
        Some((card, system)) => Ok(Json(ModelCardResponse { card, system })),
        None => Err(ApiError::NotFound(format!(
            "No model card for system {}",
            system_id
        ))),
    }
}

/// GET /api/systems/:system_id/model-card/versions
pub async fn list_model_card_versions(
    State(state): State<AppState>,
    Path(system_id): Path<Uuid>,
) -> ApiResult<Json<VersionListResponse>> {
    let versions = model_cards::versions_for_system(&state.db, system_id)
        .await
        .map_err(|e| {
            error!("Failed to list model card versions for system {}: {}", system_id, e);
            ApiError::Internal("Failed to fetch model card versions".to_string())
        })?;

    Ok(Json(VersionListResponse { system_id, versions }))
}

/// Build model card routes
pub fn model_card_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/systems/:system_id/model-card/latest",
            get(latest_model_card),
        )
        .route(
            "/api/systems/:system_id/model-card/versions",
            get(list_model_card_versions),
        )
}
