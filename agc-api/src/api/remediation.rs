//! Remediation action update endpoint
//!
//! `PUT /api/remediation-actions/:id` overwrites the action's mutable
//! fields. Dates arrive as text and are validated before any store
//! call; a null or absent nullable field clears the stored value.
//! Completing an action may cascade into the parent bias test (see
//! `db::remediation::update_action`).

use agc_common::types::{parse_external_date, RemediationStatus};
use axum::{
    extract::{Path, State},
    routing::put,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::db::remediation::{self, ActionUpdate, RemediationAction};
use crate::{ApiError, ApiResult, AppState};

/// Request payload for updating a remediation action
///
/// `status` is required; every other field is nullable and replaces
/// the stored value (null clears it).
#[derive(Debug, Deserialize)]
pub struct UpdateActionRequest {
    pub status: RemediationStatus,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completion_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn parse_optional_date(raw: &Option<String>) -> ApiResult<Option<NaiveDate>> {
    raw.as_deref()
        .map(parse_external_date)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// PUT /api/remediation-actions/:id
pub async fn update_remediation_action(
    State(state): State<AppState>,
    Path(action_id): Path<Uuid>,
    Json(payload): Json<UpdateActionRequest>,
) -> ApiResult<Json<RemediationAction>> {
    // Validate dates up front so malformed input is a 400, not a
    // failure inside the store call
    let update = ActionUpdate {
        status: payload.status,
        assigned_to: payload.assigned_to,
        priority: payload.priority,
        due_date: parse_optional_date(&payload.due_date)?,
        completion_date: parse_optional_date(&payload.completion_date)?,
        notes: payload.notes,
    };

    let updated = remediation::update_action(&state.db, action_id, &update)
        .await
        .map_err(|e| {
            error!("Failed to update remediation action {}: {}", action_id, e);
            ApiError::Internal("Failed to update remediation action".to_string())
        })?;

    match updated {
        Some(action) => Ok(Json(action)),
        None => Err(ApiError::NotFound(format!(
            "Remediation action {} not found",
            action_id
        ))),
    }
}

/// Build remediation routes
pub fn remediation_routes() -> Router<AppState> {
    Router::new().route(
        "/api/remediation-actions/:id",
        put(update_remediation_action),
    )
}
