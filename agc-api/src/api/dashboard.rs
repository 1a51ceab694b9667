//! Bias-test dashboard endpoint (temporary)
//!
//! Returns a static empty payload while the reporting query set is
//! reworked; keeps the dashboard route stable for the UI in the
//! meantime.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_tests: i64,
    pub open_remediation_actions: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub status: String,
    pub tests: Vec<serde_json::Value>,
    pub summary: DashboardSummary,
}

/// GET /api/bias-tests/dashboard
///
/// TODO: aggregate real counts from bias_tests and remediation_actions
/// once the dashboard query set is finalized.
pub async fn bias_test_dashboard() -> Json<DashboardResponse> {
    Json(DashboardResponse {
        status: "ok".to_string(),
        tests: Vec::new(),
        summary: DashboardSummary {
            total_tests: 0,
            open_remediation_actions: 0,
        },
    })
}

/// Build dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/api/bias-tests/dashboard", get(bias_test_dashboard))
}
