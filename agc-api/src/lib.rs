//! agc-api library - AI governance compliance API service
//!
//! Exposes the router and application state for integration testing.

pub mod api;
pub mod config;
pub mod db;
pub mod error;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across HTTP handlers
///
/// Constructed once in `main` and handed to every handler through
/// axum's `State` extractor; there is no process-wide store handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::assessment_routes())
        .merge(api::analysis_routes())
        .merge(api::model_card_routes())
        .merge(api::remediation_routes())
        .merge(api::dashboard_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
