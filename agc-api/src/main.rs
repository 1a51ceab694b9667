//! agc-api - AI Governance Compliance API service
//!
//! Serves the compliance CRUD routes (EU AI Act assessments,
//! cross-framework analyses, model cards, bias tests, remediation
//! actions) over a shared SQLite database.

use agc_api::config::Cli;
use agc_api::AppState;
use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber before anything else
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting AGC compliance API (agc-api) v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = cli.resolve();
    info!("Database path: {}", config.database.display());

    let pool = match agc_common::db::init_database_pool(&config.database).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool);
    let app = agc_api::build_router(state);

    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("agc-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
