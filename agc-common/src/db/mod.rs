//! Database access for AGC services
//!
//! Opens the shared SQLite database and creates the compliance tables
//! on first run. Identities are TEXT uuids; dates and timestamps are
//! TEXT ISO-8601, which sorts correctly for "latest" queries.

use crate::error::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
///
/// Creates the parent directory and the database file when missing,
/// then creates any missing tables.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create compliance tables if they don't exist
///
/// Public so tests can apply the schema to in-memory pools.
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ai_systems (
            system_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            owners TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS eu_ai_act_assessments (
            assessment_id TEXT PRIMARY KEY,
            system_id TEXT NOT NULL,
            risk_category TEXT NOT NULL,
            status TEXT NOT NULL,
            summary TEXT,
            assessment_date TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cross_framework_analyses (
            analysis_id TEXT PRIMARY KEY,
            system_id TEXT NOT NULL,
            frameworks TEXT NOT NULL,
            gap_summary TEXT,
            analysis_date TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS model_cards (
            card_id TEXT PRIMARY KEY,
            system_id TEXT NOT NULL,
            card_version TEXT NOT NULL,
            status TEXT NOT NULL,
            content TEXT,
            updated_by TEXT,
            approved_by TEXT,
            approval_date TEXT,
            last_updated TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bias_tests (
            test_id TEXT PRIMARY KEY,
            system_id TEXT NOT NULL,
            name TEXT NOT NULL,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS remediation_actions (
            action_id TEXT PRIMARY KEY,
            test_id TEXT NOT NULL,
            title TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'PENDING',
            assigned_to TEXT,
            priority TEXT,
            due_date TEXT,
            completion_date TEXT,
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (compliance schema)");

    Ok(())
}
