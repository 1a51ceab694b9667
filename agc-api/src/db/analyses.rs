//! Cross-framework analysis records
//!
//! Read-only in this service; queried per system as "most recent by
//! analysis_date".

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// Cross-framework analysis record
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub analysis_id: Uuid,
    pub system_id: Uuid,
    /// Display string of the frameworks compared (e.g. "EU AI Act, NIST RMF")
    pub frameworks: String,
    pub gap_summary: Option<String>,
    pub analysis_date: NaiveDate,
}

impl Analysis {
    pub fn new(system_id: Uuid, frameworks: String, analysis_date: NaiveDate) -> Self {
        Self {
            analysis_id: Uuid::new_v4(),
            system_id,
            frameworks,
            gap_summary: None,
            analysis_date,
        }
    }
}

fn analysis_from_row(row: &SqliteRow) -> Result<Analysis> {
    let analysis_id: String = row.get("analysis_id");
    let system_id: String = row.get("system_id");
    let analysis_date: String = row.get("analysis_date");

    Ok(Analysis {
        analysis_id: Uuid::parse_str(&analysis_id)?,
        system_id: Uuid::parse_str(&system_id)?,
        frameworks: row.get("frameworks"),
        gap_summary: row.get("gap_summary"),
        analysis_date: NaiveDate::parse_from_str(&analysis_date, "%Y-%m-%d")?,
    })
}

/// Save analysis to database
pub async fn save_analysis(pool: &SqlitePool, analysis: &Analysis) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO cross_framework_analyses (
            analysis_id, system_id, frameworks, gap_summary, analysis_date, created_at
        ) VALUES (?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(analysis.analysis_id.to_string())
    .bind(analysis.system_id.to_string())
    .bind(&analysis.frameworks)
    .bind(&analysis.gap_summary)
    .bind(analysis.analysis_date.to_string())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load the most recent analysis for a system
///
/// Ties on analysis_date break deterministically by id descending.
pub async fn latest_for_system(pool: &SqlitePool, system_id: Uuid) -> Result<Option<Analysis>> {
    let row = sqlx::query(
        r#"
        SELECT analysis_id, system_id, frameworks, gap_summary, analysis_date
        FROM cross_framework_analyses
        WHERE system_id = ?
        ORDER BY analysis_date DESC, analysis_id DESC
        LIMIT 1
        "#,
    )
    .bind(system_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(analysis_from_row(&row)?)),
        None => Ok(None),
    }
}
