//! EU AI Act assessment records
//!
//! Read-only in this service: assessments are produced by the
//! evaluation workflow and queried here by id or by owning system.

use crate::db::systems::AiSystem;
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// EU AI Act assessment record
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub assessment_id: Uuid,
    pub system_id: Uuid,
    pub risk_category: String,
    pub status: String,
    pub summary: Option<String>,
    pub assessment_date: NaiveDate,
}

impl Assessment {
    pub fn new(system_id: Uuid, risk_category: String, assessment_date: NaiveDate) -> Self {
        Self {
            assessment_id: Uuid::new_v4(),
            system_id,
            risk_category,
            status: "COMPLETED".to_string(),
            summary: None,
            assessment_date,
        }
    }
}

fn assessment_from_row(row: &SqliteRow) -> Result<Assessment> {
    let assessment_id: String = row.get("assessment_id");
    let system_id: String = row.get("system_id");
    let assessment_date: String = row.get("assessment_date");

    Ok(Assessment {
        assessment_id: Uuid::parse_str(&assessment_id)?,
        system_id: Uuid::parse_str(&system_id)?,
        risk_category: row.get("risk_category"),
        status: row.get("status"),
        summary: row.get("summary"),
        assessment_date: NaiveDate::parse_from_str(&assessment_date, "%Y-%m-%d")?,
    })
}

/// Save assessment to database
pub async fn save_assessment(pool: &SqlitePool, assessment: &Assessment) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO eu_ai_act_assessments (
            assessment_id, system_id, risk_category, status, summary,
            assessment_date, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(assessment.assessment_id.to_string())
    .bind(assessment.system_id.to_string())
    .bind(&assessment.risk_category)
    .bind(&assessment.status)
    .bind(&assessment.summary)
    .bind(assessment.assessment_date.to_string())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load assessment by id together with its system's display fields
pub async fn load_with_system(
    pool: &SqlitePool,
    assessment_id: Uuid,
) -> Result<Option<(Assessment, AiSystem)>> {
    let row = sqlx::query(
        r#"
        SELECT a.assessment_id, a.system_id, a.risk_category, a.status,
               a.summary, a.assessment_date,
               s.name AS system_name, s.owners AS system_owners
        FROM eu_ai_act_assessments a
        JOIN ai_systems s ON s.system_id = a.system_id
        WHERE a.assessment_id = ?
        "#,
    )
    .bind(assessment_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let assessment = assessment_from_row(&row)?;
            let system = AiSystem {
                system_id: assessment.system_id,
                name: row.get("system_name"),
                owners: row.get("system_owners"),
            };
            Ok(Some((assessment, system)))
        }
        None => Ok(None),
    }
}

/// Load the most recent assessment for a system
///
/// Ties on assessment_date break deterministically by id descending.
pub async fn latest_for_system(
    pool: &SqlitePool,
    system_id: Uuid,
) -> Result<Option<Assessment>> {
    let row = sqlx::query(
        r#"
        SELECT assessment_id, system_id, risk_category, status, summary, assessment_date
        FROM eu_ai_act_assessments
        WHERE system_id = ?
        ORDER BY assessment_date DESC, assessment_id DESC
        LIMIT 1
        "#,
    )
    .bind(system_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(assessment_from_row(&row)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::systems::{save_system, AiSystem};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        agc_common::db::init_tables(&pool).await.unwrap();
        pool
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_latest_picks_max_assessment_date() {
        let pool = test_pool().await;

        let system = AiSystem::new("credit-scorer".to_string(), "risk team".to_string());
        save_system(&pool, &system).await.unwrap();

        let older = Assessment::new(system.system_id, "HIGH".to_string(), date("2025-03-01"));
        let newer = Assessment::new(system.system_id, "HIGH".to_string(), date("2025-09-15"));
        save_assessment(&pool, &older).await.unwrap();
        save_assessment(&pool, &newer).await.unwrap();

        let latest = latest_for_system(&pool, system.system_id)
            .await
            .unwrap()
            .expect("Assessment not found");

        assert_eq!(latest.assessment_id, newer.assessment_id);
    }

    #[tokio::test]
    async fn test_latest_tie_breaks_by_id_descending() {
        let pool = test_pool().await;

        let system = AiSystem::new("credit-scorer".to_string(), "risk team".to_string());
        save_system(&pool, &system).await.unwrap();

        let a = Assessment::new(system.system_id, "HIGH".to_string(), date("2025-09-15"));
        let b = Assessment::new(system.system_id, "HIGH".to_string(), date("2025-09-15"));
        save_assessment(&pool, &a).await.unwrap();
        save_assessment(&pool, &b).await.unwrap();

        let latest = latest_for_system(&pool, system.system_id)
            .await
            .unwrap()
            .expect("Assessment not found");

        // Same date: the lexically greater id wins
        let expected = a
            .assessment_id
            .to_string()
            .max(b.assessment_id.to_string());
        assert_eq!(latest.assessment_id.to_string(), expected);
    }

    #[tokio::test]
    async fn test_latest_returns_none_for_unknown_system() {
        let pool = test_pool().await;

        let latest = latest_for_system(&pool, Uuid::new_v4()).await.unwrap();
        assert!(latest.is_none());
    }
}
