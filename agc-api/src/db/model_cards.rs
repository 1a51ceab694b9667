//! Model card records
//!
//! Cards are versioned per system; `last_updated` orders both the
//! "latest" lookup and the version history listing. Read-only in this
//! service.

use crate::db::systems::AiSystem;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// Model card record
#[derive(Debug, Clone, Serialize)]
pub struct ModelCard {
    pub card_id: Uuid,
    pub system_id: Uuid,
    pub card_version: String,
    pub status: String,
    pub content: Option<String>,
    pub updated_by: Option<String>,
    pub approved_by: Option<String>,
    pub approval_date: Option<NaiveDate>,
    /// RFC 3339 timestamp; ordering field for "latest" and history
    pub last_updated: String,
}

impl ModelCard {
    pub fn new(system_id: Uuid, card_version: String) -> Self {
        Self {
            card_id: Uuid::new_v4(),
            system_id,
            card_version,
            status: "DRAFT".to_string(),
            content: None,
            updated_by: None,
            approved_by: None,
            approval_date: None,
            last_updated: Utc::now().to_rfc3339(),
        }
    }
}

/// Projection of a card for the version-history listing
///
/// Excludes `content` (potentially large) and the system fields.
#[derive(Debug, Clone, Serialize)]
pub struct ModelCardVersion {
    pub card_id: Uuid,
    pub card_version: String,
    pub status: String,
    pub updated_by: Option<String>,
    pub approved_by: Option<String>,
    pub approval_date: Option<NaiveDate>,
    pub last_updated: String,
}

fn card_from_row(row: &SqliteRow) -> Result<ModelCard> {
    let card_id: String = row.get("card_id");
    let system_id: String = row.get("system_id");
    let approval_date: Option<String> = row.get("approval_date");

    Ok(ModelCard {
        card_id: Uuid::parse_str(&card_id)?,
        system_id: Uuid::parse_str(&system_id)?,
        card_version: row.get("card_version"),
        status: row.get("status"),
        content: row.get("content"),
        updated_by: row.get("updated_by"),
        approved_by: row.get("approved_by"),
        approval_date: approval_date
            .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
            .transpose()?,
        last_updated: row.get("last_updated"),
    })
}

/// Save model card to database
pub async fn save_card(pool: &SqlitePool, card: &ModelCard) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO model_cards (
            card_id, system_id, card_version, status, content,
            updated_by, approved_by, approval_date, last_updated, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(card.card_id.to_string())
    .bind(card.system_id.to_string())
    .bind(&card.card_version)
    .bind(&card.status)
    .bind(&card.content)
    .bind(&card.updated_by)
    .bind(&card.approved_by)
    .bind(card.approval_date.map(|d| d.to_string()))
    .bind(&card.last_updated)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load the most recent card for a system with its system display fields
///
/// Ties on last_updated break deterministically by id descending.
pub async fn latest_for_system(
    pool: &SqlitePool,
    system_id: Uuid,
) -> Result<Option<(ModelCard, AiSystem)>> {
    let row = sqlx::query(
        r#"
        SELECT c.card_id, c.system_id, c.card_version, c.status, c.content,
               c.updated_by, c.approved_by, c.approval_date, c.last_updated,
               s.name AS system_name, s.owners AS system_owners
        FROM model_cards c
        JOIN ai_systems s ON s.system_id = c.system_id
        WHERE c.system_id = ?
        ORDER BY c.last_updated DESC, c.card_id DESC
        LIMIT 1
        "#,
    )
    .bind(system_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let card = card_from_row(&row)?;
            let system = AiSystem {
                system_id: card.system_id,
                name: row.get("system_name"),
                owners: row.get("system_owners"),
            };
            Ok(Some((card, system)))
        }
        None => Ok(None),
    }
}

/// List all card versions for a system, newest first
///
/// Returns an empty vec (not an error) when the system has no cards.
pub async fn versions_for_system(
    pool: &SqlitePool,
    system_id: Uuid,
) -> Result<Vec<ModelCardVersion>> {
    let rows = sqlx::query(
        r#"
        SELECT card_id, card_version, status, updated_by, approved_by,
               approval_date, last_updated
        FROM model_cards
        WHERE system_id = ?
        ORDER BY last_updated DESC, card_id DESC
        "#,
    )
    .bind(system_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let card_id: String = row.get("card_id");
            let approval_date: Option<String> = row.get("approval_date");
            Ok(ModelCardVersion {
                card_id: Uuid::parse_str(&card_id)?,
                card_version: row.get("card_version"),
                status: row.get("status"),
                updated_by: row.get("updated_by"),
                approved_by: row.get("approved_by"),
                approval_date: approval_date
                    .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
                    .transpose()?,
                last_updated: row.get("last_updated"),
            })
        })
        .collect()
}
