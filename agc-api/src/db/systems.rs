//! AI system records
//!
//! Systems are registered by the inventory import (outside this
//! service); here they provide the display fields joined onto
//! assessments and model cards.

use anyhow::Result;
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// AI system record (joined display fields only)
#[derive(Debug, Clone, Serialize)]
pub struct AiSystem {
    pub system_id: Uuid,
    pub name: String,
    /// Display string of owning team/individuals
    pub owners: String,
}

impl AiSystem {
    pub fn new(name: String, owners: String) -> Self {
        Self {
            system_id: Uuid::new_v4(),
            name,
            owners,
        }
    }
}

/// Save system to database
pub async fn save_system(pool: &SqlitePool, system: &AiSystem) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO ai_systems (system_id, name, owners, created_at)
        VALUES (?, ?, ?, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(system.system_id.to_string())
    .bind(&system.name)
    .bind(&system.owners)
    .execute(pool)
    .await?;

    Ok(())
}
