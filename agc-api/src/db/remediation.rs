//! Bias tests and remediation actions
//!
//! Completing the last open remediation action under a bias test flips
//! the test's aggregate status to REMEDIATION_COMPLETE. The field
//! update and the cascade run in one transaction: either both commit
//! or neither does, and concurrent completions serialize at the store
//! instead of racing on a stale sibling read.

use agc_common::types::{BiasTestStatus, RemediationStatus};
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, Row, Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

/// Bias test record
#[derive(Debug, Clone, Serialize)]
pub struct BiasTest {
    pub test_id: Uuid,
    pub system_id: Uuid,
    pub name: String,
    pub status: BiasTestStatus,
}

impl BiasTest {
    pub fn new(system_id: Uuid, name: String) -> Self {
        Self {
            test_id: Uuid::new_v4(),
            system_id,
            name,
            status: BiasTestStatus::RemediationRequired,
        }
    }
}

/// Remediation action record
#[derive(Debug, Clone, Serialize)]
pub struct RemediationAction {
    pub action_id: Uuid,
    pub test_id: Uuid,
    pub title: String,
    pub status: RemediationStatus,
    pub assigned_to: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl RemediationAction {
    pub fn new(test_id: Uuid, title: String) -> Self {
        Self {
            action_id: Uuid::new_v4(),
            test_id,
            title,
            status: RemediationStatus::Pending,
            assigned_to: None,
            priority: None,
            due_date: None,
            completion_date: None,
            notes: None,
        }
    }
}

/// Mutable fields of an update request, dates already validated
#[derive(Debug, Clone)]
pub struct ActionUpdate {
    pub status: RemediationStatus,
    pub assigned_to: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

fn action_from_row(row: &SqliteRow) -> Result<RemediationAction> {
    let action_id: String = row.get("action_id");
    let test_id: String = row.get("test_id");
    let status: String = row.get("status");
    let due_date: Option<String> = row.get("due_date");
    let completion_date: Option<String> = row.get("completion_date");

    Ok(RemediationAction {
        action_id: Uuid::parse_str(&action_id)?,
        test_id: Uuid::parse_str(&test_id)?,
        title: row.get("title"),
        status: status.parse()?,
        assigned_to: row.get("assigned_to"),
        priority: row.get("priority"),
        due_date: due_date
            .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
            .transpose()?,
        completion_date: completion_date
            .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
            .transpose()?,
        notes: row.get("notes"),
    })
}

/// Save bias test to database
pub async fn save_test(pool: &SqlitePool, test: &BiasTest) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO bias_tests (test_id, system_id, name, status, created_at)
        VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(test.test_id.to_string())
    .bind(test.system_id.to_string())
    .bind(&test.name)
    .bind(test.status.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load bias test by id
pub async fn load_test(pool: &SqlitePool, test_id: Uuid) -> Result<Option<BiasTest>> {
    let row = sqlx::query(
        r#"
        SELECT test_id, system_id, name, status
        FROM bias_tests
        WHERE test_id = ?
        "#,
    )
    .bind(test_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let test_id: String = row.get("test_id");
            let system_id: String = row.get("system_id");
            let status: String = row.get("status");
            Ok(Some(BiasTest {
                test_id: Uuid::parse_str(&test_id)?,
                system_id: Uuid::parse_str(&system_id)?,
                name: row.get("name"),
                status: status.parse()?,
            }))
        }
        None => Ok(None),
    }
}

/// Save remediation action to database
pub async fn save_action(pool: &SqlitePool, action: &RemediationAction) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO remediation_actions (
            action_id, test_id, title, status, assigned_to, priority,
            due_date, completion_date, notes, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(action.action_id.to_string())
    .bind(action.test_id.to_string())
    .bind(&action.title)
    .bind(action.status.as_str())
    .bind(&action.assigned_to)
    .bind(&action.priority)
    .bind(action.due_date.map(|d| d.to_string()))
    .bind(action.completion_date.map(|d| d.to_string()))
    .bind(&action.notes)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load remediation action by id
pub async fn load_action(pool: &SqlitePool, action_id: Uuid) -> Result<Option<RemediationAction>> {
    let row = sqlx::query(
        r#"
        SELECT action_id, test_id, title, status, assigned_to, priority,
               due_date, completion_date, notes
        FROM remediation_actions
        WHERE action_id = ?
        "#,
    )
    .bind(action_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(action_from_row(&row)?)),
        None => Ok(None),
    }
}

/// Apply field updates to a remediation action and cascade completion
/// into the parent bias test.
///
/// Returns `Ok(None)` when the action id is unknown; nothing is
/// written in that case. The nullable fields overwrite what is stored:
/// a null (or absent) value clears the previous value rather than
/// keeping it.
pub async fn update_action(
    pool: &SqlitePool,
    action_id: Uuid,
    update: &ActionUpdate,
) -> Result<Option<RemediationAction>> {
    let mut tx = pool.begin().await?;

    let test_id: Option<String> =
        sqlx::query_scalar("SELECT test_id FROM remediation_actions WHERE action_id = ?")
            .bind(action_id.to_string())
            .fetch_optional(&mut *tx)
            .await?;

    let Some(test_id) = test_id else {
        return Ok(None);
    };

    sqlx::query(
        r#"
        UPDATE remediation_actions
        SET status = ?, assigned_to = ?, priority = ?, due_date = ?,
            completion_date = ?, notes = ?, updated_at = CURRENT_TIMESTAMP
        WHERE action_id = ?
        "#,
    )
    .bind(update.status.as_str())
    .bind(&update.assigned_to)
    .bind(&update.priority)
    .bind(update.due_date.map(|d| d.to_string()))
    .bind(update.completion_date.map(|d| d.to_string()))
    .bind(&update.notes)
    .bind(action_id.to_string())
    .execute(&mut *tx)
    .await?;

    if update.status == RemediationStatus::Completed {
        cascade_test_status(&mut tx, &test_id).await?;
    }

    let row = sqlx::query(
        r#"
        SELECT action_id, test_id, title, status, assigned_to, priority,
               due_date, completion_date, notes
        FROM remediation_actions
        WHERE action_id = ?
        "#,
    )
    .bind(action_id.to_string())
    .fetch_one(&mut *tx)
    .await?;
    let action = action_from_row(&row)?;

    tx.commit().await?;

    Ok(Some(action))
}

/// Mark the parent test REMEDIATION_COMPLETE when no open actions remain.
///
/// An action without a parent test is tolerated: the cascade is
/// skipped, not an error. The status write is an unconditional
/// overwrite, so re-completing an action under an already-complete
/// test is a harmless no-op.
async fn cascade_test_status(tx: &mut Transaction<'_, Sqlite>, test_id: &str) -> Result<()> {
    let parent: Option<String> = sqlx::query_scalar("SELECT test_id FROM bias_tests WHERE test_id = ?")
        .bind(test_id)
        .fetch_optional(&mut **tx)
        .await?;

    if parent.is_none() {
        debug!("Action completed under unknown bias test {}; skipping cascade", test_id);
        return Ok(());
    }

    let open: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM remediation_actions WHERE test_id = ? AND status != ?",
    )
    .bind(test_id)
    .bind(RemediationStatus::Completed.as_str())
    .fetch_one(&mut **tx)
    .await?;

    if open == 0 {
        sqlx::query("UPDATE bias_tests SET status = ? WHERE test_id = ?")
            .bind(BiasTestStatus::RemediationComplete.as_str())
            .bind(test_id)
            .execute(&mut **tx)
            .await?;
        info!("All remediation actions complete for bias test {}", test_id);
    }

    Ok(())
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

    async fn seed_test_with_actions(pool: &SqlitePool, count: usize) -> (BiasTest, Vec<RemediationAction>) {
        let system = AiSystem::new("resume-screener".to_string(), "ml platform".to_string());
        save_system(pool, &system).await.unwrap();

        let test = BiasTest::new(system.system_id, "demographic parity".to_string());
        save_test(pool, &test).await.unwrap();

        let mut actions = Vec::new();
        for i in 0..count {
            let action = RemediationAction::new(test.test_id, format!("action {}", i));
            save_action(pool, &action).await.unwrap();
            actions.push(action);
        }

        (test, actions)
    }

    fn completed() -> ActionUpdate {
        ActionUpdate {
            status: RemediationStatus::Completed,
            assigned_to: None,
            priority: None,
            due_date: None,
            completion_date: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_update_unknown_action_returns_none() {
        let pool = test_pool().await;

        let result = update_action(&pool, Uuid::new_v4(), &completed())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_fields_are_overwritten() {
        let pool = test_pool().await;
        let (_test, actions) = seed_test_with_actions(&pool, 2).await;

        let update = ActionUpdate {
            status: RemediationStatus::InProgress,
            assigned_to: Some("dana".to_string()),
            priority: Some("HIGH".to_string()),
            due_date: Some(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()),
            completion_date: None,
            notes: Some("rebalancing training data".to_string()),
        };

        let updated = update_action(&pool, actions[0].action_id, &update)
            .await
            .unwrap()
            .expect("Action not found");

        assert_eq!(updated.status, RemediationStatus::InProgress);
        assert_eq!(updated.assigned_to.as_deref(), Some("dana"));
        assert_eq!(updated.priority.as_deref(), Some("HIGH"));
        assert_eq!(updated.due_date, update.due_date);
        assert_eq!(updated.completion_date, None);

        // A second update with nulls clears the previously stored fields
        let cleared = update_action(
            &pool,
            actions[0].action_id,
            &ActionUpdate {
                status: RemediationStatus::InProgress,
                assigned_to: None,
                priority: None,
                due_date: None,
                completion_date: None,
                notes: None,
            },
        )
        .await
        .unwrap()
        .expect("Action not found");

        assert_eq!(cleared.assigned_to, None);
        assert_eq!(cleared.due_date, None);
        assert_eq!(cleared.notes, None);
    }

    #[tokio::test]
    async fn test_non_completed_update_never_touches_parent() {
        let pool = test_pool().await;
        let (test, actions) = seed_test_with_actions(&pool, 1).await;

        let update = ActionUpdate {
            status: RemediationStatus::InProgress,
            ..completed()
        };
        update_action(&pool, actions[0].action_id, &update)
            .await
            .unwrap()
            .expect("Action not found");

        let parent = load_test(&pool, test.test_id).await.unwrap().unwrap();
        assert_eq!(parent.status, BiasTestStatus::RemediationRequired);
    }

    #[tokio::test]
    async fn test_completing_last_action_cascades() {
        let pool = test_pool().await;
        let (test, actions) = seed_test_with_actions(&pool, 2).await;

        update_action(&pool, actions[0].action_id, &completed())
            .await
            .unwrap()
            .expect("Action not found");

        // One sibling still open: no cascade yet
        let parent = load_test(&pool, test.test_id).await.unwrap().unwrap();
        assert_eq!(parent.status, BiasTestStatus::RemediationRequired);

        update_action(&pool, actions[1].action_id, &completed())
            .await
            .unwrap()
            .expect("Action not found");

        let parent = load_test(&pool, test.test_id).await.unwrap().unwrap();
        assert_eq!(parent.status, BiasTestStatus::RemediationComplete);
    }

    #[tokio::test]
    async fn test_recompleting_is_a_noop_overwrite() {
        let pool = test_pool().await;
        let (test, actions) = seed_test_with_actions(&pool, 2).await;

        update_action(&pool, actions[0].action_id, &completed())
            .await
            .unwrap();
        update_action(&pool, actions[1].action_id, &completed())
            .await
            .unwrap();

        // Test already REMEDIATION_COMPLETE; completing again must not error
        let result = update_action(&pool, actions[0].action_id, &completed()).await;
        assert!(result.is_ok());

        let parent = load_test(&pool, test.test_id).await.unwrap().unwrap();
        assert_eq!(parent.status, BiasTestStatus::RemediationComplete);
    }

    #[tokio::test]
    async fn test_orphan_action_completion_skips_cascade() {
        let pool = test_pool().await;

        // Action whose test_id has no bias_tests row
        let action = RemediationAction::new(Uuid::new_v4(), "orphan".to_string());
        save_action(&pool, &action).await.unwrap();

        let updated = update_action(&pool, action.action_id, &completed())
            .await
            .unwrap()
            .expect("Action not found");

        assert_eq!(updated.status, RemediationStatus::Completed);
    }
}
