//! Unit tests for database initialization
//!
//! The pool initializer must create the database file (and parent
//! directory) when missing, open an existing database without error,
//! and leave all compliance tables in place.

use agc_common::db::init_database_pool;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("agc.db");

    assert!(!db_path.exists());

    let pool = init_database_pool(&db_path).await;
    assert!(pool.is_ok(), "Database initialization failed: {:?}", pool.err());

    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("agc.db");

    let pool1 = init_database_pool(&db_path).await;
    assert!(pool1.is_ok());
    drop(pool1);

    // Second open should succeed against the existing file
    let pool2 = init_database_pool(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_compliance_tables_created() {
    let dir = tempfile::TempDir::new().unwrap();
    let pool = init_database_pool(&dir.path().join("agc.db")).await.unwrap();

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for expected in [
        "ai_systems",
        "bias_tests",
        "cross_framework_analyses",
        "eu_ai_act_assessments",
        "model_cards",
        "remediation_actions",
    ] {
        assert!(
            tables.iter().any(|t| t == expected),
            "Missing table '{}', got: {:?}",
            expected,
            tables
        );
    }
}
