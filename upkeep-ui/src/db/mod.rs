//! Database access layer for upkeep-ui
//!
//! The console never writes: sessions are maintained by the external auth
//! service, and everything else the console serves is derived at runtime.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::path::Path;

/// Connect to the console database in read-only mode
///
/// Safety: Uses SQLite mode=ro so the console cannot mutate session state
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        anyhow::bail!(
            "Database not found: {}\nThe auth service creates it on first sign-in.",
            db_path.display()
        );
    }

    // mode=ro: read-only; immutable=1: SQLite won't write even for internal
    // operations
    let db_url = format!("sqlite://{}?mode=ro&immutable=1", db_path.display());

    let pool = SqlitePool::connect(&db_url)
        .await
        .context("Failed to connect to database in read-only mode")?;

    Ok(pool)
}

/// In-memory stand-in used when no sessions database exists yet
///
/// The console stays fully functional; session display renders anonymously.
pub async fn connect_ephemeral() -> Result<SqlitePool> {
    let pool = SqlitePool::connect(":memory:")
        .await
        .context("Failed to create in-memory database")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token TEXT PRIMARY KEY,
            user_name TEXT NOT NULL,
            expires_at TEXT NOT NULL
        );
        "#,
    )
    .execute(&pool)
    .await
    .context("Failed to create sessions table")?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_database_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = connect_readonly(&dir.path().join("upkeep.db")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_readonly_connection_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("upkeep.db");

        // Seed a database the way the auth service would
        let seed = SqlitePool::connect(&format!("sqlite://{}?mode=rwc", db_path.display()))
            .await
            .unwrap();
        sqlx::query("CREATE TABLE sessions (token TEXT PRIMARY KEY, user_name TEXT NOT NULL, expires_at TEXT NOT NULL)")
            .execute(&seed)
            .await
            .unwrap();
        seed.close().await;

        let pool = connect_readonly(&db_path).await.unwrap();

        let result = sqlx::query("CREATE TABLE _test (id INTEGER)")
            .execute(&pool)
            .await;
        assert!(result.is_err(), "Write should fail in read-only mode");
    }

    #[tokio::test]
    async fn test_ephemeral_database_has_sessions_table() {
        let pool = connect_ephemeral().await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }
}
