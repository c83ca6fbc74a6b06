//! Operator session resolution
//!
//! Sessions are issued and written by the external auth service; the console
//! only reads them back for layout-level display. Nothing here gates access.

use crate::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// A resolved operator session
#[derive(Debug, Clone)]
pub struct Session {
    /// Display name of the signed-in operator
    pub user_name: String,
    /// Expiry instant, after which the session is treated as absent
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is still valid at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Resolve a session token against the `sessions` table
///
/// Returns `Ok(None)` for unknown, expired, or malformed tokens; the page
/// then renders anonymously.
pub async fn resolve_session(db: &SqlitePool, token: &str) -> Result<Option<Session>> {
    // Tokens are UUIDs minted by the auth service; anything else cannot match
    if Uuid::parse_str(token).is_err() {
        return Ok(None);
    }

    let row: Option<(String, String)> = sqlx::query_as(
        "SELECT user_name, expires_at FROM sessions WHERE token = ?",
    )
    .bind(token)
    .fetch_optional(db)
    .await?;

    let Some((user_name, expires_at)) = row else {
        return Ok(None);
    };

    let Ok(expires_at) = DateTime::parse_from_rfc3339(&expires_at) else {
        tracing::warn!("Session row for '{}' has malformed expiry", user_name);
        return Ok(None);
    };

    let session = Session {
        user_name,
        expires_at: expires_at.with_timezone(&Utc),
    };

    if session.is_active(Utc::now()) {
        Ok(Some(session))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn session_db() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(
            r#"
            CREATE TABLE sessions (
                token TEXT PRIMARY KEY,
                user_name TEXT NOT NULL,
                expires_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        pool
    }

    async fn insert_session(pool: &SqlitePool, token: &str, user: &str, expires: DateTime<Utc>) {
        sqlx::query("INSERT INTO sessions (token, user_name, expires_at) VALUES (?, ?, ?)")
            .bind(token)
            .bind(user)
            .bind(expires.to_rfc3339())
            .execute(pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_valid_session_resolves() {
        let pool = session_db().await;
        let token = Uuid::new_v4().to_string();
        insert_session(&pool, &token, "pat", Utc::now() + Duration::hours(1)).await;

        let session = resolve_session(&pool, &token).await.unwrap().unwrap();
        assert_eq!(session.user_name, "pat");
    }

    #[tokio::test]
    async fn test_expired_session_is_absent() {
        let pool = session_db().await;
        let token = Uuid::new_v4().to_string();
        insert_session(&pool, &token, "pat", Utc::now() - Duration::minutes(5)).await;

        assert!(resolve_session(&pool, &token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_token_is_absent() {
        let pool = session_db().await;
        let token = Uuid::new_v4().to_string();

        assert!(resolve_session(&pool, &token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_token_is_absent_without_query() {
        let pool = session_db().await;

        assert!(resolve_session(&pool, "'; DROP TABLE sessions; --")
            .await
            .unwrap()
            .is_none());
    }
}
