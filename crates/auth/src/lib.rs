//! Session resolution against the identity provider's `sessions` table.
//!
//! Sign-up and sign-in belong to the identity provider. This crate only turns
//! a presented session token into a user, and can mint sessions for operator
//! tooling and tests.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use eckokit_config::AuthConfig;
use rand::RngCore;
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tracing::{debug, info};

/// Expiry timestamps must stay within four-digit years to round-trip as RFC 3339.
const MAX_SESSION_TTL_SECONDS: u64 = 100 * 365 * 86_400;

#[derive(Clone)]
pub struct Authenticator {
    pool: SqlitePool,
    session_ttl: Duration,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("session not found")]
    SessionNotFound,
    #[error("session expired")]
    SessionExpired,
    #[error("invalid session token")]
    InvalidSession,
    #[error("user not found")]
    UserNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

impl Authenticator {
    pub fn new(pool: SqlitePool, config: &AuthConfig) -> Self {
        let ttl_seconds = config.session_ttl_seconds.min(MAX_SESSION_TTL_SECONDS) as i64;
        let session_ttl = Duration::seconds(ttl_seconds);

        Self { pool, session_ttl }
    }

    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Resolve a session token to its user. Expired sessions are removed.
    pub async fn authenticate_token(&self, token: &str) -> Result<(User, AuthSession), AuthError> {
        let row = sqlx::query("SELECT user_id, expires_at FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Err(AuthError::SessionNotFound);
        };

        let user_id: String = row.try_get("user_id")?;
        let expires_at: String = row.try_get("expires_at")?;

        let expires_at = DateTime::parse_from_rfc3339(&expires_at)
            .map_err(|_| AuthError::InvalidSession)?
            .with_timezone(&Utc);

        if expires_at <= Utc::now() {
            sqlx::query("DELETE FROM sessions WHERE token = ?")
                .bind(token)
                .execute(&self.pool)
                .await?;
            debug!(user_id = %user_id, "removed expired session");
            return Err(AuthError::SessionExpired);
        }

        let user = self.fetch_user(&user_id).await?;
        let session = AuthSession {
            token: token.to_owned(),
            user_id,
            expires_at,
        };

        Ok((user, session))
    }

    /// Mint a session for an existing user.
    pub async fn issue_session(&self, user_id: &str) -> Result<AuthSession, AuthError> {
        // Fails early with a clear error instead of a foreign key violation.
        self.fetch_user(user_id).await?;

        let token = generate_session_token();
        let now = Utc::now();
        let expires_at = now + self.session_ttl;
        let now_text = now.to_rfc3339_opts(SecondsFormat::Micros, true);

        sqlx::query(
            "INSERT INTO sessions (id, token, user_id, expires_at, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(cuid2::create_id())
        .bind(&token)
        .bind(user_id)
        .bind(expires_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .bind(&now_text)
        .bind(&now_text)
        .execute(&self.pool)
        .await?;

        info!(user_id = %user_id, "issued session");

        Ok(AuthSession {
            token,
            user_id: user_id.to_owned(),
            expires_at,
        })
    }

    async fn fetch_user(&self, id: &str) -> Result<User, AuthError> {
        let row = sqlx::query("SELECT id, name, email FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(User {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
        })
    }
}

fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
