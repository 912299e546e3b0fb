//! Eckokit Database Crate
//!
//! Connection management, embedded migrations, and the record stores for
//! agents, notifications and the read-only organization tables.

use eckokit_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::{ping, prepare_database};
pub use migrations::{run_migrations, MIGRATOR};

pub use repos::{AgentRepository, NotificationRepository, OrganizationRepository};

pub use entities::{
    agent::{Agent, AgentDetailsUpdate, AgentLlm, AgentToolsUpdate, NewAgent},
    notification::{CreateNotificationRequest, Notification},
    organization::{Membership, Organization, Subscription, SubscriptionStatus},
};

pub use types::{errors::DatabaseError, DatabaseResult};

pub use sqlx::SqlitePool as Pool;

/// Connect to the configured database and apply pending migrations.
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}

/// Current time in the fixed-width RFC 3339 form stored in every timestamp column.
pub(crate) fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tempfile::TempDir;

    pub async fn migrated_pool() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_dir.path().join("test.db").display()),
            max_connections: 1,
        };
        let pool = initialize_database(&config).await.unwrap();
        (pool, temp_dir)
    }

    pub async fn seed_user(pool: &SqlitePool, id: &str) {
        let now = timestamp();
        sqlx::query(
            "INSERT INTO users (id, name, email, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(format!("User {id}"))
        .bind(format!("{id}@example.com"))
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await
        .unwrap();
    }

    pub async fn seed_organization(pool: &SqlitePool, id: &str) {
        sqlx::query("INSERT INTO organizations (id, name, slug, created_at) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(format!("Org {id}"))
            .bind(id)
            .bind(timestamp())
            .execute(pool)
            .await
            .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn initialize_database_reports_connection_failures() {
        let config = DatabaseConfig {
            url: "postgres://localhost/not-sqlite".to_string(),
            max_connections: 1,
        };

        let error = initialize_database(&config).await.unwrap_err();
        assert!(matches!(error, DatabaseError::ConnectionError(_)));
    }

    #[test]
    fn timestamps_sort_lexicographically() {
        let first = timestamp();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = timestamp();
        assert!(first < second);
        assert!(first.ends_with('Z'));
    }
}
