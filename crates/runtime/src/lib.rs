use std::sync::Arc;

use anyhow::{Context, Result};
use eckokit_auth::Authenticator;
use eckokit_config::AppConfig;
use eckokit_database::initialize_database;
use eckokit_provider::{AgentProvider, ElevenLabsClient};
use sqlx::SqlitePool;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::TRACE)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Open the configured database and bring its schema up to date.
pub async fn connect_database(config: &AppConfig) -> Result<SqlitePool> {
    let pool = initialize_database(&config.database)
        .await
        .context("failed to initialise database")?;
    info!(url = %config.database.url, "database ready");
    Ok(pool)
}

#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub authenticator: Authenticator,
    pub provider: Arc<dyn AgentProvider>,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = connect_database(config).await?;

        let authenticator = Authenticator::new(db_pool.clone(), &config.auth);
        let provider: Arc<dyn AgentProvider> = Arc::new(
            ElevenLabsClient::from_config(&config.provider)
                .context("failed to configure voice provider")?,
        );

        info!(base_url = %config.provider.base_url, "voice provider ready");

        Ok(Self {
            db_pool,
            authenticator,
            provider,
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
