use anyhow::Context;
use clap::{Parser, Subcommand};
use eckokit_auth::Authenticator;
use eckokit_config::load as load_config;
use eckokit_database::AgentRepository;
use eckokit_gateway::{build_router, AppState};
use eckokit_runtime::{connect_database, telemetry, BackendServices};
use serde_json::{json, Value};
use sqlx::{Row, SqlitePool};
use tokio::net::TcpListener;
use tracing::info;

const DEMO_USER_ID: &str = "demo_user";
const DEMO_ORGANIZATION_ID: &str = "demo_org";

#[derive(Parser)]
#[command(name = "eckokit-server")]
#[command(about = "Eckokit backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Insert a demo user, organization and subscription, then print a session token
    SeedData,
    /// Print agents and notifications as JSON
    DumpData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::SeedData => seed_data().await,
        Commands::DumpData => dump_data().await,
    }
}

async fn run_server() -> anyhow::Result<()> {
    info!("starting Eckokit backend");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = AppState::new(services.authenticator, services.provider, &config);
    let app = build_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(eckokit_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn seed_data() -> anyhow::Result<()> {
    info!("seeding database with demo data");

    let config = load_config().context("failed to load configuration")?;
    let pool = connect_database(&config).await?;
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT OR IGNORE INTO users (id, name, email, email_verified, created_at, updated_at)
        VALUES (?, ?, ?, TRUE, ?, ?)
        "#,
    )
    .bind(DEMO_USER_ID)
    .bind("Demo User")
    .bind("demo@eckokit.local")
    .bind(&now)
    .bind(&now)
    .execute(&pool)
    .await
    .context("failed to insert demo user")?;

    sqlx::query(
        r#"
        INSERT OR IGNORE INTO organizations (id, name, slug, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(DEMO_ORGANIZATION_ID)
    .bind("Demo Organization")
    .bind("demo")
    .bind(&now)
    .execute(&pool)
    .await
    .context("failed to insert demo organization")?;

    sqlx::query(
        r#"
        INSERT OR IGNORE INTO members (id, organization_id, user_id, role, created_at)
        VALUES (?, ?, ?, 'owner', ?)
        "#,
    )
    .bind("demo_member")
    .bind(DEMO_ORGANIZATION_ID)
    .bind(DEMO_USER_ID)
    .bind(&now)
    .execute(&pool)
    .await
    .context("failed to insert demo membership")?;

    sqlx::query(
        r#"
        INSERT OR IGNORE INTO subscriptions (id, plan, reference_id, status)
        VALUES (?, 'starter', ?, 'active')
        "#,
    )
    .bind("demo_subscription")
    .bind(DEMO_ORGANIZATION_ID)
    .execute(&pool)
    .await
    .context("failed to insert demo subscription")?;

    let authenticator = Authenticator::new(pool, &config.auth);
    let session = authenticator
        .issue_session(DEMO_USER_ID)
        .await
        .context("failed to issue demo session")?;

    println!("Database seeded with demo data:");
    println!("- user:         {DEMO_USER_ID}");
    println!("- organization: {DEMO_ORGANIZATION_ID} (active subscription)");
    println!("- session token (expires {}):", session.expires_at);
    println!("{}", session.token);

    Ok(())
}

async fn dump_data() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    let pool = connect_database(&config).await?;

    let dump = json!({
        "agents": dump_agents(&pool).await?,
        "notifications": dump_notifications(&pool).await?,
    });

    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}

async fn dump_agents(pool: &SqlitePool) -> anyhow::Result<Value> {
    let organization_ids: Vec<String> =
        sqlx::query_scalar("SELECT id FROM organizations ORDER BY created_at ASC")
            .fetch_all(pool)
            .await
            .context("failed to fetch organizations")?;

    let agents = AgentRepository::new(pool.clone());
    let mut dumped = Vec::new();
    for organization_id in organization_ids {
        let rows = agents
            .list_by_organization(&organization_id)
            .await
            .with_context(|| format!("failed to fetch agents for {organization_id}"))?;
        dumped.extend(rows);
    }

    Ok(serde_json::to_value(dumped)?)
}

async fn dump_notifications(pool: &SqlitePool) -> anyhow::Result<Value> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, title, message, is_read, created_at
        FROM notifications
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch notifications")?;

    Ok(rows
        .into_iter()
        .map(|row| {
            json!({
                "id": row.get::<String, _>("id"),
                "userId": row.get::<String, _>("user_id"),
                "title": row.get::<String, _>("title"),
                "message": row.get::<String, _>("message"),
                "read": row.get::<bool, _>("is_read"),
                "createdAt": row.get::<String, _>("created_at"),
            })
        })
        .collect())
}
