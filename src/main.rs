use sqlx::postgres::PgPoolOptions;
use std::{error::Error, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yellowbox_access::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    identity::{IdentityState, InMemoryDirectory, PostgresDirectory},
};

/// main
///
/// Loads configuration, installs logging, builds the identity directory and
/// serves the HTTP API until the process is stopped.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // 1. Configuration (fail-fast on missing production settings)
    dotenv::dotenv().ok();
    let config = AppConfig::load()?;

    // 2. Logging: RUST_LOG wins, otherwise sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "yellowbox_access=debug,tower_http=info,axum=trace".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // JSON lines for the log aggregator.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. Identity directory
    let identity = build_directory(&config).await?;

    // 4. Router and server
    let bind_addr = config.bind_addr.clone();
    let app = create_router(AppState { identity, config });

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Postgres when a database is configured, otherwise a users file, otherwise
/// the four seed accounts.
async fn build_directory(config: &AppConfig) -> Result<IdentityState, Box<dyn Error>> {
    if let Some(db_url) = &config.db_url {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await?;
        tracing::info!("Identity directory: Postgres");
        return Ok(Arc::new(PostgresDirectory::new(pool)));
    }

    let directory = match &config.users_file {
        Some(path) => {
            let directory = InMemoryDirectory::from_json_file(path)?;
            tracing::info!(path = %path, users = directory.len(), "Identity directory: users file");
            directory
        }
        None if config.env == Env::Local => {
            tracing::warn!("No DATABASE_URL or USERS_FILE set; using seeded local users");
            InMemoryDirectory::seeded()
        }
        None => InMemoryDirectory::default(),
    };

    Ok(Arc::new(directory))
}
