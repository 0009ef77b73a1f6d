use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use musicbox_api::auth::Authenticator;
use musicbox_api::config::{self, AppConfig, StorageBackend};
use musicbox_api::database::{DatabaseManager, MemoryDatabase, PgDatabase};
use musicbox_api::routes;
use musicbox_api::state::AppState;

#[derive(Parser)]
#[command(name = "musicbox-api")]
#[command(about = "REST backend for users, music tracks, genres and playlists")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Bind address, overrides SERVER_HOST")]
        host: Option<String>,
        #[arg(long, help = "Listen port, overrides MUSICBOX_API_PORT / PORT")]
        port: Option<u16>,
        #[arg(long, value_enum, help = "Storage backend, overrides STORAGE_BACKEND")]
        storage: Option<StorageBackend>,
    },

    #[command(about = "Apply database migrations and exit")]
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = config::config().clone();
    tracing::info!("Starting musicbox-api in {:?} mode", config.environment);

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        storage: None,
    }) {
        Commands::Serve { host, port, storage } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(storage) = storage {
                config.database.backend = storage;
            }
            serve(config).await
        }
        Commands::Migrate => {
            let manager = DatabaseManager::connect(&config.database).await?;
            manager.migrate().await?;
            manager.close().await;
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let expires_in = config
        .security
        .token_lifetime()
        .context("SECURITY_JWT_EXPIRY_HOURS is out of range")?;
    let authenticator = Arc::new(
        Authenticator::new(&config.security.jwt_secret, expires_in)
            .context("SECURITY_JWT_SECRET (or JWT_SECRET) must be set")?,
    );

    let (state, manager) = match config.database.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            let database = Arc::new(MemoryDatabase::new());
            (AppState::from_database(database, authenticator), None)
        }
        StorageBackend::Postgres => {
            let manager = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to Postgres")?;
            manager.migrate().await?;
            let database = Arc::new(PgDatabase::new(manager.pool()));
            (AppState::from_database(database, authenticator), Some(manager))
        }
    };

    let app = routes::app(state, &config.api, &config.security);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("musicbox-api listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(manager) = manager {
        manager.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
