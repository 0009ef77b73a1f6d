use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the persistence collaborators
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Map unique-constraint violations to `Conflict`, leaving other sqlx errors intact
    pub fn from_sqlx(err: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return DatabaseError::Conflict(conflict_message.to_string());
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// Owns the Postgres connection pool for the process
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Connect using `DATABASE_URL` and the pool settings from config
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!(
            "Created database pool (max_connections={})",
            config.max_connections
        );
        Ok(Self { pool })
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Apply the embedded migrations under `migrations/`
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, StorageBackend};

    #[tokio::test]
    async fn connect_requires_database_url() {
        let mut config = AppConfig::development().database;
        config.url = None;
        config.backend = StorageBackend::Postgres;

        match DatabaseManager::connect(&config).await {
            Err(DatabaseError::ConfigMissing(key)) => assert_eq!(key, "DATABASE_URL"),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("connected without a url"),
        }
    }
}
