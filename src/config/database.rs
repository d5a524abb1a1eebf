use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::{MySql, QueryBuilder};

use crate::core::{AppError, Result};

/// Read-only pool over the reporting views.
///
/// Report queries scan large views, so every session is capped with
/// `MAX_EXECUTION_TIME` and opened read-only.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    /// Connections kept warm
    pub pool_size: u32,
    pub max_connections: u32,
    /// Wait for a free connection before a report fails
    pub acquire_timeout_secs: u64,
    /// Server-side cap on a single report statement
    pub query_timeout_ms: u64,
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", key))),
        Err(_) => Ok(default),
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(DatabaseConfig {
            url: env::var("DATABASE_URL")
                .map_err(|_| AppError::Configuration("DATABASE_URL not set".to_string()))?,
            pool_size: env_or("DATABASE_POOL_SIZE", 5)?,
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 20)?,
            acquire_timeout_secs: env_or("DATABASE_ACQUIRE_TIMEOUT_SECS", 10)?,
            query_timeout_ms: env_or("DATABASE_QUERY_TIMEOUT_MS", 60_000)?,
        })
    }

    /// Statement run on every new connection
    pub fn session_setup(&self) -> String {
        format!(
            "SET SESSION MAX_EXECUTION_TIME = {}, SESSION transaction_read_only = ON",
            self.query_timeout_ms
        )
    }

    pub async fn create_pool(&self) -> Result<MySqlPool> {
        tracing::info!(
            max_connections = self.max_connections,
            query_timeout_ms = self.query_timeout_ms,
            "Connecting to reporting database"
        );

        let session = self.session_setup();
        MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.pool_size)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .test_before_acquire(true)
            .after_connect(move |conn, _meta| {
                let session = session.clone();
                Box::pin(async move {
                    sqlx::query(&session).execute(conn).await?;
                    Ok(())
                })
            })
            .connect(&self.url)
            .await
            .map_err(AppError::Database)
    }
}

/// Report views absent from the connected schema
pub async fn missing_views(pool: &MySqlPool, views: &[&'static str]) -> Result<Vec<&'static str>> {
    if views.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<MySql>::new(
        "SELECT CAST(TABLE_NAME AS CHAR) FROM information_schema.TABLES \
         WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME IN (",
    );
    let mut names = builder.separated(", ");
    for view in views {
        names.push_bind(*view);
    }
    names.push_unseparated(")");

    let found: Vec<String> = builder.build_query_scalar().fetch_all(pool).await?;
    Ok(views
        .iter()
        .copied()
        .filter(|view| !found.iter().any(|name| name.eq_ignore_ascii_case(view)))
        .collect())
}
