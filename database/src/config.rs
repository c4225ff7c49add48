use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::DatabaseError;

pub const DEFAULT_URL: &str = "sqlite://catalog.db";
const MEMORY_URL: &str = "sqlite::memory:";

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

impl DatabaseConfig {
    pub fn from_cli_or_env_or_yaml(cli_arg: Option<String>, yaml_config: Option<String>) -> Self {
        let url = if let Some(arg) = cli_arg {
            arg
        } else if let Ok(env) = std::env::var("DATABASE_URL") {
            env
        } else if let Some(yaml) = yaml_config {
            yaml
        } else {
            DEFAULT_URL.to_string()
        };

        Self::new(url)
    }

    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        // Every connection to an in-memory database sees its own empty copy.
        let pool_size = if url.contains(":memory:") { 1 } else { 5 };
        Self { url, pool_size }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }

    pub fn in_memory() -> Self {
        Self::new(MEMORY_URL)
    }

    pub async fn create_pool(&self) -> Result<sqlx::SqlitePool, DatabaseError> {
        let options = SqliteConnectOptions::from_str(&self.url)
            .map_err(|e| DatabaseError::Connection(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(self.pool_size);
        if self.is_in_memory() {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }
        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;
        tracing::info!("Connected to {}", self.url);
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins() {
        let config = DatabaseConfig::from_cli_or_env_or_yaml(
            Some("sqlite://cli.db".to_string()),
            Some("sqlite://yaml.db".to_string()),
        );
        assert_eq!(config.url, "sqlite://cli.db");
        assert_eq!(config.pool_size, 5);
    }

    #[test]
    fn in_memory_uses_single_connection() {
        assert_eq!(DatabaseConfig::in_memory().pool_size, 1);
    }

    #[tokio::test]
    async fn creates_in_memory_pool() {
        let pool = DatabaseConfig::in_memory().create_pool().await.unwrap();
        crate::run_migrations(&pool).await.unwrap();
    }
}
