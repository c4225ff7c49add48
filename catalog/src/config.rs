use std::path::{Path, PathBuf};

use database::DatabaseConfig;
use serde::{Deserialize, Serialize};

use crate::AppError;

pub const CONFIG_ENV: &str = "CATALOG_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "catalog.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub database_url: Option<String>,
    /// Directory holding uploaded images.
    pub media_dir: PathBuf,
    /// URL prefix under which `media_dir` is served.
    pub public_base_url: String,
    /// Client-local favorites (JSON array of game ids).
    pub favorites_path: PathBuf,
    /// Where the admin session token is kept between runs.
    pub session_path: PathBuf,
    pub session_ttl_hours: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            media_dir: PathBuf::from("media"),
            public_base_url: "http://localhost:8000/storage".to_string(),
            favorites_path: PathBuf::from("favorites.json"),
            session_path: PathBuf::from(".catalog-session"),
            session_ttl_hours: 24 * 7,
        }
    }
}

impl CatalogConfig {
    /// Reads the config from `cli_path`, then `$CATALOG_CONFIG`, then
    /// `catalog.yaml`. Only an explicitly named file has to exist.
    pub fn load(cli_path: Option<&Path>) -> Result<Self, AppError> {
        let (path, required) = match cli_path {
            Some(path) => (path.to_path_buf(), true),
            None => match std::env::var(CONFIG_ENV) {
                Ok(env) => (PathBuf::from(env), true),
                Err(_) => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(yaml) => {
                log::info!("Loading config from {}", path.display());
                Self::from_yaml_str(&yaml)
            }
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(AppError::Config(format!("{}: {e}", path.display()))),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, AppError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| AppError::Config(e.to_string()))?;
        if config.session_ttl_hours <= 0 {
            return Err(AppError::Config(format!(
                "session_ttl_hours must be positive, got {}",
                config.session_ttl_hours
            )));
        }
        Ok(config)
    }

    pub fn database(&self, cli_url: Option<String>) -> DatabaseConfig {
        DatabaseConfig::from_cli_or_env_or_yaml(cli_url, self.database_url.clone())
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours)
    }
}
