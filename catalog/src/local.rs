//! State kept on this client only: favorites and the admin session token.

use std::path::{Path, PathBuf};

use types::FavoriteIds;

use crate::AppError;

pub struct FavoritesFile {
    path: PathBuf,
}

impl FavoritesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable file counts as no favorites.
    pub async fn load(&self) -> FavoriteIds {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Could not read {}: {e}", self.path.display());
                }
                return FavoriteIds::new();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed favorites in {}: {e}", self.path.display());
            FavoriteIds::new()
        })
    }

    pub async fn save(&self, favorites: &FavoriteIds) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(&favorites.sorted())
            .map_err(|e| AppError::LocalState(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| AppError::LocalState(format!("{}: {e}", self.path.display())))
    }

    /// Returns whether `id` is a favorite after the toggle.
    pub async fn toggle(&self, id: &str) -> Result<bool, AppError> {
        let mut favorites = self.load().await;
        let now_favorite = favorites.toggle(id);
        self.save(&favorites).await?;
        log::info!("Game {id} favorite: {now_favorite}");
        Ok(now_favorite)
    }
}

pub struct SessionTokenFile {
    path: PathBuf,
}

impl SessionTokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> Option<String> {
        let token = tokio::fs::read_to_string(&self.path).await.ok()?;
        let token = token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    pub async fn save(&self, token: &str) -> Result<(), AppError> {
        tokio::fs::write(&self.path, token)
            .await
            .map_err(|e| AppError::LocalState(format!("{}: {e}", self.path.display())))
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::LocalState(format!("{}: {e}", self.path.display()))),
        }
    }
}
