use async_trait::async_trait;
use types::{Category, CategoryUpdate, Game, GameUpdate, NewCategory, NewGame};

use super::media::ImageUpload;
use crate::{AuthError, DatabaseError, Session, UploadError};

/// Games and categories, keyed by id.
///
/// Reads after writes are not guaranteed to be consistent; callers re-fetch
/// after a mutation.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Newest first.
    async fn list_games(&self) -> Result<Vec<Game>, DatabaseError>;
    async fn get_game(&self, id: &str) -> Result<Option<Game>, DatabaseError>;
    async fn create_game(&self, game: NewGame) -> Result<Game, DatabaseError>;
    async fn update_game(&self, id: &str, update: GameUpdate) -> Result<Game, DatabaseError>;
    async fn delete_game(&self, id: &str) -> Result<(), DatabaseError>;

    /// Alphabetical by name.
    async fn list_categories(&self) -> Result<Vec<Category>, DatabaseError>;
    async fn create_category(&self, category: NewCategory) -> Result<Category, DatabaseError>;
    async fn update_category(
        &self,
        id: &str,
        update: CategoryUpdate,
    ) -> Result<Category, DatabaseError>;
    async fn delete_category(&self, id: &str) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, AuthError>;
    async fn sign_out(&mut self) -> Result<(), AuthError>;
    async fn current_session(&mut self) -> Result<Option<Session>, AuthError>;
}

/// Object storage for uploaded images.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Stores `image` for the game `associated_id` and returns its public URL.
    /// Callers validate the upload first.
    async fn upload(&self, image: &ImageUpload, associated_id: &str)
        -> Result<String, UploadError>;
    async fn delete(&self, public_url: &str) -> Result<(), UploadError>;
}
