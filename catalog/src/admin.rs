use database::{CatalogStore, ImageUpload, MediaStore, Session, SessionProvider};
use types::{
    category::normalize_color, Category, CategoryUpdate, Game, GameUpdate, NewCategory, NewGame,
};

use crate::AppError;

/// The game editor's fields, as typed in. Empty strings mean "not set".
#[derive(Debug, Clone, PartialEq)]
pub struct GameForm {
    pub name: String,
    pub name_en: String,
    pub short_description: String,
    pub full_description: String,
    pub rating: f64,
    pub min_players: u32,
    pub max_players: u32,
    pub play_time: u32,
    pub image: String,
    pub category: String,
    pub video_url: String,
    pub language: String,
}

impl Default for GameForm {
    fn default() -> Self {
        let defaults = NewGame::default();
        Self {
            name: String::new(),
            name_en: String::new(),
            short_description: String::new(),
            full_description: String::new(),
            rating: defaults.rating,
            min_players: defaults.min_players,
            max_players: defaults.max_players,
            play_time: defaults.play_time,
            image: String::new(),
            category: String::new(),
            video_url: String::new(),
            language: String::new(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl GameForm {
    pub fn validate(&self) -> Result<NewGame, AppError> {
        let name = non_empty(&self.name)
            .ok_or_else(|| AppError::InvalidGame("name is required".to_string()))?;
        check_numbers(self.rating, self.min_players, self.max_players, self.play_time)?;

        let mut game = NewGame::new(name);
        game.name_en = non_empty(&self.name_en);
        game.short_description = non_empty(&self.short_description);
        game.rating = self.rating;
        game.min_players = self.min_players;
        game.max_players = self.max_players;
        game.play_time = self.play_time;
        game.image = non_empty(&self.image);
        game.category = non_empty(&self.category);
        game.video_url = non_empty(&self.video_url);
        game.language = non_empty(&self.language);
        Ok(match non_empty(&self.full_description) {
            Some(text) => game.with_full_description(text),
            None => game,
        })
    }
}

fn check_numbers(
    rating: f64,
    min_players: u32,
    max_players: u32,
    play_time: u32,
) -> Result<(), AppError> {
    if !(1.0..=5.0).contains(&rating) {
        return Err(AppError::InvalidGame(format!(
            "rating must be between 1 and 5, got {rating}"
        )));
    }
    if min_players == 0 || play_time == 0 {
        return Err(AppError::InvalidGame(
            "player count and play time must be positive".to_string(),
        ));
    }
    if min_players > max_players {
        return Err(AppError::InvalidGame(format!(
            "min players ({min_players}) exceeds max players ({max_players})"
        )));
    }
    Ok(())
}

/// Admin operations. Every call checks for a live session first.
///
/// Mutations go straight to the store; callers re-fetch their snapshot on
/// success and keep it as is on failure.
pub struct AdminService {
    store: Box<dyn CatalogStore>,
    media: Box<dyn MediaStore>,
    sessions: Box<dyn SessionProvider>,
}

impl AdminService {
    pub fn new(
        store: Box<dyn CatalogStore>,
        media: Box<dyn MediaStore>,
        sessions: Box<dyn SessionProvider>,
    ) -> Self {
        Self {
            store,
            media,
            sessions,
        }
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, AppError> {
        self.sessions.sign_in(email, password).await.map_err(|e| {
            log::error!("Error signing in: {e}");
            AppError::SignIn(e)
        })
    }

    pub async fn sign_out(&mut self) -> Result<(), AppError> {
        self.sessions.sign_out().await.map_err(|e| {
            log::error!("Error signing out: {e}");
            AppError::SignOut(e)
        })
    }

    pub async fn session(&mut self) -> Result<Option<Session>, AppError> {
        self.sessions.current_session().await.map_err(|e| {
            log::error!("Error checking auth: {e}");
            AppError::SignIn(e)
        })
    }

    async fn require_session(&mut self) -> Result<Session, AppError> {
        self.session().await?.ok_or(AppError::NotSignedIn)
    }

    /// Creates a game, then uploads its image under the new id.
    ///
    /// If the upload fails the new game is removed again.
    pub async fn create_game(
        &mut self,
        form: &GameForm,
        image: Option<ImageUpload>,
    ) -> Result<Game, AppError> {
        self.require_session().await?;
        let new_game = form.validate()?;
        if let Some(image) = &image {
            image.validate()?;
        }

        let game = self.store.create_game(new_game).await.map_err(|e| {
            log::error!("Error creating game: {e}");
            AppError::SaveGame(e)
        })?;

        let Some(image) = image else {
            return Ok(game);
        };
        let url = match self.media.upload(&image, &game.id).await {
            Ok(url) => url,
            Err(e) => {
                log::error!("Error uploading image for {}: {e}", game.id);
                if let Err(cleanup) = self.store.delete_game(&game.id).await {
                    log::warn!("Could not roll back game {}: {cleanup}", game.id);
                }
                return Err(e.into());
            }
        };
        self.store
            .update_game(&game.id, GameUpdate::image(url))
            .await
            .map_err(|e| {
                log::error!("Error attaching image to {}: {e}", game.id);
                AppError::SaveGame(e)
            })
    }

    /// Applies `update` to game `id`, uploading `image` first if given.
    pub async fn update_game(
        &mut self,
        id: &str,
        mut update: GameUpdate,
        image: Option<ImageUpload>,
    ) -> Result<Game, AppError> {
        self.require_session().await?;
        let current = self.existing_game(id).await?;
        validate_update(&current, &update)?;

        let mut uploaded = None;
        if let Some(image) = image {
            image.validate()?;
            let url = self.media.upload(&image, id).await.map_err(|e| {
                log::error!("Error uploading image for {id}: {e}");
                AppError::Upload(e)
            })?;
            update.image = Some(Some(url.clone()));
            uploaded = Some(url);
        }

        let replaces_image = update.image.is_some() && update.image.as_ref() != Some(&current.image);
        let updated = match self.store.update_game(id, update).await {
            Ok(game) => game,
            Err(e) => {
                log::error!("Error updating game {id}: {e}");
                if let Some(url) = uploaded {
                    self.discard_image(&url).await;
                }
                return Err(AppError::SaveGame(e));
            }
        };

        if replaces_image {
            if let Some(old) = current.image.as_deref() {
                self.discard_image(old).await;
            }
        }
        Ok(updated)
    }

    pub async fn delete_game(&mut self, id: &str) -> Result<(), AppError> {
        self.require_session().await?;
        let game = self.existing_game(id).await?;
        self.store.delete_game(id).await.map_err(|e| {
            log::error!("Error deleting game {id}: {e}");
            AppError::DeleteGame(e)
        })?;
        if let Some(image) = game.image.as_deref() {
            self.discard_image(image).await;
        }
        Ok(())
    }

    pub async fn create_category(
        &mut self,
        name: &str,
        color: Option<&str>,
    ) -> Result<Category, AppError> {
        self.require_session().await?;
        let name = non_empty(name)
            .ok_or_else(|| AppError::InvalidCategory("name is required".to_string()))?;
        let color = color.map(parse_color).transpose()?.flatten();
        self.store
            .create_category(NewCategory { name, color })
            .await
            .map_err(|e| {
                log::error!("Error creating category: {e}");
                AppError::SaveCategory(e)
            })
    }

    /// `color: Some("")` clears the color.
    pub async fn update_category(
        &mut self,
        id: &str,
        name: Option<&str>,
        color: Option<&str>,
    ) -> Result<Category, AppError> {
        self.require_session().await?;
        let name = match name {
            Some(name) => Some(non_empty(name).ok_or_else(|| {
                AppError::InvalidCategory("name cannot be empty".to_string())
            })?),
            None => None,
        };
        let update = CategoryUpdate {
            name,
            color: color.map(parse_color).transpose()?,
        };
        self.store.update_category(id, update).await.map_err(|e| {
            log::error!("Error updating category {id}: {e}");
            AppError::SaveCategory(e)
        })
    }

    pub async fn delete_category(&mut self, id: &str) -> Result<(), AppError> {
        self.require_session().await?;
        self.store.delete_category(id).await.map_err(|e| {
            log::error!("Error deleting category {id}: {e}");
            AppError::DeleteCategory(e)
        })
    }

    /// Creates any of `names` that do not exist yet. Returns how many were added.
    pub async fn seed_categories(&mut self, names: &[&str]) -> Result<usize, AppError> {
        self.require_session().await?;
        let existing = self.store.list_categories().await.map_err(AppError::Load)?;
        let mut added = 0;
        for name in names {
            if existing.iter().any(|c| c.name == *name) {
                continue;
            }
            self.store
                .create_category(NewCategory::new(*name))
                .await
                .map_err(AppError::SaveCategory)?;
            added += 1;
        }
        Ok(added)
    }

    async fn existing_game(&self, id: &str) -> Result<Game, AppError> {
        match self.store.get_game(id).await {
            Ok(Some(game)) => Ok(game),
            Ok(None) => Err(AppError::GameNotFound(id.to_string())),
            Err(e) => Err(AppError::Load(e)),
        }
    }

    async fn discard_image(&self, url: &str) {
        if let Err(e) = self.media.delete(url).await {
            log::warn!("Could not delete image {url}: {e}");
        }
    }
}

fn parse_color(raw: &str) -> Result<Option<String>, AppError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    normalize_color(raw)
        .map(Some)
        .ok_or_else(|| AppError::InvalidCategory(format!("not a hex color: {raw}")))
}

/// Checks `update` against the values it would leave on `current`.
fn validate_update(current: &Game, update: &GameUpdate) -> Result<(), AppError> {
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(AppError::InvalidGame("name is required".to_string()));
        }
    }
    check_numbers(
        update.rating.unwrap_or(current.rating),
        update.min_players.unwrap_or(current.min_players),
        update.max_players.unwrap_or(current.max_players),
        update.play_time.unwrap_or(current.play_time),
    )
}
