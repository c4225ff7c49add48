use database::CatalogStore;
use query::GameQuery;
use types::{Category, FavoriteIds, Game};

use crate::AppError;

/// The snapshot of games and categories a visitor is looking at.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    games: Vec<Game>,
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(games: Vec<Game>, categories: Vec<Category>) -> Self {
        Self { games, categories }
    }

    pub async fn load(store: &dyn CatalogStore) -> Result<Self, AppError> {
        let mut catalog = Self::default();
        catalog.refresh(store).await?;
        Ok(catalog)
    }

    /// Re-fetches both lists. On failure the current snapshot is kept.
    pub async fn refresh(&mut self, store: &dyn CatalogStore) -> Result<(), AppError> {
        let (games, categories) = tokio::try_join!(store.list_games(), store.list_categories())
            .map_err(|e| {
                log::error!("Error loading catalog: {e}");
                AppError::Load(e)
            })?;
        log::debug!(
            "Loaded {} games and {} categories",
            games.len(),
            categories.len()
        );
        self.games = games;
        self.categories = categories;
        Ok(())
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Choices for the category filter, in store order.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn find(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|game| game.id == id)
    }

    pub fn visible(&self, params: &GameQuery, favorites: &FavoriteIds) -> Vec<&Game> {
        query::query(&self.games, params, favorites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use database::DatabaseError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use types::{CategoryUpdate, GameUpdate, NewCategory, NewGame};

    /// Serves a fixed list until told to fail.
    struct FlakyStore {
        games: Vec<Game>,
        failing: AtomicBool,
    }

    impl FlakyStore {
        fn check(&self) -> Result<(), DatabaseError> {
            if self.failing.load(Ordering::SeqCst) {
                Err(DatabaseError::Connection("offline".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl CatalogStore for FlakyStore {
        async fn list_games(&self) -> Result<Vec<Game>, DatabaseError> {
            self.check()?;
            Ok(self.games.clone())
        }
        async fn get_game(&self, _id: &str) -> Result<Option<Game>, DatabaseError> {
            unimplemented!()
        }
        async fn create_game(&self, _game: NewGame) -> Result<Game, DatabaseError> {
            unimplemented!()
        }
        async fn update_game(&self, _id: &str, _u: GameUpdate) -> Result<Game, DatabaseError> {
            unimplemented!()
        }
        async fn delete_game(&self, _id: &str) -> Result<(), DatabaseError> {
            unimplemented!()
        }
        async fn list_categories(&self) -> Result<Vec<Category>, DatabaseError> {
            self.check()?;
            Ok(Vec::new())
        }
        async fn create_category(&self, _c: NewCategory) -> Result<Category, DatabaseError> {
            unimplemented!()
        }
        async fn update_category(
            &self,
            _id: &str,
            _u: CategoryUpdate,
        ) -> Result<Category, DatabaseError> {
            unimplemented!()
        }
        async fn delete_category(&self, _id: &str) -> Result<(), DatabaseError> {
            unimplemented!()
        }
    }

    fn game(id: &str) -> Game {
        Game {
            id: id.to_string(),
            name: format!("Game {id}"),
            name_en: None,
            short_description: None,
            full_description: None,
            description: String::new(),
            rating: 4.0,
            min_players: 1,
            max_players: 4,
            play_time: 30,
            image: None,
            category: None,
            video_url: None,
            is_favorite: None,
            language: None,
        }
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_snapshot() {
        let store = FlakyStore {
            games: vec![game("1"), game("2")],
            failing: AtomicBool::new(false),
        };
        let mut catalog = Catalog::load(&store).await.unwrap();
        assert_eq!(catalog.games().len(), 2);

        store.failing.store(true, Ordering::SeqCst);
        let result = catalog.refresh(&store).await;
        assert!(matches!(result, Err(AppError::Load(_))));
        assert_eq!(catalog.games().len(), 2);
        assert!(catalog.find("2").is_some());
    }

    #[tokio::test]
    async fn test_visible_applies_local_favorites() {
        let catalog = Catalog::new(vec![game("1"), game("2"), game("3")], Vec::new());
        let favorites: FavoriteIds = ["3"].into_iter().collect();
        let visible = catalog.visible(&GameQuery::new().favorites_only(true), &favorites);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "3");
    }
}
