use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use types::{Category, CategoryUpdate, Game, GameUpdate, NewCategory, NewGame};
use uuid::Uuid;

use super::CatalogStore;
use crate::{CategoryRow, DatabaseError, GameRow};

const SELECT_GAMES: &str = "SELECT g.id, g.name, g.name_en, g.short_description, \
     g.full_description, g.description, g.rating, g.min_players, g.max_players, g.play_time, \
     g.image, c.name AS category_name, g.video_url, g.is_favorite, g.language, g.created_at \
     FROM games g LEFT JOIN categories c ON c.id = g.category_id";

pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn category_id(&self, name: &str) -> Result<Option<String>, DatabaseError> {
        sqlx::query_scalar::<_, String>("SELECT id FROM categories WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))
    }

    async fn get_category(&self, id: &str) -> Result<Option<Category>, DatabaseError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, color, created_at FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
        Ok(row.map(Category::from))
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn list_games(&self) -> Result<Vec<Game>, DatabaseError> {
        let rows = sqlx::query_as::<_, GameRow>(&format!(
            "{SELECT_GAMES} ORDER BY g.created_at DESC, g.rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
        Ok(rows.into_iter().map(Game::from).collect())
    }

    async fn get_game(&self, id: &str) -> Result<Option<Game>, DatabaseError> {
        let row = sqlx::query_as::<_, GameRow>(&format!("{SELECT_GAMES} WHERE g.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;
        Ok(row.map(Game::from))
    }

    async fn create_game(&self, game: NewGame) -> Result<Game, DatabaseError> {
        let category_id = match game.category.as_deref() {
            Some(name) if !name.is_empty() => {
                let id = self.category_id(name).await?;
                if id.is_none() {
                    tracing::warn!("Unknown category {name:?}, creating game without one");
                }
                id
            }
            _ => None,
        };

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO games (id, name, name_en, short_description, full_description, description, \
             rating, min_players, max_players, play_time, image, category_id, video_url, is_favorite, \
             language, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&game.name)
        .bind(&game.name_en)
        .bind(&game.short_description)
        .bind(&game.full_description)
        .bind(&game.description)
        .bind(game.rating)
        .bind(game.min_players)
        .bind(game.max_players)
        .bind(game.play_time)
        .bind(&game.image)
        .bind(category_id)
        .bind(&game.video_url)
        .bind(game.is_favorite.unwrap_or(false))
        .bind(&game.language)
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;

        tracing::info!("Created game {id} ({})", game.name);
        let created = self.get_game(&id).await?;
        created.ok_or(DatabaseError::GameNotFound(id))
    }

    async fn update_game(&self, id: &str, update: GameUpdate) -> Result<Game, DatabaseError> {
        // `Some(None)` clears the category; an unknown name leaves it as is.
        let category_id: Option<Option<String>> = match update.category {
            None => None,
            Some(None) => Some(None),
            Some(Some(name)) if name.is_empty() => Some(None),
            Some(Some(name)) => match self.category_id(&name).await? {
                Some(category_id) => Some(Some(category_id)),
                None => {
                    tracing::warn!("Unknown category {name:?}, keeping current category of {id}");
                    None
                }
            },
        };

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE games SET ");
        let mut fields = builder.separated(", ");
        let mut changed = false;
        macro_rules! set {
            ($column:literal, $value:expr) => {
                if let Some(value) = $value {
                    fields.push(concat!($column, " = "));
                    fields.push_bind_unseparated(value);
                    changed = true;
                }
            };
        }
        set!("name", update.name);
        set!("name_en", update.name_en);
        set!("short_description", update.short_description);
        set!("full_description", update.full_description);
        set!("description", update.description);
        set!("rating", update.rating);
        set!("min_players", update.min_players);
        set!("max_players", update.max_players);
        set!("play_time", update.play_time);
        set!("image", update.image);
        set!("category_id", category_id);
        set!("video_url", update.video_url);
        set!("is_favorite", update.is_favorite);
        set!("language", update.language);

        if changed {
            builder.push(" WHERE id = ").push_bind(id);
            let result = builder
                .build()
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::Query(e.to_string()))?;
            if result.rows_affected() == 0 {
                return Err(DatabaseError::GameNotFound(id.to_string()));
            }
            tracing::info!("Updated game {id}");
        }

        self.get_game(id)
            .await?
            .ok_or_else(|| DatabaseError::GameNotFound(id.to_string()))
    }

    async fn delete_game(&self, id: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM games WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::GameNotFound(id.to_string()));
        }
        tracing::info!("Deleted game {id}");
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DatabaseError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, color, created_at FROM categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category, DatabaseError> {
        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO categories (id, name, color, created_at) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(&category.name)
            .bind(&category.color)
            .bind(chrono::Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        tracing::info!("Created category {id} ({})", category.name);
        let created = self.get_category(&id).await?;
        created.ok_or(DatabaseError::CategoryNotFound(id))
    }

    async fn update_category(
        &self,
        id: &str,
        update: CategoryUpdate,
    ) -> Result<Category, DatabaseError> {
        if !update.is_empty() {
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE categories SET ");
            let mut fields = builder.separated(", ");
            if let Some(name) = update.name {
                fields.push("name = ");
                fields.push_bind_unseparated(name);
            }
            if let Some(color) = update.color {
                fields.push("color = ");
                fields.push_bind_unseparated(color);
            }
            builder.push(" WHERE id = ").push_bind(id);
            let result = builder
                .build()
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::Query(e.to_string()))?;
            if result.rows_affected() == 0 {
                return Err(DatabaseError::CategoryNotFound(id.to_string()));
            }
            tracing::info!("Updated category {id}");
        }

        self.get_category(id)
            .await?
            .ok_or_else(|| DatabaseError::CategoryNotFound(id.to_string()))
    }

    async fn delete_category(&self, id: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::CategoryNotFound(id.to_string()));
        }
        tracing::info!("Deleted category {id}");
        Ok(())
    }
}
