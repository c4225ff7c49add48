use serde::{Deserialize, Serialize};
use types::{Category, Game};

/// A `games` row joined with its category name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GameRow {
    pub id: String,
    pub name: String,
    pub name_en: Option<String>,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub description: String,
    pub rating: f64,
    pub min_players: u32,
    pub max_players: u32,
    pub play_time: u32,
    pub image: Option<String>,
    pub category_name: Option<String>,
    pub video_url: Option<String>,
    pub is_favorite: bool,
    pub language: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<GameRow> for Game {
    fn from(row: GameRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            name_en: row.name_en,
            short_description: row.short_description,
            full_description: row.full_description,
            description: row.description,
            rating: row.rating,
            min_players: row.min_players,
            max_players: row.max_players,
            play_time: row.play_time,
            image: row.image,
            category: row.category_name,
            video_url: row.video_url,
            is_favorite: Some(row.is_favorite),
            language: row.language,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            color: row.color,
            created_at: row.created_at,
        }
    }
}

/// A signed-in admin session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub email: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= chrono::Utc::now()
    }
}
