use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A board game as the catalog store returns it.
///
/// `description` is the legacy long-form text. It is written together with
/// `full_description` so older readers keep seeing the same body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(default)]
    pub description: String,
    pub rating: f64,
    pub min_players: u32,
    pub max_players: u32,
    pub play_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Game {
    /// Text shown on a list card: the short blurb, or the legacy description.
    pub fn summary(&self) -> &str {
        match self.short_description.as_deref() {
            Some(short) if !short.is_empty() => short,
            _ => &self.description,
        }
    }

    /// Long-form text for the detail view.
    pub fn body(&self) -> &str {
        match self.full_description.as_deref() {
            Some(full) if !full.is_empty() => full,
            _ => &self.description,
        }
    }

    pub fn players_label(&self) -> String {
        format!("{}-{}", self.min_players, self.max_players)
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name_en {
            Some(name_en) if !name_en.is_empty() => write!(f, "{} ({})", self.name, name_en),
            _ => write!(f, "{}", self.name),
        }
    }
}

/// Payload for creating a game. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
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
    pub category: Option<String>,
    pub video_url: Option<String>,
    pub is_favorite: Option<bool>,
    pub language: Option<String>,
}

impl Default for NewGame {
    fn default() -> Self {
        Self {
            name: String::new(),
            name_en: None,
            short_description: None,
            full_description: None,
            description: String::new(),
            rating: 4.0,
            min_players: 2,
            max_players: 4,
            play_time: 60,
            image: None,
            category: None,
            video_url: None,
            is_favorite: None,
            language: None,
        }
    }
}

impl NewGame {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the full description and mirrors it into the legacy field.
    pub fn with_full_description(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.description = text.clone();
        self.full_description = Some(text);
        self
    }
}

/// Partial update for a game.
///
/// `None` leaves a column alone. For nullable columns `Some(None)` clears the
/// value and `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameUpdate {
    pub name: Option<String>,
    pub name_en: Option<Option<String>>,
    pub short_description: Option<Option<String>>,
    pub full_description: Option<Option<String>>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub min_players: Option<u32>,
    pub max_players: Option<u32>,
    pub play_time: Option<u32>,
    pub image: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub video_url: Option<Option<String>>,
    pub is_favorite: Option<bool>,
    pub language: Option<Option<String>>,
}

impl GameUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Sets the full description and the legacy description in one step.
    pub fn set_full_description(&mut self, text: Option<String>) {
        self.description = Some(text.clone().unwrap_or_default());
        self.full_description = Some(text);
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self {
            image: Some(Some(url.into())),
            ..Default::default()
        }
    }
}

impl From<NewGame> for GameUpdate {
    fn from(game: NewGame) -> Self {
        Self {
            name: Some(game.name),
            name_en: Some(game.name_en),
            short_description: Some(game.short_description),
            full_description: Some(game.full_description),
            description: Some(game.description),
            rating: Some(game.rating),
            min_players: Some(game.min_players),
            max_players: Some(game.max_players),
            play_time: Some(game.play_time),
            image: Some(game.image),
            category: Some(game.category),
            video_url: Some(game.video_url),
            is_favorite: game.is_favorite,
            language: Some(game.language),
        }
    }
}
