use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categories a fresh catalog starts out with.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Стратегія",
    "Сімейна",
    "Природа",
    "Кооперативна",
    "Абстрактна",
    "Економічна",
    "Військова",
    "Детективна",
    "Фентезі",
    "Наукова фантастика",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub color: Option<String>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub color: Option<Option<String>>,
}

impl CategoryUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Normalizes a user supplied hex color to `#rrggbb` (lowercase).
///
/// Accepts `#rgb`, `rgb`, `#rrggbb` and `rrggbb`. Returns `None` for anything else.
pub fn normalize_color(raw: &str) -> Option<String> {
    let hex = raw.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => hex.to_string(),
        _ => return None,
    };
    Some(format!("#{}", expanded.to_ascii_lowercase()))
}
