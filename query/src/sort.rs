use std::{cmp::Ordering, fmt::Display, str::FromStr};

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use types::Game;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Highest rated first.
    #[default]
    Rating,
    /// Alphabetical, Ukrainian collation.
    Name,
    /// Shortest first.
    PlayTime,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Rating, SortKey::Name, SortKey::PlayTime];

    /// Lenient lookup: anything unrecognized is `None`, which leaves the
    /// list in input order.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rating" => Some(Self::Rating),
            "name" => Some(Self::Name),
            "playTime" | "play-time" | "play_time" => Some(Self::PlayTime),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Name => "name",
            Self::PlayTime => "playTime",
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown sort key: {s}"))
    }
}

/// String ordering for game names.
pub enum NameOrder {
    Ukrainian(Box<Collator>),
    /// Used only if the collation data cannot be loaded.
    Codepoint,
}

impl NameOrder {
    pub fn ukrainian() -> Self {
        match Collator::try_new(&locale!("uk").into(), CollatorOptions::new()) {
            Ok(collator) => Self::Ukrainian(Box::new(collator)),
            Err(e) => {
                log::warn!("Ukrainian collation unavailable, sorting by codepoint: {e}");
                Self::Codepoint
            }
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Ukrainian(collator) => collator.compare(a, b),
            Self::Codepoint => a.cmp(b),
        }
    }
}

/// Stable sort of `games` by `key`.
pub fn sort_games(games: &mut [&Game], key: SortKey) {
    match key {
        SortKey::Rating => games.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Name => {
            let order = NameOrder::ukrainian();
            games.sort_by(|a, b| order.compare(&a.name, &b.name));
        }
        SortKey::PlayTime => games.sort_by_key(|game| game.play_time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_keys_leniently() {
        assert_eq!(SortKey::from_name("rating"), Some(SortKey::Rating));
        assert_eq!(SortKey::from_name("playTime"), Some(SortKey::PlayTime));
        assert_eq!(SortKey::from_name("play-time"), Some(SortKey::PlayTime));
        assert_eq!(SortKey::from_name("popularity"), None);
        assert!("Name".parse::<SortKey>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_name() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_name(&key.to_string()), Some(key));
        }
    }

    #[test]
    fn ukrainian_order_differs_from_codepoints() {
        let order = NameOrder::ukrainian();
        // Ґ (U+0490) sorts before Д (U+0414) in the alphabet.
        assert_eq!(order.compare("Ґудзик", "Дім"), Ordering::Less);
        assert_eq!(order.compare("азов", "Бабка"), Ordering::Less);
        assert_eq!(order.compare("Бабка", "Іграшка"), Ordering::Less);
    }
}
