use types::{FavoriteIds, Game};

use crate::sort::{sort_games, SortKey};

/// What the visitor asked to see.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameQuery {
    pub search_query: String,
    /// Category name, or empty for all categories.
    pub filter_category: String,
    pub show_favorites_only: bool,
    /// `None` keeps the input order.
    pub sort_by: Option<SortKey>,
}

impl GameQuery {
    pub fn new() -> Self {
        Self {
            sort_by: Some(SortKey::default()),
            ..Default::default()
        }
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_query = text.into();
        self
    }

    pub fn category(mut self, name: impl Into<String>) -> Self {
        self.filter_category = name.into();
        self
    }

    pub fn favorites_only(mut self, only: bool) -> Self {
        self.show_favorites_only = only;
        self
    }

    pub fn sort_by(mut self, key: Option<SortKey>) -> Self {
        self.sort_by = key;
        self
    }
}

/// Games from `games` matching `params`, in display order.
///
/// Stages run in a fixed order: text search, category, favorites, sort. The
/// input slice is never reordered.
pub fn query<'a>(games: &'a [Game], params: &GameQuery, favorites: &FavoriteIds) -> Vec<&'a Game> {
    let needle = params.search_query.to_lowercase();
    let mut selected: Vec<&Game> = games
        .iter()
        .filter(|game| needle.is_empty() || matches_text(game, &needle))
        .filter(|game| {
            params.filter_category.is_empty()
                || game.category.as_deref() == Some(params.filter_category.as_str())
        })
        .filter(|game| !params.show_favorites_only || is_favorite(game, favorites))
        .collect();

    if let Some(key) = params.sort_by {
        sort_games(&mut selected, key);
    }

    log::debug!(
        "query {:?} matched {} of {} games",
        params,
        selected.len(),
        games.len()
    );
    selected
}

fn matches_text(game: &Game, needle: &str) -> bool {
    [
        Some(game.name.as_str()),
        game.name_en.as_deref(),
        game.short_description.as_deref(),
        game.full_description.as_deref(),
        Some(game.description.as_str()),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

fn is_favorite(game: &Game, favorites: &FavoriteIds) -> bool {
    game.is_favorite == Some(true) || favorites.contains(&game.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str, name: &str, rating: f64, play_time: u32) -> Game {
        Game {
            id: id.to_string(),
            name: name.to_string(),
            name_en: None,
            short_description: None,
            full_description: None,
            description: String::new(),
            rating,
            min_players: 2,
            max_players: 4,
            play_time,
            image: None,
            category: None,
            video_url: None,
            is_favorite: None,
            language: None,
        }
    }

    fn ids(games: &[&Game]) -> Vec<String> {
        games.iter().map(|g| g.id.clone()).collect()
    }

    #[test]
    fn search_checks_every_text_field() {
        let mut by_en = game("en", "Квитки", 4.0, 30);
        by_en.name_en = Some("Ticket to Ride".to_string());
        let mut by_short = game("short", "А", 4.0, 30);
        by_short.short_description = Some("про залізниці".to_string());
        let mut by_full = game("full", "Б", 4.0, 30);
        by_full.full_description = Some("Залізниця через Європу".to_string());
        let mut by_legacy = game("legacy", "В", 4.0, 30);
        by_legacy.description = "стара ЗАЛІЗНИЦЯ".to_string();
        let miss = game("miss", "Шахи", 4.0, 30);
        let games = vec![by_en, by_short, by_full, by_legacy, miss];

        let params = GameQuery::new().search("Залізниц").sort_by(None);
        let found = query(&games, &params, &FavoriteIds::new());
        assert_eq!(ids(&found), vec!["short", "full", "legacy"]);

        let params = GameQuery::new().search("TICKET").sort_by(None);
        let found = query(&games, &params, &FavoriteIds::new());
        assert_eq!(ids(&found), vec!["en"]);
    }

    #[test]
    fn category_match_is_exact() {
        let mut a = game("a", "A", 4.0, 30);
        a.category = Some("Стратегія".to_string());
        let mut b = game("b", "B", 4.0, 30);
        b.category = Some("стратегія".to_string());
        let mut c = game("c", "C", 4.0, 30);
        c.category = Some("Стратегія ".to_string());
        let d = game("d", "D", 4.0, 30);
        let games = vec![a, b, c, d];

        let params = GameQuery::new().category("Стратегія");
        let found = query(&games, &params, &FavoriteIds::new());
        assert_eq!(ids(&found), vec!["a"]);
    }

    #[test]
    fn favorites_come_from_flag_or_local_set() {
        let mut flagged = game("flagged", "A", 4.0, 30);
        flagged.is_favorite = Some(true);
        let mut local = game("local", "B", 4.0, 30);
        local.is_favorite = Some(false);
        let neither = game("neither", "C", 4.0, 30);
        let games = vec![flagged, local, neither];
        let favorites: FavoriteIds = ["local"].into_iter().collect();

        let params = GameQuery::new().favorites_only(true).sort_by(None);
        let found = query(&games, &params, &favorites);
        assert_eq!(ids(&found), vec!["flagged", "local"]);
    }

    #[test]
    fn rating_sort_is_descending_and_stable() {
        let games = vec![
            game("a", "A", 4.0, 30),
            game("b", "B", 4.8, 30),
            game("c", "C", 4.0, 30),
            game("d", "D", 4.8, 30),
        ];
        let found = query(&games, &GameQuery::new(), &FavoriteIds::new());
        assert_eq!(ids(&found), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn play_time_sort_is_ascending() {
        let games = vec![
            game("long", "A", 4.0, 120),
            game("short", "B", 4.0, 15),
            game("mid", "C", 4.0, 45),
        ];
        let params = GameQuery::new().sort_by(Some(SortKey::PlayTime));
        let found = query(&games, &params, &FavoriteIds::new());
        assert_eq!(ids(&found), vec!["short", "mid", "long"]);
    }

    #[test]
    fn unknown_sort_key_keeps_input_order() {
        let games = vec![game("a", "Я", 1.0, 90), game("b", "А", 5.0, 10)];
        let params = GameQuery::new().sort_by(SortKey::from_name("random"));
        let found = query(&games, &params, &FavoriteIds::new());
        assert_eq!(ids(&found), vec!["a", "b"]);
    }
}
