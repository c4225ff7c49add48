//! Plain-text views of the catalog.

use std::fmt::Write;

use itertools::Itertools;
use types::{embed_url, image::cover_image, Category, FavoriteIds, Game, StarRating};

const FAVORITE_MARK: &str = "\u{2665}";

fn is_favorite(game: &Game, favorites: &FavoriteIds) -> bool {
    game.is_favorite == Some(true) || favorites.contains(&game.id)
}

fn players_and_time(game: &Game) -> String {
    format!("{} гравців, {} хв", game.players_label(), game.play_time)
}

pub fn game_card(game: &Game, favorites: &FavoriteIds) -> String {
    let mark = if is_favorite(game, favorites) {
        format!(" {FAVORITE_MARK}")
    } else {
        String::new()
    };
    let mut card = format!(
        "[{}] {game}{mark}\n    {} {:.1} | {}",
        game.id,
        StarRating::from_rating(game.rating),
        game.rating,
        players_and_time(game),
    );
    if let Some(category) = game.category.as_deref().filter(|c| !c.is_empty()) {
        let _ = write!(card, " | {category}");
    }
    let summary = game.summary();
    if !summary.is_empty() {
        let _ = write!(card, "\n    {summary}");
    }
    card
}

pub fn game_list(games: &[&Game], favorites: &FavoriteIds) -> String {
    if games.is_empty() {
        return "Ігор не знайдено".to_string();
    }
    let cards = games
        .iter()
        .map(|game| game_card(game, favorites))
        .join("\n\n");
    format!("Знайдено ігор: {}\n\n{cards}", games.len())
}

pub fn game_detail(game: &Game, favorites: &FavoriteIds) -> String {
    let mut lines = vec![game.to_string()];
    if is_favorite(game, favorites) {
        lines.push(format!("{FAVORITE_MARK} В обраному"));
    }
    lines.push(format!(
        "Рейтинг: {} {:.1}",
        StarRating::from_rating(game.rating),
        game.rating
    ));
    lines.push(format!("Гравців: {}", game.players_label()));
    lines.push(format!("Час гри: {} хв", game.play_time));
    if let Some(category) = game.category.as_deref().filter(|c| !c.is_empty()) {
        lines.push(format!("Категорія: {category}"));
    }
    if let Some(language) = game.language.as_deref().filter(|l| !l.is_empty()) {
        lines.push(format!("Мова: {language}"));
    }
    lines.push(format!(
        "Обкладинка: {}",
        cover_image(&game.id, game.image.as_deref())
    ));
    if let Some(url) = game.video_url.as_deref() {
        match embed_url(url) {
            Some(embed) => lines.push(format!("Відео: {embed}")),
            None => log::debug!("No embeddable video for {}", game.id),
        }
    }
    let body = game.body();
    if !body.is_empty() {
        lines.push(String::new());
        lines.push(body.to_string());
    }
    lines.join("\n")
}

pub fn category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "Категорій немає".to_string();
    }
    categories
        .iter()
        .map(|category| match &category.color {
            Some(color) => format!("[{}] {} {color}", category.id, category.name),
            None => format!("[{}] {}", category.id, category.name),
        })
        .join("\n")
}
