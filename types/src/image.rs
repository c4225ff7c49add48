const DEFAULT_COVER: &str =
    "https://images.unsplash.com/photo-1606166188517-4a72c90e49da?w=800&h=600&fit=crop&q=80";

// Covers for the seed games that shipped without an uploaded image.
const SEED_COVERS: [(&str, &str); 6] = [
    ("1", DEFAULT_COVER),
    (
        "2",
        "https://images.unsplash.com/photo-1606092195730-5d7b9af1efc5?w=800&h=600&fit=crop&q=80",
    ),
    (
        "3",
        "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800&h=600&fit=crop&q=80",
    ),
    (
        "4",
        "https://images.unsplash.com/photo-1511512578047-dfb367046420?w=800&h=600&fit=crop&q=80",
    ),
    (
        "5",
        "https://images.unsplash.com/photo-1611162617474-5b21e879e113?w=800&h=600&fit=crop&q=80",
    ),
    (
        "6",
        "https://images.unsplash.com/photo-1582719478250-c89cae4dc85b?w=800&h=600&fit=crop&q=80",
    ),
];

/// Image to show for a game: its own upload, a seed cover, or the default.
pub fn cover_image<'a>(game_id: &str, image: Option<&'a str>) -> &'a str {
    match image {
        Some(url) if !url.is_empty() => url,
        _ => SEED_COVERS
            .iter()
            .find(|(id, _)| *id == game_id)
            .map(|(_, url)| *url)
            .unwrap_or(DEFAULT_COVER),
    }
}
