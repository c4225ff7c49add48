//! End-to-end admin and browse flows against an in-memory database and a
//! temporary media directory.

use std::path::Path;

use async_trait::async_trait;
use catalog::{AdminService, AppError, Catalog, GameForm};
use database::{
    run_migrations, CatalogStore, DatabaseConfig, FsMediaStore, ImageUpload, MediaStore,
    SqliteCatalogStore, SqliteSessionProvider, UploadError,
};
use query::{GameQuery, SortKey};
use types::{FavoriteIds, GameUpdate};

const BASE_URL: &str = "http://localhost:8000/storage";
const EMAIL: &str = "admin@example.com";
const PASSWORD: &str = "correct horse";

/// Rejects every upload, as an unreachable bucket would.
struct BrokenMedia;

#[async_trait]
impl MediaStore for BrokenMedia {
    async fn upload(&self, _image: &ImageUpload, _id: &str) -> Result<String, UploadError> {
        Err(UploadError::Io(std::io::Error::new(std::io::ErrorKind::Other, "bucket unavailable")))
    }

    async fn delete(&self, _public_url: &str) -> Result<(), UploadError> {
        Ok(())
    }
}

/// An admin service plus a second handle on the same database for reads.
async fn setup(media: Box<dyn MediaStore>) -> (AdminService, SqliteCatalogStore) {
    let pool = DatabaseConfig::in_memory()
        .create_pool()
        .await
        .expect("Failed to connect");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let sessions = SqliteSessionProvider::new(pool.clone());
    sessions
        .register_user(EMAIL, PASSWORD)
        .await
        .expect("Failed to register admin");

    let admin = AdminService::new(
        Box::new(SqliteCatalogStore::new(pool.clone())),
        media,
        Box::new(sessions),
    );
    (admin, SqliteCatalogStore::new(pool))
}

fn fs_media(dir: &Path) -> Box<dyn MediaStore> {
    Box::new(FsMediaStore::new(dir, BASE_URL))
}

fn form(name: &str, rating: f64, play_time: u32) -> GameForm {
    GameForm {
        name: name.to_string(),
        rating,
        play_time,
        ..Default::default()
    }
}

fn stored_file(dir: &Path, url: &str) -> std::path::PathBuf {
    let object = url
        .strip_prefix(&format!("{BASE_URL}/"))
        .expect("URL issued by the media store");
    dir.join(object)
}

#[tokio::test]
async fn test_mutations_require_sign_in() {
    let dir = tempfile::tempdir().unwrap();
    let (mut admin, reader) = setup(fs_media(dir.path())).await;

    let result = admin.create_game(&form("Catan", 4.0, 90), None).await;
    assert!(matches!(result, Err(AppError::NotSignedIn)));
    assert!(reader.list_games().await.unwrap().is_empty());

    let wrong = admin.sign_in(EMAIL, "wrong").await;
    assert!(matches!(wrong, Err(AppError::SignIn(_))));
    assert_eq!(wrong.unwrap_err().user_message(), "Помилка авторизації");

    admin.sign_in(EMAIL, PASSWORD).await.expect("Failed to sign in");
    admin
        .create_game(&form("Catan", 4.0, 90), None)
        .await
        .expect("Failed to create game");

    admin.sign_out().await.expect("Failed to sign out");
    assert!(matches!(
        admin.delete_category("missing").await,
        Err(AppError::NotSignedIn)
    ));
}

#[tokio::test]
async fn test_create_uploads_image_under_new_id() {
    let dir = tempfile::tempdir().unwrap();
    let (mut admin, reader) = setup(fs_media(dir.path())).await;
    admin.sign_in(EMAIL, PASSWORD).await.unwrap();

    let image = ImageUpload::new("cover.png", vec![7; 64]);
    let game = admin
        .create_game(&form("Wingspan", 4.8, 70), Some(image))
        .await
        .expect("Failed to create game");

    let url = game.image.clone().expect("image attached");
    let prefix = format!("{BASE_URL}/game-images/games/{}-", game.id);
    assert!(url.starts_with(&prefix), "{url}");
    assert!(url.ends_with(".png"));
    assert_eq!(
        std::fs::read(stored_file(dir.path(), &url)).unwrap(),
        vec![7; 64]
    );

    let stored = reader.get_game(&game.id).await.unwrap().unwrap();
    assert_eq!(stored.image.as_deref(), Some(url.as_str()));
}

#[tokio::test]
async fn test_rejected_image_saves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (mut admin, reader) = setup(fs_media(dir.path())).await;
    admin.sign_in(EMAIL, PASSWORD).await.unwrap();

    let not_image = ImageUpload::new("rules.pdf", vec![0; 16]);
    let error = admin
        .create_game(&form("Azul", 4.2, 45), Some(not_image))
        .await
        .unwrap_err();
    assert_eq!(error.user_message(), "Файл повинен бути зображенням");
    assert!(reader.list_games().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_upload_rolls_back_new_game() {
    let (mut admin, reader) = setup(Box::new(BrokenMedia)).await;
    admin.sign_in(EMAIL, PASSWORD).await.unwrap();

    let image = ImageUpload::new("cover.jpg", vec![1; 32]);
    let result = admin.create_game(&form("Pandemic", 4.4, 45), Some(image)).await;
    assert!(matches!(result, Err(AppError::Upload(_))));
    assert!(reader.list_games().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_replacing_image_removes_old_file() {
    let dir = tempfile::tempdir().unwrap();
    let (mut admin, _reader) = setup(fs_media(dir.path())).await;
    admin.sign_in(EMAIL, PASSWORD).await.unwrap();

    let game = admin
        .create_game(
            &form("Gloomhaven", 4.9, 120),
            Some(ImageUpload::new("old.png", vec![1; 8])),
        )
        .await
        .unwrap();
    let old_url = game.image.clone().unwrap();

    // Object names carry a millisecond timestamp.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let updated = admin
        .update_game(
            &game.id,
            GameUpdate::default(),
            Some(ImageUpload::new("new.jpg", vec![2; 8])),
        )
        .await
        .unwrap();
    let new_url = updated.image.clone().unwrap();

    assert_ne!(old_url, new_url);
    assert!(!stored_file(dir.path(), &old_url).exists());
    assert!(stored_file(dir.path(), &new_url).exists());

    admin.delete_game(&game.id).await.unwrap();
    assert!(!stored_file(dir.path(), &new_url).exists());
}

#[tokio::test]
async fn test_invalid_update_keeps_stored_game() {
    let dir = tempfile::tempdir().unwrap();
    let (mut admin, reader) = setup(fs_media(dir.path())).await;
    admin.sign_in(EMAIL, PASSWORD).await.unwrap();

    let game = admin
        .create_game(&form("Ticket to Ride", 4.1, 60), None)
        .await
        .unwrap();
    let update = GameUpdate {
        max_players: Some(1),
        ..Default::default()
    };
    let result = admin.update_game(&game.id, update, None).await;
    assert!(matches!(result, Err(AppError::InvalidGame(_))));
    assert_eq!(reader.get_game(&game.id).await.unwrap().unwrap(), game);

    let missing = admin.delete_game("no-such-game").await;
    assert!(matches!(missing, Err(AppError::GameNotFound(_))));
}

#[tokio::test]
async fn test_browse_after_admin_changes() {
    let dir = tempfile::tempdir().unwrap();
    let (mut admin, reader) = setup(fs_media(dir.path())).await;
    admin.sign_in(EMAIL, PASSWORD).await.unwrap();

    admin.create_category("Сімейна", Some("#0F0")).await.unwrap();
    let mut catan = form("Catan", 4.2, 90);
    catan.category = "Сімейна".to_string();
    catan.full_description = "Торгівля ресурсами".to_string();
    let catan = admin.create_game(&catan, None).await.unwrap();
    let azul = admin.create_game(&form("Azul", 4.6, 45), None).await.unwrap();
    admin.create_game(&form("Root", 4.0, 90), None).await.unwrap();

    let mut catalog = Catalog::load(&reader).await.unwrap();
    assert_eq!(catalog.category_names(), vec!["Сімейна"]);
    assert_eq!(
        catalog.categories()[0].color.as_deref(),
        Some("#00ff00")
    );

    let favorites = FavoriteIds::new();
    let by_rating: Vec<&str> = catalog
        .visible(&GameQuery::new(), &favorites)
        .iter()
        .map(|g| g.name.as_str())
        .collect();
    assert_eq!(by_rating, vec!["Azul", "Catan", "Root"]);

    let searched = catalog.visible(&GameQuery::new().search("РЕСУРС"), &favorites);
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].id, catan.id);

    let favorites: FavoriteIds = [azul.id.clone()].into_iter().collect();
    let favorite_only = catalog.visible(
        &GameQuery::new()
            .favorites_only(true)
            .sort_by(Some(SortKey::PlayTime)),
        &favorites,
    );
    assert_eq!(favorite_only.len(), 1);
    assert_eq!(favorite_only[0].name, "Azul");

    admin.delete_game(&azul.id).await.unwrap();
    catalog.refresh(&reader).await.unwrap();
    assert!(catalog.find(&azul.id).is_none());
    assert_eq!(catalog.games().len(), 2);
}

#[tokio::test]
async fn test_seed_categories_skips_existing() {
    let dir = tempfile::tempdir().unwrap();
    let (mut admin, reader) = setup(fs_media(dir.path())).await;
    admin.sign_in(EMAIL, PASSWORD).await.unwrap();

    admin.create_category("Стратегія", None).await.unwrap();
    let added = admin
        .seed_categories(&types::category::DEFAULT_CATEGORIES)
        .await
        .unwrap();
    assert_eq!(added, types::category::DEFAULT_CATEGORIES.len() - 1);
    assert_eq!(
        reader.list_categories().await.unwrap().len(),
        types::category::DEFAULT_CATEGORIES.len()
    );

    assert_eq!(admin.seed_categories(&["Стратегія"]).await.unwrap(), 0);
}
