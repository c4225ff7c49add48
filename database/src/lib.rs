pub mod config;
pub mod error;
pub mod models;
pub mod stores;

pub use config::DatabaseConfig;
pub use error::{AuthError, DatabaseError, UploadError};
pub use models::{CategoryRow, GameRow, Session};
pub use stores::{
    CatalogStore, FsMediaStore, ImageUpload, MediaStore, SessionProvider, SqliteCatalogStore,
    SqliteSessionProvider, MAX_IMAGE_BYTES,
};

/// Applies the schema in `database/migrations` to `pool`.
pub async fn run_migrations(pool: &sqlx::SqlitePool) -> Result<(), DatabaseError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    tracing::debug!("catalog schema is up to date");
    Ok(())
}
