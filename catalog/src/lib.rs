pub mod admin;
pub mod browse;
pub mod config;
pub mod error;
pub mod local;
pub mod prompt;
pub mod render;

pub use admin::{AdminService, GameForm};
pub use browse::Catalog;
pub use config::CatalogConfig;
pub use error::AppError;
pub use local::{FavoritesFile, SessionTokenFile};
