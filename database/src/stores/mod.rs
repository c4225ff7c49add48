pub mod catalog;
pub mod media;
pub mod session;
pub mod traits;

pub use catalog::SqliteCatalogStore;
pub use media::{FsMediaStore, ImageUpload, MAX_IMAGE_BYTES};
pub use session::SqliteSessionProvider;
pub use traits::{CatalogStore, MediaStore, SessionProvider};
