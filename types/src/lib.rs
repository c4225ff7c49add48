pub mod category;
pub mod favorites;
pub mod game;
pub mod image;
pub mod rating;
pub mod video;

pub use category::{Category, CategoryUpdate, NewCategory};
pub use favorites::FavoriteIds;
pub use game::{Game, GameUpdate, NewGame};
pub use rating::StarRating;
pub use video::embed_url;
