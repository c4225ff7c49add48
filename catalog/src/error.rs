use database::{AuthError, DatabaseError, UploadError};
use thiserror::Error;

/// Failures surfaced to the person at the keyboard.
///
/// `Display` is for logs. [`AppError::user_message`] is what gets shown.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to load catalog: {0}")]
    Load(#[source] DatabaseError),

    #[error("Failed to save game: {0}")]
    SaveGame(#[source] DatabaseError),

    #[error("Failed to delete game: {0}")]
    DeleteGame(#[source] DatabaseError),

    #[error("Failed to save category: {0}")]
    SaveCategory(#[source] DatabaseError),

    #[error("Failed to delete category: {0}")]
    DeleteCategory(#[source] DatabaseError),

    #[error("Game not found: {0}")]
    GameNotFound(String),

    #[error("Sign-in failed: {0}")]
    SignIn(#[source] AuthError),

    #[error("Sign-out failed: {0}")]
    SignOut(#[source] AuthError),

    #[error("Admin session required")]
    NotSignedIn,

    #[error("Image upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("Invalid game: {0}")]
    InvalidGame(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Local state error: {0}")]
    LocalState(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Load(_) => "Помилка при завантаженні даних".to_string(),
            Self::SaveGame(_) => "Помилка при збереженні гри".to_string(),
            Self::DeleteGame(_) => "Помилка при видаленні гри".to_string(),
            Self::SaveCategory(_) => "Помилка при збереженні категорії".to_string(),
            Self::DeleteCategory(_) => "Помилка при видаленні категорії".to_string(),
            Self::GameNotFound(_) => "Гру не знайдено".to_string(),
            Self::SignIn(_) => "Помилка авторизації".to_string(),
            Self::SignOut(_) => "Помилка виходу".to_string(),
            Self::NotSignedIn => "Увійдіть як адміністратор".to_string(),
            Self::Upload(UploadError::TooLarge { .. }) => {
                "Розмір файлу не повинен перевищувати 5MB".to_string()
            }
            Self::Upload(UploadError::NotAnImage(_)) => "Файл повинен бути зображенням".to_string(),
            Self::Upload(_) => "Помилка при завантаженні зображення".to_string(),
            Self::InvalidGame(reason) | Self::InvalidCategory(reason) => {
                format!("Некоректні дані: {reason}")
            }
            Self::Config(reason) => format!("Помилка конфігурації: {reason}"),
            Self::LocalState(_) | Self::Database(_) => "Щось пішло не так".to_string(),
        }
    }
}
