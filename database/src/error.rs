use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Query execution error: {0}")]
    Query(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Game not found: {0}")]
    GameNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not signed in")]
    NotSignedIn,

    #[error("User already exists: {0}")]
    UserExists(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("File is not an image: {0}")]
    NotAnImage(String),

    #[error("File is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    #[error("Not a media store URL: {0}")]
    InvalidUrl(String),

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
}
