use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database lock poisoned")]
    LockPoisoned,

    #[error("author {0} does not exist")]
    AuthorNotFound(Uuid),

    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;
