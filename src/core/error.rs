use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed adoption record: {0}")]
    MalformedRecord(String),

    #[error("Repository '{0}' not found")]
    NotFound(String),

    #[error("You must be logged in to {0}")]
    Unauthenticated(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Identity provider error: {0}")]
    Identity(String),

    #[error("Suggestion error: {0}")]
    Suggestion(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for AppError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}
