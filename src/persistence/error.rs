//! Error type for high score storage.

use thiserror::Error;

/// Failure while reading or writing the stored high score
#[derive(Error, Debug)]
pub enum StoreError {
    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// JSON encoding or decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Store refused the operation
    #[error("High score store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for high score storage.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    #[must_use]
    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        Self::Unavailable(msg.into())
    }
}
