use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Feed unavailable: {0}")]
    FeedUnavailable(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}
