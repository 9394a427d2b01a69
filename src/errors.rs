use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the expense core and its storage boundary.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Expense not found: {0}")]
    NotFound(Uuid),
    #[error("Persistence error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, SplitError>;

impl From<std::io::Error> for SplitError {
    fn from(err: std::io::Error) -> Self {
        SplitError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for SplitError {
    fn from(err: serde_json::Error) -> Self {
        SplitError::Storage(err.to_string())
    }
}
