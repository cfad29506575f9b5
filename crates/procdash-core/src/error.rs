use thiserror::Error;

/// Core error type for procdash operations.
#[derive(Error, Debug)]
pub enum DashError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for DashError {
    fn from(e: serde_json::Error) -> Self {
        DashError::Serialization(e.to_string())
    }
}

/// Result type alias using DashError.
pub type Result<T> = std::result::Result<T, DashError>;
