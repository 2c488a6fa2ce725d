//! Error types for shiftdeck-core

use thiserror::Error;

/// Result type alias using shiftdeck-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in shiftdeck-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API rejected the request or returned a failure status
    #[error("API error: {0}")]
    Api(String),

    /// Response payload did not match the expected shape
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
