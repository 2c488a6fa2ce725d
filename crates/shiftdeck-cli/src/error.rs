use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] shiftdeck_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("No conflict #{0} in this date range")]
    ConflictNotFound(usize),
    #[error("Conflict has no item #{0}")]
    ItemOutOfRange(usize),
    #[error("Conflict #{0} only supports deletion (no clean cut boundary)")]
    CutNotAvailable(usize),
    #[error("Selected item has no backing worklog record")]
    MissingWorklogId,
    #[error("Configuration error: {0}")]
    Config(String),
}
