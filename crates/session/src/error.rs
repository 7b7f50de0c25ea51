//! Session errors.

use thiserror::Error;

/// Errors from period parsing and session store persistence.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid period unit: {0}")]
    InvalidPeriod(String),

    #[error("Period count must not be negative: {0}")]
    NegativeCount(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
