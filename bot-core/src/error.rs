//! Error type returned by handlers and the handler chain.

use thiserror::Error;

/// Failure inside a handler. Validation problems are replies, not errors; these are the rest.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
