//! Error types for faqbot.

use thiserror::Error;

/// Result alias used across the faqbot crates.
pub type Result<T> = std::result::Result<T, FaqError>;

#[derive(Debug, Error)]
pub enum FaqError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
