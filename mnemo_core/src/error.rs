//! Error types for the mnemo_core library.

use std::io;
use uuid::Uuid;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for mnemo_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No deck with the given id exists in the store
    #[error("deck not found: {0}")]
    DeckNotFound(Uuid),

    /// No flashcard with the given id exists in the store
    #[error("flashcard not found: {0}")]
    CardNotFound(Uuid),

    /// No study session with the given id exists in the store
    #[error("study session not found: {0}")]
    SessionNotFound(Uuid),

    /// The study session has already been finalized
    #[error("study session already ended: {0}")]
    SessionAlreadyEnded(Uuid),

    /// A caller-supplied value is out of range or inconsistent
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
