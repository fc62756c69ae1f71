//! Error types for the voicepipe gateway

use thiserror::Error;

/// Result type alias for voicepipe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the voicepipe gateway
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Speech-to-text failure
    #[error("transcription error: {0}")]
    Transcription(String),

    /// Reply generation failure; always caught inside the generation
    /// adapter and converted into a fallback reply
    #[error("generation error: {0}")]
    Generation(String),

    /// Text-to-speech failure
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
