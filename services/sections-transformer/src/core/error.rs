//! Error types and error handling for the sections transformer.
//!
//! This module defines the error types used throughout the
//! application. HTTP status mapping lives in the `http` adapter.

use thiserror::Error;

/// Result type alias for transformer operations
pub type Result<T> = std::result::Result<T, TransformerError>;

/// Main error type for the sections transformer
#[derive(Error, Debug)]
pub enum TransformerError {
    #[error("Taxonomy source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Failed to transform term: {0}")]
    TransformFailure(String),

    #[error("A reload is already in progress")]
    ReloadInProgress,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl TransformerError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if the error originates from the taxonomy source
    pub fn is_source_error(&self) -> bool {
        matches!(self, TransformerError::SourceUnavailable(_))
    }

    /// Check if this is a conflict error (operation already running)
    pub fn is_conflict(&self) -> bool {
        matches!(self, TransformerError::ReloadInProgress)
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(self, TransformerError::ConfigError(_))
    }
}

impl From<reqwest::Error> for TransformerError {
    fn from(err: reqwest::Error) -> Self {
        TransformerError::SourceUnavailable(err.to_string())
    }
}
