use std::path::PathBuf;

use thiserror::Error;

/// Application-wide error types for zaitaku.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed (bad status, unreadable body, client setup).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Every fetch attempt for a URL failed.
    #[error("Fetch of {url} failed after {attempts} attempts: {source}")]
    FetchError {
        url: String,
        attempts: u32,
        #[source]
        source: Box<AppError>,
    },

    /// A single listing element could not be turned into a record.
    #[error("Extraction error: {0}")]
    ExtractionError(String),

    /// Writing the output document failed.
    #[error("Failed to write {}: {source}", path.display())]
    SerializeError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Returns true if this error is a transport failure worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::HttpError(_) | AppError::Timeout(_) | AppError::NetworkError(_)
        )
    }
}
