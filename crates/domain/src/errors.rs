//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for shelfsync
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum ShelfsyncError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    /// Body-level rejection from the marketplace (HTTP 200 with an error
    /// marker). Never retried; `code` is the server's own error code.
    #[error("Marketplace rejected the request [{code}]: {message}")]
    Api { code: String, message: String },

    /// Terminal HTTP failure, including transient statuses once the retry
    /// budget is exhausted.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShelfsyncError {
    /// Stable machine-readable code for this error.
    ///
    /// Callers branch on this (or on the variant itself), never on the
    /// display message.
    pub fn code(&self) -> String {
        match self {
            Self::Database(_) => "database".into(),
            Self::Config(_) => "config".into(),
            Self::Network(_) => "network".into(),
            Self::Auth(_) => "auth".into(),
            Self::Api { code, .. } => format!("api:{code}"),
            Self::Http { status, .. } => format!("http:{status}"),
            Self::NotFound(_) => "not_found".into(),
            Self::InvalidInput(_) => "invalid_input".into(),
            Self::Internal(_) => "internal".into(),
        }
    }

    /// Whether the failure is transient and a fresh attempt may succeed.
    ///
    /// Body-level `Api` rejections are semantic and never retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http { status, .. } => crate::constants::RETRYABLE_STATUS.contains(status),
            _ => false,
        }
    }
}

/// Result type alias for shelfsync operations
pub type Result<T> = std::result::Result<T, ShelfsyncError>;
