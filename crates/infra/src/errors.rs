//! Conversions from third-party error types into the domain error.

use shelfsync_domain::ShelfsyncError;

/// Map a reqwest failure to the domain error.
///
/// Everything surfacing here is transport-level; body-level rejections are
/// classified separately by the envelope parser.
pub fn from_reqwest(err: &reqwest::Error) -> ShelfsyncError {
    if err.is_timeout() {
        ShelfsyncError::Network(format!("request timed out: {err}"))
    } else if err.is_connect() {
        ShelfsyncError::Network(format!("connection failed: {err}"))
    } else {
        ShelfsyncError::Network(err.to_string())
    }
}

/// Whether a transport failure is worth retrying.
pub fn reqwest_is_retryable(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

pub fn from_rusqlite(err: &rusqlite::Error) -> ShelfsyncError {
    ShelfsyncError::Database(err.to_string())
}

pub fn from_pool(err: &r2d2::Error) -> ShelfsyncError {
    ShelfsyncError::Database(format!("connection pool: {err}"))
}

pub fn from_join(err: &tokio::task::JoinError) -> ShelfsyncError {
    ShelfsyncError::Internal(format!("blocking task failed: {err}"))
}
