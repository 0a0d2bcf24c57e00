use std::time::Duration;
use thiserror::Error;

/// Failures opening or reading a notes stream. These are the only true
/// generation errors; a payload that never matches is not one of them.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Network Error: {0}")]
    NetworkError(String),

    #[error("API Error: {0}")]
    ApiError(String),

    #[error("Authentication Error: {0}")]
    AuthenticationError(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Serialization Error: {0}")]
    SerializationError(String),
}

impl TransportError {
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationError(body),
            _ => Self::ApiError(format!("HTTP {}: {}", status, body)),
        }
    }
}
