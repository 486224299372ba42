//! Client error types

use shared::response::EnvelopeError;
use thiserror::Error;

/// Client error type
///
/// Expected failure modes never cross the public boundary as panics; every
/// network, status or decoding problem maps onto one of these variants.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connectivity failure or timeout, surfaced after retries exhaust
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication required (401); never retried
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource conflict (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Rejected request (other 4xx or envelope-level failure)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server error (5xx), surfaced after retries exhaust
    #[error("Server error: {0}")]
    Server(String),

    /// Response body did not decode into the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// True for authorization failures, which force a session clear
    /// instead of a page-local error.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<EnvelopeError> for ClientError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Failed(message) => Self::Validation(message),
            EnvelopeError::Shape(message) => Self::InvalidResponse(message),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
