//! Error types for cantinho_client

use thiserror::Error;

/// Unified error type for backend and storage operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Backend answered with a non-success status code
    #[error("HTTP error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    /// Backend rejected the stored session token
    #[error("Session expired or invalid")]
    Unauthorized,
    /// Reading or writing local state failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    /// Response was well-formed but unusable (missing token, bad data URI, ...)
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(reqwest::StatusCode::UNAUTHORIZED),
            ApiError::Network(e) => e.status(),
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status().map(|s| s.as_u16())
    }
}

/// Result alias for backend operations
pub type ApiResult<T> = Result<T, ApiError>;
