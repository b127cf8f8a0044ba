// =================================================================
// api/errors.rs - Error Types
// =================================================================

use thiserror::Error;

/// Failures talking to the dashboard backend.
///
/// Non-2xx responses are not errors on their own: the body is still parsed,
/// since the backend reports step failures through `success: false`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Response parsing error: {0}")]
    ParseError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ParseError(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::ParseError(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidUrl(err.to_string())
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}
