use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::ProfileError;

/// Errors that can occur when talking to the Gemini `generateContent` API
#[derive(Error, Debug)]
pub enum GeminiApiError {
    /// Invalid request parameters (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing, invalid or unauthorized API key (HTTP 401, 403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Model or endpoint not found (HTTP 404)
    #[error("Model not found: {0}")]
    NotFound(String),

    /// Quota or rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Server error from the API (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error of the response envelope
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The API answered but produced no usable text
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Unknown or unexpected status
    #[error("Unknown error ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl GeminiApiError {
    /// Classify a non-success response.
    ///
    /// `message` is the backend's own explanation when the body carried one,
    /// otherwise the raw body.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::InvalidRequest(message),
            401 | 403 => Self::AuthenticationFailed(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimitExceeded(message),
            500..=599 => Self::ServerError(status, message),
            _ => Self::UnknownError(status, message),
        }
    }
}

impl From<GeminiApiError> for ProfileError {
    fn from(err: GeminiApiError) -> Self {
        match err {
            GeminiApiError::EmptyResponse(reason) => Self::Declined(reason),
            GeminiApiError::JsonError(e) => Self::InvalidPayload(e.to_string()),
            GeminiApiError::InvalidRequest(message)
            | GeminiApiError::AuthenticationFailed(message)
            | GeminiApiError::NotFound(message)
            | GeminiApiError::RateLimitExceeded(message)
            | GeminiApiError::ServerError(_, message)
            | GeminiApiError::UnknownError(_, message) => Self::Transport(message),
            GeminiApiError::NetworkError(e) => Self::Transport(e.to_string()),
        }
    }
}
