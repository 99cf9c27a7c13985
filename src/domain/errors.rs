//! Domain errors for the StarPulse search lifecycle.

use thiserror::Error;

/// Message shown when a failure carries no usable detail.
pub const GENERIC_FAILURE_MESSAGE: &str = "Search failed.";

/// Message shown when the backend answered with something that is not a profile.
pub const BELOW_THRESHOLD_MESSAGE: &str =
    "The data center judged this person below the minimum recognition threshold.";

/// Failures of the remote profile fetch.
///
/// The controller does not distinguish these for retry purposes; they all
/// collapse into [`ProfileError::user_message`].
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Network failure, timeout or non-success HTTP status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend payload failed to decode or validate.
    #[error("Invalid profile payload: {0}")]
    InvalidPayload(String),

    /// Backend declined to produce a rating for the subject.
    #[error("Backend declined: {0}")]
    Declined(String),
}

impl ProfileError {
    /// Single user-visible string for any failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidPayload(_) => BELOW_THRESHOLD_MESSAGE.to_string(),
            Self::Transport(detail) | Self::Declined(detail) => {
                let detail = detail.trim();
                if detail.is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    detail.to_string()
                }
            }
        }
    }
}

/// Errors from the local cache store.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Rejected controller intents.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("Search name cannot be empty")]
    EmptyQuery,

    #[error("No suggestion at position {index} (have {len})")]
    SuggestionOutOfRange { index: usize, len: usize },

    #[error("No history entry at position {index} (have {len})")]
    HistoryOutOfRange { index: usize, len: usize },

    #[error("Search controller has been disposed")]
    Disposed,
}
