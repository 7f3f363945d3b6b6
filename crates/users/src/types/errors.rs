//! Error types for user search and session handling.

use chatsync_api::ApiError;
use thiserror::Error;

/// Result type alias for user operations
pub type UserResult<T> = Result<T, UserError>;

/// User-related errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserError {
    /// Rejected locally; never reaches the remote service.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Session error: {0}")]
    Session(String),
}

impl UserError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Api(err) => err.is_recoverable(),
            Self::ValidationFailed(_) => true,
            Self::Session(_) => false,
        }
    }
}

impl From<std::io::Error> for UserError {
    fn from(err: std::io::Error) -> Self {
        Self::Session(format!("session storage error: {err}"))
    }
}

impl From<serde_json::Error> for UserError {
    fn from(err: serde_json::Error) -> Self {
        Self::Session(format!("invalid session record: {err}"))
    }
}
