//! Error types for the remote chat API.

use thiserror::Error;

/// Result type alias for remote calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a call to the remote chat service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Credential rejected or expired; fatal for the current session.
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// Transient transport or server failure.
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Invalid response: {message}")]
    Decode { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ApiError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth { message: message.into() }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode { message: message.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Everything except an auth failure may succeed on a later attempt.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Auth { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::decode(err.to_string());
        }

        match err.status() {
            Some(status) if status.as_u16() == 401 || status.as_u16() == 403 => {
                Self::auth(err.to_string())
            }
            _ => Self::network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}
