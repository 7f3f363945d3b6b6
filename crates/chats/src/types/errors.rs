//! Error types for the chat state layer.

use chatsync_api::ApiError;
use thiserror::Error;

/// Result type alias for chat operations
pub type ChatResult<T> = Result<T, ChatError>;

/// Main error type for the chat state layer
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChatError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Chat not found: {id}")]
    ChatNotFound { id: String },

    #[error("Chat with user {user_id} is already being opened")]
    ResolutionInFlight { user_id: String },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ChatError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    /// Create a not found error for chats
    pub fn chat_not_found(id: impl Into<String>) -> Self {
        Self::ChatNotFound { id: id.into() }
    }

    pub fn resolution_in_flight(user_id: impl Into<String>) -> Self {
        Self::ResolutionInFlight { user_id: user_id.into() }
    }

    /// Only an auth failure ends the session.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Api(err) => err.is_recoverable(),
            _ => true,
        }
    }
}
