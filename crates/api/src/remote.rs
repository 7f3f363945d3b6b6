//! The remote collaborator contract.

use async_trait::async_trait;

use crate::entities::{AuthToken, Chat, User};
use crate::types::ApiResult;

/// Remote source of truth for chats and users.
///
/// Implementations own transport concerns (timeouts, retries); callers only
/// see the outcome.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// All chats visible to the token's user, most recently active first.
    async fn fetch_chats(&self, token: &AuthToken) -> ApiResult<Vec<Chat>>;

    /// Users whose name or email matches `query`. Never called with an empty query.
    async fn search_users(&self, token: &AuthToken, query: &str) -> ApiResult<Vec<User>>;

    /// Create the one-to-one chat with `user_id`, or return it if the server
    /// already has one.
    async fn access_chat(&self, token: &AuthToken, user_id: &str) -> ApiResult<Chat>;
}
