use std::sync::Arc;

use chatsync_api::{Chat, ChatApi, User};
use chatsync_chats::{ChatError, ChatListSync, ChatResolver, ChatState, InboundEvent};
use chatsync_users::{CurrentUser, SessionStore, UserError, UserSearchController};
use thiserror::Error;
use tracing::{info, warn};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error(transparent)]
    User(#[from] UserError),
}

impl SessionError {
    /// `false` means the credential is no longer accepted and the user must
    /// sign in again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Chat(err) => err.is_recoverable(),
            Self::User(err) => err.is_recoverable(),
        }
    }
}

/// Everything a signed-in client holds, owned in one place.
///
/// Each operation runs one state transition to completion through
/// `&mut self`.
pub struct ChatSession {
    api: Arc<dyn ChatApi>,
    sessions: SessionStore,
    current: CurrentUser,
    state: ChatState,
    search: UserSearchController,
    resolver: ChatResolver,
    chat_list: ChatListSync,
}

impl ChatSession {
    pub fn new(
        api: Arc<dyn ChatApi>,
        sessions: SessionStore,
        current: CurrentUser,
        max_search_results: usize,
    ) -> Self {
        Self {
            api,
            sessions,
            current,
            state: ChatState::new(),
            search: UserSearchController::new(max_search_results),
            resolver: ChatResolver::new(),
            chat_list: ChatListSync::new(),
        }
    }

    pub fn current_user(&self) -> &CurrentUser {
        &self.current
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn search(&self) -> &UserSearchController {
        &self.search
    }

    pub fn resolver(&self) -> &ChatResolver {
        &self.resolver
    }

    pub fn chat_list(&self) -> &ChatListSync {
        &self.chat_list
    }

    /// Fetch the chat list; returns how many chats are cached afterwards.
    pub async fn refresh_chats(&mut self) -> SessionResult<usize> {
        let count = self
            .chat_list
            .refresh(self.api.as_ref(), &self.current.token, &mut self.state)
            .await?;
        Ok(count)
    }

    pub async fn search_users(&mut self, query: &str) -> SessionResult<&[User]> {
        let results = self
            .search
            .search(self.api.as_ref(), &self.current.token, query)
            .await?;
        Ok(results)
    }

    /// Open the one-to-one chat with `user`, creating it remotely if needed.
    pub async fn open_chat_with(&mut self, user: &User) -> SessionResult<Chat> {
        let chat = self
            .resolver
            .resolve(self.api.as_ref(), &self.current, user, &mut self.state)
            .await?;
        Ok(chat)
    }

    /// Open a cached chat, e.g. from a notification.
    pub fn open_chat(&mut self, chat_id: &str) -> SessionResult<()> {
        self.state.select_by_id(chat_id)?;
        Ok(())
    }

    pub fn close_chat(&mut self) {
        self.state.deselect();
    }

    pub fn handle_event(&mut self, event: InboundEvent) {
        self.state.apply(event);
    }

    /// Sign out: drop all in-memory state and delete the session file.
    pub async fn logout(&mut self) -> SessionResult<()> {
        self.resolver.cancel();
        self.search.reset();
        self.chat_list.reset();
        self.state.clear();

        if let Err(err) = self.sessions.clear().await {
            warn!(error = %err, "failed to remove session file");
            return Err(err.into());
        }

        info!(user = %self.current.id(), "logged out");
        Ok(())
    }
}
