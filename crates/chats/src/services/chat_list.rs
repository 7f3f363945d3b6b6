//! Keeps the chat cache in step with the remote chat list.

use chatsync_api::{ApiError, ApiResult, AuthToken, Chat, ChatApi, OperationStatus};
use tracing::{debug, info, warn};

use crate::services::ChatState;
use crate::types::{ChatResult, RefreshTicket};

/// Fetches the user's chats and installs them with [`ChatState::replace_chats`].
///
/// Refreshes may overlap; only the most recently issued one is applied.
#[derive(Debug, Default)]
pub struct ChatListSync {
    status: OperationStatus<ApiError>,
    issued: u64,
    current: Option<RefreshTicket>,
    loaded: bool,
}

impl ChatListSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &OperationStatus<ApiError> {
        &self.status
    }

    /// Whether at least one fetch has been applied since creation or reset.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn begin(&mut self) -> RefreshTicket {
        self.issued += 1;
        let ticket = RefreshTicket(self.issued);
        self.current = Some(ticket);
        self.status = OperationStatus::Pending;
        debug!(ticket = ticket.0, "chat list refresh started");
        ticket
    }

    /// Apply the fetch identified by `ticket`.
    ///
    /// Returns `false` if a newer refresh was issued and the outcome was
    /// dropped. A failed fetch keeps the cached list as it was.
    pub fn complete(
        &mut self,
        ticket: RefreshTicket,
        outcome: ApiResult<Vec<Chat>>,
        state: &mut ChatState,
    ) -> bool {
        if self.current != Some(ticket) {
            debug!(ticket = ticket.0, "discarding stale chat list");
            return false;
        }
        self.current = None;

        match outcome {
            Ok(chats) => {
                info!(count = chats.len(), "chat list loaded");
                state.replace_chats(chats);
                self.loaded = true;
                self.status = OperationStatus::Succeeded;
            }
            Err(err) => {
                warn!(error = %err, "chat list refresh failed");
                self.status = OperationStatus::Failed(err);
            }
        }
        true
    }

    pub async fn refresh(
        &mut self,
        api: &dyn ChatApi,
        token: &AuthToken,
        state: &mut ChatState,
    ) -> ChatResult<usize> {
        let ticket = self.begin();
        let outcome = api.fetch_chats(token).await;
        let failure = outcome.as_ref().err().cloned();

        self.complete(ticket, outcome, state);

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(state.cache().len()),
        }
    }

    pub fn reset(&mut self) {
        *self = Self {
            issued: self.issued,
            ..Self::default()
        };
    }
}
