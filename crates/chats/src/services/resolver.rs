//! Maps "start a chat with this user" onto a concrete chat.

use chatsync_api::{ApiResult, Chat, ChatApi, OperationStatus, User, UserId};
use chatsync_users::CurrentUser;
use tracing::{debug, info, warn};

use crate::services::ChatState;
use crate::types::{ChatError, ChatResult, ResolveTicket};

/// Result of [`ChatResolver::begin`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The direct chat was already cached and is now selected.
    Cached(Chat),
    /// A remote call is required; pass its outcome to [`ChatResolver::complete`].
    Pending(ResolveTicket),
}

/// What [`ChatResolver::complete`] did with a remote outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    /// Cached and selected.
    Selected(Chat),
    /// Cached, but the user changed selection meanwhile so it was not selected.
    Superseded(Chat),
    /// The ticket was cancelled; nothing changed.
    Discarded,
}

#[derive(Debug, Clone)]
struct PendingResolve {
    ticket: ResolveTicket,
    target: UserId,
}

/// Finds or creates the one-to-one chat with a user and selects it.
///
/// At most one resolution runs at a time; a second `begin` while one is
/// pending fails with [`ChatError::ResolutionInFlight`].
#[derive(Debug, Default)]
pub struct ChatResolver {
    status: OperationStatus<ChatError>,
    pending: Option<PendingResolve>,
    issued: u64,
}

impl ChatResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &OperationStatus<ChatError> {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The user whose chat is being resolved, if any.
    pub fn pending_target(&self) -> Option<&UserId> {
        self.pending.as_ref().map(|pending| &pending.target)
    }

    /// Look for a cached direct chat with `target`; otherwise issue a ticket.
    pub fn begin(
        &mut self,
        state: &mut ChatState,
        me: &UserId,
        target: &User,
    ) -> ChatResult<Resolution> {
        if &target.id == me {
            return Err(ChatError::validation("Cannot start a chat with yourself"));
        }
        if let Some(pending) = &self.pending {
            debug!(target = %pending.target, "resolution already in flight");
            return Err(ChatError::resolution_in_flight(pending.target.clone()));
        }

        if let Some(chat) = state.cache().find_direct_with(me, &target.id).cloned() {
            debug!(chat_id = %chat.id, target = %target.id, "resolved from cache");
            state.select(chat.clone());
            self.status = OperationStatus::Succeeded;
            return Ok(Resolution::Cached(chat));
        }

        self.issued += 1;
        let ticket = ResolveTicket {
            id: self.issued,
            selection_generation: state.selection().generation(),
        };
        self.pending = Some(PendingResolve {
            ticket,
            target: target.id.clone(),
        });
        self.status = OperationStatus::Pending;
        debug!(target = %target.id, ticket = ticket.id, "resolving chat remotely");
        Ok(Resolution::Pending(ticket))
    }

    /// Apply the remote outcome for `ticket`.
    ///
    /// A failure leaves the cache and selection untouched and is returned as
    /// the error. A success is always cached; it is selected only if the
    /// selection has not moved since `begin`.
    pub fn complete(
        &mut self,
        ticket: ResolveTicket,
        outcome: ApiResult<Chat>,
        state: &mut ChatState,
    ) -> ChatResult<ResolveOutcome> {
        let pending = match self.pending.take() {
            Some(pending) if pending.ticket == ticket => pending,
            other => {
                self.pending = other;
                debug!(ticket = ticket.id, "discarding cancelled resolution");
                return Ok(ResolveOutcome::Discarded);
            }
        };

        let chat = match outcome {
            Ok(chat) => chat,
            Err(err) => {
                warn!(target = %pending.target, error = %err, "chat resolution failed");
                let err = ChatError::from(err);
                self.status = OperationStatus::Failed(err.clone());
                return Err(err);
            }
        };

        // An id already cached keeps the cached copy; select that one.
        state.upsert_chat(chat.clone());
        let chat = state.cache().get(&chat.id).cloned().unwrap_or(chat);
        self.status = OperationStatus::Succeeded;

        if state.selection().generation() != ticket.selection_generation {
            info!(chat_id = %chat.id, "selection changed while resolving, not selecting");
            return Ok(ResolveOutcome::Superseded(chat));
        }

        state.select(chat.clone());
        info!(chat_id = %chat.id, target = %pending.target, "chat resolved");
        Ok(ResolveOutcome::Selected(chat))
    }

    /// Forget the pending resolution; its outcome will be discarded.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(target = %pending.target, "resolution cancelled");
        }
        self.status = OperationStatus::Idle;
    }

    /// Resolve `target` end to end and return the chat.
    pub async fn resolve(
        &mut self,
        api: &dyn ChatApi,
        current: &CurrentUser,
        target: &User,
        state: &mut ChatState,
    ) -> ChatResult<Chat> {
        let ticket = match self.begin(state, current.id(), target)? {
            Resolution::Cached(chat) => return Ok(chat),
            Resolution::Pending(ticket) => ticket,
        };

        let outcome = api.access_chat(&current.token, &target.id).await;

        match self.complete(ticket, outcome, state)? {
            ResolveOutcome::Selected(chat) | ResolveOutcome::Superseded(chat) => Ok(chat),
            ResolveOutcome::Discarded => Err(ChatError::resolution_in_flight(target.id.clone())),
        }
    }
}
