//! Chat list, notifications and selection bundled as one state object.

use chatsync_api::{Chat, Message, UserId};
use tracing::{debug, info};

use crate::entities::Notification;
use crate::services::selection::ChatSelectionController;
use crate::stores::{ChatCache, NotificationStore};
use crate::types::{ChatError, ChatResult, InboundEvent};

/// Client-side chat state for one signed-in user.
///
/// Owns the cache, the notification store and the selection so that the
/// couplings between them (select clears notifications, a message for the
/// open chat is not a notification) live in one place.
#[derive(Debug, Default, Clone)]
pub struct ChatState {
    cache: ChatCache,
    notifications: NotificationStore,
    selection: ChatSelectionController,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &ChatCache {
        &self.cache
    }

    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    pub fn selection(&self) -> &ChatSelectionController {
        &self.selection
    }

    pub fn selected(&self) -> Option<&Chat> {
        self.selection.selected()
    }

    pub fn select(&mut self, chat: Chat) {
        self.selection.select(chat, &mut self.notifications);
    }

    /// Select a cached chat by id, e.g. from a notification entry.
    pub fn select_by_id(&mut self, chat_id: &str) -> ChatResult<()> {
        let chat = self
            .cache
            .get(chat_id)
            .cloned()
            .ok_or_else(|| ChatError::chat_not_found(chat_id))?;
        self.select(chat);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selection.deselect();
    }

    /// Install a freshly fetched chat list.
    ///
    /// The selected chat takes the fetched copy; if it is missing from the
    /// new list it no longer exists for this user and is deselected.
    pub fn replace_chats(&mut self, chats: Vec<Chat>) {
        self.cache.replace_all(chats);

        let Some(selected_id) = self.selection.selected_id() else {
            return;
        };
        match self.cache.get(selected_id).cloned() {
            Some(fresh) => self.selection.refresh(fresh),
            None => {
                info!("selected chat no longer listed, deselecting");
                self.selection.deselect();
            }
        }
    }

    pub fn upsert_chat(&mut self, chat: Chat) -> bool {
        self.cache.upsert_front(chat)
    }

    /// Reconcile an inbound message.
    ///
    /// Returns `true` if a notification was recorded; messages for the open
    /// chat only refresh its latest message. A chat not yet cached is added
    /// at the front when the message carries it.
    pub fn receive_message(&mut self, message: Message) -> bool {
        if !self.cache.contains(&message.chat) {
            if let Some(chat) = message.chat_details.as_deref() {
                info!(chat_id = %chat.id, "chat first seen through a message");
                self.cache.upsert_front(chat.clone());
            }
        }
        self.cache.update_latest_message(&message);
        self.selection.update_latest_message(&message);

        if self.selection.is_selected(&message.chat) {
            debug!(chat_id = %message.chat, "message for open chat, no notification");
            return false;
        }

        let before = self.notifications.count();
        self.notifications.add(Notification::for_message(message)) > before
    }

    /// Drop a chat that was removed remotely.
    pub fn remove_chat(&mut self, chat_id: &str) -> Option<Chat> {
        let removed = self.cache.remove(chat_id);
        self.notifications.remove_by_chat(chat_id);

        if self.selection.is_selected(chat_id) {
            self.selection.deselect();
        }

        debug!(chat_id, found = removed.is_some(), "chat removed");
        removed
    }

    pub fn apply(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::MessageReceived(message) => {
                self.receive_message(message);
            }
            InboundEvent::ChatRemoved { chat_id } => {
                self.remove_chat(&chat_id);
            }
        }
    }

    /// Notifications with their menu labels, oldest first.
    pub fn notification_titles(&self, me: &UserId) -> Vec<(String, &Notification)> {
        self.notifications
            .iter()
            .map(|note| {
                let chat = self
                    .cache
                    .get(&note.chat)
                    .or(note.message.chat_details.as_deref());
                (note.title(chat, me), note)
            })
            .collect()
    }

    /// Forget everything; used on logout.
    pub fn clear(&mut self) {
        self.notifications.clear();
        self.selection.deselect();
        self.cache.clear();
        info!("chat state cleared");
    }
}
