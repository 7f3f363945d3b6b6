//! Ordered local copy of the user's chat list.

use std::collections::HashSet;

use chatsync_api::{Chat, ChatId, Message, UserId};
use tracing::{debug, warn};

/// The user's chats, most recently surfaced first.
///
/// Holds at most one chat per id.
#[derive(Debug, Default, Clone)]
pub struct ChatCache {
    chats: Vec<Chat>,
}

impl ChatCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a fresh fetch.
    ///
    /// Should the server repeat an id, the first occurrence wins.
    pub fn replace_all(&mut self, chats: Vec<Chat>) {
        let received = chats.len();
        let mut seen = HashSet::with_capacity(received);
        self.chats = chats
            .into_iter()
            .filter(|chat| seen.insert(chat.id.clone()))
            .collect();

        if self.chats.len() != received {
            warn!(
                received,
                kept = self.chats.len(),
                "dropped duplicate chat ids from fetch"
            );
        }
        debug!(count = self.chats.len(), "chat cache replaced");
    }

    /// Insert `chat` at the front unless its id is already cached.
    ///
    /// An existing entry keeps both its position and its content. Returns
    /// whether the chat was inserted.
    pub fn upsert_front(&mut self, chat: Chat) -> bool {
        if self.contains(&chat.id) {
            debug!(chat_id = %chat.id, "chat already cached");
            return false;
        }

        debug!(chat_id = %chat.id, "chat added to cache");
        self.chats.insert(0, chat);
        true
    }

    pub fn find<P>(&self, mut predicate: P) -> Option<&Chat>
    where
        P: FnMut(&Chat) -> bool,
    {
        self.chats.iter().find(|&chat| predicate(chat))
    }

    /// The non-group chat whose members are exactly `{me, other}`.
    pub fn find_direct_with(&self, me: &UserId, other: &UserId) -> Option<&Chat> {
        self.find(|chat| chat.is_direct_between(me, other))
    }

    pub fn get(&self, id: &str) -> Option<&Chat> {
        self.find(|chat| chat.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Set `latest_message` on the message's chat. Returns `false` if that
    /// chat is not cached.
    pub fn update_latest_message(&mut self, message: &Message) -> bool {
        match self.chats.iter_mut().find(|chat| chat.id == message.chat) {
            Some(chat) => {
                chat.latest_message = Some(message.clone());
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Chat> {
        let index = self.chats.iter().position(|chat| chat.id == id)?;
        Some(self.chats.remove(index))
    }

    pub fn clear(&mut self) {
        self.chats.clear();
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chat> {
        self.chats.iter()
    }

    pub fn ids(&self) -> Vec<&ChatId> {
        self.chats.iter().map(|chat| &chat.id).collect()
    }
}
