//! Pending unseen-message notifications.

use chatsync_api::ChatId;
use tracing::debug;

use crate::entities::Notification;

/// One entry per unseen message, in arrival order.
///
/// A second notification for a message id already present is ignored, so
/// redelivered events never inflate the count.
#[derive(Debug, Default, Clone)]
pub struct NotificationStore {
    entries: Vec<Notification>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a notification and return the updated count.
    pub fn add(&mut self, notification: Notification) -> usize {
        let duplicate = self
            .entries
            .iter()
            .any(|entry| entry.message_id() == notification.message_id());

        if duplicate {
            debug!(message_id = %notification.message_id(), "ignoring duplicate notification");
        } else {
            debug!(
                message_id = %notification.message_id(),
                chat_id = %notification.chat,
                "notification added"
            );
            self.entries.push(notification);
        }

        self.entries.len()
    }

    /// Drop every notification for `chat_id`; returns how many were removed.
    pub fn remove_by_chat(&mut self, chat_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.chat != chat_id);
        let removed = before - self.entries.len();

        if removed > 0 {
            debug!(chat_id, removed, "notifications cleared for chat");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn count_for(&self, chat_id: &str) -> usize {
        self.entries.iter().filter(|entry| entry.chat == chat_id).count()
    }

    /// Distinct chats with unseen messages, in order of their first notification.
    pub fn unread_chats(&self) -> Vec<&ChatId> {
        let mut chats: Vec<&ChatId> = Vec::new();
        for entry in &self.entries {
            if !chats.contains(&&entry.chat) {
                chats.push(&entry.chat);
            }
        }
        chats
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatsync_api::{Message, User};

    fn note(message_id: &str, chat_id: &str) -> Notification {
        Notification::for_message(Message::new(
            message_id,
            chat_id,
            User::new("b", "Bob", "bob@example.com"),
            "hello",
        ))
    }

    #[test]
    fn test_add_returns_count_and_rejects_duplicate_message_ids() {
        let mut store = NotificationStore::new();

        assert_eq!(store.add(note("m1", "c1")), 1);
        assert_eq!(store.add(note("m2", "c1")), 2);
        assert_eq!(store.add(note("m1", "c1")), 2);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_remove_by_chat_only_touches_that_chat() {
        let mut store = NotificationStore::new();
        store.add(note("m1", "c1"));
        store.add(note("m2", "c2"));
        store.add(note("m3", "c1"));

        assert_eq!(store.remove_by_chat("c1"), 2);
        assert_eq!(store.count_for("c1"), 0);
        assert_eq!(store.count(), 1);

        assert_eq!(store.remove_by_chat("c1"), 0);
        assert_eq!(store.remove_by_chat("unknown"), 0);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_count_matches_adds_minus_removals_over_a_sequence() {
        let mut store = NotificationStore::new();
        let mut expected: Vec<(String, String)> = Vec::new();

        let ops: &[(&str, &str, &str)] = &[
            ("add", "m1", "c1"),
            ("add", "m2", "c2"),
            ("add", "m2", "c2"),
            ("remove", "", "c1"),
            ("add", "m3", "c1"),
            ("add", "m4", "c3"),
            ("remove", "", "c2"),
            ("remove", "", "c2"),
            ("add", "m5", "c3"),
        ];

        for (op, message_id, chat_id) in ops {
            match *op {
                "add" => {
                    store.add(note(message_id, chat_id));
                    if !expected.iter().any(|(m, _)| m == message_id) {
                        expected.push((message_id.to_string(), chat_id.to_string()));
                    }
                }
                _ => {
                    store.remove_by_chat(chat_id);
                    expected.retain(|(_, c)| c != chat_id);
                    assert_eq!(store.count_for(chat_id), 0);
                }
            }
            assert_eq!(store.count(), expected.len());
        }
    }

    #[test]
    fn test_unread_chats_collapses_per_chat() {
        let mut store = NotificationStore::new();
        store.add(note("m1", "c2"));
        store.add(note("m2", "c1"));
        store.add(note("m3", "c2"));

        assert_eq!(store.unread_chats(), vec!["c2", "c1"]);
    }

    #[test]
    fn test_clear() {
        let mut store = NotificationStore::new();
        store.add(note("m1", "c1"));
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.count(), 0);
    }
}
