use chatsync_api::{Chat, ChatId, Message, MessageId, UserId};
use serde::{Deserialize, Serialize};

/// "Chat X has an unseen message."
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub message: Message,
    pub chat: ChatId,
}

impl Notification {
    pub fn for_message(message: Message) -> Self {
        let chat = message.chat.clone();
        Self { message, chat }
    }

    pub fn message_id(&self) -> &MessageId {
        &self.message.id
    }

    /// Menu label for this notification.
    ///
    /// `chat` is the cached chat, if known; without it the sender's name is used.
    pub fn title(&self, chat: Option<&Chat>, me: &UserId) -> String {
        match chat {
            Some(chat) if chat.is_group => format!("New Message in {}", chat.chat_name),
            Some(chat) => format!("New Message from {}", chat.display_name(me)),
            None => format!("New Message from {}", self.message.sender.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatsync_api::User;

    #[test]
    fn test_titles() {
        let alice = User::new("a", "Alice", "");
        let bob = User::new("b", "Bob", "");
        let me = "a".to_string();

        let direct = Chat::direct("c1", alice.clone(), bob.clone());
        let group = Chat::group("g1", "Weekend", vec![alice, bob.clone()]);
        let note = Notification::for_message(Message::new("m1", "c1", bob, "hey"));

        assert_eq!(note.chat, "c1");
        assert_eq!(note.title(Some(&direct), &me), "New Message from Bob");
        assert_eq!(note.title(Some(&group), &me), "New Message in Weekend");
        assert_eq!(note.title(None, &me), "New Message from Bob");
    }
}
