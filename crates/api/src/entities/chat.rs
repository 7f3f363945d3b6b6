use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use super::message::Message;
use super::user::{User, UserId};

pub type ChatId = String;

/// Represents a conversation, either one-to-one or group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    #[serde(rename = "_id")]
    pub id: ChatId,
    #[serde(rename = "isGroupChat", default)]
    pub is_group: bool,
    /// Only meaningful for group chats
    #[serde(rename = "chatName", default)]
    pub chat_name: String,
    /// Members, unique by id
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(
        rename = "latestMessage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub latest_message: Option<Message>,
}

impl Chat {
    /// Create a one-to-one chat between two users.
    pub fn direct(id: impl Into<ChatId>, a: User, b: User) -> Self {
        Self {
            id: id.into(),
            is_group: false,
            chat_name: "sender".to_string(),
            users: vec![a, b],
            latest_message: None,
        }
    }

    /// Create a group chat.
    pub fn group(id: impl Into<ChatId>, name: impl Into<String>, users: Vec<User>) -> Self {
        Self {
            id: id.into(),
            is_group: true,
            chat_name: name.into(),
            users,
            latest_message: None,
        }
    }

    pub fn has_member(&self, user_id: &str) -> bool {
        self.users.iter().any(|user| user.id == user_id)
    }

    pub fn member_ids(&self) -> BTreeSet<&str> {
        self.users.iter().map(|user| user.id.as_str()).collect()
    }

    /// True if this is a non-group chat whose member set is exactly `{me, other}`.
    pub fn is_direct_between(&self, me: &UserId, other: &UserId) -> bool {
        if self.is_group {
            return false;
        }

        let candidate: BTreeSet<&str> = [me.as_str(), other.as_str()].into_iter().collect();
        self.member_ids() == candidate
    }

    /// The member that is not `me`; falls back to the first member for a self-chat.
    pub fn other_member(&self, me: &UserId) -> Option<&User> {
        self.users
            .iter()
            .find(|user| &user.id != me)
            .or_else(|| self.users.first())
    }

    /// Title shown in chat lists.
    pub fn display_name(&self, me: &UserId) -> &str {
        if self.is_group {
            return &self.chat_name;
        }

        self.other_member(me)
            .map(|user| user.name.as_str())
            .unwrap_or(&self.chat_name)
    }

    /// One-line summary of the latest message.
    pub fn preview(&self, me: &UserId) -> Option<String> {
        let message = self.latest_message.as_ref()?;

        if !self.is_group {
            return Some(message.content.clone());
        }

        if &message.sender.id == me {
            Some(format!("You: {}", message.content))
        } else {
            Some(format!("{}: {}", message.sender.name, message.content))
        }
    }
}

impl PartialEq for Chat {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Chat {}

impl Hash for Chat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
