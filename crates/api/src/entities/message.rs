use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::chat::{Chat, ChatId};
use super::user::User;

pub type MessageId = String;

/// A message as delivered by the remote system.
///
/// The wire `chat` field is either the owning chat's id or the populated
/// chat object. Either way `chat` holds the id; a populated object is kept in
/// `chat_details` so a chat first seen through a message can be shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "WireMessage")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: MessageId,
    pub content: String,
    pub sender: User,
    pub chat: ChatId,
    #[serde(skip)]
    pub chat_details: Option<Box<Chat>>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        id: impl Into<MessageId>,
        chat: impl Into<ChatId>,
        sender: User,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            sender,
            chat: chat.into(),
            chat_details: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the populated chat, as the real-time channel delivers it.
    pub fn with_chat_details(mut self, chat: Chat) -> Self {
        self.chat = chat.id.clone();
        self.chat_details = Some(Box::new(chat));
        self
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Message {}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChatRef {
    Id(ChatId),
    Populated(Box<Chat>),
    /// Populated, but with members that are not full user records.
    Reference {
        #[serde(rename = "_id")]
        id: ChatId,
    },
}

#[derive(Deserialize)]
struct WireMessage {
    #[serde(rename = "_id")]
    id: MessageId,
    content: String,
    sender: User,
    chat: ChatRef,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
}

impl From<WireMessage> for Message {
    fn from(wire: WireMessage) -> Self {
        let (chat, chat_details) = match wire.chat {
            ChatRef::Id(id) | ChatRef::Reference { id } => (id, None),
            ChatRef::Populated(chat) => (chat.id.clone(), Some(chat)),
        };
        Self {
            id: wire.id,
            content: wire.content,
            sender: wire.sender,
            chat,
            chat_details,
            created_at: wire.created_at,
        }
    }
}
