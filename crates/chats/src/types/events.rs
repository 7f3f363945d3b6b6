//! Events raised by the real-time delivery channel.

use chatsync_api::{ChatId, Message};
use serde::{Deserialize, Serialize};

/// Something the server pushed to this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InboundEvent {
    /// A new message arrived in one of the user's chats
    MessageReceived(Message),

    /// The chat no longer exists for this user
    ChatRemoved { chat_id: ChatId },
}

impl InboundEvent {
    pub fn chat_id(&self) -> &ChatId {
        match self {
            Self::MessageReceived(message) => &message.chat,
            Self::ChatRemoved { chat_id } => chat_id,
        }
    }
}
