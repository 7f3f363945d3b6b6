//! The chat currently being viewed.

use chatsync_api::{Chat, ChatId, Message};
use tracing::debug;

use crate::stores::NotificationStore;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    NoneSelected,
    Selected(Chat),
}

/// Holds the active chat.
///
/// Every transition bumps a generation counter so that work started under
/// an earlier selection can tell it has been overtaken.
#[derive(Debug, Default, Clone)]
pub struct ChatSelectionController {
    selection: Selection,
    generation: u64,
}

impl ChatSelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `chat` active and mark it read in one step.
    pub fn select(&mut self, chat: Chat, notifications: &mut NotificationStore) {
        let cleared = notifications.remove_by_chat(&chat.id);
        debug!(chat_id = %chat.id, cleared, "chat selected");
        self.selection = Selection::Selected(chat);
        self.generation += 1;
    }

    /// Clear the selection.
    ///
    /// When the selected chat disappears remotely, whoever learns of it must
    /// call this before presenting state again.
    pub fn deselect(&mut self) {
        if let Selection::Selected(chat) = &self.selection {
            debug!(chat_id = %chat.id, "chat deselected");
        }
        self.selection = Selection::NoneSelected;
        self.generation += 1;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Option<&Chat> {
        match &self.selection {
            Selection::Selected(chat) => Some(chat),
            Selection::NoneSelected => None,
        }
    }

    pub fn selected_id(&self) -> Option<&ChatId> {
        self.selected().map(|chat| &chat.id)
    }

    pub fn is_selected(&self, chat_id: &str) -> bool {
        self.selected_id().is_some_and(|id| id == chat_id)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swap in a newer copy of the selected chat. Not a transition, so the
    /// generation is unchanged.
    pub(crate) fn refresh(&mut self, chat: Chat) {
        if let Selection::Selected(current) = &mut self.selection {
            if current.id == chat.id {
                *current = chat;
            }
        }
    }

    /// Keep the selected copy's latest message in step with the cache.
    pub(crate) fn update_latest_message(&mut self, message: &Message) {
        if let Selection::Selected(chat) = &mut self.selection {
            if chat.id == message.chat {
                chat.latest_message = Some(message.clone());
            }
        }
    }
}
