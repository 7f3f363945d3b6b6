//! # Chatsync Chats Crate
//!
//! Client-side chat state: the cached chat list, unseen-message
//! notifications, the selected chat, and resolution of "chat with this user"
//! into a concrete chat.
//!
//! ## Architecture
//!
//! - **Entities**: Client-only models (Notification)
//! - **Stores**: In-memory chat cache and notification store
//! - **Services**: Selection, resolution, chat list sync, and the combined state
//! - **Types**: Errors, inbound events, operation tickets
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chatsync_api::{HttpChatApi, User};
//! use chatsync_chats::{ChatListSync, ChatResolver, ChatState};
//! use chatsync_users::CurrentUser;
//!
//! # async fn run(api: HttpChatApi, me: CurrentUser, bob: User) -> Result<(), chatsync_chats::ChatError> {
//! let mut state = ChatState::new();
//! ChatListSync::new().refresh(&api, &me.token, &mut state).await?;
//!
//! let chat = ChatResolver::new().resolve(&api, &me, &bob, &mut state).await?;
//! assert_eq!(state.selected().map(|c| &c.id), Some(&chat.id));
//! # Ok(())
//! # }
//! ```

pub mod entities;
pub mod services;
pub mod stores;
pub mod types;

pub use entities::Notification;
pub use services::{
    ChatListSync, ChatResolver, ChatSelectionController, ChatState, Resolution, ResolveOutcome,
    Selection,
};
pub use stores::{ChatCache, NotificationStore};
pub use types::{ChatError, ChatResult, InboundEvent, RefreshTicket, ResolveTicket};
