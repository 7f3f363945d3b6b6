//! Domain entities owned by the client.
//!
//! Chats, messages and users are mirrored from the remote service and live in
//! `chatsync-api`; notifications exist only on this side.

pub mod notification;

pub use notification::Notification;
