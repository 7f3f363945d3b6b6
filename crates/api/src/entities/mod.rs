//! Domain entities mirrored from the remote chat service.
//!
//! These records are created and owned remotely; the client only caches them.

pub mod chat;
pub mod message;
pub mod user;

pub use chat::{Chat, ChatId};
pub use message::{Message, MessageId};
pub use user::{AuthToken, User, UserId};
