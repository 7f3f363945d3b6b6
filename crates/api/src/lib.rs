//! # chatsync API Crate
//!
//! Entities mirrored from the remote chat service, the [`ChatApi`] contract
//! the client state layer talks to, and an HTTP implementation of it.
//!
//! ## Usage
//!
//! ```no_run
//! use chatsync_api::{AuthToken, ChatApi, HttpChatApi};
//! use chatsync_config::ApiConfig;
//!
//! # async fn run() -> chatsync_api::ApiResult<()> {
//! let api = HttpChatApi::new(&ApiConfig::default())?;
//! let chats = api.fetch_chats(&AuthToken::new("token")).await?;
//! # Ok(())
//! # }
//! ```

pub mod entities;
pub mod http;
pub mod remote;
pub mod types;

pub use entities::{AuthToken, Chat, ChatId, Message, MessageId, User, UserId};
pub use http::HttpChatApi;
pub use remote::ChatApi;
pub use types::{ApiError, ApiResult, OperationStatus};
