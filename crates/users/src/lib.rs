//! # chatsync Users Crate
//!
//! The signed-in user, the persisted session record, and the user search
//! controller that feeds chat resolution.
//!
//! ## Architecture
//!
//! - **Entities**: `CurrentUser` (user + auth token)
//! - **Services**: `UserSearchController`, `SessionStore`
//! - **Types**: errors and search tickets

pub mod entities;
pub mod services;
pub mod types;

pub use entities::CurrentUser;
pub use services::{SearchState, SessionStore, UserSearchController};
pub use types::{SearchTicket, UserError, UserResult};
