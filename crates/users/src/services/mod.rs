//! Services for the users crate.

pub mod search;
pub mod session_store;

pub use search::{SearchState, UserSearchController};
pub use session_store::SessionStore;
