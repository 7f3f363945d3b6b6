//! Chat state transitions and the operations that drive them.
//!
//! [`ChatState`] owns the cache, notifications and selection. The other
//! services take it by `&mut` and apply remote outcomes to it.

pub mod chat_list;
pub mod chat_state;
pub mod resolver;
pub mod selection;

pub use chat_list::ChatListSync;
pub use chat_state::ChatState;
pub use resolver::{ChatResolver, Resolution, ResolveOutcome};
pub use selection::{ChatSelectionController, Selection};
