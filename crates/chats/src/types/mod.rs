//! Shared types for the chat state layer.

pub mod errors;
pub mod events;

pub use errors::{ChatError, ChatResult};
pub use events::InboundEvent;

/// Identifies one in-flight chat resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolveTicket {
    pub(crate) id: u64,
    /// Selection generation when the resolution started
    pub(crate) selection_generation: u64,
}

/// Identifies one chat-list refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(pub(crate) u64);
