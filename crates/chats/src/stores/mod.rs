//! In-memory client state.
//!
//! Both stores are owned by a single writer and mutated sequentially, so
//! they carry no locking.

pub mod chat_cache;
pub mod notification_store;

pub use chat_cache::ChatCache;
pub use notification_store::NotificationStore;
