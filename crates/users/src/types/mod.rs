//! Shared types for the users crate.

pub mod errors;

pub use errors::{UserError, UserResult};

/// Identifier of one issued search; only the newest one may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(pub(crate) u64);
