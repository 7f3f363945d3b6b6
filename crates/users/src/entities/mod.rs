//! Domain entities for the users crate.

pub mod session;

pub use session::CurrentUser;
