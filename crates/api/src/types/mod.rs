//! Shared types for the remote API layer.

pub mod errors;

pub use errors::{ApiError, ApiResult};

/// Observable outcome of an asynchronous operation.
///
/// Presentation renders exactly one of these per operation, so pending,
/// success and failure never overlap.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationStatus<E> {
    Idle,
    Pending,
    Succeeded,
    Failed(E),
}

impl<E> Default for OperationStatus<E> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<E> OperationStatus<E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}
