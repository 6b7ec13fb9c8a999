//! Engine errors.

use grasp_types::ErrorCode;
use thiserror::Error;

/// Errors from registration list operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// An immediate reorder was attempted while buffered changes were
    /// pending. Flush first, then move.
    #[error("cannot move item immediately while registration changes are pending")]
    PendingChanges,
}

impl ErrorCode for RegistryError {
    fn code(&self) -> &'static str {
        match self {
            Self::PendingChanges => "REGISTRY_PENDING_CHANGES",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Flushing the list and retrying the move succeeds.
        matches!(self, Self::PendingChanges)
    }
}
