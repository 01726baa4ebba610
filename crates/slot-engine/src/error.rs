//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// Caller supplied an unusable value (non-positive duration or grid step,
    /// malformed time, a booking that does not fit the schedule).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A collaborator could not resolve a provider or service.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// A proposed booking overlaps an existing one.
    #[error("Booking conflict: {0}")]
    Conflict(String),

    /// A schedule repository failed for reasons other than a missing record.
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
