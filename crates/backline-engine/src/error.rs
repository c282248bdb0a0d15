//! # Engine Error Types
//!
//! What callers of the services see. Three recoverable shapes — conflict,
//! not-found, validation — plus store failures surfaced for retry.
//!
//! No operation mutates state before failing: every service validates its
//! whole input (and, for batches, every member of the batch) before the
//! first write.

use chrono::NaiveDate;
use thiserror::Error;

use backline_core::{CoreError, ReservationStatus, ValidationError};
use backline_store::StoreError;

/// Service operation errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested slot overlaps an existing reservation. Recoverable:
    /// the caller re-prompts for another slot. For recurring bookings the
    /// date is the first conflicting one in the expansion.
    #[error("slot unavailable on {date}")]
    Conflict { date: NaiveDate },

    /// An operation referenced an entity that is not in its collection —
    /// a caller bug or stale state, surfaced rather than retried.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The reservation is not in a state that allows the operation
    /// (settlement requires a confirmed reservation).
    #[error("reservation {id} is {status:?}, cannot perform operation")]
    InvalidStatus {
        id: String,
        status: ReservationStatus,
    },

    /// The caller's stock guard vetoed adding a product to a tab.
    #[error("product {product_id} is out of stock")]
    OutOfStock { product_id: String },

    /// Input rejected before any mutation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A domain rule violation from the core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The record store failed; the operation may be retried as a whole.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        EngineError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Result type for service operations.
pub type EngineResult<T> = Result<T, EngineError>;
