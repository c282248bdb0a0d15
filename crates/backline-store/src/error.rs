//! # Store Error Types
//!
//! Error types for record store operations.

use thiserror::Error;

/// Record store failures.
///
/// These wrap I/O and serialization errors from the backends; callers in
/// the engine surface them unchanged so the operator can retry.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed (missing directory, permissions, disk
    /// full).
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A collection's payload could not be encoded or decoded.
    ///
    /// On read this means the stored file was edited or corrupted by
    /// hand; the store never writes a payload it cannot read back.
    #[error("store serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
