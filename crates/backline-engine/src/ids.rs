//! # Identifier Source
//!
//! Unique ids for reservations, consumptions, and transactions.
//!
//! The system this core replaces minted ids from the wall clock
//! (`Date.now()`-style) and papered over the resulting collision risk by
//! suffixing an array index onto batch-created reservations. Ids here come
//! from a dedicated source instead: UUID v4 in production, a counter in
//! tests.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Supplies unique identifiers for newly created records.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random UUID v4 ids. Globally unique without coordination.
#[derive(Debug, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic sequential ids (`id-1`, `id-2`, …) for tests that want
/// to assert on specific records.
#[derive(Debug)]
pub struct SequenceSource {
    prefix: String,
    counter: AtomicU64,
}

impl SequenceSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequenceSource {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SequenceSource {
    fn default() -> Self {
        SequenceSource::new("id")
    }
}

impl IdSource for SequenceSource {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}
