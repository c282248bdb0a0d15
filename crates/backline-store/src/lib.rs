//! # backline-store: Keyed Record Store for Backline
//!
//! The persistence boundary of the booking & settlement core.
//!
//! ## The Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      RecordStore contract                           │
//! │                                                                     │
//! │   get_all(collection)        → every record of one entity type      │
//! │   replace_all(collection, v) → overwrite that collection wholesale  │
//! │   initial_float()            → the register's cash baseline         │
//! │   set_initial_float(amount)  → overwrite the baseline               │
//! │                                                                     │
//! │   That is ALL the store can do. No filtering, no sorting, no        │
//! │   row-level writes, no multi-collection transactions. Services      │
//! │   load a collection, mutate it in memory, and store it back —       │
//! │   and they order their own reads and writes so that a failed        │
//! │   validation never leaves a half-applied change behind.             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An implementation backed by a real database may use row-level writes
//! instead, as long as callers observe the same all-or-nothing behavior.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod json;
pub mod memory;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use json::JsonFileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

use backline_core::Money;

// =============================================================================
// Collections
// =============================================================================

/// The five collections the core owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Rooms,
    Reservations,
    Consumptions,
    Transactions,
    Contacts,
}

impl Collection {
    /// Every collection, for iteration in tooling and tests.
    pub const ALL: [Collection; 5] = [
        Collection::Rooms,
        Collection::Reservations,
        Collection::Consumptions,
        Collection::Transactions,
        Collection::Contacts,
    ];

    /// Stable storage key. Doubles as the JSON file stem on the file
    /// backend.
    pub const fn key(&self) -> &'static str {
        match self {
            Collection::Rooms => "rooms",
            Collection::Reservations => "reservations",
            Collection::Consumptions => "consumptions",
            Collection::Transactions => "transactions",
            Collection::Contacts => "contacts",
        }
    }
}

/// Storage key for the cash float scalar. It is a single number, not a
/// collection, and lives under its own key.
pub const INITIAL_FLOAT_KEY: &str = "initial_cash";

// =============================================================================
// RecordStore
// =============================================================================

/// A keyed collection store with whole-collection reads and writes.
pub trait RecordStore {
    /// Loads every record of a collection. An absent collection reads as
    /// empty, never as an error.
    fn get_all<T: DeserializeOwned>(&self, collection: Collection) -> StoreResult<Vec<T>>;

    /// Overwrites a collection wholesale.
    fn replace_all<T: Serialize>(&self, collection: Collection, records: &[T])
        -> StoreResult<()>;

    /// The register's cash baseline. Absent reads as zero.
    fn initial_float(&self) -> StoreResult<Money>;

    /// Overwrites the cash baseline.
    fn set_initial_float(&self, amount: Money) -> StoreResult<()>;
}
