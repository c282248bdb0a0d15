//! # backline-engine: Booking & Settlement Services
//!
//! The mutation surface of the Backline core. Five services over the
//! record store, plus the [`Venue`] facade that owns the store and hands
//! them out:
//!
//! - [`BookingScheduler`] - slot conflicts, single and recurring bookings,
//!   cancellation, the abono flag
//! - [`ConsumptionLedger`] - the per-reservation tab
//! - [`SettlementEngine`] - closing a reservation against cash, transfer,
//!   or debt
//! - [`DebtLedger`] - clearing and writing off contact debt
//! - [`CashRegister`] - derived cash balance, withdrawals, walk-up bar
//!   sales, day totals
//!
//! ## Example
//!
//! ```rust
//! use backline_core::{Money, Room, RoomColor};
//! use backline_engine::{SettlementMethod, SlotRequest, Venue};
//! use backline_store::{Collection, MemoryStore, RecordStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! store.replace_all(
//!     Collection::Rooms,
//!     &[Room {
//!         id: "sala1".into(),
//!         name: "Sala 1".into(),
//!         color: RoomColor::Blue,
//!         price: Money::new(8500),
//!     }],
//! )?;
//!
//! let venue = Venue::new(store);
//! let created = venue.scheduler().reserve_confirmed(
//!     &SlotRequest {
//!         date: "2024-07-01".parse()?,
//!         start: "18:00".parse().unwrap(),
//!         end: "20:00".parse().unwrap(),
//!         room_id: "sala1".into(),
//!         band_name: "Los Persas".into(),
//!     },
//!     false,
//! )?;
//!
//! let receipt = venue
//!     .settlement()
//!     .close(&created[0].id, SettlementMethod::Cash)?;
//! assert_eq!(receipt.due, Money::new(8500));
//! assert_eq!(venue.cash().balance()?, Money::new(8500));
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cash;
pub mod consumption;
pub mod debt;
pub mod error;
pub mod ids;
pub mod scheduler;
pub mod settlement;
pub mod venue;

// =============================================================================
// Re-exports
// =============================================================================

pub use cash::{CashRegister, DayTotals};
pub use consumption::{ConsumptionLedger, StockGuard, Unguarded};
pub use debt::{DebtLedger, DebtSettleMode};
pub use error::{EngineError, EngineResult};
pub use ids::{IdSource, SequenceSource, UuidSource};
pub use scheduler::{BookingScheduler, CancelReason, SlotRequest};
pub use settlement::{SettlementEngine, SettlementMethod, SettlementResult};
pub use venue::Venue;

// =============================================================================
// Transaction Categories
// =============================================================================
// Free-form tags on ledger entries. Kept as constants so the reporting
// views group them consistently.

/// Income from settling a band's reservation (room charge + tab).
pub const CATEGORY_ROOM_SETTLEMENT: &str = "room settlement";

/// Income from collecting a contact's standing debt in full.
pub const CATEGORY_DEBT_COLLECTION: &str = "debt collection";

/// Expense from forgiving a contact's standing debt.
pub const CATEGORY_DEBT_WRITEOFF: &str = "debt write-off";

/// Income from a walk-up bar sale with no reservation.
pub const CATEGORY_BAR_SALE: &str = "bar sale";

/// Expense from taking cash out of the register.
pub const CATEGORY_CASH_WITHDRAWAL: &str = "cash withdrawal";

/// Income from a contact's recurring subscription payment.
pub const CATEGORY_ABONO_COLLECTION: &str = "abono collection";
