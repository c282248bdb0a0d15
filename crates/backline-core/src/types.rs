//! # Domain Types
//!
//! Core domain types for the booking & settlement system.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐         │
//! │  │     Room      │   │  Reservation  │   │  Consumption  │         │
//! │  │  ───────────  │   │  ───────────  │   │  ───────────  │         │
//! │  │  id           │   │  id           │   │  id           │         │
//! │  │  name         │   │  band_name    │   │  reservation  │         │
//! │  │  color        │   │  date + slot  │   │  lines[]      │         │
//! │  │  price        │   │  status       │   │  total        │         │
//! │  └───────────────┘   │  total        │   │  paid/method  │         │
//! │                      │  is_abono     │   └───────────────┘         │
//! │  ┌───────────────┐   └───────────────┘   ┌───────────────┐         │
//! │  │  Transaction  │                       │    Contact    │         │
//! │  │  ───────────  │   ReservationStatus   │  ───────────  │         │
//! │  │  id, kind     │   Pending             │  id, names    │         │
//! │  │  category     │   Confirmed           │  debt (≥ 0)   │         │
//! │  │  amount       │   Rejected            │  is_abono     │         │
//! │  │  paid/method  │   Completed           │               │         │
//! │  └───────────────┘                       └───────────────┘         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pricing
//! Prices are captured once — the room price into `Reservation::total` at
//! booking time, the product price into `ConsumptionLine::unit_price` at
//! add time — and never re-read from the catalog. Historical charges must
//! not move when the price list does.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::slot::{TimeSlot, WallTime};

// =============================================================================
// Room
// =============================================================================

/// Color tag shown on the schedule grid for a room's bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomColor {
    Blue,
    Green,
    Violet,
    Red,
}

/// A bookable rehearsal room.
///
/// Immutable except `price`, which the external pricing collaborator may
/// edit; existing reservations keep their snapshotted charge either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier.
    pub id: String,

    /// Display name shown on the grid and receipts.
    pub name: String,

    /// Color tag.
    pub color: RoomColor,

    /// Price per slot, snapshotted into each reservation at creation.
    pub price: Money,
}

// =============================================================================
// Reservation
// =============================================================================

/// The lifecycle of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Requested by a client, awaiting staff approval.
    Pending,
    /// Approved (or staff-created); blocks its slot and can be settled.
    Confirmed,
    /// Cancelled by the client; kept for attendance history but no longer
    /// blocks the slot.
    Rejected,
    /// Settled and closed. Terminal.
    Completed,
}

impl Default for ReservationStatus {
    fn default() -> Self {
        ReservationStatus::Pending
    }
}

/// A booking of one room for one time slot on one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,

    /// Band the slot is held for; also the settlement key into the
    /// contact list (matched case-insensitively).
    pub band_name: String,

    /// Calendar day of the booking.
    pub date: NaiveDate,

    /// Slot start, day-local wall clock.
    pub start: WallTime,

    /// Slot end (exclusive); `24:00` means up to midnight.
    pub end: WallTime,

    pub room_id: String,

    pub status: ReservationStatus,

    /// Room charge snapshot taken from the room's price at creation.
    pub total: Money,

    /// Recurring-subscription booking. The room charge is waived at
    /// settlement (it is billed through the contact's subscription
    /// instead); only the consumption tab is collected.
    #[serde(default)]
    pub is_abono: bool,
}

impl Reservation {
    /// The booked interval.
    ///
    /// Stored reservations always hold a non-empty range, so this cannot
    /// fail for persisted data.
    pub fn slot(&self) -> TimeSlot {
        TimeSlot {
            date: self.date,
            start: self.start,
            end: self.end,
        }
    }

    /// Whether this reservation blocks its slot for conflict purposes.
    /// Rejected bookings keep their record but free the slot.
    pub fn blocks_slot(&self) -> bool {
        self.status != ReservationStatus::Rejected
    }

    /// The room charge collected at settlement: waived entirely for
    /// abono bookings, the snapshotted total otherwise.
    pub fn room_charge(&self) -> Money {
        if self.is_abono {
            Money::zero()
        } else {
            self.total
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How money moved (or didn't) for a transaction or settled tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash into the register.
    Cash,
    /// Electronic transfer to the venue's account.
    ElectronicTransfer,
    /// Nothing moved; the amount went onto a contact's debt.
    Debt,
    /// Card terminal.
    Card,
}

// =============================================================================
// Consumption
// =============================================================================

/// One product line on a consumption tab.
///
/// Uses the snapshot pattern: `name` and `unit_price` are frozen at the
/// moment the item is added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumptionLine {
    pub product_id: String,

    /// Product name at add time (frozen).
    pub name: String,

    /// Unit price at add time (frozen).
    pub unit_price: Money,

    /// Quantity, always ≥ 1; a line that would drop to 0 is removed.
    pub quantity: i64,
}

impl ConsumptionLine {
    /// Line total (`unit_price × quantity`).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// The running bar/extras tab tied to one reservation.
///
/// ## Invariants
/// - At most one consumption per reservation (created lazily on the first
///   item)
/// - Lines are unique by `(product_id, unit_price)`: the same product
///   added again at the same price increments the line, added at a new
///   price opens a second line
/// - `total` always equals the sum of the line totals; every mutation
///   recomputes it and never trusts the stored value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consumption {
    pub id: String,

    pub reservation_id: String,

    pub lines: Vec<ConsumptionLine>,

    /// Derived: `Σ unit_price × quantity`. Recomputed on every mutation.
    pub total: Money,

    /// Set at settlement together with `method`.
    pub paid: bool,

    pub method: Option<PaymentMethod>,
}

impl Consumption {
    /// Creates an empty, unpaid tab for a reservation.
    pub fn new(id: impl Into<String>, reservation_id: impl Into<String>) -> Self {
        Consumption {
            id: id.into(),
            reservation_id: reservation_id.into(),
            lines: Vec::new(),
            total: Money::zero(),
            paid: false,
            method: None,
        }
    }

    /// Adds one unit of a product at the given (already resolved) price.
    ///
    /// Merges into an existing line only when both the product and the
    /// recorded unit price match; a price change in the catalog between
    /// adds opens a separate line rather than silently repricing the old
    /// one.
    pub fn add_line(&mut self, product_id: &str, name: &str, unit_price: Money) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id && l.unit_price == unit_price)
        {
            line.quantity += 1;
        } else {
            self.lines.push(ConsumptionLine {
                product_id: product_id.to_string(),
                name: name.to_string(),
                unit_price,
                quantity: 1,
            });
        }
        self.recompute_total();
    }

    /// Adds `delta` to the first line matching the product; a quantity
    /// that drops to 0 or below removes the line.
    pub fn adjust_quantity(&mut self, product_id: &str, delta: i64) -> CoreResult<()> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or_else(|| CoreError::LineNotFound {
                product_id: product_id.to_string(),
            })?;

        self.lines[idx].quantity += delta;
        if self.lines[idx].quantity <= 0 {
            self.lines.remove(idx);
        }
        self.recompute_total();
        Ok(())
    }

    /// Unconditionally removes the first line matching the product.
    pub fn remove_line(&mut self, product_id: &str) -> CoreResult<()> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or_else(|| CoreError::LineNotFound {
                product_id: product_id.to_string(),
            })?;

        self.lines.remove(idx);
        self.recompute_total();
        Ok(())
    }

    /// Re-derives `total` from the lines.
    pub fn recompute_total(&mut self) {
        self.total = self.lines.iter().map(ConsumptionLine::line_total).sum();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// An append-only bookkeeping entry.
///
/// The core only ever appends transactions; edits to amount/category and
/// the paid-flag toggle belong to the external bookkeeping views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,

    pub kind: TransactionKind,

    /// Free-form tag ("room settlement", "bar sale", "cash withdrawal", …).
    pub category: String,

    pub amount: Money,

    pub timestamp: DateTime<Utc>,

    pub description: String,

    /// False only for income that is still owed (a debt-method bar sale).
    pub paid: bool,

    pub method: Option<PaymentMethod>,
}

impl Transaction {
    /// Whether the entry represents money that never physically moved.
    /// Debt-backed entries are excluded from the cash balance by
    /// definition.
    #[inline]
    pub fn is_debt_backed(&self) -> bool {
        self.method == Some(PaymentMethod::Debt)
    }
}

// =============================================================================
// Contact
// =============================================================================

/// A client/band on file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,

    /// Contact person.
    pub name: String,

    /// Band name; settlement matches reservations to contacts by this,
    /// case-insensitively.
    pub band_name: String,

    /// Outstanding balance. Never negative; only the settlement engine's
    /// debt branch may increase it.
    #[serde(default)]
    pub debt: Money,

    /// Active recurring subscription.
    #[serde(default)]
    pub is_abono: bool,
}

impl Contact {
    /// Case-insensitive band-name match, ignoring surrounding whitespace.
    pub fn matches_band(&self, band_name: &str) -> bool {
        self.band_name.trim().eq_ignore_ascii_case(band_name.trim())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
