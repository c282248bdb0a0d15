//! # backline-core: Pure Business Logic for Backline
//!
//! This crate is the **heart** of the booking & settlement system. It
//! contains the venue's domain rules as pure types and functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Backline Architecture                          │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │          Surrounding application (forms, grids, charts)       │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                     backline-engine                           │ │
//! │  │   BookingScheduler · ConsumptionLedger · SettlementEngine     │ │
//! │  │   DebtLedger · CashRegister                                   │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │               ★ backline-core (THIS CRATE) ★                  │ │
//! │  │                                                               │ │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌────────────┐      │ │
//! │  │   │  types  │  │  money  │  │  slot   │  │ validation │      │ │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └────────────┘      │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO STORE • NO CLOCK READS • PURE FUNCTIONS         │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Room, Reservation, Consumption, …)
//! - [`money`] - Integer money (no floating point!)
//! - [`slot`] - Wall-clock times, slot overlap, recurring expansion
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod slot;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use slot::{weekly_dates_in_month, TimeSlot, WallTime};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a band or contact name.
///
/// Generous enough for any real act; mainly guards against a paste of an
/// entire message into the name field.
pub const MAX_NAME_LEN: usize = 100;
