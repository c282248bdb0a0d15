//! # Settlement Engine
//!
//! Closes a reservation's financial obligation.
//!
//! ## The Close State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        close(reservation)                           │
//! │                                                                     │
//! │  Confirmed ──┬── Cash ──────────► Income tx (due, cash)             │
//! │              ├── Electronic ────► Income tx (due, transfer)         │
//! │              └── Debt ──────────► Income tx (partial, cash)  [opt]  │
//! │                                   contact.debt += due − partial     │
//! │                                                                     │
//! │  Every branch then:                                                 │
//! │    reservation.status = Completed   (terminal)                      │
//! │    consumption.paid   = true, with the chosen method                │
//! │                                                                     │
//! │  due = room charge (0 for abono bookings) + consumption total      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All reads and every validation happen before the first write; a store
//! failure mid-sequence is surfaced for the operator to retry the whole
//! close.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use backline_core::{
    validation::validate_partial_payment, Consumption, Contact, Money, PaymentMethod, Reservation,
    ReservationStatus, Transaction, TransactionKind,
};
use backline_store::{Collection, RecordStore};

use crate::error::{EngineError, EngineResult};
use crate::ids::IdSource;
use crate::CATEGORY_ROOM_SETTLEMENT;

/// How the tab is being settled.
///
/// A debt settlement may carry a partial up-front collection; the
/// remainder lands on the band's contact as debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementMethod {
    Cash,
    Electronic,
    Debt { partial: Option<Money> },
}

impl SettlementMethod {
    /// The method recorded on the transaction and the settled tab.
    fn payment_method(&self) -> PaymentMethod {
        match self {
            SettlementMethod::Cash => PaymentMethod::Cash,
            SettlementMethod::Electronic => PaymentMethod::ElectronicTransfer,
            SettlementMethod::Debt { .. } => PaymentMethod::Debt,
        }
    }
}

/// Method recorded on the partial-collection leg of a debt settlement.
///
/// Kept hardcoded to cash, matching how partial collections are actually
/// taken at the counter. Making this a caller parameter would change
/// observable bookkeeping and is deliberately not done here.
const PARTIAL_LEG_METHOD: PaymentMethod = PaymentMethod::Cash;

/// The amounts a close applied, for the receipt.
#[derive(Debug, Clone, Serialize)]
pub struct SettlementResult {
    pub reservation_id: String,
    pub band_name: String,
    /// Room charge after the abono waiver.
    pub room_charge: Money,
    pub consumption_total: Money,
    pub due: Money,
    /// What actually entered the register (or the transfer account).
    pub income_recorded: Money,
    /// What landed on the contact's debt.
    pub debt_recorded: Money,
    pub method: PaymentMethod,
}

/// Settlement service over reservations, consumptions, transactions, and
/// contacts.
pub struct SettlementEngine<'a, S> {
    store: &'a S,
    ids: &'a dyn IdSource,
}

impl<'a, S: RecordStore> SettlementEngine<'a, S> {
    pub(crate) fn new(store: &'a S, ids: &'a dyn IdSource) -> Self {
        SettlementEngine { store, ids }
    }

    /// Settles a confirmed reservation and marks it Completed.
    pub fn close(
        &self,
        reservation_id: &str,
        method: SettlementMethod,
    ) -> EngineResult<SettlementResult> {
        // ---- Read & validate everything up front ----

        let mut reservations: Vec<Reservation> = self.store.get_all(Collection::Reservations)?;
        let res_idx = reservations
            .iter()
            .position(|r| r.id == reservation_id)
            .ok_or_else(|| EngineError::not_found("reservation", reservation_id))?;
        if reservations[res_idx].status != ReservationStatus::Confirmed {
            return Err(EngineError::InvalidStatus {
                id: reservation_id.to_string(),
                status: reservations[res_idx].status,
            });
        }
        let band_name = reservations[res_idx].band_name.clone();
        let is_abono = reservations[res_idx].is_abono;
        let room_charge = reservations[res_idx].room_charge();

        let mut tabs: Vec<Consumption> = self.store.get_all(Collection::Consumptions)?;
        let tab_idx = tabs.iter().position(|c| c.reservation_id == reservation_id);
        let consumption_total = match tab_idx {
            Some(idx) => {
                // Stored totals are never trusted.
                tabs[idx].recompute_total();
                tabs[idx].total
            }
            None => Money::zero(),
        };

        let due = room_charge + consumption_total;

        let (income_amount, debt_amount) = match method {
            SettlementMethod::Cash | SettlementMethod::Electronic => (due, Money::zero()),
            SettlementMethod::Debt { partial } => {
                let partial = partial.unwrap_or_else(Money::zero);
                validate_partial_payment(partial, due)?;
                (partial, due.saturating_sub_to_zero(partial))
            }
        };

        let mut contacts: Vec<Contact> = self.store.get_all(Collection::Contacts)?;
        let contact_idx = contacts.iter().position(|c| c.matches_band(&band_name));

        // ---- Apply the side effects ----

        let mut transactions: Vec<Transaction> = self.store.get_all(Collection::Transactions)?;
        match method {
            SettlementMethod::Cash | SettlementMethod::Electronic => {
                transactions.push(Transaction {
                    id: self.ids.next_id(),
                    kind: TransactionKind::Income,
                    category: CATEGORY_ROOM_SETTLEMENT.to_string(),
                    amount: due,
                    timestamp: Utc::now(),
                    description: if is_abono {
                        format!("Settled {band_name} (abono)")
                    } else {
                        format!("Settled {band_name}")
                    },
                    paid: true,
                    method: Some(method.payment_method()),
                });
                self.store
                    .replace_all(Collection::Transactions, &transactions)?;
            }
            SettlementMethod::Debt { .. } => {
                if income_amount.is_positive() {
                    transactions.push(Transaction {
                        id: self.ids.next_id(),
                        kind: TransactionKind::Income,
                        category: CATEGORY_ROOM_SETTLEMENT.to_string(),
                        amount: income_amount,
                        timestamp: Utc::now(),
                        description: format!("Partial collection {band_name}"),
                        paid: true,
                        method: Some(PARTIAL_LEG_METHOD),
                    });
                    self.store
                        .replace_all(Collection::Transactions, &transactions)?;
                }

                if debt_amount.is_positive() {
                    match contact_idx {
                        Some(idx) => {
                            contacts[idx].debt += debt_amount;
                            self.store.replace_all(Collection::Contacts, &contacts)?;
                        }
                        // The remainder has nowhere to go without a
                        // contact on file; callers are expected to
                        // prevent this.
                        None => warn!(
                            band = %band_name,
                            amount = %debt_amount,
                            "No contact for band; debt not recorded"
                        ),
                    }
                }
            }
        }

        if let Some(idx) = tab_idx {
            tabs[idx].paid = true;
            tabs[idx].method = Some(method.payment_method());
            self.store.replace_all(Collection::Consumptions, &tabs)?;
        }

        reservations[res_idx].status = ReservationStatus::Completed;
        self.store
            .replace_all(Collection::Reservations, &reservations)?;

        info!(
            reservation_id = %reservation_id,
            band = %band_name,
            due = %due,
            income = %income_amount,
            debt = %debt_amount,
            method = ?method.payment_method(),
            "Reservation settled"
        );

        Ok(SettlementResult {
            reservation_id: reservation_id.to_string(),
            band_name,
            room_charge,
            consumption_total,
            due,
            income_recorded: income_amount,
            debt_recorded: debt_amount,
            method: method.payment_method(),
        })
    }
}
