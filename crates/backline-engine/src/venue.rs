//! # Venue
//!
//! The facade that owns the record store and hands out the services.
//!
//! Callers never touch the raw collections; every mutation goes through
//! one of the five services obtained here. The system this replaces
//! scattered the same mutations across UI event handlers, each mirroring
//! component state into storage by hand — here the services are the only
//! mutation surface.

use backline_store::RecordStore;

use crate::cash::CashRegister;
use crate::consumption::ConsumptionLedger;
use crate::debt::DebtLedger;
use crate::ids::{IdSource, UuidSource};
use crate::scheduler::BookingScheduler;
use crate::settlement::SettlementEngine;

/// The booking & settlement core, bound to a record store.
pub struct Venue<S> {
    store: S,
    ids: Box<dyn IdSource>,
}

impl<S: RecordStore> Venue<S> {
    /// Creates a venue over a store, minting UUID v4 ids.
    pub fn new(store: S) -> Self {
        Venue {
            store,
            ids: Box::new(UuidSource),
        }
    }

    /// Creates a venue with a caller-chosen id source (deterministic ids
    /// in tests).
    pub fn with_ids(store: S, ids: Box<dyn IdSource>) -> Self {
        Venue { store, ids }
    }

    /// Read access to the underlying store, for the external
    /// collaborators that own the catalog side (room management seeds the
    /// rooms collection directly).
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> BookingScheduler<'_, S> {
        BookingScheduler::new(&self.store, self.ids.as_ref())
    }

    pub fn consumption(&self) -> ConsumptionLedger<'_, S> {
        ConsumptionLedger::new(&self.store, self.ids.as_ref())
    }

    pub fn settlement(&self) -> SettlementEngine<'_, S> {
        SettlementEngine::new(&self.store, self.ids.as_ref())
    }

    pub fn debts(&self) -> DebtLedger<'_, S> {
        DebtLedger::new(&self.store, self.ids.as_ref())
    }

    pub fn cash(&self) -> CashRegister<'_, S> {
        CashRegister::new(&self.store, self.ids.as_ref())
    }
}
