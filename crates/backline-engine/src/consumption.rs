//! # Consumption Ledger
//!
//! The per-reservation running tab of consumed items.
//!
//! The ledger has no inventory knowledge of its own: the caller supplies
//! a [`StockGuard`] that can veto an add (zero stock) before anything is
//! mutated, and supplies the product's name and unit price already
//! resolved from the catalog. Both are snapshotted into the line and
//! never re-read.

use tracing::info;

use backline_core::{validation::validate_non_negative_amount, Consumption, Money, Reservation};
use backline_store::{Collection, RecordStore};

use crate::error::{EngineError, EngineResult};
use crate::ids::IdSource;

// =============================================================================
// Stock Guard
// =============================================================================

/// The inventory collaborator's veto hook, consulted before a tab
/// mutation.
pub trait StockGuard {
    fn has_stock(&self, product_id: &str) -> bool;
}

/// Any closure `Fn(&str) -> bool` is a stock guard.
impl<F> StockGuard for F
where
    F: Fn(&str) -> bool,
{
    fn has_stock(&self, product_id: &str) -> bool {
        self(product_id)
    }
}

/// Guard for items with no tracked inventory (manual bar entries,
/// instrument rentals).
#[derive(Debug, Clone, Copy, Default)]
pub struct Unguarded;

impl StockGuard for Unguarded {
    fn has_stock(&self, _product_id: &str) -> bool {
        true
    }
}

// =============================================================================
// Consumption Ledger
// =============================================================================

/// Tab service over the consumptions collection.
pub struct ConsumptionLedger<'a, S> {
    store: &'a S,
    ids: &'a dyn IdSource,
}

impl<'a, S: RecordStore> ConsumptionLedger<'a, S> {
    pub(crate) fn new(store: &'a S, ids: &'a dyn IdSource) -> Self {
        ConsumptionLedger { store, ids }
    }

    /// Adds one unit of a product to a reservation's tab.
    ///
    /// Creates the tab lazily on the first item. A line already holding
    /// the same product at the same recorded unit price is incremented;
    /// otherwise a new line opens (same product at a changed price stays
    /// a separate line).
    pub fn add_item(
        &self,
        reservation_id: &str,
        product_id: &str,
        name: &str,
        unit_price: Money,
        guard: &impl StockGuard,
    ) -> EngineResult<Consumption> {
        if !guard.has_stock(product_id) {
            return Err(EngineError::OutOfStock {
                product_id: product_id.to_string(),
            });
        }
        validate_non_negative_amount("unit price", unit_price)?;
        self.require_reservation(reservation_id)?;

        let mut tabs: Vec<Consumption> = self.store.get_all(Collection::Consumptions)?;
        let idx = match tabs.iter().position(|c| c.reservation_id == reservation_id) {
            Some(idx) => idx,
            None => {
                tabs.push(Consumption::new(self.ids.next_id(), reservation_id));
                tabs.len() - 1
            }
        };
        tabs[idx].add_line(product_id, name, unit_price);
        let updated = tabs[idx].clone();
        self.store.replace_all(Collection::Consumptions, &tabs)?;

        info!(
            reservation_id = %reservation_id,
            product_id = %product_id,
            total = %updated.total,
            "Item added to tab"
        );
        Ok(updated)
    }

    /// Adds `delta` to the matching line's quantity; a quantity at or
    /// below zero removes the line. The total is recomputed either way.
    pub fn adjust_quantity(
        &self,
        reservation_id: &str,
        product_id: &str,
        delta: i64,
    ) -> EngineResult<Consumption> {
        self.mutate_tab(reservation_id, |tab| {
            tab.adjust_quantity(product_id, delta).map_err(Into::into)
        })
    }

    /// Removes the matching line outright.
    pub fn remove_item(&self, reservation_id: &str, product_id: &str) -> EngineResult<Consumption> {
        self.mutate_tab(reservation_id, |tab| {
            tab.remove_line(product_id).map_err(Into::into)
        })
    }

    /// The current tab for a reservation, if one exists yet.
    pub fn for_reservation(&self, reservation_id: &str) -> EngineResult<Option<Consumption>> {
        let tabs: Vec<Consumption> = self.store.get_all(Collection::Consumptions)?;
        Ok(tabs.into_iter().find(|c| c.reservation_id == reservation_id))
    }

    fn mutate_tab(
        &self,
        reservation_id: &str,
        mutate: impl FnOnce(&mut Consumption) -> EngineResult<()>,
    ) -> EngineResult<Consumption> {
        let mut tabs: Vec<Consumption> = self.store.get_all(Collection::Consumptions)?;
        let tab = tabs
            .iter_mut()
            .find(|c| c.reservation_id == reservation_id)
            .ok_or_else(|| EngineError::not_found("consumption", reservation_id))?;

        mutate(tab)?;
        let updated = tab.clone();
        self.store.replace_all(Collection::Consumptions, &tabs)?;

        info!(
            reservation_id = %reservation_id,
            total = %updated.total,
            "Tab updated"
        );
        Ok(updated)
    }

    fn require_reservation(&self, reservation_id: &str) -> EngineResult<()> {
        let reservations: Vec<Reservation> = self.store.get_all(Collection::Reservations)?;
        if reservations.iter().any(|r| r.id == reservation_id) {
            Ok(())
        } else {
            Err(EngineError::not_found("reservation", reservation_id))
        }
    }
}
