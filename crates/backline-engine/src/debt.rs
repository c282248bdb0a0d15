//! # Debt Ledger
//!
//! Per-contact outstanding balances.
//!
//! Debt only ever grows through the settlement engine's debt branch; this
//! ledger clears it. There is no partial settlement of a standing debt —
//! a settle always zeroes the balance, either collecting it (income) or
//! writing it off (expense).

use chrono::Utc;
use tracing::info;

use backline_core::{
    validation::validate_positive_amount, Contact, Money, PaymentMethod, Transaction,
    TransactionKind,
};
use backline_store::{Collection, RecordStore};

use crate::error::{EngineError, EngineResult};
use crate::ids::IdSource;
use crate::{CATEGORY_ABONO_COLLECTION, CATEGORY_DEBT_COLLECTION, CATEGORY_DEBT_WRITEOFF};

/// What clearing a debt means for the books.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtSettleMode {
    /// The band paid up: record the amount as income.
    Pay,
    /// The debt is forgiven: record the amount as an expense (loss).
    Void,
}

/// Debt service over the contacts and transactions collections.
pub struct DebtLedger<'a, S> {
    store: &'a S,
    ids: &'a dyn IdSource,
}

impl<'a, S: RecordStore> DebtLedger<'a, S> {
    pub(crate) fn new(store: &'a S, ids: &'a dyn IdSource) -> Self {
        DebtLedger { store, ids }
    }

    /// Clears a contact's debt in full.
    ///
    /// `amount` is what the caller is collecting or writing off — the
    /// contact's outstanding balance as shown to the operator. The debt
    /// is zeroed regardless of mode; the mode only decides which side of
    /// the books the amount lands on.
    pub fn settle(
        &self,
        contact_id: &str,
        amount: Money,
        mode: DebtSettleMode,
    ) -> EngineResult<Transaction> {
        validate_positive_amount("settlement amount", amount)?;

        let mut contacts: Vec<Contact> = self.store.get_all(Collection::Contacts)?;
        let contact = contacts
            .iter_mut()
            .find(|c| c.id == contact_id)
            .ok_or_else(|| EngineError::not_found("contact", contact_id))?;

        let band_name = contact.band_name.clone();
        contact.debt = Money::zero();

        let transaction = match mode {
            DebtSettleMode::Pay => Transaction {
                id: self.ids.next_id(),
                kind: TransactionKind::Income,
                category: CATEGORY_DEBT_COLLECTION.to_string(),
                amount,
                timestamp: Utc::now(),
                description: format!("Debt collected in full: {band_name}"),
                paid: true,
                method: Some(PaymentMethod::Cash),
            },
            DebtSettleMode::Void => Transaction {
                id: self.ids.next_id(),
                kind: TransactionKind::Expense,
                category: CATEGORY_DEBT_WRITEOFF.to_string(),
                amount,
                timestamp: Utc::now(),
                description: format!("Debt written off: {band_name}"),
                paid: true,
                method: None,
            },
        };

        let mut transactions: Vec<Transaction> = self.store.get_all(Collection::Transactions)?;
        transactions.push(transaction.clone());
        self.store
            .replace_all(Collection::Transactions, &transactions)?;
        self.store.replace_all(Collection::Contacts, &contacts)?;

        info!(
            contact_id = %contact_id,
            band = %band_name,
            amount = %amount,
            ?mode,
            "Debt settled"
        );
        Ok(transaction)
    }

    /// Records a contact's subscription payment and marks the
    /// subscription active.
    pub fn collect_abono(
        &self,
        contact_id: &str,
        amount: Money,
        description: &str,
    ) -> EngineResult<Transaction> {
        validate_positive_amount("abono amount", amount)?;

        let mut contacts: Vec<Contact> = self.store.get_all(Collection::Contacts)?;
        let contact = contacts
            .iter_mut()
            .find(|c| c.id == contact_id)
            .ok_or_else(|| EngineError::not_found("contact", contact_id))?;
        contact.is_abono = true;
        let band_name = contact.band_name.clone();

        let transaction = Transaction {
            id: self.ids.next_id(),
            kind: TransactionKind::Income,
            category: CATEGORY_ABONO_COLLECTION.to_string(),
            amount,
            timestamp: Utc::now(),
            description: description.to_string(),
            paid: true,
            method: Some(PaymentMethod::Cash),
        };

        let mut transactions: Vec<Transaction> = self.store.get_all(Collection::Transactions)?;
        transactions.push(transaction.clone());
        self.store
            .replace_all(Collection::Transactions, &transactions)?;
        self.store.replace_all(Collection::Contacts, &contacts)?;

        info!(contact_id = %contact_id, band = %band_name, amount = %amount, "Abono collected");
        Ok(transaction)
    }
}
