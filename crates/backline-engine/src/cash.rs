//! # Cash Register
//!
//! Cash-on-hand derived from the transaction log.
//!
//! The balance is never stored: it is always recomputed as
//!
//! ```text
//! balance = initial float
//!         + Σ income transactions whose method is not Debt
//!         − Σ expense transactions
//! ```
//!
//! Debt-method entries are excluded by definition — the money never
//! physically moved.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use backline_core::{
    validation::{validate_non_negative_amount, validate_positive_amount},
    Money, PaymentMethod, Transaction, TransactionKind,
};
use backline_store::{Collection, RecordStore};

use crate::error::EngineResult;
use crate::ids::IdSource;
use crate::{CATEGORY_BAR_SALE, CATEGORY_CASH_WITHDRAWAL};

/// One day's collected income, split by channel, for the end-of-day
/// register check. Debt-method and unpaid entries are excluded.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DayTotals {
    pub cash: Money,
    pub electronic: Money,
}

impl DayTotals {
    pub fn total(&self) -> Money {
        self.cash + self.electronic
    }
}

/// Register service over the transactions collection and the float.
pub struct CashRegister<'a, S> {
    store: &'a S,
    ids: &'a dyn IdSource,
}

impl<'a, S: RecordStore> CashRegister<'a, S> {
    pub(crate) fn new(store: &'a S, ids: &'a dyn IdSource) -> Self {
        CashRegister { store, ids }
    }

    /// Current cash-on-hand.
    pub fn balance(&self) -> EngineResult<Money> {
        let float = self.store.initial_float()?;
        let transactions: Vec<Transaction> = self.store.get_all(Collection::Transactions)?;

        let income: Money = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Income && !t.is_debt_backed())
            .map(|t| t.amount)
            .sum();
        let expense: Money = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.amount)
            .sum();

        Ok(float + income - expense)
    }

    /// Takes cash out of the register as a recorded expense.
    pub fn withdraw(&self, amount: Money) -> EngineResult<Transaction> {
        validate_positive_amount("withdrawal", amount)?;

        let transaction = Transaction {
            id: self.ids.next_id(),
            kind: TransactionKind::Expense,
            category: CATEGORY_CASH_WITHDRAWAL.to_string(),
            amount,
            timestamp: Utc::now(),
            description: "Manual cash withdrawal".to_string(),
            paid: true,
            method: Some(PaymentMethod::Cash),
        };

        let mut transactions: Vec<Transaction> = self.store.get_all(Collection::Transactions)?;
        transactions.push(transaction.clone());
        self.store
            .replace_all(Collection::Transactions, &transactions)?;

        info!(amount = %amount, "Cash withdrawn");
        Ok(transaction)
    }

    /// The register's manually set baseline.
    pub fn initial_float(&self) -> EngineResult<Money> {
        Ok(self.store.initial_float()?)
    }

    /// Overwrites the baseline. No history is kept of previous floats.
    pub fn set_initial_float(&self, amount: Money) -> EngineResult<()> {
        validate_non_negative_amount("initial float", amount)?;
        self.store.set_initial_float(amount)?;
        info!(amount = %amount, "Initial float set");
        Ok(())
    }

    /// Records a walk-up bar sale not tied to any reservation.
    ///
    /// A Debt-method sale is recorded unpaid and never counts toward the
    /// register.
    pub fn record_bar_sale(
        &self,
        amount: Money,
        method: PaymentMethod,
        note: Option<&str>,
    ) -> EngineResult<Transaction> {
        validate_positive_amount("sale amount", amount)?;

        let transaction = Transaction {
            id: self.ids.next_id(),
            kind: TransactionKind::Income,
            category: CATEGORY_BAR_SALE.to_string(),
            amount,
            timestamp: Utc::now(),
            description: match note {
                Some(note) => format!("Walk-up bar sale: {note}"),
                None => "Walk-up bar sale".to_string(),
            },
            paid: method != PaymentMethod::Debt,
            method: Some(method),
        };

        let mut transactions: Vec<Transaction> = self.store.get_all(Collection::Transactions)?;
        transactions.push(transaction.clone());
        self.store
            .replace_all(Collection::Transactions, &transactions)?;

        info!(amount = %amount, ?method, "Bar sale recorded");
        Ok(transaction)
    }

    /// Collected income for one calendar day, split by channel.
    pub fn day_totals(&self, date: NaiveDate) -> EngineResult<DayTotals> {
        let transactions: Vec<Transaction> = self.store.get_all(Collection::Transactions)?;

        let mut totals = DayTotals::default();
        for t in transactions.iter().filter(|t| {
            t.paid
                && !t.is_debt_backed()
                && t.kind == TransactionKind::Income
                && t.timestamp.date_naive() == date
        }) {
            match t.method {
                Some(PaymentMethod::Cash) => totals.cash += t.amount,
                Some(PaymentMethod::ElectronicTransfer) => totals.electronic += t.amount,
                _ => {}
            }
        }
        Ok(totals)
    }
}
