//! Period filtering over transaction snapshots
//!
//! A transaction is "in period" iff its normalized date lies within the
//! inclusive `[start, end]` bounds. Records whose dates cannot be parsed
//! are excluded outright; they are never compared as if they predated the
//! window.

use crate::models::{PeriodBounds, Transaction};

/// Check whether a transaction falls inside the given bounds
pub fn in_period(txn: &Transaction, bounds: &PeriodBounds) -> bool {
    match txn.parsed_date() {
        Some(date) => bounds.contains(date),
        None => false,
    }
}

/// Filter transactions down to those inside the given bounds
pub fn filter_by_period<'a, I>(transactions: I, bounds: &PeriodBounds) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| in_period(t, bounds))
        .collect()
}
