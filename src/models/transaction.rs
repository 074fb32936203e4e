//! Cash transaction records
//!
//! Transactions come from the back-office document store as immutable
//! snapshots. Dates are kept as the raw strings the store holds; every
//! date-keyed computation goes through [`Transaction::parsed_date`] so a
//! malformed date is excluded instead of silently misfiled.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ClientId, Money, TransactionId};

/// Whether a transaction books money in or out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received
    Revenue,
    /// Money spent
    Expense,
}

/// A single cash movement (revenue or expense)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Booking date as stored (`YYYY-MM-DD`); may be malformed in legacy data
    pub date: String,

    /// Non-negative amount
    pub amount: Money,

    /// Client this movement belongs to, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Revenue or expense tag
    pub kind: TransactionKind,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(kind: TransactionKind, date: impl Into<String>, amount: Money) -> Self {
        Self {
            id: TransactionId::new(),
            date: date.into(),
            amount,
            client_id: None,
            description: String::new(),
            kind,
        }
    }

    /// Attach a client
    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check if this is a revenue record
    pub fn is_revenue(&self) -> bool {
        self.kind == TransactionKind::Revenue
    }

    /// Check if this is an expense record
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Normalize the stored date to a calendar date
    ///
    /// Accepts `YYYY-MM-DD`, optionally followed by a time component
    /// (`2025-06-15T09:30:00`), as some legacy records carry full
    /// timestamps. Returns `None` for anything unparseable.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        let date_part = raw
            .split(|c| c == 'T' || c == ' ')
            .next()
            .unwrap_or_default();
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}
