//! Invoice records
//!
//! Invoices are the second revenue source feeding the client
//! classification. Only paid invoices count toward a client's revenue.

use serde::{Deserialize, Serialize};

use super::{ClientId, InvoiceId, Money};

/// Settlement status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Fully settled
    Paid,
    /// Issued, awaiting payment
    Unpaid,
    /// Past its due date
    Overdue,
}

/// An invoice issued to a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,

    /// Client the invoice was issued to
    pub client_id: ClientId,

    /// Non-negative invoice amount
    pub amount: Money,

    /// Settlement status
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Create a new invoice
    pub fn new(client_id: ClientId, amount: Money, status: InvoiceStatus) -> Self {
        Self {
            id: InvoiceId::new(),
            client_id,
            amount,
            status,
        }
    }

    /// Check if this invoice contributes to client revenue
    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }
}
