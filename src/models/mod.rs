//! Core data models for caixa-cli
//!
//! All analytics and rendering code operates on these types. Records are
//! immutable snapshots of the back-office document store.

pub mod client;
pub mod ids;
pub mod invoice;
pub mod money;
pub mod period;
pub mod transaction;

pub use client::Client;
pub use ids::{ClientId, InvoiceId, TransactionId};
pub use invoice::{Invoice, InvoiceStatus};
pub use money::Money;
pub use period::{PeriodBounds, PeriodParseError, ReportPeriod};
pub use transaction::{Transaction, TransactionKind};
