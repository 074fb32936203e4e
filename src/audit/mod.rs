//! Append-only audit trail of export actions

pub mod entry;
pub mod logger;

pub use entry::{AuditEntry, ExportBackend, ExportOutcome};
pub use logger::AuditLogger;
