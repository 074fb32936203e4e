//! Audit entry data structures
//!
//! Defines the structure of export audit entries: which backend ran, for
//! which period, and how it ended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Renderer backend recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportBackend {
    /// Paginated PDF export
    Pdf,
    /// Print-ready HTML export
    Print,
    /// Tabular CSV export
    Csv,
}

impl std::fmt::Display for ExportBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportBackend::Pdf => write!(f, "PDF"),
            ExportBackend::Print => write!(f, "PRINT"),
            ExportBackend::Csv => write!(f, "CSV"),
        }
    }
}

/// How an export action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportOutcome {
    /// Artifact produced and handed off
    Succeeded,
    /// Aborted with an error
    Failed,
}

/// A single export audit entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the export ran (UTC)
    pub timestamp: DateTime<Utc>,

    /// Which backend rendered
    pub backend: ExportBackend,

    /// Period label the export covered
    pub period_label: String,

    /// Written artifact path, when one was produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,

    /// Final outcome
    pub outcome: ExportOutcome,

    /// Error text for failed exports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEntry {
    /// Create an entry for a successful export
    pub fn succeeded(
        backend: ExportBackend,
        period_label: impl Into<String>,
        artifact: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            backend,
            period_label: period_label.into(),
            artifact: Some(artifact.into()),
            outcome: ExportOutcome::Succeeded,
            error: None,
        }
    }

    /// Create an entry for a failed export
    pub fn failed(
        backend: ExportBackend,
        period_label: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            backend,
            period_label: period_label.into(),
            artifact: None,
            outcome: ExportOutcome::Failed,
            error: Some(error.into()),
        }
    }
}
