//! Report document model and renderer backends
//!
//! One [`ReportDocument`] is built from the period-filtered snapshot and
//! consumed by interchangeable renderer backends: a paginated PDF and a
//! print-ready flat HTML document. Layout logic is backend-specific; the
//! data contract is shared.

pub mod branding;
pub mod pdf;
pub mod print;

pub use branding::{AssetSource, BrandingAssets, BrandingRole, FileAssetSource};
pub use pdf::PdfRenderer;
pub use print::PrintRenderer;

use crate::analytics::filter_by_period;
use crate::error::CaixaResult;
use crate::models::{Money, ReportPeriod, Transaction};
use crate::store::Snapshot;

/// Report title shared by both backends
pub const REPORT_TITLE: &str = "Lançamentos de Caixa";

/// One printable line of a report section
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Booking date as stored
    pub date: String,
    /// Free-text description
    pub description: String,
    /// Booked amount
    pub amount: Money,
}

/// A titled block of line items with its total
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    /// Section title (e.g. "Receitas")
    pub title: String,
    /// Line items in date order
    pub items: Vec<LineItem>,
    /// Sum of the item amounts
    pub total: Money,
}

impl ReportSection {
    /// Build a section from transactions, sorted by date
    pub fn from_transactions(title: impl Into<String>, transactions: &[&Transaction]) -> Self {
        let mut items: Vec<LineItem> = transactions
            .iter()
            .map(|txn| LineItem {
                date: txn.date.clone(),
                description: txn.description.clone(),
                amount: txn.amount,
            })
            .collect();
        items.sort_by(|a, b| a.date.cmp(&b.date));

        let total = items.iter().map(|i| i.amount).sum();

        Self {
            title: title.into(),
            items,
            total,
        }
    }
}

/// The complete document handed to a renderer backend
///
/// Created transiently per export action and discarded after generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    /// Document title
    pub title: String,
    /// Period label used in the heading and the artifact filename
    pub period_label: String,
    /// Ordered sections
    pub sections: Vec<ReportSection>,
}

impl ReportDocument {
    /// Check if no section has any line items
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.items.is_empty())
    }
}

/// Build the cash report for a period from a snapshot
///
/// Filters both transaction kinds to the period bounds and produces the
/// standard two sections, revenues then expenses.
pub fn build_cash_report(snapshot: &Snapshot, period: &ReportPeriod) -> ReportDocument {
    let bounds = period.bounds();

    let revenues = filter_by_period(snapshot.revenues(), &bounds);
    let expenses = filter_by_period(snapshot.expenses(), &bounds);

    ReportDocument {
        title: REPORT_TITLE.to_string(),
        period_label: period.label(),
        sections: vec![
            ReportSection::from_transactions("Receitas", &revenues),
            ReportSection::from_transactions("Despesas", &expenses),
        ],
    }
}

/// A rendered export artifact, ready to be written or opened
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    /// Deterministic file name including extension
    pub file_name: String,
    /// Rendered bytes
    pub bytes: Vec<u8>,
    /// Page count (1 for the flat HTML backend)
    pub pages: usize,
}

/// A renderer backend turning a document plus branding into an artifact
pub trait ReportRenderer {
    /// Render the document
    fn render(
        &self,
        document: &ReportDocument,
        branding: &BrandingAssets,
    ) -> CaixaResult<ReportArtifact>;
}

/// Deterministic artifact stem: period label with separator dashes stripped
pub fn artifact_stem(period_label: &str) -> String {
    format!("lancamentos_caixa_{}", period_label.replace('-', ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;

    fn txn(kind: TransactionKind, date: &str, cents: i64, description: &str) -> Transaction {
        Transaction::new(kind, date, Money::from_cents(cents)).with_description(description)
    }

    #[test]
    fn test_artifact_stem_strips_dashes() {
        assert_eq!(artifact_stem("2025"), "lancamentos_caixa_2025");
        assert_eq!(artifact_stem("2025-06"), "lancamentos_caixa_202506");
        assert_eq!(artifact_stem("2025-06-15"), "lancamentos_caixa_20250615");
    }

    #[test]
    fn test_build_cash_report_filters_and_totals() {
        let snapshot = Snapshot::new(
            vec![
                txn(TransactionKind::Revenue, "2025-06-15", 10_000, "Licença de operação"),
                txn(TransactionKind::Revenue, "2024-12-31", 99_000, "fora do período"),
                txn(TransactionKind::Expense, "2025-03-02", 4_000, "Coleta de amostras"),
                txn(TransactionKind::Expense, "data inválida", 4_000, "ignorada"),
            ],
            Vec::new(),
            Vec::new(),
        );

        let period = ReportPeriod::parse("2025").unwrap();
        let document = build_cash_report(&snapshot, &period);

        assert_eq!(document.title, REPORT_TITLE);
        assert_eq!(document.period_label, "2025");
        assert_eq!(document.sections.len(), 2);

        let revenues = &document.sections[0];
        assert_eq!(revenues.title, "Receitas");
        assert_eq!(revenues.items.len(), 1);
        assert_eq!(revenues.total, Money::from_cents(10_000));

        let expenses = &document.sections[1];
        assert_eq!(expenses.title, "Despesas");
        assert_eq!(expenses.items.len(), 1);
        assert_eq!(expenses.total, Money::from_cents(4_000));
    }

    #[test]
    fn test_section_items_sorted_by_date() {
        let a = txn(TransactionKind::Revenue, "2025-06-20", 100, "b");
        let b = txn(TransactionKind::Revenue, "2025-06-01", 200, "a");
        let section = ReportSection::from_transactions("Receitas", &[&a, &b]);

        assert_eq!(section.items[0].date, "2025-06-01");
        assert_eq!(section.items[1].date, "2025-06-20");
    }

    #[test]
    fn test_empty_document() {
        let document = build_cash_report(&Snapshot::empty(), &ReportPeriod::year(2025));
        assert!(document.is_empty());
        assert_eq!(document.sections[0].total, Money::zero());
    }
}
