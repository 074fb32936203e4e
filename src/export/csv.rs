//! CSV export functionality
//!
//! Tabular exports of the classification table and of report line items,
//! spreadsheet-friendly with a header row.

use std::io::Write;

use crate::analytics::ClassificationRow;
use crate::error::{CaixaError, CaixaResult};
use crate::report::ReportDocument;

/// Export the ABC classification table to CSV
pub fn export_classification_csv<W: Write>(
    rows: &[ClassificationRow],
    writer: W,
) -> CaixaResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "Client ID",
            "Client",
            "Total Revenue",
            "Share %",
            "Cumulative %",
            "Class",
        ])
        .map_err(csv_err)?;

    for row in rows {
        csv_writer
            .write_record([
                row.client_id.as_uuid().to_string(),
                row.client_name.clone(),
                format!("{:.2}", row.total_revenue.cents() as f64 / 100.0),
                format!("{:.2}", row.revenue_share),
                format!("{:.2}", row.cumulative_share),
                row.class.to_string(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| CaixaError::Export(e.to_string()))
}

/// Export a report document's line items to CSV, one row per item
pub fn export_line_items_csv<W: Write>(document: &ReportDocument, writer: W) -> CaixaResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["Section", "Date", "Description", "Amount"])
        .map_err(csv_err)?;

    for section in &document.sections {
        for item in &section.items {
            csv_writer
                .write_record([
                    section.title.clone(),
                    item.date.clone(),
                    item.description.clone(),
                    format!("{:.2}", item.amount.cents() as f64 / 100.0),
                ])
                .map_err(csv_err)?;
        }

        csv_writer
            .write_record([
                section.title.clone(),
                String::new(),
                "TOTAL".to_string(),
                format!("{:.2}", section.total.cents() as f64 / 100.0),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| CaixaError::Export(e.to_string()))
}

fn csv_err(e: csv::Error) -> CaixaError {
    CaixaError::Export(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::classify_clients;
    use crate::models::{Client, Money, ReportPeriod, Transaction, TransactionKind};
    use crate::report::build_cash_report;
    use crate::store::Snapshot;

    fn classified_snapshot() -> Snapshot {
        let alpha = Client::new("Alpha Ambiental");
        let beta = Client::new("Beta Engenharia");
        let transactions = vec![
            Transaction::new(TransactionKind::Revenue, "2025-02-01", Money::from_cents(80_000))
                .with_client(alpha.id),
            Transaction::new(TransactionKind::Revenue, "2025-02-02", Money::from_cents(20_000))
                .with_client(beta.id),
        ];
        Snapshot::new(transactions, Vec::new(), vec![alpha, beta])
    }

    #[test]
    fn test_classification_csv_has_one_row_per_client() {
        let snapshot = classified_snapshot();
        let rows = classify_clients(&snapshot);

        let mut buffer = Vec::new();
        export_classification_csv(&rows, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3); // header + 2 clients
        assert!(lines[0].starts_with("Client ID,Client,Total Revenue"));
        assert!(lines[1].contains("Alpha Ambiental"));
        assert!(lines[1].contains("800.00"));
        assert!(lines[1].ends_with(",A"));
    }

    #[test]
    fn test_line_items_csv_includes_totals() {
        let snapshot = Snapshot::new(
            vec![
                Transaction::new(TransactionKind::Revenue, "2025-06-15", Money::from_cents(10_000))
                    .with_description("Licença, fase 1"),
            ],
            Vec::new(),
            Vec::new(),
        );
        let document = build_cash_report(&snapshot, &ReportPeriod::parse("2025").unwrap());

        let mut buffer = Vec::new();
        export_line_items_csv(&document, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"Licença, fase 1\""));
        assert!(text.contains("TOTAL,100.00"));
        // Both sections emit a total row even when empty
        assert_eq!(text.matches("TOTAL").count(), 2);
    }
}
