//! Display formatting for terminal output
//!
//! Formats the analytics views for the terminal: the cash dashboard, the
//! monthly series, and the ABC classification table.

pub mod notification;

pub use notification::{Notification, NotificationKind};

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::analytics::{CashFlowSummary, ClassificationRow};

/// Shown when a filtered view has nothing to display
pub const EMPTY_STATE: &str = "No transactions in the selected period.";

/// Format the dashboard summary for terminal display
pub fn format_dashboard(summary: &CashFlowSummary, period_label: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Cash Dashboard: {}\n", period_label));
    output.push_str(&"=".repeat(60));
    output.push('\n');

    if summary.is_empty() {
        output.push_str(EMPTY_STATE);
        output.push('\n');
        return output;
    }

    output.push_str(&format!("Revenue:  {:>16}\n", summary.totals.revenue.to_string()));
    output.push_str(&format!("Expenses: {:>16}\n", summary.totals.expenses.to_string()));
    output.push_str(&format!("Profit:   {:>16}\n\n", summary.totals.profit.to_string()));

    output.push_str(&format!("{:<6} {:>16} {:>16}\n", "Month", "Revenue", "Expenses"));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for bucket in &summary.monthly {
        output.push_str(&format!(
            "{:<6} {:>16} {:>16}\n",
            bucket.label,
            bucket.revenue.to_string(),
            bucket.expenses.to_string()
        ));
    }

    if summary.skipped_dates > 0 {
        output.push_str(&format!(
            "\nNote: {} record(s) with unparseable dates were excluded.\n",
            summary.skipped_dates
        ));
    }

    output
}

#[derive(Tabled)]
struct AbcTableRow {
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Share %")]
    share: String,
    #[tabled(rename = "Cumulative %")]
    cumulative: String,
    #[tabled(rename = "Class")]
    class: String,
}

/// Format the ABC classification for terminal display
pub fn format_classification(rows: &[ClassificationRow]) -> String {
    if rows.is_empty() {
        return format!("{}\n", EMPTY_STATE);
    }

    let table_rows: Vec<AbcTableRow> = rows
        .iter()
        .map(|row| AbcTableRow {
            client: row.client_name.clone(),
            revenue: row.total_revenue.to_string(),
            share: format!("{:.2}", row.revenue_share),
            cumulative: format!("{:.2}", row.cumulative_share),
            class: row.class.to_string(),
        })
        .collect();

    let mut table = Table::new(table_rows);
    table.with(Style::sharp());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{classify_clients, summarize};
    use crate::models::{Client, Money, Transaction, TransactionKind};
    use crate::store::Snapshot;
    use chrono::NaiveDate;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_dashboard_empty_state() {
        let summary = summarize([], reference());
        let text = format_dashboard(&summary, "2025");
        assert!(text.contains(EMPTY_STATE));
    }

    #[test]
    fn test_dashboard_lists_truncated_months() {
        let transactions = vec![
            Transaction::new(TransactionKind::Revenue, "2025-01-05", Money::from_cents(150_000)),
            Transaction::new(TransactionKind::Expense, "2025-02-10", Money::from_cents(30_000)),
        ];
        let summary = summarize(&transactions, reference());
        let text = format_dashboard(&summary, "2025");

        assert!(text.contains("Jan"));
        assert!(text.contains("Mar"));
        assert!(!text.contains("Abr"));
        assert!(text.contains("R$ 1.500,00"));
    }

    #[test]
    fn test_dashboard_notes_skipped_dates() {
        let transactions = vec![
            Transaction::new(TransactionKind::Revenue, "2025-01-05", Money::from_cents(100)),
            Transaction::new(TransactionKind::Revenue, "ontem", Money::from_cents(100)),
        ];
        let summary = summarize(&transactions, reference());
        let text = format_dashboard(&summary, "2025");
        assert!(text.contains("1 record(s) with unparseable dates"));
    }

    #[test]
    fn test_classification_table() {
        let client = Client::new("Alpha Ambiental");
        let snapshot = Snapshot::new(
            vec![
                Transaction::new(TransactionKind::Revenue, "2025-01-05", Money::from_cents(100_000))
                    .with_client(client.id),
            ],
            Vec::new(),
            vec![client],
        );

        let rows = classify_clients(&snapshot);
        let text = format_classification(&rows);

        assert!(text.contains("Alpha Ambiental"));
        assert!(text.contains("100.00"));
        assert!(text.contains("Class"));
    }

    #[test]
    fn test_classification_empty_state() {
        let text = format_classification(&[]);
        assert!(text.contains(EMPTY_STATE));
    }
}
