//! Dashboard aggregation
//!
//! Folds tagged revenue/expense records into overall totals and a
//! fixed-calendar monthly series for charting. Callers apply period
//! filtering first; this layer only buckets and sums.

use chrono::{Datelike, NaiveDate};

use crate::models::{Money, Transaction, TransactionKind};

/// Three-letter pt-BR month labels, fixed 12-entry calendar
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Overall dashboard totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardTotals {
    /// Sum of all revenue amounts
    pub revenue: Money,
    /// Sum of all expense amounts
    pub expenses: Money,
    /// Revenue minus expenses
    pub profit: Money,
}

/// One calendar month of the chart series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyBucket {
    /// Month number, 1-12
    pub month: u32,
    /// Fixed label for the month
    pub label: &'static str,
    /// Revenue booked in this month
    pub revenue: Money,
    /// Expenses booked in this month
    pub expenses: Money,
}

/// Aggregated dashboard view over one set of transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashFlowSummary {
    /// Overall totals
    pub totals: DashboardTotals,
    /// Monthly series, truncated to `Jan..=reference` month
    pub monthly: Vec<MonthlyBucket>,
    /// Records excluded from the whole summary because their dates
    /// could not be parsed
    pub skipped_dates: usize,
}

impl CashFlowSummary {
    /// Check if the summary carries no booked amounts at all
    pub fn is_empty(&self) -> bool {
        self.totals.revenue.is_zero() && self.totals.expenses.is_zero()
    }
}

/// Aggregate transactions into totals and a truncated monthly series
///
/// Buckets are keyed by month over a fixed 12-entry calendar and the
/// series is cut at the reference date's month, so future months never
/// show. Transactions with unparseable dates are excluded from both the
/// totals and the buckets (the two views always reconcile) and counted
/// in `skipped_dates`. Empty input yields all-zero output; this function
/// never fails.
pub fn summarize<'a, I>(transactions: I, reference: NaiveDate) -> CashFlowSummary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut revenue = Money::zero();
    let mut expenses = Money::zero();
    let mut skipped = 0usize;

    let months_shown = reference.month() as usize;
    let mut monthly: Vec<MonthlyBucket> = (0..12)
        .map(|i| MonthlyBucket {
            month: i as u32 + 1,
            label: MONTH_LABELS[i],
            revenue: Money::zero(),
            expenses: Money::zero(),
        })
        .collect();

    for txn in transactions {
        let Some(date) = txn.parsed_date() else {
            skipped += 1;
            continue;
        };

        let bucket = &mut monthly[date.month0() as usize];
        match txn.kind {
            TransactionKind::Revenue => {
                revenue += txn.amount;
                bucket.revenue += txn.amount;
            }
            TransactionKind::Expense => {
                expenses += txn.amount;
                bucket.expenses += txn.amount;
            }
        }
    }

    monthly.truncate(months_shown);

    CashFlowSummary {
        totals: DashboardTotals {
            revenue,
            expenses,
            profit: revenue - expenses,
        },
        monthly,
        skipped_dates: skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revenue(date: &str, cents: i64) -> Transaction {
        Transaction::new(TransactionKind::Revenue, date, Money::from_cents(cents))
    }

    fn expense(date: &str, cents: i64) -> Transaction {
        Transaction::new(TransactionKind::Expense, date, Money::from_cents(cents))
    }

    fn reference(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let summary = summarize([], reference(2025, 6, 15));

        assert!(summary.is_empty());
        assert_eq!(summary.totals.profit, Money::zero());
        assert_eq!(summary.monthly.len(), 6);
        assert!(summary
            .monthly
            .iter()
            .all(|b| b.revenue.is_zero() && b.expenses.is_zero()));
        assert_eq!(summary.skipped_dates, 0);
    }

    #[test]
    fn test_totals_and_profit() {
        let transactions = vec![
            revenue("2025-01-10", 10_000),
            revenue("2025-02-15", 5_000),
            expense("2025-01-20", 4_000),
        ];

        let summary = summarize(&transactions, reference(2025, 6, 15));
        assert_eq!(summary.totals.revenue, Money::from_cents(15_000));
        assert_eq!(summary.totals.expenses, Money::from_cents(4_000));
        assert_eq!(summary.totals.profit, Money::from_cents(11_000));
    }

    #[test]
    fn test_same_month_transactions_share_a_bucket() {
        let transactions = vec![
            revenue("2024-03-05", 1_000),
            revenue("2024-03-31", 2_000),
            expense("2024-03-12", 500),
        ];

        let summary = summarize(&transactions, reference(2024, 5, 1));
        let march = &summary.monthly[2];
        assert_eq!(march.label, "Mar");
        assert_eq!(march.revenue, Money::from_cents(3_000));
        assert_eq!(march.expenses, Money::from_cents(500));
    }

    #[test]
    fn test_series_truncated_at_reference_month() {
        let transactions = vec![
            revenue("2025-02-01", 1_000),
            // Booked in a month beyond the reference; the amount still
            // counts toward the totals but no bucket is shown for it.
            revenue("2025-11-01", 9_000),
        ];

        let summary = summarize(&transactions, reference(2025, 3, 10));
        assert_eq!(summary.monthly.len(), 3);
        assert_eq!(summary.monthly.last().unwrap().label, "Mar");
        assert_eq!(summary.totals.revenue, Money::from_cents(10_000));
    }

    #[test]
    fn test_unparseable_dates_excluded_consistently() {
        let transactions = vec![
            revenue("2025-01-10", 1_000),
            revenue("sem data", 9_999),
            expense("", 500),
        ];

        let summary = summarize(&transactions, reference(2025, 6, 15));

        assert_eq!(summary.skipped_dates, 2);
        assert_eq!(summary.totals.revenue, Money::from_cents(1_000));
        assert_eq!(summary.totals.expenses, Money::zero());

        // The chart reconciles with the totals
        let bucketed: Money = summary.monthly.iter().map(|b| b.revenue).sum();
        assert_eq!(bucketed, summary.totals.revenue);
    }

    #[test]
    fn test_december_reference_shows_full_year() {
        let summary = summarize([], reference(2025, 12, 31));
        assert_eq!(summary.monthly.len(), 12);
        assert_eq!(summary.monthly[11].label, "Dez");
    }
}
