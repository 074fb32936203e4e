//! ABC (Pareto) classification of clients by revenue contribution
//!
//! Merges two revenue sources per client (revenue transactions carrying a
//! client, and paid invoices), then ranks clients by total revenue and
//! assigns A/B/C tiers from the cumulative contribution percentage.

use std::collections::HashMap;
use std::fmt;

use crate::models::{ClientId, Money};
use crate::store::Snapshot;

/// Cumulative-share cutoff for class A (inclusive)
const CLASS_A_CUTOFF: f64 = 80.0;
/// Cumulative-share cutoff for class B (inclusive)
const CLASS_B_CUTOFF: f64 = 95.0;

/// Name shown for clients missing from the lookup table
const UNKNOWN_CLIENT: &str = "unknown";

/// ABC tier of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbcClass {
    /// Top contributors (cumulative share up to 80%)
    A,
    /// Middle tier (cumulative share up to 95%)
    B,
    /// Long tail
    C,
}

impl fmt::Display for AbcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbcClass::A => write!(f, "A"),
            AbcClass::B => write!(f, "B"),
            AbcClass::C => write!(f, "C"),
        }
    }
}

/// One client's row in the classification table
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRow {
    /// Client identifier
    pub client_id: ClientId,
    /// Resolved client name ("unknown" when the lookup misses)
    pub client_name: String,
    /// Combined revenue from transactions and paid invoices
    pub total_revenue: Money,
    /// This client's share of the combined total, in percent
    pub revenue_share: f64,
    /// Running share up to and including this row, in percent
    pub cumulative_share: f64,
    /// Assigned tier
    pub class: AbcClass,
}

/// Classify clients by revenue contribution
///
/// Rows come back sorted by total revenue descending, tie-broken by
/// client id ascending so the order is deterministic. When the combined
/// revenue is zero every row carries zero shares and class C; the
/// computation never divides by zero.
pub fn classify_clients(snapshot: &Snapshot) -> Vec<ClassificationRow> {
    let mut revenue_by_client: HashMap<ClientId, Money> = HashMap::new();

    for txn in snapshot.revenues() {
        if let Some(client_id) = txn.client_id {
            *revenue_by_client.entry(client_id).or_insert(Money::zero()) += txn.amount;
        }
    }

    for invoice in snapshot.invoices().iter().filter(|i| i.is_paid()) {
        *revenue_by_client
            .entry(invoice.client_id)
            .or_insert(Money::zero()) += invoice.amount;
    }

    let mut ranked: Vec<(ClientId, Money)> = revenue_by_client.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let total_cents: i64 = ranked.iter().map(|(_, amount)| amount.cents()).sum();

    let mut cumulative_cents = 0i64;
    ranked
        .into_iter()
        .map(|(client_id, total_revenue)| {
            let client_name = snapshot
                .client_name(client_id)
                .unwrap_or(UNKNOWN_CLIENT)
                .to_string();

            if total_cents == 0 {
                return ClassificationRow {
                    client_id,
                    client_name,
                    total_revenue,
                    revenue_share: 0.0,
                    cumulative_share: 0.0,
                    class: AbcClass::C,
                };
            }

            cumulative_cents += total_revenue.cents();

            // Multiply before dividing so boundary rows land exactly on
            // their cutoff (1600/2000 of the total is exactly 80.0).
            let revenue_share = total_revenue.cents() as f64 * 100.0 / total_cents as f64;
            let cumulative_share = cumulative_cents as f64 * 100.0 / total_cents as f64;

            let class = if cumulative_share <= CLASS_A_CUTOFF {
                AbcClass::A
            } else if cumulative_share <= CLASS_B_CUTOFF {
                AbcClass::B
            } else {
                AbcClass::C
            };

            ClassificationRow {
                client_id,
                client_name,
                total_revenue,
                revenue_share,
                cumulative_share,
                class,
            }
        })
        .collect()
}
