//! Memoized recomputation of analytics views
//!
//! The analytics functions are pure, so their results only change when an
//! input changes. This cache keys each view on the snapshot version plus
//! the other declared inputs and recomputes only on a key change.

use chrono::NaiveDate;

use super::aggregation::{summarize, CashFlowSummary};
use super::classification::{classify_clients, ClassificationRow};
use super::filter::filter_by_period;
use crate::models::PeriodBounds;
use crate::store::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DashboardKey {
    version: u64,
    bounds: Option<PeriodBounds>,
    reference: NaiveDate,
}

/// Caches the dashboard summary and the client classification
#[derive(Debug, Default)]
pub struct AnalyticsCache {
    dashboard: Option<(DashboardKey, CashFlowSummary)>,
    classification: Option<(u64, Vec<ClassificationRow>)>,
    recomputes: u64,
}

impl AnalyticsCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Dashboard summary for the snapshot, optionally period-filtered
    ///
    /// Recomputes only when the snapshot version, the bounds, or the
    /// reference date differ from the previous call.
    pub fn dashboard(
        &mut self,
        snapshot: &Snapshot,
        bounds: Option<PeriodBounds>,
        reference: NaiveDate,
    ) -> &CashFlowSummary {
        let key = DashboardKey {
            version: snapshot.version(),
            bounds,
            reference,
        };

        let stale = self
            .dashboard
            .as_ref()
            .map_or(true, |(cached_key, _)| *cached_key != key);

        if stale {
            let summary = match &bounds {
                Some(bounds) => summarize(filter_by_period(snapshot.transactions(), bounds), reference),
                None => summarize(snapshot.transactions(), reference),
            };
            self.dashboard = Some((key, summary));
            self.recomputes += 1;
        }

        &self.dashboard.as_ref().expect("just computed").1
    }

    /// Client classification for the snapshot
    pub fn classification(&mut self, snapshot: &Snapshot) -> &[ClassificationRow] {
        let version = snapshot.version();
        let stale = self
            .classification
            .as_ref()
            .map_or(true, |(cached_version, _)| *cached_version != version);

        if stale {
            self.classification = Some((version, classify_clients(snapshot)));
            self.recomputes += 1;
        }

        &self.classification.as_ref().expect("just computed").1
    }

    /// Number of recomputations performed so far
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}
