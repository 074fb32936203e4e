//! CLI commands for the analytics views
//!
//! Handlers for the dashboard and the ABC classification screens.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::analytics::AnalyticsCache;
use crate::display::{format_classification, format_dashboard, Notification};
use crate::error::{CaixaError, CaixaResult};
use crate::export::export_classification_csv;
use crate::models::ReportPeriod;
use crate::store::Snapshot;

/// Parse an optional period argument
pub fn parse_period_arg(period: Option<&str>) -> CaixaResult<Option<ReportPeriod>> {
    match period {
        None => Ok(None),
        Some(raw) => ReportPeriod::parse(raw)
            .map(Some)
            .map_err(|e| CaixaError::Validation(format!("{}. Use YYYY, YYYY-MM or YYYY-MM-DD", e))),
    }
}

/// Handle the dashboard command
pub fn handle_dashboard(
    snapshot: &Snapshot,
    period: Option<String>,
    as_of: Option<String>,
) -> CaixaResult<()> {
    let period = parse_period_arg(period.as_deref())?;

    let reference = match as_of {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| CaixaError::Validation(format!("Invalid date: {}. Use YYYY-MM-DD", raw)))?,
        None => chrono::Local::now().date_naive(),
    };

    let mut cache = AnalyticsCache::new();
    let bounds = period.as_ref().map(|p| p.bounds());
    let summary = cache.dashboard(snapshot, bounds, reference);

    let label = period
        .map(|p| p.label())
        .unwrap_or_else(|| "all records".to_string());
    print!("{}", format_dashboard(summary, &label));

    Ok(())
}

/// Handle the ABC classification command
pub fn handle_abc(snapshot: &Snapshot, output: Option<PathBuf>) -> CaixaResult<()> {
    let mut cache = AnalyticsCache::new();
    let rows = cache.classification(snapshot);

    match output {
        Some(path) => {
            let file = File::create(&path)
                .map_err(|e| CaixaError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
            export_classification_csv(rows, BufWriter::new(file))?;
            Notification::success(format!("Classification exported to {}", path.display())).emit();
        }
        None => {
            print!("{}", format_classification(rows));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period_arg() {
        assert!(parse_period_arg(None).unwrap().is_none());
        assert_eq!(
            parse_period_arg(Some("2025-06")).unwrap(),
            Some(ReportPeriod::month(2025, 6))
        );

        let err = parse_period_arg(Some("june")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_handle_dashboard_rejects_bad_as_of() {
        let err = handle_dashboard(&Snapshot::empty(), None, Some("15/06/2025".into())).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_handle_abc_writes_csv() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("abc.csv");

        handle_abc(&Snapshot::empty(), Some(path.clone())).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("Client ID,Client"));
    }
}
