//! CLI commands for report exports

use std::path::PathBuf;

use clap::Subcommand;

use super::analytics::parse_period_arg;
use crate::config::{CaixaPaths, Settings};
use crate::display::Notification;
use crate::error::CaixaResult;
use crate::export::{ExportService, SystemPrintLauncher};
use crate::models::ReportPeriod;
use crate::report::FileAssetSource;
use crate::store::Snapshot;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the period's cash report as a paginated PDF
    Pdf {
        /// Reporting period (YYYY, YYYY-MM or YYYY-MM-DD); defaults to the
        /// current month
        #[arg(short, long)]
        period: Option<String>,

        /// Directory to write the artifact into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Open the period's cash report in the browser print flow
    Print {
        /// Reporting period (YYYY, YYYY-MM or YYYY-MM-DD); defaults to the
        /// current month
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle export commands
pub fn handle_export_command(
    paths: &CaixaPaths,
    settings: &Settings,
    snapshot: &Snapshot,
    cmd: ExportCommands,
) -> CaixaResult<()> {
    let assets = FileAssetSource::from_settings(&settings.branding);

    match cmd {
        ExportCommands::Pdf { period, output } => {
            let period = resolve_period(period.as_deref())?;

            let mut service = ExportService::from_config(paths, settings);
            if let Some(dir) = output {
                service = ExportService::new(
                    dir,
                    paths.audit_log(),
                    settings.branding.watermark_opacity,
                );
            }

            let receipt = service.export_pdf(snapshot, &period, &assets)?;
            emit_warnings(&receipt.warnings);
            Notification::success(format!(
                "Report exported to {} ({} page(s))",
                receipt.path.display(),
                receipt.pages
            ))
            .emit();
        }
        ExportCommands::Print { period } => {
            let period = resolve_period(period.as_deref())?;

            let service = ExportService::from_config(paths, settings);
            let receipt =
                service.export_print(snapshot, &period, &assets, &SystemPrintLauncher)?;
            emit_warnings(&receipt.warnings);
            Notification::success(format!(
                "Print view opened from {}",
                receipt.path.display()
            ))
            .emit();
        }
    }

    Ok(())
}

fn resolve_period(period: Option<&str>) -> CaixaResult<ReportPeriod> {
    Ok(parse_period_arg(period)?.unwrap_or_else(ReportPeriod::current_month))
}

fn emit_warnings(warnings: &[String]) {
    for warning in warnings {
        Notification::warning(warning.clone()).emit();
    }
}
