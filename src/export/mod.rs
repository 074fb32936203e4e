//! Export orchestration
//!
//! Drives one export action end to end: load branding, build the report
//! document from the period-filtered snapshot, render through the chosen
//! backend, write the artifact, and record the action in the audit trail.
//! Export invocations are serialized: a second export requested while one
//! is in flight is rejected instead of letting two completions race.

pub mod csv;

pub use self::csv::{export_classification_csv, export_line_items_csv};

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::audit::{AuditEntry, AuditLogger, ExportBackend};
use crate::config::{CaixaPaths, Settings};
use crate::error::{CaixaError, CaixaResult};
use crate::models::ReportPeriod;
use crate::report::{
    build_cash_report, AssetSource, BrandingAssets, PdfRenderer, PrintRenderer, ReportRenderer,
};
use crate::store::Snapshot;

/// Result of a successful export
#[derive(Debug, Clone)]
pub struct ExportReceipt {
    /// Where the artifact was written
    pub path: PathBuf,
    /// Pages in the rendered artifact
    pub pages: usize,
    /// Branding assets that had to be omitted
    pub warnings: Vec<String>,
}

/// Opens a written print artifact in a browsing context
pub trait PrintLauncher {
    /// Open the artifact; implementations map failures to
    /// [`CaixaError::PrintBlocked`]
    fn open(&self, path: &Path) -> CaixaResult<()>;
}

/// Launches the platform's default browser
pub struct SystemPrintLauncher;

impl PrintLauncher for SystemPrintLauncher {
    fn open(&self, path: &Path) -> CaixaResult<()> {
        let status = opener_command(path)
            .status()
            .map_err(|e| CaixaError::PrintBlocked(format!("could not launch browser: {}", e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(CaixaError::PrintBlocked(format!(
                "browser launcher exited with {}",
                status
            )))
        }
    }
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(all(unix, not(target_os = "macos")))]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

/// Serializes and executes export actions
pub struct ExportService {
    export_dir: PathBuf,
    audit: AuditLogger,
    watermark_opacity: f32,
    in_flight: AtomicBool,
}

impl ExportService {
    /// Create a service writing into the given directory
    pub fn new(export_dir: PathBuf, audit_log: PathBuf, watermark_opacity: f32) -> Self {
        Self {
            export_dir,
            audit: AuditLogger::new(audit_log),
            watermark_opacity,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Create a service from the resolved configuration
    pub fn from_config(paths: &CaixaPaths, settings: &Settings) -> Self {
        Self::new(
            settings.resolved_export_dir(paths),
            paths.audit_log(),
            settings.branding.watermark_opacity,
        )
    }

    /// Render the period's cash report as a PDF and write it
    pub fn export_pdf(
        &self,
        snapshot: &Snapshot,
        period: &ReportPeriod,
        assets: &dyn AssetSource,
    ) -> CaixaResult<ExportReceipt> {
        let _guard = self.acquire()?;
        let result = self.render_to_file(snapshot, period, assets, &PdfRenderer);
        self.record(ExportBackend::Pdf, period, &result);
        result
    }

    /// Render the period's cash report as HTML and open the print flow
    ///
    /// If the browsing context cannot be launched the artifact is removed
    /// again: the print flow either runs completely or not at all.
    pub fn export_print(
        &self,
        snapshot: &Snapshot,
        period: &ReportPeriod,
        assets: &dyn AssetSource,
        launcher: &dyn PrintLauncher,
    ) -> CaixaResult<ExportReceipt> {
        let _guard = self.acquire()?;
        let result = self
            .render_to_file(snapshot, period, assets, &PrintRenderer)
            .and_then(|receipt| {
                if let Err(e) = launcher.open(&receipt.path) {
                    let _ = std::fs::remove_file(&receipt.path);
                    return Err(e);
                }
                Ok(receipt)
            });
        self.record(ExportBackend::Print, period, &result);
        result
    }

    fn render_to_file(
        &self,
        snapshot: &Snapshot,
        period: &ReportPeriod,
        assets: &dyn AssetSource,
        renderer: &dyn ReportRenderer,
    ) -> CaixaResult<ExportReceipt> {
        // Branding is fetched and transformed before any page is assembled
        let (branding, warnings) = BrandingAssets::load(assets, self.watermark_opacity);

        let document = build_cash_report(snapshot, period);
        let artifact = renderer.render(&document, &branding)?;

        std::fs::create_dir_all(&self.export_dir)
            .map_err(|e| CaixaError::Export(format!("Failed to create export dir: {}", e)))?;

        let path = self.export_dir.join(&artifact.file_name);
        std::fs::write(&path, &artifact.bytes)
            .map_err(|e| CaixaError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

        Ok(ExportReceipt {
            path,
            pages: artifact.pages,
            warnings,
        })
    }

    fn acquire(&self) -> CaixaResult<InFlightGuard<'_>> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(CaixaError::ExportInProgress);
        }
        Ok(InFlightGuard(&self.in_flight))
    }

    fn record(
        &self,
        backend: ExportBackend,
        period: &ReportPeriod,
        result: &CaixaResult<ExportReceipt>,
    ) {
        let entry = match result {
            Ok(receipt) => {
                AuditEntry::succeeded(backend, period.label(), receipt.path.display().to_string())
            }
            Err(e) => AuditEntry::failed(backend, period.label(), e.to_string()),
        };
        // Auditing must not turn a finished export into a failure
        let _ = self.audit.log(&entry);
    }

    /// Audit trail of past exports
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::ExportOutcome;
    use crate::models::{Money, Transaction, TransactionKind};
    use crate::report::BrandingRole;
    use std::sync::mpsc::{channel, Receiver, Sender};
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct NoAssets;

    impl AssetSource for NoAssets {
        fn fetch(&self, _role: BrandingRole) -> CaixaResult<Option<Vec<u8>>> {
            Ok(None)
        }
    }

    struct FailingLauncher;

    impl PrintLauncher for FailingLauncher {
        fn open(&self, _path: &Path) -> CaixaResult<()> {
            Err(CaixaError::PrintBlocked("blocked by host policy".into()))
        }
    }

    struct RecordingLauncher;

    impl PrintLauncher for RecordingLauncher {
        fn open(&self, path: &Path) -> CaixaResult<()> {
            assert!(path.exists());
            Ok(())
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![
                Transaction::new(TransactionKind::Revenue, "2025-06-15", Money::from_cents(10_000))
                    .with_description("Licença de operação"),
                Transaction::new(TransactionKind::Expense, "2025-06-20", Money::from_cents(4_000))
                    .with_description("Coleta de amostras"),
            ],
            Vec::new(),
            Vec::new(),
        )
    }

    fn service(dir: &TempDir) -> ExportService {
        ExportService::new(
            dir.path().join("exports"),
            dir.path().join("audit.log"),
            0.15,
        )
    }

    #[test]
    fn test_export_pdf_writes_artifact_and_audits() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        let period = ReportPeriod::parse("2025-06").unwrap();

        let receipt = service.export_pdf(&snapshot(), &period, &NoAssets).unwrap();

        assert!(receipt.path.exists());
        assert!(receipt
            .path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("lancamentos_caixa_202506"));
        assert_eq!(receipt.pages, 1);
        assert!(receipt.warnings.is_empty());

        let entries = service.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].outcome, ExportOutcome::Succeeded);
        assert_eq!(entries[0].backend, ExportBackend::Pdf);
    }

    #[test]
    fn test_export_print_opens_written_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        let period = ReportPeriod::parse("2025").unwrap();

        let receipt = service
            .export_print(&snapshot(), &period, &NoAssets, &RecordingLauncher)
            .unwrap();

        assert!(receipt.path.exists());
        assert!(receipt.path.to_string_lossy().ends_with(".html"));
    }

    #[test]
    fn test_blocked_print_removes_artifact_and_audits_failure() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        let period = ReportPeriod::parse("2025").unwrap();

        let err = service
            .export_print(&snapshot(), &period, &NoAssets, &FailingLauncher)
            .unwrap_err();
        assert!(matches!(err, CaixaError::PrintBlocked(_)));

        // No partial artifact survives
        let leftover: Vec<_> = std::fs::read_dir(temp_dir.path().join("exports"))
            .unwrap()
            .collect();
        assert!(leftover.is_empty());

        let entries = service.audit().read_all().unwrap();
        assert_eq!(entries[0].outcome, ExportOutcome::Failed);
    }

    struct BlockingSource {
        started: Sender<()>,
        release: Mutex<Receiver<()>>,
    }

    impl AssetSource for BlockingSource {
        fn fetch(&self, role: BrandingRole) -> CaixaResult<Option<Vec<u8>>> {
            if role == BrandingRole::Header {
                let _ = self.started.send(());
                let _ = self.release.lock().unwrap().recv();
            }
            Ok(None)
        }
    }

    #[test]
    fn test_overlapping_export_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        let period = ReportPeriod::parse("2025-06").unwrap();
        let snap = snapshot();

        let (started_tx, started_rx) = channel();
        let (release_tx, release_rx) = channel();
        let blocking = BlockingSource {
            started: started_tx,
            release: Mutex::new(release_rx),
        };

        std::thread::scope(|scope| {
            let first = scope.spawn(|| service.export_pdf(&snap, &period, &blocking));

            started_rx.recv().unwrap();
            let err = service.export_pdf(&snap, &period, &NoAssets).unwrap_err();
            assert!(matches!(err, CaixaError::ExportInProgress));

            release_tx.send(()).unwrap();
            assert!(first.join().unwrap().is_ok());
        });

        // The guard released; a later export goes through again
        assert!(service.export_pdf(&snap, &period, &NoAssets).is_ok());
    }
}
