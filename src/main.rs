use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use caixa::cli::{handle_abc, handle_dashboard, handle_export_command, ExportCommands};
use caixa::config::{paths::CaixaPaths, settings::Settings};
use caixa::display::Notification;
use caixa::store::{initialize_store, SnapshotStore};

#[derive(Parser)]
#[command(
    name = "caixa",
    version,
    about = "Financial analytics and reporting for an environmental-compliance back office",
    long_about = "caixa-cli reads the back office's document collections and \
                  provides the financial analytics screens: cash dashboard with \
                  monthly series, ABC client classification, and period-filtered \
                  report exports (PDF and print)."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory with empty collections
    Init,

    /// Show the cash dashboard (totals and monthly series)
    Dashboard {
        /// Reporting period (YYYY, YYYY-MM or YYYY-MM-DD); all records if omitted
        #[arg(short, long)]
        period: Option<String>,

        /// Reference date for the monthly series cutoff (defaults to today)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Show the ABC client classification
    Abc {
        /// Export the table to a CSV file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the cash report
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() {
    if let Err(e) = run() {
        Notification::error(e.to_string()).emit();
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = CaixaPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Commands::Init => {
            initialize_store(&paths)?;
            Notification::success(format!(
                "Initialized data directory at {}",
                paths.data_dir().display()
            ))
            .emit();
        }
        Commands::Dashboard { period, as_of } => {
            let snapshot = SnapshotStore::new(paths.clone()).load()?;
            handle_dashboard(&snapshot, period, as_of)?;
        }
        Commands::Abc { output } => {
            let snapshot = SnapshotStore::new(paths.clone()).load()?;
            handle_abc(&snapshot, output)?;
        }
        Commands::Export(cmd) => {
            let snapshot = SnapshotStore::new(paths.clone()).load()?;
            handle_export_command(&paths, &settings, &snapshot, cmd)?;
        }
        Commands::Config => {
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", settings.resolved_export_dir(&paths).display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Currency symbol:  {}", settings.currency_symbol);
            println!(
                "Branding:         header={} footer={} watermark={} (opacity {:.2})",
                option_label(&settings.branding.header_image),
                option_label(&settings.branding.footer_image),
                option_label(&settings.branding.watermark_image),
                settings.branding.watermark_opacity
            );
        }
    }

    Ok(())
}

fn option_label(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "unset".to_string())
}
