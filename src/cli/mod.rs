//! CLI command handlers

pub mod analytics;
pub mod export;

pub use analytics::{handle_abc, handle_dashboard};
pub use export::{handle_export_command, ExportCommands};
