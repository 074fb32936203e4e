//! Path management for caixa-cli
//!
//! Provides XDG-compliant path resolution for configuration, data, and
//! export artifacts.
//!
//! ## Path Resolution Order
//!
//! 1. `CAIXA_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/caixa-cli` or `~/.config/caixa-cli`
//! 3. Windows: `%APPDATA%\caixa-cli`

use std::path::PathBuf;

use crate::error::CaixaError;

/// Manages all paths used by caixa-cli
#[derive(Debug, Clone)]
pub struct CaixaPaths {
    /// Base directory for all caixa-cli data
    base_dir: PathBuf,
}

impl CaixaPaths {
    /// Create a new CaixaPaths instance
    ///
    /// Path resolution:
    /// 1. `CAIXA_CLI_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/caixa-cli` or `~/.config/caixa-cli`
    /// 3. Windows: `%APPDATA%\caixa-cli`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CaixaError> {
        let base_dir = if let Ok(custom) = std::env::var("CAIXA_CLI_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CaixaPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/caixa-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/caixa-cli/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the export directory (~/.config/caixa-cli/exports/)
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the export audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Get the path to invoices.json
    pub fn invoices_file(&self) -> PathBuf {
        self.data_dir().join("invoices.json")
    }

    /// Get the path to clients.json
    pub fn clients_file(&self) -> PathBuf {
        self.data_dir().join("clients.json")
    }

    /// Ensure all required directories exist
    ///
    /// Creates:
    /// - Base directory (~/.config/caixa-cli/)
    /// - Data directory (~/.config/caixa-cli/data/)
    /// - Export directory (~/.config/caixa-cli/exports/)
    pub fn ensure_directories(&self) -> Result<(), CaixaError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CaixaError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| CaixaError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| CaixaError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }

    /// Check if caixa-cli has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CaixaError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("caixa-cli"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CaixaError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CaixaError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("caixa-cli"))
}
