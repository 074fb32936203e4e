//! User settings for caixa-cli
//!
//! Manages user preferences including currency display, branding assets
//! for report exports, and the export directory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::CaixaPaths;
use crate::error::CaixaError;
use crate::store::file_io::{read_json_required, write_json_atomic};

/// Branding asset locations for report exports
///
/// Each asset is independently optional; a missing entry simply omits that
/// visual element from the rendered report.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BrandingSettings {
    /// Header image placed top-left on the first page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image: Option<PathBuf>,

    /// Footer image stamped on every page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_image: Option<PathBuf>,

    /// Watermark image centered on every page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark_image: Option<PathBuf>,

    /// Watermark strength, 0.0 (invisible) to 1.0 (full ink)
    #[serde(default = "default_watermark_opacity")]
    pub watermark_opacity: f32,
}

/// User settings for caixa-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal and report output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Branding assets for exported reports
    #[serde(default)]
    pub branding: BrandingSettings,

    /// Override for the export directory (defaults to the exports/ dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_watermark_opacity() -> f32 {
    0.15
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            branding: BrandingSettings {
                watermark_opacity: default_watermark_opacity(),
                ..BrandingSettings::default()
            },
            export_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, creating the default file if absent
    pub fn load_or_create(paths: &CaixaPaths) -> Result<Self, CaixaError> {
        let file = paths.settings_file();

        if file.exists() {
            read_json_required(&file)
        } else {
            paths.ensure_directories()?;
            let settings = Self::default();
            write_json_atomic(&file, &settings)?;
            Ok(settings)
        }
    }

    /// Persist settings to disk
    pub fn save(&self, paths: &CaixaPaths) -> Result<(), CaixaError> {
        write_json_atomic(paths.settings_file(), self)
    }

    /// Resolve the effective export directory
    pub fn resolved_export_dir(&self, paths: &CaixaPaths) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| paths.export_dir())
    }
}
