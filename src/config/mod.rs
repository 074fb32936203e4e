//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::CaixaPaths;
pub use settings::{BrandingSettings, Settings};
