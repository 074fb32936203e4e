//! Branding assets for report exports
//!
//! Header, footer and watermark images are fetched through the
//! [`AssetSource`] collaborator, decoded, and (for the watermark)
//! lightened before any page content is written. Each asset is
//! independently optional: a failed fetch or decode omits that element
//! only and never blocks the rest of the export.

use std::fmt;
use std::path::PathBuf;

use printpdf::image_crate::{self, DynamicImage};

use crate::config::BrandingSettings;
use crate::error::{CaixaError, CaixaResult};

/// Placement role of a branding asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandingRole {
    /// Top-left image on the first page
    Header,
    /// Image stamped at the bottom of every page
    Footer,
    /// Faded image centered on every page
    Watermark,
}

impl fmt::Display for BrandingRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrandingRole::Header => write!(f, "header"),
            BrandingRole::Footer => write!(f, "footer"),
            BrandingRole::Watermark => write!(f, "watermark"),
        }
    }
}

/// Source of raw branding asset bytes
///
/// `Ok(None)` means the asset is not configured; an `Err` means a
/// configured asset could not be retrieved.
pub trait AssetSource {
    /// Fetch the raw bytes for one role
    fn fetch(&self, role: BrandingRole) -> CaixaResult<Option<Vec<u8>>>;
}

/// File-backed asset source configured from settings
pub struct FileAssetSource {
    header: Option<PathBuf>,
    footer: Option<PathBuf>,
    watermark: Option<PathBuf>,
}

impl FileAssetSource {
    /// Build from the branding section of the settings
    pub fn from_settings(branding: &BrandingSettings) -> Self {
        Self {
            header: branding.header_image.clone(),
            footer: branding.footer_image.clone(),
            watermark: branding.watermark_image.clone(),
        }
    }
}

impl AssetSource for FileAssetSource {
    fn fetch(&self, role: BrandingRole) -> CaixaResult<Option<Vec<u8>>> {
        let path = match role {
            BrandingRole::Header => &self.header,
            BrandingRole::Footer => &self.footer,
            BrandingRole::Watermark => &self.watermark,
        };

        match path {
            None => Ok(None),
            Some(path) => std::fs::read(path).map(Some).map_err(|e| {
                CaixaError::Io(format!("Failed to read {}: {}", path.display(), e))
            }),
        }
    }
}

/// Decoded branding images ready for page assembly
#[derive(Default)]
pub struct BrandingAssets {
    /// Header image, if available
    pub header: Option<DynamicImage>,
    /// Footer image, if available
    pub footer: Option<DynamicImage>,
    /// Pre-faded watermark image, if available
    pub watermark: Option<DynamicImage>,
}

impl BrandingAssets {
    /// No branding at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Fetch and decode all assets from a source
    ///
    /// The watermark is lightened by `watermark_opacity` here, before any
    /// page content is written. Returns the assets plus one warning per
    /// asset that had to be omitted.
    pub fn load(source: &dyn AssetSource, watermark_opacity: f32) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        let mut fetch_decoded = |role: BrandingRole| -> Option<DynamicImage> {
            match source.fetch(role) {
                Ok(None) => None,
                Ok(Some(bytes)) => match image_crate::load_from_memory(&bytes) {
                    Ok(image) => Some(image),
                    Err(e) => {
                        warnings.push(format!("Omitting {} image: {}", role, e));
                        None
                    }
                },
                Err(e) => {
                    warnings.push(format!("Omitting {} image: {}", role, e));
                    None
                }
            }
        };

        let header = fetch_decoded(BrandingRole::Header);
        let footer = fetch_decoded(BrandingRole::Footer);
        let watermark = fetch_decoded(BrandingRole::Watermark).map(|img| lighten(img, watermark_opacity));

        (
            Self {
                header,
                footer,
                watermark,
            },
            warnings,
        )
    }
}

/// Blend an image toward white, keeping `opacity` of the original ink
///
/// Reduced opacity is applied to the pixels themselves so the faded
/// watermark renders the same in every viewer, independent of PDF alpha
/// support.
pub fn lighten(image: DynamicImage, opacity: f32) -> DynamicImage {
    let opacity = opacity.clamp(0.0, 1.0);
    let mut rgba = image.into_rgba8();

    for pixel in rgba.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            let ink = 255.0 - f32::from(*channel);
            *channel = (255.0 - ink * opacity).round() as u8;
        }
    }

    DynamicImage::ImageRgba8(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;
    use printpdf::image_crate::{Rgba, RgbaImage};
    use std::io::Cursor;

    struct StubSource {
        header: CaixaResult<Option<Vec<u8>>>,
        footer: CaixaResult<Option<Vec<u8>>>,
        watermark: CaixaResult<Option<Vec<u8>>>,
    }

    impl AssetSource for StubSource {
        fn fetch(&self, role: BrandingRole) -> CaixaResult<Option<Vec<u8>>> {
            let slot = match role {
                BrandingRole::Header => &self.header,
                BrandingRole::Footer => &self.footer,
                BrandingRole::Watermark => &self.watermark,
            };
            match slot {
                Ok(bytes) => Ok(bytes.clone()),
                Err(_) => Err(CaixaError::Io("fetch failed".into())),
            }
        }
    }

    fn png_bytes() -> Vec<u8> {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])));
        let mut bytes = Vec::new();
        image
            .write_to(
                &mut Cursor::new(&mut bytes),
                image_crate::ImageOutputFormat::Png,
            )
            .unwrap();
        bytes
    }

    #[test]
    fn test_load_all_present() {
        let source = StubSource {
            header: Ok(Some(png_bytes())),
            footer: Ok(Some(png_bytes())),
            watermark: Ok(Some(png_bytes())),
        };

        let (assets, warnings) = BrandingAssets::load(&source, 0.15);
        assert!(assets.header.is_some());
        assert!(assets.footer.is_some());
        assert!(assets.watermark.is_some());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_asset_omits_only_that_element() {
        let source = StubSource {
            header: Err(CaixaError::Io("unreachable".into())),
            footer: Ok(Some(png_bytes())),
            watermark: Ok(None),
        };

        let (assets, warnings) = BrandingAssets::load(&source, 0.15);
        assert!(assets.header.is_none());
        assert!(assets.footer.is_some());
        assert!(assets.watermark.is_none());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("header"));
    }

    #[test]
    fn test_undecodable_bytes_are_omitted_with_warning() {
        let source = StubSource {
            header: Ok(Some(b"not an image".to_vec())),
            footer: Ok(None),
            watermark: Ok(None),
        };

        let (assets, warnings) = BrandingAssets::load(&source, 0.15);
        assert!(assets.header.is_none());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_lighten_moves_ink_toward_white() {
        let black = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255])));
        let faded = lighten(black, 0.15).into_rgba8();
        let pixel = faded.get_pixel(0, 0);

        // 15% of full ink: 255 - 0.15 * 255 ≈ 217
        assert_eq!(pixel.0[0], 217);
        assert_eq!(pixel.0[1], 217);
        assert_eq!(pixel.0[2], 217);
        // Alpha untouched
        assert_eq!(pixel.0[3], 255);
    }

    #[test]
    fn test_lighten_keeps_white_white() {
        let white = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255])));
        let faded = lighten(white, 0.15).into_rgba8();
        assert_eq!(faded.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_file_source_unconfigured_is_none() {
        let source = FileAssetSource::from_settings(&BrandingSettings::default());
        assert!(source.fetch(BrandingRole::Header).unwrap().is_none());
        assert!(source.fetch(BrandingRole::Watermark).unwrap().is_none());
    }

    #[test]
    fn test_file_source_missing_file_is_error() {
        let branding = BrandingSettings {
            header_image: Some(PathBuf::from("/definitely/not/here.png")),
            ..BrandingSettings::default()
        };
        let source = FileAssetSource::from_settings(&branding);
        assert!(source.fetch(BrandingRole::Header).is_err());
    }
}
