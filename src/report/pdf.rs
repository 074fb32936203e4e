//! Paginated PDF renderer backend
//!
//! Lays the report out on A4 pages with a moving vertical cursor: branding
//! watermark under the content of every page, header image top-left on the
//! first page, centered title block, section line items with page breaks at
//! a fixed content floor, and a second pass stamping the footer image on
//! every page once the page count is known.

use std::io::BufWriter;

use printpdf::image_crate::{DynamicImage, GenericImageView};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocumentReference,
    PdfLayerIndex, PdfLayerReference, PdfPageIndex,
};

use super::{artifact_stem, BrandingAssets, ReportArtifact, ReportDocument, ReportRenderer};
use crate::error::{CaixaError, CaixaResult};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;

const LINE_HEIGHT: f32 = 6.0;
// Below this cursor position the current page is full; keeps the footer
// band clear of body text.
const BODY_FLOOR: f32 = 25.0;

const HEADER_HEIGHT: f32 = 18.0;
const WATERMARK_WIDTH: f32 = 110.0;
const FOOTER_HEIGHT: f32 = 10.0;
const FOOTER_Y: f32 = 8.0;

// printpdf renders embedded images at 300 dpi when no dpi override is set
const IMAGE_DPI: f32 = 300.0;

/// Maximum characters for an item description
const DESCRIPTION_CHARS: usize = 58;

const X_DATE: f32 = MARGIN;
const X_DESCRIPTION: f32 = 50.0;
const X_AMOUNT_RIGHT: f32 = PAGE_WIDTH - MARGIN;

/// Paginated A4 PDF backend
pub struct PdfRenderer;

impl ReportRenderer for PdfRenderer {
    fn render(
        &self,
        document: &ReportDocument,
        branding: &BrandingAssets,
    ) -> CaixaResult<ReportArtifact> {
        let (doc, first_page, first_layer) = printpdf::PdfDocument::new(
            document.title.clone(),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Camada 1",
        );

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_err)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_err)?;

        let mut writer = PageWriter {
            doc: &doc,
            pages: vec![(first_page, first_layer)],
            layer: doc.get_page(first_page).get_layer(first_layer),
            y: PAGE_HEIGHT - MARGIN,
            watermark: branding.watermark.as_ref(),
        };
        writer.stamp_watermark();

        // Header image, first page only
        if let Some(header) = &branding.header {
            place_image(
                &writer.layer,
                header,
                MARGIN,
                PAGE_HEIGHT - MARGIN - HEADER_HEIGHT,
                ImageFit::Height(HEADER_HEIGHT),
            );
            writer.y -= HEADER_HEIGHT + 6.0;
        }

        // Centered title block
        writer.text_centered(&document.title, 16.0, &bold);
        writer.y -= 8.0;
        writer.text_centered(&format!("Período: {}", document.period_label), 11.0, &font);
        writer.y -= 10.0;

        for section in &document.sections {
            writer.line_break_check();
            writer.text(&section.title, 12.0, X_DATE, &bold);
            writer.y -= 7.0;

            for item in &section.items {
                writer.line_break_check();
                writer.text(&item.date, 10.0, X_DATE, &font);
                writer.text(
                    &truncate_chars(&item.description, DESCRIPTION_CHARS),
                    10.0,
                    X_DESCRIPTION,
                    &font,
                );
                writer.text_right_aligned(&item.amount.to_string(), 10.0, X_AMOUNT_RIGHT, &font);
                writer.y -= LINE_HEIGHT;
            }

            writer.line_break_check();
            writer.text("Total", 11.0, X_DATE, &bold);
            writer.text_right_aligned(&section.total.to_string(), 11.0, X_AMOUNT_RIGHT, &bold);
            writer.y -= 10.0;
        }

        // Second pass: the page count is only known after body layout, so
        // the footer is stamped onto every created page now.
        let pages = writer.pages;
        let page_count = pages.len();
        if let Some(footer) = &branding.footer {
            for (page, layer) in &pages {
                let layer = doc.get_page(*page).get_layer(*layer);
                let width = scaled_width(footer, ImageFit::Height(FOOTER_HEIGHT));
                place_image(
                    &layer,
                    footer,
                    (PAGE_WIDTH - width) / 2.0,
                    FOOTER_Y,
                    ImageFit::Height(FOOTER_HEIGHT),
                );
            }
        }

        let mut buffer = BufWriter::new(Vec::new());
        doc.save(&mut buffer).map_err(render_err)?;
        let bytes = buffer
            .into_inner()
            .map_err(|e| CaixaError::Render(format!("Failed to finalize PDF buffer: {}", e)))?;

        Ok(ReportArtifact {
            file_name: format!("{}.pdf", artifact_stem(&document.period_label)),
            bytes,
            pages: page_count,
        })
    }
}

/// Cursor-driven page state
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    layer: PdfLayerReference,
    y: f32,
    watermark: Option<&'a DynamicImage>,
}

impl PageWriter<'_> {
    /// Start a new page when the cursor passed the content floor
    fn line_break_check(&mut self) {
        if self.y >= BODY_FLOOR {
            return;
        }

        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Camada 1");
        self.pages.push((page, layer));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
        self.stamp_watermark();
    }

    /// Draw the watermark centered on the current page, under later text
    fn stamp_watermark(&mut self) {
        if let Some(watermark) = self.watermark {
            let width = WATERMARK_WIDTH;
            let height = scaled_height(watermark, ImageFit::Width(width));
            place_image(
                &self.layer,
                watermark,
                (PAGE_WIDTH - width) / 2.0,
                (PAGE_HEIGHT - height) / 2.0,
                ImageFit::Width(width),
            );
        }
    }

    fn text(&self, text: &str, size: f32, x: f32, font: &IndirectFontRef) {
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn text_centered(&self, text: &str, size: f32, font: &IndirectFontRef) {
        let x = (PAGE_WIDTH - approx_text_width(text, size)) / 2.0;
        self.text(text, size, x.max(MARGIN), font);
    }

    fn text_right_aligned(&self, text: &str, size: f32, right_edge: f32, font: &IndirectFontRef) {
        let x = right_edge - approx_text_width(text, size);
        self.text(text, size, x.max(MARGIN), font);
    }
}

/// Target dimension for aspect-preserving image placement
#[derive(Clone, Copy)]
enum ImageFit {
    /// Scale so the rendered width matches, in mm
    Width(f32),
    /// Scale so the rendered height matches, in mm
    Height(f32),
}

fn natural_size_mm(image: &DynamicImage) -> (f32, f32) {
    let (w, h) = image.dimensions();
    (
        w as f32 * 25.4 / IMAGE_DPI,
        h as f32 * 25.4 / IMAGE_DPI,
    )
}

fn fit_scale(image: &DynamicImage, fit: ImageFit) -> f32 {
    let (natural_w, natural_h) = natural_size_mm(image);
    match fit {
        ImageFit::Width(target) => target / natural_w.max(f32::EPSILON),
        ImageFit::Height(target) => target / natural_h.max(f32::EPSILON),
    }
}

fn scaled_width(image: &DynamicImage, fit: ImageFit) -> f32 {
    natural_size_mm(image).0 * fit_scale(image, fit)
}

fn scaled_height(image: &DynamicImage, fit: ImageFit) -> f32 {
    natural_size_mm(image).1 * fit_scale(image, fit)
}

/// Place an image with its lower-left corner at (x, y), aspect preserved
fn place_image(layer: &PdfLayerReference, image: &DynamicImage, x: f32, y: f32, fit: ImageFit) {
    let scale = fit_scale(image, fit);
    Image::from_dynamic_image(image).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(y)),
            scale_x: Some(scale as _),
            scale_y: Some(scale as _),
            ..ImageTransform::default()
        },
    );
}

/// Rough Helvetica text width in mm (average glyph ≈ half the font size)
fn approx_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5 * 0.3528
}

/// Truncate to a character limit, marking cut descriptions
fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(limit.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}

fn render_err(e: printpdf::Error) -> CaixaError {
    CaixaError::Render(e.to_string())
}
