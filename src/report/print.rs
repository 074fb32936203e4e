//! Print-ready HTML renderer backend
//!
//! Builds a single standalone HTML document with one table per section.
//! The browser's native print pagination handles page breaks, so no
//! header/footer repetition logic lives here; a small script invokes the
//! print flow once layout settles and closes the context afterwards.

use super::{artifact_stem, BrandingAssets, ReportArtifact, ReportDocument, ReportRenderer};
use crate::error::CaixaResult;

/// Flat HTML backend for environments without file export
pub struct PrintRenderer;

impl ReportRenderer for PrintRenderer {
    fn render(
        &self,
        document: &ReportDocument,
        _branding: &BrandingAssets,
    ) -> CaixaResult<ReportArtifact> {
        let html = build_html(document);

        Ok(ReportArtifact {
            file_name: format!("{}.html", artifact_stem(&document.period_label)),
            bytes: html.into_bytes(),
            pages: 1,
        })
    }
}

fn build_html(document: &ReportDocument) -> String {
    let mut out = String::with_capacity(2048);

    out.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<title>{} - {}</title>\n",
        escape_html(&document.title),
        escape_html(&document.period_label)
    ));
    out.push_str(
        "<style>\n\
         body { font-family: Helvetica, Arial, sans-serif; margin: 2em; }\n\
         h1 { text-align: center; }\n\
         p.period { text-align: center; color: #444; }\n\
         table { width: 100%; border-collapse: collapse; margin-bottom: 2em; }\n\
         th, td { border-bottom: 1px solid #ccc; padding: 4px 8px; text-align: left; }\n\
         td.amount, th.amount { text-align: right; }\n\
         tr.total td { font-weight: bold; border-top: 2px solid #333; }\n\
         </style>\n",
    );
    out.push_str("</head>\n<body>\n");

    out.push_str(&format!("<h1>{}</h1>\n", escape_html(&document.title)));
    out.push_str(&format!(
        "<p class=\"period\">Período: {}</p>\n",
        escape_html(&document.period_label)
    ));

    for section in &document.sections {
        out.push_str(&format!("<h2>{}</h2>\n", escape_html(&section.title)));
        out.push_str("<table>\n<thead>\n<tr>");
        out.push_str("<th>Data</th><th>Descrição</th><th class=\"amount\">Valor</th>");
        out.push_str("</tr>\n</thead>\n<tbody>\n");

        for item in &section.items {
            out.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td class=\"amount\">{}</td></tr>\n",
                escape_html(&item.date),
                escape_html(&item.description),
                item.amount
            ));
        }

        out.push_str(&format!(
            "<tr class=\"total\"><td colspan=\"2\">Total</td><td class=\"amount\">{}</td></tr>\n",
            section.total
        ));
        out.push_str("</tbody>\n</table>\n");
    }

    // Print once layout settles, then close the context.
    out.push_str(
        "<script>\n\
         window.addEventListener('load', function () {\n\
           window.onafterprint = function () { window.close(); };\n\
           window.print();\n\
         });\n\
         </script>\n",
    );
    out.push_str("</body>\n</html>\n");

    out
}

/// Minimal HTML escaping for text content
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::report::{LineItem, ReportSection};

    fn sample_document() -> ReportDocument {
        ReportDocument {
            title: "Lançamentos de Caixa".to_string(),
            period_label: "2025-06".to_string(),
            sections: vec![
                ReportSection {
                    title: "Receitas".to_string(),
                    items: vec![LineItem {
                        date: "2025-06-15".to_string(),
                        description: "Estudo <técnico> & laudo".to_string(),
                        amount: Money::from_cents(123_456),
                    }],
                    total: Money::from_cents(123_456),
                },
                ReportSection {
                    title: "Despesas".to_string(),
                    items: Vec::new(),
                    total: Money::zero(),
                },
            ],
        }
    }

    #[test]
    fn test_artifact_name_and_pages() {
        let artifact = PrintRenderer
            .render(&sample_document(), &BrandingAssets::none())
            .unwrap();

        assert_eq!(artifact.file_name, "lancamentos_caixa_202506.html");
        assert_eq!(artifact.pages, 1);
    }

    #[test]
    fn test_html_structure() {
        let html = build_html(&sample_document());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<meta charset=\"utf-8\">"));
        assert!(html.contains("<h2>Receitas</h2>"));
        assert!(html.contains("<h2>Despesas</h2>"));
        assert!(html.contains("R$ 1.234,56"));
        assert!(html.contains("window.print()"));
        assert!(html.contains("window.close()"));
    }

    #[test]
    fn test_item_text_is_escaped() {
        let html = build_html(&sample_document());

        assert!(html.contains("Estudo &lt;técnico&gt; &amp; laudo"));
        assert!(!html.contains("<técnico>"));
    }

    #[test]
    fn test_totals_rendered_per_section() {
        let html = build_html(&sample_document());
        assert_eq!(html.matches("class=\"total\"").count(), 2);
        assert!(html.contains("R$ 0,00"));
    }
}
