//! Multi-page PDF document assembly

use crate::page::PageRenderer;
use crate::style::Palette;
use printpdf::image_crate::{DynamicImage, RgbImage};
use printpdf::{Image, ImageTransform, Mm, PdfDocument, PdfLayerReference};
use rategraph_common::{CurrencyCode, RateGraphError, Result};
use rategraph_store::RatesStore;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Resolution the page buffers are embedded at
const PAGE_DPI: f64 = 96.0;

/// Document metadata descriptor.
///
/// The PDF library fixes the document title at construction time; the
/// remaining descriptor fields are stamped into the title-page footer.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub creator: String,
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self {
            title: "Exchange Rates Charts".to_string(),
            author: "rategraph".to_string(),
            subject: "Historical exchange rate trends".to_string(),
            creator: "rategraph".to_string(),
        }
    }
}

/// Composes the aggregated store into a multi-page PDF: one title page,
/// then one chart page per (base, quote) pair in caller-supplied order.
pub struct ChartsPdfBuilder {
    renderer: PageRenderer,
    base_currencies: Vec<CurrencyCode>,
    quote_currencies: Vec<CurrencyCode>,
    meta: DocumentMeta,
}

impl ChartsPdfBuilder {
    pub fn new(
        style: &str,
        width: u32,
        height: u32,
        base_currencies: Vec<CurrencyCode>,
        quote_currencies: Vec<CurrencyCode>,
        meta: DocumentMeta,
    ) -> Self {
        Self {
            renderer: PageRenderer::new(Palette::named(style), width, height),
            base_currencies,
            quote_currencies,
            meta,
        }
    }

    fn page_size_mm(&self) -> (f64, f64) {
        (
            f64::from(self.renderer.width()) * 25.4 / PAGE_DPI,
            f64::from(self.renderer.height()) * 25.4 / PAGE_DPI,
        )
    }

    /// Generate the PDF for `store` at `file_path`.
    ///
    /// All-or-fail: a missing base series or quote column fails the whole
    /// composition and no usable document is produced.
    #[instrument(skip(self, store), fields(path = %file_path.display()))]
    pub fn compose_pdf(&self, store: &RatesStore, file_path: &Path) -> Result<()> {
        let (page_w, page_h) = self.page_size_mm();
        let (doc, title_page, title_layer) =
            PdfDocument::new(self.meta.title.as_str(), Mm(page_w as f32), Mm(page_h as f32), "title");

        let footer = format!("{} / {}", self.meta.author, self.meta.creator);
        let title_buffer = self.renderer.render_title_page(
            &self.meta.title,
            &self.base_currencies,
            &self.quote_currencies,
            &footer,
        )?;
        self.embed_page(doc.get_page(title_page).get_layer(title_layer), title_buffer)?;

        for base in &self.base_currencies {
            let series = store.series(base).ok_or_else(|| {
                RateGraphError::render(format!(
                    "no aggregated series for base currency `{}`",
                    base
                ))
            })?;
            for quote in &self.quote_currencies {
                let buffer = self.renderer.render_pair(series, base, quote)?;
                let (page, layer) = doc.add_page(
                    Mm(page_w as f32),
                    Mm(page_h as f32),
                    format!("{}-{}", base.ticker(), quote.ticker()),
                );
                self.embed_page(doc.get_page(page).get_layer(layer), buffer)?;
                debug!(base = %base, quote = %quote, "chart page added");
            }
        }

        let file = File::create(file_path)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| RateGraphError::document_with_source("Failed to write PDF", e))?;

        info!(path = %file_path.display(), "data compiled into PDF with charts");
        Ok(())
    }

    /// Place one rendered RGB buffer as a full-bleed page image
    fn embed_page(&self, layer: PdfLayerReference, buffer: Vec<u8>) -> Result<()> {
        let image = RgbImage::from_raw(self.renderer.width(), self.renderer.height(), buffer)
            .ok_or_else(|| RateGraphError::document("Page buffer size mismatch"))?;
        let image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(image));
        image.add_to_layer(
            layer,
            ImageTransform {
                dpi: Some(PAGE_DPI as f32),
                ..Default::default()
            },
        );
        Ok(())
    }
}
