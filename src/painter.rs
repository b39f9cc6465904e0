//! Public entry point: pair blocks with measures once, then paint any number
//! of layouts into PDF bytes.

use std::time::Instant;

use serde::Deserialize;

use crate::error::Error;
use crate::geometry::px_to_pt;
use crate::images::{ImageTable, PngRasterDecoder, RasterDecoder, collect_images};
use crate::lookup::BlockLookup;
use crate::model::{Block, Layout, Measure, Page, PageDecoration, PageMargins};
use crate::pdf::{GraphicsStates, PageContext, PageData, PageFields, build_pdf_document, render_page};

/// Media type of the bytes produced by [`PdfPainter::render`].
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Supplies header or footer content per page.
pub trait DecorationProvider: Send + Sync {
    fn decoration(&self, page_number: u32, margins: Option<&PageMargins>) -> Option<PageDecoration>;
}

impl<F> DecorationProvider for F
where
    F: Fn(u32, Option<&PageMargins>) -> Option<PageDecoration> + Send + Sync,
{
    fn decoration(&self, page_number: u32, margins: Option<&PageMargins>) -> Option<PageDecoration> {
        self(page_number, margins)
    }
}

/// The same decoration on every page.
impl DecorationProvider for PageDecoration {
    fn decoration(&self, _page_number: u32, _margins: Option<&PageMargins>) -> Option<PageDecoration> {
        Some(self.clone())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Deflate content streams and raw image planes.
    pub compress_streams: bool,
    /// Decode PNGs that cannot be passed through into raw RGB + soft mask.
    pub raster_fallback: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            compress_streams: false,
            raster_fallback: true,
        }
    }
}

pub struct PdfPainter {
    lookup: BlockLookup,
    header: Option<Box<dyn DecorationProvider>>,
    footer: Option<Box<dyn DecorationProvider>>,
    options: RenderOptions,
    decoder: Option<Box<dyn RasterDecoder>>,
}

impl std::fmt::Debug for PdfPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfPainter")
            .field("blocks", &self.lookup.blocks().len())
            .field("header", &self.header.is_some())
            .field("footer", &self.footer.is_some())
            .field("options", &self.options)
            .field("decoder", &self.decoder.is_some())
            .finish()
    }
}

impl PdfPainter {
    /// Pair `blocks[i]` with `measures[i]`. Fails when the lengths differ.
    pub fn new(blocks: Vec<Block>, measures: Vec<Measure>) -> Result<Self, Error> {
        Ok(PdfPainter {
            lookup: BlockLookup::new(blocks, measures)?,
            header: None,
            footer: None,
            options: RenderOptions::default(),
            decoder: Some(Box::new(PngRasterDecoder)),
        })
    }

    pub fn with_header_provider(mut self, provider: impl DecorationProvider + 'static) -> Self {
        self.header = Some(Box::new(provider));
        self
    }

    pub fn with_footer_provider(mut self, provider: impl DecorationProvider + 'static) -> Self {
        self.footer = Some(Box::new(provider));
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the pixel decoder used for PNGs that cannot be embedded as-is.
    /// `None` leaves such images out.
    pub fn with_raster_decoder(mut self, decoder: Option<Box<dyn RasterDecoder>>) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    fn active_decoder(&self) -> Option<&dyn RasterDecoder> {
        if !self.options.raster_fallback {
            return None;
        }
        self.decoder.as_deref()
    }

    /// Build a fresh image resource table for the painter's blocks.
    pub fn resolve_images(&self) -> ImageTable {
        collect_images(self.lookup.blocks(), self.active_decoder())
    }

    fn page_content(
        &self,
        page: &Page,
        page_height_px: f32,
        images: &ImageTable,
        gstates: &mut GraphicsStates,
        total_pages: Option<usize>,
    ) -> Result<String, Error> {
        let margins = page.margins.as_ref();
        let header = self
            .header
            .as_ref()
            .and_then(|p| p.decoration(page.number, margins));
        let footer = self
            .footer
            .as_ref()
            .and_then(|p| p.decoration(page.number, margins));
        let ctx = PageContext {
            lookup: &self.lookup,
            images,
            page_height_px,
            fields: PageFields::for_page(page, total_pages),
        };
        let content = render_page(&ctx, gstates, page, header.as_ref(), footer.as_ref())?;
        Ok(content.into_string())
    }

    /// Content-stream operators for one page.
    ///
    /// Alpha graphics states used by drawings are numbered from `GS1` within
    /// this page alone; [`render`](Self::render) numbers them per document.
    pub fn build_page_stream(&self, page: &Page, page_height_px: f32, images: &ImageTable) -> Result<String, Error> {
        let mut gstates = GraphicsStates::default();
        self.page_content(page, page_height_px, images, &mut gstates, None)
    }

    /// Paint every page of `layout` and assemble the PDF file.
    pub fn render(&self, layout: &Layout) -> Result<Vec<u8>, Error> {
        let t0 = Instant::now();

        let images = self.resolve_images();
        let t_images = t0.elapsed();

        let total_pages = layout.pages.len();
        let mut gstates = GraphicsStates::default();
        let mut pages = Vec::with_capacity(total_pages);
        for page in &layout.pages {
            let size = page.size.unwrap_or(layout.page_size);
            let content = self.page_content(page, size.h, &images, &mut gstates, Some(total_pages))?;
            pages.push(PageData {
                width_pt: px_to_pt(size.w),
                height_pt: px_to_pt(size.h),
                content,
            });
        }
        let t_streams = t0.elapsed();

        let bytes = build_pdf_document(&pages, &images, &gstates, self.options.compress_streams);
        let t_assembly = t0.elapsed();

        log::info!(
            "Render phases: images={:.1}ms ({} resources), streams={:.1}ms ({} pages), assembly={:.1}ms (output {} bytes)",
            t_images.as_secs_f64() * 1000.0,
            images.len(),
            (t_streams - t_images).as_secs_f64() * 1000.0,
            total_pages,
            (t_assembly - t_streams).as_secs_f64() * 1000.0,
            bytes.len(),
        );

        Ok(bytes)
    }
}

/// Everything needed for one render, as read from a JSON bundle.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderInput {
    pub blocks: Vec<Block>,
    pub measures: Vec<Measure>,
    pub layout: Layout,
    /// Header repeated on every page.
    #[serde(default)]
    pub header: Option<PageDecoration>,
    /// Footer repeated on every page.
    #[serde(default)]
    pub footer: Option<PageDecoration>,
    #[serde(default)]
    pub options: RenderOptions,
}

impl RenderInput {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Split into a configured painter and the layout to paint.
    pub fn into_painter(self) -> Result<(PdfPainter, Layout), Error> {
        let mut painter = PdfPainter::new(self.blocks, self.measures)?.with_options(self.options);
        if let Some(header) = self.header {
            painter = painter.with_header_provider(header);
        }
        if let Some(footer) = self.footer {
            painter = painter.with_footer_provider(footer);
        }
        Ok((painter, self.layout))
    }
}
