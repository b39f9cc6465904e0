use crate::error::Error;
use crate::geometry::{px_to_pt, y_to_pt};
use crate::images::ImageTable;
use crate::lookup::BlockLookup;
use crate::model::{Fragment, ImageFragment, Page, PageDecoration};

use super::content::ContentStream;
use super::drawing::{GraphicsStates, render_drawing_fragment};
use super::paragraph::{render_list_item_fragment, render_paragraph_fragment};
use super::table::render_table_fragment;
use super::PLACEHOLDER_GRAY;

/// Page fields substituted into token runs.
#[derive(Clone, Debug)]
pub(crate) struct PageFields {
    pub(crate) number_text: String,
    pub(crate) total_pages: Option<usize>,
}

impl PageFields {
    pub(crate) fn for_page(page: &Page, total_pages: Option<usize>) -> Self {
        PageFields {
            number_text: page
                .number_text
                .clone()
                .unwrap_or_else(|| page.number.to_string()),
            total_pages,
        }
    }
}

/// Everything a fragment renderer needs to know about the page it paints on.
pub(crate) struct PageContext<'a> {
    pub(crate) lookup: &'a BlockLookup,
    pub(crate) images: &'a ImageTable,
    pub(crate) page_height_px: f32,
    pub(crate) fields: PageFields,
}

impl PageContext<'_> {
    /// Page-pixel y to PDF points from the bottom edge.
    pub(crate) fn y(&self, y_px: f32) -> f32 {
        y_to_pt(self.page_height_px, y_px)
    }
}

/// Header fragments moved into their band at the top of the page.
pub(crate) fn place_header(header: &PageDecoration) -> Vec<Fragment> {
    let dx = header.margin_left.unwrap_or(0.0);
    let dy = header.offset.unwrap_or(0.0);
    header.fragments.iter().map(|f| f.translated(dx, dy)).collect()
}

/// Footer fragments moved into their band and pushed to its bottom edge.
///
/// Footer content is laid out top-anchored; the gap between its measured
/// height and the band height is added so it sits on the band's bottom.
pub(crate) fn place_footer(footer: &PageDecoration, page_height_px: f32, lookup: &BlockLookup) -> Vec<Fragment> {
    let band = footer.offset.unwrap_or(page_height_px - footer.height);
    let content_height = footer.content_height.unwrap_or_else(|| {
        footer
            .fragments
            .iter()
            .map(|f| f.y() + lookup.fragment_height(f))
            .fold(0.0, f32::max)
    });
    let inner = (footer.height - content_height).max(0.0);
    let dx = footer.margin_left.unwrap_or(0.0);
    footer
        .fragments
        .iter()
        .map(|f| f.translated(dx, band + inner))
        .collect()
}

fn render_image_fragment(out: &mut ContentStream, ctx: &PageContext<'_>, frag: &ImageFragment) -> Result<(), Error> {
    ctx.lookup.image(&frag.block_id)?;
    let (x, y) = (px_to_pt(frag.x), ctx.y(frag.y + frag.height));
    let (w, h) = (px_to_pt(frag.width), px_to_pt(frag.height));
    match ctx.images.for_block(&frag.block_id) {
        Some(resource) => {
            out.save_state()
                .transform([w, 0.0, 0.0, h, x, y])
                .x_object(&resource.name)
                .restore_state();
        }
        None => {
            log::debug!("Image {} has no embeddable resource; drawing placeholder", frag.block_id);
            out.fill_rect(PLACEHOLDER_GRAY, x, y, w, h);
        }
    }
    Ok(())
}

fn render_fragment(
    out: &mut ContentStream,
    ctx: &PageContext<'_>,
    gstates: &mut GraphicsStates,
    fragment: &Fragment,
) -> Result<(), Error> {
    match fragment {
        Fragment::Para(f) => render_paragraph_fragment(out, ctx, f)?,
        Fragment::ListItem(f) => render_list_item_fragment(out, ctx, f)?,
        Fragment::Image(f) => render_image_fragment(out, ctx, f)?,
        Fragment::Drawing(f) => render_drawing_fragment(out, ctx, gstates, f),
        Fragment::Table(f) => render_table_fragment(out, ctx, f),
    }
    Ok(())
}

/// Content stream for one page: header, body, then footer fragments.
pub(crate) fn render_page(
    ctx: &PageContext<'_>,
    gstates: &mut GraphicsStates,
    page: &Page,
    header: Option<&PageDecoration>,
    footer: Option<&PageDecoration>,
) -> Result<ContentStream, Error> {
    let mut out = ContentStream::new();
    if let Some(header) = header {
        for fragment in &place_header(header) {
            render_fragment(&mut out, ctx, gstates, fragment)?;
        }
    }
    for fragment in &page.fragments {
        render_fragment(&mut out, ctx, gstates, fragment)?;
    }
    if let Some(footer) = footer {
        for fragment in &place_footer(footer, ctx.page_height_px, ctx.lookup) {
            render_fragment(&mut out, ctx, gstates, fragment)?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Measure};
    use serde_json::json;

    fn footer_lookup() -> BlockLookup {
        let block: Block =
            serde_json::from_value(json!({ "kind": "paragraph", "id": "f1", "runs": [] })).unwrap();
        let measure: Measure = serde_json::from_value(json!({
            "kind": "paragraph",
            "lines": [{ "fromRun": 0, "fromChar": 0, "toRun": 0, "toChar": 0, "width": 0,
                        "ascent": 12, "descent": 4, "lineHeight": 16 }],
            "totalHeight": 16
        }))
        .unwrap();
        BlockLookup::new(vec![block], vec![measure]).unwrap()
    }

    fn footer(content_height: Option<f32>) -> PageDecoration {
        PageDecoration {
            fragments: vec![
                serde_json::from_value(json!({
                    "kind": "para", "blockId": "f1", "fromLine": 0, "toLine": 1,
                    "x": 10, "y": 2, "width": 200
                }))
                .unwrap(),
            ],
            height: 50.0,
            content_height,
            offset: None,
            margin_left: Some(40.0),
        }
    }

    #[test]
    fn footer_sits_on_band_bottom() {
        let lookup = footer_lookup();
        let placed = place_footer(&footer(None), 500.0, &lookup);
        // band at 450, content 2 + 16 leaves 32 below it
        assert_eq!(placed[0].y(), 2.0 + 450.0 + 32.0);
        let Fragment::Para(p) = &placed[0] else { panic!("expected para") };
        assert_eq!(p.x, 50.0);
    }

    #[test]
    fn explicit_content_height_wins() {
        let lookup = footer_lookup();
        let placed = place_footer(&footer(Some(60.0)), 500.0, &lookup);
        assert_eq!(placed[0].y(), 452.0);
    }

    #[test]
    fn header_uses_offset_and_margin() {
        let mut header = footer(None);
        header.offset = Some(24.0);
        let placed = place_header(&header);
        assert_eq!(placed[0].y(), 26.0);
        assert_eq!(placed[0].block_id(), "f1");
    }
}
