use crate::geometry::{Rgb, px_to_pt};
use crate::model::TableFragment;

use super::PageContext;
use super::content::ContentStream;

const OUTLINE: Rgb = [0xbf, 0xbf, 0xbf];

/// Tables are not laid out cell by cell yet; the fragment's box is outlined
/// so the space it occupies stays visible.
pub(super) fn render_table_fragment(out: &mut ContentStream, ctx: &PageContext<'_>, frag: &TableFragment) {
    if frag.width <= 0.0 || frag.height <= 0.0 {
        return;
    }
    if ctx.lookup.table(&frag.block_id).is_none() {
        log::debug!("Table fragment {} has no table block; outlined anyway", frag.block_id);
    }
    out.save_state()
        .set_stroke_rgb(OUTLINE)
        .set_line_width(px_to_pt(1.0))
        .rect(
            px_to_pt(frag.x),
            ctx.y(frag.y + frag.height),
            px_to_pt(frag.width),
            px_to_pt(frag.height),
        )
        .stroke()
        .restore_state();
}
