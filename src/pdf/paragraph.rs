use crate::error::Error;
use crate::geometry::{Rgb, dash_pattern, parse_hex_color, px_to_pt};
use crate::model::{
    Alignment, BorderSpec, Line, ListItemFragment, MarkerJustification, ParaFragment,
    ParagraphAttrs, ParagraphBlock, ParagraphIndent,
};

use super::PageContext;
use super::content::ContentStream;
use super::text::{
    DEFAULT_FONT_SIZE_PX, LineFrame, ParagraphScope, base_font_px, interior_space_count,
    render_line, render_marker, slice_runs, substitute_fields,
};

/// Gap between a list marker's box and the item text, in pixels.
pub(crate) const LIST_MARKER_GAP: f32 = 8.0;

const DEFAULT_BORDER_COLOR: Rgb = [0, 0, 0];

/// How the lines of one fragment are laid out horizontally.
struct LinesLayout<'a> {
    block: &'a ParagraphBlock,
    block_id: &'a str,
    item_id: Option<&'a str>,
    /// Left edge of the text column before indents.
    origin_x: f32,
    available: f32,
    /// First-line/hanging indents; `None` for list items, whose marker
    /// gutter already accounts for them.
    indent: Option<ParagraphIndent>,
    alignment: Alignment,
    justify: bool,
}

fn align_offset(alignment: Alignment, available: f32, line_width: f32) -> f32 {
    let slack = (available - line_width).max(0.0);
    match alignment {
        Alignment::Center => slack / 2.0,
        Alignment::Right => slack,
        Alignment::Left | Alignment::Justify => 0.0,
    }
}

/// Paint `lines[from..to]` of a measured paragraph starting at `top`.
fn render_lines(
    out: &mut ContentStream,
    ctx: &PageContext<'_>,
    layout: &LinesLayout<'_>,
    lines: &[Line],
    from_line: usize,
    to_line: usize,
    top: f32,
) {
    let end = to_line.min(lines.len());
    let start = from_line.min(end);
    let runs = substitute_fields(&layout.block.runs, &ctx.fields);
    let scope = ParagraphScope {
        runs: &runs,
        block_id: layout.block_id,
        item_id: layout.item_id,
        tracked_mode: layout.block.attrs.effective_tracked_changes_mode(),
    };
    // The last measured line is exempt from justification unless a trailing
    // break pushed the real last line past it.
    let exempt_last = !layout.block.ends_with_line_break();

    let mut line_top = top;
    for (index, line) in lines.iter().enumerate().take(end).skip(start) {
        let slices = slice_runs(&runs, line);
        let indent_offset = match layout.indent {
            Some(indent) if index == 0 => indent.first_line - indent.hanging,
            Some(indent) => -indent.hanging,
            None => 0.0,
        };
        let is_last_line = index + 1 == lines.len();
        let justify = layout.justify
            && !line.has_explicit_positions()
            && !line.skip_justify
            && !(is_last_line && exempt_last);
        let spaces = interior_space_count(&slices);

        let mut frame = LineFrame {
            x: layout.origin_x + indent_offset + align_offset(layout.alignment, layout.available, line.width),
            top: line_top,
            extra_per_space: 0.0,
            word_spacing: None,
        };
        if justify && spaces > 0 && layout.available > line.width {
            let extra = (layout.available - line.width) / spaces as f32;
            frame.extra_per_space = extra;
            frame.word_spacing = Some(extra / base_font_px(&slices));
        }
        render_line(out, ctx, &scope, line, &slices, &frame);
        line_top += line.line_height;
    }
}

/// Background fill and border box behind a fragment.
fn render_box(
    out: &mut ContentStream,
    ctx: &PageContext<'_>,
    attrs: &ParagraphAttrs,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) {
    if height <= 0.0 || width <= 0.0 {
        return;
    }
    if let Some(fill) = attrs
        .shading
        .as_ref()
        .and_then(|s| s.fill.as_deref())
        .and_then(parse_hex_color)
    {
        out.fill_rect(fill, px_to_pt(x), ctx.y(y + height), px_to_pt(width), px_to_pt(height));
    }

    let Some(borders) = attrs.borders.as_ref() else {
        return;
    };
    let (left, right) = (px_to_pt(x), px_to_pt(x + width));
    let (top, bottom) = (ctx.y(y), ctx.y(y + height));
    let sides: [(&Option<BorderSpec>, (f32, f32), (f32, f32)); 4] = [
        (&borders.top, (left, top), (right, top)),
        (&borders.right, (right, top), (right, bottom)),
        (&borders.bottom, (left, bottom), (right, bottom)),
        (&borders.left, (left, top), (left, bottom)),
    ];
    for (spec, from, to) in sides {
        let Some(spec) = spec else { continue };
        let width_pt = px_to_pt(spec.width.unwrap_or(1.0));
        if width_pt <= 0.0 {
            continue;
        }
        let Some(dashes) = dash_pattern(spec.style.as_deref(), width_pt) else {
            continue;
        };
        let color = spec
            .color
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(DEFAULT_BORDER_COLOR);
        out.stroke_line(color, width_pt, &dashes, from, to);
    }
}

fn justified_marker_x(justification: MarkerJustification, box_x: f32, box_width: f32, text_width: f32) -> f32 {
    match justification {
        MarkerJustification::Left => box_x,
        MarkerJustification::Center => box_x + (box_width - text_width) / 2.0,
        MarkerJustification::Right => box_x + box_width - text_width,
    }
}

fn first_line_font_px(block: &ParagraphBlock, lines: &[Line], from_line: usize) -> f32 {
    lines
        .get(from_line)
        .map(|line| base_font_px(&slice_runs(&block.runs, line)))
        .unwrap_or(DEFAULT_FONT_SIZE_PX)
}

pub(super) fn render_paragraph_fragment(
    out: &mut ContentStream,
    ctx: &PageContext<'_>,
    frag: &ParaFragment,
) -> Result<(), Error> {
    let (block, measure) = ctx.lookup.paragraph(&frag.block_id)?;
    let attrs = &block.attrs;
    let indent = attrs.indent();
    let left = indent.left.max(0.0);
    let right = indent.right.max(0.0);
    let available = (frag.width - left - right).max(1.0);
    let alignment = attrs.alignment.unwrap_or_default();
    let height = measure.range_height(frag.from_line, frag.to_line);

    render_box(out, ctx, attrs, frag.x, frag.y, frag.width, height);

    let layout = LinesLayout {
        block,
        block_id: &block.id,
        item_id: None,
        origin_x: frag.x + left,
        available,
        indent: Some(indent),
        alignment,
        justify: alignment == Alignment::Justify,
    };
    render_lines(out, ctx, &layout, &measure.lines, frag.from_line, frag.to_line, frag.y);

    if frag.continues_from_prev {
        return Ok(());
    }
    let Some(marker) = attrs.marker() else {
        return Ok(());
    };
    let gutter = frag
        .marker_width
        .or_else(|| measure.marker.as_ref().map(|m| m.marker_width))
        .unwrap_or(0.0);
    let text_width = measure
        .marker
        .as_ref()
        .map(|m| m.marker_text_width)
        .unwrap_or(0.0);
    let text_start = frag.x + left + indent.first_line - indent.hanging;
    let x = justified_marker_x(marker.justification, text_start - gutter, gutter, text_width);
    let ascent = measure.lines.get(frag.from_line).map(|l| l.ascent).unwrap_or(0.0);
    let fallback_px = first_line_font_px(block, &measure.lines, frag.from_line);
    render_marker(out, ctx, &marker.marker_text, &marker.run, fallback_px, x, frag.y + ascent);
    Ok(())
}

pub(super) fn render_list_item_fragment(
    out: &mut ContentStream,
    ctx: &PageContext<'_>,
    frag: &ListItemFragment,
) -> Result<(), Error> {
    let (list, list_measure) = ctx.lookup.list(&frag.block_id)?;
    let item = list
        .items
        .iter()
        .find(|i| i.id == frag.item_id)
        .ok_or_else(|| Error::MissingListItem {
            block_id: frag.block_id.clone(),
            item_id: frag.item_id.clone(),
        })?;
    let item_measure = list_measure
        .items
        .iter()
        .find(|m| m.item_id == frag.item_id)
        .ok_or_else(|| Error::MissingListItemMeasure {
            block_id: frag.block_id.clone(),
            item_id: frag.item_id.clone(),
        })?;
    let paragraph = &item.paragraph;
    let measure = &item_measure.paragraph;
    let content_x = frag.x + frag.marker_width;
    let content_width = (frag.width - frag.marker_width).max(1.0);
    let height = measure.range_height(frag.from_line, frag.to_line);

    render_box(out, ctx, &paragraph.attrs, content_x, frag.y, content_width, height);

    let layout = LinesLayout {
        block: paragraph,
        block_id: &list.id,
        item_id: Some(&item.id),
        origin_x: content_x,
        available: content_width,
        indent: None,
        alignment: Alignment::Left,
        justify: false,
    };
    render_lines(out, ctx, &layout, &measure.lines, frag.from_line, frag.to_line, frag.y);

    if frag.continues_from_prev || item.marker.text.is_empty() {
        return Ok(());
    }
    let box_width = (content_x - LIST_MARKER_GAP - frag.x).max(0.0);
    let x = justified_marker_x(
        item.marker.justification,
        frag.x,
        box_width,
        item_measure.marker_text_width,
    );
    let ascent = measure.lines.get(frag.from_line).map(|l| l.ascent).unwrap_or(0.0);
    let fallback_px = first_line_font_px(paragraph, &measure.lines, frag.from_line);
    render_marker(out, ctx, &item.marker.text, &item.marker.run, fallback_px, x, frag.y + ascent);
    Ok(())
}
