use std::borrow::Cow;

use crate::fonts::{StandardFont, encode_pdf_string};
use crate::geometry::{Rgb, lighten, parse_hex_color, px_to_pt};
use crate::images::ImageKey;
use crate::model::{
    FieldToken, LeaderStyle, Line, MarkerRun, Run, TrackChangeKind, TrackedChange,
    TrackedChangesMode,
};

use super::{PageContext, PageFields};
use super::content::ContentStream;

pub(super) const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

const BLACK: Rgb = [0, 0, 0];

const INSERT_FILL: Rgb = [0xe6, 0xf4, 0xec];
const INSERT_STROKE: Rgb = [0x00, 0x85, 0x3d];
const DELETE_FILL: Rgb = [0xfa, 0xe7, 0xed];
const DELETE_STROKE: Rgb = [0xcb, 0x0e, 0x47];
const FORMAT_FILL: Rgb = [0xfd, 0xf3, 0xe0];
const FORMAT_STROKE: Rgb = [0xc2, 0x7c, 0x0e];

const COMMENT_INTERNAL: Rgb = [0x07, 0x83, 0x83];
const COMMENT_EXTERNAL: Rgb = [0xb1, 0x12, 0x4b];
const COMMENT_LIGHTEN: f32 = 0.75;

/// Which rule a tracked change draws over its text, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChangeRule {
    None,
    Strike,
    Underline,
}

#[derive(Clone, Copy, Debug)]
struct TrackedStyle {
    fill: Rgb,
    stroke: Rgb,
    rule: ChangeRule,
}

/// Decoration for a tracked change under a given display mode. Only review
/// mode marks changes up; the other modes show already-resolved text plain.
fn tracked_style(kind: TrackChangeKind, mode: TrackedChangesMode) -> Option<TrackedStyle> {
    match (mode, kind) {
        (TrackedChangesMode::Review, TrackChangeKind::Insert) => Some(TrackedStyle {
            fill: INSERT_FILL,
            stroke: INSERT_STROKE,
            rule: ChangeRule::None,
        }),
        (TrackedChangesMode::Review, TrackChangeKind::Delete) => Some(TrackedStyle {
            fill: DELETE_FILL,
            stroke: DELETE_STROKE,
            rule: ChangeRule::Strike,
        }),
        (TrackedChangesMode::Review, TrackChangeKind::Format) => Some(TrackedStyle {
            fill: FORMAT_FILL,
            stroke: FORMAT_STROKE,
            rule: ChangeRule::Underline,
        }),
        (TrackedChangesMode::Original | TrackedChangesMode::Final | TrackedChangesMode::Off, _) => {
            None
        }
    }
}

/// Replace field-token run text with this page's values. Borrows when the
/// paragraph has no tokens.
pub(super) fn substitute_fields<'r>(runs: &'r [Run], fields: &PageFields) -> Cow<'r, [Run]> {
    let has_tokens = runs
        .iter()
        .any(|r| matches!(r, Run::Text(t) if t.token.is_some()));
    if !has_tokens {
        return Cow::Borrowed(runs);
    }
    let substituted: Vec<Run> = runs
        .iter()
        .map(|run| match run {
            Run::Text(t) if t.token.is_some() => {
                let mut r = t.clone();
                match t.token {
                    Some(FieldToken::PageNumber) => r.text = fields.number_text.clone(),
                    Some(FieldToken::TotalPageCount) => {
                        if let Some(total) = fields.total_pages {
                            r.text = total.to_string();
                        }
                    }
                    None => {}
                }
                Run::Text(r)
            }
            other => other.clone(),
        })
        .collect();
    Cow::Owned(substituted)
}

fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// A run clipped to the character range that falls on one line.
pub(super) struct RunSlice {
    pub(super) run_index: usize,
    pub(super) run: Run,
}

impl RunSlice {
    fn text(&self) -> &str {
        match &self.run {
            Run::Text(t) => &t.text,
            Run::Tab(t) => &t.text,
            Run::Image(_) | Run::LineBreak(_) => "",
        }
    }
}

/// Clip the paragraph runs to `[from, to)` of `line`. Partial text runs are
/// cloned with their text and source positions narrowed; tab runs survive
/// only if the slice still holds the tab character.
pub(super) fn slice_runs(runs: &[Run], line: &Line) -> Vec<RunSlice> {
    let mut out = Vec::new();
    for run_index in line.from_run..=line.to_run {
        let Some(run) = runs.get(run_index) else {
            break;
        };
        let len = run.char_len();
        let start = if run_index == line.from_run { line.from_char.min(len) } else { 0 };
        let end = if run_index == line.to_run { line.to_char.min(len) } else { len };
        match run {
            Run::Text(t) => {
                if t.token.is_some() {
                    out.push(RunSlice { run_index, run: run.clone() });
                    continue;
                }
                if start >= end {
                    continue;
                }
                if start == 0 && end == len {
                    out.push(RunSlice { run_index, run: run.clone() });
                    continue;
                }
                let mut clipped = t.clone();
                clipped.text = char_slice(&t.text, start, end);
                clipped.pm_start = t.pm_start.map(|p| p + start);
                clipped.pm_end = t.pm_start.map(|p| p + end);
                out.push(RunSlice { run_index, run: Run::Text(clipped) });
            }
            Run::Tab(t) => {
                let text = char_slice(&t.text, start, end);
                if text.contains('\t') {
                    let mut clipped = t.clone();
                    clipped.text = text;
                    out.push(RunSlice { run_index, run: Run::Tab(clipped) });
                }
            }
            Run::Image(_) => {
                let ends_before = run_index == line.to_run && line.to_char == 0 && line.to_run > line.from_run;
                if !ends_before {
                    out.push(RunSlice { run_index, run: run.clone() });
                }
            }
            Run::LineBreak(_) => {}
        }
    }
    out
}

/// Font size (px) of the first text on the line; the unit `Tw` and the text
/// matrix are expressed in.
pub(super) fn base_font_px(slices: &[RunSlice]) -> f32 {
    slices
        .iter()
        .find_map(|s| match &s.run {
            Run::Text(t) if t.font_size > 0.0 => Some(t.font_size),
            _ => None,
        })
        .or_else(|| slices.iter().find_map(|s| s.run.font_size()))
        .filter(|fs| *fs > 0.0)
        .unwrap_or(DEFAULT_FONT_SIZE_PX)
}

/// Spaces between words on the line; trailing spaces do not stretch.
pub(super) fn interior_space_count(slices: &[RunSlice]) -> usize {
    let text: String = slices
        .iter()
        .filter(|s| matches!(s.run, Run::Text(_)))
        .map(|s| s.text())
        .collect();
    text.trim_end().chars().filter(|c| *c == ' ').count()
}

fn count_spaces(text: &str) -> usize {
    text.chars().filter(|c| *c == ' ').count()
}

fn tracked_change(run: &Run) -> Option<&TrackedChange> {
    match run {
        Run::Text(t) => t.tracked_change.as_ref(),
        Run::Tab(t) => t.tracked_change.as_ref(),
        Run::Image(_) | Run::LineBreak(_) => None,
    }
}

/// Where a paragraph's lines come from and how tracked changes display.
pub(super) struct ParagraphScope<'a> {
    pub(super) runs: &'a [Run],
    pub(super) block_id: &'a str,
    pub(super) item_id: Option<&'a str>,
    pub(super) tracked_mode: TrackedChangesMode,
}

/// Horizontal placement of one line, in page pixels.
pub(super) struct LineFrame {
    pub(super) x: f32,
    pub(super) top: f32,
    /// Extra advance per space when justifying.
    pub(super) extra_per_space: f32,
    /// `Tw` operand (extra space over the base font size), when justifying.
    pub(super) word_spacing: Option<f32>,
}

/// A positioned piece of the line: a measured segment, or a whole run slice
/// when the line carries no segments.
struct Piece<'r> {
    run_index: usize,
    run: Cow<'r, Run>,
    text: String,
    x: f32,
    width: f32,
    pinned: bool,
}

fn layout_pieces<'r>(
    runs: &'r [Run],
    line: &Line,
    slices: &'r [RunSlice],
    frame: &LineFrame,
) -> Vec<Piece<'r>> {
    let mut cursor = frame.x;
    let mut pieces = Vec::new();
    if let Some(segments) = line.segments.as_ref().filter(|s| !s.is_empty()) {
        for seg in segments {
            let Some(run) = runs.get(seg.run_index) else {
                continue;
            };
            let text = match run {
                Run::Text(t) if t.token.is_some() => t.text.clone(),
                Run::Text(t) => char_slice(&t.text, seg.from_char, seg.to_char),
                Run::Tab(t) => char_slice(&t.text, seg.from_char, seg.to_char),
                Run::Image(_) | Run::LineBreak(_) => String::new(),
            };
            let x = seg.x.map(|sx| frame.x + sx).unwrap_or(cursor);
            let width = seg.width + count_spaces(&text) as f32 * frame.extra_per_space;
            cursor = x + width;
            pieces.push(Piece {
                run_index: seg.run_index,
                run: Cow::Borrowed(run),
                text,
                x,
                width,
                pinned: seg.x.is_some(),
            });
        }
        return pieces;
    }

    // No measured segments: share the line width out by character count.
    let image_width: f32 = slices
        .iter()
        .filter_map(|s| match &s.run {
            Run::Image(img) => Some(img.width),
            _ => None,
        })
        .sum();
    let total_chars: usize = slices.iter().map(|s| s.text().chars().count()).sum();
    let text_width = (line.width - image_width).max(0.0);
    for slice in slices {
        let text = slice.text().to_string();
        let natural = match &slice.run {
            Run::Image(img) => img.width,
            _ if total_chars > 0 => text_width * text.chars().count() as f32 / total_chars as f32,
            _ => 0.0,
        };
        let width = natural + count_spaces(&text) as f32 * frame.extra_per_space;
        pieces.push(Piece {
            run_index: slice.run_index,
            run: Cow::Borrowed(&slice.run),
            text,
            x: cursor,
            width,
            pinned: false,
        });
        cursor += width;
    }
    pieces
}

/// Paint one measured line: background decorations, tab leaders and bars,
/// glyphs, then underline/strike rules and inline images.
pub(super) fn render_line(
    out: &mut ContentStream,
    ctx: &PageContext<'_>,
    scope: &ParagraphScope<'_>,
    line: &Line,
    slices: &[RunSlice],
    frame: &LineFrame,
) {
    let pieces = layout_pieces(scope.runs, line, slices, frame);
    let baseline = frame.top + line.ascent;
    let top_pt = ctx.y(frame.top);
    let bottom_pt = ctx.y(frame.top + line.line_height);
    let band_h = px_to_pt(line.line_height);

    // Run highlights
    for piece in &pieces {
        if let Run::Text(t) = &*piece.run
            && let Some(color) = t.highlight.as_deref().and_then(parse_hex_color)
            && piece.width > 0.0
        {
            out.fill_rect(color, px_to_pt(piece.x), bottom_pt, px_to_pt(piece.width), band_h);
        }
    }

    // Tracked changes
    if scope.tracked_mode != TrackedChangesMode::Off {
        for piece in &pieces {
            let Some(change) = tracked_change(&*piece.run) else {
                continue;
            };
            let Some(style) = tracked_style(change.kind, scope.tracked_mode) else {
                continue;
            };
            if piece.width <= 0.0 {
                continue;
            }
            let x0 = px_to_pt(piece.x);
            let x1 = px_to_pt(piece.x + piece.width);
            out.fill_rect(style.fill, x0, bottom_pt, x1 - x0, band_h);
            let font_px = piece.run.font_size().unwrap_or(DEFAULT_FONT_SIZE_PX);
            let rule_y = match style.rule {
                ChangeRule::None => None,
                ChangeRule::Strike => Some(ctx.y(baseline - font_px * 0.3)),
                ChangeRule::Underline => Some(ctx.y(baseline + (line.descent * 0.5).max(1.0))),
            };
            if let Some(y) = rule_y {
                out.stroke_line(style.stroke, px_to_pt(1.0), &[], (x0, y), (x1, y));
            }
        }
    }

    // Comment highlights
    for piece in &pieces {
        let Run::Text(t) = &*piece.run else {
            continue;
        };
        if t.comments.is_empty() || piece.width <= 0.0 {
            continue;
        }
        let base = if t.comments.iter().any(|c| c.internal) {
            COMMENT_INTERNAL
        } else {
            COMMENT_EXTERNAL
        };
        out.fill_rect(
            lighten(base, COMMENT_LIGHTEN),
            px_to_pt(piece.x),
            bottom_pt,
            px_to_pt(piece.width),
            band_h,
        );
    }

    let base_px = base_font_px(slices);
    render_leaders_and_bars(out, ctx, line, frame, baseline, base_px, top_pt, bottom_pt);
    render_glyphs(out, ctx, line, slices, &pieces, frame, baseline, base_px);

    // Underline and strikethrough follow the glyphs.
    for piece in &pieces {
        let Run::Text(t) = &*piece.run else {
            continue;
        };
        if !(t.underline || t.strike) || piece.text.trim().is_empty() {
            continue;
        }
        let color = t.color.as_deref().and_then(parse_hex_color).unwrap_or(BLACK);
        let thick = px_to_pt((t.font_size * 0.06).max(1.0));
        let x0 = px_to_pt(piece.x);
        let x1 = px_to_pt(piece.x + piece.width);
        if t.underline {
            let y = ctx.y(baseline + (t.font_size * 0.1).max(1.0));
            out.stroke_line(color, thick, &[], (x0, y), (x1, y));
        }
        if t.strike {
            let y = ctx.y(baseline - t.font_size * 0.3);
            out.stroke_line(color, thick, &[], (x0, y), (x1, y));
        }
    }

    // Inline images sit on the baseline.
    for piece in &pieces {
        let Run::Image(img) = &*piece.run else {
            continue;
        };
        let key = ImageKey::Run {
            block_id: scope.block_id.to_string(),
            item_id: scope.item_id.map(str::to_string),
            run_index: piece.run_index,
        };
        let Some(resource) = ctx.images.get(&key) else {
            log::debug!("Inline image run {} in {} has no resource; skipped", piece.run_index, scope.block_id);
            continue;
        };
        out.save_state()
            .transform([
                px_to_pt(img.width),
                0.0,
                0.0,
                px_to_pt(img.height),
                px_to_pt(piece.x),
                ctx.y(baseline),
            ])
            .x_object(&resource.name)
            .restore_state();
    }
}

#[allow(clippy::too_many_arguments)]
fn render_leaders_and_bars(
    out: &mut ContentStream,
    ctx: &PageContext<'_>,
    line: &Line,
    frame: &LineFrame,
    baseline: f32,
    base_px: f32,
    top_pt: f32,
    bottom_pt: f32,
) {
    for leader in line.leaders.iter().flatten() {
        if leader.to <= leader.from {
            continue;
        }
        let x0 = px_to_pt(frame.x + leader.from);
        let x1 = px_to_pt(frame.x + leader.to);
        let (y, width, dashes, round) = match leader.style {
            LeaderStyle::Dot => (ctx.y(baseline - 1.0), px_to_pt(1.0), vec![0.75, 2.25], true),
            LeaderStyle::MiddleDot => (
                ctx.y(baseline - base_px * 0.3),
                px_to_pt(1.0),
                vec![0.75, 2.25],
                true,
            ),
            LeaderStyle::Hyphen => (
                ctx.y(baseline - base_px * 0.3),
                px_to_pt(1.0),
                vec![3.0, 2.0],
                false,
            ),
            LeaderStyle::Underscore => (ctx.y(baseline + 1.0), px_to_pt(1.0), vec![], false),
            LeaderStyle::Heavy => (ctx.y(baseline + 1.0), px_to_pt(2.0), vec![], false),
        };
        out.save_state().set_stroke_rgb(BLACK).set_line_width(width);
        if round {
            out.set_line_cap(1);
        }
        if !dashes.is_empty() {
            out.set_dash(&dashes);
        }
        out.move_to(x0, y).line_to(x1, y).stroke().restore_state();
    }

    for bar in line.bars.iter().flatten() {
        let x = px_to_pt(frame.x + bar.x);
        out.stroke_line(BLACK, px_to_pt(1.0), &[], (x, top_pt), (x, bottom_pt));
    }
}

/// Running text state inside one `BT`/`ET` block.
struct TextState {
    font: Option<(StandardFont, f32)>,
    color: Option<Rgb>,
}

impl TextState {
    fn apply(&mut self, out: &mut ContentStream, font: StandardFont, ratio: f32, color: Rgb) {
        if self.font != Some((font, ratio)) {
            out.set_font(font.resource_name(), ratio);
            self.font = Some((font, ratio));
        }
        if self.color != Some(color) {
            out.set_fill_rgb(color);
            self.color = Some(color);
        }
    }
}

fn text_style(run: &Run, base_px: f32) -> Option<(StandardFont, f32, Rgb)> {
    let Run::Text(t) = run else {
        return None;
    };
    let font = StandardFont::select(t.bold, t.italic);
    let size = if t.font_size > 0.0 { t.font_size } else { base_px };
    let color = t.color.as_deref().and_then(parse_hex_color).unwrap_or(BLACK);
    Some((font, size / base_px, color))
}

#[allow(clippy::too_many_arguments)]
fn render_glyphs(
    out: &mut ContentStream,
    ctx: &PageContext<'_>,
    line: &Line,
    slices: &[RunSlice],
    pieces: &[Piece<'_>],
    frame: &LineFrame,
    baseline: f32,
    base_px: f32,
) {
    let paints_text = |run: &Run, text: &str| matches!(run, Run::Text(_)) && !text.is_empty();
    let has_text = if line.has_explicit_positions() {
        pieces.iter().any(|p| paints_text(&*p.run, &p.text))
    } else {
        slices.iter().any(|s| paints_text(&s.run, s.text()))
    };
    if !has_text {
        return;
    }

    let scale = px_to_pt(base_px);
    let baseline_pt = ctx.y(baseline);
    let mut state = TextState { font: None, color: None };

    out.begin_text();
    if let Some(tw) = frame.word_spacing {
        out.set_word_spacing(tw);
    }
    out.set_text_matrix(scale, px_to_pt(frame.x), baseline_pt);

    if line.has_explicit_positions() {
        // Tab-aligned text: pinned segments get an absolute matrix, the rest
        // continue from wherever the previous glyphs left the cursor.
        for piece in pieces {
            if !paints_text(&*piece.run, &piece.text) {
                continue;
            }
            let Some((font, ratio, color)) = text_style(&*piece.run, base_px) else {
                continue;
            };
            if piece.pinned {
                out.set_text_matrix(scale, px_to_pt(piece.x), baseline_pt);
            }
            state.apply(out, font, ratio, color);
            out.show(&encode_pdf_string(&piece.text));
        }
    } else {
        for slice in slices {
            let text = slice.text();
            if !paints_text(&slice.run, text) {
                continue;
            }
            let Some((font, ratio, color)) = text_style(&slice.run, base_px) else {
                continue;
            };
            state.apply(out, font, ratio, color);
            out.show(&encode_pdf_string(text));
        }
    }
    if frame.word_spacing.is_some() {
        out.set_word_spacing(0.0);
    }
    out.end_text();
}

/// Paint a numbering marker with its own text matrix at `(x, baseline)`.
pub(super) fn render_marker(
    out: &mut ContentStream,
    ctx: &PageContext<'_>,
    text: &str,
    style: &MarkerRun,
    fallback_font_px: f32,
    x: f32,
    baseline: f32,
) {
    if text.is_empty() {
        return;
    }
    let size_px = style.font_size.filter(|s| *s > 0.0).unwrap_or(fallback_font_px);
    let font = StandardFont::select(style.bold, style.italic);
    let color = style.color.as_deref().and_then(parse_hex_color).unwrap_or(BLACK);
    out.begin_text()
        .set_font(font.resource_name(), 1.0)
        .set_fill_rgb(color)
        .set_text_matrix(px_to_pt(size_px), px_to_pt(x), ctx.y(baseline))
        .show(&encode_pdf_string(text))
        .end_text();
}
