use crate::geometry::{Rgb, parse_hex_color, px_to_pt};
use crate::model::{
    DrawingBlock, DrawingFragment, DrawingGeometry, FillValue, GroupChild, ShapeGroupBlock,
    StyledFill, VectorShapeBlock,
};

use super::content::ContentStream;
use super::{PLACEHOLDER_GRAY, PageContext};

/// Control-point distance for a quarter circle drawn as one cubic Bézier.
const KAPPA: f32 = 0.552_284_75;

/// Alpha values rounded to this many steps share one graphics state.
const ALPHA_STEPS: f32 = 1000.0;

/// `/ExtGState` entries requested by drawings, shared across all pages.
#[derive(Debug, Default)]
pub(crate) struct GraphicsStates {
    alphas: Vec<u16>,
}

impl GraphicsStates {
    /// Resource name of a state applying `alpha` to fills and strokes.
    pub(crate) fn alpha_state(&mut self, alpha: f32) -> String {
        let key = (alpha.clamp(0.0, 1.0) * ALPHA_STEPS).round() as u16;
        let index = match self.alphas.iter().position(|a| *a == key) {
            Some(i) => i,
            None => {
                self.alphas.push(key);
                self.alphas.len() - 1
            }
        };
        format!("GS{}", index + 1)
    }

    /// `(name, alpha)` pairs in registration order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (String, f32)> + '_ {
        self.alphas
            .iter()
            .enumerate()
            .map(|(i, a)| (format!("GS{}", i + 1), *a as f32 / ALPHA_STEPS))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ResolvedFill {
    color: Rgb,
    alpha: f32,
}

/// Gradients collapse to their first stop.
fn resolve_fill(value: &FillValue) -> Option<ResolvedFill> {
    match value {
        FillValue::Color(hex) => parse_hex_color(hex).map(|color| ResolvedFill { color, alpha: 1.0 }),
        FillValue::Styled(StyledFill::SolidWithAlpha { color, alpha }) => {
            parse_hex_color(color).map(|color| ResolvedFill {
                color,
                alpha: alpha.clamp(0.0, 1.0),
            })
        }
        FillValue::Styled(StyledFill::Gradient { stops }) => stops
            .first()
            .and_then(|stop| parse_hex_color(&stop.color))
            .map(|color| ResolvedFill { color, alpha: 1.0 }),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ShapePath {
    Rect,
    Ellipse,
    Line,
}

impl ShapePath {
    fn from_kind(kind: Option<&str>) -> Self {
        match kind.map(str::to_ascii_lowercase).as_deref() {
            Some("ellipse" | "oval" | "circle") => ShapePath::Ellipse,
            Some("line" | "straightconnector1") => ShapePath::Line,
            Some("rect" | "rectangle") | None => ShapePath::Rect,
            Some(other) => {
                log::debug!("Shape kind {other:?} drawn as a rectangle");
                ShapePath::Rect
            }
        }
    }
}

/// Paint styling for one path; all lengths in points.
struct ShapeStyle {
    fill: Option<ResolvedFill>,
    stroke: Option<Rgb>,
    stroke_width: f32,
}

impl ShapeStyle {
    fn new(fill: Option<&FillValue>, stroke: Option<&str>, stroke_width: Option<f32>) -> Self {
        ShapeStyle {
            fill: fill.and_then(resolve_fill),
            stroke: stroke.and_then(parse_hex_color),
            stroke_width: px_to_pt(stroke_width.unwrap_or(1.0).max(0.0)),
        }
    }
}

fn ellipse_path(out: &mut ContentStream, x: f32, y: f32, w: f32, h: f32) {
    let (rx, ry) = (w / 2.0, h / 2.0);
    let (cx, cy) = (x + rx, y + ry);
    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    out.move_to(cx + rx, cy)
        .cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry)
        .cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy)
        .cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry)
        .cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy)
        .close_path();
}

/// Build and paint one path in the current coordinate frame (points, y up).
fn paint_shape(
    out: &mut ContentStream,
    gstates: &mut GraphicsStates,
    path: ShapePath,
    style: &ShapeStyle,
    rect: (f32, f32, f32, f32),
) {
    let fill = if path == ShapePath::Line { None } else { style.fill };
    let stroke = style.stroke.filter(|_| style.stroke_width > 0.0);
    if fill.is_none() && stroke.is_none() {
        return;
    }
    let (x, y, w, h) = rect;
    out.save_state();
    if let Some(alpha) = fill.map(|f| f.alpha).filter(|a| *a < 1.0) {
        let name = gstates.alpha_state(alpha);
        out.set_ext_gstate(&name);
    }
    if let Some(f) = fill {
        out.set_fill_rgb(f.color);
    }
    if let Some(color) = stroke {
        out.set_stroke_rgb(color).set_line_width(style.stroke_width);
    }
    match path {
        ShapePath::Rect => {
            out.rect(x, y, w, h);
        }
        ShapePath::Ellipse => ellipse_path(out, x, y, w, h),
        ShapePath::Line => {
            out.move_to(x, y + h).line_to(x + w, y);
        }
    }
    match (fill.is_some(), stroke.is_some()) {
        (true, true) => out.fill_stroke(),
        (true, false) => out.fill(),
        _ => out.stroke(),
    };
    out.restore_state();
}

/// Intrinsic drawing size in pixels; zero dimensions fall back to the
/// fragment box.
fn intrinsic_size(geometry: &DrawingGeometry, frag: &DrawingFragment) -> (f32, f32) {
    let w = if geometry.width > 0.0 { geometry.width } else { frag.width };
    let h = if geometry.height > 0.0 { geometry.height } else { frag.height };
    (w.max(1.0), h.max(1.0))
}

/// Move into the drawing's intrinsic frame: clip to the fragment box, then
/// rotate and flip around its centre and scale the intrinsic size onto it.
fn enter_drawing_frame(
    out: &mut ContentStream,
    ctx: &PageContext<'_>,
    frag: &DrawingFragment,
    geometry: &DrawingGeometry,
    intrinsic: (f32, f32),
) {
    let (w, h) = (px_to_pt(frag.width), px_to_pt(frag.height));
    let (iw, ih) = (px_to_pt(intrinsic.0), px_to_pt(intrinsic.1));
    out.save_state()
        .translate(px_to_pt(frag.x), ctx.y(frag.y + frag.height))
        .rect(0.0, 0.0, w, h)
        .clip()
        .translate(w / 2.0, h / 2.0);
    if geometry.rotation != 0.0 {
        // Clockwise on the page is negative in a y-up frame.
        let (sin, cos) = (-geometry.rotation).to_radians().sin_cos();
        out.transform([cos, sin, -sin, cos, 0.0, 0.0]);
    }
    if geometry.flip_h || geometry.flip_v {
        let sx = if geometry.flip_h { -1.0 } else { 1.0 };
        let sy = if geometry.flip_v { -1.0 } else { 1.0 };
        out.transform([sx, 0.0, 0.0, sy, 0.0, 0.0]);
    }
    if (w - iw).abs() > f32::EPSILON || (h - ih).abs() > f32::EPSILON {
        out.transform([w / iw, 0.0, 0.0, h / ih, 0.0, 0.0]);
    }
    out.translate(-iw / 2.0, -ih / 2.0);
}

pub(super) fn render_drawing_fragment(
    out: &mut ContentStream,
    ctx: &PageContext<'_>,
    gstates: &mut GraphicsStates,
    frag: &DrawingFragment,
) {
    let Some((block, measure)) = ctx.lookup.drawing(&frag.block_id) else {
        log::debug!("Drawing fragment {} has no drawing block; skipped", frag.block_id);
        return;
    };
    if block.drawing_kind() != frag.drawing_kind {
        log::debug!(
            "Drawing fragment {} is {:?} but its block is {:?}; skipped",
            frag.block_id,
            frag.drawing_kind,
            block.drawing_kind()
        );
        return;
    }
    let geometry = frag.geometry.or(measure.geometry).unwrap_or_else(|| block.geometry());
    let intrinsic = match block {
        DrawingBlock::ShapeGroup(group) => group_size(group, &geometry, frag),
        _ => intrinsic_size(&geometry, frag),
    };
    let (iw, ih) = (px_to_pt(intrinsic.0), px_to_pt(intrinsic.1));

    enter_drawing_frame(out, ctx, frag, &geometry, intrinsic);
    match block {
        DrawingBlock::VectorShape(shape) => render_vector_shape(out, gstates, shape, (iw, ih)),
        DrawingBlock::ShapeGroup(group) => render_shape_group(out, gstates, group, intrinsic),
        DrawingBlock::Image(image) => match ctx.images.for_block(&image.id) {
            Some(resource) => {
                out.save_state()
                    .transform([iw, 0.0, 0.0, ih, 0.0, 0.0])
                    .x_object(&resource.name)
                    .restore_state();
            }
            None => {
                out.fill_rect(PLACEHOLDER_GRAY, 0.0, 0.0, iw, ih);
            }
        },
    }
    out.restore_state();
}

fn render_vector_shape(
    out: &mut ContentStream,
    gstates: &mut GraphicsStates,
    shape: &VectorShapeBlock,
    size: (f32, f32),
) {
    let style = ShapeStyle::new(
        shape.fill_color.as_ref(),
        shape.stroke_color.as_deref(),
        shape.stroke_width,
    );
    let path = ShapePath::from_kind(shape.shape_kind.as_deref());
    paint_shape(out, gstates, path, &style, (0.0, 0.0, size.0, size.1));
}

fn group_size(group: &ShapeGroupBlock, geometry: &DrawingGeometry, frag: &DrawingFragment) -> (f32, f32) {
    let (mut w, mut h) = intrinsic_size(geometry, frag);
    if geometry.width <= 0.0
        && let Some(t) = group.group_transform.filter(|t| t.width > 0.0)
    {
        w = t.width;
    }
    if geometry.height <= 0.0
        && let Some(t) = group.group_transform.filter(|t| t.height > 0.0)
    {
        h = t.height;
    }
    (w, h)
}

/// Group children live in the group's child coordinate space (pixels, y
/// down); map each into the intrinsic frame and draw it as a rectangle.
fn render_shape_group(
    out: &mut ContentStream,
    gstates: &mut GraphicsStates,
    group: &ShapeGroupBlock,
    size_px: (f32, f32),
) {
    let t = group.group_transform.unwrap_or_default();
    let scale_x = if t.child_width > 0.0 && t.width > 0.0 { t.width / t.child_width } else { 1.0 };
    let scale_y = if t.child_height > 0.0 && t.height > 0.0 { t.height / t.child_height } else { 1.0 };

    for child in &group.shapes {
        let GroupChild { shape_type, attrs } = child;
        let x = (attrs.x - t.child_x) * scale_x;
        let y = (attrs.y - t.child_y) * scale_y;
        let w = attrs.width * scale_x;
        let h = attrs.height * scale_y;
        if w <= 0.0 || h <= 0.0 {
            continue;
        }
        let mut style = ShapeStyle::new(
            attrs.fill_color.as_ref(),
            attrs.stroke_color.as_deref(),
            attrs.stroke_width,
        );
        if style.fill.is_none() && shape_type.as_deref() == Some("image") {
            style.fill = Some(ResolvedFill {
                color: PLACEHOLDER_GRAY,
                alpha: 1.0,
            });
        }
        let rect = (
            px_to_pt(x),
            px_to_pt(size_px.1 - y - h),
            px_to_pt(w),
            px_to_pt(h),
        );
        paint_shape(out, gstates, ShapePath::Rect, &style, rect);
    }
}
