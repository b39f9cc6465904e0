//! Paginated document model consumed by the painter.
//!
//! Everything here is produced by an upstream layout pass and is read-only to
//! the renderer. Geometry is in CSS pixels with a top-left origin.
//!
//! Only the fields the painter reads are modelled. Other keys the layout pass
//! emits (row ranges, list types, border spacing, gradient stop positions and
//! the like) are accepted and ignored.

use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMargins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
    pub header: Option<f32>,
    pub footer: Option<f32>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub page_size: Size,
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub number: u32,
    #[serde(default)]
    pub number_text: Option<String>,
    #[serde(default)]
    pub size: Option<Size>,
    #[serde(default)]
    pub margins: Option<PageMargins>,
    #[serde(default)]
    pub fragments: Vec<Fragment>,
}

// ---------------------------------------------------------------------------
// Fragments
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Fragment {
    Para(ParaFragment),
    ListItem(ListItemFragment),
    Image(ImageFragment),
    Drawing(DrawingFragment),
    Table(TableFragment),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParaFragment {
    pub block_id: String,
    pub from_line: usize,
    pub to_line: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    #[serde(default)]
    pub continues_from_prev: bool,
    #[serde(default)]
    pub marker_width: Option<f32>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemFragment {
    pub block_id: String,
    pub item_id: String,
    pub from_line: usize,
    pub to_line: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    #[serde(default)]
    pub marker_width: f32,
    #[serde(default)]
    pub continues_from_prev: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFragment {
    pub block_id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrawingKind {
    VectorShape,
    ShapeGroup,
    Image,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingFragment {
    pub block_id: String,
    pub drawing_kind: DrawingKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub geometry: Option<DrawingGeometry>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableFragment {
    pub block_id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Fragment {
    pub fn block_id(&self) -> &str {
        match self {
            Fragment::Para(f) => &f.block_id,
            Fragment::ListItem(f) => &f.block_id,
            Fragment::Image(f) => &f.block_id,
            Fragment::Drawing(f) => &f.block_id,
            Fragment::Table(f) => &f.block_id,
        }
    }

    pub fn y(&self) -> f32 {
        match self {
            Fragment::Para(f) => f.y,
            Fragment::ListItem(f) => f.y,
            Fragment::Image(f) => f.y,
            Fragment::Drawing(f) => f.y,
            Fragment::Table(f) => f.y,
        }
    }

    /// Height carried by the fragment itself; text fragments have none and
    /// derive theirs from the measured lines.
    pub fn explicit_height(&self) -> Option<f32> {
        match self {
            Fragment::Para(_) | Fragment::ListItem(_) => None,
            Fragment::Image(f) => Some(f.height),
            Fragment::Drawing(f) => Some(f.height),
            Fragment::Table(f) => Some(f.height),
        }
    }

    /// Copy of the fragment moved by `(dx, dy)` pixels.
    pub fn translated(&self, dx: f32, dy: f32) -> Fragment {
        let mut out = self.clone();
        let (x, y) = match &mut out {
            Fragment::Para(f) => (&mut f.x, &mut f.y),
            Fragment::ListItem(f) => (&mut f.x, &mut f.y),
            Fragment::Image(f) => (&mut f.x, &mut f.y),
            Fragment::Drawing(f) => (&mut f.x, &mut f.y),
            Fragment::Table(f) => (&mut f.x, &mut f.y),
        };
        *x += dx;
        *y += dy;
        out
    }
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Block {
    Paragraph(ParagraphBlock),
    List(ListBlock),
    Image(ImageBlock),
    Drawing(DrawingBlock),
    Table(TableBlock),
}

impl Block {
    pub fn id(&self) -> &str {
        match self {
            Block::Paragraph(b) => &b.id,
            Block::List(b) => &b.id,
            Block::Image(b) => &b.id,
            Block::Drawing(b) => b.id(),
            Block::Table(b) => &b.id,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::List(_) => "list",
            Block::Image(_) => "image",
            Block::Drawing(_) => "drawing",
            Block::Table(_) => "table",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphBlock {
    pub id: String,
    #[serde(default)]
    pub runs: Vec<Run>,
    #[serde(default)]
    pub attrs: ParagraphAttrs,
}

impl ParagraphBlock {
    pub fn ends_with_line_break(&self) -> bool {
        matches!(self.runs.last(), Some(Run::LineBreak(_)))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    #[default]
    #[serde(alias = "start")]
    Left,
    Center,
    #[serde(alias = "end")]
    Right,
    #[serde(alias = "both", alias = "distribute")]
    Justify,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphIndent {
    pub left: f32,
    pub right: f32,
    pub first_line: f32,
    pub hanging: f32,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphShading {
    pub fill: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorderSpec {
    pub style: Option<String>,
    pub width: Option<f32>,
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParagraphBorders {
    pub top: Option<BorderSpec>,
    pub right: Option<BorderSpec>,
    pub bottom: Option<BorderSpec>,
    pub left: Option<BorderSpec>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackedChangesMode {
    #[default]
    Review,
    Original,
    Final,
    Off,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerJustification {
    #[default]
    Left,
    Center,
    Right,
}

/// Character formatting of a numbering marker.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerRun {
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerLayout {
    pub marker_text: String,
    pub justification: MarkerJustification,
    pub run: MarkerRun,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WordLayout {
    pub marker: Option<MarkerLayout>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphAttrs {
    pub alignment: Option<Alignment>,
    pub indent: Option<ParagraphIndent>,
    pub shading: Option<ParagraphShading>,
    pub borders: Option<ParagraphBorders>,
    pub tracked_changes_mode: Option<TrackedChangesMode>,
    pub tracked_changes_enabled: Option<bool>,
    pub word_layout: Option<WordLayout>,
}

impl ParagraphAttrs {
    pub fn indent(&self) -> ParagraphIndent {
        self.indent.unwrap_or_default()
    }

    /// Tracked-change decorations are painted unless explicitly disabled.
    pub fn effective_tracked_changes_mode(&self) -> TrackedChangesMode {
        if self.tracked_changes_enabled == Some(false) {
            return TrackedChangesMode::Off;
        }
        self.tracked_changes_mode.unwrap_or_default()
    }

    pub fn marker(&self) -> Option<&MarkerLayout> {
        self.word_layout
            .as_ref()
            .and_then(|wl| wl.marker.as_ref())
            .filter(|m| !m.marker_text.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Runs
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Run {
    Text(TextRun),
    Tab(TabRun),
    Image(ImageRun),
    LineBreak(LineBreakRun),
}

impl Run {
    /// Text length in chars, the unit line and segment offsets are expressed in.
    pub fn char_len(&self) -> usize {
        match self {
            Run::Text(r) => r.text.chars().count(),
            Run::Tab(r) => r.text.chars().count(),
            Run::Image(_) | Run::LineBreak(_) => 0,
        }
    }

    pub fn font_size(&self) -> Option<f32> {
        match self {
            Run::Text(r) => Some(r.font_size),
            Run::Tab(r) => r.font_size,
            Run::Image(_) | Run::LineBreak(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackChangeKind {
    Insert,
    Delete,
    Format,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedChange {
    pub kind: TrackChangeKind,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentAnnotation {
    pub comment_id: Option<String>,
    pub internal: bool,
}

/// Page fields resolved at paint time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldToken {
    PageNumber,
    TotalPageCount,
}

fn default_font_size() -> f32 {
    16.0
}

fn default_tab_text() -> String {
    "\t".to_string()
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub text: String,
    #[serde(default)]
    pub font_family: Option<String>,
    /// Pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strike: bool,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub highlight: Option<String>,
    #[serde(default)]
    pub tracked_change: Option<TrackedChange>,
    #[serde(default)]
    pub comments: Vec<CommentAnnotation>,
    #[serde(default)]
    pub token: Option<FieldToken>,
    #[serde(default)]
    pub pm_start: Option<usize>,
    #[serde(default)]
    pub pm_end: Option<usize>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRun {
    #[serde(default = "default_tab_text")]
    pub text: String,
    #[serde(default)]
    pub font_size: Option<f32>,
    #[serde(default)]
    pub tracked_change: Option<TrackedChange>,
    #[serde(default)]
    pub pm_start: Option<usize>,
    #[serde(default)]
    pub pm_end: Option<usize>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRun {
    #[serde(default)]
    pub src: Option<String>,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub pm_start: Option<usize>,
    #[serde(default)]
    pub pm_end: Option<usize>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineBreakRun {
    pub pm_start: Option<usize>,
    pub pm_end: Option<usize>,
}

// ---------------------------------------------------------------------------
// Lists, images, drawings, tables
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListMarker {
    pub text: String,
    pub justification: MarkerJustification,
    pub run: MarkerRun,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: String,
    #[serde(default)]
    pub marker: ListMarker,
    pub paragraph: ParagraphBlock,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlock {
    pub id: String,
    #[serde(default)]
    pub items: Vec<ListItem>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlock {
    pub id: String,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawingGeometry {
    pub width: f32,
    pub height: f32,
    /// Clockwise, in degrees.
    pub rotation: f32,
    pub flip_h: bool,
    pub flip_v: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStop {
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StyledFill {
    SolidWithAlpha {
        color: String,
        #[serde(default = "opaque")]
        alpha: f32,
    },
    Gradient {
        #[serde(default)]
        stops: Vec<GradientStop>,
    },
}

fn opaque() -> f32 {
    1.0
}

/// A drawing fill: either a bare hex colour or a tagged fill description.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FillValue {
    Color(String),
    Styled(StyledFill),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "drawingKind", rename_all = "camelCase")]
pub enum DrawingBlock {
    VectorShape(VectorShapeBlock),
    ShapeGroup(ShapeGroupBlock),
    Image(ImageDrawingBlock),
}

impl DrawingBlock {
    pub fn id(&self) -> &str {
        match self {
            DrawingBlock::VectorShape(b) => &b.id,
            DrawingBlock::ShapeGroup(b) => &b.id,
            DrawingBlock::Image(b) => &b.id,
        }
    }

    pub fn drawing_kind(&self) -> DrawingKind {
        match self {
            DrawingBlock::VectorShape(_) => DrawingKind::VectorShape,
            DrawingBlock::ShapeGroup(_) => DrawingKind::ShapeGroup,
            DrawingBlock::Image(_) => DrawingKind::Image,
        }
    }

    pub fn geometry(&self) -> DrawingGeometry {
        match self {
            DrawingBlock::VectorShape(b) => b.geometry,
            DrawingBlock::ShapeGroup(b) => b.geometry,
            DrawingBlock::Image(b) => b.geometry,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorShapeBlock {
    pub id: String,
    #[serde(default)]
    pub shape_kind: Option<String>,
    #[serde(default)]
    pub fill_color: Option<FillValue>,
    #[serde(default)]
    pub stroke_color: Option<String>,
    #[serde(default)]
    pub stroke_width: Option<f32>,
    #[serde(default)]
    pub geometry: DrawingGeometry,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupTransform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub child_x: f32,
    pub child_y: f32,
    pub child_width: f32,
    pub child_height: f32,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupChildAttrs {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill_color: Option<FillValue>,
    pub stroke_color: Option<String>,
    pub stroke_width: Option<f32>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupChild {
    #[serde(default)]
    pub shape_type: Option<String>,
    #[serde(default)]
    pub attrs: GroupChildAttrs,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeGroupBlock {
    pub id: String,
    #[serde(default)]
    pub shapes: Vec<GroupChild>,
    #[serde(default)]
    pub group_transform: Option<GroupTransform>,
    #[serde(default)]
    pub geometry: DrawingGeometry,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDrawingBlock {
    pub id: String,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub geometry: DrawingGeometry,
}

impl ImageDrawingBlock {
    /// Image-block view of this drawing so it shares the image resource path.
    pub fn as_image_block(&self) -> ImageBlock {
        ImageBlock {
            id: self.id.clone(),
            src: self.src.clone(),
            width: Some(self.geometry.width),
            height: Some(self.geometry.height),
            alt: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBlock {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Measures
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Measure {
    Paragraph(ParagraphMeasure),
    List(ListMeasure),
    Image(ImageMeasure),
    Drawing(DrawingMeasure),
    Table(TableMeasure),
}

impl Measure {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Measure::Paragraph(_) => "paragraph",
            Measure::List(_) => "list",
            Measure::Image(_) => "image",
            Measure::Drawing(_) => "drawing",
            Measure::Table(_) => "table",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSegment {
    pub run_index: usize,
    pub from_char: usize,
    pub to_char: usize,
    pub width: f32,
    /// Offset from the line origin when the segment is pinned to a tab stop.
    #[serde(default)]
    pub x: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeaderStyle {
    Dot,
    MiddleDot,
    Hyphen,
    Underscore,
    Heavy,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabLeader {
    pub from: f32,
    pub to: f32,
    pub style: LeaderStyle,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabBar {
    pub x: f32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub from_run: usize,
    pub from_char: usize,
    pub to_run: usize,
    pub to_char: usize,
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
    pub line_height: f32,
    #[serde(default)]
    pub segments: Option<Vec<LineSegment>>,
    #[serde(default)]
    pub leaders: Option<Vec<TabLeader>>,
    #[serde(default)]
    pub bars: Option<Vec<TabBar>>,
    #[serde(default)]
    pub skip_justify: bool,
}

impl Line {
    pub fn has_explicit_positions(&self) -> bool {
        self.segments
            .as_ref()
            .is_some_and(|segs| segs.iter().any(|s| s.x.is_some()))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerMeasure {
    pub marker_width: f32,
    pub marker_text_width: f32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphMeasure {
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default)]
    pub total_height: f32,
    #[serde(default)]
    pub marker: Option<MarkerMeasure>,
}

impl ParagraphMeasure {
    /// Height of the half-open line range, falling back to the whole
    /// paragraph when no lines were measured.
    pub fn range_height(&self, from_line: usize, to_line: usize) -> f32 {
        if self.lines.is_empty() {
            return self.total_height;
        }
        let end = to_line.min(self.lines.len());
        let start = from_line.min(end);
        self.lines[start..end].iter().map(|l| l.line_height).sum()
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemMeasure {
    pub item_id: String,
    #[serde(default)]
    pub marker_text_width: f32,
    pub paragraph: ParagraphMeasure,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeasure {
    #[serde(default)]
    pub items: Vec<ListItemMeasure>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMeasure {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingMeasure {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub geometry: Option<DrawingGeometry>,
}

/// Tables are outlined from their fragment box, so nothing is read from
/// their measure.
#[derive(Clone, Debug, Deserialize)]
pub struct TableMeasure {}

// ---------------------------------------------------------------------------
// Header / footer decorations
// ---------------------------------------------------------------------------

/// Header or footer content for one page, resolved by a decoration provider.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDecoration {
    #[serde(default)]
    pub fragments: Vec<Fragment>,
    pub height: f32,
    #[serde(default)]
    pub content_height: Option<f32>,
    #[serde(default)]
    pub offset: Option<f32>,
    #[serde(default)]
    pub margin_left: Option<f32>,
}
