//! Path commands and tessellation using lyon.
//!
//! Paths are recorded in device space as a list of [`PathCommand`]s. Filling
//! and stroking convert them to a lyon path and tessellate it into triangles
//! that the software rasterizer in [`crate::raster`] covers.

use lyon::math::point as lyon_point;
use lyon::path::Path as LyonPath;
use lyon::path::PathEvent;
use lyon::path::iterator::PathIterator;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, FillVertexConstructor,
    LineCap as LyonLineCap, LineJoin as LyonLineJoin, StrokeOptions, StrokeTessellator,
    StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};
use horizon_trellis_core::{PointF, RectF};
use tracing::debug;

use crate::paint::{DashPattern, LineCap, LineJoin, Stroke};

/// Default tessellation tolerance.
pub const DEFAULT_TOLERANCE: f32 = 0.1;

/// Dash cycles shorter than this many device pixels stroke solid.
const MIN_DASH_PERIOD: f64 = 0.01;

/// A single path construction command, in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(PointF),
    LineTo(PointF),
    QuadTo { control: PointF, end: PointF },
    CubicTo {
        control1: PointF,
        control2: PointF,
        end: PointF,
    },
    Close,
}

/// An ordered list of path commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded commands.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Append a command.
    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// Remove every command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Tessellated path output.
#[derive(Debug, Clone, Default)]
pub struct TessellatedPath {
    /// Vertex positions (x, y).
    pub vertices: Vec<[f32; 2]>,
    /// Triangle indices.
    pub indices: Vec<u32>,
}

impl TessellatedPath {
    /// Check if the tessellation is empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over the triangles.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 2]; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            Some([
                *self.vertices.get(tri[0] as usize)?,
                *self.vertices.get(tri[1] as usize)?,
                *self.vertices.get(tri[2] as usize)?,
            ])
        })
    }
}

/// Convert a path to lyon's path format.
pub fn to_lyon_path(path: &Path) -> LyonPath {
    let mut builder = LyonPath::svg_builder();

    for cmd in path.commands() {
        match *cmd {
            PathCommand::MoveTo(p) => {
                builder.move_to(lyon_point(p.x, p.y));
            }
            PathCommand::LineTo(p) => {
                builder.line_to(lyon_point(p.x, p.y));
            }
            PathCommand::QuadTo { control, end } => {
                builder.quadratic_bezier_to(
                    lyon_point(control.x, control.y),
                    lyon_point(end.x, end.y),
                );
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => {
                builder.cubic_bezier_to(
                    lyon_point(control1.x, control1.y),
                    lyon_point(control2.x, control2.y),
                    lyon_point(end.x, end.y),
                );
            }
            PathCommand::Close => builder.close(),
        }
    }

    builder.build()
}

fn to_lyon_line_cap(cap: LineCap) -> LyonLineCap {
    match cap {
        LineCap::Butt => LyonLineCap::Butt,
        LineCap::Round => LyonLineCap::Round,
        LineCap::Square => LyonLineCap::Square,
    }
}

fn to_lyon_line_join(join: LineJoin) -> LyonLineJoin {
    match join {
        LineJoin::Miter => LyonLineJoin::Miter,
        LineJoin::Round => LyonLineJoin::Round,
        LineJoin::Bevel => LyonLineJoin::Bevel,
    }
}

struct FillVertexCtor;

impl FillVertexConstructor<[f32; 2]> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> [f32; 2] {
        [vertex.position().x, vertex.position().y]
    }
}

struct StrokeVertexCtor;

impl StrokeVertexConstructor<[f32; 2]> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> [f32; 2] {
        [vertex.position().x, vertex.position().y]
    }
}

/// Tessellate a lyon path for filling with the non-zero rule.
pub fn tessellate_fill(path: &LyonPath, tolerance: f32) -> TessellatedPath {
    let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    let options = FillOptions::default()
        .with_fill_rule(FillRule::NonZero)
        .with_tolerance(tolerance);

    let result = FillTessellator::new().tessellate_path(
        path,
        &options,
        &mut BuffersBuilder::new(&mut buffers, FillVertexCtor),
    );
    if let Err(err) = result {
        debug!(target: "horizon_trellis_render::backend", %err, "fill tessellation failed");
        return TessellatedPath::default();
    }

    TessellatedPath {
        vertices: buffers.vertices,
        indices: buffers.indices,
    }
}

/// Tessellate a lyon path for stroking.
///
/// The stroke's dash pattern is not looked at; dash the path first with
/// [`dash_path`].
pub fn tessellate_stroke(path: &LyonPath, stroke: &Stroke, tolerance: f32) -> TessellatedPath {
    let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    let options = StrokeOptions::default()
        .with_line_width(stroke.width)
        .with_line_cap(to_lyon_line_cap(stroke.cap))
        .with_line_join(to_lyon_line_join(stroke.join))
        .with_miter_limit(stroke.miter_limit)
        .with_tolerance(tolerance);

    let result = StrokeTessellator::new().tessellate_path(
        path,
        &options,
        &mut BuffersBuilder::new(&mut buffers, StrokeVertexCtor),
    );
    if let Err(err) = result {
        debug!(target: "horizon_trellis_render::backend", %err, "stroke tessellation failed");
        return TessellatedPath::default();
    }

    TessellatedPath {
        vertices: buffers.vertices,
        indices: buffers.indices,
    }
}

/// Check that every point of a lyon path is finite.
pub fn is_finite_path(path: &LyonPath) -> bool {
    use lyon::path::Event;
    let finite = |p: &lyon::math::Point| p.x.is_finite() && p.y.is_finite();
    path.iter().all(|event| match event {
        Event::Begin { at } => finite(&at),
        Event::Line { from, to } => finite(&from) && finite(&to),
        Event::Quadratic { from, ctrl, to } => finite(&from) && finite(&ctrl) && finite(&to),
        Event::Cubic { from, ctrl1, ctrl2, to } => {
            finite(&from) && finite(&ctrl1) && finite(&ctrl2) && finite(&to)
        }
        Event::End { last, first, .. } => finite(&last) && finite(&first),
    })
}

// =============================================================================
// Clipping
// =============================================================================

/// Parametric range `[t0, t1]` of the segment that lies inside `bounds`.
///
/// Liang-Barsky in `f64`, so far-away endpoints keep pixel precision.
fn clip_range(from: PointF, to: PointF, bounds: RectF) -> Option<(f64, f64)> {
    let finite = [from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite());
    if !finite {
        return None;
    }
    let (x0, y0) = (f64::from(from.x), f64::from(from.y));
    let dx = f64::from(to.x) - x0;
    let dy = f64::from(to.y) - y0;
    let edges = [
        (-dx, x0 - f64::from(bounds.left())),
        (dx, f64::from(bounds.right()) - x0),
        (-dy, y0 - f64::from(bounds.top())),
        (dy, f64::from(bounds.bottom()) - y0),
    ];

    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((t0, t1))
}

fn point_at(from: PointF, to: PointF, t: f64) -> PointF {
    let x = f64::from(from.x) + (f64::from(to.x) - f64::from(from.x)) * t;
    let y = f64::from(from.y) + (f64::from(to.y) - f64::from(from.y)) * t;
    PointF::new(x as f32, y as f32)
}

/// Clip a segment to `bounds`.
///
/// Returns `None` when the segment misses `bounds` or has a non-finite end.
/// The returned endpoints are clamped into `bounds`.
pub fn clip_segment(from: PointF, to: PointF, bounds: RectF) -> Option<(PointF, PointF)> {
    let (t0, t1) = clip_range(from, to, bounds)?;
    let clamp = |p: PointF| {
        PointF::new(
            p.x.clamp(bounds.left(), bounds.right()),
            p.y.clamp(bounds.top(), bounds.bottom()),
        )
    };
    Some((
        clamp(point_at(from, to, t0)),
        clamp(point_at(from, to, t1)),
    ))
}

// =============================================================================
// Dashing
// =============================================================================

/// Position inside a repeating dash pattern.
#[derive(Debug, Clone)]
struct DashCursor {
    intervals: Vec<f64>,
    period: f64,
    index: usize,
    remaining: f64,
}

impl DashCursor {
    /// Cursor at the pattern's offset, or `None` for a pattern that draws solid.
    fn new(dash: &DashPattern) -> Option<Self> {
        if dash.is_solid() {
            return None;
        }
        let mut intervals: Vec<f64> = dash
            .pattern
            .iter()
            .map(|len| if len.is_finite() { f64::from(len.max(0.0)) } else { 0.0 })
            .collect();
        if intervals.len() % 2 == 1 {
            intervals.extend_from_within(..);
        }
        let period: f64 = intervals.iter().sum();
        if !(period >= MIN_DASH_PERIOD) || !period.is_finite() {
            return None;
        }

        let remaining = intervals[0];
        let mut cursor = Self {
            intervals,
            period,
            index: 0,
            remaining,
        };
        let offset = f64::from(dash.offset);
        if offset.is_finite() {
            cursor.advance(offset.rem_euclid(period));
        }
        Some(cursor)
    }

    fn is_on(&self) -> bool {
        self.index % 2 == 0
    }

    fn next_interval(&mut self) {
        self.index = (self.index + 1) % self.intervals.len();
        self.remaining = self.intervals[self.index];
    }

    /// Move along the pattern without drawing.
    fn advance(&mut self, distance: f64) {
        if !distance.is_finite() {
            return;
        }
        if distance < self.remaining {
            self.remaining -= distance;
            return;
        }
        let mut left = (distance - self.remaining) % self.period;
        self.next_interval();
        while left >= self.remaining && left > 0.0 {
            left -= self.remaining;
            self.next_interval();
        }
        self.remaining -= left;
    }
}

/// Dash one open polyline into the pieces where the pattern is on.
///
/// The pattern starts at its offset at the first point and runs on across
/// corners. Parts of the polyline outside `bounds` advance the pattern but
/// emit nothing, so far-away points cost no more than near ones. A solid
/// pattern returns the polyline as a single piece.
pub fn dash_polyline(points: &[PointF], dash: &DashPattern, bounds: RectF) -> Vec<Vec<PointF>> {
    let Some(mut cursor) = DashCursor::new(dash) else {
        return if points.len() >= 2 {
            vec![points.to_vec()]
        } else {
            Vec::new()
        };
    };

    fn finish(piece: &mut Vec<PointF>, pieces: &mut Vec<Vec<PointF>>) {
        if piece.len() >= 2 {
            pieces.push(std::mem::take(piece));
        } else {
            piece.clear();
        }
    }

    let mut pieces = Vec::new();
    let mut piece: Vec<PointF> = Vec::new();

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = f64::from(a.x - b.x).hypot(f64::from(a.y - b.y));
        let Some((t0, t1)) = clip_range(a, b, bounds) else {
            finish(&mut piece, &mut pieces);
            cursor.advance(length);
            continue;
        };
        if length == 0.0 {
            continue;
        }
        if t0 > 0.0 {
            finish(&mut piece, &mut pieces);
            cursor.advance(length * t0);
        }

        let visible = length * (t1 - t0);
        let mut pos = 0.0;
        if cursor.is_on() && piece.is_empty() {
            piece.push(point_at(a, b, t0));
        }
        while pos < visible {
            if cursor.remaining >= visible - pos {
                cursor.remaining -= visible - pos;
                pos = visible;
            } else {
                pos += cursor.remaining;
                cursor.remaining = 0.0;
            }
            let here = point_at(a, b, t0 + pos / length);
            if cursor.is_on() {
                piece.push(here);
            }
            if cursor.remaining <= 0.0 {
                if cursor.is_on() {
                    finish(&mut piece, &mut pieces);
                }
                cursor.next_interval();
                if cursor.is_on() {
                    piece.push(here);
                }
            }
        }

        if t1 < 1.0 {
            finish(&mut piece, &mut pieces);
            cursor.advance(length * (1.0 - t1));
        }
    }
    finish(&mut piece, &mut pieces);
    pieces
}

/// Split a path into its dashes.
///
/// Curves are flattened with `tolerance` and every subpath restarts the
/// pattern at its offset. See [`dash_polyline`] for how `bounds` is used.
pub fn dash_path(path: &LyonPath, dash: &DashPattern, bounds: RectF, tolerance: f32) -> LyonPath {
    let mut subpaths: Vec<Vec<PointF>> = Vec::new();
    for event in path.iter().flattened(tolerance) {
        match event {
            PathEvent::Begin { at } => subpaths.push(vec![PointF::new(at.x, at.y)]),
            PathEvent::Line { to, .. } => {
                if let Some(points) = subpaths.last_mut() {
                    points.push(PointF::new(to.x, to.y));
                }
            }
            PathEvent::End { first, close, .. } => {
                if let (true, Some(points)) = (close, subpaths.last_mut()) {
                    points.push(PointF::new(first.x, first.y));
                }
            }
            PathEvent::Quadratic { .. } | PathEvent::Cubic { .. } => {}
        }
    }

    let mut builder = LyonPath::builder();
    for points in &subpaths {
        for piece in dash_polyline(points, dash, bounds) {
            builder.begin(lyon_point(piece[0].x, piece[0].y));
            for p in &piece[1..] {
                builder.line_to(lyon_point(p.x, p.y));
            }
            builder.end(false);
        }
    }
    builder.build()
}
