use glam::{Affine2, Vec2};
use horizon_trellis_core::{BackendKind, PerfSpan, PointF, RectF};
use lyon::geom::Arc;
use lyon::math::{Angle, point as lyon_point, vector};
use lyon::path::Path as LyonPath;
use tracing::{debug, trace};

use super::{ArcSpec, Capabilities, DrawingBackend};
use crate::paint::Stroke;
use crate::path::{DEFAULT_TOLERANCE, Path, PathCommand, tessellate_fill, to_lyon_path};
use crate::raster::{Bitmap, DrawCommand};
use crate::state::PainterState;
use crate::types::{Color, Font};

/// Pen, brush, font and transform as seen by the graphics context.
#[derive(Debug, Clone, PartialEq)]
struct ContextState {
    pen: Stroke,
    brush: Color,
    font: Font,
    transform: Affine2,
}

impl From<&PainterState> for ContextState {
    fn from(state: &PainterState) -> Self {
        Self {
            pen: state.stroke_style(),
            brush: state.fill,
            font: state.font.clone(),
            transform: state.transform,
        }
    }
}

/// Per-paint-cycle drawing context with its own state stack.
#[derive(Debug)]
struct GraphicsContext {
    current: ContextState,
    saved: Vec<ContextState>,
}

/// Full vector path backend.
///
/// Commands are recorded in device space. The lyon path built for a fill
/// or stroke is kept until the path changes, so `fill()` followed by
/// `stroke()` converts once.
#[derive(Debug)]
pub struct RichPathBackend {
    path: Path,
    current: Option<PointF>,
    subpath_start: Option<PointF>,
    /// Last point the painter moved or drew to; survives `begin_path`.
    last_point: Option<PointF>,
    built: Option<LyonPath>,
    applied: ContextState,
    context: Option<GraphicsContext>,
    contexts_created: usize,
    tolerance: f32,
}

impl RichPathBackend {
    pub fn new() -> Self {
        Self {
            path: Path::new(),
            current: None,
            subpath_start: None,
            last_point: None,
            built: None,
            applied: ContextState::from(&PainterState::default()),
            context: None,
            contexts_created: 0,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// The path recorded since `begin_path`, in device space.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a graphics context is live in this paint cycle.
    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    /// How many graphics contexts have been created so far.
    pub fn contexts_created(&self) -> usize {
        self.contexts_created
    }

    /// Depth of the graphics context's own state stack.
    pub fn context_depth(&self) -> usize {
        self.context.as_ref().map_or(0, |ctx| ctx.saved.len())
    }

    fn context(&mut self) -> &mut GraphicsContext {
        if self.context.is_none() {
            self.contexts_created += 1;
            debug!(
                target: "horizon_trellis_render::backend",
                count = self.contexts_created,
                "created graphics context"
            );
        }
        let applied = &self.applied;
        self.context.get_or_insert_with(|| GraphicsContext {
            current: applied.clone(),
            saved: Vec::new(),
        })
    }

    fn device(&self, point: PointF) -> PointF {
        let p = self.applied.transform.transform_point2(Vec2::new(point.x, point.y));
        PointF::new(p.x, p.y)
    }

    fn push(&mut self, command: PathCommand) {
        self.context();
        self.built = None;
        match command {
            PathCommand::MoveTo(p) => {
                self.subpath_start = Some(p);
                self.current = Some(p);
                self.last_point = Some(p);
            }
            PathCommand::LineTo(p)
            | PathCommand::QuadTo { end: p, .. }
            | PathCommand::CubicTo { end: p, .. } => {
                self.current = Some(p);
                self.last_point = Some(p);
            }
            PathCommand::Close => {
                self.current = self.subpath_start;
            }
        }
        self.path.push(command);
    }

    /// Make sure a subpath is open before a segment ending at `end`.
    ///
    /// Without a current point the subpath starts at the last known point,
    /// or at `end` itself when nothing has been drawn yet.
    fn ensure_start(&mut self, end: PointF) {
        if self.current.is_none() {
            let start = self.last_point.unwrap_or(end);
            self.push(PathCommand::MoveTo(start));
        }
    }

    fn lyon_path(&mut self) -> &LyonPath {
        let path = &self.path;
        self.built.get_or_insert_with(|| to_lyon_path(path))
    }
}

impl Default for RichPathBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingBackend for RichPathBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Rich
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::FULL
    }

    fn apply_state(&mut self, state: &PainterState) {
        self.applied = ContextState::from(state);
        if let Some(ctx) = self.context.as_mut() {
            ctx.current = self.applied.clone();
        }
    }

    fn save(&mut self) {
        if let Some(ctx) = self.context.as_mut() {
            ctx.saved.push(ctx.current.clone());
        }
    }

    fn restore(&mut self) {
        if let Some(ctx) = self.context.as_mut() {
            if let Some(state) = ctx.saved.pop() {
                ctx.current = state;
            }
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.current = None;
        self.subpath_start = None;
        self.built = None;
    }

    fn move_to(&mut self, point: PointF) {
        let p = self.device(point);
        self.push(PathCommand::MoveTo(p));
    }

    fn line_to(&mut self, point: PointF) {
        let p = self.device(point);
        if self.current.is_none() && self.last_point.is_none() {
            self.push(PathCommand::MoveTo(p));
            return;
        }
        self.ensure_start(p);
        self.push(PathCommand::LineTo(p));
    }

    fn quadratic_curve_to(&mut self, control: PointF, end: PointF) {
        let control = self.device(control);
        let end = self.device(end);
        self.ensure_start(control);
        self.push(PathCommand::QuadTo { control, end });
    }

    fn bezier_curve_to(&mut self, control1: PointF, control2: PointF, end: PointF) {
        let control1 = self.device(control1);
        let control2 = self.device(control2);
        let end = self.device(end);
        self.ensure_start(control1);
        self.push(PathCommand::CubicTo {
            control1,
            control2,
            end,
        });
    }

    fn arc(&mut self, spec: ArcSpec) {
        let arc = Arc {
            center: lyon_point(spec.center.x, spec.center.y),
            radii: vector(spec.radius, spec.radius),
            start_angle: Angle::radians(spec.start_angle),
            sweep_angle: Angle::radians(spec.sweep()),
            x_rotation: Angle::radians(0.0),
        };

        let from = arc.from();
        let start = self.device(PointF::new(from.x, from.y));
        if self.current.is_some() {
            self.push(PathCommand::LineTo(start));
        } else {
            self.push(PathCommand::MoveTo(start));
        }

        let mut segments = Vec::new();
        arc.for_each_quadratic_bezier(&mut |segment| {
            segments.push((
                PointF::new(segment.ctrl.x, segment.ctrl.y),
                PointF::new(segment.to.x, segment.to.y),
            ));
        });
        trace!(
            target: "horizon_trellis_render::backend",
            segments = segments.len(),
            "expanded arc"
        );
        for (control, end) in segments {
            let control = self.device(control);
            let end = self.device(end);
            self.push(PathCommand::QuadTo { control, end });
        }
    }

    fn rect(&mut self, rect: RectF) {
        let corners = [
            rect.top_left(),
            rect.top_right(),
            rect.bottom_right(),
            rect.bottom_left(),
        ]
        .map(|p| self.device(p));
        self.push(PathCommand::MoveTo(corners[0]));
        for corner in &corners[1..] {
            self.push(PathCommand::LineTo(*corner));
        }
        self.push(PathCommand::Close);
    }

    fn close_path(&mut self) {
        if self.subpath_start.is_none() {
            debug!(
                target: "horizon_trellis_render::backend",
                "close_path without an open subpath; ignored"
            );
            return;
        }
        self.push(PathCommand::Close);
    }

    fn fill(&mut self, target: &mut Bitmap) {
        if self.path.is_empty() {
            return;
        }
        let _span = PerfSpan::new("rich_fill");
        let brush = self.context().current.brush;
        let tolerance = self.tolerance;
        let mesh = tessellate_fill(self.lyon_path(), tolerance);
        target.cover_mesh(&mesh, brush);
        target.record(DrawCommand::FillPath {
            path: self.path.clone(),
            color: brush,
        });
    }

    fn stroke(&mut self, target: &mut Bitmap) {
        if self.path.is_empty() {
            return;
        }
        let _span = PerfSpan::new("rich_stroke");
        let pen = self.context().current.pen.clone();
        let tolerance = self.tolerance;
        target.stroke_path(self.lyon_path(), &pen, tolerance);
        target.record(DrawCommand::StrokePath {
            path: self.path.clone(),
            stroke: pen,
        });
    }

    fn flush(&mut self) {
        if self.context.take().is_some() {
            debug!(target: "horizon_trellis_render::backend", "flushed graphics context");
        }
    }

    fn reset(&mut self) {
        self.begin_path();
        self.last_point = None;
        self.context = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_trellis_core::SizeI;

    #[test]
    fn test_line_to_without_move_uses_last_point() {
        let mut backend = RichPathBackend::new();
        backend.move_to(PointF::new(1.0, 1.0));
        backend.line_to(PointF::new(5.0, 1.0));
        backend.begin_path();
        backend.line_to(PointF::new(5.0, 5.0));
        assert_eq!(
            backend.path().commands(),
            &[
                PathCommand::MoveTo(PointF::new(5.0, 1.0)),
                PathCommand::LineTo(PointF::new(5.0, 5.0)),
            ]
        );
    }

    #[test]
    fn test_first_line_to_starts_subpath() {
        let mut backend = RichPathBackend::new();
        backend.line_to(PointF::new(3.0, 4.0));
        assert_eq!(
            backend.path().commands(),
            &[PathCommand::MoveTo(PointF::new(3.0, 4.0))]
        );
    }

    #[test]
    fn test_rect_is_closed_subpath() {
        let mut backend = RichPathBackend::new();
        backend.rect(RectF::new(0.0, 0.0, 2.0, 3.0));
        let commands = backend.path().commands();
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0], PathCommand::MoveTo(PointF::new(0.0, 0.0)));
        assert_eq!(commands[2], PathCommand::LineTo(PointF::new(2.0, 3.0)));
        assert_eq!(commands[4], PathCommand::Close);
    }

    #[test]
    fn test_arc_expands_to_quadratics() {
        let mut backend = RichPathBackend::new();
        backend.arc(ArcSpec {
            center: PointF::new(10.0, 10.0),
            radius: 5.0,
            start_angle: 0.0,
            end_angle: std::f32::consts::PI,
            anticlockwise: false,
        });
        let commands = backend.path().commands();
        assert_eq!(commands[0], PathCommand::MoveTo(PointF::new(15.0, 10.0)));
        assert!(commands.len() > 1);
        assert!(commands[1..]
            .iter()
            .all(|cmd| matches!(cmd, PathCommand::QuadTo { .. })));
        let Some(PathCommand::QuadTo { end, .. }) = commands.last() else {
            panic!("arc should end with a curve");
        };
        assert!((end.x - 5.0).abs() < 1e-3);
        assert!((end.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_close_without_subpath_is_noop() {
        let mut backend = RichPathBackend::new();
        backend.close_path();
        assert!(backend.path().is_empty());
    }

    #[test]
    fn test_context_is_lazy_and_flushed() {
        let mut backend = RichPathBackend::new();
        assert!(!backend.has_context());
        backend.move_to(PointF::ZERO);
        assert!(backend.has_context());
        backend.flush();
        assert!(!backend.has_context());
        backend.line_to(PointF::new(1.0, 1.0));
        assert_eq!(backend.contexts_created(), 2);
    }

    #[test]
    fn test_context_stack_follows_save_restore() {
        let mut backend = RichPathBackend::new();
        backend.move_to(PointF::ZERO);
        let mut state = PainterState::default();
        state.fill = Color::RED;
        backend.apply_state(&state);
        backend.save();
        assert_eq!(backend.context_depth(), 1);
        state.fill = Color::BLUE;
        backend.apply_state(&state);
        backend.restore();
        assert_eq!(backend.context_depth(), 0);
        assert_eq!(backend.context().current.brush, Color::RED);
    }

    #[test]
    fn test_fill_and_stroke_reuse_built_path() {
        let mut backend = RichPathBackend::new();
        let mut bitmap = Bitmap::new(SizeI::new(10, 10), Color::WHITE);
        backend.rect(RectF::new(2.0, 2.0, 6.0, 6.0));
        backend.fill(&mut bitmap);
        assert!(backend.built.is_some());
        backend.stroke(&mut bitmap);
        assert!(matches!(bitmap.commands()[0], DrawCommand::FillPath { .. }));
        assert!(matches!(bitmap.commands()[1], DrawCommand::StrokePath { .. }));
        assert_eq!(bitmap.pixel(5, 5), Some([0, 0, 0, 255]));
        assert_eq!(bitmap.pixel(0, 0), Some([255, 255, 255, 255]));
    }
}
