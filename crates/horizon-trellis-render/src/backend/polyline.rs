use glam::Affine2;
use horizon_trellis_core::{BackendKind, PointF, RectF};
use tracing::debug;

use super::{ArcSpec, Capabilities, DrawingBackend};
use crate::paint::Stroke;
use crate::path::dash_polyline;
use crate::raster::Bitmap;
use crate::state::PainterState;

/// Line-only backend.
///
/// The path is a flat list of device points. `move_to` only records a
/// pending start; the start is appended by the first `line_to` after the
/// buffer was emptied, so the stroke always begins at the latest `move_to`.
/// `stroke` draws one line per consecutive point pair, or per pair inside
/// each dash when the pen is dashed.
#[derive(Debug)]
pub struct PolylineBackend {
    points: Vec<PointF>,
    pending_start: Option<PointF>,
    transform: Affine2,
    pen: Stroke,
}

impl PolylineBackend {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            pending_start: None,
            transform: Affine2::IDENTITY,
            pen: Stroke::default(),
        }
    }

    /// Points accumulated since `begin_path`, in device space.
    pub fn points(&self) -> &[PointF] {
        &self.points
    }

    fn device(&self, point: PointF) -> PointF {
        let p = self.transform.transform_point2(glam::Vec2::new(point.x, point.y));
        PointF::new(p.x, p.y)
    }

    fn unsupported(&self, op: &'static str) {
        debug!(
            target: "horizon_trellis_render::backend",
            op,
            "not supported by the polyline backend; ignored"
        );
    }
}

impl Default for PolylineBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingBackend for PolylineBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Polyline
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::POLYLINE
    }

    fn apply_state(&mut self, state: &PainterState) {
        self.transform = state.transform;
        self.pen = state.stroke_style();
    }

    fn begin_path(&mut self) {
        self.points.clear();
        self.pending_start = None;
    }

    fn move_to(&mut self, point: PointF) {
        self.pending_start = Some(self.device(point));
    }

    fn line_to(&mut self, point: PointF) {
        if self.points.is_empty() {
            if let Some(start) = self.pending_start {
                self.points.push(start);
            }
        }
        let point = self.device(point);
        self.points.push(point);
    }

    fn quadratic_curve_to(&mut self, _control: PointF, _end: PointF) {
        self.unsupported("quadratic_curve_to");
    }

    fn bezier_curve_to(&mut self, _control1: PointF, _control2: PointF, _end: PointF) {
        self.unsupported("bezier_curve_to");
    }

    fn arc(&mut self, _arc: ArcSpec) {
        self.unsupported("arc");
    }

    fn rect(&mut self, _rect: RectF) {
        self.unsupported("rect");
    }

    fn close_path(&mut self) {
        match self.pending_start {
            Some(start) => self.points.push(start),
            None => debug!(
                target: "horizon_trellis_render::backend",
                "close_path without move_to; ignored"
            ),
        }
    }

    fn fill(&mut self, _target: &mut Bitmap) {
        self.unsupported("fill");
    }

    fn stroke(&mut self, target: &mut Bitmap) {
        let (color, width) = (self.pen.color, self.pen.width);
        if self.pen.dash.is_solid() {
            for pair in self.points.windows(2) {
                target.draw_line(pair[0], pair[1], color, width);
            }
            return;
        }
        let bounds = target.stroke_bounds(&self.pen);
        for dash in dash_polyline(&self.points, &self.pen.dash, bounds) {
            for pair in dash.windows(2) {
                target.draw_line(pair[0], pair[1], color, width);
            }
        }
    }

    fn flush(&mut self) {}

    fn reset(&mut self) {
        self.begin_path();
    }
}
