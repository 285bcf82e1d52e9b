//! Drawing backends.
//!
//! A canvas surface picks one backend when it is created and routes every
//! path operation through the [`DrawingBackend`] trait:
//!
//! - [`RichPathBackend`] - full vector paths (curves, arcs, rectangles,
//!   fills) tessellated with lyon, drawn through a lazily created graphics
//!   context that mirrors the painter state
//! - [`PolylineBackend`] - a raster context that can only draw straight
//!   lines; curve, arc, rectangle and fill requests are ignored
//!
//! Path coordinates are passed in user space. Backends map them through the
//! transform last given to [`DrawingBackend::apply_state`].

mod polyline;
mod rich;

pub use polyline::PolylineBackend;
pub use rich::RichPathBackend;

use horizon_trellis_core::{BackendKind, PointF, RectF};

use crate::raster::Bitmap;
use crate::state::PainterState;

/// What a backend can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// `fill()` on a constructed path.
    pub fill_path: bool,
    /// `quadratic_curve_to` and `bezier_curve_to`.
    pub curves: bool,
    /// `arc`.
    pub arcs: bool,
    /// `rect` as a path command.
    pub path_rects: bool,
}

impl Capabilities {
    /// Everything is supported.
    pub const FULL: Self = Self {
        fill_path: true,
        curves: true,
        arcs: true,
        path_rects: true,
    };

    /// Straight line strokes only.
    pub const POLYLINE: Self = Self {
        fill_path: false,
        curves: false,
        arcs: false,
        path_rects: false,
    };
}

/// An arc around `center`, with angles in radians measured clockwise from
/// the positive x axis in device orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    pub center: PointF,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub anticlockwise: bool,
}

impl ArcSpec {
    /// Signed sweep angle, clamped to one full turn.
    pub fn sweep(&self) -> f32 {
        use std::f32::consts::TAU;
        if self.anticlockwise {
            let delta = self.start_angle - self.end_angle;
            if delta >= TAU { -TAU } else { -delta.rem_euclid(TAU) }
        } else {
            let delta = self.end_angle - self.start_angle;
            if delta >= TAU { TAU } else { delta.rem_euclid(TAU) }
        }
    }
}

/// Path construction and resolution for one canvas surface.
pub trait DrawingBackend: Send {
    // =========================================================================
    // Identity
    // =========================================================================

    /// Which backend this is.
    fn kind(&self) -> BackendKind;

    /// What this backend can draw.
    fn capabilities(&self) -> Capabilities;

    // =========================================================================
    // State
    // =========================================================================

    /// Make the painter state current for subsequent drawing.
    fn apply_state(&mut self, state: &PainterState);

    /// Push native context state, if the backend keeps any.
    fn save(&mut self) {}

    /// Pop native context state, if the backend keeps any.
    fn restore(&mut self) {}

    // =========================================================================
    // Path construction
    // =========================================================================

    fn begin_path(&mut self);
    fn move_to(&mut self, point: PointF);
    fn line_to(&mut self, point: PointF);
    fn quadratic_curve_to(&mut self, control: PointF, end: PointF);
    fn bezier_curve_to(&mut self, control1: PointF, control2: PointF, end: PointF);
    fn arc(&mut self, arc: ArcSpec);
    fn rect(&mut self, rect: RectF);
    fn close_path(&mut self);

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Fill the current path with the current fill color.
    fn fill(&mut self, target: &mut Bitmap);

    /// Stroke the current path with the current stroke style.
    fn stroke(&mut self, target: &mut Bitmap);

    /// End of a paint cycle: tear down any native context.
    fn flush(&mut self);

    /// Forget the path and any native context; used when the target bitmap
    /// is reallocated.
    fn reset(&mut self);
}

/// Create the backend for a configured kind.
pub fn create_backend(kind: BackendKind) -> Box<dyn DrawingBackend> {
    match kind {
        BackendKind::Rich => Box::new(RichPathBackend::new()),
        BackendKind::Polyline => Box::new(PolylineBackend::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    fn arc(start: f32, end: f32, anticlockwise: bool) -> ArcSpec {
        ArcSpec {
            center: PointF::ZERO,
            radius: 1.0,
            start_angle: start,
            end_angle: end,
            anticlockwise,
        }
    }

    #[test]
    fn test_arc_sweep() {
        assert_eq!(arc(0.0, PI, false).sweep(), PI);
        assert_eq!(arc(0.0, PI, true).sweep(), -PI);
        assert_eq!(arc(0.0, 3.0 * TAU, false).sweep(), TAU);
        assert_eq!(arc(0.0, -3.0 * TAU, true).sweep(), -TAU);
    }

    #[test]
    fn test_create_backend() {
        assert_eq!(create_backend(BackendKind::Rich).kind(), BackendKind::Rich);
        let polyline = create_backend(BackendKind::Polyline);
        assert_eq!(polyline.kind(), BackendKind::Polyline);
        assert_eq!(polyline.capabilities(), Capabilities::POLYLINE);
    }
}
