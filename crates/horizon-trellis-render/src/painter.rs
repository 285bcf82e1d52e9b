//! The painter fluent API.
//!
//! A [`Painter`] mutably borrows its [`CanvasSurface`], so it cannot outlive
//! the drawing scope it was created for. Every operation returns
//! `&mut Self` for chaining:
//!
//! ```
//! use horizon_trellis_core::{BackendKind, SizeI};
//! use horizon_trellis_render::{CanvasSurface, Color};
//!
//! let mut surface = CanvasSurface::new(BackendKind::Rich, Color::WHITE);
//! surface
//!     .painter(SizeI::new(64, 64))
//!     .stroke_color(Color::RED)
//!     .line_width(2.0)
//!     .begin_path()
//!     .move_to(8.0, 8.0)
//!     .line_to(56.0, 56.0)
//!     .stroke();
//!
//! assert_eq!(surface.bitmap().unwrap().commands().len(), 1);
//! ```
//!
//! Misuse never panics: drawing on a destroyed or unallocated surface,
//! unbalanced `restore()` calls and operations the backend cannot perform
//! are logged and ignored. The `try_*` variants report them instead.

use std::ops::{Deref, DerefMut};

use horizon_trellis_core::{BackendKind, PointF, RectF, SizeI};
use image::RgbaImage;
use tracing::{debug, warn};

use crate::backend::{ArcSpec, Capabilities};
use crate::error::{PaintError, PaintResult};
use crate::paint::{DashPattern, LineCap, LineJoin};
use crate::raster::DrawCommand;
use crate::state::{PainterState, StateStack};
use crate::surface::{CanvasSurface, SurfaceState};
use crate::types::{Color, Font};

/// Short-lived drawing handle into a canvas surface.
pub struct Painter<'a> {
    surface: &'a mut CanvasSurface,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(surface: &'a mut CanvasSurface) -> Self {
        Self { surface }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current drawing state.
    pub fn state(&self) -> &PainterState {
        self.surface.states.current()
    }

    /// Number of saved states.
    pub fn depth(&self) -> usize {
        self.surface.states.depth()
    }

    /// Size of the drawing surface.
    pub fn size(&self) -> SizeI {
        self.surface.size()
    }

    /// The active backend.
    pub fn backend_kind(&self) -> BackendKind {
        self.surface.backend.kind()
    }

    /// What the active backend can draw.
    pub fn capabilities(&self) -> Capabilities {
        self.surface.backend.capabilities()
    }

    /// Check if drawing calls will reach a bitmap.
    pub fn is_live(&self) -> bool {
        self.surface.bitmap.is_some() && !self.surface.is_destroyed()
    }

    // =========================================================================
    // State stack
    // =========================================================================

    /// Push the current state.
    pub fn save(&mut self) -> &mut Self {
        if self.check_alive("save") {
            self.surface.states.save();
            self.surface.backend.save();
        }
        self
    }

    /// Pop the most recently saved state. Without a matching `save()` the
    /// current state is kept.
    pub fn restore(&mut self) -> &mut Self {
        let _ = self.try_restore();
        self
    }

    /// Pop the most recently saved state, reporting an unbalanced call.
    pub fn try_restore(&mut self) -> PaintResult<&mut Self> {
        if !self.check_alive("restore") {
            return Err(PaintError::SurfaceDestroyed);
        }
        self.surface.states.restore()?;
        self.surface.backend.restore();
        self.sync();
        Ok(self)
    }

    /// Save now and restore when the returned guard drops.
    pub fn scoped(&mut self) -> StateSaver<'_, 'a> {
        StateSaver::new(self)
    }

    // =========================================================================
    // Transform
    // =========================================================================

    pub fn translate(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.update("translate", |states| states.translate(dx, dy))
    }

    pub fn scale(&mut self, sx: f32, sy: f32) -> &mut Self {
        self.update("scale", |states| states.scale(sx, sy))
    }

    /// Rotate by `angle` radians.
    pub fn rotate(&mut self, angle: f32) -> &mut Self {
        self.update("rotate", |states| states.rotate(angle))
    }

    // =========================================================================
    // Style
    // =========================================================================

    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        self.update("fill_color", |states| states.current_mut().fill = color)
    }

    pub fn stroke_color(&mut self, color: Color) -> &mut Self {
        self.update("stroke_color", |states| states.current_mut().stroke = color)
    }

    pub fn line_width(&mut self, width: f32) -> &mut Self {
        self.update("line_width", |states| states.current_mut().line_width = width)
    }

    pub fn line_cap(&mut self, cap: LineCap) -> &mut Self {
        self.update("line_cap", |states| states.current_mut().line_cap = cap)
    }

    pub fn line_join(&mut self, join: LineJoin) -> &mut Self {
        self.update("line_join", |states| states.current_mut().line_join = join)
    }

    /// Set the dash pattern, in user-space lengths.
    pub fn line_dash(&mut self, dash: DashPattern) -> &mut Self {
        self.update("line_dash", |states| states.current_mut().line_dash = dash)
    }

    pub fn font(&mut self, font: Font) -> &mut Self {
        self.update("font", |states| states.current_mut().font = font)
    }

    // =========================================================================
    // Immediate drawing
    // =========================================================================

    /// Reset a rectangle to the surface background.
    pub fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        if self.begin_draw("clear_rect") {
            let transform = self.state().transform;
            if let Some(bitmap) = self.surface.bitmap.as_mut() {
                bitmap.clear_rect(RectF::new(x, y, width, height), transform);
            }
        }
        self
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        if self.begin_draw("fill_rect") {
            let state = self.surface.states.current();
            let (transform, color) = (state.transform, state.fill);
            if let Some(bitmap) = self.surface.bitmap.as_mut() {
                bitmap.fill_rect(RectF::new(x, y, width, height), transform, color);
            }
        }
        self
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        if self.begin_draw("stroke_rect") {
            let state = self.surface.states.current();
            let (transform, stroke) = (state.transform, state.stroke_style());
            if let Some(bitmap) = self.surface.bitmap.as_mut() {
                bitmap.stroke_rect(RectF::new(x, y, width, height), transform, stroke);
            }
        }
        self
    }

    /// Draw text with its baseline origin at `(x, y)` in the fill color.
    ///
    /// Text is recorded in the display list only; glyphs are not rasterized.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        if self.begin_draw("fill_text") {
            let state = self.surface.states.current();
            let command = DrawCommand::Text {
                text: text.to_owned(),
                origin: state.to_device(PointF::new(x, y)),
                font: state.font.clone(),
                color: state.fill,
            };
            if let Some(bitmap) = self.surface.bitmap.as_mut() {
                bitmap.record(command);
            }
        }
        self
    }

    /// Draw an image unscaled with its top-left corner at `(x, y)`.
    pub fn draw_image(&mut self, image: &RgbaImage, x: f32, y: f32) -> &mut Self {
        if self.begin_draw("draw_image") {
            let origin = self.state().to_device(PointF::new(x, y));
            if let Some(bitmap) = self.surface.bitmap.as_mut() {
                bitmap.draw_image(image, origin);
            }
        }
        self
    }

    // =========================================================================
    // Path construction
    // =========================================================================

    pub fn begin_path(&mut self) -> &mut Self {
        if self.begin_draw("begin_path") {
            self.surface.backend.begin_path();
        }
        self
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        if self.begin_draw("move_to") {
            self.surface.backend.move_to(PointF::new(x, y));
        }
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        if self.begin_draw("line_to") {
            self.surface.backend.line_to(PointF::new(x, y));
        }
        self
    }

    pub fn quadratic_curve_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> &mut Self {
        if self.begin_draw("quadratic_curve_to") {
            self.surface
                .backend
                .quadratic_curve_to(PointF::new(cx, cy), PointF::new(x, y));
        }
        self
    }

    pub fn bezier_curve_to(
        &mut self,
        c1x: f32,
        c1y: f32,
        c2x: f32,
        c2y: f32,
        x: f32,
        y: f32,
    ) -> &mut Self {
        if self.begin_draw("bezier_curve_to") {
            self.surface.backend.bezier_curve_to(
                PointF::new(c1x, c1y),
                PointF::new(c2x, c2y),
                PointF::new(x, y),
            );
        }
        self
    }

    /// Add a circular arc around `(x, y)`. Angles are in radians.
    pub fn arc(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        anticlockwise: bool,
    ) -> &mut Self {
        if self.begin_draw("arc") {
            self.surface.backend.arc(ArcSpec {
                center: PointF::new(x, y),
                radius,
                start_angle,
                end_angle,
                anticlockwise,
            });
        }
        self
    }

    /// Add a closed rectangular subpath.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        if self.begin_draw("rect") {
            self.surface.backend.rect(RectF::new(x, y, width, height));
        }
        self
    }

    pub fn close_path(&mut self) -> &mut Self {
        if self.begin_draw("close_path") {
            self.surface.backend.close_path();
        }
        self
    }

    /// Fill the current path with the fill color.
    pub fn fill(&mut self) -> &mut Self {
        if self.begin_draw("fill") {
            if let Some(bitmap) = self.surface.bitmap.as_mut() {
                self.surface.backend.fill(bitmap);
            }
        }
        self
    }

    /// Stroke the current path with the stroke style.
    pub fn stroke(&mut self) -> &mut Self {
        if self.begin_draw("stroke") {
            if let Some(bitmap) = self.surface.bitmap.as_mut() {
                self.surface.backend.stroke(bitmap);
            }
        }
        self
    }

    // =========================================================================
    // Checked path operations
    // =========================================================================

    /// [`fill`](Self::fill), failing if the backend cannot fill paths.
    pub fn try_fill(&mut self) -> PaintResult<&mut Self> {
        self.require(self.capabilities().fill_path, "fill")?;
        Ok(self.fill())
    }

    /// [`quadratic_curve_to`](Self::quadratic_curve_to), failing if the
    /// backend cannot draw curves.
    pub fn try_quadratic_curve_to(
        &mut self,
        cx: f32,
        cy: f32,
        x: f32,
        y: f32,
    ) -> PaintResult<&mut Self> {
        self.require(self.capabilities().curves, "quadratic_curve_to")?;
        Ok(self.quadratic_curve_to(cx, cy, x, y))
    }

    /// [`bezier_curve_to`](Self::bezier_curve_to), failing if the backend
    /// cannot draw curves.
    pub fn try_bezier_curve_to(
        &mut self,
        c1x: f32,
        c1y: f32,
        c2x: f32,
        c2y: f32,
        x: f32,
        y: f32,
    ) -> PaintResult<&mut Self> {
        self.require(self.capabilities().curves, "bezier_curve_to")?;
        Ok(self.bezier_curve_to(c1x, c1y, c2x, c2y, x, y))
    }

    /// [`arc`](Self::arc), failing if the backend cannot draw arcs.
    pub fn try_arc(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        anticlockwise: bool,
    ) -> PaintResult<&mut Self> {
        self.require(self.capabilities().arcs, "arc")?;
        Ok(self.arc(x, y, radius, start_angle, end_angle, anticlockwise))
    }

    /// [`rect`](Self::rect), failing if the backend has no rectangle paths.
    pub fn try_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> PaintResult<&mut Self> {
        self.require(self.capabilities().path_rects, "rect")?;
        Ok(self.rect(x, y, width, height))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn require(&self, supported: bool, op: &'static str) -> PaintResult<()> {
        if self.surface.is_destroyed() {
            return Err(PaintError::SurfaceDestroyed);
        }
        if !supported {
            return Err(PaintError::Unsupported {
                op,
                backend: self.backend_kind(),
            });
        }
        Ok(())
    }

    fn check_alive(&self, op: &'static str) -> bool {
        if self.surface.is_destroyed() {
            warn!(target: "horizon_trellis_render::painter", op, "painter used after its surface was destroyed");
            return false;
        }
        true
    }

    /// Gate for calls that touch the bitmap; moves the surface into the
    /// drawing state.
    fn begin_draw(&mut self, op: &'static str) -> bool {
        if !self.check_alive(op) {
            return false;
        }
        if self.surface.bitmap.is_none() {
            debug!(target: "horizon_trellis_render::painter", op, "no offscreen bitmap; ignored");
            return false;
        }
        if self.surface.state == SurfaceState::Ready {
            self.surface.state = SurfaceState::Drawing;
        }
        true
    }

    fn update(
        &mut self,
        op: &'static str,
        change: impl FnOnce(&mut StateStack),
    ) -> &mut Self {
        if self.check_alive(op) {
            change(&mut self.surface.states);
            self.sync();
        }
        self
    }

    fn sync(&mut self) {
        self.surface.backend.apply_state(self.surface.states.current());
    }
}

/// Saves painter state on creation and restores it on drop.
///
/// Derefs to the painter, so drawing continues through the guard:
///
/// ```
/// use horizon_trellis_core::{BackendKind, SizeI};
/// use horizon_trellis_render::{CanvasSurface, Color, StateSaver};
///
/// let mut surface = CanvasSurface::new(BackendKind::Rich, Color::WHITE);
/// let mut painter = surface.painter(SizeI::new(16, 16));
/// painter.fill_color(Color::RED);
/// {
///     let mut scoped = StateSaver::new(&mut painter);
///     scoped.fill_color(Color::BLUE).fill_rect(0.0, 0.0, 4.0, 4.0);
/// }
/// assert_eq!(painter.state().fill, Color::RED);
/// ```
pub struct StateSaver<'p, 'a> {
    painter: &'p mut Painter<'a>,
}

impl<'p, 'a> StateSaver<'p, 'a> {
    pub fn new(painter: &'p mut Painter<'a>) -> Self {
        painter.save();
        Self { painter }
    }
}

impl<'a> Deref for StateSaver<'_, 'a> {
    type Target = Painter<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.painter
    }
}

impl DerefMut for StateSaver<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.painter
    }
}

impl Drop for StateSaver<'_, '_> {
    fn drop(&mut self) {
        self.painter.restore();
    }
}
