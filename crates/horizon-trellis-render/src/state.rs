//! Painter state and the save/restore stack.

use glam::{Affine2, Vec2};
use horizon_trellis_core::PointF;
use tracing::warn;

use crate::error::{PaintError, PaintResult};
use crate::paint::{DashPattern, LineCap, LineJoin, Stroke};
use crate::types::{Color, Font};

/// The drawing state a painter resolves paths against.
#[derive(Debug, Clone, PartialEq)]
pub struct PainterState {
    /// Color used by `fill`, `fill_rect` and `fill_text`.
    pub fill: Color,
    /// Color used by `stroke` and `stroke_rect`.
    pub stroke: Color,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub line_dash: DashPattern,
    pub font: Font,
    /// User space to device space.
    pub transform: Affine2,
}

impl Default for PainterState {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            line_dash: DashPattern::SOLID,
            font: Font::default(),
            transform: Affine2::IDENTITY,
        }
    }
}

impl PainterState {
    /// Stroke style for the current state, with the line width and dash
    /// lengths scaled into device space.
    pub fn stroke_style(&self) -> Stroke {
        let scale = self.transform.matrix2.determinant().abs().sqrt();
        Stroke {
            color: self.stroke,
            width: self.line_width * scale,
            cap: self.line_cap,
            join: self.line_join,
            miter_limit: Stroke::default().miter_limit,
            dash: self.line_dash.scaled(scale),
        }
    }

    /// Map a user-space point to device space.
    #[inline]
    pub fn to_device(&self, point: PointF) -> PointF {
        let p = self.transform.transform_point2(Vec2::new(point.x, point.y));
        PointF::new(p.x, p.y)
    }
}

/// Current painter state plus the stack of saved states.
#[derive(Debug, Clone, Default)]
pub struct StateStack {
    stack: Vec<PainterState>,
    current: PainterState,
}

impl StateStack {
    /// Create a new state stack with default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state.
    #[inline]
    pub fn current(&self) -> &PainterState {
        &self.current
    }

    /// Get mutable access to the current state.
    #[inline]
    pub fn current_mut(&mut self) -> &mut PainterState {
        &mut self.current
    }

    /// Save the current state.
    pub fn save(&mut self) {
        self.stack.push(self.current.clone());
    }

    /// Restore the most recently saved state.
    ///
    /// With nothing saved the current state is kept and
    /// [`PaintError::StateUnderflow`] is returned.
    pub fn restore(&mut self) -> PaintResult<()> {
        match self.stack.pop() {
            Some(state) => {
                self.current = state;
                Ok(())
            }
            None => {
                warn!(
                    target: "horizon_trellis_render::painter",
                    "restore() without a matching save(); keeping current state"
                );
                Err(PaintError::StateUnderflow)
            }
        }
    }

    /// Number of saved states.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Reset to default state and clear the stack.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.current = PainterState::default();
    }

    /// Apply a translation in user space.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.current.transform = self.current.transform * Affine2::from_translation(Vec2::new(dx, dy));
    }

    /// Apply a scale in user space.
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.current.transform = self.current.transform * Affine2::from_scale(Vec2::new(sx, sy));
    }

    /// Apply a rotation in radians, clockwise in device space.
    pub fn rotate(&mut self, angle: f32) {
        self.current.transform = self.current.transform * Affine2::from_angle(angle);
    }
}
