//! Offscreen canvas surface.
//!
//! A [`CanvasSurface`] keeps a [`Bitmap`] sized to its widget, the painter
//! state stack and the drawing backend chosen at creation. Its lifecycle:
//!
//! ```text
//! Uninitialized --prepare(non-empty)--> Ready --first draw--> Drawing
//!       ^                                 ^                      |
//!       +------prepare(empty)-------------+-------flush()--------+
//!
//! any state --destroy()--> Destroyed
//! ```
//!
//! `prepare` with a size different from the bitmap reallocates it (content
//! is lost) and resets the painter state.

use horizon_trellis_core::{BackendKind, SizeI, TrellisConfig};
use tracing::{debug, info, warn};

use crate::backend::{Capabilities, DrawingBackend, create_backend};
use crate::error::{PaintError, PaintResult};
use crate::painter::Painter;
use crate::raster::Bitmap;
use crate::state::{PainterState, StateStack};
use crate::types::Color;

/// Lifecycle state of a canvas surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    /// No bitmap yet, or the widget has no area.
    Uninitialized,
    /// Bitmap allocated at the current size.
    Ready,
    /// Drawing has happened since the last flush.
    Drawing,
    /// Torn down; every painter call is ignored.
    Destroyed,
}

/// Offscreen drawing target for one canvas.
pub struct CanvasSurface {
    pub(crate) bitmap: Option<Bitmap>,
    pub(crate) states: StateStack,
    pub(crate) backend: Box<dyn DrawingBackend>,
    pub(crate) state: SurfaceState,
    background: Color,
}

impl CanvasSurface {
    /// Create an unallocated surface using the given backend.
    pub fn new(kind: BackendKind, background: Color) -> Self {
        let mut backend = create_backend(kind);
        let states = StateStack::new();
        backend.apply_state(states.current());
        debug!(target: "horizon_trellis_render::surface", backend = %kind, "created canvas surface");
        Self {
            bitmap: None,
            states,
            backend,
            state: SurfaceState::Uninitialized,
            background,
        }
    }

    /// Create a surface with the configured backend and background.
    pub fn from_config(config: &TrellisConfig) -> Self {
        Self::new(config.backend, Color::from(config.background))
    }

    /// Lifecycle state.
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Check if the surface was destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.state == SurfaceState::Destroyed
    }

    /// Size of the bitmap, or zero when none is allocated.
    pub fn size(&self) -> SizeI {
        self.bitmap.as_ref().map_or(SizeI::ZERO, Bitmap::size)
    }

    /// The offscreen bitmap.
    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    /// Background color new and cleared content starts from.
    pub fn background(&self) -> Color {
        self.background
    }

    /// The active backend.
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// What the active backend can draw.
    pub fn capabilities(&self) -> Capabilities {
        self.backend.capabilities()
    }

    /// Current painter state.
    pub fn painter_state(&self) -> &PainterState {
        self.states.current()
    }

    /// Make the bitmap match `size`. Returns whether it was reallocated.
    ///
    /// An empty size releases the bitmap.
    pub fn prepare(&mut self, size: SizeI) -> bool {
        if self.is_destroyed() {
            warn!(target: "horizon_trellis_render::surface", "prepare() on a destroyed surface");
            return false;
        }

        if size.is_empty() {
            let released = self.bitmap.take().is_some();
            if released {
                self.backend.reset();
                debug!(target: "horizon_trellis_render::surface", "released offscreen bitmap");
            }
            self.state = SurfaceState::Uninitialized;
            return released;
        }

        if self.size() == size {
            return false;
        }

        let old = self.size();
        self.bitmap = Some(Bitmap::new(size, self.background));
        self.backend.reset();
        self.states.reset();
        self.backend.apply_state(self.states.current());
        self.state = SurfaceState::Ready;

        if old.is_empty() {
            info!(
                target: "horizon_trellis_render::surface",
                width = size.width,
                height = size.height,
                "allocated offscreen bitmap"
            );
        } else {
            debug!(
                target: "horizon_trellis_render::surface",
                old_width = old.width,
                old_height = old.height,
                width = size.width,
                height = size.height,
                "resized offscreen bitmap"
            );
        }
        true
    }

    /// Like [`prepare`](Self::prepare), but reports negative sizes and
    /// destroyed surfaces.
    pub fn try_prepare(&mut self, size: SizeI) -> PaintResult<bool> {
        if self.is_destroyed() {
            return Err(PaintError::SurfaceDestroyed);
        }
        if size.width < 0 || size.height < 0 {
            return Err(PaintError::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }
        Ok(self.prepare(size))
    }

    /// Prepare for `size` and return a painter over this surface.
    pub fn painter(&mut self, size: SizeI) -> Painter<'_> {
        self.prepare(size);
        Painter::new(self)
    }

    /// Painter over the surface as it is, without resizing.
    pub fn painter_unchecked(&mut self) -> Painter<'_> {
        Painter::new(self)
    }

    /// End the paint cycle: tear down the backend's native context and
    /// hand out the bitmap for blitting.
    pub fn flush(&mut self) -> Option<&Bitmap> {
        if self.is_destroyed() {
            debug!(target: "horizon_trellis_render::surface", "flush() on a destroyed surface");
            return None;
        }
        self.backend.flush();
        if self.state == SurfaceState::Drawing {
            self.state = SurfaceState::Ready;
        }
        self.bitmap.as_ref()
    }

    /// Release the bitmap. Later painter calls are logged and ignored.
    pub fn destroy(&mut self) {
        if self.is_destroyed() {
            return;
        }
        self.bitmap = None;
        self.backend.reset();
        self.states.reset();
        self.state = SurfaceState::Destroyed;
        debug!(target: "horizon_trellis_render::surface", "destroyed canvas surface");
    }
}

impl std::fmt::Debug for CanvasSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasSurface")
            .field("state", &self.state)
            .field("size", &self.size())
            .field("backend", &self.backend.kind())
            .field("depth", &self.states.depth())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut surface = CanvasSurface::new(BackendKind::Rich, Color::WHITE);
        assert_eq!(surface.state(), SurfaceState::Uninitialized);
        assert!(surface.bitmap().is_none());

        assert!(surface.prepare(SizeI::new(20, 10)));
        assert_eq!(surface.state(), SurfaceState::Ready);
        assert!(!surface.prepare(SizeI::new(20, 10)));

        surface.painter_unchecked().fill_rect(0.0, 0.0, 5.0, 5.0);
        assert_eq!(surface.state(), SurfaceState::Drawing);

        assert!(surface.flush().is_some());
        assert_eq!(surface.state(), SurfaceState::Ready);

        assert!(surface.prepare(SizeI::ZERO));
        assert_eq!(surface.state(), SurfaceState::Uninitialized);
    }

    #[test]
    fn test_resize_reallocates_and_clears() {
        let mut surface = CanvasSurface::new(BackendKind::Polyline, Color::WHITE);
        surface
            .painter(SizeI::new(10, 10))
            .fill_color(Color::RED)
            .fill_rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(surface.bitmap().unwrap().commands().len(), 1);

        let painter = surface.painter(SizeI::new(30, 15));
        assert_eq!(painter.size(), SizeI::new(30, 15));
        let bitmap = surface.bitmap().unwrap();
        assert!(bitmap.commands().is_empty());
        assert_eq!(bitmap.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(surface.painter_state().fill, Color::BLACK);
    }

    #[test]
    fn test_try_prepare_errors() {
        let mut surface = CanvasSurface::new(BackendKind::Rich, Color::WHITE);
        assert_eq!(
            surface.try_prepare(SizeI::new(-1, 5)),
            Err(PaintError::InvalidDimensions {
                width: -1,
                height: 5
            })
        );
        surface.destroy();
        assert_eq!(
            surface.try_prepare(SizeI::new(1, 1)),
            Err(PaintError::SurfaceDestroyed)
        );
        assert!(surface.flush().is_none());
    }

    #[test]
    fn test_from_config() {
        let config = TrellisConfig::default().with_backend(BackendKind::Polyline);
        let surface = CanvasSurface::from_config(&config);
        assert_eq!(surface.backend_kind(), BackendKind::Polyline);
        assert_eq!(surface.background(), Color::WHITE);
    }
}
