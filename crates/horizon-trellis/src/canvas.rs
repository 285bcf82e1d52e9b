//! Canvas widget.
//!
//! A [`Canvas`] is a native child widget with an offscreen
//! [`CanvasSurface`]. Drawing happens through [`Canvas::painter`], which
//! sizes the surface to the widget and asks the toolkit for a repaint; the
//! native paint notification then calls [`Canvas::on_paint`] to blit the
//! bitmap onto the widget's screen.
//!
//! ```
//! use horizon_trellis::{Canvas, Color, SizeI, Toolkit, Widget};
//!
//! let toolkit = Toolkit::default();
//! let frame = Widget::top_level(&toolkit, SizeI::new(64, 64)).unwrap();
//! let mut canvas = Canvas::new(&frame, SizeI::new(32, 32)).unwrap();
//!
//! canvas
//!     .painter()
//!     .fill_color(Color::RED)
//!     .fill_rect(0.0, 0.0, 32.0, 32.0);
//!
//! assert_eq!(toolkit.take_paint_requests(), vec![canvas.id()]);
//! assert!(canvas.on_paint());
//! let screen = toolkit.screen(canvas.id()).unwrap().unwrap();
//! assert_eq!(screen.get_pixel(16, 16).0, [255, 0, 0, 255]);
//! ```

use horizon_trellis_core::{SizeI, TrellisResult, WidgetId};
use horizon_trellis_render::{CanvasSurface, Painter};
use tracing::{debug, trace, warn};

use crate::widget::Widget;

/// A widget drawn with a painter.
#[derive(Debug)]
pub struct Canvas {
    widget: Widget,
    surface: CanvasSurface,
}

impl Canvas {
    /// Create a canvas as a child of `parent`, using the toolkit's
    /// configured backend and background.
    pub fn new(parent: &Widget, best_size: SizeI) -> TrellisResult<Self> {
        let widget = parent.child(best_size)?;
        let mut surface = CanvasSurface::from_config(parent.toolkit().config());
        surface.prepare(widget.size());
        debug!(
            target: "horizon_trellis::canvas",
            id = ?widget.id(),
            backend = %surface.backend_kind(),
            "created canvas"
        );
        Ok(Self { widget, surface })
    }

    #[inline]
    pub fn id(&self) -> WidgetId {
        self.widget.id()
    }

    /// The canvas widget, for layouts and geometry.
    #[inline]
    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    /// The offscreen surface.
    #[inline]
    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    /// Start drawing.
    ///
    /// The surface is sized to the widget's client area, reallocating it
    /// when the widget was resized, and a repaint is requested. Once the
    /// widget is destroyed the painter ignores every call.
    pub fn painter(&mut self) -> Painter<'_> {
        let id = self.widget.id();
        let toolkit = self.widget.toolkit();
        match toolkit.client_size(id) {
            Ok(size) => {
                if let Err(err) = toolkit.refresh(id) {
                    warn!(target: "horizon_trellis::canvas", ?id, %err, "failed to request repaint");
                }
                self.surface.painter(size)
            }
            Err(_) => {
                if !self.surface.is_destroyed() {
                    warn!(target: "horizon_trellis::canvas", ?id, "painter() on a destroyed canvas");
                    self.surface.destroy();
                }
                self.surface.painter_unchecked()
            }
        }
    }

    /// Handle the native paint notification: flush the surface and copy its
    /// bitmap to the widget's screen. Returns whether anything was copied.
    pub fn on_paint(&mut self) -> bool {
        let id = self.widget.id();
        if !self.widget.is_alive() {
            debug!(target: "horizon_trellis::canvas", ?id, "paint notification for a destroyed canvas");
            self.surface.destroy();
            return false;
        }

        let Some(bitmap) = self.surface.flush() else {
            trace!(target: "horizon_trellis::canvas", ?id, "nothing to paint");
            return false;
        };
        let pixels = bitmap.pixels().clone();
        match self.widget.toolkit().present(id, pixels) {
            Ok(()) => true,
            Err(err) => {
                warn!(target: "horizon_trellis::canvas", ?id, %err, "failed to present canvas");
                false
            }
        }
    }

    /// Destroy the widget and release the surface.
    pub fn destroy(&mut self) {
        self.widget.destroy();
        self.surface.destroy();
    }
}
