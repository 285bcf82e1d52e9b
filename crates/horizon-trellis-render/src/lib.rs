//! Retained-mode 2D painter for Horizon Trellis.
//!
//! Application code draws through a [`Painter`] handed out by a
//! [`CanvasSurface`]. Painter calls mutate a [`PainterState`], build a path
//! through the surface's [`DrawingBackend`], and resolve it onto an offscreen
//! [`Bitmap`] that is blitted to the screen on the next paint notification.
//!
//! # Backends
//!
//! The backend is chosen once per surface from
//! [`BackendKind`](horizon_trellis_core::BackendKind):
//!
//! | Operation | Rich | Polyline |
//! |-----------|------|----------|
//! | `move_to`, `line_to`, `close_path`, `stroke` | yes | yes |
//! | `quadratic_curve_to`, `bezier_curve_to`, `arc`, `rect` | yes | ignored |
//! | `fill` | yes | ignored |
//! | `fill_rect`, `stroke_rect`, `clear_rect`, `fill_text`, `draw_image` | yes | yes |
//!
//! Ignored operations are logged at `debug` level on the
//! `horizon_trellis_render::backend` target. Use [`Painter::capabilities`] or
//! the `try_*` painter methods to detect them.
//!
//! # Example
//!
//! ```
//! use horizon_trellis_core::{BackendKind, SizeI};
//! use horizon_trellis_render::{CanvasSurface, Color, DrawCommand};
//!
//! let mut surface = CanvasSurface::new(BackendKind::Polyline, Color::WHITE);
//! surface
//!     .painter(SizeI::new(32, 32))
//!     .begin_path()
//!     .move_to(0.0, 0.0)
//!     .line_to(10.0, 0.0)
//!     .stroke();
//!
//! let bitmap = surface.flush().unwrap();
//! assert!(matches!(bitmap.commands()[0], DrawCommand::Line { .. }));
//! ```

pub mod backend;
mod error;
mod paint;
mod painter;
pub mod path;
pub mod raster;
mod state;
mod surface;
mod types;

pub use backend::{ArcSpec, Capabilities, DrawingBackend, PolylineBackend, RichPathBackend};
pub use error::{PaintError, PaintResult};
pub use paint::{DashPattern, LineCap, LineJoin, Stroke};
pub use painter::{Painter, StateSaver};
pub use path::{Path, PathCommand};
pub use raster::{Bitmap, DrawCommand};
pub use state::{PainterState, StateStack};
pub use surface::{CanvasSurface, SurfaceState};
pub use types::{Color, Font, FontWeight};
