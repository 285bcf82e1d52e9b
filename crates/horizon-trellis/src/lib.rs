//! Horizon Trellis - box layouts and painter-driven canvases.
//!
//! This is the umbrella crate: it adds widget handles, layout items, box
//! layouts and the canvas widget on top of the native toolkit model, and
//! re-exports the public APIs of the core and render crates.
//!
//! # Example
//!
//! ```
//! use horizon_trellis::layout::BoxLayout;
//! use horizon_trellis::{Canvas, Color, SizeI, Toolkit, Widget};
//!
//! let toolkit = Toolkit::default();
//! let frame = Widget::top_level(&toolkit, SizeI::new(320, 240)).unwrap();
//! let title = frame.child(SizeI::new(100, 20)).unwrap();
//! let mut canvas = Canvas::new(&frame, SizeI::new(100, 100)).unwrap();
//!
//! let column = BoxLayout::vbox_on(&frame).unwrap();
//! &column << title.layout().center_horizontal() << canvas.widget().layout().stretch(1).justify();
//!
//! canvas
//!     .painter()
//!     .stroke_color(Color::BLUE)
//!     .begin_path()
//!     .move_to(0.0, 0.0)
//!     .line_to(50.0, 50.0)
//!     .stroke();
//! assert!(canvas.on_paint());
//! ```

mod canvas;
mod error;
pub mod layout;
mod widget;

pub use canvas::Canvas;
pub use error::{LayoutError, LayoutResult};
pub use layout::{BoxLayout, LayoutItem};
pub use widget::Widget;

pub use horizon_trellis_core::*;

/// Painter, canvas surface and drawing backends.
pub mod render {
    pub use horizon_trellis_render::*;
}

pub use horizon_trellis_render::{
    CanvasSurface, Color, DashPattern, Font, FontWeight, LineCap, LineJoin, PaintError,
    PaintResult, Painter, StateSaver,
};
