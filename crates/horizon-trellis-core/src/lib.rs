//! Core systems for Horizon Trellis.
//!
//! This crate provides the foundation the layout and drawing layers build on:
//!
//! - **Geometry**: integer and floating point points, sizes, rectangles and
//!   per-side spacing
//! - **Native model**: widgets with parent/child ownership and tab order,
//!   box sizers with a constraint solver, paint requests and screens
//! - **Configuration**: spacing metrics, default border, drawing backend
//! - **Logging**: `tracing` targets for each subsystem
//!
//! # Example
//!
//! ```
//! use horizon_trellis_core::{Orientation, SizeI, SizerChild, SizerFlags, Toolkit};
//!
//! let toolkit = Toolkit::default();
//! let frame = toolkit.create_widget(None, SizeI::new(200, 60)).unwrap();
//! let ok = toolkit.create_widget(Some(frame), SizeI::new(80, 24)).unwrap();
//!
//! let row = toolkit.create_sizer(Orientation::Horizontal);
//! toolkit
//!     .sizer_add(row, SizerChild::Window(ok), SizerFlags::new().proportion(1).expand())
//!     .unwrap();
//! toolkit.set_layout(frame, row).unwrap();
//!
//! assert_eq!(toolkit.geometry(ok).unwrap().size, SizeI::new(200, 60));
//! ```

pub mod config;
mod error;
pub mod geometry;
pub mod logging;
pub mod native;
pub mod sizer;

pub use config::{BackendKind, TrellisConfig};
pub use error::{TrellisError, TrellisResult};
pub use geometry::{
    Coord, Point, PointF, PointI, Rect, RectF, RectI, Sides, Size, SizeF, SizeI,
};
pub use logging::PerfSpan;
pub use native::{NativeRegistry, SizerId, SizerOwner, Toolkit, WidgetId};
pub use sizer::{HAlign, Orientation, SizerChild, SizerFlags, SizerItem, VAlign};

// Re-export the pixel buffer type used for screens.
pub use image::RgbaImage;
