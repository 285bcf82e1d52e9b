//! Error types for the render crate.

use horizon_trellis_core::BackendKind;
use thiserror::Error;

/// Errors reported by the `try_*` painter operations.
///
/// The fluent painter API never returns these; it logs and carries on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaintError {
    /// `restore()` was called with no matching `save()`.
    #[error("restore() called with no saved state")]
    StateUnderflow,

    /// The active drawing backend cannot perform the operation.
    #[error("`{op}` is not supported by the {backend} backend")]
    Unsupported {
        op: &'static str,
        backend: BackendKind,
    },

    /// The surface (or the widget owning it) has been destroyed.
    #[error("canvas surface has been destroyed")]
    SurfaceDestroyed,

    /// Invalid surface dimensions (negative width or height).
    #[error("invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}

/// Result type for paint operations.
pub type PaintResult<T> = Result<T, PaintError>;
