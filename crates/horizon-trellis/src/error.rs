//! Error types for layouts and widgets.

use horizon_trellis_core::{SizerId, TrellisError};
use thiserror::Error;

/// Errors reported by the checked layout operations.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The layout's native sizer no longer exists.
    #[error("native sizer {0:?} no longer exists")]
    MissingSizer(SizerId),

    /// The toolkit rejected the operation, usually because a widget was
    /// destroyed.
    #[error(transparent)]
    Toolkit(#[from] TrellisError),
}

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
