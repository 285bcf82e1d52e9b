//! Error types for the core crate.

use thiserror::Error;

use crate::native::{SizerId, WidgetId};

/// Errors that can occur in the native toolkit model or configuration.
#[derive(Error, Debug)]
pub enum TrellisError {
    /// The widget handle is invalid or the widget has been destroyed.
    #[error("invalid or destroyed widget {0:?}")]
    InvalidWidget(WidgetId),

    /// The sizer handle is invalid or the sizer has been destroyed.
    #[error("invalid or destroyed sizer {0:?}")]
    InvalidSizer(SizerId),

    /// The sizer is already installed in another widget or sizer.
    #[error("sizer {0:?} already has an owner")]
    SizerAlreadyOwned(SizerId),

    /// Adding the sizer would make it contain itself.
    #[error("sizer {0:?} cannot be nested inside itself")]
    SizerCycle(SizerId),

    /// Failed to parse a configuration document.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A configuration value was out of range.
    #[error("invalid configuration value for `{key}`: {reason}")]
    InvalidConfigValue { key: &'static str, reason: String },

    /// Failed to read a configuration file.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations.
pub type TrellisResult<T> = Result<T, TrellisError>;
