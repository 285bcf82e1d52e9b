//! Toolkit configuration.
//!
//! [`TrellisConfig`] carries the platform metrics the layout code needs
//! (spacing unit, default border) and the drawing backend selection for
//! canvases. It can be built with [`Default`], parsed from TOML, and then
//! adjusted from the environment:
//!
//! ```
//! use horizon_trellis_core::{BackendKind, TrellisConfig};
//!
//! let config = TrellisConfig::from_toml_str(
//!     r##"
//!     spacing_unit = 4
//!     backend = "polyline"
//!     background = "#202020"
//!     "##,
//! )
//! .unwrap();
//!
//! assert_eq!(config.spacing_unit, 4);
//! assert_eq!(config.backend, BackendKind::Polyline);
//! assert_eq!(config.background, [0x20, 0x20, 0x20, 0xFF]);
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::{TrellisError, TrellisResult};

/// Environment variable overriding [`TrellisConfig::backend`].
pub const BACKEND_ENV: &str = "TRELLIS_BACKEND";

/// Environment variable overriding [`TrellisConfig::spacing_unit`].
pub const SPACING_UNIT_ENV: &str = "TRELLIS_SPACING_UNIT";

/// Recommended spacing between controls, in pixels.
pub const DEFAULT_SPACING_UNIT: i32 = 5;

/// Drawing capability level used by canvases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Full vector path rendering (curves, fills, arcs).
    #[default]
    Rich,
    /// Line-only fallback: strokes are drawn as individual segments.
    Polyline,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rich => write!(f, "rich"),
            Self::Polyline => write!(f, "polyline"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = TrellisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rich" => Ok(Self::Rich),
            "polyline" => Ok(Self::Polyline),
            other => Err(TrellisError::InvalidConfigValue {
                key: "backend",
                reason: format!("unknown backend `{other}`"),
            }),
        }
    }
}

/// Configuration shared by every component created from a toolkit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrellisConfig {
    /// Platform-recommended spacing unit in pixels. Layout margins given in
    /// units are multiplied by this value.
    pub spacing_unit: i32,
    /// Border in pixels applied to widget and spacer items that never had a
    /// margin set.
    pub default_border: i32,
    /// Drawing backend used by newly created canvases.
    pub backend: BackendKind,
    /// Canvas background as non-premultiplied RGBA bytes.
    #[serde(deserialize_with = "deserialize_hex_color")]
    pub background: [u8; 4],
}

impl Default for TrellisConfig {
    fn default() -> Self {
        Self {
            spacing_unit: DEFAULT_SPACING_UNIT,
            default_border: DEFAULT_SPACING_UNIT,
            backend: BackendKind::default(),
            background: [0xFF, 0xFF, 0xFF, 0xFF],
        }
    }
}

impl TrellisConfig {
    /// Parse a configuration from a TOML document. Missing keys use defaults.
    pub fn from_toml_str(source: &str) -> TrellisResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> TrellisResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        debug!(
            target: "horizon_trellis_core::config",
            path = %path.display(),
            "loaded configuration file"
        );
        Self::from_toml_str(&source)
    }

    /// Apply overrides from `TRELLIS_BACKEND` and `TRELLIS_SPACING_UNIT`.
    pub fn with_env_overrides(self) -> TrellisResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> TrellisResult<Self> {
        if let Some(value) = lookup(BACKEND_ENV) {
            self.backend = value.parse()?;
        }
        if let Some(value) = lookup(SPACING_UNIT_ENV) {
            self.spacing_unit =
                value
                    .trim()
                    .parse()
                    .map_err(|err| TrellisError::InvalidConfigValue {
                        key: "spacing_unit",
                        reason: format!("{err}"),
                    })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Set the backend.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Set the spacing unit.
    pub fn with_spacing_unit(mut self, unit: i32) -> Self {
        self.spacing_unit = unit;
        self
    }

    /// Set the default border.
    pub fn with_default_border(mut self, border: i32) -> Self {
        self.default_border = border;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> TrellisResult<()> {
        if self.spacing_unit < 0 {
            return Err(TrellisError::InvalidConfigValue {
                key: "spacing_unit",
                reason: format!("must be non-negative, got {}", self.spacing_unit),
            });
        }
        if self.default_border < 0 {
            return Err(TrellisError::InvalidConfigValue {
                key: "default_border",
                reason: format!("must be non-negative, got {}", self.default_border),
            });
        }
        Ok(())
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA` into RGBA bytes.
pub fn parse_hex_rgba(hex: &str) -> Option<[u8; 4]> {
    let hex = hex.trim().trim_start_matches('#');
    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let a = if hex.len() == 8 { channel(6)? } else { 0xFF };
    Some([channel(0)?, channel(2)?, channel(4)?, a])
}

fn deserialize_hex_color<'de, D>(deserializer: D) -> Result<[u8; 4], D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_hex_rgba(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrellisConfig::default();
        assert_eq!(config.spacing_unit, DEFAULT_SPACING_UNIT);
        assert_eq!(config.default_border, DEFAULT_SPACING_UNIT);
        assert_eq!(config.backend, BackendKind::Rich);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TrellisConfig::from_toml_str("default_border = 2").unwrap();
        assert_eq!(config.default_border, 2);
        assert_eq!(config.spacing_unit, DEFAULT_SPACING_UNIT);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(TrellisConfig::from_toml_str("spacing = 3").is_err());
    }

    #[test]
    fn test_negative_spacing_rejected() {
        let err = TrellisConfig::from_toml_str("spacing_unit = -1").unwrap_err();
        assert!(matches!(
            err,
            TrellisError::InvalidConfigValue {
                key: "spacing_unit",
                ..
            }
        ));
    }

    #[test]
    fn test_overrides() {
        let config = TrellisConfig::default()
            .with_overrides(|key| match key {
                BACKEND_ENV => Some("Polyline".to_string()),
                SPACING_UNIT_ENV => Some(" 8 ".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.backend, BackendKind::Polyline);
        assert_eq!(config.spacing_unit, 8);

        let bad = TrellisConfig::default().with_overrides(|key| {
            (key == BACKEND_ENV).then(|| "opengl".to_string())
        });
        assert!(bad.is_err());
    }

    #[test]
    fn test_parse_hex_rgba() {
        assert_eq!(parse_hex_rgba("#FF0000"), Some([255, 0, 0, 255]));
        assert_eq!(parse_hex_rgba("00ff0080"), Some([0, 255, 0, 128]));
        assert_eq!(parse_hex_rgba("#FFF"), None);
        assert_eq!(parse_hex_rgba("#GG0000"), None);
    }
}
