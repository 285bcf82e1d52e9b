//! Logging facilities for Horizon Trellis.
//!
//! Horizon Trellis uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_trellis=debug")
//!     .init();
//! ```
//!
//! Misused layout and painter calls never panic in release builds; they are
//! reported here instead, so a subscriber at `warn` level is the quickest
//! way to find missing output.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_trellis_core";
    /// Native toolkit model (widgets, tab order, paint requests).
    pub const NATIVE: &str = "horizon_trellis_core::native";
    /// Box sizer solver.
    pub const SIZER: &str = "horizon_trellis_core::sizer";
    /// Configuration loading.
    pub const CONFIG: &str = "horizon_trellis_core::config";
    /// Layout items and box layouts.
    pub const LAYOUT: &str = "horizon_trellis::layout";
    /// Canvas widget.
    pub const CANVAS: &str = "horizon_trellis::canvas";
    /// Painter calls and state stack.
    pub const PAINTER: &str = "horizon_trellis_render::painter";
    /// Offscreen surface lifecycle.
    pub const SURFACE: &str = "horizon_trellis_render::surface";
    /// Drawing backends.
    pub const BACKEND: &str = "horizon_trellis_render::backend";
    /// Spans opened by [`PerfSpan`](super::PerfSpan).
    pub const PERF: &str = "horizon_trellis::perf";
}

/// A guard that keeps a tracing span entered until dropped.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_trellis::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }

    #[test]
    fn test_targets_are_namespaced() {
        for target in [
            targets::NATIVE,
            targets::SIZER,
            targets::CONFIG,
            targets::LAYOUT,
            targets::CANVAS,
            targets::PAINTER,
            targets::SURFACE,
            targets::BACKEND,
            targets::PERF,
        ] {
            assert!(target.starts_with("horizon_trellis"));
        }
    }
}
