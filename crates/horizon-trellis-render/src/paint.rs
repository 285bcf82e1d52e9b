//! Stroke style types.

use crate::types::Color;

/// Stroke style options resolved from the painter state.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    /// Line cap style.
    pub cap: LineCap,
    /// Line join style.
    pub join: LineJoin,
    /// Miter limit for miter joins.
    pub miter_limit: f32,
    /// Dash pattern; solid when empty.
    pub dash: DashPattern,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 4.0,
            dash: DashPattern::SOLID,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given color and width.
    #[inline]
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Default::default()
        }
    }

    /// Set the line cap style.
    #[inline]
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Set the line join style.
    #[inline]
    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    /// Set a dash pattern.
    #[inline]
    pub fn with_dash(mut self, pattern: DashPattern) -> Self {
        self.dash = pattern;
        self
    }
}

/// Line cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Flat cap at the exact endpoint.
    #[default]
    Butt,
    /// Rounded cap extending past the endpoint.
    Round,
    /// Square cap extending past the endpoint.
    Square,
}

/// Line join style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Sharp corner (may be limited by miter limit).
    #[default]
    Miter,
    /// Rounded corner.
    Round,
    /// Beveled corner.
    Bevel,
}

/// Dash pattern for stroked lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashPattern {
    /// Alternating lengths of dashes and gaps.
    pub pattern: Vec<f32>,
    /// Offset into the pattern to start.
    pub offset: f32,
}

impl DashPattern {
    /// A solid line.
    pub const SOLID: Self = Self {
        pattern: Vec::new(),
        offset: 0.0,
    };

    /// Create a new dash pattern.
    #[inline]
    pub fn new(pattern: Vec<f32>, offset: f32) -> Self {
        Self { pattern, offset }
    }

    /// Create a simple dash pattern with equal dash and gap lengths.
    #[inline]
    pub fn simple(dash_length: f32, gap_length: f32) -> Self {
        Self {
            pattern: vec![dash_length, gap_length],
            offset: 0.0,
        }
    }

    /// Check if this pattern draws a solid line.
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.pattern.iter().all(|len| *len <= 0.0)
    }

    /// The pattern with every length multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            pattern: self.pattern.iter().map(|len| len * factor).collect(),
            offset: self.offset * factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_defaults() {
        let stroke = Stroke::default();
        assert_eq!(stroke.width, 1.0);
        assert_eq!(stroke.cap, LineCap::Butt);
        assert_eq!(stroke.join, LineJoin::Miter);
        assert!(stroke.dash.is_solid());
    }

    #[test]
    fn test_dash_pattern() {
        let dash = DashPattern::simple(5.0, 3.0);
        assert_eq!(dash.pattern, vec![5.0, 3.0]);
        assert!(!dash.is_solid());
        assert!(DashPattern::SOLID.is_solid());
    }
}
