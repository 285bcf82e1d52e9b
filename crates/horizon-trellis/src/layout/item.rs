//! Layout items.
//!
//! A [`LayoutItem`] is a short-lived description of one entry in a box
//! layout: what to arrange (a widget, a nested layout, or empty space) and
//! how (alignment, justify, margin, stretch). It refers to its target
//! without owning it; once appended, the native sizer arranges the target.
//!
//! ```
//! use horizon_trellis::layout::{Alignment, LayoutItem};
//!
//! let item = LayoutItem::spacer().left().center().stretch(2).justify();
//! assert_eq!(item.alignment(), Some(Alignment::Center));
//! assert!(item.is_justified());
//! assert_eq!(item.stretch_factor(), 2);
//! ```

use horizon_trellis_core::{Sides, SizerId, TrellisConfig, WidgetId};

/// What a layout item arranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutTarget {
    /// A native widget.
    Widget(WidgetId),
    /// A nested layout, by its native sizer.
    Layout(SizerId),
    /// Empty space.
    #[default]
    Empty,
}

/// Placement of an item inside its cell. Only one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Top,
    Bottom,
    CenterHorizontal,
    CenterVertical,
    /// Centered on both axes.
    Center,
}

/// Spacing around an item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Margin {
    /// Multiples of the platform spacing unit.
    Units(Sides<i32>),
    /// Raw pixels.
    Pixels(Sides<i32>),
}

impl Margin {
    /// Pixel sides under the given configuration.
    pub fn to_pixels(self, config: &TrellisConfig) -> Sides<i32> {
        match self {
            Margin::Units(sides) => sides.scaled(config.spacing_unit),
            Margin::Pixels(sides) => sides,
        }
    }
}

/// A configurable entry for a box layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutItem {
    target: LayoutTarget,
    alignment: Option<Alignment>,
    justify: bool,
    margin: Option<Margin>,
    stretch: u32,
}

impl LayoutItem {
    /// An item arranging a widget.
    pub fn widget(id: WidgetId) -> Self {
        Self::with_target(LayoutTarget::Widget(id))
    }

    /// An item arranging a nested layout.
    pub fn nested(sizer: SizerId) -> Self {
        Self::with_target(LayoutTarget::Layout(sizer))
    }

    /// An empty item; appended, it becomes a spacer.
    pub fn spacer() -> Self {
        Self::default()
    }

    fn with_target(target: LayoutTarget) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    // =========================================================================
    // Builders
    // =========================================================================

    pub fn left(self) -> Self {
        self.align(Alignment::Left)
    }

    pub fn right(self) -> Self {
        self.align(Alignment::Right)
    }

    pub fn top(self) -> Self {
        self.align(Alignment::Top)
    }

    pub fn bottom(self) -> Self {
        self.align(Alignment::Bottom)
    }

    pub fn center(self) -> Self {
        self.align(Alignment::Center)
    }

    pub fn center_horizontal(self) -> Self {
        self.align(Alignment::CenterHorizontal)
    }

    pub fn center_vertical(self) -> Self {
        self.align(Alignment::CenterVertical)
    }

    /// Set the alignment, replacing any previous one.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Fill the cell on the axis perpendicular to the layout.
    pub fn justify(mut self) -> Self {
        self.justify = true;
        self
    }

    /// Margin in spacing units, in CSS order through [`Sides`]:
    /// `margin(1)`, `margin((1, 2))`, `margin((1, 2, 3))`,
    /// `margin((1, 2, 3, 4))`.
    pub fn margin(mut self, sides: impl Into<Sides<i32>>) -> Self {
        self.margin = Some(Margin::Units(sides.into()));
        self
    }

    /// Margin in pixels.
    pub fn margin_px(mut self, sides: impl Into<Sides<i32>>) -> Self {
        self.margin = Some(Margin::Pixels(sides.into()));
        self
    }

    /// One spacing unit on every side.
    pub fn default_margin(self) -> Self {
        self.margin(1)
    }

    /// Share of the extra space along the layout; 0 sizes to content.
    pub fn stretch(mut self, factor: u32) -> Self {
        self.stretch = factor;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn target(&self) -> LayoutTarget {
        self.target
    }

    #[inline]
    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    #[inline]
    pub fn is_justified(&self) -> bool {
        self.justify
    }

    #[inline]
    pub fn margin_setting(&self) -> Option<Margin> {
        self.margin
    }

    #[inline]
    pub fn stretch_factor(&self) -> u32 {
        self.stretch
    }

    /// Margin in pixels. Without an explicit margin, widgets and spacers get
    /// the configured default border and nested layouts get none.
    pub fn resolved_margin(&self, config: &TrellisConfig) -> Sides<i32> {
        match (self.margin, self.target) {
            (Some(margin), _) => margin.to_pixels(config),
            (None, LayoutTarget::Layout(_)) => Sides::ZERO,
            (None, _) => Sides::uniform(config.default_border),
        }
    }
}

impl From<WidgetId> for LayoutItem {
    fn from(id: WidgetId) -> Self {
        Self::widget(id)
    }
}
