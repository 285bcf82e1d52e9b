//! Native box sizer model.
//!
//! A sizer is an ordered container of `(child, flags)` entries. Children are
//! windows, nested sizers or empty spacer cells. The solver in this module is
//! a constraint pass in two steps:
//!
//! 1. **Minimum sizes (bottom-up)**: each entry's minimum is its child's
//!    best size (or the nested sizer's minimum) plus its border. A sizer's
//!    minimum sums entries along the main axis and takes the maximum across.
//! 2. **Distribution (top-down)**: entries with proportion 0 get their
//!    minimum along the main axis; the remaining space is shared between the
//!    stretchable entries by proportion. An entry whose share would fall
//!    below its minimum is pinned to the minimum and the rest is shared
//!    again. On the cross axis an entry either expands to fill the cell or
//!    keeps its minimum and is placed by its alignment.

use crate::geometry::{Sides, SizeI};
use crate::native::{SizerId, WidgetId};

/// Layout orientation for box sizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Items are arranged left to right.
    #[default]
    Horizontal,
    /// Items are arranged top to bottom.
    Vertical,
}

impl Orientation {
    /// Get the cross (perpendicular) orientation.
    #[inline]
    pub fn cross(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Main axis component of a size.
    #[inline]
    pub fn main(self, size: SizeI) -> i32 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    /// Cross axis component of a size.
    #[inline]
    pub fn cross_of(self, size: SizeI) -> i32 {
        self.cross().main(size)
    }

    /// Build a size from main and cross axis values.
    #[inline]
    pub fn make_size(self, main: i32, cross: i32) -> SizeI {
        match self {
            Orientation::Horizontal => SizeI::new(main, cross),
            Orientation::Vertical => SizeI::new(cross, main),
        }
    }
}

/// Horizontal placement of a child inside its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical placement of a child inside its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Arrangement flags for one sizer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizerFlags {
    /// Horizontal alignment within the cell.
    pub h_align: HAlign,
    /// Vertical alignment within the cell.
    pub v_align: VAlign,
    /// Fill the cell along the cross axis.
    pub expand: bool,
    /// Border around the child, in pixels.
    pub border: Sides<i32>,
    /// Share of extra main-axis space; 0 keeps the minimum size.
    pub proportion: u32,
}

impl SizerFlags {
    /// Flags with no border, no expansion and proportion 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the proportion.
    pub fn proportion(mut self, proportion: u32) -> Self {
        self.proportion = proportion;
        self
    }

    /// Set the border.
    pub fn border(mut self, border: impl Into<Sides<i32>>) -> Self {
        self.border = border.into();
        self
    }

    /// Expand along the cross axis.
    pub fn expand(mut self) -> Self {
        self.expand = true;
        self
    }

    /// Set the alignment.
    pub fn align(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }
}

/// What a sizer entry arranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizerChild {
    /// A native window.
    Window(WidgetId),
    /// A nested sizer, owned by the containing sizer.
    Sizer(SizerId),
    /// An empty cell of fixed size.
    Spacer(SizeI),
}

/// One entry in a sizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizerItem {
    /// The arranged child.
    pub child: SizerChild,
    /// How the child is arranged.
    pub flags: SizerFlags,
}

impl SizerItem {
    /// Check if this entry arranges a window.
    pub fn is_window(&self) -> bool {
        matches!(self.child, SizerChild::Window(_))
    }

    /// Check if this entry is a nested sizer.
    pub fn is_sizer(&self) -> bool {
        matches!(self.child, SizerChild::Sizer(_))
    }

    /// Check if this entry is a spacer.
    pub fn is_spacer(&self) -> bool {
        matches!(self.child, SizerChild::Spacer(_))
    }
}

/// Distribute main-axis space among sizer entries.
///
/// `items` holds `(minimum, proportion)` per entry. Fixed entries keep their
/// minimum; stretchable entries share what is left by proportion, never
/// dropping below their minimum. Integer remainders go to the earliest
/// stretchable entries so the result tiles `available` exactly whenever the
/// minimums fit.
pub fn distribute_space(items: &[(i32, u32)], available: i32) -> Vec<i32> {
    let mut sizes: Vec<i32> = items.iter().map(|(min, _)| *min).collect();

    let fixed: i64 = items
        .iter()
        .filter(|(_, proportion)| *proportion == 0)
        .map(|(min, _)| *min as i64)
        .sum();
    let mut remaining = available as i64 - fixed;
    let mut stretchable: Vec<usize> = (0..items.len())
        .filter(|&i| items[i].1 > 0)
        .collect();

    loop {
        let total: i64 = stretchable.iter().map(|&i| items[i].1 as i64).sum();
        if stretchable.is_empty() || total == 0 {
            break;
        }

        // Pin every entry whose share cannot cover its minimum, then retry
        // with what is left.
        let before = stretchable.len();
        let budget = remaining;
        stretchable.retain(|&i| {
            let (min, proportion) = items[i];
            let share = budget * proportion as i64 / total;
            if share < min as i64 {
                sizes[i] = min;
                remaining -= min as i64;
                false
            } else {
                true
            }
        });
        if stretchable.len() != before {
            continue;
        }

        let mut assigned = 0;
        for &i in &stretchable {
            let share = remaining * items[i].1 as i64 / total;
            sizes[i] = share as i32;
            assigned += share;
        }
        let mut leftover = remaining - assigned;
        for &i in &stretchable {
            if leftover <= 0 {
                break;
            }
            sizes[i] += 1;
            leftover -= 1;
        }
        break;
    }

    sizes
}

/// Place an entry on the cross axis of its cell.
///
/// Returns `(offset, size)` relative to the cell start.
pub fn place_cross(cell: i32, minimum: i32, expand: bool, align: CrossAlign) -> (i32, i32) {
    if expand {
        return (0, cell.max(0));
    }
    let size = minimum.min(cell).max(0);
    let offset = match align {
        CrossAlign::Start => 0,
        CrossAlign::Center => (cell - size) / 2,
        CrossAlign::End => cell - size,
    };
    (offset, size)
}

/// Alignment on whichever axis is the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossAlign {
    Start,
    Center,
    End,
}

impl SizerFlags {
    /// The alignment that applies on the cross axis of a sizer with the
    /// given orientation.
    pub fn cross_align(&self, orientation: Orientation) -> CrossAlign {
        match orientation {
            Orientation::Horizontal => match self.v_align {
                VAlign::Top => CrossAlign::Start,
                VAlign::Center => CrossAlign::Center,
                VAlign::Bottom => CrossAlign::End,
            },
            Orientation::Vertical => match self.h_align {
                HAlign::Left => CrossAlign::Start,
                HAlign::Center => CrossAlign::Center,
                HAlign::Right => CrossAlign::End,
            },
        }
    }
}
