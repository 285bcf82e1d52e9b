//! Box layouts built from layout items.
//!
//! - [`LayoutItem`]: what to arrange and how (alignment, justify, margin,
//!   stretch)
//! - [`BoxLayout`]: a row or column over a native box sizer
//!
//! Widgets produce items through [`Widget::layout`](crate::Widget::layout),
//! layouts through [`BoxLayout::layout`], and [`LayoutItem::spacer`] gives
//! empty space. Items are appended with [`BoxLayout::append`] or `<<`.

mod box_layout;
mod item;

pub use box_layout::{BoxLayout, hbox, resolve_alignment, sizer_flags, vbox};
pub use item::{Alignment, LayoutItem, LayoutTarget, Margin};
