//! Box layout for arranging widgets in a row or column.
//!
//! `BoxLayout` is a thin adapter over a native box sizer: it translates
//! [`LayoutItem`] settings into sizer flags and keeps keyboard navigation
//! in step with the visual order.
//!
//! # Example
//!
//! ```
//! use horizon_trellis::layout::{BoxLayout, LayoutItem};
//! use horizon_trellis::{SizeI, Toolkit, Widget};
//!
//! let toolkit = Toolkit::default();
//! let frame = Widget::top_level(&toolkit, SizeI::new(200, 40)).unwrap();
//! let ok = frame.child(SizeI::new(80, 24)).unwrap();
//! let cancel = frame.child(SizeI::new(80, 24)).unwrap();
//!
//! let row = BoxLayout::hbox_on(&frame).unwrap();
//! &row << LayoutItem::spacer().stretch(1) << ok.layout() << cancel.layout();
//!
//! assert_eq!(row.len(), 3);
//! assert_eq!(frame.children(), vec![ok.id(), cancel.id()]);
//! ```
//!
//! # Append Algorithm
//!
//! Each appended item goes through the same steps in call order:
//!
//! 1. The item is added to the native sizer: a widget as a window entry, a
//!    nested layout as a child sizer, an empty item as a 0×0 spacer. If the
//!    sizer rejects it, nothing else changes.
//! 2. A widget is moved to the end of its parent's tab order, so tabbing
//!    follows the order the layout shows.
//! 3. A nested layout gets the same treatment for every widget it
//!    arranges, recursively.
//! 4. The widget owning the layout, if any, is laid out again.

use std::ops::Shl;

use horizon_trellis_core::{
    HAlign, Orientation, SizeI, SizerChild, SizerFlags, SizerId, SizerItem, Toolkit,
    TrellisConfig, VAlign,
};
use tracing::{debug, error, trace, warn};

use super::item::{Alignment, LayoutItem, LayoutTarget};
use crate::error::{LayoutError, LayoutResult};
use crate::widget::Widget;

/// A row or column of layout items backed by a native box sizer.
///
/// The orientation is fixed at construction. Items can only be appended.
/// Dropping a layout that was never installed destroys its sizer; an
/// installed sizer lives as long as the widget or layout holding it.
#[derive(Debug)]
pub struct BoxLayout {
    toolkit: Toolkit,
    sizer: SizerId,
    orientation: Orientation,
}

impl BoxLayout {
    /// Create an unattached layout.
    pub fn new(toolkit: &Toolkit, orientation: Orientation) -> Self {
        let sizer = toolkit.create_sizer(orientation);
        trace!(target: "horizon_trellis::layout", ?sizer, ?orientation, "created box layout");
        Self {
            toolkit: toolkit.clone(),
            sizer,
            orientation,
        }
    }

    /// Create an unattached horizontal layout.
    pub fn hbox(toolkit: &Toolkit) -> Self {
        Self::new(toolkit, Orientation::Horizontal)
    }

    /// Create an unattached vertical layout.
    pub fn vbox(toolkit: &Toolkit) -> Self {
        Self::new(toolkit, Orientation::Vertical)
    }

    /// Create a horizontal layout installed on `parent`.
    pub fn hbox_on(parent: &Widget) -> LayoutResult<Self> {
        let layout = Self::hbox(parent.toolkit());
        layout.attach(parent)?;
        Ok(layout)
    }

    /// Create a vertical layout installed on `parent`.
    pub fn vbox_on(parent: &Widget) -> LayoutResult<Self> {
        let layout = Self::vbox(parent.toolkit());
        layout.attach(parent)?;
        Ok(layout)
    }

    /// Install this layout as `parent`'s layout manager, replacing and
    /// destroying any previous one.
    pub fn attach(&self, parent: &Widget) -> LayoutResult<()> {
        self.require_sizer()?;
        self.toolkit.set_layout(parent.id(), self.sizer)?;
        debug!(
            target: "horizon_trellis::layout",
            sizer = ?self.sizer,
            parent = ?parent.id(),
            "attached box layout"
        );
        Ok(())
    }

    // =========================================================================
    // Appending
    // =========================================================================

    /// Append an item. Chainable.
    ///
    /// Appending to a layout whose sizer was destroyed together with its
    /// owner is a programming error: it asserts in debug builds and is
    /// logged and ignored otherwise. Use [`try_append`](Self::try_append)
    /// to handle it.
    pub fn append(&self, item: LayoutItem) -> &Self {
        match self.try_append(item) {
            Ok(_) => {}
            Err(LayoutError::MissingSizer(sizer)) => {
                error!(
                    target: "horizon_trellis::layout",
                    ?sizer,
                    "append() on a box layout without a native sizer; item dropped"
                );
                debug_assert!(false, "append() on a box layout without a native sizer");
            }
            Err(err) => {
                warn!(target: "horizon_trellis::layout", %err, "failed to append layout item");
            }
        }
        self
    }

    /// Append an item, reporting a missing sizer or a destroyed widget.
    pub fn try_append(&self, item: LayoutItem) -> LayoutResult<&Self> {
        self.require_sizer()?;
        let flags = sizer_flags(self.orientation, &item, self.toolkit.config());

        let child = match item.target() {
            LayoutTarget::Widget(widget) => SizerChild::Window(widget),
            LayoutTarget::Layout(nested) => SizerChild::Sizer(nested),
            LayoutTarget::Empty => SizerChild::Spacer(SizeI::ZERO),
        };
        self.toolkit.sizer_add(self.sizer, child, flags)?;
        trace!(target: "horizon_trellis::layout", sizer = ?self.sizer, ?child, "appended item");

        match child {
            SizerChild::Window(widget) => self.toolkit.move_to_end_of_tab_order(widget)?,
            SizerChild::Sizer(nested) => {
                for widget in self.toolkit.sizer_windows(nested)? {
                    self.toolkit.move_to_end_of_tab_order(widget)?;
                }
            }
            SizerChild::Spacer(_) => {}
        }

        if let Some(owner) = self.toolkit.owning_widget(self.sizer) {
            self.toolkit.layout(owner)?;
        }
        Ok(self)
    }

    fn require_sizer(&self) -> LayoutResult<()> {
        if self.toolkit.contains_sizer(self.sizer) {
            Ok(())
        } else {
            Err(LayoutError::MissingSizer(self.sizer))
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn sizer_id(&self) -> SizerId {
        self.sizer
    }

    #[inline]
    pub fn toolkit(&self) -> &Toolkit {
        &self.toolkit
    }

    /// Check if the layout is installed on a widget or nested in another
    /// layout.
    pub fn is_attached(&self) -> bool {
        matches!(self.toolkit.sizer_owner(self.sizer), Ok(Some(_)))
    }

    /// Number of appended items.
    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The native sizer's entries in order. Empty once the sizer is gone.
    pub fn items(&self) -> Vec<SizerItem> {
        self.toolkit.sizer_items(self.sizer).unwrap_or_default()
    }

    /// A layout item nesting this layout inside another one.
    pub fn layout(&self) -> LayoutItem {
        LayoutItem::nested(self.sizer)
    }
}

impl<'a> Shl<LayoutItem> for &'a BoxLayout {
    type Output = &'a BoxLayout;

    fn shl(self, item: LayoutItem) -> Self::Output {
        self.append(item)
    }
}

impl Drop for BoxLayout {
    fn drop(&mut self) {
        if self.toolkit.release_sizer(self.sizer) {
            trace!(target: "horizon_trellis::layout", sizer = ?self.sizer, "released unattached box layout");
        }
    }
}

/// Create a horizontal layout installed on `parent`.
pub fn hbox(parent: &Widget) -> LayoutResult<BoxLayout> {
    BoxLayout::hbox_on(parent)
}

/// Create a vertical layout installed on `parent`.
pub fn vbox(parent: &Widget) -> LayoutResult<BoxLayout> {
    BoxLayout::vbox_on(parent)
}

// =========================================================================
// Flag translation
// =========================================================================

/// Translate a layout item into native sizer flags for a layout with the
/// given orientation.
pub fn sizer_flags(orientation: Orientation, item: &LayoutItem, config: &TrellisConfig) -> SizerFlags {
    let (h_align, v_align) = match item.alignment() {
        None | Some(Alignment::Left) | Some(Alignment::Top) => (HAlign::Left, VAlign::Top),
        Some(Alignment::Right) => (HAlign::Right, VAlign::Top),
        Some(Alignment::Bottom) => (HAlign::Left, VAlign::Bottom),
        Some(Alignment::CenterHorizontal) => (HAlign::Center, VAlign::Top),
        Some(Alignment::CenterVertical) => (HAlign::Left, VAlign::Center),
        Some(Alignment::Center) => (HAlign::Center, VAlign::Center),
    };
    let v_align = resolve_alignment(orientation, item.is_justified(), v_align);

    let flags = SizerFlags::new()
        .proportion(item.stretch_factor())
        .border(item.resolved_margin(config))
        .align(h_align, v_align);
    if item.is_justified() {
        flags.expand()
    } else {
        flags
    }
}

/// Vertical alignment the native sizer accepts: none (top) in a vertical
/// layout, or in a horizontal layout when the item is justified.
pub fn resolve_alignment(orientation: Orientation, justify: bool, v_align: VAlign) -> VAlign {
    match orientation {
        Orientation::Vertical => VAlign::Top,
        Orientation::Horizontal if justify => VAlign::Top,
        Orientation::Horizontal => v_align,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_trellis_core::{RectI, Sides};

    fn config() -> TrellisConfig {
        TrellisConfig::default().with_default_border(2)
    }

    #[test]
    fn test_flags_from_item() {
        let item = LayoutItem::spacer().center().stretch(3).margin_px((1, 2));
        let flags = sizer_flags(Orientation::Horizontal, &item, &config());
        assert_eq!(flags.h_align, HAlign::Center);
        assert_eq!(flags.v_align, VAlign::Center);
        assert_eq!(flags.proportion, 3);
        assert_eq!(flags.border, Sides::symmetric(1, 2));
        assert!(!flags.expand);
    }

    #[test]
    fn test_vertical_alignment_cleared() {
        let item = LayoutItem::spacer().bottom();
        assert_eq!(
            sizer_flags(Orientation::Vertical, &item, &config()).v_align,
            VAlign::Top
        );
        assert_eq!(
            sizer_flags(Orientation::Horizontal, &item, &config()).v_align,
            VAlign::Bottom
        );

        let justified = item.justify();
        let flags = sizer_flags(Orientation::Horizontal, &justified, &config());
        assert_eq!(flags.v_align, VAlign::Top);
        assert!(flags.expand);
    }

    #[test]
    fn test_horizontal_alignment_kept_in_vertical_layout() {
        let item = LayoutItem::spacer().right().justify();
        let flags = sizer_flags(Orientation::Vertical, &item, &config());
        assert_eq!(flags.h_align, HAlign::Right);
        assert!(flags.expand);
    }

    #[test]
    fn test_spacer_entry() {
        let toolkit = Toolkit::new(config());
        let layout = BoxLayout::hbox(&toolkit);
        layout.append(LayoutItem::spacer().stretch(2));

        let items = layout.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].child, SizerChild::Spacer(SizeI::ZERO));
        assert_eq!(items[0].flags.proportion, 2);
        assert_eq!(items[0].flags.border, Sides::uniform(2));
    }

    #[test]
    fn test_drop_releases_unattached_sizer() {
        let toolkit = Toolkit::default();
        let sizer = {
            let layout = BoxLayout::vbox(&toolkit);
            layout.sizer_id()
        };
        assert!(!toolkit.contains_sizer(sizer));
    }

    #[test]
    fn test_drop_keeps_installed_sizer() {
        let toolkit = Toolkit::default();
        let frame = Widget::top_level(&toolkit, SizeI::new(50, 50)).unwrap();
        let sizer = BoxLayout::vbox_on(&frame).unwrap().sizer_id();
        assert!(toolkit.contains_sizer(sizer));
        assert_eq!(toolkit.layout_of(frame.id()).unwrap(), Some(sizer));
    }

    #[test]
    fn test_append_relayouts_owner() {
        let toolkit = Toolkit::default();
        let frame = Widget::top_level(&toolkit, SizeI::new(100, 40)).unwrap();
        let button = frame.child(SizeI::new(30, 10)).unwrap();

        let row = BoxLayout::hbox_on(&frame).unwrap();
        row.append(button.layout().margin_px(0).stretch(1).justify());
        assert_eq!(button.geometry(), Some(RectI::new(0, 0, 100, 40)));
    }
}
