//! Widget handles.

use horizon_trellis_core::{RectI, SizeI, Toolkit, TrellisResult, WidgetId};
use tracing::debug;

use crate::layout::LayoutItem;

/// Handle to a native widget.
///
/// The handle does not own the widget: cloning it is cheap, and the widget
/// lives until [`destroy`](Self::destroy) is called on any handle or on an
/// ancestor.
#[derive(Debug, Clone)]
pub struct Widget {
    toolkit: Toolkit,
    id: WidgetId,
}

impl Widget {
    /// Create a native widget with the given preferred size.
    pub fn new(toolkit: &Toolkit, parent: Option<&Widget>, best_size: SizeI) -> TrellisResult<Self> {
        let id = toolkit.create_widget(parent.map(Widget::id), best_size)?;
        Ok(Self {
            toolkit: toolkit.clone(),
            id,
        })
    }

    /// Create a top-level widget.
    pub fn top_level(toolkit: &Toolkit, size: SizeI) -> TrellisResult<Self> {
        Self::new(toolkit, None, size)
    }

    /// Create a child of this widget.
    pub fn child(&self, best_size: SizeI) -> TrellisResult<Self> {
        Self::new(&self.toolkit, Some(self), best_size)
    }

    /// Wrap an existing native widget.
    pub fn from_id(toolkit: &Toolkit, id: WidgetId) -> Self {
        Self {
            toolkit: toolkit.clone(),
            id,
        }
    }

    #[inline]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    #[inline]
    pub fn toolkit(&self) -> &Toolkit {
        &self.toolkit
    }

    /// Check if the native widget still exists.
    pub fn is_alive(&self) -> bool {
        self.toolkit.contains_widget(self.id)
    }

    /// A layout item referring to this widget, ready to be configured and
    /// appended to a box layout.
    pub fn layout(&self) -> LayoutItem {
        LayoutItem::widget(self.id)
    }

    /// Geometry relative to the parent, or `None` once destroyed.
    pub fn geometry(&self) -> Option<RectI> {
        self.toolkit.geometry(self.id).ok()
    }

    /// Size, or zero once destroyed.
    pub fn size(&self) -> SizeI {
        self.geometry().map_or(SizeI::ZERO, |rect| rect.size)
    }

    /// Resize the widget, laying out its children.
    pub fn set_size(&self, size: SizeI) -> TrellisResult<()> {
        self.toolkit.set_size(self.id, size)
    }

    pub fn set_geometry(&self, geometry: RectI) -> TrellisResult<()> {
        self.toolkit.set_geometry(self.id, geometry)
    }

    /// Lay out the children again with the current size.
    pub fn relayout(&self) -> TrellisResult<()> {
        self.toolkit.layout(self.id)
    }

    /// Child widgets in tab order.
    pub fn children(&self) -> Vec<WidgetId> {
        self.toolkit.children(self.id).unwrap_or_default()
    }

    /// Destroy the native widget and its descendants.
    pub fn destroy(&self) {
        if self.toolkit.destroy_widget(self.id).is_err() {
            debug!(target: "horizon_trellis::widget", id = ?self.id, "widget already destroyed");
        }
    }
}

impl PartialEq for Widget {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Widget {}
