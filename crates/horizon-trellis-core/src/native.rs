//! In-process native toolkit model.
//!
//! The layout and canvas layers sit on top of a small set of native
//! capabilities: widget creation with parent/child relationships, a tab
//! order, box sizers that position widgets, paint requests and a screen
//! buffer per widget. This module provides all of them as plain data held in
//! slotmap arenas, so the higher layers run the same way on every platform
//! and in tests.
//!
//! # Key Types
//!
//! - [`WidgetId`] / [`SizerId`] - Stable handles into the arenas
//! - [`NativeRegistry`] - The arenas and every operation on them
//! - [`Toolkit`] - Cloneable shared handle that components are created with
//!
//! There is no process-wide instance. Create a [`Toolkit`] and pass it to the
//! components that need it:
//!
//! ```
//! use horizon_trellis_core::{SizeI, Toolkit};
//!
//! let toolkit = Toolkit::default();
//! let frame = toolkit.create_widget(None, SizeI::new(200, 100)).unwrap();
//! let button = toolkit.create_widget(Some(frame), SizeI::new(80, 24)).unwrap();
//! assert_eq!(toolkit.children(frame).unwrap(), vec![button]);
//! ```

use std::sync::Arc;

use image::RgbaImage;
use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};
use tracing::{debug, trace};

use crate::config::TrellisConfig;
use crate::error::{TrellisError, TrellisResult};
use crate::geometry::{RectI, SizeI};
use crate::logging::PerfSpan;
use crate::sizer::{Orientation, SizerChild, SizerFlags, SizerItem, distribute_space, place_cross};

new_key_type! {
    /// A unique identifier for a native widget.
    ///
    /// Becomes invalid when the widget (or one of its ancestors) is destroyed.
    pub struct WidgetId;

    /// A unique identifier for a native box sizer.
    pub struct SizerId;
}

/// What a sizer is installed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizerOwner {
    /// The sizer is the layout manager of a widget.
    Widget(WidgetId),
    /// The sizer is nested inside another sizer.
    Sizer(SizerId),
}

struct WidgetData {
    parent: Option<WidgetId>,
    /// Child widgets; the order is the tab order.
    children: Vec<WidgetId>,
    best_size: SizeI,
    /// Position relative to the parent's client area.
    geometry: RectI,
    layout: Option<SizerId>,
    screen: Option<RgbaImage>,
}

struct SizerData {
    orientation: Orientation,
    items: Vec<SizerItem>,
    owner: Option<SizerOwner>,
}

/// Arena storage for widgets and sizers.
///
/// Most code uses [`Toolkit`], which wraps a registry behind a lock.
pub struct NativeRegistry {
    widgets: SlotMap<WidgetId, WidgetData>,
    sizers: SlotMap<SizerId, SizerData>,
    paint_requests: Vec<WidgetId>,
}

impl NativeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            widgets: SlotMap::with_key(),
            sizers: SlotMap::with_key(),
            paint_requests: Vec::new(),
        }
    }

    // =========================================================================
    // Widgets
    // =========================================================================

    /// Create a widget. A child is appended to the end of its parent's tab
    /// order.
    pub fn create_widget(
        &mut self,
        parent: Option<WidgetId>,
        best_size: SizeI,
    ) -> TrellisResult<WidgetId> {
        if let Some(parent) = parent {
            self.widget(parent)?;
        }

        let id = self.widgets.insert(WidgetData {
            parent,
            children: Vec::new(),
            best_size,
            geometry: RectI::from_origin_size(Default::default(), best_size),
            layout: None,
            screen: None,
        });
        if let Some(parent) = parent {
            if let Some(data) = self.widgets.get_mut(parent) {
                data.children.push(id);
            }
        }

        trace!(target: "horizon_trellis_core::native", ?id, ?parent, "created widget");
        Ok(id)
    }

    /// Destroy a widget together with its descendants and their layouts.
    ///
    /// Destroyed widgets are removed from every sizer that arranged them.
    pub fn destroy_widget(&mut self, id: WidgetId) -> TrellisResult<()> {
        let mut doomed = Vec::new();
        self.collect_descendants(id, &mut doomed)?;
        doomed.push(id);
        debug!(
            target: "horizon_trellis_core::native",
            ?id,
            count = doomed.len(),
            "destroying widget tree"
        );

        if let Some(parent) = self.widgets.get(id).and_then(|data| data.parent) {
            if let Some(data) = self.widgets.get_mut(parent) {
                data.children.retain(|&child| child != id);
            }
        }

        for &widget in &doomed {
            if let Some(layout) = self.widgets.get_mut(widget).and_then(|data| data.layout.take()) {
                self.destroy_sizer_tree(layout);
            }
        }
        for sizer in self.sizers.values_mut() {
            sizer.items.retain(|item| match item.child {
                SizerChild::Window(window) => !doomed.contains(&window),
                _ => true,
            });
        }
        self.paint_requests.retain(|widget| !doomed.contains(widget));
        for widget in doomed {
            self.widgets.remove(widget);
        }
        Ok(())
    }

    fn collect_descendants(&self, id: WidgetId, out: &mut Vec<WidgetId>) -> TrellisResult<()> {
        for &child in &self.widget(id)?.children {
            self.collect_descendants(child, out)?;
            out.push(child);
        }
        Ok(())
    }

    /// Check if a widget exists.
    pub fn contains_widget(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    /// Number of live widgets.
    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Get a widget's parent.
    pub fn parent(&self, id: WidgetId) -> TrellisResult<Option<WidgetId>> {
        Ok(self.widget(id)?.parent)
    }

    /// Get a widget's children in tab order.
    pub fn children(&self, id: WidgetId) -> TrellisResult<&[WidgetId]> {
        Ok(&self.widget(id)?.children)
    }

    /// Move a widget to the end of its parent's tab order.
    ///
    /// Top-level widgets have no tab order; for them this does nothing.
    pub fn move_to_end_of_tab_order(&mut self, id: WidgetId) -> TrellisResult<()> {
        let Some(parent) = self.widget(id)?.parent else {
            return Ok(());
        };
        let siblings = &mut self.widget_mut(parent)?.children;
        siblings.retain(|&child| child != id);
        siblings.push(id);
        trace!(target: "horizon_trellis_core::native", ?id, "moved to end of tab order");
        Ok(())
    }

    /// Get a widget's preferred size.
    pub fn best_size(&self, id: WidgetId) -> TrellisResult<SizeI> {
        Ok(self.widget(id)?.best_size)
    }

    /// Set a widget's preferred size.
    pub fn set_best_size(&mut self, id: WidgetId, size: SizeI) -> TrellisResult<()> {
        self.widget_mut(id)?.best_size = size;
        Ok(())
    }

    /// Get a widget's geometry, relative to its parent's client area.
    pub fn geometry(&self, id: WidgetId) -> TrellisResult<RectI> {
        Ok(self.widget(id)?.geometry)
    }

    /// Get the size of a widget's client area.
    pub fn client_size(&self, id: WidgetId) -> TrellisResult<SizeI> {
        Ok(self.widget(id)?.geometry.size)
    }

    /// Move and resize a widget, then lay out its children.
    pub fn set_geometry(&mut self, id: WidgetId, geometry: RectI) -> TrellisResult<()> {
        self.widget(id)?;
        self.apply_geometry(id, geometry);
        Ok(())
    }

    /// Resize a widget in place, then lay out its children.
    pub fn set_size(&mut self, id: WidgetId, size: SizeI) -> TrellisResult<()> {
        let origin = self.widget(id)?.geometry.origin;
        self.apply_geometry(id, RectI::from_origin_size(origin, size));
        Ok(())
    }

    fn apply_geometry(&mut self, id: WidgetId, geometry: RectI) {
        let Some(data) = self.widgets.get_mut(id) else {
            return;
        };
        let resized = data.geometry.size != geometry.size;
        data.geometry = geometry;
        let layout = data.layout;

        if resized && !self.paint_requests.contains(&id) {
            self.paint_requests.push(id);
        }
        if let Some(layout) = layout {
            self.layout_sizer(layout, RectI::from_origin_size(Default::default(), geometry.size));
        }
    }

    fn widget(&self, id: WidgetId) -> TrellisResult<&WidgetData> {
        self.widgets.get(id).ok_or(TrellisError::InvalidWidget(id))
    }

    fn widget_mut(&mut self, id: WidgetId) -> TrellisResult<&mut WidgetData> {
        self.widgets.get_mut(id).ok_or(TrellisError::InvalidWidget(id))
    }

    // =========================================================================
    // Sizers
    // =========================================================================

    /// Create an empty, unowned sizer.
    pub fn create_sizer(&mut self, orientation: Orientation) -> SizerId {
        let id = self.sizers.insert(SizerData {
            orientation,
            items: Vec::new(),
            owner: None,
        });
        trace!(target: "horizon_trellis_core::sizer", ?id, ?orientation, "created sizer");
        id
    }

    /// Check if a sizer exists.
    pub fn contains_sizer(&self, id: SizerId) -> bool {
        self.sizers.contains_key(id)
    }

    /// Number of live sizers.
    pub fn sizer_count(&self) -> usize {
        self.sizers.len()
    }

    /// Get a sizer's orientation.
    pub fn sizer_orientation(&self, id: SizerId) -> TrellisResult<Orientation> {
        Ok(self.sizer(id)?.orientation)
    }

    /// Get a sizer's entries in insertion order.
    pub fn sizer_items(&self, id: SizerId) -> TrellisResult<&[SizerItem]> {
        Ok(&self.sizer(id)?.items)
    }

    /// Get what a sizer is installed in.
    pub fn sizer_owner(&self, id: SizerId) -> TrellisResult<Option<SizerOwner>> {
        Ok(self.sizer(id)?.owner)
    }

    /// Append an entry to a sizer.
    ///
    /// A nested sizer must be unowned and must not contain `id`.
    pub fn sizer_add(
        &mut self,
        id: SizerId,
        child: SizerChild,
        flags: SizerFlags,
    ) -> TrellisResult<()> {
        self.sizer(id)?;
        match child {
            SizerChild::Window(widget) => {
                self.widget(widget)?;
            }
            SizerChild::Sizer(nested) => {
                if self.sizer(nested)?.owner.is_some() {
                    return Err(TrellisError::SizerAlreadyOwned(nested));
                }
                if nested == id || self.sizer_ancestors(id).contains(&nested) {
                    return Err(TrellisError::SizerCycle(nested));
                }
                self.sizer_mut(nested)?.owner = Some(SizerOwner::Sizer(id));
            }
            SizerChild::Spacer(_) => {}
        }

        self.sizer_mut(id)?.items.push(SizerItem { child, flags });
        trace!(target: "horizon_trellis_core::sizer", ?id, ?child, ?flags, "added sizer item");
        Ok(())
    }

    fn sizer_ancestors(&self, id: SizerId) -> Vec<SizerId> {
        let mut ancestors = Vec::new();
        let mut current = self.sizers.get(id).and_then(|data| data.owner);
        while let Some(SizerOwner::Sizer(parent)) = current {
            ancestors.push(parent);
            current = self.sizers.get(parent).and_then(|data| data.owner);
        }
        ancestors
    }

    /// Install a sizer as a widget's layout manager.
    ///
    /// A previously installed layout is destroyed. The widget is laid out
    /// immediately.
    pub fn set_layout(&mut self, widget: WidgetId, sizer: SizerId) -> TrellisResult<()> {
        let current = self.widget(widget)?.layout;
        match self.sizer(sizer)?.owner {
            Some(SizerOwner::Widget(owner)) if owner == widget => return Ok(()),
            Some(_) => return Err(TrellisError::SizerAlreadyOwned(sizer)),
            None => {}
        }

        if let Some(old) = current {
            self.destroy_sizer_tree(old);
        }
        self.sizer_mut(sizer)?.owner = Some(SizerOwner::Widget(widget));
        self.widget_mut(widget)?.layout = Some(sizer);
        debug!(target: "horizon_trellis_core::sizer", ?widget, ?sizer, "installed layout");

        self.layout(widget)
    }

    /// Get a widget's layout manager.
    pub fn layout_of(&self, widget: WidgetId) -> TrellisResult<Option<SizerId>> {
        Ok(self.widget(widget)?.layout)
    }

    /// Find the widget whose layout (directly or through nesting) contains
    /// a sizer.
    pub fn owning_widget(&self, id: SizerId) -> Option<WidgetId> {
        let mut current = self.sizers.get(id)?.owner;
        loop {
            match current? {
                SizerOwner::Widget(widget) => return Some(widget),
                SizerOwner::Sizer(parent) => current = self.sizers.get(parent)?.owner,
            }
        }
    }

    /// Destroy a sizer that was never installed. Returns whether it was
    /// destroyed; owned sizers live as long as their owner.
    pub fn release_sizer(&mut self, id: SizerId) -> bool {
        match self.sizers.get(id) {
            Some(data) if data.owner.is_none() => {
                self.destroy_sizer_tree(id);
                true
            }
            _ => false,
        }
    }

    fn destroy_sizer_tree(&mut self, id: SizerId) {
        let Some(data) = self.sizers.remove(id) else {
            return;
        };
        for item in data.items {
            if let SizerChild::Sizer(nested) = item.child {
                self.destroy_sizer_tree(nested);
            }
        }
    }

    /// Every window arranged by a sizer, including through nested sizers,
    /// in layout order.
    pub fn sizer_windows(&self, id: SizerId) -> TrellisResult<Vec<WidgetId>> {
        let mut windows = Vec::new();
        for item in &self.sizer(id)?.items {
            match item.child {
                SizerChild::Window(widget) => windows.push(widget),
                SizerChild::Sizer(nested) => windows.extend(self.sizer_windows(nested)?),
                SizerChild::Spacer(_) => {}
            }
        }
        Ok(windows)
    }

    /// Minimum size of a sizer: entry minimums (including borders) summed on
    /// the main axis and maximized on the cross axis.
    pub fn min_size(&self, id: SizerId) -> TrellisResult<SizeI> {
        let sizer = self.sizer(id)?;
        let orientation = sizer.orientation;
        let (mut main, mut cross) = (0, 0);
        for item in &sizer.items {
            let min = self.item_min_size(item);
            main += orientation.main(min);
            cross = cross.max(orientation.cross_of(min));
        }
        Ok(orientation.make_size(main, cross))
    }

    fn item_min_size(&self, item: &SizerItem) -> SizeI {
        let content = match item.child {
            SizerChild::Window(widget) => self
                .widgets
                .get(widget)
                .map(|data| data.best_size)
                .unwrap_or(SizeI::ZERO),
            SizerChild::Sizer(nested) => self.min_size(nested).unwrap_or(SizeI::ZERO),
            SizerChild::Spacer(size) => size,
        };
        content + item.flags.border.size()
    }

    /// Lay out a widget's children with its layout manager.
    pub fn layout(&mut self, widget: WidgetId) -> TrellisResult<()> {
        let _span = PerfSpan::new("layout");
        let data = self.widget(widget)?;
        if let Some(layout) = data.layout {
            let area = RectI::from_origin_size(Default::default(), data.geometry.size);
            self.layout_sizer(layout, area);
        }
        Ok(())
    }

    fn layout_sizer(&mut self, id: SizerId, area: RectI) {
        let Some(sizer) = self.sizers.get(id) else {
            return;
        };
        let orientation = sizer.orientation;
        let items = sizer.items.clone();
        let mins: Vec<SizeI> = items.iter().map(|item| self.item_min_size(item)).collect();

        let demands: Vec<(i32, u32)> = items
            .iter()
            .zip(&mins)
            .map(|(item, min)| (orientation.main(*min), item.flags.proportion))
            .collect();
        let cells = distribute_space(&demands, orientation.main(area.size));
        trace!(
            target: "horizon_trellis_core::sizer",
            ?id,
            ?area,
            ?cells,
            "distributed sizer space"
        );

        let cross_space = orientation.cross_of(area.size);
        let mut cursor = 0;
        for ((item, min), cell) in items.iter().zip(&mins).zip(cells) {
            let border = item.flags.border;
            let (main_lead, main_border, cross_lead, cross_border) = match orientation {
                Orientation::Horizontal => {
                    (border.left, border.horizontal(), border.top, border.vertical())
                }
                Orientation::Vertical => {
                    (border.top, border.vertical(), border.left, border.horizontal())
                }
            };

            let (cross_offset, cross_size) = place_cross(
                cross_space - cross_border,
                orientation.cross_of(*min) - cross_border,
                item.flags.expand,
                item.flags.cross_align(orientation),
            );
            let main_pos = cursor + main_lead;
            let main_size = (cell - main_border).max(0);
            let cross_pos = cross_lead + cross_offset;

            let rect = match orientation {
                Orientation::Horizontal => RectI::new(
                    area.left() + main_pos,
                    area.top() + cross_pos,
                    main_size,
                    cross_size,
                ),
                Orientation::Vertical => RectI::new(
                    area.left() + cross_pos,
                    area.top() + main_pos,
                    cross_size,
                    main_size,
                ),
            };
            cursor += cell;

            match item.child {
                SizerChild::Window(widget) => self.apply_geometry(widget, rect),
                SizerChild::Sizer(nested) => self.layout_sizer(nested, rect),
                SizerChild::Spacer(_) => {}
            }
        }
    }

    fn sizer(&self, id: SizerId) -> TrellisResult<&SizerData> {
        self.sizers.get(id).ok_or(TrellisError::InvalidSizer(id))
    }

    fn sizer_mut(&mut self, id: SizerId) -> TrellisResult<&mut SizerData> {
        self.sizers.get_mut(id).ok_or(TrellisError::InvalidSizer(id))
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Ask for a widget to be repainted. Requests for the same widget
    /// coalesce until drained.
    pub fn refresh(&mut self, id: WidgetId) -> TrellisResult<()> {
        self.widget(id)?;
        if !self.paint_requests.contains(&id) {
            self.paint_requests.push(id);
        }
        Ok(())
    }

    /// Drain pending paint requests in the order they were made.
    pub fn take_paint_requests(&mut self) -> Vec<WidgetId> {
        std::mem::take(&mut self.paint_requests)
    }

    /// Put an image on a widget's screen.
    pub fn present(&mut self, id: WidgetId, image: RgbaImage) -> TrellisResult<()> {
        self.widget_mut(id)?.screen = Some(image);
        trace!(target: "horizon_trellis_core::native", ?id, "presented frame");
        Ok(())
    }

    /// What was last presented on a widget's screen.
    pub fn screen(&self, id: WidgetId) -> TrellisResult<Option<&RgbaImage>> {
        Ok(self.widget(id)?.screen.as_ref())
    }
}

impl Default for NativeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to a native registry and its configuration.
///
/// Cloning is cheap; clones refer to the same widgets and sizers.
#[derive(Clone)]
pub struct Toolkit {
    inner: Arc<RwLock<NativeRegistry>>,
    config: Arc<TrellisConfig>,
}

impl Toolkit {
    /// Create a toolkit with the given configuration.
    pub fn new(config: TrellisConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(NativeRegistry::new())),
            config: Arc::new(config),
        }
    }

    /// The configuration components are created with.
    pub fn config(&self) -> &TrellisConfig {
        &self.config
    }

    /// Run a closure with read access to the registry.
    pub fn with<R>(&self, f: impl FnOnce(&NativeRegistry) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run a closure with write access to the registry.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut NativeRegistry) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Create a widget.
    pub fn create_widget(
        &self,
        parent: Option<WidgetId>,
        best_size: SizeI,
    ) -> TrellisResult<WidgetId> {
        self.inner.write().create_widget(parent, best_size)
    }

    /// Destroy a widget and its descendants.
    pub fn destroy_widget(&self, id: WidgetId) -> TrellisResult<()> {
        self.inner.write().destroy_widget(id)
    }

    /// Check if a widget exists.
    pub fn contains_widget(&self, id: WidgetId) -> bool {
        self.inner.read().contains_widget(id)
    }

    /// Get a widget's parent.
    pub fn parent(&self, id: WidgetId) -> TrellisResult<Option<WidgetId>> {
        self.inner.read().parent(id)
    }

    /// Get a widget's children in tab order.
    pub fn children(&self, id: WidgetId) -> TrellisResult<Vec<WidgetId>> {
        self.inner.read().children(id).map(|c| c.to_vec())
    }

    /// Move a widget to the end of its parent's tab order.
    pub fn move_to_end_of_tab_order(&self, id: WidgetId) -> TrellisResult<()> {
        self.inner.write().move_to_end_of_tab_order(id)
    }

    /// Get a widget's preferred size.
    pub fn best_size(&self, id: WidgetId) -> TrellisResult<SizeI> {
        self.inner.read().best_size(id)
    }

    /// Set a widget's preferred size.
    pub fn set_best_size(&self, id: WidgetId, size: SizeI) -> TrellisResult<()> {
        self.inner.write().set_best_size(id, size)
    }

    /// Get a widget's geometry.
    pub fn geometry(&self, id: WidgetId) -> TrellisResult<RectI> {
        self.inner.read().geometry(id)
    }

    /// Get the size of a widget's client area.
    pub fn client_size(&self, id: WidgetId) -> TrellisResult<SizeI> {
        self.inner.read().client_size(id)
    }

    /// Move and resize a widget.
    pub fn set_geometry(&self, id: WidgetId, geometry: RectI) -> TrellisResult<()> {
        self.inner.write().set_geometry(id, geometry)
    }

    /// Resize a widget.
    pub fn set_size(&self, id: WidgetId, size: SizeI) -> TrellisResult<()> {
        self.inner.write().set_size(id, size)
    }

    /// Create an unowned sizer.
    pub fn create_sizer(&self, orientation: Orientation) -> SizerId {
        self.inner.write().create_sizer(orientation)
    }

    /// Check if a sizer exists.
    pub fn contains_sizer(&self, id: SizerId) -> bool {
        self.inner.read().contains_sizer(id)
    }

    /// Get a sizer's orientation.
    pub fn sizer_orientation(&self, id: SizerId) -> TrellisResult<Orientation> {
        self.inner.read().sizer_orientation(id)
    }

    /// Get a sizer's entries.
    pub fn sizer_items(&self, id: SizerId) -> TrellisResult<Vec<SizerItem>> {
        self.inner.read().sizer_items(id).map(|items| items.to_vec())
    }

    /// Get what a sizer is installed in.
    pub fn sizer_owner(&self, id: SizerId) -> TrellisResult<Option<SizerOwner>> {
        self.inner.read().sizer_owner(id)
    }

    /// Append an entry to a sizer.
    pub fn sizer_add(&self, id: SizerId, child: SizerChild, flags: SizerFlags) -> TrellisResult<()> {
        self.inner.write().sizer_add(id, child, flags)
    }

    /// Install a sizer as a widget's layout manager.
    pub fn set_layout(&self, widget: WidgetId, sizer: SizerId) -> TrellisResult<()> {
        self.inner.write().set_layout(widget, sizer)
    }

    /// Get a widget's layout manager.
    pub fn layout_of(&self, widget: WidgetId) -> TrellisResult<Option<SizerId>> {
        self.inner.read().layout_of(widget)
    }

    /// Find the widget whose layout contains a sizer.
    pub fn owning_widget(&self, id: SizerId) -> Option<WidgetId> {
        self.inner.read().owning_widget(id)
    }

    /// Destroy a sizer that was never installed.
    pub fn release_sizer(&self, id: SizerId) -> bool {
        self.inner.write().release_sizer(id)
    }

    /// Every window arranged by a sizer, recursively.
    pub fn sizer_windows(&self, id: SizerId) -> TrellisResult<Vec<WidgetId>> {
        self.inner.read().sizer_windows(id)
    }

    /// Minimum size of a sizer.
    pub fn min_size(&self, id: SizerId) -> TrellisResult<SizeI> {
        self.inner.read().min_size(id)
    }

    /// Lay out a widget's children.
    pub fn layout(&self, widget: WidgetId) -> TrellisResult<()> {
        self.inner.write().layout(widget)
    }

    /// Ask for a widget to be repainted.
    pub fn refresh(&self, id: WidgetId) -> TrellisResult<()> {
        self.inner.write().refresh(id)
    }

    /// Drain pending paint requests.
    pub fn take_paint_requests(&self) -> Vec<WidgetId> {
        self.inner.write().take_paint_requests()
    }

    /// Put an image on a widget's screen.
    pub fn present(&self, id: WidgetId, image: RgbaImage) -> TrellisResult<()> {
        self.inner.write().present(id, image)
    }

    /// A copy of what was last presented on a widget's screen.
    pub fn screen(&self, id: WidgetId) -> TrellisResult<Option<RgbaImage>> {
        self.inner.read().screen(id).map(|screen| screen.cloned())
    }
}

impl Default for Toolkit {
    fn default() -> Self {
        Self::new(TrellisConfig::default())
    }
}

impl std::fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.inner.read();
        f.debug_struct("Toolkit")
            .field("widgets", &registry.widget_count())
            .field("sizers", &registry.sizer_count())
            .field("config", &self.config)
            .finish()
    }
}
