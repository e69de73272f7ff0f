// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The item tree.
//!
//! Everything drawn inside a scale is an [`Item`]: axes, series, legends and any
//! user-defined element. Items are stored in shared nodes addressed through
//! [`ItemHandle`] (type-erased) or [`ItemRef`] (typed). A node knows its name,
//! visibility, ownership mode, its sub-items, its parent and the scale it is
//! attached to; the last two are weak back-references maintained by attach/detach.
//!
//! Drawing and dispatch snapshot the child list before recursing and never hold a
//! borrow across a call into another node, so handlers may freely re-parent items.
//! A node that is already borrowed (a reentrant call into itself) is skipped with a
//! warning instead of aborting the pass.

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;
use core::ops::Deref;

use kurbo::{Point, Rect};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::draw::DrawContext;
use crate::error::TreeError;
use crate::event::MouseEvent;
use crate::scale::{Mapping, Scale, ScaleInner};
use crate::slot::Slot;

/// Drawing state handed to [`Item::draw`].
pub struct DrawCx<'a> {
    /// The surface being drawn on.
    pub ctx: &'a mut dyn DrawContext,
    mapping: Option<Mapping>,
    area: Rect,
}

impl<'a> DrawCx<'a> {
    /// Creates a context drawing into `area`, mapping data through `mapping` if any.
    pub fn new(ctx: &'a mut dyn DrawContext, mapping: Option<Mapping>, area: Rect) -> Self {
        Self { ctx, mapping, area }
    }

    /// The data-to-figure mapping of the owning scale.
    ///
    /// `None` when drawing outside any scale (e.g. the figure-wide legend).
    pub fn mapping(&self) -> Option<&Mapping> {
        self.mapping.as_ref()
    }

    /// The pixel area available to the item (the scale's plot area or the figure frame).
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Maps a data point to figure pixels; without a scale the point is returned as is.
    pub fn map(&self, point: Point) -> Point {
        self.mapping.map_or(point, |m| m.map(point))
    }
}

impl fmt::Debug for DrawCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawCx")
            .field("mapping", &self.mapping)
            .field("area", &self.area)
            .finish_non_exhaustive()
    }
}

/// Dispatch state handed to [`Item::handle_mouse_event`].
#[derive(Clone, Copy, Debug, Default)]
pub struct EventCx {
    mapping: Option<Mapping>,
    redraw: bool,
}

impl EventCx {
    /// Creates a context for items of a scale with the given mapping.
    pub fn new(mapping: Option<Mapping>) -> Self {
        Self {
            mapping,
            redraw: false,
        }
    }

    /// The mapping the scale used for its last draw.
    pub fn mapping(&self) -> Option<&Mapping> {
        self.mapping.as_ref()
    }

    /// Asks for one repaint once the current broadcast has finished.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Whether any handler asked for a repaint.
    pub fn redraw_requested(&self) -> bool {
        self.redraw
    }
}

/// A drawable, interactive element of a scale.
pub trait Item: fmt::Debug + 'static {
    /// Draws the item itself; sub-items are drawn afterwards by the tree.
    fn draw(&mut self, cx: &mut DrawCx<'_>);

    /// Draws the small icon shown next to the item's name in a legend.
    fn draw_thumb(&self, _ctx: &mut dyn DrawContext, _pos: Point) {}

    /// Bounds in data units, or `None` to stay out of autoscaling.
    fn data_rect(&self) -> Option<Rect> {
        None
    }

    /// Bounds in figure pixels.
    fn figure_rect(&self, mapping: Option<&Mapping>) -> Rect {
        match (self.data_rect(), mapping) {
            (Some(rect), Some(mapping)) => mapping.map_rect(rect),
            _ => Rect::ZERO,
        }
    }

    /// Reacts to a pointer event. Every item of a scale sees every event.
    fn handle_mouse_event(&mut self, _event: &MouseEvent, _cx: &mut EventCx) {}

    /// Whether the figure-wide legend lists this item (when it is named and visible).
    fn shows_in_legend(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub(crate) struct Node<T: ?Sized> {
    pub(crate) base: ItemBase,
    pub(crate) kind: T,
}

pub(crate) type NodeCell = RefCell<Node<dyn Item>>;

#[derive(Debug, Default)]
pub(crate) enum Parent {
    #[default]
    None,
    Scale(Weak<RefCell<ScaleInner>>),
    Item(Weak<NodeCell>),
}

#[derive(Debug)]
pub(crate) struct ItemBase {
    name: Option<String>,
    visible: bool,
    managed: bool,
    subitems: SmallVec<[Slot<NodeCell>; 2]>,
    parent: Parent,
    scale: Weak<RefCell<ScaleInner>>,
}

impl Default for ItemBase {
    fn default() -> Self {
        Self {
            name: None,
            visible: true,
            managed: true,
            subitems: SmallVec::new(),
            parent: Parent::None,
            scale: Weak::new(),
        }
    }
}

impl ItemBase {
    fn live_subitems(&self) -> Vec<ItemHandle> {
        self.subitems
            .iter()
            .filter_map(Slot::get)
            .map(|node| ItemHandle { node })
            .collect()
    }

    fn remove_child(&mut self, child: *const NodeCell) -> bool {
        match self.subitems.iter().position(|slot| slot.points_to(child)) {
            Some(index) => {
                self.subitems.remove(index);
                true
            }
            None => false,
        }
    }
}

/// A type-erased handle to an item node.
///
/// Cloning a handle shares the node.
#[derive(Clone)]
pub struct ItemHandle {
    pub(crate) node: Rc<NodeCell>,
}

impl ItemHandle {
    /// Wraps `item` in a new detached, visible, managed node.
    pub fn new(item: impl Item) -> Self {
        ItemRef::new(item).handle
    }

    fn read<R>(&self, f: impl FnOnce(&Node<dyn Item>) -> R) -> Option<R> {
        match self.node.try_borrow() {
            Ok(node) => Some(f(&node)),
            Err(_) => {
                warn!("item is mutably borrowed; read skipped");
                None
            }
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut Node<dyn Item>) -> R) -> Option<R> {
        match self.node.try_borrow_mut() {
            Ok(mut node) => Some(f(&mut node)),
            Err(_) => {
                warn!("item is borrowed; update skipped");
                None
            }
        }
    }

    /// The item's name, used as legend label and lookup key.
    pub fn name(&self) -> Option<String> {
        self.read(|n| n.base.name.clone()).flatten()
    }

    /// Sets the item's name.
    pub fn set_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.write(|n| n.base.name = Some(name));
    }

    /// Removes the item's name.
    pub fn clear_name(&self) {
        self.write(|n| n.base.name = None);
    }

    /// Whether the item (and therefore its sub-items) is drawn.
    pub fn is_visible(&self) -> bool {
        self.read(|n| n.base.visible).unwrap_or(false)
    }

    /// Shows or hides the item.
    pub fn set_visible(&self, visible: bool) {
        self.write(|n| n.base.visible = visible);
    }

    /// Whether containers own this item (see [`ItemHandle::set_managed`]).
    pub fn is_managed(&self) -> bool {
        self.read(|n| n.base.managed).unwrap_or(true)
    }

    /// Chooses the ownership mode used the next time the item is attached.
    ///
    /// A managed item is kept alive by its container. An unmanaged item is only
    /// referenced: it silently disappears from the container once every other
    /// handle to it is dropped.
    pub fn set_managed(&self, managed: bool) {
        self.write(|n| n.base.managed = managed);
    }

    /// The scale this item (or its top-level ancestor) is attached to.
    pub fn scale(&self) -> Option<Scale> {
        self.read(|n| n.base.scale.upgrade())
            .flatten()
            .map(Scale::from_inner)
    }

    /// The item this one is a sub-item of.
    pub fn parent(&self) -> Option<Self> {
        self.read(|n| match &n.base.parent {
            Parent::Item(weak) => weak.upgrade().map(|node| Self { node }),
            _ => None,
        })
        .flatten()
    }

    /// The live sub-items, in draw order.
    pub fn subitems(&self) -> Vec<Self> {
        self.read(|n| n.base.live_subitems()).unwrap_or_default()
    }

    /// Whether both handles address the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        core::ptr::addr_eq(Rc::as_ptr(&self.node), Rc::as_ptr(&other.node))
    }

    pub(crate) fn as_ptr(&self) -> *const NodeCell {
        Rc::as_ptr(&self.node)
    }

    /// Whether this item currently sits directly in `scale`'s item list.
    pub(crate) fn is_top_level_in(&self, scale: &Rc<RefCell<ScaleInner>>) -> bool {
        self.read(|n| match &n.base.parent {
            Parent::Scale(weak) => core::ptr::addr_eq(weak.as_ptr(), Rc::as_ptr(scale)),
            _ => false,
        })
        .unwrap_or(false)
    }

    /// Whether this item is currently a direct sub-item of `parent`.
    pub(crate) fn is_child_of(&self, parent: &Self) -> bool {
        self.read(|n| match &n.base.parent {
            Parent::Item(weak) => core::ptr::addr_eq(weak.as_ptr(), Rc::as_ptr(&parent.node)),
            _ => false,
        })
        .unwrap_or(false)
    }

    pub(crate) fn downgrade(&self) -> WeakItem {
        WeakItem(Rc::downgrade(&self.node))
    }

    /// Appends `sub` to this item's sub-items.
    ///
    /// `sub` is detached from its previous container first and takes over this
    /// item's scale, recursively.
    pub fn add_subitem(&self, sub: &Self) -> Result<(), TreeError> {
        if self.ptr_eq(sub) || self.has_ancestor(sub) {
            return Err(TreeError::Cycle);
        }
        let scale = self
            .node
            .try_borrow()
            .map_err(|_| TreeError::Busy)?
            .base
            .scale
            .clone();
        if sub.node.try_borrow_mut().is_err() {
            return Err(TreeError::Busy);
        }
        sub.detach();
        let managed = {
            let mut node = sub.node.try_borrow_mut().map_err(|_| TreeError::Busy)?;
            node.base.parent = Parent::Item(Rc::downgrade(&self.node));
            node.base.managed
        };
        self.node
            .try_borrow_mut()
            .map_err(|_| TreeError::Busy)?
            .base
            .subitems
            .push(Slot::new(&sub.node, managed));
        sub.set_context(&scale);
        debug!(name = ?sub.name(), parent = ?self.name(), "sub-item attached");
        Ok(())
    }

    /// Detaches `sub` if it is one of this item's sub-items.
    pub fn remove_subitem(&self, sub: &Self) -> bool {
        match sub.parent() {
            Some(parent) if parent.ptr_eq(self) => {
                sub.detach();
                true
            }
            _ => false,
        }
    }

    /// Removes the item from its parent scale or item and clears its scale
    /// back-reference (recursively). Detached items are not drawn.
    pub fn detach(&self) {
        let Some(parent) = self.write(|n| core::mem::take(&mut n.base.parent)) else {
            return;
        };
        let removed = match parent {
            Parent::None => return,
            Parent::Scale(weak) => match weak.upgrade() {
                Some(inner) => forget_in_scale(&inner, self.as_ptr()),
                None => false,
            },
            Parent::Item(weak) => match weak.upgrade() {
                Some(node) => forget_in_item(&node, self.as_ptr()),
                None => false,
            },
        };
        self.set_context(&Weak::new());
        debug!(name = ?self.name(), removed, "item detached");
    }

    pub(crate) fn attach_to_scale(&self, scale: &Rc<RefCell<ScaleInner>>) -> Option<Slot<NodeCell>> {
        self.detach();
        let weak = Rc::downgrade(scale);
        let managed = self.write(|n| {
            n.base.parent = Parent::Scale(weak.clone());
            n.base.managed
        })?;
        self.set_context(&weak);
        Some(Slot::new(&self.node, managed))
    }

    pub(crate) fn set_context(&self, scale: &Weak<RefCell<ScaleInner>>) {
        let Some(children) = self.write(|n| {
            n.base.scale = scale.clone();
            n.base.live_subitems()
        }) else {
            return;
        };
        for child in &children {
            child.set_context(scale);
        }
    }

    fn has_ancestor(&self, candidate: &Self) -> bool {
        let mut current = self.parent();
        while let Some(item) = current {
            if item.ptr_eq(candidate) {
                return true;
            }
            current = item.parent();
        }
        false
    }

    /// Depth-first search for the first item called `name`, starting with this one.
    ///
    /// Parents come before their sub-items and earlier siblings before later ones.
    pub fn find_by_name(&self, name: &str) -> Option<Self> {
        if self.name().as_deref() == Some(name) {
            return Some(self.clone());
        }
        self.subitems()
            .iter()
            .find_map(|child| child.find_by_name(name))
    }

    /// The item's data bounds (`None` if it does not take part in autoscaling).
    pub fn data_rect(&self) -> Option<Rect> {
        self.read(|n| n.kind.data_rect()).flatten()
    }

    /// The item's bounds in figure pixels, using its scale's current mapping.
    pub fn figure_rect(&self) -> Rect {
        let mapping = self.scale().map(|scale| scale.mapping());
        self.read(|n| n.kind.figure_rect(mapping.as_ref()))
            .unwrap_or(Rect::ZERO)
    }

    /// Whether the item asks to be listed by the figure-wide legend.
    pub fn shows_in_legend(&self) -> bool {
        self.read(|n| n.kind.shows_in_legend()).unwrap_or(false)
    }

    /// Draws the item's legend icon centred on `pos`.
    pub fn draw_thumb(&self, ctx: &mut dyn DrawContext, pos: Point) {
        self.read(|n| n.kind.draw_thumb(ctx, pos));
    }

    /// Draws the item, then its sub-items on top, unless it is hidden.
    pub fn draw(&self, cx: &mut DrawCx<'_>) {
        let children = match self.node.try_borrow_mut() {
            Ok(mut node) => {
                if !node.base.visible {
                    return;
                }
                node.kind.draw(cx);
                node.base.live_subitems()
            }
            Err(_) => {
                warn!("item is busy; skipped in this draw pass");
                return;
            }
        };
        for child in &children {
            child.draw(cx);
        }
    }

    /// Hands `event` to the item, then to each of its sub-items.
    pub fn dispatch_mouse_event(&self, event: &MouseEvent, cx: &mut EventCx) {
        let children = match self.node.try_borrow_mut() {
            Ok(mut node) => {
                node.kind.handle_mouse_event(event, cx);
                node.base.live_subitems()
            }
            Err(_) => {
                warn!("item is busy; event not delivered to it");
                return;
            }
        };
        for child in &children {
            if child.is_child_of(self) {
                child.dispatch_mouse_event(event, cx);
            }
        }
    }

    /// Unions the data bounds of this visible item and its visible sub-items.
    pub(crate) fn collect_data_rect(&self, bounds: &mut Option<Rect>) {
        let Some((rect, children)) = self.read(|n| {
            if n.base.visible {
                Some((n.kind.data_rect(), n.base.live_subitems()))
            } else {
                None
            }
        })
        .flatten() else {
            return;
        };
        if let Some(rect) = rect {
            let rect = rect.abs();
            *bounds = Some(bounds.map_or(rect, |b| b.union(rect)));
        }
        for child in &children {
            child.collect_data_rect(bounds);
        }
    }
}

fn forget_in_scale(scale: &RefCell<ScaleInner>, item: *const NodeCell) -> bool {
    if let Ok(mut scale) = scale.try_borrow_mut() {
        scale.forget_item(item)
    } else {
        warn!("scale is borrowed; item left in its list");
        false
    }
}

fn forget_in_item(parent: &NodeCell, item: *const NodeCell) -> bool {
    if let Ok(mut parent) = parent.try_borrow_mut() {
        parent.base.remove_child(item)
    } else {
        warn!("parent item is borrowed; item left in its list");
        false
    }
}

impl fmt::Debug for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node.try_borrow() {
            Ok(node) => f
                .debug_struct("ItemHandle")
                .field("name", &node.base.name)
                .field("visible", &node.base.visible)
                .field("item", &&node.kind)
                .finish_non_exhaustive(),
            Err(_) => f.write_str("ItemHandle(<borrowed>)"),
        }
    }
}

/// A non-owning reference to an item node.
#[derive(Clone)]
pub(crate) struct WeakItem(Weak<NodeCell>);

impl WeakItem {
    pub(crate) fn upgrade(&self) -> Option<ItemHandle> {
        self.0.upgrade().map(|node| ItemHandle { node })
    }
}

impl fmt::Debug for WeakItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(item) => write!(f, "WeakItem({:?})", item.name()),
            None => f.write_str("WeakItem(<dropped>)"),
        }
    }
}

/// A typed handle to an item node.
///
/// Dereferences to [`ItemHandle`] for the tree operations and gives typed
/// access to the item through [`ItemRef::borrow`] / [`ItemRef::borrow_mut`].
pub struct ItemRef<T: Item> {
    typed: Rc<RefCell<Node<T>>>,
    handle: ItemHandle,
}

impl<T: Item> ItemRef<T> {
    /// Wraps `item` in a new detached, visible, managed node.
    pub fn new(item: T) -> Self {
        let typed = Rc::new(RefCell::new(Node {
            base: ItemBase::default(),
            kind: item,
        }));
        let node: Rc<NodeCell> = typed.clone();
        Self {
            typed,
            handle: ItemHandle { node },
        }
    }

    /// Wraps `item` and names it.
    pub fn named(name: impl Into<String>, item: T) -> Self {
        let item = Self::new(item);
        item.set_name(name);
        item
    }

    /// Immutably borrows the item.
    ///
    /// # Panics
    ///
    /// Panics if the item is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, T> {
        Ref::map(self.typed.borrow(), |node| &node.kind)
    }

    /// Mutably borrows the item.
    ///
    /// # Panics
    ///
    /// Panics if the item is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        RefMut::map(self.typed.borrow_mut(), |node| &mut node.kind)
    }

    /// Mutably borrows the item, or returns `None` if it is in use.
    pub fn try_borrow_mut(&self) -> Option<RefMut<'_, T>> {
        self.typed
            .try_borrow_mut()
            .ok()
            .map(|node| RefMut::map(node, |node| &mut node.kind))
    }

    /// The type-erased handle.
    pub fn handle(&self) -> &ItemHandle {
        &self.handle
    }
}

impl<T: Item> Clone for ItemRef<T> {
    fn clone(&self) -> Self {
        Self {
            typed: Rc::clone(&self.typed),
            handle: self.handle.clone(),
        }
    }
}

impl<T: Item> Deref for ItemRef<T> {
    type Target = ItemHandle;

    fn deref(&self) -> &ItemHandle {
        &self.handle
    }
}

impl<T: Item> From<ItemRef<T>> for ItemHandle {
    fn from(item: ItemRef<T>) -> Self {
        item.handle
    }
}

impl<T: Item> fmt::Debug for ItemRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ItemRef").field(&self.handle).finish()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::testing::{Probe, RecordingContext};
    use alloc::vec;

    fn probe(name: &'static str) -> ItemRef<Probe> {
        ItemRef::named(name, Probe::labeled(name))
    }

    #[test]
    fn find_by_name_prefers_parents_then_earlier_siblings() {
        let root = probe("root");
        let a = probe("a");
        let a_child = probe("target");
        let b = probe("target");
        root.add_subitem(&a).unwrap();
        a.add_subitem(&a_child).unwrap();
        root.add_subitem(&b).unwrap();

        let found = root.find_by_name("target").expect("found");
        assert!(found.ptr_eq(&a_child), "earlier sibling subtree wins");
        assert!(root.find_by_name("root").unwrap().ptr_eq(&root));
        assert!(root.find_by_name("missing").is_none());
    }

    #[test]
    fn add_subitem_moves_between_parents() {
        let first = probe("first");
        let second = probe("second");
        let child = probe("child");
        first.add_subitem(&child).unwrap();
        second.add_subitem(&child).unwrap();

        assert!(first.subitems().is_empty(), "removed from old parent");
        assert_eq!(second.subitems().len(), 1);
        assert!(child.parent().unwrap().ptr_eq(&second));
    }

    #[test]
    fn cycles_are_rejected() {
        let a = probe("a");
        let b = probe("b");
        let c = probe("c");
        a.add_subitem(&b).unwrap();
        b.add_subitem(&c).unwrap();
        assert_eq!(c.add_subitem(&a), Err(TreeError::Cycle));
        assert_eq!(a.add_subitem(&a), Err(TreeError::Cycle));
        assert_eq!(a.subitems().len(), 1, "tree unchanged");
    }

    #[test]
    fn remove_subitem_only_removes_own_children() {
        let a = probe("a");
        let b = probe("b");
        let c = probe("c");
        a.add_subitem(&c).unwrap();
        assert!(!b.remove_subitem(&c), "not b's child");
        assert!(a.remove_subitem(&c));
        assert!(a.subitems().is_empty());
        assert!(c.parent().is_none());
    }

    #[test]
    fn managed_children_are_kept_alive_and_unmanaged_are_not() {
        let parent = probe("parent");
        let owned = probe("owned");
        let shared = probe("shared");
        shared.set_managed(false);
        parent.add_subitem(&owned).unwrap();
        parent.add_subitem(&shared).unwrap();

        let owned_weak = owned.downgrade();
        drop(owned);
        drop(shared);

        assert!(owned_weak.upgrade().is_some(), "container owns managed child");
        let names: Vec<_> = parent.subitems().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec![Some("owned".into())]);
    }

    #[test]
    fn draw_renders_parents_first_and_skips_hidden_subtrees() {
        let root = probe("root");
        let a = probe("a");
        let a_child = probe("a_child");
        let b = probe("b");
        root.add_subitem(&a).unwrap();
        a.add_subitem(&a_child).unwrap();
        root.add_subitem(&b).unwrap();

        let mut ctx = RecordingContext::default();
        let mut cx = DrawCx::new(&mut ctx, None, Rect::new(0.0, 0.0, 10.0, 10.0));
        root.draw(&mut cx);
        assert_eq!(ctx.texts(), vec!["root", "a", "a_child", "b"]);

        a.set_visible(false);
        let mut ctx = RecordingContext::default();
        let mut cx = DrawCx::new(&mut ctx, None, Rect::new(0.0, 0.0, 10.0, 10.0));
        root.draw(&mut cx);
        assert_eq!(ctx.texts(), vec!["root", "b"]);
    }

    #[test]
    fn dispatch_reaches_every_node_once() {
        let root = probe("root");
        let a = probe("a");
        let b = probe("b");
        root.add_subitem(&a).unwrap();
        a.add_subitem(&b).unwrap();

        let mut cx = EventCx::new(None);
        root.dispatch_mouse_event(&MouseEvent::left_press(Point::ZERO), &mut cx);
        for item in [&root, &a, &b] {
            assert_eq!(item.borrow().events, 1, "{:?} saw the event once", item.name());
        }
        assert!(!cx.redraw_requested());
    }

    /// Re-parents `child` under `parent` when it sees an event.
    #[derive(Debug)]
    struct Adopter {
        parent: ItemHandle,
        child: ItemHandle,
    }

    impl Item for Adopter {
        fn draw(&mut self, _cx: &mut DrawCx<'_>) {}

        fn handle_mouse_event(&mut self, _event: &MouseEvent, _cx: &mut EventCx) {
            self.parent.add_subitem(&self.child).unwrap();
        }
    }

    #[test]
    fn children_moved_during_dispatch_see_the_event_once() {
        let root = probe("root");
        let moved = probe("moved");
        let later = probe("later");
        let adopter = ItemRef::new(Adopter {
            parent: later.handle().clone(),
            child: moved.handle().clone(),
        });
        root.add_subitem(&adopter).unwrap();
        root.add_subitem(&moved).unwrap();
        root.add_subitem(&later).unwrap();

        let mut cx = EventCx::new(None);
        root.dispatch_mouse_event(&MouseEvent::left_press(Point::ZERO), &mut cx);
        assert!(moved.parent().is_some_and(|p| p.ptr_eq(&later)));
        assert_eq!(moved.borrow().events, 1, "delivered under its new parent only");
        assert_eq!(later.borrow().events, 1);
    }

    #[test]
    fn data_rects_ignore_hidden_items() {
        let root = ItemRef::new(Probe::with_data(Rect::new(0.0, 0.0, 1.0, 1.0)));
        let hidden = ItemRef::new(Probe::with_data(Rect::new(5.0, 5.0, 6.0, 6.0)));
        let visible = ItemRef::new(Probe::with_data(Rect::new(2.0, -1.0, 3.0, 0.0)));
        hidden.set_visible(false);
        root.add_subitem(&hidden).unwrap();
        root.add_subitem(&visible).unwrap();

        let mut bounds = None;
        root.collect_data_rect(&mut bounds);
        assert_eq!(bounds, Some(Rect::new(0.0, -1.0, 3.0, 1.0)));
    }
}
