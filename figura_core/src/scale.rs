// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: coordinate mapping, autoscaling and per-scale dispatch.
//!
//! A [`Scale`] owns an ordered list of items (insertion order is draw order and
//! dispatch order), a data rectangle in data units and a layout rectangle in grid
//! cells of its figure. When drawn it receives a pixel cell, shrinks it by its
//! padding and maps the data rectangle onto the result with `y` pointing up.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use kurbo::{Insets, Point, Rect};
use tracing::{debug, trace};

use crate::draw::{DrawContext, rect_path};
use crate::event::MouseEvent;
use crate::figure::{Figure, FigureInner};
use crate::item::{DrawCx, EventCx, ItemHandle, NodeCell};
use crate::slot::Slot;
use crate::xy_scale::AxisFrame;

/// Half the span given to a zero-width (or zero-height) data range.
pub const DEGENERATE_HALF_SPAN: f64 = 0.5;

/// An affine map between a data rectangle and a figure rectangle.
///
/// `data` may have a negative width or height to flip an axis. Figure `y` grows
/// downwards while data `y` grows upwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mapping {
    /// The data-space rectangle (`x0, y0` is the origin, `x1 - x0` the signed width).
    pub data: Rect,
    /// The pixel rectangle the data is mapped onto.
    pub figure: Rect,
}

impl Mapping {
    /// Creates a mapping, widening a degenerate data span to `±0.5`.
    pub fn new(data: Rect, figure: Rect) -> Self {
        Self {
            data: widen_degenerate(data),
            figure,
        }
    }

    /// Data to figure pixels.
    pub fn map(&self, point: Point) -> Point {
        let (data, fig) = (self.data, self.figure);
        Point::new(
            fig.x0 + (point.x - data.x0) / data.width() * fig.width(),
            fig.y0 + fig.height() - (point.y - data.y0) / data.height() * fig.height(),
        )
    }

    /// Figure pixels to data; the inverse of [`Mapping::map`].
    ///
    /// A zero-sized figure rectangle maps everything onto the data origin.
    pub fn unmap(&self, point: Point) -> Point {
        let (data, fig) = (self.data, self.figure);
        let x = if fig.width() == 0.0 {
            data.x0
        } else {
            data.x0 + (point.x - fig.x0) / fig.width() * data.width()
        };
        let y = if fig.height() == 0.0 {
            data.y0
        } else {
            data.y0 + (fig.y0 + fig.height() - point.y) / fig.height() * data.height()
        };
        Point::new(x, y)
    }

    /// Maps both corners of `rect` and returns the normalized pixel rectangle.
    pub fn map_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(self.map(rect.origin()), self.map(Point::new(rect.x1, rect.y1)))
    }
}

/// Widens zero-width or zero-height ranges to `±DEGENERATE_HALF_SPAN`.
pub(crate) fn widen_degenerate(rect: Rect) -> Rect {
    let mut rect = rect;
    if rect.width() == 0.0 {
        rect.x0 -= DEGENERATE_HALF_SPAN;
        rect.x1 += DEGENERATE_HALF_SPAN;
    }
    if rect.height() == 0.0 {
        rect.y0 -= DEGENERATE_HALF_SPAN;
        rect.y1 += DEGENERATE_HALF_SPAN;
    }
    rect
}

/// Padding wider than the cell collapses the plot area to zero size rather than
/// flipping it.
fn shrink(rect: Rect, padding: Insets) -> Rect {
    let x0 = rect.x0 + padding.x0;
    let y0 = rect.y0 + padding.y0;
    Rect::new(
        x0,
        y0,
        (rect.x1 - padding.x1).max(x0),
        (rect.y1 - padding.y1).max(y0),
    )
}

#[derive(Debug)]
pub(crate) struct ScaleInner {
    items: Vec<Slot<NodeCell>>,
    data_rect: Rect,
    layout_rect: Rect,
    figure_rect: Rect,
    padding: Insets,
    visible: bool,
    managed: bool,
    figure: Weak<FigureInner>,
    frame: Option<AxisFrame>,
}

impl ScaleInner {
    pub(crate) fn forget_item(&mut self, item: *const NodeCell) -> bool {
        match self.items.iter().position(|slot| slot.points_to(item)) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    fn live_items(&self) -> Vec<ItemHandle> {
        self.items
            .iter()
            .filter_map(Slot::get)
            .map(|node| ItemHandle { node })
            .collect()
    }

    fn mapping(&self) -> Mapping {
        Mapping::new(self.data_rect, self.figure_rect)
    }
}

/// A plot area: items, a data rectangle and a place in its figure's grid.
///
/// Cloning shares the scale.
#[derive(Clone)]
pub struct Scale {
    inner: Rc<RefCell<ScaleInner>>,
}

impl Default for Scale {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scale").field("inner", &self.inner).finish()
    }
}

impl Scale {
    /// An empty, visible, managed scale with data rect `(0, 0)–(1, 1)` filling
    /// one grid cell.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ScaleInner {
                items: Vec::new(),
                data_rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                layout_rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                figure_rect: Rect::ZERO,
                padding: Insets::ZERO,
                visible: true,
                managed: true,
                figure: Weak::new(),
                frame: None,
            })),
        }
    }

    pub(crate) fn from_inner(inner: Rc<RefCell<ScaleInner>>) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &Rc<RefCell<ScaleInner>> {
        &self.inner
    }

    /// Whether both values refer to the same scale.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// The current mapping between the data rectangle and the last drawn plot area.
    pub fn mapping(&self) -> Mapping {
        self.inner.borrow().mapping()
    }

    /// Data to figure pixels.
    pub fn map(&self, point: Point) -> Point {
        self.mapping().map(point)
    }

    /// Figure pixels to data.
    pub fn unmap(&self, point: Point) -> Point {
        self.mapping().unmap(point)
    }

    /// The data rectangle; width or height is negative for a flipped axis.
    pub fn data_rect(&self) -> Rect {
        self.inner.borrow().data_rect
    }

    /// Sets the data rectangle (widening degenerate spans).
    pub fn set_data_rect(&self, rect: Rect) {
        let rect = widen_degenerate(rect);
        let frame = {
            let mut inner = self.inner.borrow_mut();
            inner.data_rect = rect;
            inner.frame.clone()
        };
        if let Some(frame) = frame {
            frame.fit(rect);
        }
    }

    /// The pixel plot area of the last draw (cell minus padding).
    pub fn figure_rect(&self) -> Rect {
        self.inner.borrow().figure_rect
    }

    pub(crate) fn set_figure_rect(&self, rect: Rect) {
        self.inner.borrow_mut().figure_rect = rect;
    }

    /// The placement in the figure grid, in cells.
    pub fn layout_rect(&self) -> Rect {
        self.inner.borrow().layout_rect
    }

    /// Places the scale at cell `(x, y)` spanning `width × height` cells and asks
    /// the figure to recompute its grid.
    pub fn set_layout_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.inner.borrow_mut().layout_rect = Rect::new(x, y, x + width, y + height);
        if let Some(figure) = self.figure() {
            figure.update_layout();
        }
    }

    /// Pixel space kept free around the plot area (for axis labels and titles).
    pub fn padding(&self) -> Insets {
        self.inner.borrow().padding
    }

    /// Sets the padding around the plot area.
    pub fn set_padding(&self, padding: Insets) {
        self.inner.borrow_mut().padding = padding;
    }

    /// Whether the figure draws this scale.
    pub fn is_visible(&self) -> bool {
        self.inner.borrow().visible
    }

    /// Shows or hides the scale.
    pub fn set_visible(&self, visible: bool) {
        self.inner.borrow_mut().visible = visible;
    }

    /// Whether the figure owns this scale.
    pub fn is_managed(&self) -> bool {
        self.inner.borrow().managed
    }

    /// Chooses the ownership mode used the next time the scale is added to a figure.
    pub fn set_managed(&self, managed: bool) {
        self.inner.borrow_mut().managed = managed;
    }

    /// The figure this scale belongs to.
    pub fn figure(&self) -> Option<Figure> {
        self.inner.borrow().figure.upgrade().map(Figure::from_inner)
    }

    pub(crate) fn set_figure(&self, figure: Weak<FigureInner>) {
        self.inner.borrow_mut().figure = figure;
    }

    pub(crate) fn set_frame(&self, frame: AxisFrame) {
        let rect = {
            let mut inner = self.inner.borrow_mut();
            inner.frame = Some(frame.clone());
            inner.data_rect
        };
        frame.fit(rect);
    }

    /// The live top-level items, in draw order.
    pub fn items(&self) -> Vec<ItemHandle> {
        self.inner.borrow().live_items()
    }

    /// Appends `item` (detaching it from wherever it was), rescales and asks the
    /// figure to recompute its layout.
    pub fn add_item(&self, item: &ItemHandle) {
        let Some(slot) = item.attach_to_scale(&self.inner) else {
            return;
        };
        self.inner.borrow_mut().items.push(slot);
        debug!(name = ?item.name(), "item added to scale");
        self.rescale();
        if let Some(figure) = self.figure() {
            figure.update_layout();
        }
    }

    /// Detaches `item` if it is one of this scale's top-level items.
    ///
    /// Does not rescale.
    pub fn remove_item(&self, item: &ItemHandle) -> bool {
        match item.scale() {
            Some(scale) if scale.ptr_eq(self) && item.parent().is_none() => {
                item.detach();
                true
            }
            _ => false,
        }
    }

    /// Recomputes the data rectangle as the union of the data bounds of every
    /// visible item.
    ///
    /// Degenerate spans are widened, a flipped axis stays flipped, and a scale with
    /// nothing to autoscale keeps its current rectangle.
    pub fn rescale(&self) {
        let items = self.items();
        let mut bounds = None;
        for item in &items {
            item.collect_data_rect(&mut bounds);
        }
        let Some(bounds) = bounds else {
            trace!("rescale: no item reports data bounds");
            return;
        };
        let mut rect = widen_degenerate(bounds);
        let current = self.data_rect();
        if current.width() < 0.0 {
            rect = Rect::new(rect.x1, rect.y0, rect.x0, rect.y1);
        }
        if current.height() < 0.0 {
            rect = Rect::new(rect.x0, rect.y1, rect.x1, rect.y0);
        }
        debug!(?rect, "rescaled");
        self.set_data_rect(rect);
    }

    /// Draws the scale into the pixel cell `rect`: clips to it, then draws every
    /// item in order.
    pub fn draw(&self, rect: Rect, ctx: &mut dyn DrawContext) {
        let (items, mapping) = {
            let mut inner = self.inner.borrow_mut();
            if !inner.visible {
                return;
            }
            inner.figure_rect = shrink(rect, inner.padding);
            (inner.live_items(), inner.mapping())
        };
        trace!(?rect, items = items.len(), "drawing scale");
        ctx.save();
        ctx.clip(&rect_path(rect));
        {
            let mut cx = DrawCx::new(ctx, Some(mapping), mapping.figure);
            for item in &items {
                item.draw(&mut cx);
            }
        }
        ctx.restore();
    }

    /// Broadcasts `event` to every item in order; returns whether any of them
    /// asked for a redraw.
    pub fn dispatch_mouse_event(&self, event: &MouseEvent) -> bool {
        let (items, mapping) = {
            let inner = self.inner.borrow();
            (inner.live_items(), inner.mapping())
        };
        let mut cx = EventCx::new(Some(mapping));
        for item in &items {
            // An earlier handler may have moved it elsewhere.
            if !item.is_top_level_in(&self.inner) {
                trace!(name = ?item.name(), "item left the scale during dispatch; skipped");
                continue;
            }
            item.dispatch_mouse_event(event, &mut cx);
        }
        cx.redraw_requested()
    }
}
