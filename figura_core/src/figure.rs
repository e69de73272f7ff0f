// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Figures: the composition root.
//!
//! A [`Figure`] tiles its scales over a grid whose size is the furthest extent of
//! any scale's layout rectangle, draws them inside a (possibly rounded) frame and
//! overlays a figure-wide [`Legend`] whose members are recomputed on every draw.
//! Pointer events are broadcast to every scale; redraw requests raised while a
//! broadcast is in progress are folded into a single repaint once it completes.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use kurbo::{Rect, Size};
use peniko::Color;
use peniko::color::palette::css;
use tracing::{debug, trace, warn};

use crate::draw::{DrawContext, Orientation, rect_path, rounded_rect_path};
use crate::event::MouseEvent;
use crate::item::{DrawCx, ItemRef};
use crate::legend::{Legend, legend_members};
use crate::scale::{Scale, ScaleInner};
use crate::slot::Slot;
use crate::view::{View, ViewInner};

/// Corner radius of the rounded frame, which is also inset from the drawing rect.
pub const FRAME_RADIUS: f64 = 10.0;
/// Font size set at the start of every figure draw.
pub const DEFAULT_FONT_SIZE: f64 = 11.0;

/// The outline the figure is drawn in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FrameMode {
    /// The full drawing rectangle.
    Rectangle,
    /// A rounded rectangle inset by [`FRAME_RADIUS`].
    #[default]
    RoundedRectangle,
}

/// Creates drawing surfaces for offscreen rendering.
pub trait SurfaceFactory {
    /// The surface type; it is handed back to the caller after drawing.
    type Surface: DrawContext;

    /// A blank `width × height` pixel surface.
    fn create_surface(&mut self, width: u32, height: u32) -> Self::Surface;
}

#[derive(Debug)]
struct FigureState {
    scales: Vec<Slot<RefCell<ScaleInner>>>,
    background: Option<Color>,
    frame_mode: FrameMode,
    font_size: f64,
    grid: Size,
    managed: bool,
    view: Weak<ViewInner>,
}

#[derive(Debug)]
pub(crate) struct FigureInner {
    state: RefCell<FigureState>,
    redraw_requested: Cell<bool>,
    dispatch_depth: Cell<u32>,
    legend: ItemRef<Legend>,
}

/// A set of scales laid out on a grid, plus a figure-wide legend.
///
/// Cloning shares the figure.
#[derive(Clone)]
pub struct Figure {
    inner: Rc<FigureInner>,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Figure").field("inner", &self.inner).finish()
    }
}

impl Figure {
    /// An empty figure with a white background, a rounded frame and a hidden
    /// horizontal legend.
    pub fn new() -> Self {
        let legend = ItemRef::new(Legend::new(Orientation::Horizontal));
        legend.set_visible(false);
        Self {
            inner: Rc::new(FigureInner {
                state: RefCell::new(FigureState {
                    scales: Vec::new(),
                    background: Some(css::WHITE),
                    frame_mode: FrameMode::default(),
                    font_size: DEFAULT_FONT_SIZE,
                    grid: Size::ZERO,
                    managed: true,
                    view: Weak::new(),
                }),
                redraw_requested: Cell::new(false),
                dispatch_depth: Cell::new(0),
                legend,
            }),
        }
    }

    pub(crate) fn from_inner(inner: Rc<FigureInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &Rc<FigureInner> {
        &self.inner
    }

    /// Whether both values refer to the same figure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Appends `scale` (taking it from its previous figure, if any), rescales it
    /// and recomputes the layout grid.
    ///
    /// The figure owns the scale when [`Scale::is_managed`] is set.
    pub fn add_scale(&self, scale: &Scale) {
        if let Some(previous) = scale.figure() {
            previous.remove_scale(scale);
        }
        self.inner
            .state
            .borrow_mut()
            .scales
            .push(Slot::new(scale.inner(), scale.is_managed()));
        scale.set_figure(Rc::downgrade(&self.inner));
        scale.rescale();
        self.update_layout();
        debug!(scales = self.inner.state.borrow().scales.len(), "scale added to figure");
    }

    /// Removes `scale` from the figure; returns whether it was there.
    pub fn remove_scale(&self, scale: &Scale) -> bool {
        let removed = {
            let mut state = self.inner.state.borrow_mut();
            let target = Rc::as_ptr(scale.inner());
            match state.scales.iter().position(|slot| slot.points_to(target)) {
                Some(index) => {
                    state.scales.remove(index);
                    true
                }
                None => false,
            }
        };
        if removed {
            scale.set_figure(Weak::new());
            self.update_layout();
            debug!("scale removed from figure");
        }
        removed
    }

    /// The live scales, in draw order.
    pub fn scales(&self) -> Vec<Scale> {
        self.inner
            .state
            .borrow()
            .scales
            .iter()
            .filter_map(Slot::get)
            .map(Scale::from_inner)
            .collect()
    }

    /// Background fill; `None` leaves the frame transparent.
    pub fn background(&self) -> Option<Color> {
        self.inner.state.borrow().background
    }

    /// Sets the background fill.
    pub fn set_background(&self, background: Option<Color>) {
        self.inner.state.borrow_mut().background = background;
    }

    /// The frame outline used by [`Figure::draw`].
    pub fn frame_mode(&self) -> FrameMode {
        self.inner.state.borrow().frame_mode
    }

    /// Sets the frame outline.
    pub fn set_frame_mode(&self, mode: FrameMode) {
        self.inner.state.borrow_mut().frame_mode = mode;
    }

    /// The base font size.
    pub fn font_size(&self) -> f64 {
        self.inner.state.borrow().font_size
    }

    /// Sets the base font size.
    pub fn set_font_size(&self, size: f64) {
        self.inner.state.borrow_mut().font_size = size;
    }

    /// The figure-wide legend.
    pub fn legend(&self) -> &ItemRef<Legend> {
        &self.inner.legend
    }

    /// Whether the figure-wide legend is drawn.
    pub fn is_legend_visible(&self) -> bool {
        self.inner.legend.is_visible()
    }

    /// Shows or hides the figure-wide legend.
    pub fn set_legend_visible(&self, visible: bool) {
        self.inner.legend.set_visible(visible);
    }

    /// Grid size in cells: columns as `width`, rows as `height`.
    pub fn layout_grid(&self) -> Size {
        self.inner.state.borrow().grid
    }

    /// Whether a view holding this figure keeps it alive.
    pub fn is_managed(&self) -> bool {
        self.inner.state.borrow().managed
    }

    /// Chooses the ownership mode used the next time the figure is given to a view.
    pub fn set_managed(&self, managed: bool) {
        self.inner.state.borrow_mut().managed = managed;
    }

    /// The view showing this figure.
    pub fn view(&self) -> Option<View> {
        self.inner.state.borrow().view.upgrade().map(View::from_inner)
    }

    pub(crate) fn set_view(&self, view: Weak<ViewInner>) {
        self.inner.state.borrow_mut().view = view;
    }

    /// Asks the view for a repaint.
    ///
    /// Inside [`Figure::handle_mouse_event`] the request is deferred until the
    /// broadcast has reached every scale, so any number of requests produce one
    /// repaint.
    pub fn request_redraw(&self) {
        self.inner.redraw_requested.set(true);
        if self.inner.dispatch_depth.get() == 0 {
            self.flush_redraw();
        }
    }

    fn flush_redraw(&self) {
        if !self.inner.redraw_requested.replace(false) {
            return;
        }
        match self.view() {
            Some(view) => view.redraw(),
            None => trace!("redraw requested without a view"),
        }
    }

    /// Draws the figure into `rect` using the current frame mode.
    pub fn draw(&self, rect: Rect, ctx: &mut dyn DrawContext) {
        self.draw_framed(rect, ctx, self.frame_mode());
    }

    fn draw_framed(&self, rect: Rect, ctx: &mut dyn DrawContext, mode: FrameMode) {
        let (scales, background, font_size, grid) = {
            let state = self.inner.state.borrow();
            let scales: Vec<Scale> = state
                .scales
                .iter()
                .filter_map(Slot::get)
                .map(Scale::from_inner)
                .collect();
            (scales, state.background, state.font_size, state.grid)
        };
        trace!(?rect, ?mode, scales = scales.len(), "drawing figure");

        let (area, frame) = match mode {
            FrameMode::Rectangle => (rect, rect_path(rect)),
            FrameMode::RoundedRectangle => {
                let area = rect.inset(-FRAME_RADIUS);
                (area, rounded_rect_path(area, FRAME_RADIUS))
            }
        };

        ctx.save();
        ctx.set_font_size(font_size);
        if let Some(background) = background {
            ctx.fill(&frame, background);
        }
        ctx.clip(&frame);
        if grid.width > 0.0 && grid.height > 0.0 {
            let cell = Size::new(area.width() / grid.width, area.height() / grid.height);
            for scale in scales.iter().filter(|scale| scale.is_visible()) {
                let layout = scale.layout_rect();
                let cell_rect = Rect::new(
                    area.x0 + layout.x0 * cell.width,
                    area.y0 + layout.y0 * cell.height,
                    area.x0 + layout.x1 * cell.width,
                    area.y0 + layout.y1 * cell.height,
                );
                scale.draw(cell_rect, ctx);
            }
        }
        self.draw_legend(&scales, area, ctx);
        ctx.restore();
    }

    fn draw_legend(&self, scales: &[Scale], area: Rect, ctx: &mut dyn DrawContext) {
        let legend = &self.inner.legend;
        if !legend.is_visible() {
            return;
        }
        let members = legend_members(scales);
        match legend.try_borrow_mut() {
            Some(mut legend) => legend.set_members(&members),
            None => {
                warn!("legend is busy; skipped in this draw pass");
                return;
            }
        }
        let mut cx = DrawCx::new(ctx, None, area);
        legend.draw(&mut cx);
    }

    /// Broadcasts `event` to every scale, then repaints once if anything asked
    /// for it. Returns whether a repaint was requested.
    pub fn handle_mouse_event(&self, event: &MouseEvent) -> bool {
        let scales = self.scales();
        trace!(?event, scales = scales.len(), "dispatching mouse event");
        let depth = &self.inner.dispatch_depth;
        depth.set(depth.get() + 1);
        for scale in &scales {
            if scale.dispatch_mouse_event(event) {
                self.inner.redraw_requested.set(true);
            }
        }
        depth.set(depth.get() - 1);
        let requested = self.inner.redraw_requested.get();
        if depth.get() == 0 {
            self.flush_redraw();
        }
        requested
    }

    /// Draws the figure into a fresh `width × height` surface from `factory`.
    ///
    /// The frame is always a plain rectangle here. The scales' plot areas and the
    /// legend box are put back afterwards, so on-screen hit testing keeps working
    /// against the last on-screen draw. An empty size draws nothing and returns
    /// `None`.
    pub fn render_offscreen<F: SurfaceFactory>(
        &self,
        factory: &mut F,
        width: u32,
        height: u32,
    ) -> Option<F::Surface> {
        if width == 0 || height == 0 {
            debug!(width, height, "offscreen render skipped: empty surface");
            return None;
        }
        let scales = self.scales();
        let live: Vec<Rect> = scales.iter().map(Scale::figure_rect).collect();
        let legend = &self.inner.legend;
        let live_legend = legend.try_borrow_mut().map(|legend| legend.rect());

        let mut surface = factory.create_surface(width, height);
        let rect = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
        self.draw_framed(rect, &mut surface, FrameMode::Rectangle);

        for (scale, rect) in scales.iter().zip(live) {
            scale.set_figure_rect(rect);
        }
        if let (Some(rect), Some(mut legend)) = (live_legend, legend.try_borrow_mut()) {
            legend.set_rect(rect);
        }
        Some(surface)
    }

    /// Recomputes the grid from the scales' layout rectangles.
    pub(crate) fn update_layout(&self) {
        let scales = self.scales();
        let grid = scales.iter().fold(Size::ZERO, |grid, scale| {
            let layout = scale.layout_rect();
            Size::new(grid.width.max(layout.x1), grid.height.max(layout.y1))
        });
        self.inner.state.borrow_mut().grid = grid;
        debug!(columns = grid.width, rows = grid.height, "figure layout updated");
    }
}
