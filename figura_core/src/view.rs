// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Views bind a figure to a host surface.
//!
//! The host (a window, a widget, a test harness) implements [`ViewHost`] to be told
//! when a repaint is due, calls [`View::draw`] when it repaints and feeds raw pointer
//! input to [`View::handle_pointer`].

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt;

use kurbo::{Point, Rect, Size};
use tracing::trace;

use crate::draw::DrawContext;
use crate::event::{MouseButton, MouseEvent, MouseEventKind};
use crate::figure::{Figure, FigureInner, SurfaceFactory};
use crate::slot::Slot;

/// The surface a [`View`] is shown on.
pub trait ViewHost {
    /// Schedules a repaint; the host later calls [`View::draw`].
    fn queue_redraw(&self);
}

pub(crate) struct ViewInner {
    host: Box<dyn ViewHost>,
    figure: RefCell<Option<Slot<FigureInner>>>,
    pressed: Cell<Option<MouseButton>>,
}

impl fmt::Debug for ViewInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewInner")
            .field("figure", &self.figure)
            .field("pressed", &self.pressed)
            .finish_non_exhaustive()
    }
}

/// Shows one figure on a host surface.
///
/// Cloning shares the view.
#[derive(Clone, Debug)]
pub struct View {
    inner: Rc<ViewInner>,
}

impl View {
    /// A view with no figure.
    pub fn new(host: impl ViewHost + 'static) -> Self {
        Self {
            inner: Rc::new(ViewInner {
                host: Box::new(host),
                figure: RefCell::new(None),
                pressed: Cell::new(None),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Rc<ViewInner>) -> Self {
        Self { inner }
    }

    /// Shows `figure` (or nothing), releasing the previous figure.
    ///
    /// The view keeps the figure alive when [`Figure::is_managed`] is set.
    pub fn set_figure(&self, figure: Option<&Figure>) {
        if let (Some(current), Some(next)) = (self.figure(), figure) {
            if current.ptr_eq(next) {
                return;
            }
        }
        if let Some(current) = self.figure() {
            current.set_view(Weak::new());
        }
        *self.inner.figure.borrow_mut() =
            figure.map(|figure| Slot::new(figure.inner(), figure.is_managed()));
        if let Some(figure) = figure {
            figure.set_view(Rc::downgrade(&self.inner));
        }
        self.redraw();
    }

    /// The figure being shown.
    pub fn figure(&self) -> Option<Figure> {
        self.inner
            .figure
            .borrow()
            .as_ref()
            .and_then(Slot::get)
            .map(Figure::from_inner)
    }

    /// Asks the host for a repaint.
    pub fn redraw(&self) {
        trace!("view redraw queued");
        self.inner.host.queue_redraw();
    }

    /// Draws the figure over a `size` surface anchored at the origin.
    pub fn draw(&self, size: Size, ctx: &mut dyn DrawContext) {
        if let Some(figure) = self.figure() {
            figure.draw(Rect::from_origin_size(Point::ZERO, size), ctx);
        }
    }

    /// Renders the figure offscreen; see [`Figure::render_offscreen`].
    pub fn render_offscreen<F: SurfaceFactory>(
        &self,
        factory: &mut F,
        width: u32,
        height: u32,
    ) -> Option<F::Surface> {
        self.figure()?.render_offscreen(factory, width, height)
    }

    /// Forwards raw pointer input to the figure.
    ///
    /// A [`MouseEventKind::Move`] while a button is held becomes
    /// [`MouseEventKind::MovePressed`] for that button. Returns whether a repaint
    /// was requested.
    pub fn handle_pointer(&self, kind: MouseEventKind, button: MouseButton, position: Point) -> bool {
        let pressed = &self.inner.pressed;
        let (kind, button) = match kind {
            MouseEventKind::Press | MouseEventKind::DoublePress => {
                pressed.set(Some(button));
                (kind, button)
            }
            MouseEventKind::Release => {
                pressed.set(None);
                (kind, button)
            }
            MouseEventKind::Move => match pressed.get() {
                Some(held) => (MouseEventKind::MovePressed, held),
                None => (kind, button),
            },
            MouseEventKind::MovePressed => (kind, button),
        };
        let Some(figure) = self.figure() else {
            return false;
        };
        figure.handle_mouse_event(&MouseEvent::new(kind, button, position))
    }
}
