// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::rc::{Rc, Weak};
use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use peniko::color::palette::css;

use crate::figure::FigureInner;
use crate::testing::{CountingHost, Op, Probe, RecordingContext, RecordingFactory};
use crate::{
    DrawCx, EventCx, Figure, FrameMode, Item, ItemHandle, ItemRef, MouseEvent, Scale, View,
    XyAxisSide, XyScale,
};

fn scale_at(figure: &Figure, x: f64, y: f64) -> Scale {
    let scale = Scale::new();
    figure.add_scale(&scale);
    scale.set_layout_rect(x, y, 1.0, 1.0);
    scale
}

fn draw(figure: &Figure, rect: Rect) -> RecordingContext {
    let mut ctx = RecordingContext::default();
    figure.draw(rect, &mut ctx);
    ctx
}

/// Asks the figure directly (not through the event context) for a repaint.
#[derive(Debug)]
struct Nagger(Weak<FigureInner>);

impl Item for Nagger {
    fn draw(&mut self, _cx: &mut DrawCx<'_>) {}

    fn handle_mouse_event(&mut self, _event: &MouseEvent, _cx: &mut EventCx) {
        if let Some(inner) = self.0.upgrade() {
            Figure::from_inner(inner).request_redraw();
        }
    }
}

/// Moves another item to another scale when it sees an event.
#[derive(Debug)]
struct Mover {
    target: ItemHandle,
    to: Scale,
}

impl Item for Mover {
    fn draw(&mut self, _cx: &mut DrawCx<'_>) {}

    fn handle_mouse_event(&mut self, _event: &MouseEvent, _cx: &mut EventCx) {
        self.to.add_item(&self.target);
    }
}

#[test]
fn layout_grid_covers_every_scale() {
    let figure = Figure::new();
    assert_eq!(figure.layout_grid(), Size::ZERO);
    let top = scale_at(&figure, 0.0, 0.0);
    assert_eq!(figure.layout_grid(), Size::new(1.0, 1.0));
    let bottom = scale_at(&figure, 0.0, 1.0);
    assert_eq!(figure.layout_grid(), Size::new(1.0, 2.0));

    figure.set_frame_mode(FrameMode::Rectangle);
    draw(&figure, Rect::new(0.0, 0.0, 200.0, 400.0));
    assert_eq!(top.figure_rect(), Rect::new(0.0, 0.0, 200.0, 200.0));
    assert_eq!(bottom.figure_rect(), Rect::new(0.0, 200.0, 200.0, 400.0));

    bottom.set_layout_rect(1.0, 0.0, 1.0, 1.0);
    assert_eq!(figure.layout_grid(), Size::new(2.0, 1.0), "moving a scale relayouts");
    figure.remove_scale(&bottom);
    assert_eq!(figure.layout_grid(), Size::new(1.0, 1.0));
}

#[test]
fn rounded_frames_are_inset() {
    let figure = Figure::new();
    let scale = scale_at(&figure, 0.0, 0.0);
    let ctx = draw(&figure, Rect::new(0.0, 0.0, 200.0, 100.0));
    assert_eq!(scale.figure_rect(), Rect::new(10.0, 10.0, 190.0, 90.0));
    assert_eq!(ctx.ops[0], Op::Save);
    assert_eq!(ctx.ops[1], Op::FontSize(11.0));
    let Op::Fill(frame, color) = &ctx.ops[2] else {
        panic!("expected the background fill, got {:?}", ctx.ops[2]);
    };
    assert_eq!(*color, css::WHITE);
    let inset = Rect::new(10.0, 10.0, 190.0, 90.0);
    assert!(
        (frame.x0 - inset.x0).abs() < 1e-9
            && (frame.y0 - inset.y0).abs() < 1e-9
            && (frame.x1 - inset.x1).abs() < 1e-9
            && (frame.y1 - inset.y1).abs() < 1e-9,
        "frame {frame:?} should hug {inset:?}"
    );
    assert_eq!(ctx.ops.last(), Some(&Op::Restore));
}

#[test]
fn transparent_background_is_not_filled() {
    let figure = Figure::new();
    figure.set_background(None);
    let ctx = draw(&figure, Rect::new(0.0, 0.0, 200.0, 100.0));
    assert!(ctx.fills().is_empty(), "no fill expected: {:?}", ctx.ops);
}

#[test]
fn hidden_scales_are_not_drawn() {
    let figure = Figure::new();
    let scale = scale_at(&figure, 0.0, 0.0);
    scale.add_item(&ItemRef::new(Probe::labeled("drawn?")));
    scale.set_visible(false);
    let ctx = draw(&figure, Rect::new(0.0, 0.0, 200.0, 100.0));
    assert!(ctx.texts().is_empty());
}

#[test]
fn adding_to_a_scale_in_a_figure_rescales() {
    let figure = Figure::new();
    let scale = scale_at(&figure, 0.0, 0.0);
    scale.add_item(&ItemRef::new(Probe::with_data(Rect::new(0.0, 0.0, 1.0, 1.0))));
    scale.add_item(&ItemRef::new(Probe::with_data(Rect::new(2.0, 2.0, 3.0, 3.0))));
    assert_eq!(scale.data_rect(), Rect::new(0.0, 0.0, 3.0, 3.0));
}

#[test]
fn broadcast_reaches_every_scale_once() {
    let figure = Figure::new();
    let probes: Vec<ItemRef<Probe>> = (0..3)
        .map(|i| {
            let scale = scale_at(&figure, f64::from(i), 0.0);
            // The first probe "handles" the event; the others must still see it.
            let probe = if i == 0 {
                ItemRef::new(Probe::labeled("p").requesting_redraw())
            } else {
                ItemRef::new(Probe::labeled("p"))
            };
            scale.add_item(&probe);
            probe
        })
        .collect();

    assert!(figure.handle_mouse_event(&MouseEvent::left_press(Point::new(5.0, 5.0))));
    for probe in &probes {
        assert_eq!(probe.borrow().events, 1);
    }
}

#[test]
fn hidden_scales_still_receive_events() {
    let figure = Figure::new();
    let scale = scale_at(&figure, 0.0, 0.0);
    let probe = ItemRef::new(Probe::labeled("p"));
    scale.add_item(&probe);
    scale.set_visible(false);
    assert!(!figure.handle_mouse_event(&MouseEvent::left_press(Point::ZERO)));
    assert_eq!(probe.borrow().events, 1);
}

#[test]
fn redraw_requests_are_coalesced() {
    let host = CountingHost::default();
    let view = View::new(host.clone());
    let figure = Figure::new();
    view.set_figure(Some(&figure));
    let after_attach = host.count();

    for x in 0..2 {
        let scale = scale_at(&figure, f64::from(x), 0.0);
        scale.add_item(&ItemRef::new(Probe::labeled("p").requesting_redraw()));
        scale.add_item(&ItemRef::new(Nagger(Rc::downgrade(figure.inner()))));
    }
    assert!(figure.handle_mouse_event(&MouseEvent::left_press(Point::ZERO)));
    assert_eq!(host.count(), after_attach + 1, "four requests, one repaint");

    figure.request_redraw();
    assert_eq!(host.count(), after_attach + 2, "outside a broadcast requests go straight through");
}

#[test]
fn no_redraw_without_requests() {
    let host = CountingHost::default();
    let view = View::new(host.clone());
    let figure = Figure::new();
    view.set_figure(Some(&figure));
    let scale = scale_at(&figure, 0.0, 0.0);
    scale.add_item(&ItemRef::new(Probe::labeled("quiet")));
    let before = host.count();
    assert!(!figure.handle_mouse_event(&MouseEvent::left_press(Point::ZERO)));
    assert_eq!(host.count(), before);
}

#[test]
fn handlers_may_move_items_during_a_broadcast() {
    let figure = Figure::new();
    let first = scale_at(&figure, 0.0, 0.0);
    let second = scale_at(&figure, 1.0, 0.0);
    let probe = ItemRef::new(Probe::labeled("moved"));
    let mover = ItemRef::new(Mover {
        target: probe.handle().clone(),
        to: second.clone(),
    });
    first.add_item(&mover);
    first.add_item(&probe);

    figure.handle_mouse_event(&MouseEvent::left_press(Point::ZERO));
    assert_eq!(probe.borrow().events, 1, "seen in its new scale only");
    assert!(probe.scale().is_some_and(|s| s.ptr_eq(&second)));
    assert_eq!(first.items().len(), 1);
    assert_eq!(second.items().len(), 1);
}

#[test]
fn legend_lists_visible_named_items_on_every_draw() {
    let figure = Figure::new();
    figure.set_legend_visible(true);
    let left = scale_at(&figure, 0.0, 0.0);
    let right = scale_at(&figure, 1.0, 0.0);
    let sine = ItemRef::named("Sine", Probe::labeled("s"));
    let cosine = ItemRef::named("Cosine", Probe::labeled("c"));
    let unnamed = ItemRef::new(Probe::labeled("u"));
    left.add_item(&sine);
    left.add_item(&unnamed);
    right.add_item(&cosine);

    let rect = Rect::new(0.0, 0.0, 400.0, 200.0);
    let ctx = draw(&figure, rect);
    let names: Vec<_> = figure
        .legend()
        .borrow()
        .members()
        .iter()
        .filter_map(ItemHandle::name)
        .collect();
    assert_eq!(names, vec!["Sine", "Cosine"]);
    assert!(ctx.texts().iter().any(|t| t == "Sine"));
    let legend_rect = figure.legend().borrow().rect();
    assert!(legend_rect.area() > 0.0);
    assert_eq!(rect.union(legend_rect), rect, "legend inside the figure");

    right.set_visible(false);
    draw(&figure, rect);
    assert_eq!(figure.legend().borrow().members().len(), 1, "recomputed, not cached");
}

#[test]
fn hidden_legend_is_not_drawn() {
    let figure = Figure::new();
    assert!(!figure.is_legend_visible());
    let scale = scale_at(&figure, 0.0, 0.0);
    scale.add_item(&ItemRef::named("Sine", Probe::labeled("s")));
    let ctx = draw(&figure, Rect::new(0.0, 0.0, 400.0, 200.0));
    assert!(!ctx.texts().iter().any(|t| t == "Sine"));
    assert_eq!(figure.legend().borrow().rect(), Rect::ZERO);
}

#[test]
fn offscreen_rendering_uses_a_plain_frame() {
    let figure = Figure::new();
    figure.set_legend_visible(true);
    let scale = scale_at(&figure, 0.0, 0.0);
    scale.add_item(&ItemRef::named("Sine", Probe::labeled("s")));
    draw(&figure, Rect::new(0.0, 0.0, 800.0, 600.0));
    let live = scale.figure_rect();
    let live_legend = figure.legend().borrow().rect();

    let mut factory = RecordingFactory::default();
    let surface = figure.render_offscreen(&mut factory, 300, 200);
    let Some(surface) = surface else {
        panic!("a non-empty size renders");
    };
    assert_eq!(factory.sizes, vec![(300, 200)]);
    let full = Rect::new(0.0, 0.0, 300.0, 200.0);
    assert_eq!(surface.ops[2], Op::Fill(full, css::WHITE));
    assert_eq!(surface.ops[3], Op::Clip(full));
    assert_eq!(scale.figure_rect(), live, "on-screen plot area kept");
    assert_eq!(figure.legend().borrow().rect(), live_legend, "on-screen legend kept");
    assert_eq!(figure.frame_mode(), FrameMode::RoundedRectangle, "on-screen mode untouched");
}

#[test]
fn axes_stay_clickable_on_screen_after_an_export() {
    let figure = Figure::new();
    let scale = XyScale::new();
    figure.add_scale(&scale);
    scale.add_item(&ItemRef::new(Probe::with_data(Rect::new(0.0, 0.0, 10.0, 10.0))));
    draw(&figure, Rect::new(0.0, 0.0, 800.0, 600.0));

    let mut factory = RecordingFactory::default();
    assert!(figure.render_offscreen(&mut factory, 200, 100).is_some());

    let on_axis = scale.map(Point::new(5.0, 0.0));
    assert!(figure.handle_mouse_event(&MouseEvent::left_press(on_axis)));
    assert!(scale.axis(XyAxisSide::Bottom).borrow().is_selected());
}

#[test]
fn empty_offscreen_surfaces_are_refused() {
    let figure = Figure::new();
    let mut factory = RecordingFactory::default();
    assert!(figure.render_offscreen(&mut factory, 0, 200).is_none());
    assert!(figure.render_offscreen(&mut factory, 300, 0).is_none());
    assert!(factory.sizes.is_empty());
}

#[test]
fn scales_move_between_figures() {
    let a = Figure::new();
    let b = Figure::new();
    let scale = scale_at(&a, 0.0, 0.0);
    b.add_scale(&scale);
    assert!(a.scales().is_empty());
    assert_eq!(b.scales().len(), 1);
    assert!(scale.figure().is_some_and(|f| f.ptr_eq(&b)));
    assert!(b.remove_scale(&scale));
    assert!(scale.figure().is_none());
    assert!(!b.remove_scale(&scale));
}

#[test]
fn unmanaged_scales_are_not_kept_alive() {
    let figure = Figure::new();
    {
        let scale = Scale::new();
        scale.set_managed(false);
        figure.add_scale(&scale);
        assert_eq!(figure.scales().len(), 1);
    }
    assert!(figure.scales().is_empty());
    {
        let scale = Scale::new();
        figure.add_scale(&scale);
    }
    assert_eq!(figure.scales().len(), 1);
}
