// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A travelling wave updated by a (simulated) timer, plus a click that selects the
//! bottom axis.

use std::f64::consts::PI;

use anyhow::Result;
use figura_core::{
    Figure, ItemRef, MouseButton, MouseEventKind, View, XyAxisSide, XyScale, XySeries,
};
use kurbo::Point;
use tracing::info;

use crate::{FrameHost, Output, write_frame};

const POINTS: u32 = 200;

pub(crate) fn run(output: &Output, frames: u32) -> Result<()> {
    let dx = 4.0 * PI / f64::from(POINTS);
    let x: Vec<f64> = (0..POINTS).map(|k| f64::from(k) * dx).collect();
    // The initial amplitude fixes the scale; later frames do not rescale.
    let y: Vec<f64> = x.iter().map(|x| 2.5 * x.sin()).collect();

    let host = FrameHost::default();
    let view = View::new(host.clone());
    let figure = Figure::new();
    view.set_figure(Some(&figure));
    let scale = XyScale::new();
    figure.add_scale(&scale);
    let series = ItemRef::named("Wave", XySeries::new("b-").with_data(&x, &y));
    scale.add_item(&series);

    let mut written = 0;
    for tick in 1..=frames {
        let t = 0.1 * f64::from(tick);
        let y: Vec<f64> = x.iter().map(|x| (x + t).sin() + (1.2 * x - t).sin()).collect();
        series.borrow_mut().set_data(&x, &y);
        figure.request_redraw();
        if host.take_pending() {
            write_frame(&view, &output.path(&format!("animation_{written}.svg")), output)?;
            written += 1;
        }
    }

    // Click the middle of the bottom axis; the axis highlights itself and the
    // figure queues exactly one repaint.
    let data = scale.data_rect();
    let on_axis = scale.map(Point::new(0.5 * (data.x0 + data.x1), data.y0));
    view.handle_pointer(MouseEventKind::Press, MouseButton::Left, on_axis);
    view.handle_pointer(MouseEventKind::Release, MouseButton::Left, on_axis);
    let selected = scale.axis(XyAxisSide::Bottom).borrow().is_selected();
    if host.take_pending() {
        write_frame(&view, &output.path("animation_selected.svg"), output)?;
        written += 1;
    }
    info!(frames = written, selected, "animation demo written");
    Ok(())
}
