// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A view whose data is regenerated by an "Update plot" button.
//!
//! There is no window here: button presses are simulated and every repaint the
//! view queues is written out as a numbered SVG frame.

use anyhow::Result;
use figura_core::{Figure, ItemRef, View, XyScale, XySeries};
use rand::Rng;
use tracing::{debug, info};

use crate::{FrameHost, Output, write_frame};

const POINTS: usize = 100;
const PRESSES: usize = 3;

fn random_points(rng: &mut impl Rng) -> (Vec<f64>, Vec<f64>) {
    let x = (0..POINTS).map(|_| rng.random::<f64>()).collect();
    let y = (0..POINTS).map(|_| rng.random::<f64>()).collect();
    (x, y)
}

pub(crate) fn run(output: &Output) -> Result<()> {
    let mut rng = rand::rng();
    let host = FrameHost::default();
    let view = View::new(host.clone());
    let figure = Figure::new();
    view.set_figure(Some(&figure));

    let (x, y) = random_points(&mut rng);
    let scale = XyScale::new();
    figure.add_scale(&scale);
    let series = ItemRef::named("Random Points", XySeries::new("kor").with_data(&x, &y));
    scale.add_item(&series);

    let mut frame = 0;
    for press in 0..=PRESSES {
        if press > 0 {
            // "Update plot" clicked.
            let (x, y) = random_points(&mut rng);
            series.borrow_mut().set_data(&x, &y);
            scale.rescale();
            view.redraw();
        }
        if host.take_pending() {
            let path = output.path(&format!("widgets_{frame}.svg"));
            write_frame(&view, &path, output)?;
            frame += 1;
        } else {
            debug!(press, "no repaint queued");
        }
    }
    info!(frames = frame, "widgets demo written");
    Ok(())
}
