// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two scales stacked in one figure, with π-multiple and month ticks.

use std::f64::consts::PI;

use anyhow::{Result, ensure};
use figura_core::{Figure, ItemRef, XyAxisSide, XyScale, XySeries};
use figura_svg::write_figure_svg;
use tracing::info;

use crate::Output;

const POINTS: u32 = 50;

pub(crate) fn run(output: &Output) -> Result<()> {
    let dx = 4.0 * PI / f64::from(POINTS);
    let x: Vec<f64> = (0..POINTS).map(|k| f64::from(k) * dx).collect();
    let sine: Vec<f64> = x.iter().map(|x| x.sin()).collect();
    let cosine: Vec<f64> = x.iter().map(|x| x.cos()).collect();
    let trend: Vec<f64> = (0..POINTS)
        .zip(&sine)
        .map(|(k, s)| 1.0 + s + 0.1 * f64::from(k))
        .collect();

    let figure = Figure::new();

    let waves = XyScale::with_titles("Phase", "Amplitude", "Sinusoidal functions");
    waves.set_layout_rect(0.0, 0.0, 1.0, 1.0);
    figure.add_scale(&waves);
    waves
        .axis(XyAxisSide::Bottom)
        .borrow_mut()
        .sampler_mut()
        .set_pi_samples();

    let profit = XyScale::with_titles("Month", "Value", "Projected profit");
    profit.set_layout_rect(0.0, 1.0, 1.0, 1.0);
    figure.add_scale(&profit);
    profit
        .axis(XyAxisSide::Bottom)
        .borrow_mut()
        .sampler_mut()
        .set_month_samples();

    waves.add_item(&ItemRef::named("Sine", XySeries::new("r-").with_data(&x, &sine)));
    waves.add_item(&ItemRef::named("Cosine", XySeries::new("ga").with_data(&x, &cosine)));
    profit.add_item(&ItemRef::named(
        "Sine + Linear",
        XySeries::new("kob").with_data(&x, &trend),
    ));
    figure.set_legend_visible(true);

    let path = output.path("plot_stack.svg");
    let written = write_figure_svg(&figure, &path, output.width, 2 * output.height)?;
    ensure!(written, "output size {}x{} is empty", output.width, 2 * output.height);
    info!(path = %path.display(), grid = ?figure.layout_grid(), "plot stack demo written");
    Ok(())
}
