// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One filled sine series on a boxed scale.

use std::f64::consts::PI;

use anyhow::{Result, ensure};
use figura_core::{Figure, ItemRef, XyScale, XySeries};
use figura_svg::write_figure_svg;
use tracing::info;

use crate::Output;

const POINTS: u32 = 50;

pub(crate) fn run(output: &Output) -> Result<()> {
    let dx = 4.0 * PI / f64::from(POINTS);
    let x: Vec<f64> = (0..POINTS).map(|k| f64::from(k) * dx).collect();
    let y: Vec<f64> = x.iter().map(|x| x.sin()).collect();

    let figure = Figure::new();
    let scale = XyScale::new();
    figure.add_scale(&scale);
    let series = ItemRef::named("Sine", XySeries::new("kOr").with_data(&x, &y));
    scale.add_item(&series);
    figure.set_legend_visible(true);

    let path = output.path("simple.svg");
    let written = write_figure_svg(&figure, &path, output.width, output.height)?;
    ensure!(written, "output size {}x{} is empty", output.width, output.height);
    info!(path = %path.display(), "simple demo written");
    Ok(())
}
