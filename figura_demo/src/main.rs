// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Figure demos for `figura_core`, rendered to SVG files.

mod animation;
mod plot_stack;
mod simple;
mod widgets;

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use figura_core::{View, ViewHost};
use figura_svg::SvgContext;
use kurbo::Size;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Which demo to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Demo {
    /// Every demo.
    All,
    /// One sine series on a boxed scale.
    Simple,
    /// Two scales stacked vertically with π and month ticks.
    PlotStack,
    /// Random points regenerated by simulated button presses.
    Widgets,
    /// A travelling wave with a simulated axis click.
    Animation,
}

#[derive(Parser, Debug)]
#[command(name = "figura_demo")]
#[command(about = "Renders the figura demos to SVG files", long_about = None)]
struct Args {
    /// Directory the SVG files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 500)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Demo to run
    #[arg(long, value_enum, default_value_t = Demo::All)]
    demo: Demo,

    /// Number of frames the animation demo renders
    #[arg(long, default_value_t = 5)]
    frames: u32,
}

/// Output settings shared by the demos.
#[derive(Clone, Debug)]
pub(crate) struct Output {
    pub(crate) dir: PathBuf,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Output {
    pub(crate) fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// A host that remembers whether the view asked for a repaint, standing in for
/// a window's "queue draw".
#[derive(Clone, Debug, Default)]
pub(crate) struct FrameHost {
    pending: Rc<Cell<bool>>,
}

impl FrameHost {
    /// Whether a repaint was queued since the last call.
    pub(crate) fn take_pending(&self) -> bool {
        self.pending.replace(false)
    }
}

impl ViewHost for FrameHost {
    fn queue_redraw(&self) {
        self.pending.set(true);
    }
}

/// Paints the view the way a window repaint would and writes the result to `path`.
///
/// Unlike an offscreen export this is the live drawing, so later pointer events
/// are hit-tested against it.
pub(crate) fn write_frame(view: &View, path: &Path, output: &Output) -> Result<()> {
    ensure!(view.figure().is_some(), "view has no figure");
    let mut surface = SvgContext::new(output.width, output.height);
    let size = Size::new(f64::from(output.width), f64::from(output.height));
    view.draw(size, &mut surface);
    fs::write(path, surface.to_svg_string())
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "frame written");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let output = Output {
        dir: args.out_dir,
        width: args.width,
        height: args.height,
    };

    let run = |demo: Demo| args.demo == Demo::All || args.demo == demo;
    if run(Demo::Simple) {
        simple::run(&output)?;
    }
    if run(Demo::PlotStack) {
        plot_stack::run(&output)?;
    }
    if run(Demo::Widgets) {
        widgets::run(&output)?;
    }
    if run(Demo::Animation) {
        animation::run(&output, args.frames)?;
    }
    Ok(())
}
