// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive 2-D chart core.
//!
//! A [`Figure`] holds [`Scale`]s laid out on a grid; every scale holds a tree of
//! [`Item`]s (axes, series, legends or your own) and maps their data coordinates
//! into its pixel cell. Drawing goes through the [`DrawContext`] trait, so any
//! backend that can stroke, fill, clip and place text can render a figure.
//!
//! - **Sampling**: [`Sampler`] picks tick positions with `{1, 2, 5} × 10^k` steps.
//! - **Items**: [`ItemHandle`] / [`ItemRef`] address nodes of the item tree; a node
//!   either owns its sub-items or only points at them (see [`ItemHandle::set_managed`]).
//! - **Scales**: [`Scale`] owns the data-to-pixel [`Mapping`] and autoscaling;
//!   [`XyScale`] adds a frame of four [`Axis`] items.
//! - **Figures**: [`Figure`] lays scales out, aggregates a [`Legend`], coalesces
//!   redraw requests raised while broadcasting pointer events, and renders
//!   offscreen through a [`SurfaceFactory`].
//! - **Views**: [`View`] binds a figure to a host that implements [`ViewHost`].
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). Drawing and dispatch never
//! fail: a node that is busy (borrowed by a reentrant call) is logged with
//! `tracing` and skipped.
//!
//! ```
//! use figura_core::{Figure, ItemRef, XyScale, XySeries};
//!
//! let figure = Figure::new();
//! let scale = XyScale::with_titles("x", "y", "Squares");
//! figure.add_scale(&scale);
//!
//! let xs = [0.0, 1.0, 2.0, 3.0];
//! let ys = xs.map(|x| x * x);
//! let series = ItemRef::named("x²", XySeries::new("kOr").with_data(&xs, &ys));
//! scale.add_item(&series);
//!
//! assert_eq!(scale.data_rect(), kurbo::Rect::new(0.0, 0.0, 3.0, 9.0));
//! ```

#![no_std]

extern crate alloc;

mod axis;
mod draw;
mod error;
mod event;
mod figure;
#[cfg(test)]
mod figure_tests;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod item;
mod legend;
mod sampler;
mod scale;
mod series;
mod slot;
#[cfg(test)]
mod testing;
mod view;
mod xy_scale;

pub use axis::{Axis, AxisComponents, AxisStyle};
pub use draw::{
    DrawContext, Orientation, StrokeStyle, TextExtents, circle_path, cosmetic_line, cosmetic_width,
    line_path, paint, parse_color_char, rect_path, rounded_rect_path,
};
pub use error::TreeError;
pub use event::{MouseButton, MouseEvent, MouseEventKind};
pub use figure::{DEFAULT_FONT_SIZE, FRAME_RADIUS, Figure, FrameMode, SurfaceFactory};
pub use format::format_tick;
pub use item::{DrawCx, EventCx, Item, ItemHandle, ItemRef};
pub use legend::{
    CORNER_MARGIN, Corner, Legend, LegendPosition, LegendStyle, PADDING as LEGEND_PADDING,
    THUMB_WIDTH, legend_members,
};
pub use sampler::{
    MAX_SAMPLES, Sample, Sampler, SamplerMode, decimal_step, month_samples, pi_samples,
};
pub use scale::{DEGENERATE_HALF_SPAN, Mapping, Scale};
pub use series::{SeriesMode, SeriesStyle, XySeries};
pub use view::{View, ViewHost};
pub use xy_scale::{AxisFrameMode, DEFAULT_PADDING, XyAxisSide, XyScale};

