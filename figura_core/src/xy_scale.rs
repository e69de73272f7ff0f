// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scale framed by four axes.

use alloc::rc::Rc;
use core::cell::Cell;
use core::ops::Deref;

use kurbo::{Insets, Rect};
use tracing::warn;

use crate::axis::{Axis, AxisComponents};
use crate::draw::Orientation;
use crate::item::ItemRef;
use crate::sampler::SamplerMode;
use crate::scale::Scale;

/// Room left around the plot area of an [`XyScale`] for labels and titles.
pub const DEFAULT_PADDING: Insets = Insets::new(60.0, 40.0, 24.0, 50.0);

/// How the axes of an [`XyScale`] are arranged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisFrameMode {
    /// Four axes around the data rectangle.
    #[default]
    Box,
    /// A bottom and a left axis crossing at the origin when it is in range.
    Cross,
    /// No axes.
    None,
}

/// One of the four axes of an [`XyScale`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum XyAxisSide {
    /// The bottom axis; it carries the tick labels for `x`.
    Bottom,
    /// The left axis; it carries the tick labels for `y`.
    Left,
    /// The top axis; its title is the chart title.
    Top,
    /// The right axis.
    Right,
}

impl XyAxisSide {
    const ALL: [Self; 4] = [Self::Bottom, Self::Left, Self::Top, Self::Right];

    fn index(self) -> usize {
        match self {
            Self::Bottom => 0,
            Self::Left => 1,
            Self::Top => 2,
            Self::Right => 3,
        }
    }
}

/// The axes a scale keeps aligned with its data rectangle.
#[derive(Clone, Debug)]
pub(crate) struct AxisFrame {
    axes: [ItemRef<Axis>; 4],
    mode: Rc<Cell<AxisFrameMode>>,
}

impl AxisFrame {
    fn new() -> Self {
        let bottom = Axis::new(Orientation::Horizontal);
        let left = Axis::new(Orientation::Vertical);
        // Ticks-up placement puts the title above the line; there are no samples.
        let mut top = Axis::new(Orientation::Horizontal)
            .with_components(AxisComponents::LINE | AxisComponents::TICKS_UP | AxisComponents::TITLE);
        top.sampler_mut().set_mode(SamplerMode::Manual);
        let right = Axis::new(Orientation::Vertical).with_components(AxisComponents::LINE);
        Self {
            axes: [bottom, left, top, right].map(ItemRef::new),
            mode: Rc::new(Cell::new(AxisFrameMode::Box)),
        }
    }

    fn axis(&self, side: XyAxisSide) -> &ItemRef<Axis> {
        &self.axes[side.index()]
    }

    /// Moves the axes onto the edges (or origin lines) of `rect`.
    pub(crate) fn fit(&self, rect: Rect) {
        let mode = self.mode.get();
        let (anchor_x, anchor_y) = match mode {
            AxisFrameMode::Cross => (cross_anchor(rect.x0, rect.x1), cross_anchor(rect.y0, rect.y1)),
            AxisFrameMode::Box | AxisFrameMode::None => (rect.x0, rect.y0),
        };
        let positions = [
            (rect.x0, rect.x1, anchor_y),
            (rect.y0, rect.y1, anchor_x),
            (rect.x0, rect.x1, rect.y1),
            (rect.y0, rect.y1, rect.x1),
        ];
        for (side, (min, max, anchor)) in XyAxisSide::ALL.into_iter().zip(positions) {
            let axis = self.axis(side);
            match axis.try_borrow_mut() {
                Some(mut axis) => axis.set_position(min, max, anchor),
                None => warn!(?side, "axis is busy; left at its old position"),
            }
            let visible = match mode {
                AxisFrameMode::Box => true,
                AxisFrameMode::Cross => matches!(side, XyAxisSide::Bottom | XyAxisSide::Left),
                AxisFrameMode::None => false,
            };
            axis.set_visible(visible);
        }
    }
}

/// Zero when it lies in the span, otherwise the span's start.
fn cross_anchor(start: f64, end: f64) -> f64 {
    let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
    if (lo..=hi).contains(&0.0) { 0.0 } else { start }
}

/// A [`Scale`] with bottom, left, top and right axes that follow its data
/// rectangle.
///
/// Dereferences to the underlying [`Scale`], so it can be handed to
/// [`Figure::add_scale`](crate::Figure::add_scale) directly.
#[derive(Clone, Debug)]
pub struct XyScale {
    scale: Scale,
    frame: AxisFrame,
}

impl Default for XyScale {
    fn default() -> Self {
        Self::new()
    }
}

impl XyScale {
    /// A scale with a box of untitled axes and [`DEFAULT_PADDING`].
    pub fn new() -> Self {
        let scale = Scale::new();
        scale.set_padding(DEFAULT_PADDING);
        let frame = AxisFrame::new();
        for axis in &frame.axes {
            scale.add_item(axis);
        }
        scale.set_frame(frame.clone());
        Self { scale, frame }
    }

    /// A scale whose bottom, left and top axes carry the given titles.
    pub fn with_titles(x_title: &str, y_title: &str, top_title: &str) -> Self {
        let scale = Self::new();
        for (side, title) in [
            (XyAxisSide::Bottom, x_title),
            (XyAxisSide::Left, y_title),
            (XyAxisSide::Top, top_title),
        ] {
            scale.axis(side).borrow_mut().set_title(Some(title.into()));
        }
        scale
    }

    /// The underlying scale.
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    /// One of the four axes.
    pub fn axis(&self, side: XyAxisSide) -> &ItemRef<Axis> {
        self.frame.axis(side)
    }

    /// The axis arrangement.
    pub fn frame_mode(&self) -> AxisFrameMode {
        self.frame.mode.get()
    }

    /// Rearranges the axes.
    pub fn set_frame_mode(&self, mode: AxisFrameMode) {
        self.frame.mode.set(mode);
        self.frame.fit(self.scale.data_rect());
    }
}

impl Deref for XyScale {
    type Target = Scale;

    fn deref(&self) -> &Scale {
        &self.scale
    }
}

impl From<XyScale> for Scale {
    fn from(scale: XyScale) -> Self {
        scale.scale
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::series::XySeries;

    fn position(scale: &XyScale, side: XyAxisSide) -> (f64, f64, f64) {
        scale.axis(side).borrow().position()
    }

    #[test]
    fn axes_are_items_but_not_data() {
        let scale = XyScale::new();
        assert_eq!(scale.items().len(), 4);
        assert_eq!(scale.padding(), DEFAULT_PADDING);

        let series = ItemRef::new(XySeries::new("k-").with_data(&[2.0, 4.0], &[1.0, 3.0]));
        scale.add_item(&series);
        assert_eq!(scale.data_rect(), Rect::new(2.0, 1.0, 4.0, 3.0));
    }

    #[test]
    fn box_axes_follow_the_data_rect() {
        let scale = XyScale::new();
        scale.set_data_rect(Rect::new(-1.0, 2.0, 5.0, 8.0));
        assert_eq!(position(&scale, XyAxisSide::Bottom), (-1.0, 5.0, 2.0));
        assert_eq!(position(&scale, XyAxisSide::Left), (2.0, 8.0, -1.0));
        assert_eq!(position(&scale, XyAxisSide::Top), (-1.0, 5.0, 8.0));
        assert_eq!(position(&scale, XyAxisSide::Right), (2.0, 8.0, 5.0));
        assert!(XyAxisSide::ALL.iter().all(|side| scale.axis(*side).is_visible()));
    }

    #[test]
    fn cross_axes_meet_at_the_origin() {
        let scale = XyScale::new();
        scale.set_frame_mode(AxisFrameMode::Cross);
        scale.set_data_rect(Rect::new(-1.0, 2.0, 5.0, 8.0));
        // x range contains 0, y range does not.
        assert_eq!(position(&scale, XyAxisSide::Left).2, 0.0);
        assert_eq!(position(&scale, XyAxisSide::Bottom).2, 2.0);
        assert!(scale.axis(XyAxisSide::Bottom).is_visible());
        assert!(!scale.axis(XyAxisSide::Top).is_visible());
        assert!(!scale.axis(XyAxisSide::Right).is_visible());
    }

    #[test]
    fn no_frame_hides_every_axis() {
        let scale = XyScale::new();
        scale.set_frame_mode(AxisFrameMode::None);
        assert_eq!(scale.frame_mode(), AxisFrameMode::None);
        assert!(XyAxisSide::ALL.iter().all(|side| !scale.axis(*side).is_visible()));
    }

    #[test]
    fn titles() {
        let scale = XyScale::with_titles("Phase", "Amplitude", "Sinusoidal functions");
        assert_eq!(scale.axis(XyAxisSide::Bottom).borrow().title(), Some("Phase"));
        assert_eq!(scale.axis(XyAxisSide::Left).borrow().title(), Some("Amplitude"));
        assert_eq!(scale.axis(XyAxisSide::Top).borrow().title(), Some("Sinusoidal functions"));
        assert_eq!(scale.axis(XyAxisSide::Right).borrow().title(), None);
    }
}
