// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legends.
//!
//! A [`Legend`] lists member items as `thumbnail + name` entries inside a box. The
//! box size comes from measuring every label with the drawing context, so the
//! legend is laid out anew on each draw. Members are weak: a legend never keeps
//! an item alive.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use peniko::Color;
use peniko::color::palette::css;

use crate::draw::{Orientation, StrokeStyle, paint, rect_path};
use crate::item::{DrawCx, Item, ItemHandle, WeakItem};
use crate::scale::{Mapping, Scale};

/// Width reserved for each member's thumbnail.
pub const THUMB_WIDTH: f64 = 40.0;
/// Padding between the box edge, thumbnails and labels.
pub const PADDING: f64 = 10.0;
/// Distance between a corner-placed legend and the corner.
pub const CORNER_MARGIN: f64 = 20.0;

/// A corner of the area a legend is drawn in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Top left.
    #[default]
    TopLeft,
    /// Top right.
    TopRight,
    /// Bottom left.
    BottomLeft,
    /// Bottom right.
    BottomRight,
}

/// Where the legend box goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LegendPosition {
    /// Top-left corner at this point, in the owning scale's data units (or in
    /// figure pixels when the legend has no scale).
    Custom(Point),
    /// Inside the given corner of the drawing area.
    Corner(Corner),
}

impl Default for LegendPosition {
    fn default() -> Self {
        Self::Corner(Corner::TopLeft)
    }
}

/// Legend box colors.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendStyle {
    /// Box fill; `None` leaves it transparent.
    pub fill: Option<Color>,
    /// Box border; `None` draws no border.
    pub stroke: Option<Color>,
    /// Label color.
    pub text: Color,
    /// Border width.
    pub stroke_width: f64,
    /// Whether the border may be antialiased.
    pub antialias: bool,
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            fill: Some(css::WHITE),
            stroke: Some(css::BLACK),
            text: css::BLACK,
            stroke_width: 1.0,
            antialias: false,
        }
    }
}

/// A legend item.
#[derive(Debug, Default)]
pub struct Legend {
    orientation: Orientation,
    position: LegendPosition,
    style: LegendStyle,
    members: Vec<WeakItem>,
    rect: Rect,
}

impl Legend {
    /// An empty legend laid out along `orientation`.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    /// Sets the position.
    pub fn with_position(mut self, position: LegendPosition) -> Self {
        self.position = position;
        self
    }

    /// Row or column layout.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Sets row or column layout.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Where the box goes.
    pub fn position(&self) -> LegendPosition {
        self.position
    }

    /// Sets where the box goes.
    pub fn set_position(&mut self, position: LegendPosition) {
        self.position = position;
    }

    /// The style.
    pub fn style(&self) -> &LegendStyle {
        &self.style
    }

    /// Mutable access to the style.
    pub fn style_mut(&mut self) -> &mut LegendStyle {
        &mut self.style
    }

    /// Appends a member (not owned).
    pub fn add_member(&mut self, item: &ItemHandle) {
        self.members.push(item.downgrade());
    }

    /// Removes every member.
    pub fn clear_members(&mut self) {
        self.members.clear();
    }

    /// Replaces the members.
    pub fn set_members(&mut self, items: &[ItemHandle]) {
        self.members = items.iter().map(ItemHandle::downgrade).collect();
    }

    /// The members that are still alive.
    pub fn members(&self) -> Vec<ItemHandle> {
        self.members.iter().filter_map(WeakItem::upgrade).collect()
    }

    /// The box drawn by the last draw; empty when there was nothing to list.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn origin(&self, cx: &DrawCx<'_>, size: Size) -> Point {
        match self.position {
            LegendPosition::Custom(point) => cx.map(point),
            LegendPosition::Corner(corner) => {
                let area = cx.area();
                let x = match corner {
                    Corner::TopLeft | Corner::BottomLeft => area.x0 + CORNER_MARGIN,
                    Corner::TopRight | Corner::BottomRight => {
                        area.x1 - CORNER_MARGIN - size.width
                    }
                };
                let y = match corner {
                    Corner::TopLeft | Corner::TopRight => area.y0 + CORNER_MARGIN,
                    Corner::BottomLeft | Corner::BottomRight => {
                        area.y1 - CORNER_MARGIN - size.height
                    }
                };
                Point::new(x, y)
            }
        }
    }
}

impl Item for Legend {
    fn draw(&mut self, cx: &mut DrawCx<'_>) {
        let entries: Vec<(ItemHandle, String)> = self
            .members()
            .into_iter()
            .filter(ItemHandle::is_visible)
            .map(|item| {
                let name = item.name().unwrap_or_default();
                (item, name)
            })
            .collect();
        if entries.is_empty() {
            self.rect = Rect::ZERO;
            return;
        }

        let mut entry_height: f64 = 0.0;
        let mut label_widths = Vec::with_capacity(entries.len());
        for (_, name) in &entries {
            let extents = cx.ctx.text_extents(name);
            entry_height = entry_height.max(extents.height);
            label_widths.push(extents.width);
        }
        let count = entries.len() as f64;
        let size = match self.orientation {
            Orientation::Horizontal => Size::new(
                label_widths
                    .iter()
                    .map(|w| w + THUMB_WIDTH + 2.0 * PADDING)
                    .sum::<f64>()
                    + PADDING,
                entry_height + 2.0 * PADDING,
            ),
            Orientation::Vertical => Size::new(
                label_widths.iter().copied().fold(0.0, f64::max) + THUMB_WIDTH + 3.0 * PADDING,
                count * (entry_height + PADDING) + PADDING,
            ),
        };
        self.rect = Rect::from_origin_size(self.origin(cx, size), size);

        let style = StrokeStyle::new(self.style.stroke_width).with_antialias(self.style.antialias);
        paint(
            cx.ctx,
            &rect_path(self.rect),
            self.style.stroke,
            self.style.fill,
            &style,
        );

        let mut pos = Point::new(
            self.rect.x0 + PADDING + 0.5 * THUMB_WIDTH,
            self.rect.y0 + PADDING + 0.5 * entry_height,
        );
        for ((item, name), width) in entries.iter().zip(&label_widths) {
            item.draw_thumb(cx.ctx, pos);
            let label = Point::new(
                pos.x + 0.5 * THUMB_WIDTH + PADDING,
                pos.y + 0.5 * entry_height,
            );
            cx.ctx.draw_text(name, label, self.style.text, 0.0);
            match self.orientation {
                Orientation::Horizontal => pos.x += width + THUMB_WIDTH + 2.0 * PADDING,
                Orientation::Vertical => pos.y += entry_height + PADDING,
            }
        }
    }

    fn figure_rect(&self, _mapping: Option<&Mapping>) -> Rect {
        self.rect
    }

    fn shows_in_legend(&self) -> bool {
        false
    }
}

/// The items a figure-wide legend lists: every visible, named item that wants to
/// be listed, from every visible scale, in scale order then item order.
pub fn legend_members(scales: &[Scale]) -> Vec<ItemHandle> {
    scales
        .iter()
        .filter(|scale| scale.is_visible())
        .flat_map(Scale::items)
        .filter(|item| item.is_visible() && item.name().is_some() && item.shows_in_legend())
        .collect()
}
