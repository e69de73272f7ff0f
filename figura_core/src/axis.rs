// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axes.
//!
//! An [`Axis`] is a ruled line between two data coordinates at a fixed anchor
//! (a `y` for horizontal axes, an `x` for vertical ones), decorated with ticks or
//! gridlines, tick labels and a title. Tick positions come from its [`Sampler`].

use alloc::string::String;
use core::ops::{BitOr, BitOrAssign};

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use peniko::color::palette::css;

use crate::draw::{Orientation, StrokeStyle, cosmetic_line, cosmetic_width, rect_path};
use crate::event::{MouseButton, MouseEvent, MouseEventKind};
use crate::item::{DrawCx, EventCx, Item};
use crate::sampler::Sampler;
use crate::scale::Mapping;

/// Half the thickness of the band around the axis line that reacts to clicks.
const HIT_HALF_THICKNESS: f64 = 4.0;

/// Which parts of an axis are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AxisComponents(u32);

impl AxisComponents {
    /// Nothing.
    pub const NONE: Self = Self(0);
    /// The axis line.
    pub const LINE: Self = Self(1);
    /// Ticks on the side facing away from the labels of [`Self::TICKS_DOWN`];
    /// labels go above (horizontal) or right (vertical).
    pub const TICKS_UP: Self = Self(1 << 1);
    /// Ticks pointing into the plot; labels go below (horizontal) or left (vertical).
    pub const TICKS_DOWN: Self = Self(1 << 2);
    /// Gridlines across the plot area instead of ticks.
    pub const GRID: Self = Self(1 << 3);
    /// The axis title.
    pub const TITLE: Self = Self(1 << 4);

    /// Returns `true` if every component of `other` is present.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// The raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    fn has_ticks(self) -> bool {
        self.contains(Self::TICKS_UP) || self.contains(Self::TICKS_DOWN)
    }
}

impl Default for AxisComponents {
    fn default() -> Self {
        Self::LINE | Self::TICKS_DOWN | Self::TITLE
    }
}

impl BitOr for AxisComponents {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for AxisComponents {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Axis colors and metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Axis line and tick color.
    pub line: Color,
    /// Gridline color.
    pub grid: Color,
    /// Tick label color.
    pub text: Color,
    /// Title color.
    pub title: Color,
    /// Fill of the highlight drawn over a selected axis.
    pub selection: Color,
    /// Axis line and tick width.
    pub line_width: f64,
    /// Gridline width.
    pub grid_width: f64,
    /// Whether lines may be antialiased.
    pub antialias: bool,
    /// Tick length in pixels.
    pub tick_length: f64,
    /// Minimum pixel distance between automatic ticks.
    pub tick_pitch: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            line: css::BLACK,
            grid: Color::from_rgba8(0x78, 0x78, 0x78, 0x40),
            text: css::BLACK,
            title: css::BLACK,
            selection: Color::from_rgba8(0x00, 0x00, 0xff, 0x64),
            line_width: 1.0,
            grid_width: 1.0,
            antialias: false,
            tick_length: 4.0,
            tick_pitch: 80.0,
        }
    }
}

/// A horizontal or vertical axis item.
#[derive(Clone, Debug)]
pub struct Axis {
    orientation: Orientation,
    min: f64,
    max: f64,
    anchor: f64,
    components: AxisComponents,
    style: AxisStyle,
    title: Option<String>,
    selected: bool,
    sampler: Sampler,
}

impl Axis {
    /// A `0..1` axis anchored at `0` with the default components.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            min: 0.0,
            max: 1.0,
            anchor: 0.0,
            components: AxisComponents::default(),
            style: AxisStyle::default(),
            title: None,
            selected: false,
            sampler: Sampler::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the drawn components.
    pub fn with_components(mut self, components: AxisComponents) -> Self {
        self.components = components;
        self
    }

    /// Sets the style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the extent and anchor, all in data units.
    pub fn with_position(mut self, min: f64, max: f64, anchor: f64) -> Self {
        self.set_position(min, max, anchor);
        self
    }

    /// Horizontal or vertical.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Sets the extent `min..max` along the axis and the anchor across it.
    pub fn set_position(&mut self, min: f64, max: f64, anchor: f64) {
        self.min = min;
        self.max = max;
        self.anchor = anchor;
    }

    /// `(min, max, anchor)`.
    pub fn position(&self) -> (f64, f64, f64) {
        (self.min, self.max, self.anchor)
    }

    /// The drawn components.
    pub fn components(&self) -> AxisComponents {
        self.components
    }

    /// Sets the drawn components.
    pub fn set_components(&mut self, components: AxisComponents) {
        self.components = components;
    }

    /// The title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Sets or clears the title.
    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    /// Whether the axis is highlighted.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Highlights the axis or removes the highlight.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// The style.
    pub fn style(&self) -> &AxisStyle {
        &self.style
    }

    /// Mutable access to the style.
    pub fn style_mut(&mut self) -> &mut AxisStyle {
        &mut self.style
    }

    /// The tick sampler.
    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    /// Mutable access to the tick sampler (e.g. to install manual ticks).
    pub fn sampler_mut(&mut self) -> &mut Sampler {
        &mut self.sampler
    }

    fn line_style(&self) -> StrokeStyle {
        StrokeStyle::new(cosmetic_width(self.style.line_width))
            .with_antialias(self.style.antialias)
    }

    fn grid_style(&self) -> StrokeStyle {
        StrokeStyle::new(cosmetic_width(self.style.grid_width))
            .with_antialias(self.style.antialias)
    }

    fn endpoints(&self, mapping: &Mapping) -> (Point, Point) {
        match self.orientation {
            Orientation::Horizontal => (
                mapping.map(Point::new(self.min, self.anchor)),
                mapping.map(Point::new(self.max, self.anchor)),
            ),
            Orientation::Vertical => (
                mapping.map(Point::new(self.anchor, self.min)),
                mapping.map(Point::new(self.anchor, self.max)),
            ),
        }
    }

    fn in_range(&self, coord: f64) -> bool {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        (lo..=hi).contains(&coord)
    }

    fn draw_line(&self, cx: &mut DrawCx<'_>, p1: Point, p2: Point) {
        let line = cosmetic_line(p1, p2, self.style.line_width);
        cx.ctx.stroke(&line, self.style.line, &self.line_style());
    }

    fn draw_horizontal(&mut self, cx: &mut DrawCx<'_>, mapping: &Mapping) {
        let text_height = cx.ctx.text_extents("dummy").height;
        let (p1, p2) = self.endpoints(mapping);
        let components = self.components;
        if components.contains(AxisComponents::LINE) {
            self.draw_line(cx, p1, p2);
            if components == AxisComponents::LINE {
                return;
            }
        }

        let span = (p2.x - p1.x).abs();
        self.sampler
            .generate(self.min, self.max, span, self.style.tick_pitch);
        let ticks_down = components.contains(AxisComponents::TICKS_DOWN);
        let tick = if ticks_down {
            -self.style.tick_length
        } else {
            self.style.tick_length
        };
        let area = cx.area();
        for sample in self.sampler.samples() {
            if !self.in_range(sample.coord) {
                continue;
            }
            let s1 = mapping.map(Point::new(sample.coord, self.anchor));
            if components.contains(AxisComponents::GRID) {
                let grid = cosmetic_line(
                    Point::new(s1.x, area.y0),
                    Point::new(s1.x, area.y1),
                    self.style.grid_width,
                );
                cx.ctx.stroke(&grid, self.style.grid, &self.grid_style());
            } else if components.has_ticks() {
                self.draw_line(cx, s1, s1 + Vec2::new(0.0, tick));
            }
            if let (Some(label), true) = (&sample.label, components.has_ticks()) {
                let extents = cx.ctx.text_extents(label);
                let y = if ticks_down {
                    s1.y + text_height
                } else {
                    s1.y - 0.3 * text_height
                };
                let origin = Point::new(s1.x - 0.5 * extents.width, y);
                cx.ctx.draw_text(label, origin, self.style.text, 0.0);
            }
        }

        if let (Some(title), true) = (&self.title, components.contains(AxisComponents::TITLE)) {
            let extents = cx.ctx.text_extents(title);
            let x = 0.5 * (p1.x + p2.x - extents.width);
            let y = if ticks_down {
                p1.y + 2.5 * text_height
            } else if components.contains(AxisComponents::TICKS_UP) {
                p1.y - 1.8 * text_height
            } else {
                p1.y + 1.3 * text_height
            };
            cx.ctx
                .draw_text(title, Point::new(x, y), self.style.title, 0.0);
        }
    }

    fn draw_vertical(&mut self, cx: &mut DrawCx<'_>, mapping: &Mapping) {
        let text_height = cx.ctx.text_extents("dummy").height;
        let (p1, p2) = self.endpoints(mapping);
        let components = self.components;
        if components.contains(AxisComponents::LINE) {
            self.draw_line(cx, p1, p2);
            if components == AxisComponents::LINE {
                return;
            }
        }

        let span = (p1.y - p2.y).abs();
        self.sampler
            .generate(self.min, self.max, span, self.style.tick_pitch);
        let ticks_down = components.contains(AxisComponents::TICKS_DOWN);
        let tick = if ticks_down {
            self.style.tick_length
        } else {
            -self.style.tick_length
        };
        let area = cx.area();
        let mut max_label_width: f64 = 0.0;
        for sample in self.sampler.samples() {
            if !self.in_range(sample.coord) {
                continue;
            }
            let s1 = mapping.map(Point::new(self.anchor, sample.coord));
            if components.contains(AxisComponents::GRID) {
                let grid = cosmetic_line(
                    Point::new(area.x0, s1.y),
                    Point::new(area.x1, s1.y),
                    self.style.grid_width,
                );
                cx.ctx.stroke(&grid, self.style.grid, &self.grid_style());
            } else if components.has_ticks() {
                self.draw_line(cx, s1, s1 + Vec2::new(tick, 0.0));
            }
            if let (Some(label), true) = (&sample.label, components.has_ticks()) {
                let extents = cx.ctx.text_extents(label);
                max_label_width = max_label_width.max(extents.width);
                let x = if ticks_down {
                    s1.x - extents.width - 0.3 * text_height
                } else {
                    s1.x + 0.3 * text_height
                };
                let origin = Point::new(x, s1.y + 0.34 * text_height);
                cx.ctx.draw_text(label, origin, self.style.text, 0.0);
            }
        }

        if let (Some(title), true) = (&self.title, components.contains(AxisComponents::TITLE)) {
            // Rotated a quarter turn counter-clockwise, centred on the axis.
            let extents = cx.ctx.text_extents(title);
            let x = if ticks_down {
                p1.x - max_label_width - text_height
            } else if components.contains(AxisComponents::TICKS_UP) {
                p1.x + max_label_width + 1.6 * text_height
            } else {
                p1.x + 0.3 * text_height
            };
            let y = 0.5 * (p1.y + p2.y + extents.width);
            cx.ctx
                .draw_text(title, Point::new(x, y), self.style.title, -90.0);
        }
    }
}

impl Item for Axis {
    fn draw(&mut self, cx: &mut DrawCx<'_>) {
        let Some(mapping) = cx.mapping().copied() else {
            return;
        };
        match self.orientation {
            Orientation::Horizontal => self.draw_horizontal(cx, &mapping),
            Orientation::Vertical => self.draw_vertical(cx, &mapping),
        }
        if self.selected {
            let rect = self.figure_rect(Some(&mapping));
            cx.ctx.fill(&rect_path(rect), self.style.selection);
        }
    }

    fn figure_rect(&self, mapping: Option<&Mapping>) -> Rect {
        let Some(mapping) = mapping else {
            return Rect::ZERO;
        };
        let (p1, p2) = self.endpoints(mapping);
        match self.orientation {
            Orientation::Horizontal => Rect::new(
                p1.x,
                p1.y - HIT_HALF_THICKNESS,
                p2.x,
                p1.y + HIT_HALF_THICKNESS,
            ),
            Orientation::Vertical => Rect::new(
                p1.x - HIT_HALF_THICKNESS,
                p1.y,
                p1.x + HIT_HALF_THICKNESS,
                p2.y,
            ),
        }
        .abs()
    }

    fn handle_mouse_event(&mut self, event: &MouseEvent, cx: &mut EventCx) {
        if event.kind != MouseEventKind::Press || event.button != MouseButton::Left {
            return;
        }
        if self.figure_rect(cx.mapping()).contains(event.position) {
            self.selected = !self.selected;
            cx.request_redraw();
        } else if self.selected {
            self.selected = false;
            cx.request_redraw();
        }
    }

    fn shows_in_legend(&self) -> bool {
        false
    }
}
