// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! XY data series.

use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use crate::draw::{
    DrawContext, StrokeStyle, circle_path, line_path, paint, parse_color_char, rect_path,
};
use crate::item::{DrawCx, Item};

/// Half the width of a legend thumbnail drawn by a series.
const THUMB_HALF_WIDTH: f64 = 15.0;
/// Fraction of the distance between neighbouring bars that a bar covers.
const BAR_FILL_RATIO: f64 = 0.8;
/// Bar width used when a series has a single point.
const LONE_BAR_WIDTH: f64 = 10.0;

/// How a series renders its points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SeriesMode {
    /// A polyline through the points (`-`).
    #[default]
    Line,
    /// A circle per point (`o`).
    Circles,
    /// A polyline with a circle per point (`O`).
    LineCircles,
    /// The region between the polyline and `y = 0` (`a`).
    Area,
    /// A bar from `y = 0` to each point (`b`).
    Bars,
}

impl SeriesMode {
    /// The mode for a style-string character, if it names one.
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '-' => Self::Line,
            'o' => Self::Circles,
            'O' => Self::LineCircles,
            'a' => Self::Area,
            'b' => Self::Bars,
            _ => return None,
        })
    }

    fn has_baseline(self) -> bool {
        matches!(self, Self::Area | Self::Bars)
    }
}

/// How a series is painted.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesStyle {
    /// Line and outline color; `None` skips stroking.
    pub stroke: Option<Color>,
    /// Fill for circles, areas and bars; `None` leaves them hollow.
    pub fill: Option<Color>,
    /// Rendering mode.
    pub mode: SeriesMode,
    /// Line width in pixels.
    pub line_width: f64,
    /// Circle radius in pixels.
    pub symbol_radius: f64,
    /// Whether lines may be antialiased.
    pub antialias: bool,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            stroke: Some(css::BLUE),
            fill: None,
            mode: SeriesMode::Line,
            line_width: 1.5,
            symbol_radius: 2.5,
            antialias: true,
        }
    }
}

impl SeriesStyle {
    /// Parses a style string such as `"kor"`.
    ///
    /// The first character is the stroke color, the second the mode and the third
    /// the fill color (see [`parse_color_char`]). Missing characters keep the
    /// defaults, except that areas and bars without an explicit fill use a
    /// translucent version of the stroke color.
    pub fn parse(style: &str) -> Self {
        let mut parsed = Self::default();
        let mut chars = style.chars();
        if let Some(c) = chars.next() {
            parsed.stroke = parse_color_char(c);
        }
        if let Some(c) = chars.next() {
            parsed.mode = SeriesMode::from_char(c).unwrap_or_default();
        }
        match chars.next() {
            Some(c) => parsed.fill = parse_color_char(c),
            None if parsed.mode.has_baseline() => {
                parsed.fill = parsed.stroke.map(|c| c.multiply_alpha(0.35));
            }
            None => {}
        }
        parsed
    }

    fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::new(self.line_width).with_antialias(self.antialias)
    }
}

/// A series of `(x, y)` points.
///
/// Non-finite points are skipped: they break lines and areas and are left out of
/// the data bounds.
#[derive(Clone, Debug, Default)]
pub struct XySeries {
    points: Vec<Point>,
    style: SeriesStyle,
}

impl XySeries {
    /// An empty series painted with `style` (see [`SeriesStyle::parse`]).
    pub fn new(style: &str) -> Self {
        Self {
            points: Vec::new(),
            style: SeriesStyle::parse(style),
        }
    }

    /// Sets the points from parallel coordinate slices.
    pub fn with_data(mut self, x: &[f64], y: &[f64]) -> Self {
        self.set_data(x, y);
        self
    }

    /// Sets the points.
    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = points;
        self
    }

    /// Replaces the points with `(x[i], y[i])`, truncated to the shorter slice.
    pub fn set_data(&mut self, x: &[f64], y: &[f64]) {
        self.points.clear();
        self.points
            .extend(x.iter().zip(y).map(|(&x, &y)| Point::new(x, y)));
    }

    /// Replaces the points.
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    /// The points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The style.
    pub fn style(&self) -> &SeriesStyle {
        &self.style
    }

    /// Mutable access to the style.
    pub fn style_mut(&mut self) -> &mut SeriesStyle {
        &mut self.style
    }

    fn finite_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied().filter(|p| p.is_finite())
    }

    fn polyline(&self, cx: &DrawCx<'_>) -> BezPath {
        let mut path = BezPath::new();
        let mut pen_down = false;
        for p in &self.points {
            if !p.is_finite() {
                pen_down = false;
                continue;
            }
            let p = cx.map(*p);
            if pen_down {
                path.line_to(p);
            } else {
                path.move_to(p);
                pen_down = true;
            }
        }
        path
    }

    fn draw_line(&self, cx: &mut DrawCx<'_>) {
        if let Some(stroke) = self.style.stroke {
            let path = self.polyline(cx);
            cx.ctx.stroke(&path, stroke, &self.style.stroke_style());
        }
    }

    fn draw_circles(&self, cx: &mut DrawCx<'_>) {
        let style = self.style.stroke_style();
        for p in self.finite_points() {
            let center = cx.map(p);
            paint(
                cx.ctx,
                &circle_path(center, self.style.symbol_radius),
                self.style.stroke,
                self.style.fill,
                &style,
            );
        }
    }

    fn draw_area(&self, cx: &mut DrawCx<'_>) {
        let points: Vec<Point> = self.finite_points().map(|p| cx.map(p)).collect();
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return;
        };
        let baseline = cx.map(Point::ZERO).y;
        if let Some(fill) = self.style.fill {
            let mut region = BezPath::new();
            region.move_to((first.x, baseline));
            for p in &points {
                region.line_to(*p);
            }
            region.line_to((last.x, baseline));
            region.close_path();
            cx.ctx.fill(&region, fill);
        }
        self.draw_line(cx);
    }

    fn draw_bars(&self, cx: &mut DrawCx<'_>) {
        let points: Vec<Point> = self.finite_points().map(|p| cx.map(p)).collect();
        let width = points
            .windows(2)
            .map(|pair| (pair[1].x - pair[0].x).abs())
            .filter(|dx| *dx > 0.0)
            .fold(None, |acc: Option<f64>, dx| Some(acc.map_or(dx, |a| a.min(dx))))
            .map_or(LONE_BAR_WIDTH, |dx| dx * BAR_FILL_RATIO);
        let baseline = cx.map(Point::ZERO).y;
        let style = self.style.stroke_style();
        for p in points {
            let bar = Rect::new(p.x - 0.5 * width, baseline, p.x + 0.5 * width, p.y).abs();
            paint(cx.ctx, &rect_path(bar), self.style.stroke, self.style.fill, &style);
        }
    }
}

impl Item for XySeries {
    fn draw(&mut self, cx: &mut DrawCx<'_>) {
        if cx.mapping().is_none() {
            return;
        }
        match self.style.mode {
            SeriesMode::Line => self.draw_line(cx),
            SeriesMode::Circles => self.draw_circles(cx),
            SeriesMode::LineCircles => {
                self.draw_line(cx);
                self.draw_circles(cx);
            }
            SeriesMode::Area => self.draw_area(cx),
            SeriesMode::Bars => self.draw_bars(cx),
        }
    }

    fn draw_thumb(&self, ctx: &mut dyn DrawContext, pos: Point) {
        let style = self.style.stroke_style();
        let left = Point::new(pos.x - THUMB_HALF_WIDTH, pos.y);
        let right = Point::new(pos.x + THUMB_HALF_WIDTH, pos.y);
        match self.style.mode {
            SeriesMode::Line => {
                if let Some(stroke) = self.style.stroke {
                    ctx.stroke(&line_path(left, right), stroke, &style);
                }
            }
            SeriesMode::Circles => paint(
                ctx,
                &circle_path(pos, self.style.symbol_radius),
                self.style.stroke,
                self.style.fill,
                &style,
            ),
            SeriesMode::LineCircles => {
                if let Some(stroke) = self.style.stroke {
                    ctx.stroke(&line_path(left, right), stroke, &style);
                }
                paint(
                    ctx,
                    &circle_path(pos, self.style.symbol_radius),
                    self.style.stroke,
                    self.style.fill,
                    &style,
                );
            }
            SeriesMode::Area | SeriesMode::Bars => {
                let swatch = Rect::new(left.x, pos.y - 5.0, right.x, pos.y + 5.0);
                paint(ctx, &rect_path(swatch), self.style.stroke, self.style.fill, &style);
            }
        }
    }

    /// The bounding box of the finite points; areas and bars also cover `y = 0`.
    fn data_rect(&self) -> Option<Rect> {
        let mut points = self.finite_points();
        let first = points.next()?;
        let mut bounds = points.fold(Rect::from_points(first, first), |r, p| {
            r.union_pt(p)
        });
        if self.style.mode.has_baseline() {
            bounds = bounds.union_pt(Point::new(bounds.x0, 0.0));
        }
        Some(bounds)
    }
}
