// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing-context interface consumed by every item.
//!
//! Backends (SVG writers, raster canvases, test recorders) implement [`DrawContext`];
//! the core only ever builds `kurbo` paths and hands them over with a color.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{BezPath, Circle, Point, Rect, RoundedRect, Shape};
use peniko::Color;
use peniko::color::palette::css;

/// Tolerance used when flattening curves into paths.
const PATH_TOLERANCE: f64 = 0.1;

/// Two widths closer than this are treated as the same width.
const SIMILAR_EPSILON: f64 = 1e-4;

/// Horizontal or vertical layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// Measured size of a run of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtents {
    /// Advance width.
    pub width: f64,
    /// Ink height above the baseline.
    pub height: f64,
}

/// Line settings for [`DrawContext::stroke`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke width in pixels.
    pub width: f64,
    /// Whether edges may be antialiased.
    pub antialias: bool,
}

impl StrokeStyle {
    /// A stroke of the given width with antialiasing enabled.
    pub fn new(width: f64) -> Self {
        Self {
            width,
            antialias: true,
        }
    }

    /// Sets whether edges may be antialiased.
    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// An immediate-mode drawing surface.
///
/// Coordinates are figure pixels with `y` growing downwards. Text origins are
/// the start of the baseline; `angle` rotates clockwise in degrees around the origin.
pub trait DrawContext {
    /// Pushes the current clip and font state.
    fn save(&mut self);
    /// Pops the state pushed by the matching [`DrawContext::save`].
    fn restore(&mut self);
    /// Intersects the clip with `path`.
    fn clip(&mut self, path: &BezPath);
    /// Fills `path`.
    fn fill(&mut self, path: &BezPath, color: Color);
    /// Strokes `path`.
    fn stroke(&mut self, path: &BezPath, color: Color, style: &StrokeStyle);
    /// Sets the font size used by text calls until the next restore.
    fn set_font_size(&mut self, size: f64);
    /// Returns the current font size.
    fn font_size(&self) -> f64;
    /// Measures `text` with the current font.
    fn text_extents(&mut self, text: &str) -> TextExtents;
    /// Draws `text` with its baseline starting at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, color: Color, angle: f64);
}

/// The width a [`cosmetic_line`] of nominal `width` must be stroked with: the
/// nearest whole number of pixels, at least one.
pub fn cosmetic_width(width: f64) -> f64 {
    width.round().max(1.0)
}

/// Builds a one-pixel-crisp line between two points.
///
/// Odd integer widths land on pixel centres and even ones on pixel edges, so
/// axis lines and ticks render sharp without antialiasing. Stroke the result
/// with [`cosmetic_width`].
pub fn cosmetic_line(p1: Point, p2: Point, width: f64) -> BezPath {
    let width = cosmetic_width(width);
    let snap: fn(f64) -> f64 = if [1.0, 3.0, 5.0].iter().any(|w| similar(width, *w)) {
        |c| c.trunc() + 0.5
    } else if [2.0, 4.0, 6.0].iter().any(|w| similar(width, *w)) {
        |c| c.round()
    } else {
        |c| c
    };
    let mut path = BezPath::new();
    path.move_to((snap(p1.x), snap(p1.y)));
    path.line_to((snap(p2.x), snap(p2.y)));
    path
}

/// A straight segment from `p1` to `p2`.
pub fn line_path(p1: Point, p2: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(p1);
    path.line_to(p2);
    path
}

/// A closed rectangle path.
pub fn rect_path(rect: Rect) -> BezPath {
    rect.to_path(PATH_TOLERANCE)
}

/// A closed rectangle path with circular corners of `radius`.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    RoundedRect::from_rect(rect, radius).to_path(PATH_TOLERANCE)
}

/// A closed circle path.
pub fn circle_path(center: Point, radius: f64) -> BezPath {
    Circle::new(center, radius).to_path(PATH_TOLERANCE)
}

/// Fills then strokes `path`, skipping whichever color is `None`.
pub fn paint(
    ctx: &mut dyn DrawContext,
    path: &BezPath,
    stroke: Option<Color>,
    fill: Option<Color>,
    style: &StrokeStyle,
) {
    if let Some(fill) = fill {
        ctx.fill(path, fill);
    }
    if let Some(stroke) = stroke {
        ctx.stroke(path, stroke, style);
    }
}

/// Maps a one-letter color code to a color.
///
/// `'0'` means "do not paint" and yields `None`; unknown letters are black.
pub fn parse_color_char(c: char) -> Option<Color> {
    let color = match c {
        '0' => return None,
        'w' => css::WHITE,
        'r' => css::RED,
        'g' => css::GREEN,
        'b' => css::BLUE,
        'm' => css::MAROON,
        'y' => css::YELLOW,
        'l' => css::LIGHT_SKY_BLUE,
        't' => css::TEAL,
        _ => css::BLACK,
    };
    Some(color)
}

fn similar(a: f64, b: f64) -> bool {
    (a - b).abs() < SIMILAR_EPSILON
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use kurbo::PathEl;

    fn endpoints(path: &BezPath) -> (Point, Point) {
        let els = path.elements();
        let (PathEl::MoveTo(a), PathEl::LineTo(b)) = (els[0], els[1]) else {
            panic!("expected a single segment, got {els:?}");
        };
        (a, b)
    }

    #[test]
    fn odd_widths_snap_to_pixel_centres() {
        let path = cosmetic_line(Point::new(10.7, 3.2), Point::new(40.1, 3.9), 1.0);
        let (a, b) = endpoints(&path);
        assert_eq!(a, Point::new(10.5, 3.5), "start snaps to centre");
        assert_eq!(b, Point::new(40.5, 3.5), "end snaps to centre");
    }

    #[test]
    fn even_widths_snap_to_pixel_edges() {
        let path = cosmetic_line(Point::new(10.7, 3.2), Point::new(40.1, 3.9), 2.2);
        let (a, b) = endpoints(&path);
        assert_eq!(a, Point::new(11.0, 3.0), "start rounds");
        assert_eq!(b, Point::new(40.0, 4.0), "end rounds");
    }

    #[test]
    fn cosmetic_widths_are_whole_pixels() {
        assert_eq!(cosmetic_width(1.4), 1.0);
        assert_eq!(cosmetic_width(2.6), 3.0);
        assert_eq!(cosmetic_width(0.2), 1.0, "never thinner than a pixel");
    }

    #[test]
    fn other_widths_are_untouched() {
        let path = cosmetic_line(Point::new(10.7, 3.2), Point::new(40.1, 3.9), 8.0);
        let (a, b) = endpoints(&path);
        assert_eq!(a, Point::new(10.7, 3.2), "start kept");
        assert_eq!(b, Point::new(40.1, 3.9), "end kept");
    }

    #[test]
    fn color_codes() {
        assert_eq!(parse_color_char('0'), None);
        assert_eq!(parse_color_char('r'), Some(css::RED));
        assert_eq!(parse_color_char('l'), Some(css::LIGHT_SKY_BLUE));
        assert_eq!(parse_color_char('?'), Some(css::BLACK));
    }
}
