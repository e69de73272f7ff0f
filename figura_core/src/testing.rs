// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles: a drawing context that records calls, a minimal item, a surface
//! factory and a view host.

extern crate std;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Color;
use peniko::color::palette::css;

use crate::draw::{DrawContext, StrokeStyle, TextExtents};
use crate::event::MouseEvent;
use crate::figure::SurfaceFactory;
use crate::item::{DrawCx, EventCx, Item};
use crate::view::ViewHost;

/// One recorded drawing call; paths are reduced to their bounding boxes.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Op {
    Save,
    Restore,
    Clip(Rect),
    Fill(Rect, Color),
    Stroke(Rect, Color),
    FontSize(f64),
    Text(String, Point, f64),
}

#[derive(Debug)]
pub(crate) struct RecordingContext {
    pub(crate) ops: Vec<Op>,
    pub(crate) stroke_widths: Vec<f64>,
    font_size: f64,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            stroke_widths: Vec::new(),
            font_size: 10.0,
        }
    }
}

impl RecordingContext {
    pub(crate) fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(text, ..) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn text_origin(&self, text: &str) -> Option<Point> {
        self.ops.iter().find_map(|op| match op {
            Op::Text(t, origin, _) if t == text => Some(*origin),
            _ => None,
        })
    }

    pub(crate) fn fills(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Fill(rect, _) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn strokes(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Stroke(..)))
            .count()
    }
}

impl DrawContext for RecordingContext {
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn clip(&mut self, path: &BezPath) {
        self.ops.push(Op::Clip(path.bounding_box()));
    }

    fn fill(&mut self, path: &BezPath, color: Color) {
        self.ops.push(Op::Fill(path.bounding_box(), color));
    }

    fn stroke(&mut self, path: &BezPath, color: Color, style: &StrokeStyle) {
        self.ops.push(Op::Stroke(path.bounding_box(), color));
        self.stroke_widths.push(style.width);
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
        self.ops.push(Op::FontSize(size));
    }

    fn font_size(&self) -> f64 {
        self.font_size
    }

    // Same heuristic as the SVG backend: 0.6em per glyph, 0.8em ascent.
    fn text_extents(&mut self, text: &str) -> TextExtents {
        TextExtents {
            width: 0.6 * self.font_size * text.chars().count() as f64,
            height: 0.8 * self.font_size,
        }
    }

    fn draw_text(&mut self, text: &str, origin: Point, _color: Color, angle: f64) {
        self.ops.push(Op::Text(text.into(), origin, angle));
    }
}

/// An item that draws its label, counts events and reports fixed data bounds.
#[derive(Debug, Default)]
pub(crate) struct Probe {
    pub(crate) label: &'static str,
    pub(crate) data: Option<Rect>,
    pub(crate) events: usize,
    pub(crate) redraw: bool,
    pub(crate) legend: bool,
}

impl Probe {
    pub(crate) fn labeled(label: &'static str) -> Self {
        Self {
            label,
            legend: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_data(data: Rect) -> Self {
        Self {
            data: Some(data),
            legend: true,
            ..Self::default()
        }
    }

    pub(crate) fn requesting_redraw(mut self) -> Self {
        self.redraw = true;
        self
    }

    pub(crate) fn hidden_from_legend(mut self) -> Self {
        self.legend = false;
        self
    }
}

impl Item for Probe {
    fn draw(&mut self, cx: &mut DrawCx<'_>) {
        cx.ctx.draw_text(self.label, Point::ZERO, css::BLACK, 0.0);
    }

    fn draw_thumb(&self, ctx: &mut dyn DrawContext, pos: Point) {
        ctx.fill(&Rect::from_center_size(pos, (4.0, 4.0)).to_path(0.1), css::RED);
    }

    fn data_rect(&self) -> Option<Rect> {
        self.data
    }

    fn handle_mouse_event(&mut self, _event: &MouseEvent, cx: &mut EventCx) {
        self.events += 1;
        if self.redraw {
            cx.request_redraw();
        }
    }

    fn shows_in_legend(&self) -> bool {
        self.legend
    }
}

/// Hands out recording contexts and remembers the sizes asked for.
#[derive(Debug, Default)]
pub(crate) struct RecordingFactory {
    pub(crate) sizes: Vec<(u32, u32)>,
}

impl SurfaceFactory for RecordingFactory {
    type Surface = RecordingContext;

    fn create_surface(&mut self, width: u32, height: u32) -> RecordingContext {
        self.sizes.push((width, height));
        RecordingContext::default()
    }
}

/// A view host counting repaint requests; clones share the count.
#[derive(Clone, Debug, Default)]
pub(crate) struct CountingHost(Rc<Cell<usize>>);

impl CountingHost {
    pub(crate) fn count(&self) -> usize {
        self.0.get()
    }
}

impl ViewHost for CountingHost {
    fn queue_redraw(&self) {
        self.0.set(self.0.get() + 1);
    }
}
