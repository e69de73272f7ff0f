// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG backend for `figura_core`.
//!
//! [`SvgContext`] implements [`DrawContext`] by appending SVG elements to a string.
//! Clips become nested `<g clip-path>` groups closed again on `restore`. Text is
//! measured with a fixed heuristic (0.6em per glyph, 0.8em high), so layouts are
//! stable across machines but only approximate real fonts.
//!
//! [`write_figure_svg`] renders a figure offscreen and writes it to a file.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use figura_core::{DrawContext, Figure, StrokeStyle, SurfaceFactory, TextExtents};
use kurbo::{BezPath, Point};
use peniko::Color;
use thiserror::Error;
use tracing::debug;

/// Glyph advance as a fraction of the font size.
const GLYPH_WIDTH_EM: f64 = 0.6;
/// Text height as a fraction of the font size.
const TEXT_HEIGHT_EM: f64 = 0.8;
const DEFAULT_FONT_SIZE: f64 = 10.0;

/// Why a figure could not be exported.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing the file failed.
    #[error("failed to write SVG: {0}")]
    Io(#[from] io::Error),
}

#[derive(Clone, Copy, Debug)]
struct State {
    font_size: f64,
    open_groups: usize,
}

/// A drawing context that produces an SVG document.
#[derive(Debug)]
pub struct SvgContext {
    width: u32,
    height: u32,
    defs: String,
    body: String,
    state: State,
    saved: Vec<State>,
    next_clip: usize,
}

impl SvgContext {
    /// An empty `width × height` document.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            defs: String::new(),
            body: String::new(),
            state: State {
                font_size: DEFAULT_FONT_SIZE,
                open_groups: 0,
            },
            saved: Vec::new(),
            next_clip: 0,
        }
    }

    /// Document width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Document height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The document so far, with any groups still open closed.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = self.width,
            h = self.height,
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            out.push_str(&self.defs);
            out.push_str("</defs>\n");
        }
        out.push_str(&self.body);
        let open = self.state.open_groups + self.saved.iter().map(|s| s.open_groups).sum::<usize>();
        for _ in 0..open {
            out.push_str("</g>\n");
        }
        out.push_str("</svg>\n");
        out
    }

    fn close_groups(&mut self) {
        for _ in 0..self.state.open_groups {
            self.body.push_str("</g>\n");
        }
        self.state.open_groups = 0;
    }
}

impl DrawContext for SvgContext {
    fn save(&mut self) {
        self.saved.push(self.state);
        self.state.open_groups = 0;
    }

    fn restore(&mut self) {
        self.close_groups();
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn clip(&mut self, path: &BezPath) {
        let id = self.next_clip;
        self.next_clip += 1;
        let _ = writeln!(
            self.defs,
            r#"<clipPath id="clip{id}"><path d="{}"/></clipPath>"#,
            path.to_svg()
        );
        let _ = writeln!(self.body, r#"<g clip-path="url(#clip{id})">"#);
        self.state.open_groups += 1;
    }

    fn fill(&mut self, path: &BezPath, color: Color) {
        let _ = write!(self.body, r#"<path d="{}""#, path.to_svg());
        write_paint_attr(&mut self.body, "fill", color);
        self.body.push_str("/>\n");
    }

    fn stroke(&mut self, path: &BezPath, color: Color, style: &StrokeStyle) {
        let _ = write!(self.body, r#"<path d="{}" fill="none""#, path.to_svg());
        write_paint_attr(&mut self.body, "stroke", color);
        let _ = write!(self.body, r#" stroke-width="{}""#, style.width);
        if !style.antialias {
            self.body.push_str(r#" shape-rendering="crispEdges""#);
        }
        self.body.push_str("/>\n");
    }

    fn set_font_size(&mut self, size: f64) {
        self.state.font_size = size;
    }

    fn font_size(&self) -> f64 {
        self.state.font_size
    }

    fn text_extents(&mut self, text: &str) -> TextExtents {
        #[allow(
            clippy::cast_precision_loss,
            reason = "label lengths are far below 2^52 glyphs"
        )]
        let glyphs = text.chars().count() as f64;
        TextExtents {
            width: GLYPH_WIDTH_EM * self.state.font_size * glyphs,
            height: TEXT_HEIGHT_EM * self.state.font_size,
        }
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Color, angle: f64) {
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-family="sans-serif" font-size="{}""#,
            origin.x, origin.y, self.state.font_size
        );
        if angle != 0.0 {
            let _ = write!(
                self.body,
                r#" transform="rotate({angle} {} {})""#,
                origin.x, origin.y
            );
        }
        write_paint_attr(&mut self.body, "fill", color);
        self.body.push('>');
        self.body.push_str(&escape_xml(text));
        self.body.push_str("</text>\n");
    }
}

/// Creates [`SvgContext`] surfaces for [`Figure::render_offscreen`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgSurfaceFactory;

impl SurfaceFactory for SvgSurfaceFactory {
    type Surface = SvgContext;

    fn create_surface(&mut self, width: u32, height: u32) -> SvgContext {
        SvgContext::new(width, height)
    }
}

/// Renders `figure` into a `width × height` SVG document.
///
/// Returns `None` for an empty size.
pub fn render_figure_svg(figure: &Figure, width: u32, height: u32) -> Option<String> {
    figure
        .render_offscreen(&mut SvgSurfaceFactory, width, height)
        .map(|surface| surface.to_svg_string())
}

/// Renders `figure` offscreen and writes the SVG to `path`.
///
/// An empty size writes nothing and returns `Ok(false)`.
pub fn write_figure_svg(
    figure: &Figure,
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> Result<bool, ExportError> {
    let path = path.as_ref();
    let Some(svg) = render_figure_svg(figure, width, height) else {
        return Ok(false);
    };
    fs::write(path, svg)?;
    debug!(path = %path.display(), width, height, "figure written");
    Ok(true)
}

fn svg_paint(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (paint, opacity)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let (value, opacity) = svg_paint(color);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
