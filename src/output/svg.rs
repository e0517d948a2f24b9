//! SVG output encoder.
//!
//! Vector rendition of a chart. Unlike the raster path it carries real text:
//! tick labels, axis titles and legend labels.

use crate::color::Rgba;
use crate::error::Result;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// SVG document builder.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Unfilled rectangle.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Straight line.
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Open polyline with an optional dash array.
    Polyline {
        points: Vec<(f32, f32)>,
        stroke: Rgba,
        stroke_width: f32,
        dash: Vec<f32>,
    },
    /// Text
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        /// Rotation in degrees about `(x, y)`.
        rotate: f32,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with a white background.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, background: Some(Rgba::WHITE), elements: Vec::new() }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add an unfilled rectangle outline.
    #[must_use]
    pub fn rect_outline(
        mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        stroke: Rgba,
        stroke_width: f32,
    ) -> Self {
        self.elements.push(SvgElement::Rect { x, y, width, height, stroke, stroke_width });
        self
    }

    /// Add a line.
    #[must_use]
    pub fn line(mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba, stroke_width: f32) -> Self {
        self.elements.push(SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width });
        self
    }

    /// Add a polyline. An empty `dash` draws a solid stroke.
    #[must_use]
    pub fn polyline(mut self, points: &[(f32, f32)], stroke: Rgba, stroke_width: f32, dash: &[f32]) -> Self {
        self.elements.push(SvgElement::Polyline {
            points: points.to_vec(),
            stroke,
            stroke_width,
            dash: dash.to_vec(),
        });
        self
    }

    /// Add text with anchor.
    #[must_use]
    pub fn text(mut self, x: f32, y: f32, text: &str, font_size: f32, fill: Rgba, anchor: TextAnchor) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
            rotate: 0.0,
        });
        self
    }

    /// Add text centered on `(x, y)` and reading bottom to top.
    #[must_use]
    pub fn vertical_text(mut self, x: f32, y: f32, text: &str, font_size: f32, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor: TextAnchor::Middle,
            rotate: -90.0,
        });
        self
    }

    /// Elements added so far, in paint order.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096 + self.elements.len() * 64);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.to_css());
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.render())?;
        Ok(())
    }
}

fn stroke_attr(stroke: Rgba, stroke_width: f32) -> String {
    format!(r#" stroke="{}" stroke-width="{stroke_width}""#, stroke.to_css())
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { x, y, width, height, stroke, stroke_width } => {
            format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="none"{}/>"#,
                stroke_attr(*stroke, *stroke_width)
            )
        }
        SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width } => {
            format!(
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}"{}/>"#,
                stroke_attr(*stroke, *stroke_width)
            )
        }
        SvgElement::Polyline { points, stroke, stroke_width, dash } => {
            let points_str =
                points.iter().map(|(x, y)| format!("{x:.2},{y:.2}")).collect::<Vec<_>>().join(" ");
            let dash_attr = if dash.is_empty() {
                String::new()
            } else {
                let list = dash.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
                format!(r#" stroke-dasharray="{list}""#)
            };
            format!(
                r#"<polyline points="{points_str}" fill="none"{}{dash_attr} stroke-linejoin="round"/>"#,
                stroke_attr(*stroke, *stroke_width)
            )
        }
        SvgElement::Text { x, y, text, font_size, fill, anchor, rotate } => {
            let transform = if *rotate == 0.0 {
                String::new()
            } else {
                format!(r#" transform="rotate({rotate} {x} {y})""#)
            };
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{}" font-family="sans-serif"{transform}>{}</text>"#,
                fill.to_css(),
                anchor.as_str(),
                escape_xml(text)
            )
        }
    }
}
