//! Line chart renderer for plotted curves.
//!
//! Lays out a fixed Cartesian viewport: grid at every tick, axes through the
//! origin, a bordered plot area and a legend strip in the top margin. Curves
//! are stroked in registry order, so later curves paint over earlier ones.

use std::path::Path;

use crate::color::Rgba;
use crate::config::{AxisConfig, RenderConfig};
use crate::curve::Curve;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::output::{PngEncoder, SvgEncoder, TextAnchor};
use crate::render::{draw_rect_outline, stroke_polyline, Stroke};
use crate::scale::{LinearScale, Scale};

const GRID_COLOR: Rgba = Rgba::rgb(230, 230, 230);
const AXIS_COLOR: Rgba = Rgba::rgb(96, 96, 96);
const BORDER_COLOR: Rgba = Rgba::rgb(160, 160, 160);
const TEXT_COLOR: Rgba = Rgba::rgb(64, 64, 64);

const TICK_LENGTH: u32 = 4;
const LEGEND_SWATCH: f32 = 30.0;
const LEGEND_ITEM_WIDTH: f32 = 140.0;
const LABEL_FONT_SIZE: f32 = 10.0;
const TITLE_FONT_SIZE: f32 = 12.0;

/// How far beyond the visible y range a sample may sit, in multiples of the
/// range span, before it is pinned. Keeps pixel coordinates finite in `f32`.
const VIEW_OVERSHOOT: f64 = 1000.0;

/// Renders a set of curves over the fixed axes.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    config: RenderConfig,
    axes: AxisConfig,
}

impl ChartRenderer {
    /// Create a renderer for the given surface and viewport.
    #[must_use]
    pub const fn new(config: RenderConfig, axes: AxisConfig) -> Self {
        Self { config, axes }
    }

    /// Surface settings.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Viewport.
    #[must_use]
    pub const fn axes(&self) -> &AxisConfig {
        &self.axes
    }

    /// The plot area inside the margins, in pixels.
    #[must_use]
    pub fn plot_area(&self) -> Rect {
        let margin = self.config.margin as f32;
        Rect::new(
            margin,
            margin,
            self.config.plot_width() as f32,
            self.config.plot_height() as f32,
        )
    }

    fn scales(&self) -> Result<(LinearScale, LinearScale)> {
        let area = self.plot_area();
        let x = LinearScale::new(self.axes.x_range(), (area.x, area.right()))?;
        // Screen y grows downwards.
        let y = LinearScale::new(self.axes.y_range(), (area.bottom(), area.y))?;
        Ok((x, y))
    }

    /// Map a curve's points to pixel coordinates.
    fn project(&self, curve: &Curve, x_scale: &LinearScale, y_scale: &LinearScale) -> Vec<(f32, f32)> {
        let (a, b) = self.axes.y_range();
        let (lo, hi) = (a.min(b), a.max(b));
        let slack = (hi - lo) * VIEW_OVERSHOOT;

        curve
            .points()
            .iter()
            .map(|p| (x_scale.scale(p.x), y_scale.scale(p.y.clamp(lo - slack, hi + slack))))
            .collect()
    }

    fn stroke_for<'a>(&self, curve: &'a Curve) -> Stroke<'a> {
        Stroke {
            color: curve.color(),
            width: self.config.line_width,
            dash: curve.pattern().segments(),
            antialiased: self.config.antialias,
        }
    }

    /// Number of legend entries that fit across the top margin.
    fn legend_capacity(&self) -> usize {
        let usable = self.config.width as f32 - 2.0 * self.config.margin as f32;
        ((usable / LEGEND_ITEM_WIDTH).floor() as usize).max(1)
    }

    /// Render into a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured dimensions are invalid or the axes
    /// describe an empty range.
    pub fn to_framebuffer(&self, curves: &[Curve]) -> Result<Framebuffer> {
        self.config.validate()?;
        let mut fb = Framebuffer::new(self.config.width, self.config.height)?;
        self.render(&mut fb, curves)?;
        Ok(fb)
    }

    fn render(&self, fb: &mut Framebuffer, curves: &[Curve]) -> Result<()> {
        let (x_scale, y_scale) = self.scales()?;
        let area = self.plot_area();
        let (left, top) = (self.config.margin, self.config.margin);
        let (width, height) = (self.config.plot_width(), self.config.plot_height());

        fb.clear(Rgba::WHITE);

        let x_ticks: Vec<u32> =
            self.axes.x_ticks().into_iter().map(|t| x_scale.scale(t).round() as u32).collect();
        let y_ticks: Vec<u32> =
            self.axes.y_ticks().into_iter().map(|t| y_scale.scale(t).round() as u32).collect();

        if self.config.show_grid {
            for &px in &x_ticks {
                fb.fill_rect(px, top, 1, height, GRID_COLOR);
            }
            for &py in &y_ticks {
                fb.fill_rect(left, py, width, 1, GRID_COLOR);
            }
        }

        for &px in &x_ticks {
            fb.fill_rect(px, top + height, 1, TICK_LENGTH, AXIS_COLOR);
        }
        for &py in &y_ticks {
            fb.fill_rect(left.saturating_sub(TICK_LENGTH), py, TICK_LENGTH, 1, AXIS_COLOR);
        }

        if spans_zero(self.axes.x_range()) {
            fb.fill_rect(x_scale.scale(0.0).round() as u32, top, 1, height, AXIS_COLOR);
        }
        if spans_zero(self.axes.y_range()) {
            fb.fill_rect(left, y_scale.scale(0.0).round() as u32, width, 1, AXIS_COLOR);
        }

        for curve in curves {
            let points = self.project(curve, &x_scale, &y_scale);
            stroke_polyline(fb, &points, area, self.stroke_for(curve));
        }

        draw_rect_outline(fb, left as i32, top as i32, width, height, BORDER_COLOR, 1);

        if self.config.show_legend {
            let frame = Rect::new(0.0, 0.0, self.config.width as f32, self.config.height as f32);
            for (x, y, curve) in self.legend_slots(curves) {
                stroke_polyline(fb, &[(x, y), (x + LEGEND_SWATCH, y)], frame, self.stroke_for(curve));
            }
        }

        Ok(())
    }

    /// Legend swatch origins, one per curve that fits.
    fn legend_slots<'a>(&self, curves: &'a [Curve]) -> impl Iterator<Item = (f32, f32, &'a Curve)> {
        let capacity = self.legend_capacity();
        if curves.len() > capacity {
            tracing::debug!(curves = curves.len(), capacity, "legend truncated");
        }

        let margin = self.config.margin as f32;
        curves
            .iter()
            .take(capacity)
            .enumerate()
            .map(move |(i, curve)| (margin + i as f32 * LEGEND_ITEM_WIDTH, margin / 2.0, curve))
    }

    /// Render and encode as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or PNG encoding fails.
    pub fn to_png(&self, curves: &[Curve]) -> Result<Vec<u8>> {
        PngEncoder::to_bytes(&self.to_framebuffer(curves)?)
    }

    /// Render and write a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering, encoding or the file write fails.
    pub fn write_png<P: AsRef<Path>>(&self, curves: &[Curve], path: P) -> Result<()> {
        PngEncoder::write_to_file(&self.to_framebuffer(curves)?, path)
    }

    /// Render as an SVG document with tick labels, axis titles and legend
    /// labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured dimensions are invalid or the axes
    /// describe an empty range.
    pub fn to_svg(&self, curves: &[Curve]) -> Result<String> {
        self.config.validate()?;
        let (x_scale, y_scale) = self.scales()?;
        let area = self.plot_area();
        let (w, h) = (self.config.width as f32, self.config.height as f32);

        let mut svg = SvgEncoder::new(self.config.width, self.config.height);

        if self.config.show_grid {
            for t in self.axes.x_ticks() {
                let px = x_scale.scale(t);
                svg = svg.line(px, area.y, px, area.bottom(), GRID_COLOR, 1.0);
            }
            for t in self.axes.y_ticks() {
                let py = y_scale.scale(t);
                svg = svg.line(area.x, py, area.right(), py, GRID_COLOR, 1.0);
            }
        }

        if spans_zero(self.axes.x_range()) {
            let px = x_scale.scale(0.0);
            svg = svg.line(px, area.y, px, area.bottom(), AXIS_COLOR, 1.0);
        }
        if spans_zero(self.axes.y_range()) {
            let py = y_scale.scale(0.0);
            svg = svg.line(area.x, py, area.right(), py, AXIS_COLOR, 1.0);
        }

        for t in self.axes.x_ticks() {
            let px = x_scale.scale(t);
            svg = svg.text(px, area.bottom() + 14.0, &format_tick(t), LABEL_FONT_SIZE, TEXT_COLOR, TextAnchor::Middle);
        }
        for t in self.axes.y_ticks() {
            let py = y_scale.scale(t);
            svg = svg.text(area.x - 6.0, py + 3.0, &format_tick(t), LABEL_FONT_SIZE, TEXT_COLOR, TextAnchor::End);
        }

        for curve in curves {
            let dash = curve.pattern().segments();
            for run in clip_polyline(&self.project(curve, &x_scale, &y_scale), area) {
                svg = svg.polyline(&run, curve.color(), self.config.line_width, dash);
            }
        }

        svg = svg
            .rect_outline(area.x, area.y, area.width, area.height, BORDER_COLOR, 1.0)
            .text(w / 2.0, h - 4.0, "X-axis", TITLE_FONT_SIZE, TEXT_COLOR, TextAnchor::Middle)
            .vertical_text(TITLE_FONT_SIZE, h / 2.0, "Y-axis", TITLE_FONT_SIZE, TEXT_COLOR);

        if self.config.show_legend {
            for (x, y, curve) in self.legend_slots(curves) {
                svg = svg
                    .polyline(
                        &[(x, y), (x + LEGEND_SWATCH, y)],
                        curve.color(),
                        self.config.line_width,
                        curve.pattern().segments(),
                    )
                    .text(x + LEGEND_SWATCH + 6.0, y + 4.0, curve.label(), TITLE_FONT_SIZE, TEXT_COLOR, TextAnchor::Start);
            }
        }

        Ok(svg.render())
    }
}

impl batuta_common::display::WithDimensions for ChartRenderer {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
    }
}

fn spans_zero((a, b): (f64, f64)) -> bool {
    a.min(b) <= 0.0 && a.max(b) >= 0.0
}

fn format_tick(t: f64) -> String {
    if t.fract() == 0.0 {
        format!("{}", t as i64)
    } else {
        format!("{t}")
    }
}

/// Clip a polyline to `area`, splitting it into the connected runs that
/// remain visible.
fn clip_polyline(points: &[(f32, f32)], area: Rect) -> Vec<Vec<(f32, f32)>> {
    let mut runs: Vec<Vec<(f32, f32)>> = Vec::new();
    let mut current: Vec<(f32, f32)> = Vec::new();

    for pair in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        let clipped = if x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite() {
            area.clip_segment(x0, y0, x1, y1)
        } else {
            None
        };

        match clipped {
            Some((ax, ay, bx, by)) => {
                let joined = current
                    .last()
                    .is_some_and(|&(lx, ly)| (lx - ax).abs() < 1e-3 && (ly - ay).abs() < 1e-3);
                if !joined && !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
                if current.is_empty() {
                    current.push((ax, ay));
                }
                current.push((bx, by));
            }
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }

    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
