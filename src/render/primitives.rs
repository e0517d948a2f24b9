//! Rasterization of lines, outlines and dashed, clipped polylines.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a one-pixel line with Bresenham's algorithm. Both endpoints are
/// inclusive; pixels off the surface are skipped.
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
    let (sx, sy) = ((x1 - x0).signum(), (y1 - y0).signum());
    let (mut x, mut y) = (x0, y0);
    let mut err = dx + dy;

    loop {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }
        if x == x1 && y == y1 {
            return;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw an anti-aliased line with Wu's algorithm.
///
/// Each step along the major axis covers the two pixels straddling the
/// ideal line, weighted by distance. Endpoints are weighted by how much of
/// their pixel the segment covers.
pub fn draw_line_aa(fb: &mut Framebuffer, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    let (mut a0, mut b0, mut a1, mut b1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };
    if a0 > a1 {
        std::mem::swap(&mut a0, &mut a1);
        std::mem::swap(&mut b0, &mut b1);
    }

    let run = a1 - a0;
    let gradient = if run.abs() < f32::EPSILON { 1.0 } else { (b1 - b0) / run };

    // Covers the pixel pair at major `a`, minor `b`, with coverage `weight`.
    let mut pair = |a: i32, b: f32, weight: f32| {
        let base = b.floor() as i32;
        let (lo, hi) = (rfpart(b) * weight, fpart(b) * weight);
        if steep {
            plot(fb, base, a, color, lo);
            plot(fb, base + 1, a, color, hi);
        } else {
            plot(fb, a, base, color, lo);
            plot(fb, a, base + 1, color, hi);
        }
    };

    let start = a0.round();
    let start_b = b0 + gradient * (start - a0);
    pair(start as i32, start_b, rfpart(a0 + 0.5));

    let end = a1.round();
    let end_b = b1 + gradient * (end - a1);
    pair(end as i32, end_b, fpart(a1 + 0.5));

    let mut b = start_b + gradient;
    for a in (start as i32 + 1)..(end as i32) {
        pair(a, b, 1.0);
        b += gradient;
    }
}

/// Blend `color` at `(x, y)` scaled by `intensity`.
#[inline]
fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Rgba, intensity: f32) {
    if intensity <= 0.0 || x < 0 || y < 0 {
        return;
    }
    let alpha = (f32::from(color.a) * intensity.min(1.0)) as u8;
    fb.blend_pixel(x as u32, y as u32, color.with_alpha(alpha));
}

#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw the outline of a rectangle, `thickness` pixels wide, inside its
/// bounds.
pub fn draw_rect_outline(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgba,
    thickness: u32,
) {
    let t = thickness.max(1).min(width).min(height);
    let (x, y) = (x.max(0) as u32, y.max(0) as u32);
    let inner = height.saturating_sub(2 * t);

    fb.fill_rect(x, y, width, t, color);
    fb.fill_rect(x, y + height - t, width, t, color);
    fb.fill_rect(x, y + t, t, inner, color);
    fb.fill_rect(x + width - t, y + t, t, inner, color);
}

// ============================================================================
// Polyline Stroking
// ============================================================================

/// How a polyline is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    /// Stroke color.
    pub color: Rgba,
    /// Stroke width in pixels.
    pub width: f32,
    /// Alternating on/off run lengths in pixels; empty for a solid stroke.
    pub dash: &'a [f32],
    /// Use Wu's anti-aliased lines instead of Bresenham.
    pub antialiased: bool,
}

/// Position within a dash pattern, carried across polyline vertices.
struct DashCursor<'a> {
    pattern: &'a [f32],
    index: usize,
    remaining: f32,
}

impl<'a> DashCursor<'a> {
    fn new(pattern: &'a [f32]) -> Self {
        // Zero or negative runs would never advance; stroke those solid.
        let pattern = if pattern.iter().all(|&run| run > 0.0) { pattern } else { &[] };
        let remaining = pattern.first().copied().unwrap_or(f32::INFINITY);
        Self { pattern, index: 0, remaining }
    }

    fn is_on(&self) -> bool {
        self.index % 2 == 0
    }

    /// Consume `len` pixels of the current run, moving to the next run when
    /// it is exhausted.
    fn consume(&mut self, len: f32) {
        self.remaining -= len;
        if self.remaining <= 0.0 && !self.pattern.is_empty() {
            self.index = (self.index + 1) % self.pattern.len();
            self.remaining = self.pattern[self.index];
        }
    }
}

/// Stroke a polyline given in pixel coordinates, clipped to `clip`.
///
/// The dash phase runs continuously over the whole polyline, so a pattern
/// does not restart at every vertex. Segments with a non-finite endpoint
/// are skipped.
pub fn stroke_polyline(fb: &mut Framebuffer, points: &[(f32, f32)], clip: Rect, stroke: Stroke<'_>) {
    let mut cursor = DashCursor::new(stroke.dash);

    for pair in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            continue;
        }

        let dx = x1 - x0;
        let dy = y1 - y0;
        let len = (dx * dx + dy * dy).sqrt();
        if len <= f32::EPSILON {
            continue;
        }

        let mut t = 0.0;
        while t < len {
            let run = cursor.remaining.min(len - t);
            if cursor.is_on() {
                let (a, b) = (t / len, (t + run) / len);
                if let Some(piece) =
                    clip.clip_segment(x0 + dx * a, y0 + dy * a, x0 + dx * b, y0 + dy * b)
                {
                    draw_thick_segment(fb, piece, (dx / len, dy / len), stroke);
                }
            }
            t += run;
            cursor.consume(run);
        }
    }
}

/// Draw one segment as parallel one-pixel lines spread across `stroke.width`.
fn draw_thick_segment(
    fb: &mut Framebuffer,
    (x0, y0, x1, y1): (f32, f32, f32, f32),
    (ux, uy): (f32, f32),
    stroke: Stroke<'_>,
) {
    let lanes = stroke.width.round().max(1.0) as u32;
    let (nx, ny) = (-uy, ux);

    for lane in 0..lanes {
        let offset = lane as f32 - (lanes - 1) as f32 / 2.0;
        let (ox, oy) = (nx * offset, ny * offset);
        if stroke.antialiased {
            draw_line_aa(fb, x0 + ox, y0 + oy, x1 + ox, y1 + oy, stroke.color);
        } else {
            draw_line(
                fb,
                (x0 + ox).round() as i32,
                (y0 + oy).round() as i32,
                (x1 + ox).round() as i32,
                (y1 + oy).round() as i32,
                stroke.color,
            );
        }
    }
}
