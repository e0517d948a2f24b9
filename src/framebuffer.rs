//! Raster surface that charts are drawn into.
//!
//! Rows are padded to a 64-byte stride so every row starts on a SIMD
//! boundary. Luminance reductions go through trueno.

use crate::color::Rgba;
use crate::error::{Error, Result};
use trueno::Vector;

/// Row alignment in bytes.
const ROW_ALIGNMENT: usize = 64;

/// An RGBA8 pixel buffer with aligned rows.
///
/// Writes outside the surface are ignored, so strokes can be rasterized
/// without bounds checks at every call site.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    /// Row-major `[R, G, B, A]` bytes; each row is `stride` bytes long.
    pixels: Vec<u8>,
    stride: usize,
}

impl Framebuffer {
    /// Allocate a surface filled with transparent black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either side is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use graph_plotter::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!((fb.width(), fb.height()), (800, 600));
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let row_bytes = (width as usize) * 4;
        let stride = row_bytes.div_ceil(ROW_ALIGNMENT) * ROW_ALIGNMENT;

        Ok(Self { width, height, pixels: vec![0; stride * height as usize], stride })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row, padding included.
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Number of visible pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// The raw buffer, padding included.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The visible bytes of row `y`.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * self.stride;
        Some(&self.pixels[start..start + self.row_bytes()])
    }

    const fn row_bytes(&self) -> usize {
        (self.width as usize) * 4
    }

    fn visible_rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        let row_bytes = self.row_bytes();
        self.pixels.chunks_exact_mut(self.stride).map(move |row| &mut row[..row_bytes])
    }

    /// Paint every pixel `color`.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        for row in self.visible_rows_mut() {
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    /// Fill the `w` x `h` block at `(x, y)`, cropped to the surface.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let (x0, x1) = (x.min(self.width), x.saturating_add(w).min(self.width));
        let (y0, y1) = (y.min(self.height), y.saturating_add(h).min(self.height));
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let rgba = color.to_array();
        for row_y in y0..y1 {
            let start = self.pixel_index(x0, row_y);
            let end = self.pixel_index(x1, row_y);
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.pixel_index(x, y);
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(Rgba::from_array(rgba))
    }

    /// Overwrite `(x, y)` with `color`.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Composite `color` over `(x, y)` with the "over" operator.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        let src_a = f32::from(color.a) / 255.0;
        let dst_a = f32::from(self.pixels[idx + 3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }

        let dst = &mut self.pixels[idx..idx + 4];
        for (channel, src) in dst.iter_mut().zip([color.r, color.g, color.b]) {
            let src = f32::from(src) / 255.0;
            let old = f32::from(*channel) / 255.0;
            *channel = ((src * src_a + old * dst_a * (1.0 - src_a)) / out_a * 255.0) as u8;
        }
        dst[3] = (out_a * 255.0) as u8;
    }

    /// Count pixels exactly equal to `color`.
    #[must_use]
    pub fn count_pixels(&self, color: Rgba) -> usize {
        let rgba = color.to_array();
        (0..self.height)
            .filter_map(|y| self.row(y))
            .flat_map(|row| row.chunks_exact(4))
            .filter(|px| *px == rgba)
            .count()
    }

    /// BT.709 luminance `(min, max, mean)` over the visible pixels.
    #[must_use]
    pub fn luminance_stats(&self) -> (f32, f32, f32) {
        let luminances: Vec<f32> = (0..self.height)
            .filter_map(|y| self.row(y))
            .flat_map(|row| row.chunks_exact(4))
            .map(|px| {
                0.2126 * f32::from(px[0]) + 0.7152 * f32::from(px[1]) + 0.0722 * f32::from(px[2])
            })
            .collect();

        let vec = Vector::from_vec(luminances);
        (vec.min().unwrap_or(0.0), vec.max().unwrap_or(255.0), vec.mean().unwrap_or(127.5))
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride + (x as usize) * 4
    }

    /// Visible pixels packed without row padding, as PNG expects.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        let row_bytes = self.row_bytes();
        if self.stride == row_bytes {
            return self.pixels.clone();
        }

        let mut compact = Vec::with_capacity(row_bytes * self.height as usize);
        for row in self.pixels.chunks_exact(self.stride) {
            compact.extend_from_slice(&row[..row_bytes]);
        }
        compact
    }
}
