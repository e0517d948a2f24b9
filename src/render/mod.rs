//! Rendering backends and rasterization.
//!
//! The plotting session talks to a surface only through [`RenderAdapter`].
//! [`RasterAdapter`] is the built-in surface: it rasterizes the registry with
//! [`ChartRenderer`] into a [`Framebuffer`].
//!
//! # Algorithms
//!
//! - **Wu's Anti-aliased Line**: Smooth line rendering with sub-pixel accuracy
//! - **Bresenham's Line**: Fast non-antialiased line drawing
//! - **Liang-Barsky**: Segment clipping against the plot area
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod chart;
mod primitives;

pub use chart::ChartRenderer;
pub use primitives::{
    draw_line, draw_line_aa, draw_rect_outline, stroke_polyline, Stroke,
};

use crate::config::{AxisConfig, RenderConfig};
use crate::curve::Curve;
use crate::error::Result;
use crate::framebuffer::Framebuffer;

/// A drawing surface that can turn the registry into a chart.
///
/// A chart handle is a scoped resource: the session releases the current one
/// before asking for a replacement, so at most one is alive per session.
pub trait RenderAdapter {
    /// Handle to a drawn chart.
    type Chart;

    /// Draw every curve, in order, over the given axes.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be drawn.
    fn draw(&mut self, curves: &[Curve], axes: &AxisConfig) -> Result<Self::Chart>;

    /// Release a chart previously returned by [`RenderAdapter::draw`].
    fn release(&mut self, chart: Self::Chart);
}

/// Rasterizes charts into framebuffers.
#[derive(Debug, Clone, Default)]
pub struct RasterAdapter {
    config: RenderConfig,
}

impl RasterAdapter {
    /// Create an adapter drawing surfaces of the given configuration.
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Surface settings.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl RenderAdapter for RasterAdapter {
    type Chart = Framebuffer;

    fn draw(&mut self, curves: &[Curve], axes: &AxisConfig) -> Result<Framebuffer> {
        let chart = ChartRenderer::new(self.config.clone(), *axes).to_framebuffer(curves)?;
        if tracing::enabled!(tracing::Level::DEBUG) {
            let (min, max, mean) = chart.luminance_stats();
            tracing::debug!(curves = curves.len(), min, max, mean, "drew chart surface");
        }
        Ok(chart)
    }

    fn release(&mut self, chart: Framebuffer) {
        tracing::debug!(width = chart.width(), height = chart.height(), "released chart surface");
    }
}
