//! Axis and render configuration.
//!
//! [`AxisConfig`] is a fixed constant of the plotting core. [`RenderConfig`]
//! covers the raster surface and may be loaded from YAML; missing fields fall
//! back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampler::Domain;

/// The fixed viewport: sampling domain, displayed ranges, tick spacing.
///
/// [`AxisConfig::STANDARD`] is the only value; the fields cannot be set from
/// outside the crate.
///
/// ```compile_fail
/// use graph_plotter::config::AxisConfig;
///
/// let mut axes = AxisConfig::STANDARD;
/// axes.tick_step = 0.0;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConfig {
    domain: Domain,
    x_range: (f64, f64),
    y_range: (f64, f64),
    tick_step: f64,
}

impl AxisConfig {
    /// Domain `[-10, 10]` at step `0.1`, both axes shown over `[-10, 10]`,
    /// ticks every `1`.
    pub const STANDARD: Self = Self {
        domain: Domain::STANDARD,
        x_range: (-10.0, 10.0),
        y_range: (-10.0, 10.0),
        tick_step: 1.0,
    };

    /// Sampling domain of the free variable.
    #[must_use]
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Displayed x range.
    #[must_use]
    pub const fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    /// Displayed y range.
    #[must_use]
    pub const fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    /// Distance between ticks on both axes.
    #[must_use]
    pub const fn tick_step(&self) -> f64 {
        self.tick_step
    }

    /// Tick positions on the x axis.
    #[must_use]
    pub fn x_ticks(&self) -> Vec<f64> {
        ticks(self.x_range, self.tick_step)
    }

    /// Tick positions on the y axis.
    #[must_use]
    pub fn y_ticks(&self) -> Vec<f64> {
        ticks(self.y_range, self.tick_step)
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

fn ticks((lo, hi): (f64, f64), step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Raster surface settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Margin around the plot area in pixels.
    pub margin: u32,
    /// Curve stroke width in pixels.
    pub line_width: f32,
    /// Draw grid lines at every tick.
    pub show_grid: bool,
    /// Draw legend swatches above the plot area.
    pub show_legend: bool,
    /// Anti-alias curve strokes.
    pub antialias: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            margin: 40,
            line_width: 2.0,
            show_grid: true,
            show_legend: true,
            antialias: true,
        }
    }
}

impl RenderConfig {
    /// Parse from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed YAML, or a dimension error if
    /// the result fails [`RenderConfig::validate`].
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml_ng::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`RenderConfig::from_yaml`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        tracing::info!(path = %path.display(), "loaded render config");
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Check that the surface and plot area are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for zero sizes or a margin that
    /// leaves no plot area, and [`Error::Config`] for a non-positive line width.
    pub fn validate(&self) -> Result<()> {
        let dims = Error::InvalidDimensions { width: self.width, height: self.height };
        if self.width == 0 || self.height == 0 {
            return Err(dims);
        }
        if self.margin.saturating_mul(2) >= self.width.min(self.height) {
            return Err(dims);
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(Error::Config(format!("line_width must be positive, got {}", self.line_width)));
        }
        Ok(())
    }

    /// Width of the plot area in pixels.
    #[must_use]
    pub const fn plot_width(&self) -> u32 {
        self.width.saturating_sub(self.margin.saturating_mul(2))
    }

    /// Height of the plot area in pixels.
    #[must_use]
    pub const fn plot_height(&self) -> u32 {
        self.height.saturating_sub(self.margin.saturating_mul(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_axes() {
        let axes = AxisConfig::STANDARD;
        assert_eq!(*axes.domain(), Domain::STANDARD);
        assert_eq!(axes.x_range(), (-10.0, 10.0));
        assert_eq!(axes.y_range(), (-10.0, 10.0));
        assert_eq!(axes.tick_step(), 1.0);
        assert_eq!(AxisConfig::default(), axes);
        let ticks = axes.x_ticks();
        assert_eq!(ticks.len(), 21);
        assert_eq!(ticks[0], -10.0);
        assert_eq!(ticks[10], 0.0);
        assert_eq!(ticks[20], 10.0);
        assert_eq!(axes.y_ticks(), ticks);
    }

    #[test]
    fn test_ticks_degenerate_step_is_empty() {
        assert!(ticks((-10.0, 10.0), 0.0).is_empty());
        assert!(ticks((-10.0, 10.0), -1.0).is_empty());
        assert!(ticks((-10.0, 10.0), f64::NAN).is_empty());
        assert_eq!(ticks((0.0, 2.0), 0.5), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_default_render_config() {
        let config = RenderConfig::default();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.plot_width(), 720);
        assert_eq!(config.plot_height(), 520);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = RenderConfig::from_yaml("width: 400\nshow_grid: false\n").unwrap();
        assert_eq!(config.width, 400);
        assert_eq!(config.height, 600);
        assert!(!config.show_grid);
        assert!(config.show_legend);
    }

    #[test]
    fn test_from_yaml_rejects_bad_config() {
        assert!(matches!(RenderConfig::from_yaml("width: [1, 2]"), Err(Error::Config(_))));
        assert!(matches!(
            RenderConfig::from_yaml("width: 0"),
            Err(Error::InvalidDimensions { width: 0, .. })
        ));
        assert!(matches!(
            RenderConfig::from_yaml("width: 100\nheight: 100\nmargin: 50"),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(RenderConfig::from_yaml("line_width: 0.0"), Err(Error::Config(_))));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = RenderConfig { width: 320, margin: 10, ..RenderConfig::default() };
        let yaml = config.to_yaml().unwrap();
        assert_eq!(RenderConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.yaml");
        std::fs::write(&path, "height: 300\n").unwrap();
        let config = RenderConfig::load(&path).unwrap();
        assert_eq!(config.height, 300);

        assert!(matches!(RenderConfig::load(dir.path().join("missing.yaml")), Err(Error::Io(_))));
    }
}
