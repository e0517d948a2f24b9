//! Plot sessions: the request-to-chart pipeline.
//!
//! A [`PlotSession`] owns the dataset registry, a render adapter and the
//! chart currently on screen. Every mutation takes `&mut self`, so plotting
//! and clearing can never interleave.

use serde::{Deserialize, Serialize};

use crate::color::parse_color;
use crate::config::{AxisConfig, RenderConfig};
use crate::curve::{Curve, DashPattern};
use crate::error::{Error, Result};
use crate::expr::compile;
use crate::persist::SavedGraph;
use crate::registry::DatasetRegistry;
use crate::render::{ChartRenderer, RenderAdapter};
use crate::sampler::sample;

/// A user's request to plot one expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotRequest {
    /// Expression text, e.g. `sin(x) + x^2`.
    pub equation: String,
    /// Color token, a name or `#rrggbb`.
    pub color: String,
    /// Stroke pattern.
    #[serde(default)]
    pub pattern: DashPattern,
}

impl PlotRequest {
    /// Create a request.
    #[must_use]
    pub fn new(equation: impl Into<String>, color: impl Into<String>, pattern: DashPattern) -> Self {
        Self { equation: equation.into(), color: color.into(), pattern }
    }
}

/// Owns the registry and the chart drawn from it.
pub struct PlotSession<A: RenderAdapter> {
    registry: DatasetRegistry,
    adapter: A,
    chart: Option<A::Chart>,
    renderer: ChartRenderer,
}

impl<A: RenderAdapter> PlotSession<A> {
    /// Create an empty session with the default render configuration for
    /// exports.
    pub fn new(adapter: A) -> Self {
        Self {
            registry: DatasetRegistry::new(),
            adapter,
            chart: None,
            renderer: ChartRenderer::new(RenderConfig::default(), AxisConfig::STANDARD),
        }
    }

    /// Create an empty session whose exports use `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`RenderConfig::validate`].
    pub fn with_config(adapter: A, config: RenderConfig) -> Result<Self> {
        config.validate()?;
        let mut session = Self::new(adapter);
        session.renderer = ChartRenderer::new(config, AxisConfig::STANDARD);
        Ok(session)
    }

    /// Compile, sample and append a curve, then redraw the chart.
    ///
    /// On a parse, color or sampling error nothing changes. If only the
    /// redraw fails, the curve stays in the registry, the session holds no
    /// chart, and the next successful draw shows it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyExpression`], [`Error::SyntaxError`] or
    /// [`Error::UnsupportedToken`] for bad input text, [`Error::InvalidColor`]
    /// for a bad color, [`Error::NoValidPoints`] if nothing is plottable, or
    /// the adapter's draw error.
    pub fn plot(&mut self, request: &PlotRequest) -> Result<&Curve> {
        let curve = match self.build_curve(request) {
            Ok(curve) => curve,
            Err(e) => {
                tracing::warn!(equation = %request.equation, error = %e, "rejected plot request");
                return Err(e);
            }
        };

        tracing::info!(
            label = curve.label(),
            points = curve.len(),
            pattern = %curve.pattern(),
            "plotted curve"
        );
        self.registry.add_curve(curve);
        self.redraw()?;

        self.registry
            .last()
            .ok_or_else(|| Error::Rendering("registry empty after append".to_string()))
    }

    fn build_curve(&self, request: &PlotRequest) -> Result<Curve> {
        let expr = compile(&request.equation)?;
        let color = parse_color(&request.color)?;
        let points = sample(&expr, self.renderer.axes().domain())?;
        Ok(Curve::new(expr.source(), color, request.pattern, points))
    }

    /// Release the current chart and draw a new one from the registry.
    fn redraw(&mut self) -> Result<()> {
        self.release_chart();
        match self.adapter.draw(self.registry.curves(), self.renderer.axes()) {
            Ok(chart) => {
                self.chart = Some(chart);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, curves = self.registry.len(), "chart draw failed");
                Err(e)
            }
        }
    }

    fn release_chart(&mut self) {
        if let Some(chart) = self.chart.take() {
            self.adapter.release(chart);
        }
    }

    /// Remove every curve and release the chart. Clearing twice is a no-op.
    pub fn clear(&mut self) {
        let removed = self.registry.len();
        self.registry.clear();
        self.release_chart();
        tracing::info!(removed, "cleared chart");
    }

    /// The dataset registry.
    #[must_use]
    pub const fn registry(&self) -> &DatasetRegistry {
        &self.registry
    }

    /// Curves in display order.
    #[must_use]
    pub fn curves(&self) -> &[Curve] {
        self.registry.curves()
    }

    /// The chart currently drawn, if any.
    #[must_use]
    pub const fn chart(&self) -> Option<&A::Chart> {
        self.chart.as_ref()
    }

    /// The render adapter.
    #[must_use]
    pub const fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Renderer used for exports.
    #[must_use]
    pub const fn renderer(&self) -> &ChartRenderer {
        &self.renderer
    }

    /// Render the registry as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn export_png(&self) -> Result<Vec<u8>> {
        let bytes = self.renderer.to_png(self.registry.curves())?;
        tracing::info!(bytes = bytes.len(), curves = self.registry.len(), "exported png");
        Ok(bytes)
    }

    /// Render the registry as an SVG document.
    ///
    /// # Errors
    ///
    /// Returns an error if the render configuration is invalid.
    pub fn export_svg(&self) -> Result<String> {
        let svg = self.renderer.to_svg(self.registry.curves())?;
        tracing::info!(bytes = svg.len(), curves = self.registry.len(), "exported svg");
        Ok(svg)
    }

    /// Snapshot the current chart for storage.
    ///
    /// `equation` and `color` are stored verbatim; only the equation is
    /// checked, and only for being non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyExpression`] for a blank equation, or a render
    /// error from the snapshot.
    pub fn save(&self, equation: &str, color: &str) -> Result<SavedGraph> {
        let equation = equation.trim();
        if equation.is_empty() {
            tracing::warn!("rejected save without an equation");
            return Err(Error::EmptyExpression);
        }
        let image = self.export_png()?;
        Ok(SavedGraph::new(equation, color, image))
    }
}

impl<A: RenderAdapter> Drop for PlotSession<A> {
    fn drop(&mut self) {
        self.release_chart();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RasterAdapter;

    fn request(equation: &str) -> PlotRequest {
        PlotRequest::new(equation, "blue", DashPattern::Solid)
    }

    #[test]
    fn test_plot_appends_and_draws() {
        let mut session = PlotSession::new(RasterAdapter::default());
        let curve = session.plot(&request("x")).unwrap();
        assert_eq!(curve.label(), "y = x");
        assert_eq!(curve.len(), 201);
        assert!(session.chart().is_some());
    }

    #[test]
    fn test_rejected_request_changes_nothing() {
        let mut session = PlotSession::new(RasterAdapter::default());
        session.plot(&request("x")).unwrap();

        assert!(session.plot(&request("x +")).unwrap_err().is_parse_error());
        assert!(matches!(
            session.plot(&PlotRequest::new("x", "chartreuse-ish", DashPattern::Solid)),
            Err(Error::InvalidColor(_))
        ));
        assert!(matches!(session.plot(&request("sqrt(x)")), Err(Error::UnsupportedToken { .. })));
        assert_eq!(session.registry().len(), 1);
        assert!(session.chart().is_some());
    }

    #[test]
    fn test_blank_equation_checked_before_color() {
        let mut session = PlotSession::new(RasterAdapter::default());
        let err = session.plot(&PlotRequest::new("   ", "not-a-color", DashPattern::Solid)).unwrap_err();
        assert!(matches!(err, Error::EmptyExpression));
    }

    #[test]
    fn test_clear() {
        let mut session = PlotSession::new(RasterAdapter::default());
        session.plot(&request("x")).unwrap();
        session.clear();
        assert!(session.curves().is_empty());
        assert!(session.chart().is_none());
        session.clear();
        assert!(session.curves().is_empty());
    }

    #[test]
    fn test_save_requires_equation() {
        let session = PlotSession::new(RasterAdapter::default());
        assert!(matches!(session.save("  ", "red"), Err(Error::EmptyExpression)));

        let saved = session.save(" x^2 ", "#00ff00").unwrap();
        assert_eq!(saved.equation, "x^2");
        assert_eq!(saved.color, "#00ff00");
        assert_eq!(&saved.image_png[..8], &crate::output::PNG_SIGNATURE);
    }

    #[test]
    fn test_with_config_validates() {
        let bad = RenderConfig { height: 0, ..RenderConfig::default() };
        assert!(PlotSession::with_config(RasterAdapter::default(), bad).is_err());

        let small = RenderConfig { width: 300, height: 200, ..RenderConfig::default() };
        let session = PlotSession::with_config(RasterAdapter::default(), small).unwrap();
        assert_eq!(session.renderer().config().width, 300);
    }

    #[test]
    fn test_request_deserializes_with_default_pattern() {
        let req: PlotRequest = serde_json::from_str(r#"{"equation":"x","color":"red"}"#).unwrap();
        assert_eq!(req.pattern, DashPattern::Solid);
        let req: PlotRequest =
            serde_json::from_str(r#"{"equation":"x","color":"red","pattern":"dotted"}"#).unwrap();
        assert_eq!(req.pattern, DashPattern::Dotted);
    }
}
