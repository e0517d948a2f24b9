//! Styled, sampled curves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::Point;

/// Stroke pattern of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashPattern {
    /// Continuous stroke.
    #[default]
    Solid,
    /// 10 px on, 5 px off.
    Dashed,
    /// 2 px on, 2 px off.
    Dotted,
}

impl DashPattern {
    /// On/off run lengths in pixels; empty for a solid stroke.
    #[must_use]
    pub const fn segments(self) -> &'static [f32] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[10.0, 5.0],
            Self::Dotted => &[2.0, 2.0],
        }
    }

    /// Name as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }
}

impl fmt::Display for DashPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DashPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            other => Err(Error::InvalidPattern(other.to_string())),
        }
    }
}

/// One plotted expression: its label, style and finite points.
///
/// Curves are immutable once built; the registry only appends or clears them.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    label: String,
    color: Rgba,
    pattern: DashPattern,
    points: Vec<Point>,
}

impl Curve {
    /// Build a curve for `expression`, labeled `y = <expression>`.
    #[must_use]
    pub fn new(expression: &str, color: Rgba, pattern: DashPattern, points: Vec<Point>) -> Self {
        debug_assert!(points.iter().all(|p| p.y.is_finite()));
        Self { label: format!("y = {}", expression.trim()), color, pattern, points }
    }

    /// Legend label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Stroke color.
    #[must_use]
    pub const fn color(&self) -> Rgba {
        self.color
    }

    /// Stroke pattern.
    #[must_use]
    pub const fn pattern(&self) -> DashPattern {
        self.pattern
    }

    /// Sampled points in ascending `x`.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the curve has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_parse() {
        assert_eq!("solid".parse::<DashPattern>().unwrap(), DashPattern::Solid);
        assert_eq!("Dashed".parse::<DashPattern>().unwrap(), DashPattern::Dashed);
        assert_eq!(" dotted ".parse::<DashPattern>().unwrap(), DashPattern::Dotted);
        assert!(matches!("wavy".parse::<DashPattern>(), Err(Error::InvalidPattern(_))));
    }

    #[test]
    fn test_pattern_segments() {
        assert!(DashPattern::Solid.segments().is_empty());
        assert_eq!(DashPattern::Dashed.segments(), &[10.0, 5.0]);
        assert_eq!(DashPattern::Dotted.segments(), &[2.0, 2.0]);
    }

    #[test]
    fn test_pattern_serde_names() {
        let json = serde_json::to_string(&DashPattern::Dotted).unwrap();
        assert_eq!(json, "\"dotted\"");
        let back: DashPattern = serde_json::from_str("\"dashed\"").unwrap();
        assert_eq!(back, DashPattern::Dashed);
    }

    #[test]
    fn test_curve_label() {
        let curve = Curve::new(" x^2 ", Rgba::RED, DashPattern::Solid, vec![Point::new(0.0, 0.0)]);
        assert_eq!(curve.label(), "y = x^2");
        assert_eq!(curve.len(), 1);
        assert!(!curve.is_empty());
    }
}
