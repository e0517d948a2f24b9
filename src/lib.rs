//! # Graph Plotter
//!
//! Plots single-variable expressions such as `sin(x) + x^2` over a fixed
//! Cartesian viewport.
//!
//! User text is compiled by a restricted tokenizer and Pratt parser, never
//! executed. Compiled functions are sampled over `[-10, 10]`, non-finite
//! values are dropped, and the resulting curves are kept in an ordered
//! registry that a render adapter draws as a line chart.
//!
//! ## Features
//!
//! - **Restricted grammar**: `+ - * / ^`, parentheses, `sin`/`cos`/`tan`, numbers and `x`
//! - **Explicit errors**: empty input, syntax, unsupported tokens and unplottable curves are distinct
//! - **Pure Rust output**: anti-aliased PNG rasters and SVG documents
//! - **Pluggable surfaces**: any [`render::RenderAdapter`] can back a session
//!
//! ## Quick Start
//!
//! ```rust
//! use graph_plotter::prelude::*;
//!
//! let mut session = PlotSession::new(RasterAdapter::default());
//! session.plot(&PlotRequest::new("x^2", "red", DashPattern::Solid))?;
//! session.plot(&PlotRequest::new("sin(x)", "#0000ff", DashPattern::Dashed))?;
//! assert_eq!(session.registry().labels(), ["y = x^2", "y = sin(x)"]);
//!
//! let png = session.export_png()?;
//! assert_eq!(&png[..4], b"\x89PNG");
//! # Ok::<(), graph_plotter::Error>(())
//! ```
//!
//! ## References
//!
//! - Pratt, V. R. (1973). "Top Down Operator Precedence." POPL '73.
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Liang, Y.-D., & Barsky, B. A. (1984). "A New Concept and Method for Line Clipping."

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and color token parsing.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Scale functions for data-to-pixel mappings.
pub mod scale;

// ============================================================================
// Plotting Pipeline
// ============================================================================

/// Restricted expression compiler.
pub mod expr;

/// Domain sampling of single-variable functions.
pub mod sampler;

/// Styled, sampled curves.
pub mod curve;

/// Ordered collection of curves backing a chart.
pub mod registry;

/// Plot sessions tying the pipeline to a render adapter.
pub mod session;

/// Persistence payloads for saved graphs.
pub mod persist;

/// Axis and render configuration.
pub mod config;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rendering backends and rasterization.
pub mod render;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for graph-plotter operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use graph_plotter::prelude::*;
/// ```
pub mod prelude {
    pub use batuta_common::display::WithDimensions;
    pub use crate::color::{parse_color, Rgba};
    pub use crate::config::{AxisConfig, RenderConfig};
    pub use crate::curve::{Curve, DashPattern};
    pub use crate::error::{Error, Result};
    pub use crate::expr::{compile, CompiledExpr};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Rect};
    pub use crate::output::{PngEncoder, SvgEncoder};
    pub use crate::persist::{SavedGraph, SavedGraphListing, SavedGraphSummary};
    pub use crate::registry::DatasetRegistry;
    pub use crate::render::{ChartRenderer, RasterAdapter, RenderAdapter};
    pub use crate::sampler::{sample, Domain, Function};
    pub use crate::scale::{LinearScale, Scale};
    pub use crate::session::{PlotRequest, PlotSession};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
