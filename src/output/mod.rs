//! Output encoders (PNG, SVG).

mod png_encoder;
mod svg;

pub use png_encoder::{PngEncoder, PNG_SIGNATURE};
pub use svg::{SvgElement, SvgEncoder, TextAnchor};
