//! Error types for graph-plotter operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning an expression into a rendered curve.
#[derive(Error, Debug)]
pub enum Error {
    /// The expression was empty or whitespace-only.
    #[error("Empty expression")]
    EmptyExpression,

    /// Malformed expression syntax (including unbalanced parentheses).
    #[error("Syntax error at position {position}: {message}")]
    SyntaxError {
        /// Human-readable description of what went wrong.
        message: String,
        /// Approximate byte offset in the trimmed expression.
        position: usize,
    },

    /// An identifier or symbol outside the supported grammar.
    #[error("Unsupported token '{token}' at position {position}")]
    UnsupportedToken {
        /// The offending token text.
        token: String,
        /// Byte offset in the trimmed expression.
        position: usize,
    },

    /// Sampling produced no finite points.
    #[error("No valid data points could be plotted")]
    NoValidPoints,

    /// A function raised a fault while being sampled; the run was aborted.
    #[error("Evaluation fault at x = {x}: {reason}")]
    EvaluationFault {
        /// Abscissa at which the fault occurred.
        x: f64,
        /// Description of the fault.
        reason: String,
    },

    /// Invalid sampling domain or step.
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Dash pattern parsing error.
    #[error("Invalid line pattern: {0}")]
    InvalidPattern(String),

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for framebuffer or chart.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Scale domain error (e.g., zero-width domain).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A persistence payload could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error came from parsing the expression text, as opposed
    /// to sampling or rendering it.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyExpression | Self::SyntaxError { .. } | Self::UnsupportedToken { .. }
        )
    }

    pub(crate) fn syntax(message: impl Into<String>, position: usize) -> Self {
        Self::SyntaxError { message: message.into(), position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions { width: 0, height: 100 };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_unsupported_token_display() {
        let err = Error::UnsupportedToken { token: "alert".to_string(), position: 0 };
        assert!(err.to_string().contains("alert"));
    }

    #[test]
    fn test_parse_errors_are_distinct_from_sampling() {
        assert!(Error::EmptyExpression.is_parse_error());
        assert!(Error::syntax("unexpected end", 3).is_parse_error());
        assert!(!Error::NoValidPoints.is_parse_error());
        assert!(!Error::EvaluationFault { x: 0.0, reason: "boom".into() }.is_parse_error());
    }
}
