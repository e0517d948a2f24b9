//! Restricted expression compiler.
//!
//! Turns user text such as `sin(x) + x^2 / 3` into a [`CompiledExpr`], a pure
//! `f64 -> f64` function backed by an expression tree. Input is never
//! executed: it is tokenized against a fixed whitelist and parsed with a
//! Pratt parser limited to the grammar below.
//!
//! # Grammar
//!
//! ```text
//! expr    := expr ('+' | '-') expr
//!          | expr ('*' | '/') expr
//!          | ('-' | '+') expr
//!          | expr '^' expr            (right associative)
//!          | func primary
//!          | primary
//! func    := 'sin' | 'cos' | 'tan'
//! primary := number | 'x' | '(' expr ')'
//! ```
//!
//! # Example
//!
//! ```rust
//! use graph_plotter::expr::compile;
//!
//! let f = compile("x^2 - 1").unwrap();
//! assert_eq!(f.eval(3.0), 8.0);
//! ```

mod ast;
mod lexer;
mod parser;

use std::fmt;

pub use ast::{BinOp, Expr};
pub use lexer::{tokenize, Func, Token, TokenKind};
pub use parser::MAX_DEPTH;

use crate::error::{Error, Result};
use crate::sampler::Function;
use parser::Parser;

/// A successfully compiled single-variable expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpr {
    source: String,
    tree: Expr,
}

impl CompiledExpr {
    /// The trimmed source text this expression was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed expression tree.
    #[must_use]
    pub const fn tree(&self) -> &Expr {
        &self.tree
    }

    /// Evaluate at `x`. Pure: the same `x` always yields the same bits.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        self.tree.eval(x)
    }
}

impl Function for CompiledExpr {
    fn evaluate(&self, x: f64) -> Result<f64> {
        Ok(self.eval(x))
    }
}

impl fmt::Display for CompiledExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.fmt(f)
    }
}

/// Compile expression text into an evaluable function.
///
/// # Errors
///
/// - [`Error::EmptyExpression`] if `text` is blank.
/// - [`Error::UnsupportedToken`] for identifiers other than `x`, `sin`,
///   `cos`, `tan`, or symbols outside `+ - * / ^ ( )`.
/// - [`Error::SyntaxError`] for malformed input or unbalanced parentheses.
pub fn compile(text: &str) -> Result<CompiledExpr> {
    let source = text.trim();
    if source.is_empty() {
        return Err(Error::EmptyExpression);
    }

    let tokens = tokenize(source)?;
    let tree = Parser::new(&tokens, source.len()).parse()?;
    tracing::debug!(source, tree = %tree, nodes = tree.node_count(), "compiled expression");

    Ok(CompiledExpr { source: source.to_string(), tree })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compile_and_eval() {
        let f = compile("2*x + 1").unwrap();
        assert_eq!(f.eval(2.0), 5.0);
        assert_eq!(f.source(), "2*x + 1");
    }

    #[test]
    fn test_trims_source() {
        let f = compile("   x^2  ").unwrap();
        assert_eq!(f.source(), "x^2");
        assert_eq!(f.eval(-3.0), 9.0);
    }

    #[test]
    fn test_trig() {
        let f = compile("sin(x)^2 + cos(x)^2").unwrap();
        for x in [-3.0, -0.5, 0.0, 1.25, 7.0] {
            assert_relative_eq!(f.eval(x), 1.0, epsilon = 1e-12);
        }
        let t = compile("tan x").unwrap();
        assert_relative_eq!(t.eval(0.5), 0.5_f64.tan());
    }

    #[test]
    fn test_empty_expression() {
        assert!(matches!(compile(""), Err(Error::EmptyExpression)));
        assert!(matches!(compile(" \t\n "), Err(Error::EmptyExpression)));
    }

    #[test]
    fn test_injection_attempts_rejected() {
        for source in ["alert(1)", "process.exit()", "x; rm", "Math.sin(x)", "eval(x)", "constructor"] {
            match compile(source) {
                Err(Error::UnsupportedToken { .. }) => {}
                other => panic!("{source}: expected UnsupportedToken, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_pow_semantics_follow_powf() {
        let f = compile("x^0.5").unwrap();
        assert!(f.eval(-1.0).is_nan());
        let g = compile("x^-1").unwrap();
        assert!(g.eval(0.0).is_infinite());
    }

    #[test]
    fn test_display_uses_tree() {
        let f = compile("1+x*2").unwrap();
        assert_eq!(f.to_string(), "(1 + (x * 2))");
    }

    #[test]
    fn test_function_impl_never_faults() {
        let f = compile("1/x").unwrap();
        assert!(f.evaluate(0.0).unwrap().is_infinite());
    }
}
