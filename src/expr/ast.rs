//! Expression tree and tree-walking evaluation.

use std::fmt;

use super::lexer::Func;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// IEEE division.
    Div,
    /// Real exponentiation (`powf`).
    Pow,
}

impl BinOp {
    const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Pow => lhs.powf(rhs),
        }
    }
}

/// A node in a parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Constant literal.
    Number(f64),
    /// The free variable.
    Var,
    /// Arithmetic negation.
    Neg(Box<Expr>),
    /// Function application.
    Call(Func, Box<Expr>),
    /// Binary operation.
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluate the tree at `x`.
    ///
    /// Non-finite intermediate results propagate unchanged.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Var => x,
            Self::Neg(inner) => -inner.eval(x),
            Self::Call(func, arg) => func.apply(arg.eval(x)),
            Self::Binary(op, lhs, rhs) => op.apply(lhs.eval(x), rhs.eval(x)),
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Number(_) | Self::Var => 1,
            Self::Neg(inner) | Self::Call(_, inner) => 1 + inner.node_count(),
            Self::Binary(_, lhs, rhs) => 1 + lhs.node_count() + rhs.node_count(),
        }
    }
}

/// Fully parenthesized rendering, e.g. `((2 * x) + 1)`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Var => f.write_str("x"),
            Self::Neg(inner) => write!(f, "(-{inner})"),
            Self::Call(func, arg) => write!(f, "{}({arg})", func.name()),
            Self::Binary(op, lhs, rhs) => write!(f, "({lhs} {} {rhs})", op.symbol()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    #[test]
    fn test_eval_arithmetic() {
        // 2 * x + 1
        let expr = bin(BinOp::Add, bin(BinOp::Mul, Expr::Number(2.0), Expr::Var), Expr::Number(1.0));
        assert_eq!(expr.eval(3.0), 7.0);
        assert_eq!(expr.node_count(), 5);
    }

    #[test]
    fn test_eval_propagates_non_finite() {
        let div = bin(BinOp::Div, Expr::Number(1.0), Expr::Var);
        assert!(div.eval(0.0).is_infinite());

        let pow = bin(BinOp::Pow, Expr::Var, Expr::Number(0.5));
        assert!(pow.eval(-4.0).is_nan());
    }

    #[test]
    fn test_eval_call() {
        let expr = Expr::Call(Func::Cos, Box::new(Expr::Var));
        assert_eq!(expr.eval(0.0), 1.0);
    }

    #[test]
    fn test_display() {
        let expr = Expr::Neg(Box::new(bin(BinOp::Pow, Expr::Var, Expr::Number(2.0))));
        assert_eq!(expr.to_string(), "(-(x ^ 2))");
        let call = Expr::Call(Func::Sin, Box::new(Expr::Var));
        assert_eq!(call.to_string(), "sin(x)");
    }
}
