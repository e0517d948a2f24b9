//! Pratt parser from tokens to an [`Expr`] tree.
//!
//! Binding powers, low to high:
//!
//! | Operator           | Left | Right |
//! |--------------------|------|-------|
//! | `+` `-`            | 1    | 2     |
//! | `*` `/`            | 3    | 4     |
//! | prefix `-` `+`     |      | 5     |
//! | `^` (right assoc)  | 8    | 7     |
//! | function argument  |      | 9     |

use super::ast::{BinOp, Expr};
use super::lexer::{Token, TokenKind};
use crate::error::{Error, Result};

/// Maximum nesting depth accepted by the parser.
pub const MAX_DEPTH: usize = 256;

const PREFIX_BP: u8 = 5;
const CALL_ARG_BP: u8 = 9;

fn infix_binding_power(kind: TokenKind) -> Option<(BinOp, u8, u8)> {
    match kind {
        TokenKind::Plus => Some((BinOp::Add, 1, 2)),
        TokenKind::Minus => Some((BinOp::Sub, 1, 2)),
        TokenKind::Star => Some((BinOp::Mul, 3, 4)),
        TokenKind::Slash => Some((BinOp::Div, 3, 4)),
        TokenKind::Caret => Some((BinOp::Pow, 8, 7)),
        _ => None,
    }
}

fn describe(kind: TokenKind) -> String {
    match kind {
        TokenKind::Number(n) => format!("number {n}"),
        TokenKind::Var => "'x'".to_string(),
        TokenKind::Func(func) => format!("'{}'", func.name()),
        TokenKind::Plus => "'+'".to_string(),
        TokenKind::Minus => "'-'".to_string(),
        TokenKind::Star => "'*'".to_string(),
        TokenKind::Slash => "'/'".to_string(),
        TokenKind::Caret => "'^'".to_string(),
        TokenKind::LParen => "'('".to_string(),
        TokenKind::RParen => "')'".to_string(),
    }
}

/// Parser over a token slice.
pub(crate) struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    /// Byte length of the source, reported for unexpected end of input.
    source_len: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Token], source_len: usize) -> Self {
        Self { tokens, pos: 0, depth: 0, source_len }
    }

    /// Parse the whole token stream as one expression.
    pub(crate) fn parse(mut self) -> Result<Expr> {
        let expr = self.parse_bp(0)?;

        if let Some(token) = self.peek() {
            let message = match token.kind {
                TokenKind::RParen => "unmatched ')'".to_string(),
                kind => format!("expected an operator before {}", describe(kind)),
            };
            return Err(Error::syntax(message, token.position));
        }

        Ok(expr)
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_bp(&mut self, min_bp: u8) -> Result<Expr> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            let position = self.peek().map_or(self.source_len, |t| t.position);
            return Err(Error::syntax("expression nested too deeply", position));
        }

        let mut lhs = self.parse_prefix()?;

        while let Some(token) = self.peek() {
            let Some((op, l_bp, r_bp)) = infix_binding_power(token.kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            self.pos += 1;
            let rhs = self.parse_bp(r_bp)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }

        self.depth -= 1;
        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> Result<Expr> {
        let Some(token) = self.next() else {
            return Err(Error::syntax("unexpected end of expression", self.source_len));
        };

        match token.kind {
            TokenKind::Number(n) => Ok(Expr::Number(n)),
            TokenKind::Var => Ok(Expr::Var),
            TokenKind::Minus => Ok(Expr::Neg(Box::new(self.parse_bp(PREFIX_BP)?))),
            TokenKind::Plus => self.parse_bp(PREFIX_BP),
            TokenKind::Func(func) => Ok(Expr::Call(func, Box::new(self.parse_bp(CALL_ARG_BP)?))),
            TokenKind::LParen => {
                let inner = self.parse_bp(0)?;
                match self.next() {
                    Some(Token { kind: TokenKind::RParen, .. }) => Ok(inner),
                    Some(other) => Err(Error::syntax(
                        format!("expected ')' but found {}", describe(other.kind)),
                        other.position,
                    )),
                    None => Err(Error::syntax("unclosed '('", token.position)),
                }
            }
            kind => Err(Error::syntax(format!("unexpected {}", describe(kind)), token.position)),
        }
    }
}
