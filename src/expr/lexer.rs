//! Tokenizer for the expression grammar.
//!
//! Letter runs are split greedily into the whitelisted words `sin`, `cos`,
//! `tan` and `x`; anything that does not split cleanly is rejected as a whole.

use crate::error::{Error, Result};

/// Unary functions accepted by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    /// Sine (radians).
    Sin,
    /// Cosine (radians).
    Cos,
    /// Tangent (radians).
    Tan,
}

impl Func {
    /// Name as written in an expression.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
        }
    }

    /// Apply the function.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Sin => value.sin(),
            Self::Cos => value.cos(),
            Self::Tan => value.tan(),
        }
    }
}

/// A lexical token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// Numeric literal.
    Number(f64),
    /// The free variable `x`.
    Var,
    /// A whitelisted function name.
    Func(Func),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `(`
    LParen,
    /// `)`
    RParen,
}

/// A token with its byte offset in the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    /// What the token is.
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub position: usize,
}

const WORDS: [(&str, TokenKind); 4] = [
    ("sin", TokenKind::Func(Func::Sin)),
    ("cos", TokenKind::Func(Func::Cos)),
    ("tan", TokenKind::Func(Func::Tan)),
    ("x", TokenKind::Var),
];

/// Split an expression into tokens.
///
/// # Errors
///
/// Returns [`Error::UnsupportedToken`] for identifiers or symbols outside the
/// grammar and [`Error::SyntaxError`] for malformed numbers.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let kind = match c {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
                continue;
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'^' => TokenKind::Caret,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'0'..=b'9' | b'.' => {
                let (value, end) = scan_number(source, i)?;
                tokens.push(Token { kind: TokenKind::Number(value), position: i });
                i = end;
                continue;
            }
            _ if c.is_ascii_alphabetic() => {
                let end = bytes[i..]
                    .iter()
                    .position(|b| !b.is_ascii_alphabetic())
                    .map_or(bytes.len(), |n| i + n);
                split_word(&source[i..end], i, &mut tokens)?;
                i = end;
                continue;
            }
            _ => {
                // Report the full character, not a lone UTF-8 byte.
                let token = source[i..].chars().next().map(String::from).unwrap_or_default();
                return Err(Error::UnsupportedToken { token, position: i });
            }
        };
        tokens.push(Token { kind, position: i });
        i += 1;
    }

    Ok(tokens)
}

/// Scan a decimal literal (`3`, `2.5`, `.5`, `4.`) starting at `start`.
fn scan_number(source: &str, start: usize) -> Result<(f64, usize)> {
    let bytes = source.as_bytes();
    let mut end = start;
    let mut seen_dot = false;

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            b'.' => return Err(Error::syntax("malformed number", end)),
            _ => break,
        }
    }

    let text = &source[start..end];
    if text == "." {
        return Err(Error::syntax("expected digits around '.'", start));
    }
    let value = text.parse::<f64>().map_err(|_| Error::syntax(format!("invalid number '{text}'"), start))?;
    Ok((value, end))
}

/// Split a letter run into whitelisted words, or reject the whole run.
fn split_word(word: &str, offset: usize, tokens: &mut Vec<Token>) -> Result<()> {
    let mut rest = word;
    let mut split = Vec::new();

    while !rest.is_empty() {
        let Some((text, kind)) = WORDS.iter().find(|(text, _)| rest.starts_with(text)) else {
            return Err(Error::UnsupportedToken { token: word.to_string(), position: offset });
        };
        split.push(Token { kind: *kind, position: offset + (word.len() - rest.len()) });
        rest = &rest[text.len()..];
    }

    tokens.extend(split);
    Ok(())
}
