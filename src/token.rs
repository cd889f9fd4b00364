//! Token representation shared by every component of the expansion engine.
//!
//! Mirrors `struct token` in `lacc`'s `macro.c`/`tokenize.h`: a small tagged
//! union with a leading-whitespace count used to reproduce source spacing.

use crate::interner::InternedString;
use std::fmt;

/// Numeric type tag carried alongside a `NUMBER` token's value.
///
/// The preprocessor itself never evaluates arithmetic on these (that is the
/// directive layer's `#if` evaluator, out of scope here); the tag only needs
/// to round-trip through stringification and comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Signed,
    Unsigned,
    Float,
}

/// The value carried by a `NUMBER` token.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberValue {
    pub kind: NumberKind,
    /// Printed/raw representation is reconstructed by `text()`; here we keep
    /// the value itself plus its printed digits as an interned string so the
    /// stringifier can cheaply re-intern the printed form rather than the
    /// original payload.
    pub text: InternedString,
}

impl Eq for NumberValue {}

/// Tag discriminating the kind of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Number,
    String,
    /// A reference to a function-like macro's formal parameter, carried as
    /// a zero-based index into the macro's parameter list.
    Param,
    /// Placeholder for an omitted or zero-length macro argument, distinct
    /// from a real empty expansion.
    EmptyArg,
    Newline,
    /// The `##` operator.
    TokenPaste,
    /// End-of-stream sentinel.
    End,
    /// A single-character punctuator, tagged by its byte value (`'('`, `','`, `'#'`, ...).
    Punct(u8),
}

/// A single preprocessing token.
///
/// `leading_whitespace` counts the spaces that preceded the token on its
/// source line; it drives whitespace preservation during parameter
/// substitution and the single-space collapse rule in the stringifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: InternedString,
    pub number: Option<NumberValue>,
    pub param: Option<u32>,
    pub leading_whitespace: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: InternedString) -> Self {
        Token { kind, text, number: None, param: None, leading_whitespace: 0 }
    }

    pub fn identifier(text: InternedString) -> Self {
        Self::new(TokenKind::Identifier, text)
    }

    pub fn string(text: InternedString) -> Self {
        Self::new(TokenKind::String, text)
    }

    pub fn number(text: InternedString, kind: NumberKind) -> Self {
        let mut t = Self::new(TokenKind::Number, text.clone());
        t.number = Some(NumberValue { kind, text });
        t
    }

    pub fn param(index: u32) -> Self {
        Token {
            kind: TokenKind::Param,
            text: InternedString::empty(),
            number: None,
            param: Some(index),
            leading_whitespace: 0,
        }
    }

    pub fn empty_arg() -> Self {
        Token {
            kind: TokenKind::EmptyArg,
            text: InternedString::empty(),
            number: None,
            param: None,
            leading_whitespace: 0,
        }
    }

    pub fn newline() -> Self {
        Token {
            kind: TokenKind::Newline,
            text: InternedString::empty(),
            number: None,
            param: None,
            leading_whitespace: 0,
        }
    }

    pub fn token_paste() -> Self {
        Token {
            kind: TokenKind::TokenPaste,
            text: InternedString::empty(),
            number: None,
            param: None,
            leading_whitespace: 0,
        }
    }

    pub fn end() -> Self {
        Token { kind: TokenKind::End, text: InternedString::empty(), number: None, param: None, leading_whitespace: 0 }
    }

    pub fn punct(byte: u8, text: InternedString) -> Self {
        Self::new(TokenKind::Punct(byte), text)
    }

    pub fn with_leading_whitespace(mut self, n: u32) -> Self {
        self.leading_whitespace = n;
        self
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    pub fn is_punct(&self, byte: u8) -> bool {
        self.kind == TokenKind::Punct(byte)
    }

    /// The exact lexical text of this token — what `tokstr` returns in
    /// `lacc` — used by the stringifier and the paste engine to reconstruct
    /// source text. Differs from `Display` only for `STRING` tokens, whose
    /// interned payload excludes the surrounding quotes.
    pub fn text_form(&self) -> String {
        match self.kind {
            TokenKind::String => format!("\"{}\"", self.text.as_str()),
            TokenKind::Param => format!("<param {}>", self.param.unwrap_or(0)),
            TokenKind::EmptyArg => String::new(),
            _ => self.text.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Param => write!(f, "<param {}>", self.param.unwrap_or(0)),
            TokenKind::EmptyArg => write!(f, "<no-arg>"),
            TokenKind::Newline => write!(f, "\\n"),
            _ => write!(f, "{}", self.text.as_str()),
        }
    }
}

/// Two tokens compare equal iff kind and payload match. `leading_whitespace`
/// is cosmetic and is intentionally excluded — redefinition checks in `lacc`
/// compare via `tok_cmp`, which never looks at whitespace.
pub fn tok_cmp(a: &Token, b: &Token) -> bool {
    if a.kind != b.kind {
        return false;
    }
    match a.kind {
        TokenKind::Param => a.param == b.param,
        TokenKind::Number => a.number == b.number,
        _ => a.text == b.text,
    }
}
