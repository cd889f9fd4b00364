//! The token buffer pool.
//!
//! Recycles the backing storage of [`TokenSequence`]s so the hot path in the
//! expander (one fresh sequence per macro invocation, per argument) doesn't
//! churn the allocator. Mirrors `get_token_array`/`release_token_array` in
//! `lacc`'s `macro.c`, which recycle a global `array_of(TokenArray)`.

use crate::token::Token;
use std::fmt;

/// An ordered, index-addressable sequence of tokens. Backed by a plain
/// `Vec`, which already gives O(1) random access, append, and pop-last;
/// `replace_slice` implements in-place slice replacement, mirroring `lacc`'s
/// `array_replace_slice` (memmove the tail into place, then copy the
/// replacement in).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    pub fn new() -> Self {
        TokenSequence { tokens: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        TokenSequence { tokens: Vec::with_capacity(cap) }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn push(&mut self, tok: Token) {
        self.tokens.push(tok);
    }

    pub fn pop(&mut self) -> Option<Token> {
        self.tokens.pop()
    }

    pub fn get(&self, i: usize) -> Option<&Token> {
        self.tokens.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut Token> {
        self.tokens.get_mut(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn truncate(&mut self, len: usize) {
        self.tokens.truncate(len);
    }

    /// Append every token of `other` to the end of `self`, leaving `other`
    /// empty but with its capacity intact (so it can still be returned to
    /// the pool).
    pub fn concat(&mut self, other: &mut TokenSequence) {
        self.tokens.append(&mut other.tokens);
    }

    /// Replace the half-open range `[start, start + gaplength)` with the
    /// contents of `slice`, which may be shorter or longer than the gap.
    /// Mirrors `lacc`'s `array_replace_slice`.
    pub fn replace_slice(&mut self, start: usize, gaplength: usize, slice: &TokenSequence) {
        assert!(start + gaplength <= self.tokens.len());
        self.tokens.splice(start..start + gaplength, slice.tokens.iter().cloned());
    }

    fn reset(&mut self) {
        self.tokens.clear();
    }
}

impl fmt::Display for TokenSequence {
    /// Debug-friendly rendering in the shape of `lacc`'s `print_token_array`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, t) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'")?;
            if t.leading_whitespace > 0 {
                write!(f, "{:>width$}", "", width = t.leading_whitespace as usize)?;
            }
            write!(f, "{}", t)?;
            write!(f, "'")?;
        }
        write!(f, "] ({})", self.tokens.len())
    }
}

impl FromIterator<Token> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        TokenSequence { tokens: iter.into_iter().collect() }
    }
}

impl IntoIterator for TokenSequence {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// Recycles [`TokenSequence`] allocations.
///
/// `acquire` returns a zero-length sequence, reusing a previously released
/// one's backing storage when available; `release` transfers ownership of a
/// sequence back to the pool. Calling `release` twice on sequences obtained
/// from the same `acquire` is a caller bug the pool cannot detect, exactly
/// as in `lacc`, which has no way to detect double-release of a
/// `TokenArray` either.
#[derive(Default)]
pub struct TokenPool {
    free: Vec<TokenSequence>,
}

impl TokenPool {
    pub fn new() -> Self {
        TokenPool { free: Vec::new() }
    }

    pub fn acquire(&mut self) -> TokenSequence {
        match self.free.pop() {
            Some(mut seq) => {
                seq.reset();
                seq
            }
            None => TokenSequence::new(),
        }
    }

    pub fn release(&mut self, seq: TokenSequence) {
        self.free.push(seq);
    }

    /// Releases every pooled allocation. Called at engine teardown.
    pub fn teardown(&mut self) {
        self.free.clear();
    }
}
