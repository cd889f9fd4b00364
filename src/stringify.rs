//! The stringifier (`#` operator).
//!
//! Converts a token sequence into a single `STRING` token, mirroring
//! `stringify` in `lacc`'s `macro.c`. Quoted from that implementation's own
//! comment, itself quoting the GCC documentation: "All leading and trailing
//! whitespace in text being stringified is ignored. Any sequence of
//! whitespace in the middle of the text is converted to a single space in
//! the stringified result."

use crate::interner::Interner;
use crate::pool::TokenSequence;
use crate::token::{Token, TokenKind};

/// Produce a single `STRING` token from `seq`.
pub fn stringify(seq: &TokenSequence, interner: &mut dyn Interner) -> Token {
    if seq.is_empty() || seq.get(0).map(|t| t.kind) == Some(TokenKind::EmptyArg) {
        return Token::string(interner.intern_str(""));
    }

    if seq.len() == 1 {
        let tok = seq.get(0).unwrap();
        let text = interner.intern_str(&tok.text_form());
        return Token::string(text);
    }

    let mut buf = String::with_capacity(seq.len() * 7);
    for (i, tok) in seq.iter().enumerate() {
        if tok.kind == TokenKind::Newline {
            debug_assert_eq!(i, seq.len() - 1, "a NEWLINE token must be last if present");
            break;
        }
        if tok.leading_whitespace > 0 && i > 0 {
            buf.push(' ');
        }
        buf.push_str(&tok.text_form());
    }

    Token::string(interner.intern_str(&buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner::StringInterner;
    use crate::lexer::BasicLexer;

    #[test]
    fn stringify_empty_sequence_is_empty_string() {
        let mut interner = StringInterner::new();
        let seq = TokenSequence::new();
        let tok = stringify(&seq, &mut interner);
        assert_eq!(tok.kind, TokenKind::String);
        assert_eq!(tok.text.as_str(), "");
    }

    #[test]
    fn stringify_single_identifier_round_trips() {
        let mut interner = StringInterner::new();
        let mut lexer = BasicLexer;
        let seq = lexer.tokenize_line("hello", &mut interner);
        let tok = stringify(&seq, &mut interner);
        assert_eq!(tok.text.as_str(), "hello");
    }

    #[test]
    fn stringify_collapses_interior_whitespace_and_trims_ends() {
        let mut interner = StringInterner::new();
        let mut lexer = BasicLexer;
        let seq = lexer.tokenize_line("hello   world", &mut interner);
        let tok = stringify(&seq, &mut interner);
        assert_eq!(tok.text.as_str(), "hello world");
    }

    #[test]
    fn stringify_result_has_no_leading_whitespace() {
        let mut interner = StringInterner::new();
        let mut lexer = BasicLexer;
        let seq = lexer.tokenize_line("a b", &mut interner);
        let tok = stringify(&seq, &mut interner);
        assert_eq!(tok.leading_whitespace, 0);
    }
}
