//! The paste (`##`) engine.
//!
//! Resolves every `##` in a replacement list in a single left-to-right pass,
//! mutating the sequence in place. Mirrors `expand_paste_operators`/`paste`
//! in `lacc`'s `macro.c`.

use crate::diagnostics::{DiagnosticSink, MacroError};
use crate::interner::Interner;
use crate::lexer::Lexer;
use crate::pool::TokenSequence;
use crate::token::{Token, TokenKind};

fn paste_tokens(left: Token, right: Token, lexer: &mut dyn Lexer, interner: &mut dyn Interner, sink: &dyn DiagnosticSink) -> Token {
    let combined = format!("{}{}", left.text_form(), right.text_form());
    let bytes = combined.as_bytes();
    let (mut tok, consumed) = lexer.tokenize(bytes, interner);
    if consumed != bytes.len() {
        sink.fatal(MacroError::InvalidPaste { left: left.text_form(), right: right.text_form() });
    }
    tok.leading_whitespace = left.leading_whitespace;
    tok
}

/// Resolve every `TOKEN_PASTE` in `seq`, mutating it in place.
///
/// `macro_name` is used only to annotate diagnostics for a malformed paste
/// at the start or end of a replacement list.
pub fn expand_paste(seq: &mut TokenSequence, macro_name: &str, lexer: &mut dyn Lexer, interner: &mut dyn Interner, sink: &dyn DiagnosticSink) {
    let len = seq.len();
    if len == 0 {
        return;
    }

    if seq.get(0).unwrap().kind == TokenKind::TokenPaste {
        sink.fatal(MacroError::PasteAtStart { name: macro_name.to_owned() });
    }
    if seq.get(len - 1).unwrap().kind == TokenKind::TokenPaste {
        sink.fatal(MacroError::PasteAtEnd { name: macro_name.to_owned() });
    }

    let mut out: Vec<Token> = Vec::with_capacity(len);
    let mut i = 0;
    while i < len {
        let t = seq.get(i).unwrap().clone();
        if t.kind == TokenKind::TokenPaste {
            let l = out.pop().expect("paste operator validated not to be the first token");
            let r = seq.get(i + 1).expect("paste operator validated not to be the last token").clone();

            match (l.kind == TokenKind::EmptyArg, r.kind == TokenKind::EmptyArg) {
                (true, true) => {}
                (true, false) => out.push(r),
                (false, true) => out.push(l),
                (false, false) => out.push(paste_tokens(l, r, lexer, interner, sink)),
            }
            i += 2;
        } else {
            out.push(t);
            i += 1;
        }
    }

    // Rule 3: strip any EMPTY_ARG tokens that were never involved in a paste.
    out.retain(|t| t.kind != TokenKind::EmptyArg);

    *seq = out.into_iter().collect();
}
