//! The argument reader.
//!
//! Parses a parenthesised, comma-separated macro argument list out of a
//! token stream, nesting-aware so that `F(g(a, b), c)` reads two arguments
//! rather than four. Mirrors `read_arg`/`read_args` in `lacc`'s `macro.c`.

use crate::diagnostics::{DiagnosticSink, MacroError};
use crate::macro_table::{Macro, MacroType};
use crate::pool::{TokenPool, TokenSequence};
use crate::token::Token;

/// Consume tokens from `seq` starting at `start` until, at nesting depth
/// zero, a `,` or `)` is encountered. Returns the collected argument and the
/// index of that delimiter (not yet consumed).
///
/// An unprovided argument (zero tokens collected) is represented by a single
/// `EMPTY_ARG` sentinel, distinguishing it from any real empty expansion.
pub fn read_arg(seq: &TokenSequence, start: usize, pool: &mut TokenPool, sink: &dyn DiagnosticSink) -> (TokenSequence, usize) {
    let mut nesting: i32 = 0;
    let mut i = start;
    let mut arg = pool.acquire();

    loop {
        let t = seq.get(i).unwrap_or_else(|| sink.fatal(MacroError::UnterminatedArgumentList));

        if t.kind == crate::token::TokenKind::Newline {
            sink.fatal(MacroError::UnterminatedArgumentList);
        }

        if nesting == 0 && (t.is_punct(b',') || t.is_punct(b')')) {
            break;
        }

        if t.is_punct(b'(') {
            nesting += 1;
        } else if t.is_punct(b')') {
            nesting -= 1;
            if nesting < 0 {
                sink.fatal(MacroError::UnbalancedParens);
            }
        }

        arg.push(t.clone());
        i += 1;
    }

    if arg.is_empty() {
        arg.push(Token::empty_arg());
    }

    (arg, i)
}

fn expect(seq: &TokenSequence, at: usize, byte: u8, sink: &dyn DiagnosticSink) -> usize {
    match seq.get(at) {
        Some(t) if t.is_punct(byte) => at + 1,
        Some(t) => sink.fatal(MacroError::MissingDelimiter { expected: (byte as char).to_string(), found: t.to_string() }),
        None => sink.fatal(MacroError::UnterminatedArgumentList),
    }
}

/// Read the arguments for an invocation of `def` starting at `start`
/// (the position right after the macro name for function-like macros, or
/// the macro name's own position for object-like ones — object-like macros
/// take no arguments and leave the cursor untouched).
pub fn read_args(def: &Macro, seq: &TokenSequence, start: usize, pool: &mut TokenPool, sink: &dyn DiagnosticSink) -> (Vec<TokenSequence>, usize) {
    if def.kind != MacroType::FunctionLike {
        return (Vec::new(), start);
    }

    let mut cursor = expect(seq, start, b'(', sink);
    let mut args = Vec::with_capacity(def.params);

    for i in 0..def.params {
        let (arg, next) = read_arg(seq, cursor, pool, sink);
        args.push(arg);
        cursor = next;
        if i < def.params - 1 {
            cursor = expect(seq, cursor, b',', sink);
        }
    }
    cursor = expect(seq, cursor, b')', sink);

    (args, cursor)
}
