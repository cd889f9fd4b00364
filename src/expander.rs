//! The expander, and the [`Engine`] that ties every collaborator together.
//!
//! `Engine::expand` is the top-level recursive walk, mirroring
//! `expand`/`expand_macro` in `lacc`'s `macro.c`. Rather than the C
//! original's process-global macro table, token pool, and recursion guard,
//! this implementation encapsulates them inside one `Engine` object threaded
//! through expansion — ordinary ownership rather than `static`s, which is
//! the idiomatic Rust shape for what would otherwise be unsafe global state.

use crate::args::read_args;
use crate::diagnostics::DiagnosticSink;
use crate::interner::{Interner, InternedString};
use crate::lexer::Lexer;
use crate::macro_table::{FilePositionSource, Macro, MacroTable, MacroType};
use crate::paste::expand_paste;
use crate::pool::{TokenPool, TokenSequence};
use crate::stringify::stringify;
use crate::token::TokenKind;

/// Owns the macro table, the token buffer pool, and the recursion guard
/// (`expand_stack`). The lexer, interner, diagnostic sink, and
/// file-position source are external collaborators, injected so the engine
/// never assumes a particular implementation of any of them.
pub struct Engine {
    table: MacroTable,
    pool: TokenPool,
    /// Recursion guard: names of macros currently being expanded, checked
    /// by `is_active` to block self-reference.
    expand_stack: Vec<InternedString>,
    interner: Box<dyn Interner>,
    lexer: Box<dyn Lexer>,
    sink: Box<dyn DiagnosticSink>,
    position: Box<dyn FilePositionSource>,
}

impl Engine {
    pub fn new(
        interner: Box<dyn Interner>,
        lexer: Box<dyn Lexer>,
        sink: Box<dyn DiagnosticSink>,
        position: Box<dyn FilePositionSource>,
    ) -> Self {
        Engine { table: MacroTable::new(), pool: TokenPool::new(), expand_stack: Vec::new(), interner, lexer, sink, position }
    }

    pub fn interner_mut(&mut self) -> &mut dyn Interner {
        self.interner.as_mut()
    }

    pub fn lexer_mut(&mut self) -> &mut dyn Lexer {
        self.lexer.as_mut()
    }

    pub fn pool_mut(&mut self) -> &mut TokenPool {
        &mut self.pool
    }

    /// Tokenize `text` using the engine's own lexer, for convenience at call
    /// sites (tests, examples) that don't want to hold their own lexer.
    pub fn tokenize_line(&mut self, text: &str) -> TokenSequence {
        crate::lexer::BasicLexer.tokenize_line(text, self.interner.as_mut())
    }

    pub fn intern(&mut self, s: &str) -> InternedString {
        self.interner.intern_str(s)
    }

    pub fn define(&mut self, macro_: Macro) {
        self.table.define(macro_, &mut self.pool, self.sink.as_ref());
    }

    pub fn undef(&mut self, name: &InternedString) {
        self.table.undef(name, &mut self.pool);
    }

    pub fn lookup(&mut self, name: &InternedString) -> Option<&Macro> {
        self.table.lookup(name, self.position.as_ref(), self.interner.as_mut(), self.sink.as_ref())
    }

    fn is_active(&self, name: &InternedString) -> bool {
        self.expand_stack.iter().any(|n| n == name)
    }

    /// Top-level recursive walk. Rewrites `seq` in place.
    #[tracing::instrument(level = "trace", skip(self, seq))]
    pub fn expand(&mut self, seq: &mut TokenSequence) {
        let mut i = 0;
        while i < seq.len() {
            let t = seq.get(i).unwrap().clone();
            if !t.is_identifier() {
                i += 1;
                continue;
            }

            let def = match self.table.peek(&t.text) {
                Some(def) => def.clone(),
                None => {
                    i += 1;
                    continue;
                }
            };

            if self.is_active(&def.name) {
                i += 1;
                continue;
            }

            if def.kind == MacroType::FunctionLike {
                let next_is_lparen = seq.get(i + 1).map(|n| n.is_punct(b'(')).unwrap_or(false);
                if !next_is_lparen {
                    i += 1;
                    continue;
                }
            }

            // Re-fetch through `lookup` so __FILE__/__LINE__ are rewritten
            // immediately before use.
            let def = self
                .table
                .lookup(&t.text, self.position.as_ref(), self.interner.as_mut(), self.sink.as_ref())
                .unwrap()
                .clone();

            let (args, end) = read_args(&def, seq, i + 1, &mut self.pool, self.sink.as_ref());
            let mut expn = self.expand_macro(&def, args);

            if !expn.is_empty() {
                if let Some(first) = expn.get_mut(0) {
                    first.leading_whitespace = t.leading_whitespace;
                }
            }

            let gaplength = end - i;
            seq.replace_slice(i, gaplength, &expn);
            i += expn.len();

            let released = std::mem::take(&mut expn);
            self.pool.release(released);
        }
    }

    /// Substitute `def`'s replacement list with `args`, apply pasting, and
    /// recursively expand the result.
    fn expand_macro(&mut self, def: &Macro, mut args: Vec<TokenSequence>) -> TokenSequence {
        self.sink.verbose(&format!("entering expansion of '{}'", def.name.as_str()));
        self.expand_stack.push(def.name.clone());

        let strings = if def.stringify {
            args.iter().map(|a| stringify(a, self.interner.as_mut())).collect::<Vec<_>>()
        } else {
            Vec::new()
        };

        for arg in args.iter_mut() {
            self.expand(arg);
            if let Some(first) = arg.get_mut(0) {
                if first.leading_whitespace == 0 {
                    first.leading_whitespace = 1;
                }
            }
        }

        let mut out = self.pool.acquire();
        let mut i = 0;
        let replacement_len = def.replacement.len();
        while i < replacement_len {
            let t = def.replacement.get(i).unwrap();
            if t.kind == TokenKind::Param {
                let idx = t.param.unwrap_or(0) as usize;
                let mut arg_copy = args[idx].clone();
                out.concat(&mut arg_copy);
                i += 1;
            } else if t.is_punct(b'#') && i + 1 < replacement_len && def.replacement.get(i + 1).unwrap().kind == TokenKind::Param {
                let idx = def.replacement.get(i + 1).unwrap().param.unwrap_or(0) as usize;
                out.push(strings[idx].clone());
                i += 2;
            } else {
                out.push(t.clone());
                i += 1;
            }
        }

        expand_paste(&mut out, def.name.as_str(), self.lexer.as_mut(), self.interner.as_mut(), self.sink.as_ref());
        self.expand(&mut out);

        self.expand_stack.pop();
        self.sink.verbose(&format!("leaving expansion of '{}'", def.name.as_str()));
        for arg in args {
            self.pool.release(arg);
        }

        out
    }

    /// Destroy the macro table and drain the token pool.
    pub fn teardown(&mut self) {
        self.table.teardown(&mut self.pool);
        self.pool.teardown();
        self.expand_stack.clear();
    }
}
