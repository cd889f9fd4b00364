//! The macro table.
//!
//! Interned-name → [`Macro`] definition map with insert/remove/lookup and
//! redefinition checking. Mirrors `hash_insert`/`hash_lookup`/`hash_remove`
//! over `macro_hash_table` in `lacc`'s `macro.c`, minus the C version's
//! manual reference counting — a `HashMap<InternedString, Macro>` already
//! owns its entries.

use crate::diagnostics::{DiagnosticSink, MacroError};
use crate::interner::InternedString;
use crate::pool::{TokenPool, TokenSequence};
use crate::token::{tok_cmp, NumberKind, Token, TokenKind};
use std::collections::HashMap;

/// Whether a macro is invoked by name alone or requires a parenthesised
/// argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroType {
    ObjectLike,
    FunctionLike,
}

/// A macro definition.
#[derive(Debug, Clone)]
pub struct Macro {
    pub name: InternedString,
    pub kind: MacroType,
    /// Parameter arity; `0` when `kind` is `ObjectLike`.
    pub params: usize,
    pub replacement: TokenSequence,
    /// Cached: true iff `replacement` contains `#` immediately followed by `PARAM`.
    pub stringify: bool,
    pub is_file: bool,
    pub is_line: bool,
}

impl Macro {
    pub fn object_like(name: InternedString, replacement: TokenSequence) -> Self {
        Macro { name, kind: MacroType::ObjectLike, params: 0, replacement, stringify: false, is_file: false, is_line: false }
    }

    pub fn function_like(name: InternedString, params: usize, replacement: TokenSequence) -> Self {
        Macro { name, kind: MacroType::FunctionLike, params, replacement, stringify: false, is_file: false, is_line: false }
    }

    /// Every `PARAM` token's index must be in bounds for the macro's arity.
    pub fn check_param_bounds(&self) -> Result<(), MacroError> {
        for t in self.replacement.iter() {
            if t.kind == TokenKind::Param {
                let idx = t.param.unwrap_or(0) as usize;
                if idx >= self.params {
                    return Err(MacroError::ParamOutOfBounds { name: self.name.as_str().to_owned(), index: idx, arity: self.params });
                }
            }
        }
        Ok(())
    }

    /// A replacement list must not begin or end with `##`; rejected here at
    /// definition time rather than deferred to paste resolution.
    pub fn check_paste_position(&self) -> Result<(), MacroError> {
        if self.replacement.is_empty() {
            return Ok(());
        }
        let first = self.replacement.get(0).unwrap();
        let last = self.replacement.get(self.replacement.len() - 1).unwrap();
        if first.kind == TokenKind::TokenPaste {
            return Err(MacroError::PasteAtStart { name: self.name.as_str().to_owned() });
        }
        if last.kind == TokenKind::TokenPaste {
            return Err(MacroError::PasteAtEnd { name: self.name.as_str().to_owned() });
        }
        Ok(())
    }

    fn has_stringify_replacement(&self) -> bool {
        let len = self.replacement.len();
        if len < 2 {
            return false;
        }
        for i in 0..len - 1 {
            let hash = self.replacement.get(i).unwrap();
            let next = self.replacement.get(i + 1).unwrap();
            if hash.is_punct(b'#') && next.kind == TokenKind::Param {
                return true;
            }
        }
        false
    }
}

/// Two macros compare equal iff `kind`, `params`, `name`, and `replacement`
/// (tokenwise) all match — the redefinition check's notion of "no real
/// change".
pub fn macro_eq(a: &Macro, b: &Macro) -> bool {
    if a.kind != b.kind || a.params != b.params {
        return false;
    }
    if a.name != b.name {
        return false;
    }
    if a.replacement.len() != b.replacement.len() {
        return false;
    }
    a.replacement.iter().zip(b.replacement.iter()).all(|(x, y)| tok_cmp(x, y))
}

/// External source of the current input position, consulted only by magic
/// macro lookup.
pub trait FilePositionSource {
    fn current_file_path(&self) -> InternedString;
    fn current_file_line(&self) -> u32;
}

/// Bucket count is whatever `HashMap` chooses; `with_capacity` just reserves
/// a modest table up front, the way `lacc` sizes `macro_hash_table` with a
/// small fixed prime.
pub struct MacroTable {
    entries: HashMap<InternedString, Macro>,
}

const HASH_TABLE_BUCKETS: usize = 1024;

impl MacroTable {
    pub fn new() -> Self {
        MacroTable { entries: HashMap::with_capacity(HASH_TABLE_BUCKETS) }
    }

    /// Insert `macro_`. If a macro with the same name already exists and
    /// does not compare equal (invariant 4), calls `sink.fatal` with a
    /// `Redefinition` diagnostic. If equal, `macro_`'s replacement is
    /// returned to `pool` and the existing entry is retained untouched.
    pub fn define(&mut self, mut macro_: Macro, pool: &mut TokenPool, sink: &dyn DiagnosticSink) {
        if let Err(e) = macro_.check_param_bounds() {
            sink.fatal(e);
        }
        if let Err(e) = macro_.check_paste_position() {
            sink.fatal(e);
        }

        if let Some(existing) = self.entries.get(&macro_.name) {
            if macro_eq(existing, &macro_) {
                let taken = std::mem::take(&mut macro_.replacement);
                pool.release(taken);
                return;
            }
            sink.fatal(MacroError::Redefinition { name: macro_.name.as_str().to_owned() });
        }

        macro_.stringify = macro_.has_stringify_replacement();
        macro_.is_file = macro_.name.as_str() == "__FILE__";
        macro_.is_line = macro_.name.as_str() == "__LINE__";
        self.entries.insert(macro_.name.clone(), macro_);
    }

    /// Remove any entry with `name`; a no-op if absent.
    pub fn undef(&mut self, name: &InternedString, pool: &mut TokenPool) {
        if let Some(removed) = self.entries.remove(name) {
            pool.release(removed.replacement);
        }
    }

    /// Look up `name`. Rewrites slot 0 of the replacement list in place for
    /// the two magic macros before returning — a side effect visible to the
    /// very next `expand` pass.
    pub fn lookup(
        &mut self,
        name: &InternedString,
        position: &dyn FilePositionSource,
        interner: &mut dyn crate::interner::Interner,
        sink: &dyn DiagnosticSink,
    ) -> Option<&Macro> {
        if let Some(def) = self.entries.get_mut(name) {
            if def.is_file {
                let path = position.current_file_path();
                sink.verbose(&format!("rewriting __FILE__ to '{}'", path.as_str()));
                let tok = Token::string(path);
                if let Some(slot) = def.replacement.get_mut(0) {
                    *slot = tok;
                }
            } else if def.is_line {
                let line = position.current_file_line();
                sink.verbose(&format!("rewriting __LINE__ to '{line}'"));
                let line_text = interner.intern_str(&line.to_string());
                let tok = Token::number(line_text, NumberKind::Signed);
                if let Some(slot) = def.replacement.get_mut(0) {
                    *slot = tok;
                }
            }
        }
        self.entries.get(name)
    }

    /// Look up `name` without the magic-macro rewrite. Used where only the
    /// shape of the definition (type, arity) is needed.
    pub fn peek(&self, name: &InternedString) -> Option<&Macro> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &InternedString) -> bool {
        self.entries.contains_key(name)
    }

    /// Destroy all entries and their replacements, returning the backing
    /// storage to `pool`.
    pub fn teardown(&mut self, pool: &mut TokenPool) {
        for (_, def) in self.entries.drain() {
            pool.release(def.replacement);
        }
    }
}

impl Default for MacroTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::PanicDiagnostics;
    use crate::interner::StringInterner;

    struct FixedPosition {
        line: u32,
    }

    impl FilePositionSource for FixedPosition {
        fn current_file_path(&self) -> InternedString {
            unreachable!("tests construct tokens directly")
        }
        fn current_file_line(&self) -> u32 {
            self.line
        }
    }

    #[test]
    fn redefinition_with_same_body_is_accepted() {
        let mut table = MacroTable::new();
        let mut pool = TokenPool::new();
        let sink = PanicDiagnostics;
        let mut interner = StringInterner::new();

        let name = interner.intern_str("X");
        let mut body1 = pool.acquire();
        body1.push(Token::number(interner.intern_str("42"), NumberKind::Signed));
        table.define(Macro::object_like(name.clone(), body1), &mut pool, &sink);

        let mut body2 = pool.acquire();
        body2.push(Token::number(interner.intern_str("42"), NumberKind::Signed));
        table.define(Macro::object_like(name.clone(), body2), &mut pool, &sink);

        assert!(table.contains(&name));
    }

    #[test]
    #[should_panic]
    fn redefinition_with_different_body_is_fatal() {
        let mut table = MacroTable::new();
        let mut pool = TokenPool::new();
        let sink = PanicDiagnostics;
        let mut interner = StringInterner::new();

        let name = interner.intern_str("X");
        let mut body1 = pool.acquire();
        body1.push(Token::number(interner.intern_str("42"), NumberKind::Signed));
        table.define(Macro::object_like(name.clone(), body1), &mut pool, &sink);

        let mut body2 = pool.acquire();
        body2.push(Token::number(interner.intern_str("43"), NumberKind::Signed));
        table.define(Macro::object_like(name, body2), &mut pool, &sink);
    }

    #[test]
    fn undef_removes_entry() {
        let mut table = MacroTable::new();
        let mut pool = TokenPool::new();
        let sink = PanicDiagnostics;
        let mut interner = StringInterner::new();

        let name = interner.intern_str("X");
        let mut body = pool.acquire();
        body.push(Token::number(interner.intern_str("1"), NumberKind::Signed));
        table.define(Macro::object_like(name.clone(), body), &mut pool, &sink);
        assert!(table.contains(&name));

        table.undef(&name, &mut pool);
        assert!(!table.contains(&name));
    }

    #[test]
    fn line_lookup_rewrites_slot_zero() {
        let mut table = MacroTable::new();
        let mut pool = TokenPool::new();
        let sink = PanicDiagnostics;
        let mut interner = StringInterner::new();

        let name = interner.intern_str("__LINE__");
        let mut body = pool.acquire();
        body.push(Token::number(interner.intern_str("0"), NumberKind::Signed));
        table.define(Macro::object_like(name.clone(), body), &mut pool, &sink);

        let position = FixedPosition { line: 7 };
        let def = table.lookup(&name, &position, &mut interner, &sink).unwrap();
        assert_eq!(def.replacement.get(0).unwrap().text.as_str(), "7");
    }
}
