//! The string interner.
//!
//! `lacc` keeps a global string table mapping raw byte sequences to stable,
//! comparable handles so that identifier/string comparisons never touch
//! memory comparison on the hot path. The engine only needs the interface
//! below; [`StringInterner`] is the reference implementation used by the
//! rest of this crate and by tests, the way a fake collaborator stands in
//! for a real one in an isolated unit test.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Opaque, cheap-to-clone, equality-comparable handle for an interned byte
/// sequence.
///
/// Two handles compare equal iff their underlying text is equal; a
/// well-behaved [`Interner`] additionally de-duplicates storage so that
/// identical text is never interned twice, but correctness here never
/// depends on that de-duplication.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct InternedString(Rc<str>);

impl InternedString {
    /// The interned empty string. Used for token payload slots that carry no
    /// text (`PARAM`, `EMPTY_ARG`, `NEWLINE`, `TOKEN_PASTE`, `END`).
    pub fn empty() -> Self {
        InternedString(Rc::from(""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// External interface to the string interner.
pub trait Interner {
    fn intern(&mut self, bytes: &[u8]) -> InternedString;

    fn intern_str(&mut self, s: &str) -> InternedString {
        self.intern(s.as_bytes())
    }

    /// `equal(s, t) -> bool` — handles are already `Eq`, so this is a thin
    /// convenience for callers that only hold the trait object.
    fn equal(&self, a: &InternedString, b: &InternedString) -> bool {
        a == b
    }

    /// Compact constructor for compile-time-known names like `"__FILE__"`.
    fn short_string(&mut self, literal: &'static str) -> InternedString {
        self.intern_str(literal)
    }
}

/// Reference interner: a de-duplicating byte-sequence → handle map.
///
/// Bucket growth is whatever `HashMap`'s default strategy provides; unlike
/// the macro table, the interner has no fixed-size advisory bucket count to
/// honor, so no explicit capacity is reserved up front.
#[derive(Default)]
pub struct StringInterner {
    table: HashMap<Rc<str>, InternedString>,
}

impl StringInterner {
    pub fn new() -> Self {
        StringInterner { table: HashMap::new() }
    }
}

impl Interner for StringInterner {
    fn intern(&mut self, bytes: &[u8]) -> InternedString {
        let s = std::str::from_utf8(bytes).expect("preprocessing tokens are valid UTF-8");
        if let Some(existing) = self.table.get(s) {
            return existing.clone();
        }
        let rc: Rc<str> = Rc::from(s);
        let handle = InternedString(rc.clone());
        self.table.insert(rc, handle.clone());
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_bytes_compares_equal() {
        let mut interner = StringInterner::new();
        let a = interner.intern_str("foo");
        let b = interner.intern_str("foo");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "foo");
    }

    #[test]
    fn interning_deduplicates_storage() {
        let mut interner = StringInterner::new();
        interner.intern_str("hello");
        interner.intern_str("hello");
        assert_eq!(interner.table.len(), 1);
    }

    #[test]
    fn distinct_text_is_not_equal() {
        let mut interner = StringInterner::new();
        let a = interner.intern_str("foo");
        let b = interner.intern_str("bar");
        assert_ne!(a, b);
    }
}
