//! Built-ins and magic macros.
//!
//! Registers the predefined macro names every translation unit starts with.
//! Mirrors `register_builtin_definitions`/`register_macro`/`parse` in
//! `lacc`'s `macro.c`. `__FILE__` and `__LINE__` themselves are handled by
//! [`crate::macro_table::MacroTable::lookup`], which rewrites their
//! replacement on every lookup; this module only seeds their placeholder.

use crate::expander::Engine;
use crate::macro_table::Macro;
use crate::token::Token;

/// The C standard controlling which version macro (and, for C89, the extra
/// `__STRICT_ANSI__` marker) gets registered, following the same
/// one-extra-macro-per-standard pattern `context.h`/`macro.c` use for their
/// `cstd` switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standard {
    C89,
    C99,
    C11,
}

/// Groups the handful of settings built-in registration (and, eventually,
/// the wider preprocessor) needs at startup — this crate's analogue of
/// `lacc`'s global `struct context`.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub standard: Standard,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { standard: Standard::C99 }
    }
}

/// Parse `text` into a [`crate::pool::TokenSequence`], with `@` serving as a
/// marker that becomes a `PARAM` token. No built-in registered here actually
/// takes a parameter, but the marker is kept for parity with `lacc`'s
/// `parse`, which built-ins defined elsewhere in the compiler may rely on.
fn parse(engine: &mut Engine, text: &str) -> crate::pool::TokenSequence {
    let mut seq = engine.pool_mut().acquire();
    let mut param_index = 0u32;
    let mut rest = text;
    while let Some(at) = rest.find('@') {
        if at > 0 {
            let mut chunk = crate::lexer::BasicLexer.tokenize_line(&rest[..at], engine.interner_mut());
            seq.concat(&mut chunk);
            engine.pool_mut().release(chunk);
        }
        seq.push(Token::param(param_index));
        param_index += 1;
        rest = &rest[at + 1..];
    }
    if !rest.is_empty() {
        let mut chunk = crate::lexer::BasicLexer.tokenize_line(rest, engine.interner_mut());
        seq.concat(&mut chunk);
        engine.pool_mut().release(chunk);
    }
    seq
}

fn register_macro(engine: &mut Engine, name: &str, value: &str) {
    let replacement = parse(engine, value);
    let interned_name = engine.intern(name);
    engine.define(Macro::object_like(interned_name, replacement));
}

/// Registers every built-in macro for `standard`.
pub fn register_builtins(engine: &mut Engine, standard: Standard) {
    register_macro(engine, "__STDC__", "1");
    register_macro(engine, "__STDC_HOSTED__", "1");
    register_macro(engine, "__x86_64__", "1");
    register_macro(engine, "__inline", "");
    // Placeholder bodies — rewritten on every lookup by `MacroTable::lookup`.
    register_macro(engine, "__FILE__", "0");
    register_macro(engine, "__LINE__", "0");

    match standard {
        Standard::C89 => {
            register_macro(engine, "__STDC_VERSION__", "199409L");
            register_macro(engine, "__STRICT_ANSI__", "");
        }
        Standard::C99 => {
            register_macro(engine, "__STDC_VERSION__", "199901L");
        }
        Standard::C11 => {
            register_macro(engine, "__STDC_VERSION__", "201112L");
            register_macro(engine, "__STDC_UTF_16__", "1");
            register_macro(engine, "__STDC_UTF_32__", "1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::StderrDiagnostics;
    use crate::interner::StringInterner;
    use crate::lexer::BasicLexer;
    use crate::macro_table::FilePositionSource;
    use crate::interner::InternedString;

    struct FixedPosition;
    impl FilePositionSource for FixedPosition {
        fn current_file_path(&self) -> InternedString {
            InternedString::empty()
        }
        fn current_file_line(&self) -> u32 {
            0
        }
    }

    fn new_engine() -> Engine {
        Engine::new(Box::new(StringInterner::new()), Box::new(BasicLexer), Box::new(StderrDiagnostics::default()), Box::new(FixedPosition))
    }

    #[test]
    fn registers_stdc_and_standard_version() {
        let mut engine = new_engine();
        register_builtins(&mut engine, Standard::C99);

        let name = engine.intern("__STDC_VERSION__");
        let def = engine.lookup(&name).expect("registered");
        assert_eq!(def.replacement.get(0).unwrap().text.as_str(), "199901L");
    }

    #[test]
    fn c89_also_registers_strict_ansi() {
        let mut engine = new_engine();
        register_builtins(&mut engine, Standard::C89);
        let name = engine.intern("__STRICT_ANSI__");
        assert!(engine.lookup(&name).is_some());
    }

    #[test]
    fn file_and_line_are_flagged_as_magic() {
        let mut engine = new_engine();
        register_builtins(&mut engine, Standard::C99);
        let file = engine.intern("__FILE__");
        let line = engine.intern("__LINE__");
        assert!(engine.lookup(&file).unwrap().is_file);
        assert!(engine.lookup(&line).unwrap().is_line);
    }
}
