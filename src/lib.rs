//! Macro expansion engine for a C preprocessor.
//!
//! This crate implements the subsystem of a C preprocessor that maintains a
//! table of object-like and function-like macro definitions and, given a
//! stream of preprocessing tokens, produces the fully expanded output
//! stream required by the C standard (C89/C99/C11): the self-reference
//! guard, the `#`/`##` operators, parameter substitution, and the
//! `__FILE__`/`__LINE__` magic macros.
//!
//! The lexer, the directive layer (`#define`/`#undef`/`#if`/`#include`
//! parsing), file I/O, and the diagnostic sink are external collaborators —
//! see [`lexer::Lexer`], [`interner::Interner`], [`macro_table::FilePositionSource`],
//! and [`diagnostics::DiagnosticSink`]. [`expander::Engine`] is the crate's
//! single entry point, tying the macro table, the token buffer pool, and the
//! recursion guard together into the one object that threads through
//! expansion.

pub mod args;
pub mod builtins;
pub mod diagnostics;
pub mod expander;
pub mod interner;
pub mod lexer;
pub mod macro_table;
pub mod paste;
pub mod pool;
pub mod stringify;
pub mod token;

pub use builtins::{register_builtins, EngineConfig, Standard};
pub use diagnostics::{DiagnosticSink, MacroError, PanicDiagnostics, StderrDiagnostics};
pub use expander::Engine;
pub use interner::{InternedString, Interner, StringInterner};
pub use lexer::{BasicLexer, Lexer};
pub use macro_table::{FilePositionSource, Macro, MacroTable, MacroType};
pub use pool::{TokenPool, TokenSequence};
pub use token::{NumberKind, Token, TokenKind};
