//! Diagnostic sink and the fatal-error taxonomy.
//!
//! `lacc`'s `context.h` exposes three functions: `verbose` (no-op unless
//! `context.verbose`), `warning` (writes to stderr unless suppressed), and
//! `error` (writes to stderr and terminates the process). [`DiagnosticSink`]
//! is the same three-method shape; [`StderrDiagnostics`] is the default
//! implementation, routed through `tracing` the way `FyraLabs-anda`'s crates
//! log rather than writing to stderr directly.

use thiserror::Error;

/// The engine's fatal-error taxonomy, one variant per failure kind that
/// terminates expansion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MacroError {
    #[error("redefinition of macro '{name}' with different substitution")]
    Redefinition { name: String },

    #[error("parameter index {index} out of bounds for macro '{name}' with arity {arity}")]
    ParamOutOfBounds { name: String, index: usize, arity: usize },

    #[error("unexpected token paste operator at the beginning of macro '{name}'")]
    PasteAtStart { name: String },

    #[error("unexpected token paste operator at the end of macro '{name}'")]
    PasteAtEnd { name: String },

    #[error("invalid token resulting from pasting '{left}' and '{right}'")]
    InvalidPaste { left: String, right: String },

    #[error("unexpected end of input in macro expansion")]
    UnterminatedArgumentList,

    #[error("negative nesting depth while reading macro arguments")]
    UnbalancedParens,

    #[error("expected '{expected}', but got '{found}'")]
    MissingDelimiter { expected: String, found: String },
}

/// External diagnostic sink.
///
/// `fatal` never returns — the engine never attempts to continue after a
/// fatal error, mirroring `lacc`'s `error()` calling `exit(1)`.
pub trait DiagnosticSink {
    fn verbose(&self, message: &str);
    fn warn(&self, message: &str);
    fn fatal(&self, error: MacroError) -> !;
}

/// Default sink: logs through `tracing` and exits the process on `fatal`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrDiagnostics {
    pub verbose_enabled: bool,
}

impl DiagnosticSink for StderrDiagnostics {
    fn verbose(&self, message: &str) {
        if self.verbose_enabled {
            tracing::trace!("{message}");
        }
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn fatal(&self, error: MacroError) -> ! {
        tracing::error!("{error}");
        std::process::exit(1);
    }
}

/// Test double: `fatal` panics with the formatted message instead of
/// terminating the process, so `#[should_panic]` can assert on the fatal
/// path without killing the test runner.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicDiagnostics;

impl DiagnosticSink for PanicDiagnostics {
    fn verbose(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}

    fn fatal(&self, error: MacroError) -> ! {
        panic!("{error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_sink_logs_non_fatal_messages_through_tracing() {
        let _ = tracing_subscriber::fmt::try_init();
        let sink = StderrDiagnostics { verbose_enabled: true };
        sink.verbose("tracing installed");
        sink.warn("macro arity mismatch (non-fatal)");
    }

    #[test]
    fn fatal_error_messages_match_taxonomy() {
        let err = MacroError::Redefinition { name: "X".into() };
        assert!(err.to_string().contains("redefinition"));
    }
}
