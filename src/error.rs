//! Error types for macro expansion
//!
//! Every failure raised while a handler pulls tokens from the stream is an
//! [`ExpandError`]. Only [`ExpandError::ArgumentUnavailable`] is ever recovered
//! locally (call sites treat it as "optional trailing argument absent"); all
//! other kinds abort expansion of the whole source string. The host wraps the
//! failing error in a [`Diagnostic`] that names the offending macro.

use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Failure raised by a cursor primitive, the scanner or a notation handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    /// End of input reached while the nesting depth was still open.
    #[error("expecting closing delimiter {expected}")]
    UnterminatedDelimiter { expected: String },

    /// A `[` parameter with no matching `]`.
    #[error("expecting ] to close the bracketed parameter")]
    UnterminatedParameter,

    /// An opening token that is not in the delimiter table.
    #[error("expecting an opening delimiter from the {table} table, found {found}")]
    InvalidDelimiterSpecifier { found: String, table: &'static str },

    /// A `\`-prefixed token used where a size prefix was expected.
    #[error("invalid size specifier {found}")]
    InvalidSizeSpecifier { found: String },

    /// An argument outside the fixed set of literal values a macro accepts.
    #[error("invalid parameter {found}, expecting one of {expected}")]
    InvalidEnumeratedArgument {
        found: String,
        expected: &'static str,
    },

    /// An argument that must be a non-negative integer.
    #[error("expecting an integer, found {found}")]
    InvalidInteger { found: String },

    /// A matrix dimension above the configured maximum.
    #[error("matrix dimension {found} exceeds the maximum of {limit}")]
    MatrixTooLarge { found: usize, limit: usize },

    /// The stream ran out before a (possibly optional) argument was gathered.
    #[error("unexpected end of input in a macro argument")]
    ArgumentUnavailable,

    /// The host's expansion budget ran out, usually a self-referential alias.
    #[error("too many expansions (limit {limit}), possibly an infinite macro loop")]
    ExpansionLimitExceeded { limit: usize },
}

impl ExpandError {
    /// Whether a call site may swallow this error and fall back to a default rendering.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExpandError::ArgumentUnavailable)
    }

    pub fn unterminated(expected: impl Into<String>) -> Self {
        ExpandError::UnterminatedDelimiter {
            expected: expected.into(),
        }
    }
}

/// Result alias used across the crate.
pub type ExpandResult<T> = Result<T, ExpandError>;

/// The single diagnostic a user sees when expansion of a source string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the macro whose expansion failed (e.g. `\qty`).
    pub macro_name: String,
    /// Byte range of the invocation in the original source, when it came from there.
    pub span: Option<Range<usize>>,
    pub error: ExpandError,
}

impl Diagnostic {
    pub fn new(macro_name: impl Into<String>, span: Option<Range<usize>>, error: ExpandError) -> Self {
        Diagnostic {
            macro_name: macro_name.into(),
            span,
            error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.macro_name, self.error)?;
        if let Some(span) = &self.span {
            write!(f, " at {}..{}", span.start, span.end)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_argument_unavailable_is_recoverable() {
        assert!(ExpandError::ArgumentUnavailable.is_recoverable());
        assert!(!ExpandError::UnterminatedParameter.is_recoverable());
        assert!(!ExpandError::unterminated(")").is_recoverable());
        assert!(!ExpandError::InvalidInteger {
            found: "x".to_string()
        }
        .is_recoverable());
        assert!(!ExpandError::MatrixTooLarge { found: 65, limit: 64 }.is_recoverable());
    }

    #[test]
    fn diagnostic_names_macro_and_span() {
        let diag = Diagnostic::new("\\qty", Some(3..7), ExpandError::unterminated(")"));
        assert_eq!(
            diag.to_string(),
            "\\qty: expecting closing delimiter ) at 3..7"
        );
    }

    #[test]
    fn delimiter_error_names_the_table() {
        let error = ExpandError::InvalidDelimiterSpecifier {
            found: "<".to_string(),
            table: "braces",
        };
        assert_eq!(
            error.to_string(),
            "expecting an opening delimiter from the braces table, found <"
        );
    }

    #[test]
    fn diagnostic_without_span() {
        let diag = Diagnostic::new("\\pmat", None, ExpandError::InvalidEnumeratedArgument {
            found: "4".to_string(),
            expected: "0, 1, 2, 3, x, y, z",
        });
        assert_eq!(
            diag.to_string(),
            "\\pmat: invalid parameter 4, expecting one of 0, 1, 2, 3, x, y, z"
        );
    }
}
