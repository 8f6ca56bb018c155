//! Error types shared across the reflint crates.

use crate::span::Span;
use std::fmt;

/// Result alias used throughout reflint.
pub type LintResult<T> = Result<T, LintError>;

/// Errors produced while tokenizing, parsing or driving an analysis.
///
/// Analysis itself never errors: classifiers and the detector use
/// `Option` for "not applicable" outcomes. `LintError` covers the
/// boundary where source text enters the system.
#[derive(Debug, Clone)]
pub enum LintError {
    /// Invalid character sequence during tokenization.
    LexError {
        /// Error message.
        message: String,
        /// Location of the offending text.
        span: Span,
    },
    /// Structurally invalid source during parsing.
    SyntaxError {
        /// Error message.
        message: String,
        /// Location of the offending text.
        span: Span,
    },
    /// File-level I/O failure in the driver.
    Io {
        /// Path being read.
        path: String,
        /// Underlying error text.
        message: String,
    },
    /// Invariant violation inside reflint itself.
    Internal(String),
}

impl LintError {
    /// Create a lexer error.
    #[must_use]
    pub fn lex(message: impl Into<String>, span: Span) -> Self {
        Self::LexError {
            message: message.into(),
            span,
        }
    }

    /// Create a syntax error.
    #[must_use]
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::SyntaxError {
            message: message.into(),
            span,
        }
    }

    /// Get the source span, when the error points at source text.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::LexError { span, .. } | Self::SyntaxError { span, .. } => Some(*span),
            Self::Io { .. } | Self::Internal(_) => None,
        }
    }
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LexError { message, .. } => write!(f, "lex error: {message}"),
            Self::SyntaxError { message, .. } => write!(f, "syntax error: {message}"),
            Self::Io { path, message } => write!(f, "{path}: {message}"),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for LintError {}
