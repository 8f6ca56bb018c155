//! Error formatting and exit code handling.
//!
//! Formats `LintError` values on stderr and maps outcomes to process
//! exit codes.

use crate::diagnostics::{self, SourceMap};
use reflint_core::LintError;
use std::process::ExitCode;

// =============================================================================
// Exit Codes
// =============================================================================

/// Clean run, no findings.
pub const EXIT_SUCCESS: u8 = 0;
/// Findings reported, or an input failed to read or parse.
pub const EXIT_ERROR: u8 = 1;
/// Command-line usage error (bad flags, missing args).
pub const EXIT_USAGE_ERROR: u8 = 2;
/// Internal error (should never happen).
pub const EXIT_INTERNAL_ERROR: u8 = 120;

// =============================================================================
// Error Formatting
// =============================================================================

/// Format a `LintError` to stderr.
///
/// Returns the appropriate exit code.
pub fn format_lint_error(error: &LintError, source: Option<&str>, filename: &str) -> ExitCode {
    let output = format_error_string(error, source, filename);
    eprintln!("{}", output);
    exit_code_for_error(error)
}

/// Format a `LintError` into a string (for testing).
pub fn format_error_string(error: &LintError, source: Option<&str>, filename: &str) -> String {
    match error {
        LintError::LexError { message, span } | LintError::SyntaxError { message, span } => {
            if let Some(src) = source {
                let sm = SourceMap::new(src, filename);
                diagnostics::render_source_error(&sm, span, "SyntaxError", message)
            } else {
                format!("{}: SyntaxError: {}", filename, message)
            }
        }
        LintError::Io { path, message } => {
            format!("{}: {}", path, message)
        }
        LintError::Internal(message) => {
            format!("internal error: {}", message)
        }
    }
}

/// Map a `LintError` to its exit code.
#[inline]
fn exit_code_for_error(error: &LintError) -> ExitCode {
    match error {
        LintError::Internal(_) => ExitCode::from(EXIT_INTERNAL_ERROR),
        _ => ExitCode::from(EXIT_ERROR),
    }
}

// =============================================================================
// Tests
// =============================================================================
