//! # Reflint Core
//!
//! Shared primitives for the reflint analyzer: source spans, error types
//! and the diagnostic model that rules emit and the CLI renders.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod diagnostic;
pub mod error;
pub mod span;

pub use diagnostic::Diagnostic;
pub use error::{LintError, LintResult};
pub use span::Span;

/// Crate version, surfaced by the CLI `--version` flag.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
