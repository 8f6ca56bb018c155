//! Lint rules for component-based reactive UI code.
//!
//! The crate layers as: shape classifiers ([`react`]) recognize
//! components, state cells and effects from tree shape; reference
//! classifiers ([`classify`]) decide what a resolved identifier
//! ultimately is; the detector ([`coupling`]) combines both into
//! verdicts; the [`linter`] walks a file and collects diagnostics.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod classify;
pub mod coupling;
pub mod equivalence;
pub mod linter;
pub mod messages;
pub mod react;
pub mod rule;

pub use coupling::ParentChildCoupling;
pub use linter::Linter;
pub use messages::MessageId;
pub use rule::{DiagnosticSink, Rule, RuleContext};
