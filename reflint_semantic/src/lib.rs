//! Scope analysis for parsed files.
//!
//! [`bind`] turns a syntax tree into a [`ScopeGraph`]: scopes, declared
//! bindings with their definition sites, and resolved identifier
//! references. The [`query`] module layers the traversal helpers the
//! classifiers are written against.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod binder;
pub mod query;
pub mod scope;

pub use binder::bind;
pub use query::{identifiers_in, references_in, scope_references, traverse, upstream_chain};
pub use scope::{
    Binding, BindingId, Definition, DefinitionKind, Reference, ReferenceId, Scope, ScopeGraph,
    ScopeId, ScopeKind,
};
