//! The rule host: the `Rule` trait, the per-file context rules read
//! from, and the sink they report into.

use reflint_core::Diagnostic;
use reflint_parser::{NodeId, SyntaxTree};
use reflint_semantic::ScopeGraph;

use crate::messages::MessageId;

/// Read-only analysis surface for one file.
pub struct RuleContext<'a> {
    /// The parsed tree.
    pub tree: &'a SyntaxTree,
    /// Its scope graph.
    pub scopes: &'a ScopeGraph,
}

/// Collects diagnostics during a lint pass.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    /// Report a diagnostic against a node.
    pub fn report(&mut self, ctx: &RuleContext<'_>, rule: &'static str, id: MessageId, node: NodeId) {
        self.diagnostics.push(Diagnostic::new(
            rule,
            id.as_str(),
            id.text().to_string(),
            ctx.tree.span(node),
        ));
    }

    /// Finish the pass: diagnostics in stable span order, duplicates
    /// removed. Repeated runs over the same tree produce identical
    /// output.
    #[must_use]
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by(Diagnostic::stable_cmp);
        self.diagnostics
            .dedup_by(|a, b| Diagnostic::stable_cmp(a, b) == std::cmp::Ordering::Equal);
        self.diagnostics
    }
}

/// A lint rule.
///
/// The host calls `check` once for every node of the tree, in source
/// order; rules filter for the shapes they care about and report into
/// the sink. Rules hold no per-file state, so one instance serves every
/// file.
pub trait Rule {
    /// Rule name used in diagnostics and configuration.
    fn name(&self) -> &'static str;

    /// Inspect one node.
    fn check(&self, ctx: &RuleContext<'_>, node: NodeId, sink: &mut DiagnosticSink);
}
